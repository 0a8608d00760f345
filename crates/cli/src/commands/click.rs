use crate::OutputFormat;
use crate::util::{CliContext, CliResult, ElementSummary, parse_role_arg, to_json};
use clap::Args;
use gallery_pilot_core::platform::PointerDevice;
use gallery_pilot_core::types::Point;
use gallery_pilot_emulators::{ElementLocator, InteractionDriver, Role, closing_point};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct ClickArgs {
    #[arg(value_name = "ROLE", value_parser = parse_role_arg)]
    pub role: Role,
}

#[derive(Args, Debug, Clone)]
pub struct ClosingPointArgs {
    #[arg(value_name = "ROLE", value_parser = parse_role_arg)]
    pub role: Role,
    #[arg(long = "click", help = "Click at the closing point.")]
    pub click: bool,
}

#[derive(Serialize, Debug, PartialEq)]
struct ClickSummary {
    element: ElementSummary,
    point: Point,
    clicked: bool,
}

pub fn run_click(
    context: &CliContext,
    args: &ClickArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let locator = ElementLocator::with_settings(&context.session, context.settings.clone());
    let element = locator.resolve(args.role)?;
    InteractionDriver::new(&context.session).click(element.as_ref())?;

    let point = context.pointer.position()?;
    let element = ElementSummary::from_element(element.as_ref());
    let summary = ClickSummary { element, point, clicked: true };
    render(&summary, format)
}

pub fn run_closing_point(
    context: &CliContext,
    args: &ClosingPointArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let locator = ElementLocator::with_settings(&context.session, context.settings.clone());
    let element = locator.resolve(args.role)?;
    let point = closing_point(element.bounds());
    if args.click {
        InteractionDriver::new(&context.session).click_near_closing_point(element.as_ref())?;
    }

    let summary = ClickSummary {
        element: ElementSummary::from_element(element.as_ref()),
        point,
        clicked: args.click,
    };
    render(&summary, format)
}

fn render(summary: &ClickSummary, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => {
            let verb = if summary.clicked { "clicked" } else { "closing point" };
            Ok(format!("{verb} {} at {}\n", summary.element.label(), summary.point))
        }
        OutputFormat::Json => to_json(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use rstest::rstest;

    #[rstest]
    fn click_hits_the_element_centre(context: CliContext) {
        let args = ClickArgs { role: Role::AlbumCoverImage };
        let output = run_click(&context, &args, OutputFormat::Text).unwrap();
        assert_eq!(output, "clicked QQuickImage \"albumCoverImage\" at (360, 510)\n");
        assert_eq!(context.pointer.click_points(), vec![Point::new(360.0, 510.0)]);
    }

    #[rstest]
    fn closing_point_is_reported_without_clicking(context: CliContext) {
        let args = ClosingPointArgs { role: Role::AlbumCoverImage, click: false };
        let output = run_closing_point(&context, &args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["point"]["x"], 360.0);
        assert_eq!(value["point"]["y"], 761.0);
        assert_eq!(value["clicked"], false);
        assert!(context.pointer.log().is_empty());
    }

    #[rstest]
    fn closing_point_click_moves_below_the_element(context: CliContext) {
        let args = ClosingPointArgs { role: Role::AlbumCoverImage, click: true };
        run_closing_point(&context, &args, OutputFormat::Text).unwrap();
        assert_eq!(context.pointer.position().unwrap(), Point::new(360.0, 761.0));
        assert_eq!(context.pointer.click_points(), vec![Point::new(360.0, 761.0)]);
    }
}
