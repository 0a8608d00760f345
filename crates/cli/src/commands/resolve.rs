use crate::OutputFormat;
use crate::util::{CliContext, CliResult, ElementSummary, parse_role_arg, to_json, yes_no};
use clap::Args;
use gallery_pilot_emulators::{ElementLocator, Lookup, Role};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[arg(value_name = "ROLE", value_parser = parse_role_arg)]
    pub role: Role,
    #[arg(long = "all", help = "List every match instead of the role's declared lookup.")]
    pub all: bool,
}

#[derive(Serialize, Debug, PartialEq)]
struct ResolveSummary {
    role: String,
    lookup: String,
    elements: Vec<ElementSummary>,
}

pub fn run(context: &CliContext, args: &ResolveArgs, format: OutputFormat) -> CliResult<String> {
    let locator = ElementLocator::with_settings(&context.session, context.settings.clone());
    let elements = if args.all {
        locator.resolve_many(args.role)?
    } else if args.role.is_lazy() {
        locator.resolve_single_retrying(args.role)?.into_iter().collect()
    } else {
        vec![locator.resolve(args.role)?]
    };

    let summary = ResolveSummary {
        role: args.role.as_str().to_owned(),
        lookup: describe_lookup(args.role.lookup(), args.all),
        elements: elements
            .iter()
            .map(|element| ElementSummary::from_element(element.as_ref()))
            .collect(),
    };

    match format {
        OutputFormat::Text => Ok(render_resolve_text(&summary)),
        OutputFormat::Json => to_json(&summary),
    }
}

fn describe_lookup(lookup: Lookup, all: bool) -> String {
    if all {
        return "many".to_owned();
    }
    match lookup {
        Lookup::Single => "single".to_owned(),
        Lookup::Lazy => "lazy".to_owned(),
        Lookup::Indexed(index) => format!("index {index}"),
    }
}

fn render_resolve_text(summary: &ResolveSummary) -> String {
    let mut output = String::new();
    if summary.elements.is_empty() {
        let _ = writeln!(&mut output, "{} ({}): not present", summary.role, summary.lookup);
        return output;
    }
    let _ = writeln!(&mut output, "{} ({}):", summary.role, summary.lookup);
    for element in &summary.elements {
        let _ = writeln!(&mut output, "  {}", render_element_line(element));
    }
    output
}

pub(crate) fn render_element_line(element: &ElementSummary) -> String {
    let label = element
        .label()
        .if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<79, 166, 255>().to_string())
        .to_string();
    format!(
        "{label} #{} bounds={} visible={}",
        element.runtime_id,
        element.bounds,
        yes_no(element.visible)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use gallery_pilot_provider_mock::fixtures::{self, ids};
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    fn resolves_a_single_role(context: CliContext) {
        let args = ResolveArgs { role: Role::AlbumsTabButton, all: false };
        let output = run(&context, &args, OutputFormat::Text).unwrap();
        assert!(output.starts_with("albums-tab-button (single):"));
        assert!(output.contains(ids::ALBUMS_TAB));
        assert!(output.contains("visible=yes"));
    }

    #[rstest]
    fn lists_all_matches_as_json(context: CliContext) {
        let args = ResolveArgs { role: Role::FirstAlbum, all: true };
        let output = run(&context, &args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["lookup"], "many");
        assert_eq!(value["elements"].as_array().unwrap().len(), 2);
        assert_eq!(value["elements"][0]["runtime_id"], ids::FIRST_ALBUM);
    }

    #[rstest]
    fn absent_lazy_role_is_not_an_error(mut context: CliContext) {
        context.settings.retry_delay = Duration::ZERO;
        let args = ResolveArgs { role: Role::DeleteDialog, all: false };
        let output = run(&context, &args, OutputFormat::Text).unwrap();
        assert_eq!(output, "delete-dialog (lazy): not present\n");
    }

    #[rstest]
    fn present_lazy_role_resolves(context: CliContext) {
        context.tree.attach(ids::VIEW, &fixtures::delete_dialog()).unwrap();
        let args = ResolveArgs { role: Role::DeleteDialogConfirm, all: false };
        let output = run(&context, &args, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["elements"][0]["object_name"], "deleteDialogYes");
    }
}
