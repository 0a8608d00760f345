use crate::OutputFormat;
use crate::commands::resolve::render_element_line;
use crate::util::{CliContext, CliResult, ElementSummary, to_json};
use clap::{Args, Subcommand};
use gallery_pilot_emulators::{ElementLocator, GalleryApp};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct ToolbarArgs {
    #[command(subcommand)]
    pub command: ToolbarCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ToolbarCommand {
    /// Report which toolbar generation the tree uses.
    Layout,
    /// Resolve the n-th toolbar button (zero based).
    Button {
        #[arg(value_name = "INDEX")]
        index: usize,
        #[arg(long = "click", help = "Click the button after resolving it.")]
        click: bool,
    },
    /// Resolve the toolbar's cancel icon.
    Cancel {
        #[arg(long = "click", help = "Click the icon after resolving it.")]
        click: bool,
    },
}

#[derive(Serialize, Debug, PartialEq)]
struct LayoutSummary {
    layout: String,
    toolbar: ElementSummary,
}

pub fn run(context: &CliContext, args: &ToolbarArgs, format: OutputFormat) -> CliResult<String> {
    match &args.command {
        ToolbarCommand::Layout => run_layout(context, format),
        ToolbarCommand::Button { index, click } => {
            let gallery = GalleryApp::with_settings(&context.session, context.settings.clone());
            let button = gallery.toolbar_button(*index)?;
            if *click {
                gallery.click_toolbar_button(*index)?;
            }
            render_element(&ElementSummary::from_element(button.as_ref()), format)
        }
        ToolbarCommand::Cancel { click } => {
            let gallery = GalleryApp::with_settings(&context.session, context.settings.clone());
            let icon = gallery.toolbar_cancel_icon()?;
            if *click {
                gallery.click_toolbar_cancel_icon()?;
            }
            render_element(&ElementSummary::from_element(icon.as_ref()), format)
        }
    }
}

fn run_layout(context: &CliContext, format: OutputFormat) -> CliResult<String> {
    let locator = ElementLocator::with_settings(&context.session, context.settings.clone());
    let layout = locator.toolbar_layout()?;
    let toolbar = locator.toolbar()?;
    let summary = LayoutSummary {
        layout: layout.as_str().to_owned(),
        toolbar: ElementSummary::from_element(toolbar.element().as_ref()),
    };
    match format {
        OutputFormat::Text => {
            Ok(format!("{} layout\n  {}\n", summary.layout, render_element_line(&summary.toolbar)))
        }
        OutputFormat::Json => to_json(&summary),
    }
}

fn render_element(summary: &ElementSummary, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(format!("{}\n", render_element_line(summary))),
        OutputFormat::Json => to_json(summary),
    }
}
