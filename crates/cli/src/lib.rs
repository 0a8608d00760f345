mod commands;
#[cfg(test)]
mod test_support;
pub mod util;

use clap::{Parser, Subcommand, ValueEnum};
use gallery_pilot_emulators::EmulatorSettings;
use gallery_pilot_provider_mock::fixtures::ToolbarGeneration;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::commands::click::{ClickArgs, ClosingPointArgs};
use crate::commands::dump::DumpArgs;
use crate::commands::resolve::ResolveArgs;
use crate::commands::toolbar::ToolbarArgs;
use crate::util::{CliContext, CliResult, load_tree, parse_millis};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Toolbar generation of the embedded fixture.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutArg {
    /// Buttons wrapped in loaders.
    #[default]
    Loader,
    /// Buttons placed directly in the row.
    Direct,
}

impl From<LayoutArg> for ToolbarGeneration {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Loader => ToolbarGeneration::Loader,
            LayoutArg::Direct => ToolbarGeneration::Direct,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "gallery-pilot",
    version,
    about = "Drive the gallery UI-test emulators against a mock UI tree"
)]
pub struct Cli {
    #[arg(
        long = "tree",
        value_name = "FILE",
        global = true,
        help = "Load the UI tree from an XML file."
    )]
    pub tree: Option<PathBuf>,
    #[arg(
        long = "layout",
        value_enum,
        default_value_t = LayoutArg::Loader,
        global = true,
        help = "Toolbar generation of the embedded fixture (ignored with --tree)."
    )]
    pub layout: LayoutArg,
    #[arg(
        long = "retry-delay-ms",
        value_name = "MS",
        value_parser = parse_millis,
        default_value = "1000",
        global = true,
        help = "Delay before the single retry of a lazily created element."
    )]
    pub retry_delay: Duration,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        help = "Log filter (overrides RUST_LOG), e.g. debug or gallery_pilot_emulators=trace."
    )]
    pub log_level: Option<String>,
    #[arg(long = "no-color", global = true, help = "Disable ANSI colors in text output.")]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a role to its element(s).
    Resolve(ResolveArgs),
    /// Inspect or click the toolbar.
    Toolbar(ToolbarArgs),
    /// Click the element of a role.
    Click(ClickArgs),
    /// Compute (and optionally click) the point just below an element.
    ClosingPoint(ClosingPointArgs),
    /// Print the UI tree.
    Dump(DumpArgs),
}

pub fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    if cli.no_color {
        owo_colors::set_override(false);
    }

    let output = execute(&cli)?;
    if !output.is_empty() {
        print!("{output}");
    }
    Ok(())
}

/// Builds the context described by the global flags and runs the selected command.
pub fn execute(cli: &Cli) -> CliResult<String> {
    let tree = load_tree(cli.tree.as_deref(), cli.layout.into())?;
    let settings = EmulatorSettings::default().with_retry_delay(cli.retry_delay);
    let context = CliContext::new(tree, settings);
    run_command(&context, &cli.command, cli.format)
}

fn run_command(
    context: &CliContext,
    command: &Commands,
    format: OutputFormat,
) -> CliResult<String> {
    match command {
        Commands::Resolve(args) => commands::resolve::run(context, args, format),
        Commands::Toolbar(args) => commands::toolbar::run(context, args, format),
        Commands::Click(args) => commands::click::run_click(context, args, format),
        Commands::ClosingPoint(args) => commands::click::run_closing_point(context, args, format),
        Commands::Dump(args) => commands::dump::run(context, args, format),
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
