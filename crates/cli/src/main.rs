fn main() {
    if let Err(error) = gallery_pilot_cli::run() {
        // The subscriber is installed inside run() right after argument parsing.
        tracing::error!(%error, "CLI execution failed");
        std::process::exit(1);
    }
}
