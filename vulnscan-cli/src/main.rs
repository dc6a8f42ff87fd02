use vulnscan_cli::logging::init_tracing;
use vulnscan_scanner::LocalOrchestrator;

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("warning: {e:#}");
    }

    let orchestrator = LocalOrchestrator::default();
    tracing::debug!(matcher = orchestrator.matcher_name(), "using local orchestrator");
    let code = vulnscan_cli::run(
        std::env::args_os(),
        &orchestrator,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    std::process::exit(code);
}
