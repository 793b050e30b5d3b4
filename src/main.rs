use std::env;
use std::io;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use servaldna_agi::exec::SystemExecutor;

fn main() -> ExitCode {
    // stdout is the AGI channel; logs go to stderr, which the engine
    // surfaces on its console.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // In-band VERBOSE diagnostics are on unless the dialplan sets
    // SDNAAGI_DEBUG=0.
    let debug = env::var("SDNAAGI_DEBUG").map(|v| v != "0").unwrap_or(true);

    let stdin = io::stdin();
    let stdout = io::stdout();
    match servaldna_agi::run(stdin.lock(), stdout.lock(), &SystemExecutor, debug) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("lookup failed: {err}");
            ExitCode::FAILURE
        }
    }
}
