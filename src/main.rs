// Entrypoint for the CLI application.
// - Keeps `main` small: resolve configuration, build the client and run
//   the tender flow.
// - Setup problems surface through `anyhow`; a failed stage exits with
//   its own negative code.

use clap::Parser;
use lgp_tender::{api::TenderClient, config::{Cli, Config}, flow, ui};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> anyhow::Result<()> {
    // Diagnostics are `tracing` events filtered by RUST_LOG; stdout stays
    // reserved for the stage report.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    let mut client = TenderClient::new(&config.host, &config.api_key)?;

    let now = chrono::Local::now().naive_local();
    match flow::run(&mut client, &config.credentials, now) {
        Ok(outcome) => {
            tracing::info!(tender_id = %outcome.tender_id, "run complete");
            Ok(())
        }
        Err(err) => {
            ui::report_failure(&err);
            tracing::error!(stage = err.stage(), code = err.exit_code(), "run aborted");
            std::process::exit(err.exit_code());
        }
    }
}
