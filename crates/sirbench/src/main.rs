//! sirbench: parallel SIR Monte Carlo benchmark.

use sirbench_cli::CLIResultPresenter;
use sirbench_lib::{app, config, errors};
use sirbench_orchestration::interfaces::ResultPresenter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = config::AppConfig::parse();
    if let Err(err) = app::run(&config) {
        CLIResultPresenter::new(config.verbose, config.quiet).present_error(&format!("{err:#}"));
        std::process::exit(errors::exit_code(&err));
    }
}
