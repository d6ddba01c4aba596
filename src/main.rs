use std::fs::File;
use std::process::ExitCode;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use kaiwa::core::config;
use kaiwa::tui;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize file logger - writes to kaiwa.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("kaiwa.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    // Build the configuration before touching the terminal: a missing
    // credential must abort with a readable message, not a garbled screen.
    let resolved = match config::load_config().and_then(|cfg| config::resolve(&cfg)) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("kaiwa: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Kaiwa starting up with model: {}", resolved.model_name);

    match tui::run(&resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kaiwa: terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
