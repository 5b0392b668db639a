mod catalog;
mod cli;
mod config;
mod model;
mod storage;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use cli::App;
use config::Config;
use storage::Storage;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "JOBCARD_LOG";

fn main() {
    init_tracing();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    });

    let root = config.data_dir().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    let catalog = match Catalog::embedded() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load equipment catalog: {e}");
            process::exit(1);
        }
    };

    let app = App {
        config,
        storage,
        catalog,
    };

    if let Err(e) = cli::run(&app) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
