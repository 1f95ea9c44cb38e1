//! `confectionery` binary: diagnostics console over the order book's data
//! file.
//!
//! Usage: `confectionery [summary|clients|desserts|orders|clear] [config.toml]`

use std::process::ExitCode;

use confectionery_app::{config, init_tracing, open_store, run_command, AppError, Command};

fn resolve_config_path(arg: Option<String>) -> (Option<String>, &'static str) {
    if let Some(path) = arg.filter(|value| !value.trim().is_empty()) {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("CONFECTIONERY_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let command: Command = args.next().as_deref().unwrap_or("summary").parse()?;

    let (resolved_config_path, config_source) = resolve_config_path(args.next());
    let selected_config_path = resolved_config_path.as_deref().unwrap_or("config.toml");

    let (config, loaded_from) = config::load_config(Some(selected_config_path))?;
    init_tracing(&config.logging);

    tracing::info!(
        source = config_source,
        path = selected_config_path,
        "resolved startup configuration path"
    );
    if loaded_from == config::ConfigSource::Defaults {
        tracing::info!(
            path = selected_config_path,
            "config file not found, using defaults"
        );
    }

    let store = open_store(&config.database)?;

    let stdout = std::io::stdout();
    run_command(&store, command, &mut stdout.lock())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "confectionery failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
