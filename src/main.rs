//! `humanizer` 바이너리 진입점.

use std::io::{self, IsTerminal};

use humanizer::interface::cli::{AppComposition, Cli, CliAction, run_once, run_shell};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let action = match Cli::parse_action() {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(2);
        }
    };

    let interactive = io::stdin().is_terminal();

    match action {
        CliAction::InspectConfig => {
            let composition = AppComposition::new(interactive, false);
            match composition.inspect_config_usecase().execute() {
                Ok(json) => println!("{json}"),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
        CliAction::Interactive => {
            let composition = AppComposition::new(true, false);
            if let Err(err) = run_shell(&composition).await {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
        CliAction::Run(options) => {
            let composition = AppComposition::one_shot(interactive, options.json);
            match run_once(&composition, options).await {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(err) => {
                    eprintln!("error: {err:#}");
                    std::process::exit(1);
                }
            }
        }
    }
}
