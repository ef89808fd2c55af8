//! CLI entry point for themeup.

mod cli;

use clap::Parser;
use std::path::PathBuf;
use themeup::commands::{add, list};
use themeup::config::load_config;
use themeup::ui::Renderer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("THEMEUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(url) = &args.registry_url {
        config.registry.base_url = url.clone();
    }
    if args.no_color {
        config.display.color = false;
    }

    let renderer = Renderer::new(config.display.color);

    let result = match &args.command {
        cli::Command::Add {
            theme,
            yes,
            project_dir,
        } => {
            let root = match project_dir {
                Some(dir) => PathBuf::from(dir),
                None => match std::env::current_dir() {
                    Ok(dir) => dir,
                    Err(e) => {
                        renderer.error(&format!("cannot resolve current directory: {e}"));
                        std::process::exit(1);
                    }
                },
            };
            add::run(
                &config,
                &renderer,
                &root,
                theme,
                &add::AddOptions { yes: *yes },
            )
            .await
        }
        cli::Command::List => list::run(&config, &renderer).await,
    };

    if let Err(e) = result {
        renderer.error(&e.to_string());
        std::process::exit(1);
    }
}
