//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Install tweakcn themes into a Next.js project with automatic font setup.
#[derive(Debug, Parser)]
#[command(name = "themeup", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (default: ./themeup.toml or ~/.config/themeup/themeup.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the theme registry base URL.
    #[arg(long = "registry-url", global = true)]
    pub registry_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a theme and update the layout with its fonts.
    Add {
        /// Theme name from the registry.
        theme: String,

        /// Skip the confirmation prompt.
        #[arg(short = 'y', long = "yes")]
        yes: bool,

        /// Target project directory (default: current directory).
        #[arg(long = "project-dir")]
        project_dir: Option<String>,
    },

    /// List themes available in the registry.
    List,
}
