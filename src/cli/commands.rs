use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "phishguard", version, about = "Phishing-page analysis relay")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Validate a configuration file and print the effective settings
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address (default 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (default 5000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gemini API key (or set GEMINI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Service-account key file for the report store
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Report collection name
    #[arg(long)]
    pub collection: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: String,
}
