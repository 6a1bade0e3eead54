use std::path::PathBuf;

use crate::cli::commands::ValidateArgs;
use crate::config::{self, Overrides};
use crate::errors::PhishguardError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), PhishguardError> {
    let path = PathBuf::from(&args.config);
    let config = config::load_config(Some(&path), Overrides::default()).await?;

    println!("Configuration is valid: {}", args.config);
    println!("  bind:        {}:{}", config.host, config.port);
    println!("  model:       {}", config.model);
    println!(
        "  api key:     {}",
        if config.api_key.is_some() { "set" } else { "NOT SET" }
    );
    println!("  credentials: {}", config.credentials.display());
    println!("  collection:  {}", config.collection);
    Ok(())
}
