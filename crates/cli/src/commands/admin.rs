//! Collection administration command handlers: delete, reset, health.

use clap::Args;
use std::io::Write;
use vectorgo_api::ApiClient;
use vectorgo_core::{AppConfig, AppResult};

/// Delete one indexed file
#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// File name, as listed by `stats --detailed`
    pub file: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DeleteCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        let outcome = client.delete_file(&self.file).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}: {}", outcome.filename, outcome.status);
        }
        Ok(())
    }
}

/// Reset the whole collection
#[derive(Args, Debug)]
pub struct ResetCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ResetCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        if !self.yes && !confirm("Reset the collection and drop every indexed chunk?")? {
            println!("Aborted.");
            return Ok(());
        }

        let client = ApiClient::new(config);
        let outcome = client.reset_collection().await?;
        match outcome.collection {
            Some(collection) => println!("{} ({})", outcome.status, collection),
            None => println!("{}", outcome.status),
        }
        Ok(())
    }
}

/// Check service health
#[derive(Args, Debug)]
pub struct HealthCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HealthCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        let health = client.health().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&health)?);
        } else {
            println!("{} {} ({})", health.service, health.version, health.status);
        }
        Ok(())
    }
}

/// Ask a yes/no question on the terminal.
fn confirm(question: &str) -> AppResult<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
