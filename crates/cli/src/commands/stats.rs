//! Stats command handler.
//!
//! Displays collection statistics from the server.

use clap::Args;
use vectorgo_api::ApiClient;
use vectorgo_core::{AppConfig, AppResult};

/// Show collection statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// List per-file chunk counts
    #[arg(short, long)]
    pub detailed: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        let stats = client.stats().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
            return Ok(());
        }

        println!(
            "{} chunks across {} files",
            stats.total_chunks, stats.total_files
        );

        if self.detailed {
            for file in &stats.files {
                let count = stats.file_chunk_counts.get(file).copied().unwrap_or(0);
                println!("  {}: {} chunks", file, count);
            }
        }

        Ok(())
    }
}
