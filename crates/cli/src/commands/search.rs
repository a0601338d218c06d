//! Search command handler.

use clap::Args;
use vectorgo_api::ApiClient;
use vectorgo_core::{AppConfig, AppResult};

/// Search indexed documents
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Query text
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        let results = client.search(&self.query).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
            return Ok(());
        }

        if results.is_empty() {
            println!("No matches.");
            return Ok(());
        }

        // Columnar response; row i of the first (only) query.
        let documents = results.documents.first();
        for (i, document) in documents.into_iter().flatten().enumerate() {
            match results.distances.first().and_then(|row| row.get(i)) {
                Some(distance) => {
                    println!("{:>2}. (distance {:.4}) {}", i + 1, distance, document)
                }
                None => println!("{:>2}. {}", i + 1, document),
            }
        }

        Ok(())
    }
}
