//! Login and logout command handlers.

use clap::Args;
use vectorgo_api::ApiClient;
use vectorgo_core::{AppConfig, AppResult};

/// Log in and persist the session token
#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account name
    pub username: String,

    /// Account password
    #[arg(short, long, env = "VECTORGO_PASSWORD")]
    pub password: String,
}

impl LoginCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        client.login(&self.username, &self.password).await?;
        println!("Logged in as {}", self.username);
        Ok(())
    }
}

/// Drop the persisted session token
#[derive(Args, Debug)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let client = ApiClient::new(config);
        client.logout()?;
        println!("Logged out");
        Ok(())
    }
}
