use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use fa_core::{Error, Result};

pub mod ticker_news;

pub use ticker_news::TickerNewsSearch;

#[async_trait]
pub trait Tool: Send + Sync + std::fmt::Debug {
    /// Identifier used to wire tools to agents in configuration
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run the tool against the crew inputs
    async fn run(&self, inputs: &HashMap<String, String>) -> Result<String>;
}

/// Look up a tool by its configuration name.
pub fn create_tool(name: &str) -> Result<Arc<dyn Tool>> {
    match name {
        "ticker_news_search" => Ok(Arc::new(TickerNewsSearch)),
        other => Err(Error::Config(format!("unknown tool: {other}"))),
    }
}
