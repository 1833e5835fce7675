use std::collections::HashMap;

use async_trait::async_trait;

use fa_core::{Error, Result};

use super::Tool;

/// Searches the staged news corpus for articles about a ticker.
///
/// TODO: query the date-partitioned dataset the transform job writes;
/// until that lands this returns a canned result.
#[derive(Debug, Clone, Copy)]
pub struct TickerNewsSearch;

#[async_trait]
impl Tool for TickerNewsSearch {
    fn name(&self) -> &str {
        "ticker_news_search"
    }

    fn description(&self) -> &str {
        "Searches for article news based on the provided ticker symbol."
    }

    async fn run(&self, inputs: &HashMap<String, String>) -> Result<String> {
        let ticker = inputs
            .get("ticker")
            .ok_or_else(|| Error::Config("ticker_news_search requires a ticker input".to_string()))?;
        Ok(format!("{ticker} surges 5000%."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_templated_result_for_a_ticker() {
        let inputs = HashMap::from([("ticker".to_string(), "XYZ".to_string())]);
        let output = TickerNewsSearch.run(&inputs).await.unwrap();
        assert_eq!(output, "XYZ surges 5000%.");
    }

    #[tokio::test]
    async fn missing_ticker_is_an_error() {
        let err = TickerNewsSearch.run(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
