use std::fmt;

use chrono::{Duration, Utc};
use serde::Deserialize;

use fa_core::{Error, Result};

pub const NEWS_API_BASE_URL: &str = "https://newsapi.org";

/// Keyword disjunction targeting financial and economic news.
pub const SEARCH_KEYWORDS: &str = "stock market OR earnings OR federal reserve OR inflation \
     OR interest rates OR quarterly results OR market forecast OR stock price";

const LOOKBACK_DAYS: i64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiArticle {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub source: ApiSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSource {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, NEWS_API_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Search the last five days of English-language news, sorted by
    /// relevance. Non-2xx responses are terminal.
    pub async fn fetch_articles(&self) -> Result<Vec<ApiArticle>> {
        let from = (Utc::now() - Duration::days(LOOKBACK_DAYS))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string();

        let response = self
            .http
            .get(format!("{}/v2/everything", self.base_url))
            .query(&[
                ("q", SEARCH_KEYWORDS),
                ("from", from.as_str()),
                ("sortBy", "relevancy"),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!(
                "search request failed with status {status}"
            )));
        }

        let body: EverythingResponse = response.json().await?;
        Ok(body.articles)
    }
}
