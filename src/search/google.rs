use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use super::SearchClient;
use crate::error::{Error, Result};

/// Google Custom Search JSON API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Number of characters of an error body kept in error messages.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    snippet: Option<String>,
}

/// Blocking client for the Google Custom Search API.
pub struct GoogleSearchClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    search_engine_id: String,
}

impl GoogleSearchClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        search_engine_id: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hq-trivia-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            search_engine_id: search_engine_id.into(),
        })
    }
}

impl SearchClient for GoogleSearchClient {
    fn query(&self, text: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.search_engine_id.as_str()),
                ("q", text),
            ])
            .send()
            .map_err(|e| Error::SearchUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::SearchUnavailable(format!("Failed to read response body: {}", e)))?;

        check_status(status, &body)?;
        parse_snippets(&body)
    }
}

/// Maps a non-success HTTP status to `SearchUnavailable`, keeping the start
/// of the body for the log.
fn check_status(status: StatusCode, body: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
    Err(Error::SearchUnavailable(format!("HTTP {}: {}", status, preview)))
}

/// Extracts `items[].snippet` from a Custom Search response body.
///
/// Google omits `items` entirely when a query has no hits.
pub fn parse_snippets(body: &str) -> Result<Vec<String>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse(e.to_string()))?;

    let items = match response.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(Error::NoResults),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            item.snippet
                .ok_or_else(|| Error::MalformedResponse(format!("item {} has no snippet", idx)))
        })
        .collect()
}
