// client.rs
use crate::api::models::ListingCollection;
use crate::api::FetchError;
use crate::domain::{Listing, ListingId};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The three read endpoints the page consumes. Calls block; the dispatcher
/// runs them off the UI thread.
pub trait ListingApi: Send + Sync {
    /// `GET /api/properties`
    fn fetch_all(&self) -> Result<Vec<Listing>, FetchError>;

    /// `GET /api/properties/search?{query}`. `query` is already encoded and
    /// may be empty.
    fn search(&self, query: &str) -> Result<Vec<Listing>, FetchError>;

    /// `GET /api/properties/{id}`
    fn fetch_one(&self, id: ListingId) -> Result<Listing, FetchError>;
}

pub struct HttpListingApi {
    client: Client,
    base_url: String,
}

impl HttpListingApi {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, FetchError> {
        // Requests are never timed out by the page; a hung backend leaves
        // the list in its loading state.
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| FetchError::Endpoint(format!("{base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, path: &str, query: Option<&str>) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| FetchError::Endpoint(e.to_string()))?;
        if let Some(query) = query {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "GET");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "backend rejected request");
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let text = resp
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&text).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl ListingApi for HttpListingApi {
    fn fetch_all(&self) -> Result<Vec<Listing>, FetchError> {
        let url = self.endpoint("/api/properties", None)?;
        let collection: ListingCollection = self.get_json(url)?;
        Ok(collection.into_listings())
    }

    fn search(&self, query: &str) -> Result<Vec<Listing>, FetchError> {
        let url = self.endpoint("/api/properties/search", Some(query))?;
        let collection: ListingCollection = self.get_json(url)?;
        Ok(collection.into_listings())
    }

    fn fetch_one(&self, id: ListingId) -> Result<Listing, FetchError> {
        let url = self.endpoint(&format!("/api/properties/{id}"), None)?;
        self.get_json(url)
    }
}
