use crate::schema::{AssetDetail, EventType, EventsResponse, SaleEvent};
use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::env;
use std::time::Duration;

const BASE_URL: &str = "https://api.opensea.io";
// The API itself enforces no deadline, so the client does.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct EventsQuery<'a> {
    collection_slug: &'a str,
    event_type: EventType,
    occurred_after: i64,
    only_opensea: bool,
}

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        log::debug!("GET {path}");

        let response = self
            .client
            .get(format!("{BASE_URL}{path}"))
            .header("X-API-KEY", env::var("OPENSEA_API_KEY")?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Response(status, response.text().await?));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|_| Error::Deserialize(text))
    }

    /// Fetches successful-sale events for one collection created at or after
    /// `occurred_after` (epoch seconds), across all venues.
    pub async fn fetch_events(
        &self,
        collection_slug: &str,
        occurred_after: i64,
    ) -> Result<Vec<SaleEvent>> {
        let query = serde_qs::to_string(&EventsQuery {
            collection_slug,
            event_type: EventType::Successful,
            occurred_after,
            only_opensea: false,
        })?;

        let response: EventsResponse = self.get(&format!("/api/v1/events?{query}")).await?;
        Ok(response.asset_events)
    }

    /// Fetches per-asset metadata, including the trait list.
    pub async fn fetch_asset(&self, address: &str, token_id: &str) -> Result<AssetDetail> {
        self.get(&format!("/api/v1/asset/{address}/{token_id}")).await
    }
}
