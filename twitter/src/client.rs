use crate::{Error, Result};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;

const BASE_URL: &str = "https://api.twitter.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize, Debug)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

#[derive(Deserialize)]
struct TweetResponse {
    data: Tweet,
}

#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    /// Posts `text` as a new status. Length and content constraints are left
    /// to the platform; any rejection comes back as [`Error::Response`].
    pub async fn post_tweet(&self, text: &str) -> Result<Tweet> {
        let response = self
            .client
            .post(format!("{BASE_URL}/2/tweets"))
            .bearer_auth(env::var("TWITTER_BEARER_TOKEN")?)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Response(status, response.text().await?));
        }

        parse_tweet(&response.text().await?)
    }
}

fn parse_tweet(text: &str) -> Result<Tweet> {
    let parsed: TweetResponse =
        serde_json::from_str(text).map_err(|_| Error::Deserialize(text.to_string()))?;
    Ok(parsed.data)
}
