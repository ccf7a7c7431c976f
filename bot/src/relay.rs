use crate::config::Config;
use crate::watermark::{SledStore, WatermarkStore};
use anyhow::Result;
use log::{debug, error, info};
use opensea::{AssetDetail, HttpClient, SaleEvent, SaleFilter, SaleSubject};
use time::OffsetDateTime;
use tokio::sync::Mutex;

const ETHER_SYMBOL: char = '\u{39e}'; // Ξ

/// Supplies sale events and per-asset detail for one tick.
///
/// Injected like the watermark store so tests can run ticks against canned
/// responses and failures instead of the live API.
pub(crate) trait EventsSource {
    async fn fetch_events(
        &self,
        collection_slug: &str,
        occurred_after: i64,
    ) -> opensea::Result<Vec<SaleEvent>>;

    async fn fetch_asset(&self, address: &str, token_id: &str) -> opensea::Result<AssetDetail>;
}

impl EventsSource for HttpClient {
    async fn fetch_events(
        &self,
        collection_slug: &str,
        occurred_after: i64,
    ) -> opensea::Result<Vec<SaleEvent>> {
        HttpClient::fetch_events(self, collection_slug, occurred_after).await
    }

    async fn fetch_asset(&self, address: &str, token_id: &str) -> opensea::Result<AssetDetail> {
        HttpClient::fetch_asset(self, address, token_id).await
    }
}

/// Sends each formatted sale notice to the social platform.
pub(crate) trait Publisher {
    async fn publish(&self, text: &str) -> Result<()>;
}

impl Publisher for twitter::Client {
    async fn publish(&self, text: &str) -> Result<()> {
        let tweet = self.post_tweet(text).await?;
        debug!("posted tweet {}", tweet.id);
        Ok(())
    }
}

/// The fetch, filter, compose, publish pipeline, run once per tick.
pub(crate) struct Relay<C, S, P> {
    source: C,
    store: S,
    publisher: P,
    config: Config,
    /// Held for the duration of a tick; a tick that cannot take it is
    /// skipped instead of running concurrently with the previous one.
    tick_lock: Mutex<()>,
}

impl Relay<HttpClient, SledStore, twitter::Client> {
    pub(crate) fn from_config(config: Config) -> Result<Self> {
        let store = SledStore::open(&config.watermark_path)?;
        Ok(Self::new(HttpClient::new()?, store, twitter::Client::new()?, config))
    }
}

impl<C: EventsSource, S: WatermarkStore, P: Publisher> Relay<C, S, P> {
    fn new(source: C, store: S, publisher: P, config: Config) -> Self {
        Self {
            source,
            store,
            publisher,
            config,
            tick_lock: Mutex::new(()),
        }
    }

    pub(crate) fn tick_lock(&self) -> &Mutex<()> {
        &self.tick_lock
    }

    /// One poll cycle. A fetch failure ends the cycle early with no
    /// notifications and no watermark movement.
    pub(crate) async fn poll(&self) -> Result<()> {
        let floor = self.query_floor()?;
        debug!("querying sales created after {floor}");

        let events = self
            .source
            .fetch_events(&self.config.collection_slug, floor)
            .await?;
        info!("{} sales since the last one", events.len());

        self.process_events(events).await;
        Ok(())
    }

    async fn process_events(&self, mut events: Vec<SaleEvent>) {
        events.sort_by_key(|event| event.created_date);

        for event in &events {
            // A bad event is logged and skipped; it never ends the tick.
            if let Err(e) = self.process_event(event).await {
                error!("failed to process sale event: {e:#}");
            }
        }
    }

    async fn process_event(&self, event: &SaleEvent) -> Result<()> {
        if !self.matches(event).await? {
            return Ok(());
        }

        let text = compose(event, &self.config.hashtags)?;
        info!("{text}");

        // The watermark tracks observed matches, not delivery: it advances
        // once the publish attempt has been made, successful or not.
        let published = self.publisher.publish(&text).await;
        self.advance_watermark(event.created_date.unix())?;
        published
    }

    async fn matches(&self, event: &SaleEvent) -> Result<bool> {
        match &self.config.filter {
            SaleFilter::Name(rule) => match event.subject().and_then(|subject| subject.name()) {
                Some(name) => Ok(rule.matches(name)),
                None => {
                    debug!("sale has no display name, skipping");
                    Ok(false)
                }
            },
            SaleFilter::Traits(first, second) => {
                let Some(SaleSubject::Asset(asset)) = event.subject() else {
                    debug!("sale has no single asset to inspect traits on, skipping");
                    return Ok(false);
                };

                let detail = self
                    .source
                    .fetch_asset(&asset.asset_contract.address, &asset.token_id)
                    .await?;
                let traits = detail.traits.as_deref().unwrap_or_default();

                Ok(first.matched_by(traits) && second.matched_by(traits))
            }
        }
    }

    fn query_floor(&self) -> Result<i64> {
        Ok(match self.store.get()? {
            Some(watermark) => watermark,
            None => OffsetDateTime::now_utc().unix_timestamp() - self.config.lookback_secs,
        })
    }

    fn advance_watermark(&self, timestamp: i64) -> Result<()> {
        if self.store.get()?.map_or(true, |current| timestamp > current) {
            self.store.set(timestamp)?;
        }
        Ok(())
    }
}

fn compose(event: &SaleEvent, hashtags: &str) -> opensea::Result<String> {
    let subject = event
        .subject()
        .ok_or(opensea::Error::MissingField("asset"))?;
    let name = subject
        .name()
        .ok_or(opensea::Error::MissingField("asset name"))?;
    let price = event.sale_price()?;

    Ok(format!(
        "{name} bought for {}{ETHER_SYMBOL} (${:.2}) {hashtags} {}",
        price.eth,
        price.usd,
        subject.permalink(),
    ))
}
