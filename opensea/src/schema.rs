use crate::date::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One successful-sale event from `/api/v1/events`.
///
/// Exactly one of `asset` and `asset_bundle` is populated depending on
/// whether a single item or a bundle was sold; [`SaleEvent::subject`] folds
/// the two into a [`SaleSubject`].
#[derive(Deserialize, Debug)]
pub struct SaleEvent {
    pub asset: Option<Asset>,
    pub asset_bundle: Option<AssetBundle>,
    pub total_price: Option<String>,
    pub payment_token: Option<PaymentToken>,
    pub created_date: DateTime,
}

#[derive(Deserialize, Debug)]
pub struct Asset {
    pub token_id: String,
    pub name: Option<String>,
    pub permalink: String,
    pub asset_contract: AssetContract,
}

#[derive(Deserialize, Debug)]
pub struct AssetContract {
    pub address: String,
}

#[derive(Deserialize, Debug)]
pub struct AssetBundle {
    pub name: Option<String>,
    pub permalink: String,
}

/// Prices come back as decimal strings; `decimals` scales `total_price`
/// down to whole tokens.
#[derive(Deserialize, Debug)]
pub struct PaymentToken {
    pub symbol: Option<String>,
    pub decimals: u32,
    pub usd_price: String,
    pub eth_price: String,
}

#[derive(Deserialize, Debug)]
pub struct EventsResponse {
    pub asset_events: Vec<SaleEvent>,
}

/// Per-asset detail from `/api/v1/asset/{address}/{token_id}`. Only the
/// trait list is of interest; assets with no metadata omit it entirely.
#[derive(Deserialize, Debug)]
pub struct AssetDetail {
    pub traits: Option<Vec<Trait>>,
}

#[derive(Deserialize, Debug)]
pub struct Trait {
    pub trait_type: String,
    pub value: Value,
}

impl Trait {
    /// Numeric trait values compare equal to their decimal rendering, so a
    /// rule like `Year=2011` matches both `"2011"` and `2011`.
    pub fn value_eq(&self, expected: &str) -> bool {
        match &self.value {
            Value::String(s) => s == expected,
            other => other.to_string() == expected,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Successful,
}

/// What was sold: a single asset or a bundle.
#[derive(Debug, Clone, Copy)]
pub enum SaleSubject<'a> {
    Asset(&'a Asset),
    Bundle(&'a AssetBundle),
}

impl SaleEvent {
    pub fn subject(&self) -> Option<SaleSubject<'_>> {
        self.asset
            .as_ref()
            .map(SaleSubject::Asset)
            .or_else(|| self.asset_bundle.as_ref().map(SaleSubject::Bundle))
    }
}

impl<'a> SaleSubject<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match self {
            SaleSubject::Asset(asset) => asset.name.as_deref(),
            SaleSubject::Bundle(bundle) => bundle.name.as_deref(),
        }
    }

    pub fn permalink(&self) -> &'a str {
        match self {
            SaleSubject::Asset(asset) => &asset.permalink,
            SaleSubject::Bundle(bundle) => &bundle.permalink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale_event(value: Value) -> SaleEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn deserializes_individual_sale() {
        let event = sale_event(json!({
            "asset": {
                "token_id": "42",
                "name": "Namecoin 2011 Genesis",
                "permalink": "https://opensea.io/assets/0xabc/42",
                "asset_contract": { "address": "0xabc" }
            },
            "total_price": "1500000000000000000",
            "payment_token": {
                "symbol": "ETH",
                "decimals": 18,
                "usd_price": "3000.00",
                "eth_price": "1.000000000000000000"
            },
            "created_date": "2021-09-20T04:06:23.919954"
        }));

        let subject = event.subject().unwrap();
        assert_eq!(subject.name(), Some("Namecoin 2011 Genesis"));
        assert_eq!(subject.permalink(), "https://opensea.io/assets/0xabc/42");
        assert_eq!(event.created_date.unix(), 1632110783);
    }

    #[test]
    fn bundle_sale_falls_back_to_bundle_fields() {
        let event = sale_event(json!({
            "asset_bundle": {
                "name": "Two early names",
                "permalink": "https://opensea.io/bundles/two-early-names"
            },
            "created_date": "2021-01-01T00:00:00.000000"
        }));

        let subject = event.subject().unwrap();
        assert!(matches!(subject, SaleSubject::Bundle(_)));
        assert_eq!(subject.name(), Some("Two early names"));
        assert_eq!(subject.permalink(), "https://opensea.io/bundles/two-early-names");
    }

    #[test]
    fn event_without_asset_or_bundle_has_no_subject() {
        let event = sale_event(json!({ "created_date": "2021-01-01T00:00:00.000000" }));
        assert!(event.subject().is_none());
    }

    #[test]
    fn trait_values_compare_across_json_types() {
        let year: Trait = serde_json::from_value(json!({"trait_type": "Year", "value": 2011})).unwrap();
        assert!(year.value_eq("2011"));
        assert!(!year.value_eq("2012"));

        let nmc: Trait =
            serde_json::from_value(json!({"trait_type": "NMC", "value": "Namecoin"})).unwrap();
        assert!(nmc.value_eq("Namecoin"));
    }
}
