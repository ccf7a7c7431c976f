//! This library provides functionality for interacting with the OpenSea v1 API.
//! It covers the sales-event and asset-detail endpoints, the wire schema for
//! sale events, price conversion from raw token units, and sale filtering.
mod date;
mod error;
mod filter;
mod http;
mod price;
mod schema;

pub use date::DateTime;
pub use error::Error;
pub use filter::{NameRule, SaleFilter, TraitRule};
pub use http::HttpClient;
pub use price::SalePrice;
pub use schema::{
    Asset, AssetBundle, AssetContract, AssetDetail, PaymentToken, SaleEvent, SaleSubject, Trait,
};

pub type Result<T> = std::result::Result<T, Error>;
