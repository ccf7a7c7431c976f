//! Minimal client for posting statuses through the Twitter v2 API.
mod client;
mod error;

pub use client::{Client, Tweet};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
