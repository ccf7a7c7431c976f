use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response error:\nStatusCode: {0}\nText: {1}")]
    Response(reqwest::StatusCode, String),

    #[error("Failed to deserialize response: {0}")]
    Deserialize(String),

    #[error("Couldn't convert query to string: {0}")]
    Query(#[from] serde_qs::Error),

    #[error("Environment variable not found: {0}")]
    EnvVar(#[from] env::VarError),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Sale event is missing field: {0}")]
    MissingField(&'static str),
}
