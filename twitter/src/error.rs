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

    #[error("Environment variable not found: {0}")]
    EnvVar(#[from] env::VarError),
}
