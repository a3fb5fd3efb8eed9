//! Error type shared by the loader, collector and configuration layers.
//!
//! The ranking core never fails: unparseable dates resolve to `None` and
//! unknown sources pass through. Everything that touches the filesystem or
//! the network reports a [`FeedError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid source catalog: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
