/// Typed boundary over the studio service
///
/// This module covers everything that crosses the network:
/// - Endpoint client for templates, albums and orders (client.rs)
/// - Submission payload assembly (payload.rs)
/// - Image fetching with an on-disk thumbnail cache (images.rs)
///
/// Responses are parsed and validated here; nothing downstream touches an
/// unchecked field.

pub mod client;
pub mod images;
pub mod payload;

pub use client::StudioClient;

use thiserror::Error;

/// Everything that can go wrong talking to the service
#[derive(Debug, Error)]
pub enum Error {
    /// Network, timeout or non-2xx response
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response arrived but its shape is not what the service promises
    #[error("malformed response: {0}")]
    Parse(String),

    /// The service answered with a non-success status
    #[error("{0}")]
    Rejected(String),

    /// A selected id has no backing item in the current album
    #[error("selected image \"{id}\" is no longer in the album")]
    MissingItem { id: String },

    /// Too few images selected to place an order
    #[error("select at least {min} images to continue ({count} selected)")]
    TooFewImages { count: usize, min: usize },

    /// More images selected than the template accepts
    #[error("this template takes at most {max} images ({count} selected)")]
    TooManyImages { count: usize, max: usize },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
