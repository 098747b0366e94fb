use thiserror::Error;

/// Errors that can occur while browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// A precondition was violated (zero servings, negative count, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation referenced an id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote recipe catalog could not be reached or answered with an error
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Durable storage could not be read or written
    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors raised by a [`RecipeTransport`](crate::transport::RecipeTransport)
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to send the request or decode the response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status code
    #[error("Unexpected status code: {0}")]
    Status(u16),

    /// The catalog answered with an error payload
    #[error("Catalog error: {0}")]
    Api(String),
}

/// Errors raised by a [`LikesStore`](crate::likes::LikesStore)
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
