use homeinv_core::error::CoreError;

/// Errors surfaced by [`InventoryClient`](crate::client::InventoryClient) and the view-models.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A data call was attempted without a session.
    #[error("Not signed in")]
    NotSignedIn,

    /// Form input failed validation; no request was sent.
    #[error("{0}")]
    Validation(String),
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ClientError::Validation(msg),
            other => ClientError::Validation(other.to_string()),
        }
    }
}
