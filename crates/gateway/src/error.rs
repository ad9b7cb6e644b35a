/// Fallback message shown when a catalog request fails without a status.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to load characters. Please try again.";

/// Errors from the catalog gateway layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Message suitable for showing in the results area.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Status { status, .. } => format!("API Error: {status}"),
            GatewayError::Request(_) | GatewayError::Decode(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
