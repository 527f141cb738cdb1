use thiserror::Error;

/// Failures of a single dashboard search.
///
/// The `Display` text is what ends up in front of the user, so keep it short.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The city field was empty or whitespace-only; no request was sent.
    #[error("Please enter a city name")]
    MalformedInput,

    /// The provider answered with a non-success status.
    #[error("{message}")]
    NotFound {
        message: &'static str,
        status: reqwest::StatusCode,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("Unexpected response from weather provider: {0}")]
    Parse(#[source] serde_json::Error),
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound { .. })
    }
}
