//! Error types for the simulator

use thiserror::Error;

/// Result type alias using our SimulatorError
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Main error type for simulation and provider operations
#[derive(Error, Debug)]
pub enum SimulatorError {
    /// The price provider returned no bars for the symbol/range
    #[error("No price data found: {0}")]
    NoDataFound(String),

    /// A secondary provider (dividends, index) could not be reached or parsed
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Request rejected before any calculation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SimulatorError {
    /// Whether this error aborts a calculation when it comes from the
    /// primary price series.
    ///
    /// Provider and input errors are absorbed elsewhere: a dividend or index
    /// failure degrades a single field, and invalid input produces no result.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SimulatorError::ProviderUnavailable(_) | SimulatorError::InvalidInput(_)
        )
    }

    /// Short message suitable for the result panel.
    pub fn user_message(&self) -> String {
        match self {
            SimulatorError::NoDataFound(_) => "No price data found".to_string(),
            SimulatorError::Timeout(_) => "the price service did not respond in time".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(SimulatorError::NoDataFound("INFY.NS".into()).is_fatal());
        assert!(SimulatorError::Timeout("price".into()).is_fatal());
        assert!(!SimulatorError::ProviderUnavailable("fmp".into()).is_fatal());
        assert!(!SimulatorError::InvalidInput("quantity".into()).is_fatal());
    }

    #[test]
    fn test_user_message() {
        let err = SimulatorError::NoDataFound("XYZ.NS between 2020-01-01 and 2020-02-01".into());
        assert_eq!(err.user_message(), "No price data found");
    }
}
