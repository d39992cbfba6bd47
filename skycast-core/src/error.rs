use thiserror::Error;

/// Failures a resolution sequence can end in.
///
/// Queries shorter than the minimum length are a guard in the controller,
/// not an error.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Geocoding returned no match for the query.
    #[error("no location found for {0:?}")]
    NotFound(String),

    /// Transport-level failure from either endpoint.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed {endpoint} response: {detail}")]
    Malformed {
        endpoint: &'static str,
        detail: String,
    },
}
