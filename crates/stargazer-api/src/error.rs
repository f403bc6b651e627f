use thiserror::Error;

/// Everything that can go wrong while talking to GitHub
///
/// Kept deliberately coarse: callers only ever turn these into a message
/// for the user, so the variants mirror what is worth saying out loud.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Bad URL: {0}")]
    BadUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Bad status: {0}")]
    BadStatus(u16),

    #[error("Bad body: {0}")]
    BadBody(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_builder() {
            let url = err
                .url()
                .map(ToString::to_string)
                .unwrap_or_else(|| err.to_string());
            FetchError::BadUrl(url)
        } else if err.is_decode() {
            FetchError::BadBody(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::BadStatus(status.as_u16())
        } else {
            FetchError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::BadBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(FetchError::BadStatus(404).to_string(), "Bad status: 404");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::BadUrl("ht!tp://nope".into()).to_string(),
            "Bad URL: ht!tp://nope"
        );
    }

    #[test]
    fn test_decode_errors_keep_the_diagnostic() {
        let err = serde_json::from_str::<Vec<u32>>("{\"oops\": 1}").unwrap_err();
        let fetch_err = FetchError::from(err);

        match fetch_err {
            FetchError::BadBody(detail) => assert!(detail.contains("expected a sequence")),
            other => panic!("expected BadBody, got {:?}", other),
        }
    }
}
