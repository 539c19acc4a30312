use serde::{Deserialize, Serialize};

/// Result of a single GET probe. Faults are values, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    StatusCode(u16),
    /// HTTP 404, or any response that declares a zero content length.
    NotFound,
    /// Connect, timeout, TLS or protocol error.
    TransportFailure,
}

impl Outcome {
    /// Maps a response status and declared length onto an outcome.
    pub fn from_response(status: u16, content_length: Option<u64>) -> Self {
        if content_length == Some(0) || status == 404 {
            Outcome::NotFound
        } else {
            Outcome::StatusCode(status)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::StatusCode(200))
    }
}

/// Result of a HEAD probe: the declared body length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadOutcome {
    ContentLength(u64),
    /// Request failed or no usable `Content-Length` header came back.
    TransportFailure,
}

impl HeadOutcome {
    pub fn exceeds(&self, threshold: u64) -> bool {
        matches!(self, HeadOutcome::ContentLength(n) if *n > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_is_soft_404() {
        assert_eq!(Outcome::from_response(200, Some(0)), Outcome::NotFound);
        assert_eq!(Outcome::from_response(500, Some(0)), Outcome::NotFound);
        assert_eq!(Outcome::from_response(404, Some(120)), Outcome::NotFound);
        assert_eq!(Outcome::from_response(200, None), Outcome::StatusCode(200));
        assert_eq!(Outcome::from_response(403, Some(12)), Outcome::StatusCode(403));
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(Outcome::StatusCode(200).is_ok());
        assert!(!Outcome::StatusCode(301).is_ok());
        assert!(!Outcome::NotFound.is_ok());
        assert!(!Outcome::TransportFailure.is_ok());
    }

    #[test]
    fn test_head_threshold_is_strict() {
        assert!(HeadOutcome::ContentLength(1001).exceeds(1000));
        assert!(!HeadOutcome::ContentLength(1000).exceeds(1000));
        assert!(!HeadOutcome::TransportFailure.exceeds(1000));
    }
}
