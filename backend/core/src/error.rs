use thiserror::Error;

use crate::keywords::{KeywordSetError, SentinelError};

/// Top-level error type for building a docgate classifier.
///
/// Classification itself never fails; these only surface while building
/// a classifier from configured keyword and sentinel lists.
#[derive(Debug, Error)]
pub enum DocgateError {
    #[error("invalid keyword set: {0}")]
    KeywordSet(#[from] KeywordSetError),

    #[error("invalid sentinel set: {0}")]
    Sentinels(#[from] SentinelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_construction_errors() {
        let err: DocgateError = KeywordSetError::Empty.into();
        assert_eq!(err.to_string(), "invalid keyword set: keyword set is empty");

        let err: DocgateError = SentinelError::Empty { index: 2 }.into();
        assert!(matches!(err, DocgateError::Sentinels(SentinelError::Empty { index: 2 })));
        assert_eq!(err.to_string(), "invalid sentinel set: sentinel #2 is empty");
    }
}
