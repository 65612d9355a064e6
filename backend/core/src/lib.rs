//! `docgate-core`: keyword-based academic document classification.
//!
//! Pure functions over already-extracted text: sanitize model output, count
//! keyword matches, and build a [`ClassificationVerdict`].

pub mod classifier;
pub mod error;
pub mod keywords;
pub mod sanitize;
pub mod verdict;

pub use classifier::{
    classify_text, KeywordClassifier, ACADEMIC_THRESHOLD, MAX_TEXT_CHARS, REASON_KEYWORD_LIMIT,
};
pub use error::DocgateError;
pub use keywords::{
    find_overlaps, KeywordSet, KeywordSetError, Overlap, SentinelError, SentinelSet,
    DEFAULT_KEYWORDS, DEFAULT_SENTINELS,
};
pub use sanitize::sanitize;
pub use verdict::{ClassificationVerdict, REJECTION_REASON};
