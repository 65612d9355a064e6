//! Keyword Set and Sentinel Set.
//!
//! Both are validated once at construction and are read-only afterwards.

use std::collections::HashSet;

use thiserror::Error;

/// The 32 terms used to recognise marks cards, certificates and ID cards.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "grade", "marks", "certificate", "university", "college",
    "board", "percentage", "subject", "credits", "sgpa",
    "cgpa", "register", "usn", "student", "id card", "exam",
    "semester", "marksheet", "degree", "diploma", "transcript",
    "academic", "institute", "education", "result", "score",
    "pass", "fail", "division", "class", "roll", "admission",
];

/// Start-of-sequence, end-of-sequence and padding markers of Donut-style models.
pub const DEFAULT_SENTINELS: &[&str] = &["<s_cord-v2>", "</s>", "<pad>"];

/// Why a keyword list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeywordSetError {
    #[error("keyword set is empty")]
    Empty,

    #[error("keyword #{index} is blank")]
    Blank { index: usize },

    #[error("keyword '{keyword}' is not lowercase")]
    NotLowercase { keyword: String },

    #[error("keyword '{keyword}' has leading or trailing whitespace")]
    Untrimmed { keyword: String },

    #[error("keyword '{keyword}' appears more than once")]
    Duplicate { keyword: String },
}

/// Why a sentinel list was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SentinelError {
    #[error("sentinel #{index} is empty")]
    Empty { index: usize },
}

/// Ordered, duplicate-free list of lowercase keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Validate and build a keyword set. Order is preserved.
    pub fn new<I, S>(keywords: I) -> Result<Self, KeywordSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if keywords.is_empty() {
            return Err(KeywordSetError::Empty);
        }

        let mut seen = HashSet::with_capacity(keywords.len());
        for (index, keyword) in keywords.iter().enumerate() {
            if keyword.trim().is_empty() {
                return Err(KeywordSetError::Blank { index });
            }
            if keyword.trim() != keyword {
                return Err(KeywordSetError::Untrimmed { keyword: keyword.clone() });
            }
            if keyword.to_lowercase() != *keyword {
                return Err(KeywordSetError::NotLowercase { keyword: keyword.clone() });
            }
            if !seen.insert(keyword.as_str()) {
                return Err(KeywordSetError::Duplicate { keyword: keyword.clone() });
            }
        }

        Ok(Self { keywords })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Always false for a constructed set; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Model-specific marker substrings stripped from generated text.
///
/// Entries are stored lower-cased so they line up with lower-cased text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSet {
    sentinels: Vec<String>,
}

impl SentinelSet {
    /// Build a sentinel set. Duplicates (after lower-casing) collapse to one entry.
    pub fn new<I, S>(sentinels: I) -> Result<Self, SentinelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for (index, sentinel) in sentinels.into_iter().enumerate() {
            let sentinel = sentinel.into().to_lowercase();
            if sentinel.is_empty() {
                return Err(SentinelError::Empty { index });
            }
            if !out.contains(&sentinel) {
                out.push(sentinel);
            }
        }
        Ok(Self { sentinels: out })
    }

    /// A set that strips nothing.
    pub fn none() -> Self {
        Self { sentinels: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.sentinels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentinels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sentinels.iter().map(String::as_str)
    }
}

impl Default for SentinelSet {
    fn default() -> Self {
        Self {
            sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A keyword and sentinel that share text, either way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub keyword: String,
    pub sentinel: String,
}

/// Find keywords contained in a sentinel, or sentinels contained in a keyword.
///
/// Either case means sanitizing changes which keywords can match.
pub fn find_overlaps(keywords: &KeywordSet, sentinels: &SentinelSet) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for keyword in keywords.iter() {
        for sentinel in sentinels.iter() {
            if sentinel.contains(keyword) || keyword.contains(sentinel) {
                overlaps.push(Overlap {
                    keyword: keyword.to_string(),
                    sentinel: sentinel.to_string(),
                });
            }
        }
    }
    overlaps
}
