//! Text Sanitizer: normalizes raw model output before keyword matching.

use crate::keywords::SentinelSet;

/// Lower-case `raw`, strip every sentinel occurrence, then trim.
///
/// Stripping repeats until no sentinel is left, so `sanitize` is idempotent
/// even when removing one marker joins the halves of another.
pub fn sanitize(raw: &str, sentinels: &SentinelSet) -> String {
    let mut text = raw.to_lowercase();

    loop {
        let before = text.len();
        for sentinel in sentinels.iter() {
            if text.contains(sentinel) {
                text = text.replace(sentinel, "");
            }
        }
        if text.len() == before {
            break;
        }
    }

    text.trim().to_string()
}
