//! `docgate-understanding`: getting text out of images for the classifier.
//!
//! Provides:
//! - the [`TextExtractor`] collaborator seam and its failure taxonomy
//! - [`LazyExtractor`], a one-shot lazily initialized collaborator handle
//! - [`CommandExtractor`], which pipes images through an external OCR program
//! - image payload decoding with a size guard
//! - [`ClassifyPipeline`], which turns any outcome into a verdict

pub mod command;
pub mod extractor;
pub mod lazy;
pub mod payload;
pub mod pipeline;

pub use command::CommandExtractor;
pub use extractor::{ExtractionError, FailingExtractor, StaticExtractor, TextExtractor};
pub use lazy::LazyExtractor;
pub use payload::{decode_payload, ImagePayload, PayloadError, DEFAULT_MAX_IMAGE_BYTES};
pub use pipeline::{ClassifyPipeline, DEFAULT_MIN_TEXT_CHARS, DEFAULT_TIMEOUT_SECS};
