//! One-shot lazy extractor handle.
//!
//! Expensive collaborators (a model loaded into memory, an authenticated client)
//! are built on first use. Concurrent first callers await the same
//! initialization; a failed initialization is reported to the caller and
//! attempted again on the next call.

use std::future::Future;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::extractor::{ExtractionError, TextExtractor};

pub struct LazyExtractor<E, F> {
    name: String,
    cell: OnceCell<E>,
    loader: F,
}

impl<E, F, Fut> LazyExtractor<E, F>
where
    E: TextExtractor + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<E, ExtractionError>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, loader: F) -> Self {
        Self {
            name: name.into(),
            cell: OnceCell::new(),
            loader,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// The loaded extractor, initializing it if needed.
    pub async fn get(&self) -> Result<&E, ExtractionError> {
        self.cell
            .get_or_try_init(|| async {
                info!(extractor = %self.name, "Loading text extractor");
                let loaded = (self.loader)().await;
                match &loaded {
                    Ok(_) => info!(extractor = %self.name, "Text extractor ready"),
                    Err(e) => warn!(extractor = %self.name, error = %e, "Text extractor failed to load"),
                }
                loaded
            })
            .await
    }
}

#[async_trait]
impl<E, F, Fut> TextExtractor for LazyExtractor<E, F>
where
    E: TextExtractor + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<E, ExtractionError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let inner = self.get().await?;
        inner.extract(image).await
    }
}
