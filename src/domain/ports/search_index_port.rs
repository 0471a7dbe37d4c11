//! Remote beer search index port.

use async_trait::async_trait;

use crate::domain::entities::IndexedBeer;
use crate::domain::errors::DataError;

/// Port for the hosted full-text beer index.
#[async_trait]
pub trait SearchIndexPort: Send + Sync {
    /// Runs `query` against the index. Documents may be missing fields.
    async fn search(&self, query: &str) -> Result<Vec<IndexedBeer>, DataError>;
}
