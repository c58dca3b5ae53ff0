use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RetrievalResult;
use crate::models::{CollectionInfo, Record, SearchQuery, SearchResult, VectorConfig};

/// Repository trait for vector storage operations
///
/// This trait abstracts the underlying vector database (Qdrant).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create a new collection with the given configuration
    ///
    /// No existence pre-check: creating a name twice surfaces the store's
    /// duplicate-collection error.
    async fn create_collection(
        &self,
        name: &str,
        config: VectorConfig,
    ) -> RetrievalResult<CollectionInfo>;

    /// Get collection info; fails if the collection does not exist
    async fn get_collection(&self, name: &str) -> RetrievalResult<CollectionInfo>;

    /// Write a single record
    async fn upsert(&self, collection_name: &str, record: Record) -> RetrievalResult<Uuid>;

    /// Search for similar vectors, ordered by descending score
    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> RetrievalResult<Vec<SearchResult>>;
}
