use std::sync::Arc;

use uuid::Uuid;

use crate::embedding::EmbeddingProvider;
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::{
    CollectionInfo, EmbeddingModel, Record, SearchCategory, SearchObjects, SearchQuery,
    SearchResult, VectorConfig, EXTRACTION_TOP_K,
};
use crate::repository::VectorRepository;

/// Retrieval service for the NL-to-SQL pipeline
///
/// Combines vector storage (Qdrant) with query embedding generation
/// (OpenAI) and reshapes matches into table/column/value results.
pub struct RetrievalService<R: VectorRepository> {
    repository: R,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    model: EmbeddingModel,
    collection_config: VectorConfig,
}

impl<R: VectorRepository> RetrievalService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            embedding_provider: None,
            model: EmbeddingModel::default(),
            collection_config: VectorConfig::default(),
        }
    }

    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    pub fn with_model(mut self, model: EmbeddingModel) -> Self {
        self.model = model;
        self.collection_config = VectorConfig::new(self.model.dimension());
        self
    }

    fn provider(&self) -> RetrievalResult<&Arc<dyn EmbeddingProvider>> {
        self.embedding_provider
            .as_ref()
            .ok_or_else(|| RetrievalError::Config("No embedding provider configured".to_string()))
    }

    // ===== Collection Management =====

    /// Create a collection with the service's vector configuration
    ///
    /// No existence pre-check: a duplicate name fails with the store's
    /// error, which is logged and propagated.
    pub async fn create_collection(&self, name: &str) -> RetrievalResult<CollectionInfo> {
        tracing::info!(collection = %name, "Creating collection");

        match self
            .repository
            .create_collection(name, self.collection_config.clone())
            .await
        {
            Ok(info) => {
                tracing::info!(collection = %name, "Collection created");
                Ok(info)
            }
            Err(e) => {
                tracing::error!(collection = %name, error = %e, "Failed to create collection");
                Err(e)
            }
        }
    }

    pub async fn get_collection(&self, name: &str) -> RetrievalResult<CollectionInfo> {
        self.repository.get_collection(name).await
    }

    // ===== Record Operations =====

    /// Store an embedding with its schema metadata
    ///
    /// A fresh identifier is generated on every call; logically identical
    /// content written twice yields two records.
    pub async fn upsert_record(
        &self,
        vector: Vec<f32>,
        metadata: serde_json::Value,
        collection_name: &str,
    ) -> RetrievalResult<Uuid> {
        let record = Record::new(Uuid::new_v4(), vector, metadata);

        self.repository.upsert(collection_name, record).await
    }

    // ===== Search =====

    /// Embed a query and search the collection for similar records
    ///
    /// `category` selects a server-side payload filter; `None` searches
    /// all records. Matches scoring below `score_threshold` are excluded
    /// by the store, and results come back in the store's descending-score
    /// order, capped at `top_k`.
    pub async fn search_embeddings(
        &self,
        query: &str,
        collection_name: &str,
        category: Option<SearchCategory>,
        score_threshold: f32,
        top_k: u32,
    ) -> RetrievalResult<Vec<SearchResult>> {
        let embedding = self.provider()?.embed(self.model, query).await?;

        let search_query = SearchQuery::new(embedding.values, top_k)
            .with_score_threshold(score_threshold)
            .with_category(category);

        self.repository.search(collection_name, search_query).await
    }

    /// Resolve entity strings against the schema collection
    ///
    /// Each entity is searched once per category, sequentially, with the
    /// category's extraction threshold and a cap of [`EXTRACTION_TOP_K`]
    /// matches: 3 x N round-trips for N entities. Per-entity results are
    /// concatenated in call order without deduplication. The first failed
    /// search aborts the whole extraction.
    pub async fn extract_search_objects(
        &self,
        entities: &[String],
        collection_name: &str,
    ) -> RetrievalResult<SearchObjects> {
        let mut objects = SearchObjects::default();

        for entity in entities {
            for category in SearchCategory::ALL {
                let results = self
                    .search_embeddings(
                        entity,
                        collection_name,
                        Some(category),
                        category.extraction_threshold(),
                        EXTRACTION_TOP_K,
                    )
                    .await?;

                match category {
                    SearchCategory::TableName => objects.tables.extend(results),
                    SearchCategory::ColumnName => objects.columns.extend(results),
                    SearchCategory::Value => objects.values.extend(results),
                }
            }
        }

        Ok(objects)
    }
}
