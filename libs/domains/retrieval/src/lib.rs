//! Retrieval Domain Library
//!
//! Thin adapter between the NL-to-SQL pipeline and its two external
//! collaborators: a Qdrant vector store holding schema embeddings
//! (tables, columns, values) and an embedding API for query vectors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ RetrievalService │  ← create/upsert/search, entity extraction
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐     ┌──────────────────┐
//! │ VectorRepository │     │ EmbeddingProvider│
//! │     (trait)      │     │     (trait)      │
//! └────────┬─────────┘     └────────┬─────────┘
//!          │                        │
//! ┌────────▼─────────┐     ┌────────▼─────────┐
//! │ QdrantRepository │     │  OpenAIProvider  │
//! │ (implementation) │     │ (implementation) │
//! └──────────────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_retrieval::{
//!     OpenAIProvider, QdrantConfig, QdrantRepository, RetrievalService, SearchCategory,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = QdrantRepository::new(QdrantConfig::from_env()?)?;
//! let provider = OpenAIProvider::from_env()?;
//!
//! let service = RetrievalService::new(repository)
//!     .with_embedding_provider(Arc::new(provider));
//!
//! service.create_collection("schema").await?;
//!
//! let tables = service
//!     .search_embeddings("users", "schema", Some(SearchCategory::TableName), 0.6, 5)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod error;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingProvider, OpenAIConfig, OpenAIProvider};
pub use error::{RetrievalError, RetrievalResult};
pub use models::{
    CollectionInfo, CollectionStatus, DistanceMetric, EmbeddingModel, EmbeddingResult, Record,
    SearchCategory, SearchObjects, SearchQuery, SearchResult, VectorConfig,
    DEFAULT_SCORE_THRESHOLD, DEFAULT_TOP_K, EXTRACTION_TOP_K,
};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::RetrievalService;
