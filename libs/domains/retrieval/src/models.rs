use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default minimum similarity score for ad-hoc searches
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.6;

/// Default maximum number of matches for ad-hoc searches
pub const DEFAULT_TOP_K: u32 = 5;

/// Maximum matches per category during entity extraction
pub const EXTRACTION_TOP_K: u32 = 3;

/// Distance metric for similarity calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    DotProduct,
    Manhattan,
}

/// Vector collection configuration
///
/// Defaults match the schema-retrieval pipeline: 1536-dimensional
/// embeddings compared with cosine similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorConfig {
    pub dimension: u32,
    pub distance: DistanceMetric,
}

impl VectorConfig {
    pub fn new(dimension: u32) -> Self {
        Self {
            dimension,
            distance: DistanceMetric::default(),
        }
    }

    pub fn with_distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self::new(EmbeddingModel::default().dimension())
    }
}

/// Collection information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub points_count: u64,
    pub config: VectorConfig,
    pub status: CollectionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionStatus {
    Green,
    Yellow,
    Grey,
}

impl CollectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::Green => "green",
            CollectionStatus::Yellow => "yellow",
            CollectionStatus::Grey => "grey",
        }
    }
}

/// A stored point: embedding vector plus schema metadata
///
/// Metadata is an open string-keyed mapping. By convention every record
/// populates exactly one of `table_name`/`column_name`/`value` (a table
/// record leaves `column_name` and `value` empty, and so on); the search
/// filters in [`SearchCategory`] rely on that shape. The adapter does not
/// validate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub metadata: serde_json::Value,
}

impl Record {
    pub fn new(id: Uuid, vector: Vec<f32>, metadata: serde_json::Value) -> Self {
        Self {
            id,
            vector,
            metadata,
        }
    }
}

/// Which metadata field a search should match on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    TableName,
    ColumnName,
    Value,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 3] = [
        SearchCategory::TableName,
        SearchCategory::ColumnName,
        SearchCategory::Value,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::TableName => "table_name",
            SearchCategory::ColumnName => "column_name",
            SearchCategory::Value => "value",
        }
    }

    /// Score threshold used for this category during entity extraction
    ///
    /// Table and column matches are fuzzy (entity tokens rarely spell a
    /// schema name exactly), value matches must be near-exact.
    pub fn extraction_threshold(&self) -> f32 {
        match self {
            SearchCategory::TableName => 0.2,
            SearchCategory::ColumnName => 0.2,
            SearchCategory::Value => 0.8,
        }
    }
}

/// Search query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub vector: Vec<f32>,
    pub limit: u32,
    pub score_threshold: Option<f32>,
    pub category: Option<SearchCategory>,
    pub with_payload: bool,
}

impl SearchQuery {
    pub fn new(vector: Vec<f32>, limit: u32) -> Self {
        Self {
            vector,
            limit,
            score_threshold: None,
            category: None,
            with_payload: true,
        }
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }

    pub fn with_category(mut self, category: Option<SearchCategory>) -> Self {
        self.category = category;
        self
    }
}

/// A single match, projected onto the schema-retrieval fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub table_name: Option<String>,
    pub column_name: Option<String>,
    pub value: Option<String>,
    pub score: f32,
}

impl SearchResult {
    /// Build a result from a match payload and score
    ///
    /// Missing payload fields become `None`; empty strings are normalized
    /// to `None` as well, since unused fields are stored as `""`.
    pub fn from_payload(payload: &serde_json::Value, score: f32) -> Self {
        Self {
            table_name: payload_field(payload, "table_name"),
            column_name: payload_field(payload, "column_name"),
            value: payload_field(payload, "value"),
            score,
        }
    }
}

fn payload_field(payload: &serde_json::Value, key: &str) -> Option<String> {
    match payload.get(key) {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// The three concatenated result sequences of an entity extraction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchObjects {
    pub tables: Vec<SearchResult>,
    pub columns: Vec<SearchResult>,
    pub values: Vec<SearchResult>,
}

/// Embedding model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingModel {
    /// OpenAI text-embedding-3-small (1536 dimensions)
    #[default]
    TextEmbedding3Small,
    /// OpenAI text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// OpenAI text-embedding-ada-002 (1536 dimensions, legacy)
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
        }
    }

    pub fn model_name(&self) -> &str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }
}

/// Embedding result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config_matches_embedding_model() {
        let config = VectorConfig::default();
        assert_eq!(config.dimension, 1536);
        assert_eq!(config.distance, DistanceMetric::Cosine);
    }

    #[test]
    fn test_search_result_from_full_payload() {
        let payload = json!({
            "table_name": "users",
            "column_name": "",
            "value": ""
        });

        let result = SearchResult::from_payload(&payload, 0.93);

        assert_eq!(result.table_name.as_deref(), Some("users"));
        assert_eq!(result.column_name, None);
        assert_eq!(result.value, None);
        assert_eq!(result.score, 0.93);
    }

    #[test]
    fn test_search_result_tolerates_missing_fields() {
        let payload = json!({ "value": "alice@example.com" });

        let result = SearchResult::from_payload(&payload, 0.81);

        assert_eq!(result.table_name, None);
        assert_eq!(result.column_name, None);
        assert_eq!(result.value.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_search_result_ignores_non_string_fields() {
        let payload = json!({ "table_name": 42 });

        let result = SearchResult::from_payload(&payload, 0.5);

        assert_eq!(result.table_name, None);
    }

    #[test]
    fn test_extraction_thresholds() {
        assert_eq!(SearchCategory::TableName.extraction_threshold(), 0.2);
        assert_eq!(SearchCategory::ColumnName.extraction_threshold(), 0.2);
        assert_eq!(SearchCategory::Value.extraction_threshold(), 0.8);
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(DEFAULT_SCORE_THRESHOLD, 0.6);
        assert_eq!(DEFAULT_TOP_K, 5);
        assert_eq!(EXTRACTION_TOP_K, 3);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SearchCategory::TableName).unwrap(),
            "\"table_name\""
        );
        assert_eq!(SearchCategory::ColumnName.as_str(), "column_name");
    }
}
