use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, Condition, CreateCollectionBuilder, Distance, Filter, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{RetrievalError, RetrievalResult};
use crate::models::{
    CollectionInfo, CollectionStatus, DistanceMetric, Record, SearchCategory, SearchQuery,
    SearchResult, VectorConfig,
};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
///
/// Owns the single long-lived client handle; all four operations
/// (create, get, upsert, search) go through it.
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: QdrantConfig) -> RetrievalResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| RetrievalError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
            DistanceMetric::Manhattan => Distance::Manhattan,
        }
    }

    fn from_qdrant_distance(distance: Distance) -> DistanceMetric {
        match distance {
            Distance::Cosine => DistanceMetric::Cosine,
            Distance::Euclid => DistanceMetric::Euclidean,
            Distance::Dot => DistanceMetric::DotProduct,
            Distance::Manhattan => DistanceMetric::Manhattan,
            _ => DistanceMetric::Cosine,
        }
    }

    fn metadata_to_qdrant(metadata: serde_json::Value) -> HashMap<String, QdrantValue> {
        let mut result = HashMap::new();

        if let serde_json::Value::Object(map) = metadata {
            for (key, val) in map {
                if let Some(qdrant_val) = json_to_qdrant_value(val) {
                    result.insert(key, qdrant_val);
                }
            }
        }

        result
    }

    fn qdrant_to_metadata(payload: HashMap<String, QdrantValue>) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, val) in payload {
            if let Some(json_val) = qdrant_value_to_json(val) {
                map.insert(key, json_val);
            }
        }

        serde_json::Value::Object(map)
    }
}

fn json_to_qdrant_value(val: serde_json::Value) -> Option<QdrantValue> {
    match val {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(QdrantValue::from(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(QdrantValue::from(i))
            } else {
                n.as_f64().map(QdrantValue::from)
            }
        }
        serde_json::Value::String(s) => Some(QdrantValue::from(s)),
        _ => {
            // Nested structures are stored as their JSON text
            Some(QdrantValue::from(val.to_string()))
        }
    }
}

fn qdrant_value_to_json(val: QdrantValue) -> Option<serde_json::Value> {
    use qdrant::value::Kind;

    match val.kind {
        Some(Kind::NullValue(_)) => Some(serde_json::Value::Null),
        Some(Kind::BoolValue(b)) => Some(serde_json::Value::Bool(b)),
        Some(Kind::IntegerValue(i)) => Some(serde_json::Value::Number(i.into())),
        Some(Kind::DoubleValue(f)) => {
            serde_json::Number::from_f64(f).map(serde_json::Value::Number)
        }
        Some(Kind::StringValue(s)) => Some(serde_json::Value::String(s)),
        _ => None,
    }
}

/// Build the payload filter for a search category
///
/// Records populate exactly one of table_name/column_name/value, so
/// emptiness of the two narrower fields is enough to tell the categories
/// apart: a table record has column_name empty, a column record has
/// column_name set but value empty, a value record has value set.
fn category_filter(category: SearchCategory) -> Filter {
    match category {
        SearchCategory::TableName => Filter {
            must: vec![Condition::is_empty("column_name")],
            ..Default::default()
        },
        SearchCategory::ColumnName => Filter {
            must: vec![Condition::is_empty("value")],
            must_not: vec![Condition::is_empty("column_name")],
            ..Default::default()
        },
        SearchCategory::Value => Filter {
            must_not: vec![Condition::is_empty("value")],
            ..Default::default()
        },
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn create_collection(
        &self,
        name: &str,
        config: VectorConfig,
    ) -> RetrievalResult<CollectionInfo> {
        let builder = CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
            config.dimension as u64,
            Self::to_qdrant_distance(config.distance),
        ));

        self.client.create_collection(builder).await?;

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: 0,
            config,
            status: CollectionStatus::Green,
        })
    }

    async fn get_collection(&self, name: &str) -> RetrievalResult<CollectionInfo> {
        // Only a confirmed miss becomes CollectionNotFound; transport and
        // auth failures keep their Qdrant error identity.
        if !self.client.collection_exists(name).await? {
            return Err(RetrievalError::CollectionNotFound(name.to_string()));
        }

        let info = self.client.collection_info(name).await?;

        let result = info
            .result
            .ok_or_else(|| RetrievalError::Internal("Collection info missing result".to_string()))?;

        let (dimension, distance) = Self::extract_config_params(&result.config);

        let status = match result.status() {
            qdrant::CollectionStatus::Green => CollectionStatus::Green,
            qdrant::CollectionStatus::Yellow => CollectionStatus::Yellow,
            _ => CollectionStatus::Grey,
        };

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: result.points_count.unwrap_or(0),
            config: VectorConfig {
                dimension,
                distance,
            },
            status,
        })
    }

    async fn upsert(&self, collection_name: &str, record: Record) -> RetrievalResult<Uuid> {
        let id = record.id;

        let point = PointStruct::new(
            id.to_string(),
            record.vector,
            Self::metadata_to_qdrant(record.metadata),
        );

        let builder = UpsertPointsBuilder::new(collection_name, vec![point]);

        self.client.upsert_points(builder).await?;

        Ok(id)
    }

    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> RetrievalResult<Vec<SearchResult>> {
        let mut builder =
            SearchPointsBuilder::new(collection_name, query.vector, query.limit as u64);

        if let Some(threshold) = query.score_threshold {
            builder = builder.score_threshold(threshold);
        }

        if let Some(category) = query.category {
            builder = builder.filter(category_filter(category));
        }

        builder = builder.with_payload(query.with_payload);

        let results = self.client.search_points(builder).await?;

        Ok(results
            .result
            .into_iter()
            .map(|point| {
                let payload = Self::qdrant_to_metadata(point.payload);
                SearchResult::from_payload(&payload, point.score)
            })
            .collect())
    }
}

impl QdrantRepository {
    fn extract_config_params(config: &Option<qdrant::CollectionConfig>) -> (u32, DistanceMetric) {
        let params = config
            .as_ref()
            .and_then(|c| c.params.as_ref())
            .and_then(|p| p.vectors_config.as_ref())
            .and_then(|vc| vc.config.as_ref());

        match params {
            Some(qdrant::vectors_config::Config::Params(p)) => {
                (p.size as u32, Self::from_qdrant_distance(p.distance()))
            }
            Some(qdrant::vectors_config::Config::ParamsMap(map)) => {
                // Multi-vector collections: take the first vector config
                match map.map.iter().next() {
                    Some((_, p)) => (p.size as u32, Self::from_qdrant_distance(p.distance())),
                    None => (0, DistanceMetric::Cosine),
                }
            }
            None => (0, DistanceMetric::Cosine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn is_empty_key(condition: &Condition) -> Option<&str> {
        match &condition.condition_one_of {
            Some(qdrant::condition::ConditionOneOf::IsEmpty(c)) => Some(c.key.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_table_name_filter_requires_empty_column() {
        let filter = category_filter(SearchCategory::TableName);

        assert_eq!(filter.must.len(), 1);
        assert!(filter.must_not.is_empty());
        assert_eq!(is_empty_key(&filter.must[0]), Some("column_name"));
    }

    #[test]
    fn test_column_name_filter_requires_column_without_value() {
        let filter = category_filter(SearchCategory::ColumnName);

        assert_eq!(filter.must.len(), 1);
        assert_eq!(filter.must_not.len(), 1);
        assert_eq!(is_empty_key(&filter.must[0]), Some("value"));
        assert_eq!(is_empty_key(&filter.must_not[0]), Some("column_name"));
    }

    #[test]
    fn test_value_filter_requires_value_present() {
        let filter = category_filter(SearchCategory::Value);

        assert!(filter.must.is_empty());
        assert_eq!(filter.must_not.len(), 1);
        assert_eq!(is_empty_key(&filter.must_not[0]), Some("value"));
    }

    #[test]
    fn test_metadata_round_trip() {
        let metadata = json!({
            "table_name": "orders",
            "column_name": "",
            "priority": 3,
            "archived": false
        });

        let qdrant_payload = QdrantRepository::metadata_to_qdrant(metadata.clone());
        let back = QdrantRepository::qdrant_to_metadata(qdrant_payload);

        assert_eq!(back, metadata);
    }

    #[tokio::test]
    async fn test_get_collection_keeps_transport_error_identity() {
        // Nothing listens on port 1: the store is unreachable, which is
        // not the same thing as the collection being absent
        let config = QdrantConfig::new("http://localhost:1".to_string()).with_timeout(1);
        let repository = QdrantRepository::new(config).unwrap();

        let err = repository.get_collection("schema").await.unwrap_err();

        assert!(
            matches!(err, RetrievalError::Qdrant(_)),
            "unreachable store reported as {err}"
        );
    }

    #[test]
    fn test_metadata_drops_nulls() {
        let metadata = json!({ "table_name": "orders", "unused": null });

        let qdrant_payload = QdrantRepository::metadata_to_qdrant(metadata);

        assert!(qdrant_payload.contains_key("table_name"));
        assert!(!qdrant_payload.contains_key("unused"));
    }
}
