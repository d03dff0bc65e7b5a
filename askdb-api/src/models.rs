use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One user table with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<String>,
}

/// Introspected schema: tables in creation order.
pub type Schema = Vec<TableInfo>;

/// JSON shape for the schema: `{"table": ["col", ...], ...}`, preserving
/// table order.
pub fn schema_to_json(schema: &Schema) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    for table in schema {
        map.insert(
            table.name.clone(),
            Value::Array(
                table
                    .columns
                    .iter()
                    .map(|c| Value::String(c.clone()))
                    .collect(),
            ),
        );
    }
    map
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub db_filename: String,
    pub schema: serde_json::Map<String, Value>,
}

/// Body of `POST /query`. Fields are optional so missing ones produce the
/// documented 400 `{"error": ...}` body instead of a deserializer error.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub db_filename: Option<String>,
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub sql_query: String,
    pub columns: Vec<String>,
    pub results: Vec<Vec<Value>>,
}
