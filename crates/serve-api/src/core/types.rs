use serde_json::{Map, Value};

/// A validated `/api` request. `table` and `columns` are only checked for
/// presence; ranges of `offset` and `limit` are left to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub table: String,
    pub columns: String,
    pub offset: i64,
    pub limit: i64,
}

pub type Row = Map<String, Value>;

pub type ResultSet = Vec<Row>;
