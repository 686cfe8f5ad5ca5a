use base64::{engine::general_purpose::STANDARD, Engine as _};
use rusqlite::{params, types::ValueRef, Connection, Row as SqlRow};
use serde_json::Value;

use crate::core::projection;
use crate::core::types::{QueryRequest, ResultSet, Row};
use crate::error::{AppError, AppResult};

/// Project `columns` over `table`, skip `offset` rows and return at most
/// `limit`. Rows come back in the store's natural order.
pub fn run_read(conn: &Connection, req: &QueryRequest) -> AppResult<ResultSet> {
    let sql = projection::select_sql(&req.table, &req.columns);
    let mut stmt = conn.prepare(&sql)?;
    let col_names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let mut rows = Vec::new();
    let mut r = stmt.query(params![req.offset, req.limit])?;
    while let Some(row) = r.next()? {
        rows.push(row_to_json_object(row, &col_names)?);
    }

    tracing::debug!(table = %req.table, rows = rows.len(), "read finished");
    Ok(rows)
}

fn row_to_json_object(row: &SqlRow<'_>, col_names: &[String]) -> AppResult<Row> {
    let mut out = Row::new();
    for (i, name) in col_names.iter().enumerate() {
        let v = match row.get_ref(i)? {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(x) => Value::from(x),
            // serde_json has no representation for NaN or infinities.
            ValueRef::Real(x) => Value::from(x),
            ValueRef::Text(t) => match std::str::from_utf8(t) {
                Ok(s) => Value::from(s),
                Err(e) => {
                    return Err(AppError::Serialization(format!(
                        "column `{name}` holds text that is not valid utf-8: {e}"
                    )))
                }
            },
            ValueRef::Blob(b) => Value::from(STANDARD.encode(b)),
        };
        out.insert(name.clone(), v);
    }
    Ok(out)
}
