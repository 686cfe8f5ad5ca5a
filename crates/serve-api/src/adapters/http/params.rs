use crate::{
    core::types::QueryRequest,
    error::{AppError, AppResult},
};

/// Validate the raw `/api` query pairs in a fixed order: `table`, `columns`,
/// `offset`, `limit`. The first failure is returned. When a key repeats, its
/// first value wins.
pub fn parse_request(pairs: &[(String, String)]) -> AppResult<QueryRequest> {
    let table = required(pairs, "table")?.to_string();
    let columns = required(pairs, "columns")?.to_string();
    let offset = integer(pairs, "offset")?;
    let limit = integer(pairs, "limit")?;
    Ok(QueryRequest {
        table,
        columns,
        offset,
        limit,
    })
}

fn required<'a>(pairs: &'a [(String, String)], name: &'static str) -> AppResult<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .ok_or(AppError::MissingParameter(name))
}

fn integer(pairs: &[(String, String)], name: &'static str) -> AppResult<i64> {
    required(pairs, name)?
        .parse()
        .map_err(|e: std::num::ParseIntError| AppError::InvalidParameter {
            name,
            reason: e.to_string(),
        })
}
