//! Response decoding — `{"data": [[label, uri], ...]}` into [`ResultRecord`]s.
//!
//! Rows are mapped positionally onto the keys `label`, `uri`. A short row
//! leaves the missing fields empty, `null` becomes empty, other scalars are
//! stringified, and anything past the second column is ignored.

use crate::error::Result;
use crate::types::ResultRecord;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct CypherResponse {
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

/// Decode a response body into records, preserving row order.
pub fn decode(body: &[u8]) -> Result<Vec<ResultRecord>> {
    let resp: CypherResponse = serde_json::from_slice(body)?;
    Ok(resp.data.iter().map(|row| record_from_row(row)).collect())
}

/// Map one row onto a record.
pub fn record_from_row(row: &[Value]) -> ResultRecord {
    let mut cols = row.iter();
    let label = cols.next().map(cell_to_string).unwrap_or_default();
    let uri = cols.next().map(cell_to_string).unwrap_or_default();
    ResultRecord { label, uri }
}

fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
