//! Column encoding shared by the SQL repositories.
//!
//! The `Any` driver only moves integers, floats, text and blobs, so
//! timestamps are stored as fixed-width RFC 3339 text (sortable as strings),
//! lists and nested records as JSON text and booleans as 0/1.

use crate::error::DbError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::any::AnyRow;
use sqlx::{Row, ValueRef};
use uuid::Uuid;

pub fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn encode_json<T: Serialize>(column: &str, value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|e| DbError::decode(column, e))
}

pub fn encode_bool(value: bool) -> i64 {
    i64::from(value)
}

pub fn get_string(row: &AnyRow, column: &str) -> Result<String, DbError> {
    row.try_get::<String, _>(column)
        .map_err(|e| DbError::decode(column, e))
}

/// NULL comes back from the `Any` driver as its own type, so it has to be
/// checked on the raw value before decoding as text.
pub fn get_opt_string(row: &AnyRow, column: &str) -> Result<Option<String>, DbError> {
    let raw = row
        .try_get_raw(column)
        .map_err(|e| DbError::decode(column, e))?;
    if raw.is_null() {
        return Ok(None);
    }
    get_string(row, column).map(Some)
}

/// LIKE pattern matching `value` as an element of a JSON string list.
/// Use with `ESCAPE '!'`, which reads the same on every backend.
pub fn json_member_pattern(value: &str) -> String {
    let element = serde_json::Value::String(value.to_string()).to_string();
    let mut escaped = String::with_capacity(element.len() + 2);
    for c in element.chars() {
        if matches!(c, '%' | '_' | '!') {
            escaped.push('!');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

pub fn get_i64(row: &AnyRow, column: &str) -> Result<i64, DbError> {
    row.try_get::<i64, _>(column)
        .map_err(|e| DbError::decode(column, e))
}

pub fn get_bool(row: &AnyRow, column: &str) -> Result<bool, DbError> {
    get_i64(row, column).map(|v| v != 0)
}

pub fn get_time(row: &AnyRow, column: &str) -> Result<DateTime<Utc>, DbError> {
    let raw = get_string(row, column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::decode(column, e))
}

pub fn get_uuid(row: &AnyRow, column: &str) -> Result<Uuid, DbError> {
    let raw = get_string(row, column)?;
    Uuid::parse_str(&raw).map_err(|e| DbError::decode(column, e))
}

pub fn get_json<T: DeserializeOwned>(row: &AnyRow, column: &str) -> Result<T, DbError> {
    let raw = get_string(row, column)?;
    serde_json::from_str(&raw).map_err(|e| DbError::decode(column, e))
}
