use serde_json::{Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

use querygate_core::{Result, Row};

use super::db_error;

/// Map a row onto column name → JSON value, keeping column order.
///
/// Duplicate column names keep the last value, as a name-keyed mapping must.
pub fn decode_row(row: &SqliteRow) -> Result<Row> {
    let mut out = Row::new();
    for column in row.columns() {
        let value = decode_value(row, column.ordinal())?;
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}

// Dispatch on the storage class of the value, not the declared column type.
fn decode_value(row: &SqliteRow, index: usize) -> Result<Value> {
    let raw = row.try_get_raw(index).map_err(db_error)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage = raw.type_info().name().to_string();

    let value = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(index).map_err(db_error)?),
        "REAL" | "NUMERIC" => {
            let float = row.try_get_unchecked::<f64, _>(index).map_err(db_error)?;
            Number::from_f64(float).map_or(Value::Null, Value::Number)
        }
        "BLOB" => Value::String(hex::encode(
            row.try_get_unchecked::<Vec<u8>, _>(index).map_err(db_error)?,
        )),
        _ => Value::String(row.try_get_unchecked::<String, _>(index).map_err(db_error)?),
    };
    Ok(value)
}
