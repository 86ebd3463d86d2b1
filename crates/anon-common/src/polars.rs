//! Canonical text form of Polars values.
//!
//! Every anonymised value is derived from the text form of the original cell.
//! CSV cells are read as text and pass through unchanged; native Parquet
//! values are rendered here.

use polars::prelude::{AnyValue, Column, PolarsResult};

/// Converts a Polars `AnyValue` to its canonical string form.
///
/// Returns `None` for `Null`; nulls are never substituted or hashed.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use anon_common::canonical_string;
///
/// assert_eq!(canonical_string(AnyValue::Null), None);
/// assert_eq!(canonical_string(AnyValue::Int64(123456789012)).as_deref(), Some("123456789012"));
/// assert_eq!(canonical_string(AnyValue::String("arn:aws:s3:::b")).as_deref(), Some("arn:aws:s3:::b"));
/// ```
pub fn canonical_string(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_float(v),
        AnyValue::Float64(v) => format_float(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use anon_common::format_float;
///
/// assert_eq!(format_float(1.0_f64), "1");
/// assert_eq!(format_float(1.50_f64), "1.5");
/// assert_eq!(format_float(100.0_f64), "100");
/// assert_eq!(format_float(0.25_f32), "0.25");
/// ```
pub fn format_float<F: std::fmt::Display>(v: F) -> String {
    // `Display` for floats never emits trailing zeros or an exponent.
    format!("{v}")
}

/// Collects the canonical form of every cell in a column, in row order.
pub fn canonical_values(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(canonical_string(column.get(idx)?));
    }
    Ok(values)
}
