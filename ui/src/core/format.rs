//! Formatting helpers for presenting payload values.

use serde::Serialize;
use serde_json::Value;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date,
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
};

/// Shown in place of an absent date.
pub const MISSING_DATE: &str = "N/A";

/// Shown when a value cannot be serialized.
pub const COMPLEX_VALUE: &str = "[Objeto complexo]";

/// Format a timestamp as `DD/MM/YYYY HH:MM:SS` in the local offset.
///
/// Unparseable input is returned unchanged (and logged); empty or absent input
/// yields [`MISSING_DATE`].
pub fn format_date(input: Option<&str>) -> String {
    let raw = match input {
        Some(raw) if !raw.is_empty() => raw,
        _ => return MISSING_DATE.to_string(),
    };

    match parse_timestamp(raw.trim()) {
        Some(parsed) => format_instant(parsed),
        None => {
            tracing::warn!(input = raw, "error formatting date: invalid date format");
            raw.to_string()
        }
    }
}

/// Wall-clock "now" formatted like [`format_date`].
pub fn format_now() -> String {
    format_instant(OffsetDateTime::now_utc())
}

pub fn format_instant(instant: OffsetDateTime) -> String {
    instant
        .to_offset(local_offset())
        .format(&format_description!(
            "[day]/[month]/[year] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| MISSING_DATE.to_string())
}

/// Accepts RFC 3339, ISO date-times without an offset (read as local time)
/// and bare ISO dates (read as UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }

    let naive = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    });
    if let Ok(naive) = naive {
        return Some(naive.assume_offset(local_offset()));
    }

    Date::parse(raw, &format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Human-readable rendition of any serializable value: strings verbatim,
/// scalars via their JSON text, objects and arrays pretty-printed. Values
/// that cannot be serialized render as [`COMPLEX_VALUE`].
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(text)) => text,
        Ok(structured @ (Value::Object(_) | Value::Array(_))) => {
            serde_json::to_string_pretty(&structured).unwrap_or_else(|_| COMPLEX_VALUE.to_string())
        }
        Ok(scalar) => scalar.to_string(),
        Err(_) => COMPLEX_VALUE.to_string(),
    }
}

/// Single-line rendition used inside detail tables: strings verbatim,
/// structured values as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Share of `value` within `total` as a whole percentage; an empty total is 0%.
pub fn percent_share(value: f64, total: f64) -> i64 {
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }
    ((value / total) * 100.0).round() as i64
}

pub fn format_percent(value: f64, total: f64) -> String {
    if total <= 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value / total * 100.0)
}

pub fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
