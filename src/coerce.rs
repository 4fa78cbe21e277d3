//! # Type Coercion Engine
//!
//! Bidirectional mapping between literals and native scalar values.
//!
//! ## Read direction (literal → `Value`)
//!
//! | Datatype | Value |
//! |----------|-------|
//! | none (plain), `xsd:string` family, `rdf:langString` | `String` |
//! | `xsd:boolean` | `Bool` |
//! | `xsd:integer` family | `Integer` if it fits 32 bits, else `Long` |
//! | `xsd:long` | `Long`, always |
//! | `xsd:unsignedByte` | `UnsignedByte` |
//! | `xsd:decimal` | `Decimal` |
//! | `xsd:double` / `xsd:float` | `Double` / `Float` |
//! | `xsd:dateTime` / `xsd:date` / `xsd:time` | `DateTime` / `Date` / `Time` |
//! | `xsd:duration` family | `Duration` |
//!
//! Unknown datatypes and lexical forms the parser rejects fall back to the
//! raw lexical form as `String`. This path never fails.
//!
//! ## Write direction (`Value` → literal)
//!
//! Every integer kind except `UnsignedByte` widens to `xsd:long`. Dates are
//! written as `xsd:dateTime` at midnight UTC.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use tracing::trace;

use crate::model::{IsoDuration, Literal, Value};
use crate::vocab::{rdf, xsd};

// =============================================================================
// Literal → Value
// =============================================================================

/// Convert a literal to its native value, falling back to the lexical form.
pub fn literal_to_value(literal: &Literal) -> Value {
    let Some(datatype) = literal.datatype() else {
        return Value::String(literal.lexical.clone());
    };

    match parse_typed(&literal.lexical, datatype) {
        Some(value) => value,
        None => {
            trace!(datatype, lexical = %literal.lexical, "literal kept as lexical string");
            Value::String(literal.lexical.clone())
        }
    }
}

/// Try the parser registered for `datatype`. `None` means unknown datatype
/// or a lexical form that parser rejects.
fn parse_typed(lexical: &str, datatype: &str) -> Option<Value> {
    match datatype {
        xsd::BOOLEAN => parse_boolean(lexical).map(Value::Bool),
        xsd::LONG => lexical.parse::<i64>().ok().map(Value::Long),
        xsd::UNSIGNED_BYTE => lexical.parse::<u8>().ok().map(Value::UnsignedByte),
        dt if xsd::is_integer_family(dt) => parse_integer(lexical, dt),
        xsd::DECIMAL => parse_decimal(lexical).map(Value::Decimal),
        xsd::DOUBLE => parse_double(lexical).map(Value::Double),
        xsd::FLOAT => parse_double(lexical).map(|d| Value::Float(d as f32)),
        xsd::DATE_TIME => parse_date_time(lexical).map(Value::DateTime),
        xsd::DATE => parse_date(lexical).map(Value::Date),
        xsd::TIME => parse_time(lexical).map(Value::Time),
        dt if xsd::is_duration(dt) => IsoDuration::parse(lexical).map(Value::Duration),
        dt if xsd::is_string_like(dt) || dt == rdf::LANG_STRING => Some(Value::String(lexical.to_owned())),
        _ => None,
    }
}

fn parse_boolean(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Smallest fit: 32-bit when possible, then 64-bit; wider values fall back.
fn parse_integer(s: &str, datatype: &str) -> Option<Value> {
    let n: i128 = s.parse().ok()?;
    if let Some((min, max)) = xsd::integer_bounds(datatype) {
        if n < min || n > max {
            return None;
        }
    }
    if let Ok(i) = i32::try_from(n) {
        Some(Value::Integer(i))
    } else {
        i64::try_from(n).ok().map(Value::Long)
    }
}

/// `xsd:decimal` has no exponent form, unlike `BigDecimal::from_str`.
fn parse_decimal(s: &str) -> Option<BigDecimal> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    BigDecimal::from_str(s).ok()
}

fn parse_double(s: &str) -> Option<f64> {
    match s {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    // Rust also accepts "inf"/"infinity"/"nan" spellings; XSD does not.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E')) {
        return None;
    }
    s.parse().ok()
}

/// Offset is optional in `xsd:dateTime`; a missing one is read as UTC.
fn parse_date_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let trimmed = strip_timezone(s);
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let trimmed = strip_timezone(s);
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f").ok()
}

/// Drop a trailing `Z` or `±hh:mm` zone designator.
fn strip_timezone(s: &str) -> &str {
    if let Some(rest) = s.strip_suffix('Z') {
        return rest;
    }
    let bytes = s.as_bytes();
    if bytes.len() > 6 {
        let zone = &bytes[bytes.len() - 6..];
        if matches!(zone[0], b'+' | b'-') && zone[3] == b':' {
            return &s[..s.len() - 6];
        }
    }
    s
}

// =============================================================================
// Value → Literal
// =============================================================================

/// Convert a native scalar to a typed literal.
///
/// Returns `None` for values that are not scalars (null, references,
/// containers); those are handled by the graph builder.
pub fn value_to_literal(value: &Value) -> Option<Literal> {
    let literal = match value {
        Value::Bool(b) => Literal::typed(b.to_string(), xsd::BOOLEAN),
        Value::UnsignedByte(b) => Literal::typed(b.to_string(), xsd::UNSIGNED_BYTE),
        Value::Integer(i) => Literal::typed(i64::from(*i).to_string(), xsd::LONG),
        Value::Long(l) => Literal::typed(l.to_string(), xsd::LONG),
        Value::Float(f) => Literal::typed(format_double(f64::from(*f), f.to_string()), xsd::FLOAT),
        Value::Double(d) => Literal::typed(format_double(*d, d.to_string()), xsd::DOUBLE),
        Value::Decimal(d) => Literal::typed(d.to_plain_string(), xsd::DECIMAL),
        Value::String(s) => Literal::typed(s.clone(), xsd::STRING),
        Value::Date(d) => {
            let midnight = d.and_time(NaiveTime::MIN).and_utc();
            Literal::typed(format_date_time(&midnight.fixed_offset()), xsd::DATE_TIME)
        }
        Value::DateTime(dt) => Literal::typed(format_date_time(dt), xsd::DATE_TIME),
        Value::Time(t) => Literal::typed(t.format("%H:%M:%S%.f").to_string(), xsd::TIME),
        Value::Duration(d) => Literal::typed(d.to_string(), xsd::DURATION),
        Value::Null
        | Value::Uri(_)
        | Value::Node(_)
        | Value::Proxy(_)
        | Value::List(_)
        | Value::Map(_) => return None,
    };
    Some(literal)
}

fn format_double(v: f64, display: String) -> String {
    if v.is_nan() {
        "NaN".to_owned()
    } else if v == f64::INFINITY {
        "INF".to_owned()
    } else if v == f64::NEG_INFINITY {
        "-INF".to_owned()
    } else {
        display
    }
}

fn format_date_time(dt: &DateTime<FixedOffset>) -> String {
    if dt.offset().local_minus_utc() == 0 {
        dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::AutoSi, true)
    } else {
        dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}
