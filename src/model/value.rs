//! Native value type on the object side of the projection.

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{GraphNode, Structure};
use crate::proxy::NodeProxy;

/// A value read from, or written to, a node's property.
///
/// Covers:
/// - Scalars: Bool, UnsignedByte, Integer, Long, Float, Double, Decimal, String
/// - Temporal: Date, Time, DateTime, Duration
/// - References: Uri, Node (a raw graph node), Proxy (an existing node view)
/// - Containers: List, Map (a builder structure)
///
/// `Integer` is the default integer family (`xsd:integer` and its bounded
/// relatives when the value fits 32 bits); `Long` is produced by `xsd:long`
/// literals and by integers too wide for `Integer`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    UnsignedByte(u8),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    String(String),

    // Temporal types
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    Duration(IsoDuration),

    // References
    Uri(Url),
    Node(GraphNode),
    Proxy(NodeProxy),

    // Containers
    List(Vec<Value>),
    Map(Structure),
}

/// ISO 8601 duration (months, days, seconds, nanoseconds).
///
/// All components carry the same sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IsoDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i32,
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Bool(_) => "BOOLEAN",
            Value::UnsignedByte(_) => "UNSIGNED_BYTE",
            Value::Integer(_) => "INTEGER",
            Value::Long(_) => "LONG",
            Value::Float(_) => "FLOAT",
            Value::Double(_) => "DOUBLE",
            Value::Decimal(_) => "DECIMAL",
            Value::String(_) => "STRING",
            Value::Date(_) => "DATE",
            Value::Time(_) => "TIME",
            Value::DateTime(_) => "DATETIME",
            Value::Duration(_) => "DURATION",
            Value::Uri(_) => "URI",
            Value::Node(_) => "NODE",
            Value::Proxy(_) => "PROXY",
            Value::List(_) => "LIST",
            Value::Map(_) => "MAP",
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

    /// Scalars are converted to literals on write.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Null | Value::Uri(_) | Value::Node(_) | Value::Proxy(_) | Value::List(_) | Value::Map(_)
        )
    }

    /// Attempt to extract as i64 (any integer family)
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::UnsignedByte(b) => Some(i64::from(*b)),
            Value::Integer(i) => Some(i64::from(*i)),
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_proxy(&self) -> Option<&NodeProxy> {
        match self {
            Value::Proxy(p) => Some(p),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<u8> for Value { fn from(v: u8) -> Self { Value::UnsignedByte(v) } }
impl From<i8> for Value { fn from(v: i8) -> Self { Value::Integer(i32::from(v)) } }
impl From<i16> for Value { fn from(v: i16) -> Self { Value::Integer(i32::from(v)) } }
impl From<u16> for Value { fn from(v: u16) -> Self { Value::Integer(i32::from(v)) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Integer(v) } }
impl From<u32> for Value { fn from(v: u32) -> Self { Value::Long(i64::from(v)) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Long(v) } }
impl From<f32> for Value { fn from(v: f32) -> Self { Value::Float(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Double(v) } }
impl From<BigDecimal> for Value { fn from(v: BigDecimal) -> Self { Value::Decimal(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<char> for Value { fn from(v: char) -> Self { Value::String(v.to_string()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<NaiveTime> for Value { fn from(v: NaiveTime) -> Self { Value::Time(v) } }
impl From<DateTime<FixedOffset>> for Value { fn from(v: DateTime<FixedOffset>) -> Self { Value::DateTime(v) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v.fixed_offset()) } }
impl From<IsoDuration> for Value { fn from(v: IsoDuration) -> Self { Value::Duration(v) } }
impl From<Url> for Value { fn from(v: Url) -> Self { Value::Uri(v) } }
impl From<GraphNode> for Value { fn from(v: GraphNode) -> Self { Value::Node(v) } }
impl From<NodeProxy> for Value { fn from(v: NodeProxy) -> Self { Value::Proxy(v) } }
impl From<&NodeProxy> for Value { fn from(v: &NodeProxy) -> Self { Value::Proxy(v.clone()) } }
impl From<Structure> for Value { fn from(v: Structure) -> Self { Value::Map(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::UnsignedByte(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Long(l) => write!(f, "{l}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Date(d) => write!(f, "{d}"),
            Value::Time(t) => write!(f, "{t}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Duration(d) => write!(f, "{d}"),
            Value::Uri(u) => write!(f, "<{u}>"),
            Value::Node(n) => write!(f, "{n}"),
            Value::Proxy(p) => write!(f, "{}", p.node()),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

// ============================================================================
// xsd:duration lexical form
// ============================================================================

impl IsoDuration {
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i32) -> Self {
        Self { months, days, seconds, nanoseconds }
    }

    fn is_negative(&self) -> bool {
        self.months < 0 || self.days < 0 || self.seconds < 0 || self.nanoseconds < 0
    }

    /// Parse an `xsd:duration` lexical form such as `-P1Y2M3DT4H5M6.5S`.
    pub fn parse(s: &str) -> Option<Self> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, s),
        };
        let rest = rest.strip_prefix('P')?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((d, t)) => {
                if t.is_empty() { return None; }
                (d, Some(t))
            }
            None => (rest, None),
        };

        let mut months = 0i64;
        let mut days = 0i64;
        let mut seconds = 0i64;
        let mut nanoseconds = 0i32;
        let mut seen_any = false;

        for (number, unit) in split_components(date_part)? {
            let n: i64 = number.parse().ok()?;
            match unit {
                'Y' => months = months.checked_add(n.checked_mul(12)?)?,
                'M' => months = months.checked_add(n)?,
                'D' => days = n,
                _ => return None,
            }
            seen_any = true;
        }

        if let Some(time_part) = time_part {
            let mut seen_time = false;
            for (number, unit) in split_components(time_part)? {
                match unit {
                    'H' => seconds = seconds.checked_add(number.parse::<i64>().ok()?.checked_mul(3600)?)?,
                    'M' => seconds = seconds.checked_add(number.parse::<i64>().ok()?.checked_mul(60)?)?,
                    'S' => {
                        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
                        seconds = seconds.checked_add(whole.parse::<i64>().ok()?)?;
                        if !frac.is_empty() {
                            if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                                return None;
                            }
                            let padded = format!("{frac:0<9}");
                            nanoseconds = padded.parse().ok()?;
                        }
                    }
                    _ => return None,
                }
                seen_time = true;
            }
            if !seen_time { return None; }
            seen_any = true;
        }

        if !seen_any { return None; }

        let sign = if negative { -1 } else { 1 };
        Some(Self {
            months: months * sign,
            days: days * sign,
            seconds: seconds * sign,
            nanoseconds: nanoseconds * sign as i32,
        })
    }
}

/// Split `1Y2M3D` into `[("1", 'Y'), ("2", 'M'), ("3", 'D')]`.
fn split_components(s: &str) -> Option<Vec<(&str, char)>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' {
            continue;
        }
        if i == start { return None; }
        out.push((&s[start..i], c));
        start = i + c.len_utf8();
    }
    if start != s.len() { return None; }
    Some(out)
}

impl fmt::Display for IsoDuration {
    /// Canonical `xsd:duration` lexical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        let months = self.months.unsigned_abs();
        let days = self.days.unsigned_abs();
        let total_seconds = self.seconds.unsigned_abs();
        let nanos = self.nanoseconds.unsigned_abs();

        write!(f, "P")?;
        let (years, months) = (months / 12, months % 12);
        if years > 0 { write!(f, "{years}Y")?; }
        if months > 0 { write!(f, "{months}M")?; }
        if days > 0 { write!(f, "{days}D")?; }

        let (hours, rem) = (total_seconds / 3600, total_seconds % 3600);
        let (minutes, seconds) = (rem / 60, rem % 60);
        let has_time = hours > 0 || minutes > 0 || seconds > 0 || nanos > 0;
        let is_zero = years == 0 && months == 0 && days == 0 && !has_time;

        if has_time || is_zero {
            write!(f, "T")?;
            if hours > 0 { write!(f, "{hours}H")?; }
            if minutes > 0 { write!(f, "{minutes}M")?; }
            if nanos > 0 {
                let frac = format!("{nanos:09}");
                write!(f, "{seconds}.{}S", frac.trim_end_matches('0'))?;
            } else if seconds > 0 || is_zero {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from('x'), Value::String("x".into()));
        assert_eq!(Value::from(42), Value::Integer(42));
        assert_eq!(Value::from(42i64), Value::Long(42));
        assert_eq!(Value::from(7u8), Value::UnsignedByte(7));
        assert_eq!(Value::from(3.5), Value::Double(3.5));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(Value::from(1).is_scalar());
        assert!(!Value::Null.is_scalar());
        assert!(!Value::from(vec![1, 2]).is_scalar());
        assert!(!Value::Node(GraphNode::blank("b")).is_scalar());
    }

    #[test]
    fn test_duration_parse() {
        assert_eq!(IsoDuration::parse("P1Y2M"), Some(IsoDuration::new(14, 0, 0, 0)));
        assert_eq!(IsoDuration::parse("P3DT4H5M6S"), Some(IsoDuration::new(0, 3, 4 * 3600 + 5 * 60 + 6, 0)));
        assert_eq!(IsoDuration::parse("PT0.25S"), Some(IsoDuration::new(0, 0, 0, 250_000_000)));
        assert_eq!(IsoDuration::parse("-P1D"), Some(IsoDuration::new(0, -1, 0, 0)));
    }

    #[test]
    fn test_duration_rejects_malformed() {
        assert_eq!(IsoDuration::parse("P"), None);
        assert_eq!(IsoDuration::parse("P1DT"), None);
        assert_eq!(IsoDuration::parse("1D"), None);
        assert_eq!(IsoDuration::parse("PXD"), None);
        assert_eq!(IsoDuration::parse("P1H"), None);
    }

    #[test]
    fn test_duration_canonical_form() {
        assert_eq!(IsoDuration::new(14, 3, 3661, 500_000_000).to_string(), "P1Y2M3DT1H1M1.5S");
        assert_eq!(IsoDuration::default().to_string(), "PT0S");
        assert_eq!(IsoDuration::new(0, -2, 0, 0).to_string(), "-P2D");
    }
}
