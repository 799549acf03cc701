//! Labels, scale kinds and label normalization

use crate::{format_locale_number, ChartError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LABEL
// ============================================================================

/// Category or series identity: a string, a number or a date.
///
/// Deserializes untagged: JSON numbers become `Number`, RFC 3339 strings
/// become `Date`, anything else is `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

impl Label {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    pub fn date(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }

    /// Display string used for legends, pie domains and tooltips
    pub fn to_locale_string(&self) -> String {
        match self {
            Self::Number(n) => format_locale_number(*n),
            Self::Date(dt) => dt.format("%-m/%-d/%Y").to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Convert the label to the value a scale of kind `scale_type` expects
    pub fn normalize(&self, scale_type: ScaleType) -> Result<DomainValue> {
        let normalized = match scale_type {
            ScaleType::Time => match self {
                Self::Date(dt) => Some(DomainValue::Time(*dt)),
                Self::Text(s) => parse_date(s).map(DomainValue::Time),
                Self::Number(ms) if ms.is_finite() => Utc
                    .timestamp_millis_opt(*ms as i64)
                    .single()
                    .map(DomainValue::Time),
                Self::Number(_) => None,
            },
            ScaleType::Linear => match self {
                Self::Number(n) => Some(*n),
                Self::Text(s) => s.trim().parse::<f64>().ok(),
                Self::Date(dt) => Some(dt.timestamp_millis() as f64),
            }
            .filter(|n| n.is_finite())
            .map(DomainValue::Number),
            ScaleType::Ordinal => Some(DomainValue::Category(self.clone())),
        };

        normalized.ok_or_else(|| ChartError::InvalidLabel {
            label: self.to_string(),
            scale_type,
        })
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Date(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Label {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<DateTime<Utc>> for Label {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

// ============================================================================
// SCALE TYPE
// ============================================================================

/// Domain kind of a scale; decides how labels are converted before mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Time,
    Linear,
    /// Discrete labels; also the fallback for unrecognized tags
    #[default]
    #[serde(other)]
    Ordinal,
}

impl ScaleType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "time" => Self::Time,
            "linear" => Self::Linear,
            _ => Self::Ordinal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Linear => "linear",
            Self::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DOMAIN VALUE
// ============================================================================

/// Normalized scale input
#[derive(Debug, Clone, PartialEq)]
pub enum DomainValue {
    Category(Label),
    Number(f64),
    Time(DateTime<Utc>),
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(label) => write!(f, "{}", label),
            Self::Number(n) => write!(f, "{}", n),
            Self::Time(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_normalization() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let from_text = Label::text("2024-03-01").normalize(ScaleType::Time).unwrap();
        assert_eq!(from_text, DomainValue::Time(expected));

        let from_millis = Label::number(expected.timestamp_millis() as f64)
            .normalize(ScaleType::Time)
            .unwrap();
        assert_eq!(from_millis, DomainValue::Time(expected));
    }

    #[test]
    fn test_linear_normalization() {
        assert_eq!(
            Label::text(" 42.5 ").normalize(ScaleType::Linear).unwrap(),
            DomainValue::Number(42.5)
        );

        let err = Label::text("abc").normalize(ScaleType::Linear).unwrap_err();
        assert!(matches!(err, ChartError::InvalidLabel { scale_type: ScaleType::Linear, .. }));
    }

    #[test]
    fn test_ordinal_passthrough() {
        let label = Label::text("Q1");
        assert_eq!(
            label.normalize(ScaleType::Ordinal).unwrap(),
            DomainValue::Category(label)
        );
    }

    #[test]
    fn test_scale_type_tags() {
        assert_eq!(ScaleType::from_tag("time"), ScaleType::Time);
        assert_eq!(ScaleType::from_tag("band"), ScaleType::Ordinal);

        let parsed: ScaleType = serde_json::from_str("\"point\"").unwrap();
        assert_eq!(parsed, ScaleType::Ordinal);
    }

    #[test]
    fn test_locale_strings() {
        let dt = Utc.with_ymd_and_hms(2016, 9, 7, 12, 0, 0).unwrap();
        assert_eq!(Label::date(dt).to_locale_string(), "9/7/2016");
        assert_eq!(Label::number(12500.0).to_locale_string(), "12,500");
        assert_eq!(Label::text("Germany").to_locale_string(), "Germany");
    }

    #[test]
    fn test_untagged_deserialization() {
        let labels: Vec<Label> =
            serde_json::from_str(r#"[3, "2024-01-01T00:00:00Z", "France"]"#).unwrap();
        assert_eq!(labels[0], Label::number(3.0));
        assert!(matches!(labels[1], Label::Date(_)));
        assert_eq!(labels[2], Label::text("France"));
    }
}
