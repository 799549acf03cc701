//! # forge-core
//!
//! Core data model for the forge chart geometry engine.
//! Implements Strategy pattern for label and value formatting.

pub mod color;
pub mod error;
pub mod interaction;
pub mod label;
pub mod series;

pub use color::*;
pub use error::*;
pub use interaction::*;
pub use label::*;
pub use series::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for turning a label into display text (axis ticks, tooltips, legends)
pub trait LabelFormatter: Send + Sync {
    fn format_label(&self, label: &Label) -> String;
}

/// Strategy trait for numeric value formatting
pub trait ValueFormatter: Send + Sync {
    fn format_value(&self, value: f64) -> String;
}

/// Locale-style label formatter: dates as `M/D/YYYY`, numbers grouped, text as is
#[derive(Debug, Clone, Default)]
pub struct LocaleLabelFormatter;

impl LabelFormatter for LocaleLabelFormatter {
    fn format_label(&self, label: &Label) -> String {
        label.to_locale_string()
    }
}

/// Locale-style number formatter (thousands separators, at most 3 decimals)
#[derive(Debug, Clone, Default)]
pub struct LocaleNumberFormatter;

impl ValueFormatter for LocaleNumberFormatter {
    fn format_value(&self, value: f64) -> String {
        format_locale_number(value)
    }
}

/// Fixed-decimal value formatter
#[derive(Debug, Clone)]
pub struct DecimalValueFormatter {
    pub decimals: usize,
}

impl Default for DecimalValueFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for DecimalValueFormatter {
    fn format_value(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

/// Format a number the way an en-US locale string does: `1234.5678` -> `1,234.568`
pub fn format_locale_number(num: f64) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let rounded = (num * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const DEFAULT_FILL: &str = "#a8385d";
    pub const STROKE: &str = "#ffffff";
    pub const NEUTRAL: &str = "#888888";

    /// Ten-color categorical scheme
    pub const VIVID: &[&str] = &[
        "#647c8a", "#3f51b5", "#2196f3", "#00b862", "#afdf0a",
        "#a7b61a", "#f3e562", "#ff9800", "#ff5722", "#ff4081",
    ];

    /// Cooler categorical scheme
    pub const COOL: &[&str] = &[
        "#a8385d", "#7aa3e5", "#a27ea8", "#aae3f5", "#adcded",
        "#a95963", "#8796c0", "#7ed3ed", "#50abcc", "#ad6886",
    ];

    /// Look up a scheme by name, falling back to [`VIVID`]
    pub fn scheme(name: &str) -> &'static [&'static str] {
        match name {
            "cool" => COOL,
            _ => VIVID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_number_grouping() {
        assert_eq!(format_locale_number(1234567.0), "1,234,567");
        assert_eq!(format_locale_number(1234.5678), "1,234.568");
        assert_eq!(format_locale_number(-42.5), "-42.5");
        assert_eq!(format_locale_number(0.0), "0");
        assert_eq!(format_locale_number(999.0), "999");
    }

    #[test]
    fn test_value_formatter_strategy() {
        let formatter = DecimalValueFormatter { decimals: 1 };
        assert_eq!(formatter.format_value(3.14159), "3.1");
        assert_eq!(LocaleNumberFormatter.format_value(2500.0), "2,500");
    }

    #[test]
    fn test_scheme_lookup() {
        assert_eq!(colors::scheme("cool")[0], "#a8385d");
        assert_eq!(colors::scheme("unknown").len(), 10);
    }
}
