//! # chartkit
//!
//! Core chart primitives: scales, the scale adapter, path building.
//! Implements Strategy pattern so builders accept any scale kind.

use chrono::{DateTime, Utc};
use forge_core::{ChartError, DomainValue, Label, ScaleType};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write};

// ============================================================================
// STRATEGY PATTERN: Domain Scale Trait
// ============================================================================

/// Strategy trait for scales (maps normalized domain values to pixels)
pub trait DomainScale: Send + Sync {
    /// Map a domain value, `None` when the value is outside what the scale understands
    fn apply(&self, value: &DomainValue) -> Option<f64>;

    /// The two pixel endpoints of the output range
    fn range_extent(&self) -> (f64, f64);

    /// Width of one band; 0 for continuous scales
    fn bandwidth(&self) -> f64 {
        0.0
    }
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Scale a value from domain to range
    pub fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    /// Inverse scale (range to domain)
    pub fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    /// `count` evenly spaced values across the domain, endpoints included
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }

    /// Round-number ticks (1, 2, 5 × 10^k steps) inside the domain
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let Some(step) = nice_step(max - min, count) else {
            return vec![min];
        };

        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Extend the domain outward to round-number bounds
    pub fn nice(mut self, count: usize) -> Self {
        let (min, max) = self.domain;
        if let Some(step) = nice_step(max - min, count) {
            self.domain = ((min / step).floor() * step, (max / step).ceil() * step);
        }
        self
    }
}

fn nice_step(span: f64, count: usize) -> Option<f64> {
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let rough = span / count as f64;
    let magnitude = 10.0_f64.powf(rough.log10().floor());
    let step = match rough / magnitude {
        r if r <= 1.0 => magnitude,
        r if r <= 2.0 => 2.0 * magnitude,
        r if r <= 5.0 => 5.0 * magnitude,
        _ => 10.0 * magnitude,
    };
    Some(step)
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainScale for LinearScale {
    fn apply(&self, value: &DomainValue) -> Option<f64> {
        let v = match value {
            DomainValue::Number(n) => *n,
            DomainValue::Time(dt) => dt.timestamp_millis() as f64,
            DomainValue::Category(Label::Number(n)) => *n,
            DomainValue::Category(_) => return None,
        };
        Some(self.scale(v))
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

/// Time scale (maps timestamps to pixel positions)
#[derive(Debug, Clone)]
pub struct TimeScale {
    domain: (i64, i64), // Unix timestamps in milliseconds
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn domain_dates(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.domain(start.timestamp_millis(), end.timestamp_millis())
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Scale timestamp to pixel position
    pub fn scale(&self, timestamp: i64) -> f64 {
        self.scale_millis(timestamp as f64)
    }

    fn scale_millis(&self, millis: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (millis - d_min as f64) / (d_max - d_min) as f64;
        r_min + normalized * (r_max - r_min)
    }

    /// Inverse scale (pixel to timestamp)
    pub fn invert(&self, value: f64) -> i64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max - d_min) as f64) as i64
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainScale for TimeScale {
    fn apply(&self, value: &DomainValue) -> Option<f64> {
        match value {
            DomainValue::Time(dt) | DomainValue::Category(Label::Date(dt)) => {
                Some(self.scale(dt.timestamp_millis()))
            }
            DomainValue::Number(ms) => Some(self.scale_millis(*ms)),
            DomainValue::Category(_) => None,
        }
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range
    }
}

// ============================================================================
// BAND SCALE (for categorical/ordinal data like bars)
// ============================================================================

/// Band scale over an ordered list of labels.
///
/// `position` returns the leading edge of a band; a point scale is a band
/// scale with `padding_inner = 1` (zero bandwidth).
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<Label>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    pub fn new(domain: Vec<Label>) -> Self {
        Self {
            domain,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.1,
            align: 0.5,
        }
    }

    /// Point scale: zero-width bands, evenly spaced
    pub fn point(domain: Vec<Label>) -> Self {
        Self {
            padding_inner: 1.0,
            padding_outer: 0.0,
            ..Self::new(domain)
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    pub fn padding_uniform(self, padding: f64) -> Self {
        self.padding(padding, padding)
    }

    pub fn align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    pub fn domain_labels(&self) -> &[Label] {
        &self.domain
    }

    fn sorted_range(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        if r1 < r0 { (r1, r0, true) } else { (r0, r1, false) }
    }

    /// Get step size (band + gap)
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        let (start, stop, _) = self.sorted_range();
        (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    /// Get band width (width of each bar)
    pub fn bandwidth(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Get position for index
    pub fn scale_index(&self, index: usize) -> f64 {
        let n = self.domain.len();
        let (start, stop, reverse) = self.sorted_range();
        if n == 0 {
            return start;
        }

        let step = self.step();
        let offset = start + (stop - start - step * (n as f64 - self.padding_inner)) * self.align;
        let slot = if reverse { n - 1 - index.min(n - 1) } else { index };
        offset + step * slot as f64
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale_index(index) + self.bandwidth() / 2.0
    }

    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.domain.iter().position(|l| l == label)
    }

    /// Leading edge of the band holding `label`
    pub fn position(&self, label: &Label) -> Option<f64> {
        self.index_of(label).map(|i| self.scale_index(i))
    }
}

impl DomainScale for BandScale {
    fn apply(&self, value: &DomainValue) -> Option<f64> {
        match value {
            DomainValue::Category(label) => self.position(label),
            DomainValue::Number(n) => self.position(&Label::Number(*n)),
            DomainValue::Time(dt) => self.position(&Label::Date(*dt)),
        }
    }

    fn range_extent(&self) -> (f64, f64) {
        self.range
    }

    fn bandwidth(&self) -> f64 {
        BandScale::bandwidth(self)
    }
}

// ============================================================================
// SCALE ADAPTER
// ============================================================================

/// Applies a scale to raw labels, converting each label according to `scale_type` first
#[derive(Clone, Copy)]
pub struct ScaleAdapter<'a> {
    scale: &'a dyn DomainScale,
    scale_type: ScaleType,
}

impl<'a> ScaleAdapter<'a> {
    pub fn new(scale: &'a dyn DomainScale, scale_type: ScaleType) -> Self {
        Self { scale, scale_type }
    }

    /// Adapter for a value axis (always linear)
    pub fn linear(scale: &'a dyn DomainScale) -> Self {
        Self::new(scale, ScaleType::Linear)
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn apply(&self, label: &Label) -> Result<f64, ChartError> {
        let value = label.normalize(self.scale_type)?;
        self.apply_value(&value)
    }

    pub fn apply_value(&self, value: &DomainValue) -> Result<f64, ChartError> {
        match self.scale.apply(value) {
            Some(px) if px.is_finite() => Ok(px),
            _ => Err(ChartError::Unmapped {
                value: value.to_string(),
            }),
        }
    }

    pub fn apply_number(&self, value: f64) -> Result<f64, ChartError> {
        self.apply_value(&DomainValue::Number(value))
    }

    pub fn range(&self) -> (f64, f64) {
        self.scale.range_extent()
    }

    pub fn bandwidth(&self) -> f64 {
        self.scale.bandwidth()
    }
}

impl fmt::Debug for ScaleAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleAdapter")
            .field("scale_type", &self.scale_type)
            .field("range", &self.range())
            .finish()
    }
}

// ============================================================================
// PATHS
// ============================================================================

/// One command of a path outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Elliptical arc with zero x-axis rotation
    ArcTo {
        rx: f64,
        ry: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

/// Ordered path outline; serializes as SVG path data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    /// Circular arc of radius `r`
    pub fn arc_to(mut self, r: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.segments.push(PathSegment::ArcTo {
            rx: r,
            ry: r,
            large_arc,
            sweep,
            x,
            y,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.segments.iter().all(|s| match *s {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathSegment::ArcTo { rx, ry, x, y, .. } => {
                rx.is_finite() && ry.is_finite() && x.is_finite() && y.is_finite()
            }
            PathSegment::Close => true,
        })
    }

    /// SVG path data string
    pub fn to_svg(&self) -> String {
        self.segments
            .iter()
            .fold(PathBuilder::new(), |builder, segment| match *segment {
                PathSegment::MoveTo { x, y } => builder.move_to(x, y),
                PathSegment::LineTo { x, y } => builder.line_to(x, y),
                PathSegment::ArcTo {
                    rx,
                    ry,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => builder.arc_to(rx, ry, 0.0, large_arc, sweep, x, y),
                PathSegment::Close => builder.close(),
            })
            .build()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_svg())
    }
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx,
            ry,
            rotation,
            large_arc as u8,
            sweep as u8,
            x,
            y
        );
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use float_cmp::assert_approx_eq;

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::text(*n)).collect()
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_linear_scale_clamp() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(0.0, 100.0).clamp(true);
        assert_eq!(scale.scale(20.0), 100.0);
        assert_eq!(scale.scale(-5.0), 0.0);
    }

    #[test]
    fn test_linear_ticks() {
        let scale = LinearScale::new().domain(0.0, 100.0);
        assert_eq!(scale.ticks(3), vec![0.0, 50.0, 100.0]);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(LinearScale::new().domain(3.0, 3.0).nice_ticks(5), vec![3.0]);
    }

    #[test]
    fn test_linear_nice_domain() {
        let scale = LinearScale::new().domain(0.0, 87.0).nice(5);
        assert_eq!(scale.domain_bounds(), (0.0, 100.0));
    }

    #[test]
    fn test_time_scale_applies_dates() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        let mid = Utc.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();
        let scale = TimeScale::new().domain_dates(start, end).range(0.0, 200.0);

        assert_approx_eq!(f64, scale.apply(&DomainValue::Time(mid)).unwrap(), 100.0);
        assert_eq!(scale.invert(100.0), mid.timestamp_millis());
        assert!(scale.apply(&DomainValue::Category(Label::text("x"))).is_none());
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(labels(&["a", "b", "c", "d", "e"])).range(0.0, 100.0);
        let bw = scale.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0); // Should be less than 100/5

        // First band starts after the outer padding
        assert_approx_eq!(f64, scale.scale_index(0), scale.step() * 0.1, epsilon = 1e-9);
        assert!(scale.position(&Label::text("zzz")).is_none());
    }

    #[test]
    fn test_band_scale_no_padding_is_even() {
        let scale = BandScale::new(labels(&["a", "b", "c", "d"]))
            .range(0.0, 100.0)
            .padding(0.0, 0.0);
        assert_approx_eq!(f64, scale.bandwidth(), 25.0);
        assert_approx_eq!(f64, scale.scale_index(2), 50.0);
    }

    #[test]
    fn test_band_scale_reversed_range() {
        let scale = BandScale::new(labels(&["a", "b"]))
            .range(100.0, 0.0)
            .padding(0.0, 0.0);
        assert_approx_eq!(f64, scale.scale_index(0), 50.0);
        assert_approx_eq!(f64, scale.scale_index(1), 0.0);
    }

    #[test]
    fn test_point_scale_spans_range() {
        let scale = BandScale::point(labels(&["a", "b", "c"])).range(0.0, 100.0);
        assert_eq!(scale.bandwidth(), 0.0);
        assert_approx_eq!(f64, scale.position(&Label::text("a")).unwrap(), 0.0);
        assert_approx_eq!(f64, scale.position(&Label::text("b")).unwrap(), 50.0);
        assert_approx_eq!(f64, scale.position(&Label::text("c")).unwrap(), 100.0);
    }

    #[test]
    fn test_adapter_converts_by_scale_type() {
        let scale = LinearScale::new().domain(0.0, 10.0).range(0.0, 100.0);
        let adapter = ScaleAdapter::new(&scale, ScaleType::Linear);

        assert_approx_eq!(f64, adapter.apply(&Label::text("5")).unwrap(), 50.0);
        assert!(matches!(
            adapter.apply(&Label::text("five")),
            Err(ChartError::InvalidLabel { .. })
        ));

        // Ordinal labels pass through and a linear scale cannot map text
        let ordinal = ScaleAdapter::new(&scale, ScaleType::Ordinal);
        assert!(matches!(
            ordinal.apply(&Label::text("five")),
            Err(ChartError::Unmapped { .. })
        ));
    }

    #[test]
    fn test_path_to_svg() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .arc_to(5.0, false, true, 105.0, 105.0)
            .close();

        let d = path.to_svg();
        assert!(d.starts_with("M0.00,0.00"));
        assert!(d.contains("L100.00,100.00"));
        assert!(d.contains("A5.00,5.00,0.00,0,1,105.00,105.00"));
        assert!(d.ends_with('Z'));
        assert!(path.is_finite());
    }
}
