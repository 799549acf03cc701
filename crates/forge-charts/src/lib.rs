//! # forge-charts
//!
//! D3-style chart geometry engine.
//! Maps data series, scales, view dimensions and interaction state to
//! renderer-agnostic primitive descriptors.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, time, band/point)
//! - Color resolution (see `forge_core::ColorResolver`)
//! - Label and value formatting
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, scale adapter, paths
//! - `primitive` - Primitive descriptors, fills and gradient ids
//! - `bar` - Rounded-rectangle bar geometry
//! - `circle_series` - Point markers with tooltip bars
//! - `pie` - Pie/doughnut layout and wedges
//! - `animation` - Entrance animation state machine

pub mod animation;
pub mod bar;
pub mod chartkit;
pub mod circle_series;
pub mod pie;
pub mod primitive;

pub use animation::*;
pub use bar::*;
pub use chartkit::*;
pub use circle_series::*;
pub use pie::*;
pub use primitive::*;

// Re-export colors from forge-core for convenience
pub use forge_core::colors;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// From a `[top, right, bottom, left]` array
    pub const fn from_array(m: [f64; 4]) -> Self {
        Self::new(m[0], m[1], m[2], m[3])
    }

    /// Standard chart margins
    pub const fn standard() -> Self {
        Self::uniform(20.0)
    }

    /// Room for outside pie labels and their leader lines
    pub const fn labeled() -> Self {
        Self::symmetric(30.0, 80.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<[f64; 4]> for ChartMargin {
    fn from(m: [f64; 4]) -> Self {
        Self::from_array(m)
    }
}

/// How much width the legend takes when shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendReservation {
    /// Plot keeps `n` of 12 grid columns
    Columns(u8),
    /// Fixed pixel width
    Fixed(f64),
}

impl LegendReservation {
    pub fn reserved_width(&self, width: f64) -> f64 {
        match *self {
            Self::Columns(n) => width * f64::from(12 - n.min(12)) / 12.0,
            Self::Fixed(px) => px.max(0.0),
        }
    }
}

impl Default for LegendReservation {
    fn default() -> Self {
        Self::Columns(10)
    }
}

/// Inputs of the view dimension calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    pub show_legend: bool,
    pub legend: LegendReservation,
    /// Height taken by an x axis, if drawn
    pub x_axis_height: Option<f64>,
    /// Width taken by a y axis, if drawn
    pub y_axis_width: Option<f64>,
}

impl ViewConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_margin(mut self, margin: impl Into<ChartMargin>) -> Self {
        self.margin = margin.into();
        self
    }

    pub fn with_legend(mut self, legend: LegendReservation) -> Self {
        self.show_legend = true;
        self.legend = legend;
        self
    }

    pub fn with_axes(mut self, x_axis_height: f64, y_axis_width: f64) -> Self {
        self.x_axis_height = Some(x_axis_height);
        self.y_axis_width = Some(y_axis_width);
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: ChartMargin::default(),
            show_legend: false,
            legend: LegendReservation::default(),
            x_axis_height: None,
            y_axis_width: None,
        }
    }
}

/// Plot area available to the geometry builders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewDimensions {
    pub width: f64,
    pub height: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub margin: ChartMargin,
    /// Left edge of the plot area
    pub x_offset: f64,
}

impl ViewDimensions {
    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.x_offset, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Compute plot width/height from the outer size, margins, legend and axes.
///
/// Sizes never go negative and are floored to whole pixels.
pub fn calculate_view_dimensions(config: &ViewConfig) -> ViewDimensions {
    let margin = config.margin;

    let mut plot_width = config.width;
    if config.show_legend {
        plot_width -= config.legend.reserved_width(config.width);
    }
    plot_width -= margin.left + margin.right;

    let mut x_offset = margin.left;
    if let Some(axis) = config.y_axis_width {
        plot_width -= axis;
        x_offset += axis;
    }

    let mut plot_height = config.height - margin.top - margin.bottom;
    if let Some(axis) = config.x_axis_height {
        plot_height -= axis;
    }

    ViewDimensions {
        width: config.width,
        height: config.height,
        plot_width: plot_width.max(0.0).floor(),
        plot_height: plot_height.max(0.0).floor(),
        margin,
        x_offset: x_offset.floor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_subtract_margins() {
        let dims = calculate_view_dimensions(
            &ViewConfig::new(400.0, 300.0).with_margin([10.0, 20.0, 30.0, 40.0]),
        );
        assert_eq!(dims.plot_width, 340.0);
        assert_eq!(dims.plot_height, 260.0);
        assert_eq!(dims.x_offset, 40.0);
    }

    #[test]
    fn test_dimensions_clamp_to_zero() {
        let dims = calculate_view_dimensions(
            &ViewConfig::new(10.0, 10.0).with_margin([0.0, 20.0, 0.0, 20.0]),
        );
        assert_eq!(dims.plot_width, 0.0);
        assert_eq!(dims.plot_height, 10.0);

        let dims = calculate_view_dimensions(
            &ViewConfig::new(10.0, 5.0).with_margin([10.0, 0.0, 10.0, 0.0]),
        );
        assert_eq!(dims.plot_height, 0.0);
    }

    #[test]
    fn test_legend_reduces_width() {
        let config = ViewConfig::new(1200.0, 400.0).with_margin([0.0, 0.0, 0.0, 0.0]);
        let without = calculate_view_dimensions(&config);
        let with = calculate_view_dimensions(&config.with_legend(LegendReservation::Columns(10)));
        assert_eq!(without.plot_width, 1200.0);
        assert_eq!(with.plot_width, 1000.0);

        let fixed = calculate_view_dimensions(&config.with_legend(LegendReservation::Fixed(150.0)));
        assert_eq!(fixed.plot_width, 1050.0);
    }

    #[test]
    fn test_axes_shift_offset() {
        let dims = calculate_view_dimensions(&ViewConfig::new(500.0, 300.0).with_axes(25.0, 50.0));
        assert_eq!(dims.plot_width, 410.0);
        assert_eq!(dims.plot_height, 235.0);
        assert_eq!(dims.x_offset, 70.0);
        assert_eq!(dims.inner_transform(), "translate(70, 20)");
    }
}
