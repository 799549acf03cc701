//! Bar geometry: rounded-rectangle paths grown from the value axis baseline
//!
//! Each bar is a closed outline with independently roundable corners. The
//! starting geometry collapses the bar onto its baseline so the entrance
//! transition reads as growing from the axis.

use crate::{
    chartkit::{DomainScale, Path, ScaleAdapter},
    Animated, BuildOutput, Fill, GradientOrientation, GradientSpec, RejectedPoint, TooltipText,
};
use forge_core::{
    colors, ChartError, ChartEvent, ColorMap, DataPoint, InteractionState, Label, LabelFormatter,
    ScaleType, Series, ValueFormatter,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// ORIENTATION & CORNERS
// ============================================================================

/// Direction a bar grows from its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Upward from a horizontal baseline
    #[default]
    Vertical,
    /// Rightward from a vertical baseline
    Horizontal,
}

impl From<Orientation> for GradientOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self::Vertical,
            Orientation::Horizontal => Self::Horizontal,
        }
    }
}

/// Which corners of a rectangle are rounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Corners {
    pub const NONE: Corners = Corners::new(false, false, false, false);
    pub const ALL: Corners = Corners::new(true, true, true, true);
    pub const TOP: Corners = Corners::new(true, true, false, false);
    pub const BOTTOM: Corners = Corners::new(false, false, true, true);
    pub const LEFT: Corners = Corners::new(true, false, true, false);
    pub const RIGHT: Corners = Corners::new(false, true, false, true);

    pub const fn new(
        top_left: bool,
        top_right: bool,
        bottom_left: bool,
        bottom_right: bool,
    ) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// The two corners at the growing end of a bar
    pub fn away_from_baseline(orientation: Orientation, positive: bool) -> Self {
        match (orientation, positive) {
            (Orientation::Vertical, true) => Self::TOP,
            (Orientation::Vertical, false) => Self::BOTTOM,
            (Orientation::Horizontal, true) => Self::RIGHT,
            (Orientation::Horizontal, false) => Self::LEFT,
        }
    }
}

// ============================================================================
// ROUNDED RECTANGLE
// ============================================================================

/// Closed rectangle outline with quarter-turn arcs at the selected corners.
///
/// `radius` is clamped to `[0, min(width, height) / 2]`.
pub fn rounded_rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    corners: Corners,
) -> Path {
    let max_radius = (width.min(height) / 2.0).max(0.0);
    let r = radius.max(0.0).min(max_radius);
    let corner = |set: bool| if set { r } else { 0.0 };

    let tl = corner(corners.top_left);
    let tr = corner(corners.top_right);
    let bl = corner(corners.bottom_left);
    let br = corner(corners.bottom_right);

    Path::new()
        .move_to(x + tl, y)
        .line_to(x + width - tr, y)
        .arc_to(tr, false, true, x + width, y + tr)
        .line_to(x + width, y + height - br)
        .arc_to(br, false, true, x + width - br, y + height)
        .line_to(x + bl, y + height)
        .arc_to(bl, false, true, x, y + height - bl)
        .line_to(x, y + tl)
        .arc_to(tl, false, true, x + tl, y)
        .close()
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Bar series configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub orientation: Orientation,
    /// How category labels are converted before hitting the category scale
    pub scale_type: ScaleType,
    pub round_edges: bool,
    pub radius: f64,
    pub gradient: bool,
    /// Start from the collapsed geometry on first paint
    pub animations: bool,
    /// Animate again when a recompute changes the geometry
    pub animate_updates: bool,
    /// Used when no color map is supplied
    pub color: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            scale_type: ScaleType::Ordinal,
            round_edges: true,
            radius: 5.0,
            gradient: false,
            animations: true,
            animate_updates: false,
            color: colors::DEFAULT_FILL.to_string(),
        }
    }
}

impl BarConfig {
    /// Square corners, no gradient
    pub fn flat() -> Self {
        Self {
            round_edges: false,
            ..Self::default()
        }
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::default()
        }
    }

    /// Opacity of the first gradient stop
    pub fn start_opacity(&self) -> f64 {
        if self.round_edges { 0.2 } else { 0.5 }
    }

    /// Corner radius for a bar of the given size
    pub fn radius_for(&self, width: f64, height: f64) -> f64 {
        if !self.round_edges {
            return 0.0;
        }
        self.radius.min(width / 2.0).min(height / 2.0).max(0.0).floor()
    }
}

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// One bar ready for painting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarDescriptor {
    pub label: Label,
    pub series_name: Label,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub corners: Corners,
    pub orientation: Orientation,
    pub path: Path,
    pub start_path: Path,
    pub fill: Fill,
    pub active: bool,
}

impl BarDescriptor {
    /// Click event for this bar
    pub fn select_event(&self) -> ChartEvent {
        ChartEvent::Select {
            name: self.label.clone(),
            value: self.value,
        }
    }

    pub fn tooltip(&self, labels: &dyn LabelFormatter, values: &dyn ValueFormatter) -> TooltipText {
        TooltipText::new(&self.series_name, &self.label, self.value, labels, values)
    }
}

impl Animated for BarDescriptor {
    type Geometry = Path;

    fn animation_key(&self) -> String {
        format!("{}/{}", self.series_name, self.label)
    }

    fn starting_geometry(&self) -> Path {
        self.start_path.clone()
    }

    fn target_geometry(&self) -> Path {
        self.path.clone()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds one bar per valued data point of a series
pub struct BarSeriesBuilder<'a> {
    config: &'a BarConfig,
    category: ScaleAdapter<'a>,
    value: ScaleAdapter<'a>,
    interaction: &'a InteractionState,
    colors: Option<&'a ColorMap>,
}

impl<'a> BarSeriesBuilder<'a> {
    /// `category_scale` positions bands, `value_scale` maps values to pixels
    pub fn new(
        config: &'a BarConfig,
        category_scale: &'a dyn DomainScale,
        value_scale: &'a dyn DomainScale,
        interaction: &'a InteractionState,
    ) -> Self {
        Self {
            config,
            category: ScaleAdapter::new(category_scale, config.scale_type),
            value: ScaleAdapter::linear(value_scale),
            interaction,
            colors: None,
        }
    }

    /// Color bars by label instead of the configured flat color
    pub fn with_colors(mut self, colors: &'a ColorMap) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Points with no value are skipped; points breaking a scale contract are
    /// skipped and reported in `rejected`.
    pub fn build(&self, series: &Series) -> BuildOutput<BarDescriptor> {
        let mut output = BuildOutput::new();

        for (index, point) in series.values.iter().enumerate() {
            let Some(value) = point.value else {
                continue;
            };

            match self.build_bar(series, point, value) {
                Ok(bar) => output.primitives.push(bar),
                Err(error) => {
                    tracing::warn!("Skipping bar {} of {}: {}", point.label, series.name, error);
                    output.rejected.push(RejectedPoint {
                        index,
                        label: point.label.clone(),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            "Built {} bars for {} ({} rejected)",
            output.primitives.len(),
            series.name,
            output.rejected.len()
        );
        output
    }

    fn build_bar(
        &self,
        series: &Series,
        point: &DataPoint,
        value: f64,
    ) -> Result<BarDescriptor, ChartError> {
        let lower = point.lower();
        let upper = lower + value;
        if !upper.is_finite() {
            return Err(ChartError::NonFiniteValue {
                label: point.label.to_string(),
            });
        }

        let band = self.category.apply(&point.label)?;
        let bandwidth = self.category.bandwidth();
        let base = self.value.apply_number(lower)?;
        let end = self.value.apply_number(upper)?;

        let orientation = self.config.orientation;
        let (x, y, width, height) = match orientation {
            Orientation::Vertical => (band, base.min(end), bandwidth, (base - end).abs()),
            Orientation::Horizontal => (base.min(end), band, (end - base).abs(), bandwidth),
        };

        let corners = if self.config.round_edges {
            Corners::away_from_baseline(orientation, value >= 0.0)
        } else {
            Corners::NONE
        };
        let radius = self.config.radius_for(width, height);
        let path = rounded_rect(x, y, width, height, radius, corners);

        let start_path = if self.config.animations {
            match orientation {
                Orientation::Vertical => rounded_rect(x, base, width, 0.0, radius, corners),
                Orientation::Horizontal => rounded_rect(base, y, 0.0, height, radius, corners),
            }
        } else {
            path.clone()
        };

        Ok(BarDescriptor {
            label: point.label.clone(),
            series_name: series.name.clone(),
            value,
            x,
            y,
            width,
            height,
            radius,
            corners,
            orientation,
            path,
            start_path,
            fill: self.fill_for(&point.label),
            active: self.interaction.is_active(&point.label),
        })
    }

    fn fill_for(&self, label: &Label) -> Fill {
        let color = self
            .colors
            .map_or(self.config.color.clone(), |c| c.get(&label.to_locale_string()).to_string());

        if self.config.gradient {
            Fill::Gradient(GradientSpec::fade(
                color,
                self.config.orientation.into(),
                self.config.start_opacity(),
                1.0,
            ))
        } else {
            Fill::flat(color)
        }
    }
}
