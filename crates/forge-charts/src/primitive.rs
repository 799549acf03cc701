//! Primitive descriptors handed to the renderer, plus fills and gradient ids

use crate::{BarDescriptor, CircleDescriptor, WedgeDescriptor};
use forge_core::{ChartError, Label, LabelFormatter, ValueFormatter};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

// ============================================================================
// GRADIENTS
// ============================================================================

/// Document-unique gradient identifier.
///
/// Minted fresh on every recompute; each primitive owns its own fill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GradientId(String);

impl GradientId {
    pub fn mint() -> Self {
        Self(format!("grad{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reference usable as an SVG `fill` attribute
    pub fn url(&self) -> String {
        format!("url(#{})", self.0)
    }
}

impl fmt::Display for GradientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientOrientation {
    Vertical,
    Horizontal,
    Radial,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    /// Percent along the gradient, 0-100
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientSpec {
    pub id: GradientId,
    pub orientation: GradientOrientation,
    pub stops: Vec<GradientStop>,
}

impl GradientSpec {
    /// Single-color gradient fading from `start_opacity` to `end_opacity`
    pub fn fade(
        color: impl Into<String>,
        orientation: GradientOrientation,
        start_opacity: f64,
        end_opacity: f64,
    ) -> Self {
        let color = color.into();
        Self {
            id: GradientId::mint(),
            orientation,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: color.clone(),
                    opacity: start_opacity,
                },
                GradientStop {
                    offset: 100.0,
                    color,
                    opacity: end_opacity,
                },
            ],
        }
    }

    pub fn start_opacity(&self) -> f64 {
        self.stops.first().map_or(1.0, |s| s.opacity)
    }
}

/// How a primitive is filled
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Fill {
    Flat { color: String },
    Gradient(GradientSpec),
}

impl Fill {
    pub fn flat(color: impl Into<String>) -> Self {
        Self::Flat {
            color: color.into(),
        }
    }

    pub fn gradient_id(&self) -> Option<&GradientId> {
        match self {
            Self::Flat { .. } => None,
            Self::Gradient(spec) => Some(&spec.id),
        }
    }

    /// Value for an SVG `fill` attribute
    pub fn reference(&self) -> String {
        match self {
            Self::Flat { color } => color.clone(),
            Self::Gradient(spec) => spec.id.url(),
        }
    }
}

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Pointer policy of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvents {
    #[default]
    All,
    /// Painted but does not accept pointer input
    None,
}

/// Renderer-agnostic primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Bar(BarDescriptor),
    Circle(CircleDescriptor),
    Wedge(WedgeDescriptor),
}

impl Primitive {
    pub fn label(&self) -> &Label {
        match self {
            Self::Bar(b) => &b.label,
            Self::Circle(c) => &c.label,
            Self::Wedge(w) => &w.label,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::Bar(b) => b.active,
            Self::Circle(c) => c.active,
            Self::Wedge(w) => w.active,
        }
    }

    pub fn fill(&self) -> &Fill {
        match self {
            Self::Bar(b) => &b.fill,
            Self::Circle(c) => &c.fill,
            Self::Wedge(w) => &w.fill,
        }
    }

    /// Every gradient id this primitive references
    pub fn gradient_ids(&self) -> Vec<&GradientId> {
        let mut ids: Vec<&GradientId> = self.fill().gradient_id().into_iter().collect();
        if let Self::Circle(c) = self {
            ids.push(&c.gradient.id);
        }
        ids
    }
}

impl From<BarDescriptor> for Primitive {
    fn from(bar: BarDescriptor) -> Self {
        Self::Bar(bar)
    }
}

impl From<CircleDescriptor> for Primitive {
    fn from(circle: CircleDescriptor) -> Self {
        Self::Circle(circle)
    }
}

impl From<WedgeDescriptor> for Primitive {
    fn from(wedge: WedgeDescriptor) -> Self {
        Self::Wedge(wedge)
    }
}

// ============================================================================
// BUILD OUTPUT
// ============================================================================

/// A data point left out of the geometry because it broke a scale contract
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedPoint {
    pub index: usize,
    pub label: Label,
    pub error: ChartError,
}

/// Result of one builder pass
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput<T> {
    pub primitives: Vec<T>,
    pub rejected: Vec<RejectedPoint>,
}

impl<T> BuildOutput<T> {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn into_primitives(self) -> Vec<Primitive>
    where
        T: Into<Primitive>,
    {
        self.primitives.into_iter().map(Into::into).collect()
    }
}

impl<T> Default for BuildOutput<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TOOLTIP TEXT
// ============================================================================

/// Tooltip label/value pair: `"<series> • <label>"` and the formatted value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipText {
    pub title: String,
    pub value: String,
}

impl TooltipText {
    pub fn new(
        series_name: &Label,
        label: &Label,
        value: f64,
        labels: &dyn LabelFormatter,
        values: &dyn ValueFormatter,
    ) -> Self {
        Self {
            title: format!("{} • {}", series_name, labels.format_label(label)),
            value: values.format_value(value),
        }
    }
}
