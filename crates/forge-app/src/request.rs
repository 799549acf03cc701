//! JSON chart requests and the render pass that answers them
//!
//! A request names the chart kind, its data, configuration and interaction
//! snapshot. Scales are derived from the data; the output lists every
//! primitive plus the points that had to be left out.

use crate::error::{AppError, Result};
use forge_charts::{
    calculate_view_dimensions, pie_layout, BandScale, BarConfig, BarSeriesBuilder,
    CircleSeriesBuilder, CircleSeriesConfig, DomainScale, LinearScale, Orientation,
    PieChartConfig, Primitive, RejectedPoint, TimeScale, ViewConfig, ViewDimensions,
};
use forge_core::{
    ActiveEntrySet, ChartError, ColorResolver, DataPoint, DomainValue, InteractionState, Label,
    OrdinalPalette, ScaleType, Series,
};
use forge_state::InteractionTracker;
use serde::{Deserialize, Serialize};

/// Ticks used when rounding value domains outward
const NICE_TICKS: usize = 5;

// ============================================================================
// REQUEST TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartRequest {
    Bar(BarRequest),
    Circle(CircleRequest),
    Pie(PieRequest),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionRequest {
    /// Active entries, most recent first
    pub active: Vec<Label>,
    pub emphasized: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRequest {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub config: BarConfig,
    pub series: Series,
    /// Color bars by category from this scheme instead of the flat config color
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub interaction: InteractionRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleRequest {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub config: CircleSeriesConfig,
    pub series: Vec<Series>,
    /// Color each series from this scheme instead of the flat config color
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub interaction: InteractionRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieRequest {
    #[serde(default)]
    pub config: PieChartConfig,
    pub data: Vec<DataPoint>,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default)]
    pub interaction: InteractionRequest,
}

fn default_scheme() -> String {
    "vivid".to_string()
}

// ============================================================================
// OUTPUT
// ============================================================================

/// A left-out data point, as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedSummary {
    pub index: usize,
    pub series: Option<Label>,
    pub label: Label,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    pub width: f64,
    pub height: f64,
    /// Transform placing the primitives' origin
    pub transform: String,
    pub primitives: Vec<Primitive>,
    pub rejected: Vec<RejectedSummary>,
    pub active_entries: ActiveEntrySet,
    #[serde(skip)]
    errors: Vec<ChartError>,
}

impl RenderOutput {
    fn new(dims: &ViewDimensions, transform: String, state: &InteractionState) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            transform,
            primitives: Vec::new(),
            rejected: Vec::new(),
            active_entries: state.active_entries.clone(),
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, series: Option<&Label>, rejected: Vec<RejectedPoint>) {
        for point in rejected {
            self.rejected.push(RejectedSummary {
                index: point.index,
                series: series.cloned(),
                label: point.label,
                reason: point.error.to_string(),
            });
            self.errors.push(point.error);
        }
    }

    /// Fail with the first rejected point, if any
    pub fn into_strict(self) -> Result<Self> {
        match self.errors.first() {
            Some(error) => Err(AppError::Chart(error.clone())),
            None => Ok(self),
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

impl ChartRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bar(_) => "bar",
            Self::Circle(_) => "circle",
            Self::Pie(_) => "pie",
        }
    }

    pub fn interaction(&self) -> &InteractionRequest {
        match self {
            Self::Bar(r) => &r.interaction,
            Self::Circle(r) => &r.interaction,
            Self::Pie(r) => &r.interaction,
        }
    }

    /// One full geometry pass
    pub fn render(&self) -> Result<RenderOutput> {
        let tracker = self.interaction().tracker();
        let state = tracker.state();

        let output = match self {
            Self::Bar(r) => render_bar(r, state)?,
            Self::Circle(r) => render_circle(r, state),
            Self::Pie(r) => render_pie(r, state),
        };

        tracing::info!(
            "Rendered {} chart: {} primitives, {} rejected",
            self.kind(),
            output.primitives.len(),
            output.rejected.len()
        );
        Ok(output)
    }
}

impl InteractionRequest {
    /// Tracker replaying the requested activations, oldest first
    pub fn tracker(&self) -> InteractionTracker {
        let mut tracker = InteractionTracker::new();
        tracker.subscribe(|event| tracing::debug!("Chart event: {:?}", event));

        for entry in self.active.iter().rev() {
            tracker.activate(entry.clone());
        }
        tracker.set_emphasized(self.emphasized.clone());
        tracker
    }
}

fn render_bar(request: &BarRequest, state: &InteractionState) -> Result<RenderOutput> {
    if request.config.scale_type != ScaleType::Ordinal {
        return Err(AppError::InvalidRequest(format!(
            "bar categories need an ordinal scale, got {}",
            request.config.scale_type
        )));
    }

    let dims = calculate_view_dimensions(&request.view);
    let series = std::slice::from_ref(&request.series);
    let (category_range, value_range) = match request.config.orientation {
        Orientation::Vertical => ((0.0, dims.plot_width), (dims.plot_height, 0.0)),
        Orientation::Horizontal => ((0.0, dims.plot_height), (0.0, dims.plot_width)),
    };

    let category =
        BandScale::new(distinct_labels(series)).range(category_range.0, category_range.1);
    let (lo, hi) = value_bounds(series, true);
    let value = LinearScale::new()
        .domain(lo, hi)
        .nice(NICE_TICKS)
        .range(value_range.0, value_range.1);

    let colors = request.scheme.as_deref().map(|scheme| {
        let domain: Vec<String> = category
            .domain_labels()
            .iter()
            .map(Label::to_locale_string)
            .collect();
        OrdinalPalette::named(scheme).resolve(&domain, ScaleType::Ordinal, &[])
    });

    let mut builder = BarSeriesBuilder::new(&request.config, &category, &value, state);
    if let Some(colors) = colors.as_ref() {
        builder = builder.with_colors(colors);
    }
    let built = builder.build(&request.series);

    let mut output = RenderOutput::new(&dims, dims.inner_transform(), state);
    output.reject(Some(&request.series.name), built.rejected.clone());
    output.primitives = built.into_primitives();
    Ok(output)
}

fn render_circle(request: &CircleRequest, state: &InteractionState) -> RenderOutput {
    let dims = calculate_view_dimensions(&request.view);
    let labels = distinct_labels(&request.series);
    let x = x_scale(&labels, request.config.scale_type, (0.0, dims.plot_width));

    let stacked = !request.config.series_type.is_standard();
    let (lo, hi) = value_bounds(&request.series, stacked);
    let y = LinearScale::new()
        .domain(lo, hi)
        .nice(NICE_TICKS)
        .range(dims.plot_height, 0.0);

    let names: Vec<String> = request.series.iter().map(|s| s.name.to_locale_string()).collect();
    let colors = request
        .scheme
        .as_deref()
        .map(|scheme| OrdinalPalette::named(scheme).resolve(&names, ScaleType::Ordinal, &[]));

    let mut output = RenderOutput::new(&dims, dims.inner_transform(), state);
    for (series, name) in request.series.iter().zip(&names) {
        let mut config = request.config.clone();
        if let Some(colors) = colors.as_ref() {
            config.color = colors.get(name).to_string();
        }

        let built = CircleSeriesBuilder::new(&config, x.as_ref(), &y, state).build(series);
        output.reject(Some(&series.name), built.rejected.clone());
        output.primitives.extend(built.into_primitives());
    }
    output
}

fn render_pie(request: &PieRequest, state: &InteractionState) -> RenderOutput {
    let palette = OrdinalPalette::named(&request.scheme);
    let layout = pie_layout(&request.config, &request.data, &palette);
    let built = layout.wedges(&request.config, state);

    let mut output = RenderOutput::new(&layout.dims, layout.transform(), state);
    output.reject(None, built.rejected.clone());
    output.primitives = built.into_primitives();
    output
}

// ============================================================================
// SCALE SETUP
// ============================================================================

/// Labels of all series, first-seen order, duplicates removed
fn distinct_labels(series: &[Series]) -> Vec<Label> {
    let mut labels: Vec<Label> = Vec::new();
    for point in series.iter().flat_map(|s| &s.values) {
        if !labels.contains(&point.label) {
            labels.push(point.label.clone());
        }
    }
    labels
}

/// Value extent including zero; stacked series extend from baseline to upper bound
fn value_bounds(series: &[Series], stacked: bool) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| &s.values)
        .filter_map(|p| {
            let value = p.value?;
            let lower = if stacked { p.lower() } else { 0.0 };
            Some([lower, lower + value])
        })
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if hi > lo { (lo, hi) } else { (0.0, 1.0) }
}

fn x_scale(labels: &[Label], scale_type: ScaleType, range: (f64, f64)) -> Box<dyn DomainScale> {
    let normalized = labels.iter().filter_map(|l| l.normalize(scale_type).ok());

    match scale_type {
        ScaleType::Ordinal => Box::new(BandScale::point(labels.to_vec()).range(range.0, range.1)),
        ScaleType::Linear => {
            let (lo, hi) = normalized
                .filter_map(|v| match v {
                    DomainValue::Number(n) => Some(n),
                    _ => None,
                })
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| (lo.min(n), hi.max(n)));
            let (lo, hi) = if lo <= hi { (lo, hi) } else { (0.0, 1.0) };
            Box::new(LinearScale::new().domain(lo, hi).range(range.0, range.1))
        }
        ScaleType::Time => {
            let millis: Vec<i64> = normalized
                .filter_map(|v| match v {
                    DomainValue::Time(t) => Some(t.timestamp_millis()),
                    _ => None,
                })
                .collect();
            let lo = millis.iter().copied().min().unwrap_or(0);
            let hi = millis.iter().copied().max().unwrap_or(0);
            Box::new(TimeScale::new().domain(lo, hi).range(range.0, range.1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const BAR_REQUEST: &str = r#"{
        "kind": "bar",
        "view": { "width": 440, "height": 240 },
        "series": {
            "name": "Sales",
            "series": [
                { "name": "Q1", "value": 40 },
                { "name": "Q2", "value": 20 },
                { "name": "Q3" },
                { "name": "Q4", "value": 10 }
            ]
        },
        "interaction": { "active": ["Q2"] }
    }"#;

    #[test]
    fn test_bar_request_renders() {
        let request = ChartRequest::from_json(BAR_REQUEST).unwrap();
        assert_eq!(request.kind(), "bar");

        let output = request.render().unwrap();
        assert_eq!(output.primitives.len(), 3);
        assert!(output.rejected.is_empty());
        assert_eq!(output.transform, "translate(20, 20)");

        let active: Vec<bool> = output.primitives.iter().map(Primitive::is_active).collect();
        assert_eq!(active, vec![false, true, false]);
    }

    #[test]
    fn test_bar_value_axis_starts_at_zero() {
        let request = ChartRequest::from_json(BAR_REQUEST).unwrap();
        let output = request.render().unwrap();

        let Primitive::Bar(tallest) = &output.primitives[0] else {
            panic!("expected a bar");
        };
        // Plot is 200px high and the value domain is 0..40
        assert_approx_eq!(f64, tallest.y, 0.0);
        assert_approx_eq!(f64, tallest.height, 200.0);
    }

    #[test]
    fn test_bar_rejects_continuous_categories() {
        let json = BAR_REQUEST.replace(
            r#""kind": "bar","#,
            r#""kind": "bar", "config": { "scale_type": "linear" },"#,
        );
        let request = ChartRequest::from_json(&json).unwrap();
        assert!(matches!(request.render(), Err(AppError::InvalidRequest(_))));
    }

    #[test]
    fn test_circle_request_with_bad_date() {
        let json = r#"{
            "kind": "circle",
            "config": { "scale_type": "time" },
            "series": [{
                "name": "Visits",
                "series": [
                    { "name": "2024-01-01", "value": 3 },
                    { "name": "2024-01-03", "value": 5 },
                    { "name": "yesterday", "value": 4 }
                ]
            }],
            "interaction": { "emphasized": "2024-01-03" }
        }"#;
        let request = ChartRequest::from_json(json).unwrap();
        let output = request.render().unwrap();

        assert_eq!(output.primitives.len(), 2);
        assert_eq!(output.rejected.len(), 1);
        assert_eq!(output.rejected[0].label, Label::text("yesterday"));
        assert_eq!(output.rejected[0].series, Some(Label::text("Visits")));
        assert!(request.render().unwrap().into_strict().is_err());
    }

    #[test]
    fn test_unknown_scale_tag_is_ordinal() {
        let json = r#"{
            "kind": "circle",
            "config": { "scale_type": "band" },
            "series": [{ "name": "s", "series": [{ "name": "a", "value": 1 }] }]
        }"#;
        let ChartRequest::Circle(request) = ChartRequest::from_json(json).unwrap() else {
            panic!("expected a circle request");
        };
        assert_eq!(request.config.scale_type, ScaleType::Ordinal);
    }

    #[test]
    fn test_pie_request() {
        let json = r#"{
            "kind": "pie",
            "config": { "width": 400, "height": 300, "doughnut": true },
            "data": [
                { "name": "B", "value": 2 },
                { "name": "A", "value": 1 },
                { "name": "B", "value": 1 }
            ]
        }"#;
        let output = ChartRequest::from_json(json)
            .unwrap()
            .render()
            .unwrap()
            .into_strict()
            .unwrap();

        assert_eq!(output.primitives.len(), 3);
        assert_eq!(output.transform, "translate(200, 150)");
        let Primitive::Wedge(first) = &output.primitives[0] else {
            panic!("expected a wedge");
        };
        assert_eq!(first.inner_radius, 97.5);
    }

    #[test]
    fn test_tracker_replays_activation_order() {
        let interaction = InteractionRequest {
            active: vec![Label::text("B"), Label::text("A")],
            emphasized: None,
        };
        let tracker = interaction.tracker();
        assert_eq!(
            tracker.state().active_entries.as_slice(),
            &[Label::text("B"), Label::text("A")]
        );
    }

    #[test]
    fn test_value_bounds() {
        let series = vec![Series::new(
            "s",
            vec![DataPoint::new("a", -5.0), DataPoint::new("b", 10.0).with_baseline(5.0)],
        )];
        assert_eq!(value_bounds(&series, true), (-5.0, 15.0));
        assert_eq!(value_bounds(&series, false), (-5.0, 10.0));
        assert_eq!(value_bounds(&[], false), (0.0, 1.0));
    }
}
