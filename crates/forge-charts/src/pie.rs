//! Pie and doughnut layout
//!
//! Layout resolves the plot area, radii, label domain and colors; wedges are
//! then laid out clockwise from 12 o'clock in domain order.

use crate::{
    calculate_view_dimensions, chartkit::Path, Animated, BuildOutput, ChartMargin, Fill,
    GradientOrientation, GradientSpec, LegendReservation, RejectedPoint, TooltipText, ViewConfig,
    ViewDimensions,
};
use forge_core::{
    ActiveEntrySet, ChartError, ChartEvent, ColorMap, ColorResolver, CustomColor, DataPoint,
    InteractionState, Label, ScaleType, ValueFormatter,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Inner radius as a share of the outer radius in doughnut mode
pub const DOUGHNUT_RATIO: f64 = 0.75;

/// Outside labels sit on an arc this many times the outer radius
pub const LABEL_FACTOR: f64 = 1.5;

const ANGLE_EPSILON: f64 = 1e-9;

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartConfig {
    pub width: f64,
    pub height: f64,
    /// Outside labels with leader lines
    pub labels: bool,
    pub show_legend: bool,
    /// Grid columns kept by the plot when the legend is shown
    pub legend_columns: u8,
    pub explode_slices: bool,
    pub doughnut: bool,
    pub gradient: bool,
    pub animations: bool,
    pub custom_colors: Vec<CustomColor>,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            labels: false,
            show_legend: false,
            legend_columns: 10,
            explode_slices: false,
            doughnut: false,
            gradient: false,
            animations: true,
            custom_colors: Vec::new(),
        }
    }
}

impl PieChartConfig {
    pub fn doughnut() -> Self {
        Self {
            doughnut: true,
            ..Self::default()
        }
    }

    pub fn margin(&self) -> ChartMargin {
        if self.labels {
            ChartMargin::labeled()
        } else {
            ChartMargin::standard()
        }
    }

    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            width: self.width,
            height: self.height,
            margin: self.margin(),
            show_legend: self.show_legend,
            legend: LegendReservation::Columns(self.legend_columns),
            x_axis_height: None,
            y_axis_width: None,
        }
    }
}

// ============================================================================
// LAYOUT HELPERS
// ============================================================================

/// First-seen, de-duplicated display strings of the data labels
pub fn pie_domain(results: &[DataPoint]) -> Vec<String> {
    let mut domain: Vec<String> = Vec::new();
    for point in results {
        let name = point.label.to_locale_string();
        if !domain.contains(&name) {
            domain.push(name);
        }
    }
    domain
}

/// Stable sort of the data by the domain position of each label
pub fn sort_by_domain(results: &[DataPoint], domain: &[String]) -> Vec<DataPoint> {
    let mut sorted = results.to_vec();
    sorted.sort_by_key(|p| {
        let name = p.label.to_locale_string();
        domain.iter().position(|d| *d == name).unwrap_or(domain.len())
    });
    sorted
}

pub fn outer_radius(dims: &ViewDimensions, labels: bool) -> f64 {
    let min = dims.plot_width.min(dims.plot_height);
    if labels { min / 3.0 } else { min / 2.0 }
}

pub fn inner_radius(outer: f64, doughnut: bool) -> f64 {
    if doughnut { outer * DOUGHNUT_RATIO } else { 0.0 }
}

/// Point at `radius` along `angle`, measured clockwise from 12 o'clock
fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), -radius * angle.cos())
}

/// Annular sector outline centered on the origin.
///
/// Zero sweep collapses to a radial segment; a full turn is drawn as two half
/// arcs so the outline stays well formed.
pub fn arc_path(inner: f64, outer: f64, start: f64, end: f64) -> Path {
    let sweep = end - start;
    let (ox0, oy0) = polar(outer, start);
    let (ix0, iy0) = polar(inner, start);

    if sweep <= ANGLE_EPSILON {
        return Path::new().move_to(ox0, oy0).line_to(ix0, iy0).close();
    }

    if sweep >= TAU - ANGLE_EPSILON {
        let (ox1, oy1) = polar(outer, start + PI);
        let mut path = Path::new()
            .move_to(ox0, oy0)
            .arc_to(outer, false, true, ox1, oy1)
            .arc_to(outer, false, true, ox0, oy0);
        if inner > 0.0 {
            let (ix1, iy1) = polar(inner, start + PI);
            path = path
                .move_to(ix0, iy0)
                .arc_to(inner, false, false, ix1, iy1)
                .arc_to(inner, false, false, ix0, iy0);
        }
        return path.close();
    }

    let large_arc = sweep > PI;
    let (ox1, oy1) = polar(outer, end);
    let path = Path::new()
        .move_to(ox0, oy0)
        .arc_to(outer, large_arc, true, ox1, oy1);

    if inner > 0.0 {
        let (ix1, iy1) = polar(inner, end);
        path.line_to(ix1, iy1)
            .arc_to(inner, large_arc, false, ix0, iy0)
            .close()
    } else {
        path.line_to(0.0, 0.0).close()
    }
}

// ============================================================================
// WEDGE DESCRIPTOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    End,
}

/// Outside label of a wedge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WedgeLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub text_anchor: TextAnchor,
    /// Line from the wedge edge to the label
    pub leader: Path,
}

/// One pie wedge, coordinates relative to the pie center.
///
/// Pie data is a single series whose entries are the slices, so a wedge's
/// series name is its own display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WedgeDescriptor {
    pub label: Label,
    pub display_label: String,
    pub series_name: String,
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub path: Path,
    pub start_path: Path,
    pub fill: Fill,
    pub active: bool,
    pub label_position: Option<WedgeLabel>,
}

impl WedgeDescriptor {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn select_event(&self) -> ChartEvent {
        ChartEvent::Select {
            name: self.label.clone(),
            value: self.value,
        }
    }

    pub fn tooltip(&self, values: &dyn ValueFormatter) -> TooltipText {
        TooltipText {
            title: self.display_label.clone(),
            value: values.format_value(self.value),
        }
    }

    /// Pointer entered the wedge
    pub fn hover(&self, entries: &mut ActiveEntrySet) -> Option<ChartEvent> {
        entries.activate(self.label.clone())
    }

    pub fn unhover(&self, entries: &mut ActiveEntrySet) -> Option<ChartEvent> {
        entries.deactivate(self.label.clone())
    }
}

impl Animated for WedgeDescriptor {
    type Geometry = Path;

    fn animation_key(&self) -> String {
        self.display_label.clone()
    }

    fn starting_geometry(&self) -> Path {
        self.start_path.clone()
    }

    fn target_geometry(&self) -> Path {
        self.path.clone()
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Resolved pie layout for one pass
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub dims: ViewDimensions,
    /// Pie center in chart coordinates
    pub translation: (f64, f64),
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub domain: Vec<String>,
    /// Data sorted by domain index
    pub data: Vec<DataPoint>,
    pub colors: ColorMap,
}

impl PieLayout {
    pub fn new(
        config: &PieChartConfig,
        results: &[DataPoint],
        resolver: &dyn ColorResolver,
    ) -> Self {
        let dims = calculate_view_dimensions(&config.view_config());
        let outer = outer_radius(&dims, config.labels);
        let domain = pie_domain(results);
        let data = sort_by_domain(results, &domain);
        let colors = resolver.resolve(&domain, ScaleType::Ordinal, &config.custom_colors);

        tracing::debug!(
            "Pie layout {}x{}: {} slices, outer radius {}",
            dims.plot_width,
            dims.plot_height,
            domain.len(),
            outer
        );

        Self {
            translation: (
                dims.margin.left + dims.plot_width / 2.0,
                dims.margin.top + dims.plot_height / 2.0,
            ),
            outer_radius: outer,
            inner_radius: inner_radius(outer, config.doughnut),
            dims,
            domain,
            data,
            colors,
        }
    }

    /// SVG transform moving the origin to the pie center
    pub fn transform(&self) -> String {
        format!("translate({}, {})", self.translation.0, self.translation.1)
    }

    /// Lay the wedges out in data order.
    ///
    /// Missing values are skipped, non-finite ones rejected, and values at or
    /// below zero get a zero sweep.
    pub fn wedges(
        &self,
        config: &PieChartConfig,
        interaction: &InteractionState,
    ) -> BuildOutput<WedgeDescriptor> {
        let mut output = BuildOutput::new();

        let mut valued = Vec::new();
        for (index, point) in self.data.iter().enumerate() {
            match point.value {
                None => continue,
                Some(v) if v.is_finite() => valued.push((point, v)),
                Some(_) => {
                    let error = ChartError::NonFiniteValue {
                        label: point.label.to_string(),
                    };
                    tracing::warn!("Skipping wedge {}: {}", point.label, error);
                    output.rejected.push(RejectedPoint {
                        index,
                        label: point.label.clone(),
                        error,
                    });
                }
            }
        }

        let total: f64 = valued.iter().map(|(_, v)| v.max(0.0)).sum();
        let max = valued.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let explode = config.explode_slices && self.inner_radius == 0.0 && max > 0.0;

        let mut angle = 0.0;
        for (point, value) in valued {
            let sweep = if total > 0.0 { value.max(0.0) / total * TAU } else { 0.0 };
            let (start, end) = (angle, angle + sweep);
            angle = end;

            let outer = if explode {
                self.outer_radius * value.max(0.0) / max
            } else {
                self.outer_radius
            };
            output
                .primitives
                .push(self.wedge(config, interaction, point, value, start, end, outer));
        }

        tracing::debug!("Built {} wedges", output.primitives.len());
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn wedge(
        &self,
        config: &PieChartConfig,
        interaction: &InteractionState,
        point: &DataPoint,
        value: f64,
        start: f64,
        end: f64,
        outer: f64,
    ) -> WedgeDescriptor {
        let display_label = point.label.to_locale_string();
        let color = self.colors.get(&display_label).to_string();
        let fill = if config.gradient {
            Fill::Gradient(GradientSpec::fade(color, GradientOrientation::Radial, 0.5, 1.0))
        } else {
            Fill::flat(color)
        };

        let label_position = (config.labels && end - start > ANGLE_EPSILON)
            .then(|| self.outside_label(&display_label, (start + end) / 2.0));

        WedgeDescriptor {
            label: point.label.clone(),
            value,
            start_angle: start,
            end_angle: end,
            inner_radius: self.inner_radius,
            outer_radius: outer,
            path: arc_path(self.inner_radius, outer, start, end),
            start_path: arc_path(self.inner_radius, outer, start, start),
            fill,
            active: is_active_slice(&interaction.active_entries, &display_label),
            label_position,
            series_name: display_label.clone(),
            display_label,
        }
    }

    fn outside_label(&self, text: &str, mid: f64) -> WedgeLabel {
        let label_radius = self.outer_radius * LABEL_FACTOR;
        let right_side = mid < PI;

        let (ex, ey) = polar(self.outer_radius, mid);
        let (cx, cy) = polar(label_radius, mid);
        let x = if right_side { label_radius } else { -label_radius };

        WedgeLabel {
            text: text.to_string(),
            x,
            y: cy,
            text_anchor: if right_side { TextAnchor::Start } else { TextAnchor::End },
            leader: Path::new().move_to(ex, ey).line_to(cx, cy).line_to(x, cy),
        }
    }
}

/// Slices are matched by display string so legend entries (text) and raw
/// date or number labels select the same wedge
fn is_active_slice(entries: &ActiveEntrySet, display_label: &str) -> bool {
    entries.iter().any(|e| e.to_locale_string() == display_label)
}

/// Layout for `results` with `config`, colors from `resolver`
pub fn pie_layout(
    config: &PieChartConfig,
    results: &[DataPoint],
    resolver: &dyn ColorResolver,
) -> PieLayout {
    PieLayout::new(config, results, resolver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathSegment;
    use chrono::{TimeZone, Utc};
    use float_cmp::assert_approx_eq;
    use forge_core::OrdinalPalette;
    use std::collections::HashSet;

    fn results() -> Vec<DataPoint> {
        vec![
            DataPoint::new("Germany", 40.0),
            DataPoint::new("France", 30.0),
            DataPoint::new("Spain", 20.0),
            DataPoint::new("Italy", 10.0),
        ]
    }

    fn config() -> PieChartConfig {
        PieChartConfig {
            width: 400.0,
            height: 300.0,
            ..PieChartConfig::default()
        }
    }

    #[test]
    fn test_domain_first_seen_dedup() {
        let data = vec![
            DataPoint::new("B", 1.0),
            DataPoint::new("A", 2.0),
            DataPoint::new("B", 3.0),
            DataPoint::new("C", 4.0),
        ];
        assert_eq!(pie_domain(&data), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_domain_uses_locale_strings() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let data = vec![DataPoint::new(date, 1.0), DataPoint::new(1234.0, 2.0)];
        assert_eq!(pie_domain(&data), vec!["3/9/2024", "1,234"]);
    }

    #[test]
    fn test_sort_by_domain_is_stable() {
        let data = vec![
            DataPoint::new("B", 1.0),
            DataPoint::new("A", 2.0),
            DataPoint::new("B", 3.0),
        ];
        let domain = pie_domain(&data);
        let sorted = sort_by_domain(&data, &domain);
        let values: Vec<Option<f64>> = sorted.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(1.0), Some(3.0), Some(2.0)]);
    }

    #[test]
    fn test_radii() {
        let dims = calculate_view_dimensions(&ViewConfig::new(240.0, 340.0));
        assert_eq!(outer_radius(&dims, false), 100.0);
        assert_approx_eq!(f64, outer_radius(&dims, true), 200.0 / 3.0);
        assert_eq!(inner_radius(100.0, true), 75.0);
        assert_eq!(inner_radius(100.0, false), 0.0);
    }

    #[test]
    fn test_layout_centers_pie() {
        let layout = pie_layout(&config(), &results(), &OrdinalPalette::default());
        assert_eq!(layout.dims.plot_width, 360.0);
        assert_eq!(layout.dims.plot_height, 260.0);
        assert_eq!(layout.outer_radius, 130.0);
        assert_eq!(layout.translation, (200.0, 150.0));
        assert_eq!(layout.transform(), "translate(200, 150)");
    }

    #[test]
    fn test_layout_with_labels_and_legend() {
        let config = PieChartConfig {
            width: 600.0,
            labels: true,
            show_legend: true,
            ..config()
        };
        let layout = pie_layout(&config, &results(), &OrdinalPalette::default());
        assert_eq!(layout.dims.margin, ChartMargin::labeled());
        assert_eq!(layout.dims.plot_width, 340.0);
        assert_eq!(layout.dims.plot_height, 240.0);
        assert_eq!(layout.outer_radius, 80.0);
    }

    #[test]
    fn test_custom_colors_override_palette() {
        let config = PieChartConfig {
            custom_colors: vec![CustomColor::new("Spain", "#123456")],
            ..config()
        };
        let layout = pie_layout(&config, &results(), &OrdinalPalette::default());
        assert_eq!(layout.colors.get("Spain"), "#123456");
        assert_eq!(layout.colors.len(), 4);
    }

    #[test]
    fn test_wedge_angles_cover_full_turn() {
        let layout = pie_layout(&config(), &results(), &OrdinalPalette::default());
        let wedges = layout.wedges(&config(), &InteractionState::new()).primitives;

        assert_eq!(wedges.len(), 4);
        assert_eq!(wedges[0].start_angle, 0.0);
        assert_approx_eq!(f64, wedges[0].end_angle, TAU * 0.4, epsilon = 1e-12);
        for pair in wedges.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert_approx_eq!(f64, wedges[3].end_angle, TAU, epsilon = 1e-12);
        assert!(wedges.iter().all(|w| w.path.is_finite()));
    }

    #[test]
    fn test_zero_and_missing_values() {
        let data = vec![
            DataPoint::new("a", 10.0),
            DataPoint::new("b", 0.0),
            DataPoint::missing("c"),
        ];
        let layout = pie_layout(&config(), &data, &OrdinalPalette::default());
        let wedges = layout.wedges(&config(), &InteractionState::new()).primitives;

        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[1].start_angle, wedges[1].end_angle);
        assert_eq!(wedges[1].path.len(), 3);
    }

    #[test]
    fn test_non_finite_value_rejected() {
        let data = vec![DataPoint::new("a", 10.0), DataPoint::new("b", f64::NAN)];
        let layout = pie_layout(&config(), &data, &OrdinalPalette::default());
        let output = layout.wedges(&config(), &InteractionState::new());

        assert_eq!(output.len(), 1);
        assert_eq!(output.rejected.len(), 1);
        assert_eq!(output.rejected[0].label, Label::text("b"));
    }

    #[test]
    fn test_explode_slices_scales_radius() {
        let config = PieChartConfig {
            explode_slices: true,
            ..config()
        };
        let data = vec![DataPoint::new("a", 10.0), DataPoint::new("b", 5.0)];
        let layout = pie_layout(&config, &data, &OrdinalPalette::default());
        let wedges = layout.wedges(&config, &InteractionState::new()).primitives;

        assert_eq!(wedges[0].outer_radius, 130.0);
        assert_eq!(wedges[1].outer_radius, 65.0);

        // No explosion for doughnuts
        let doughnut = PieChartConfig {
            doughnut: true,
            ..config
        };
        let layout = pie_layout(&doughnut, &data, &OrdinalPalette::default());
        let wedges = layout.wedges(&doughnut, &InteractionState::new()).primitives;
        assert!(wedges.iter().all(|w| w.outer_radius == 130.0));
        assert!(wedges.iter().all(|w| w.inner_radius == 97.5));
    }

    #[test]
    fn test_single_wedge_is_full_circle() {
        let data = vec![DataPoint::new("only", 3.0)];
        let layout = pie_layout(&config(), &data, &OrdinalPalette::default());
        let wedge = &layout.wedges(&config(), &InteractionState::new()).primitives[0];

        let arcs = wedge
            .path
            .segments()
            .iter()
            .filter(|s| matches!(s, PathSegment::ArcTo { .. }))
            .count();
        assert_eq!(arcs, 2);
        assert!(wedge.path.is_finite());
    }

    #[test]
    fn test_arc_path_quarter() {
        let path = arc_path(0.0, 10.0, 0.0, PI / 2.0);
        match path.segments() {
            [
                PathSegment::MoveTo { x, y },
                PathSegment::ArcTo {
                    large_arc,
                    sweep,
                    x: ax,
                    y: ay,
                    ..
                },
                PathSegment::LineTo { .. },
                PathSegment::Close,
            ] => {
                assert_approx_eq!(f64, *x, 0.0);
                assert_approx_eq!(f64, *y, -10.0);
                assert!(!*large_arc);
                assert!(*sweep);
                assert_approx_eq!(f64, *ax, 10.0);
                assert_approx_eq!(f64, *ay, 0.0, epsilon = 1e-12);
            }
            other => panic!("unexpected segments {:?}", other),
        }
    }

    #[test]
    fn test_outside_labels() {
        let config = PieChartConfig {
            labels: true,
            ..config()
        };
        let data = vec![DataPoint::new("right", 1.0), DataPoint::new("left", 1.0)];
        let layout = pie_layout(&config, &data, &OrdinalPalette::default());
        let wedges = layout.wedges(&config, &InteractionState::new()).primitives;

        let right = wedges[0].label_position.as_ref().unwrap();
        let left = wedges[1].label_position.as_ref().unwrap();
        assert_eq!(right.text_anchor, TextAnchor::Start);
        assert_eq!(left.text_anchor, TextAnchor::End);
        assert_approx_eq!(f64, right.x, layout.outer_radius * LABEL_FACTOR);
        assert_approx_eq!(f64, left.x, -layout.outer_radius * LABEL_FACTOR);
        assert_eq!(right.leader.len(), 3);
    }

    #[test]
    fn test_gradient_and_active_flags() {
        let config = PieChartConfig {
            gradient: true,
            ..config()
        };
        let layout = pie_layout(&config, &results(), &OrdinalPalette::default());
        let state = InteractionState::new()
            .with_active(vec![Label::text("France")].into_iter().collect());
        let wedges = layout.wedges(&config, &state).primitives;

        let ids: HashSet<String> = wedges
            .iter()
            .filter_map(|w| w.fill.gradient_id())
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids.len(), 4);

        let active: Vec<bool> = wedges.iter().map(|w| w.active).collect();
        assert_eq!(active, vec![false, true, false, false]);
    }

    #[test]
    fn test_hover_events() {
        let layout = pie_layout(&config(), &results(), &OrdinalPalette::default());
        let wedges = layout.wedges(&config(), &InteractionState::new()).primitives;
        let mut entries = ActiveEntrySet::new();

        assert!(wedges[0].hover(&mut entries).is_some());
        assert!(wedges[0].hover(&mut entries).is_none());
        assert!(wedges[1].hover(&mut entries).is_some());
        assert_eq!(entries.as_slice()[0], Label::text("France"));

        match wedges[0].unhover(&mut entries) {
            Some(ChartEvent::Deactivate { entries, .. }) => {
                assert_eq!(entries.as_slice(), &[Label::text("France")]);
            }
            other => panic!("expected deactivate, got {:?}", other),
        }
    }

    #[test]
    fn test_active_matches_display_string() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let data = vec![DataPoint::new(date, 1.0), DataPoint::new(1234.0, 2.0)];
        let layout = pie_layout(&config(), &data, &OrdinalPalette::default());

        // Legend entries arrive as display text
        let legend = InteractionState::new()
            .with_active(vec![Label::text("3/9/2024")].into_iter().collect());
        let wedges = layout.wedges(&config(), &legend).primitives;
        assert_eq!(wedges.iter().map(|w| w.active).collect::<Vec<_>>(), vec![true, false]);

        // Hovering activates the raw label, which still matches
        let mut entries = ActiveEntrySet::new();
        wedges[1].hover(&mut entries);
        let hovered = InteractionState::new().with_active(entries);
        let wedges = layout.wedges(&config(), &hovered).primitives;
        assert_eq!(wedges.iter().map(|w| w.active).collect::<Vec<_>>(), vec![false, true]);
        assert_eq!(wedges[1].series_name, "1,234");
    }

    #[test]
    fn test_repeated_labels_each_get_an_entrance() {
        let data = vec![
            DataPoint::new("B", 1.0),
            DataPoint::new("A", 2.0),
            DataPoint::new("B", 3.0),
            DataPoint::new("C", 4.0),
        ];
        let layout = pie_layout(&config(), &data, &OrdinalPalette::default());
        let wedges = layout.wedges(&config(), &InteractionState::new()).primitives;
        assert_eq!(wedges.len(), 4);

        let mut controller = crate::EntranceController::new(false);
        let transitions = controller.sync_animated(&wedges);
        assert_eq!(transitions.len(), wedges.len());
        assert_eq!(controller.len(), 4);
        assert!(transitions.iter().all(|(_, t)| !t.is_noop()));
        assert_eq!(
            controller.get("B").unwrap().phase(),
            crate::AnimationPhase::Entering
        );
    }
}
