//! Point markers for line/area series
//!
//! Markers are hidden by default and shown for the emphasized x value, or for
//! every point of a series while that series is active. Standard series also
//! get a tooltip bar joining the marker to the baseline.

use crate::{
    chartkit::{DomainScale, ScaleAdapter},
    BuildOutput, Fill, GradientOrientation, GradientSpec, PointerEvents, RejectedPoint, TooltipText,
};
use forge_core::{
    colors, ActiveEntrySet, ChartError, ChartEvent, DataPoint, InteractionState, Label,
    LabelFormatter, LocaleLabelFormatter, ScaleType, Series, SeriesType, ValueFormatter,
};
use serde::{Deserialize, Serialize};

/// Circle series configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleSeriesConfig {
    pub series_type: SeriesType,
    /// How x labels are converted before hitting the x scale
    pub scale_type: ScaleType,
    pub radius: f64,
    pub color: String,
    pub stroke_color: String,
}

impl Default for CircleSeriesConfig {
    fn default() -> Self {
        Self {
            series_type: SeriesType::Standard,
            scale_type: ScaleType::Ordinal,
            radius: 5.0,
            color: colors::DEFAULT_FILL.to_string(),
            stroke_color: colors::STROKE.to_string(),
        }
    }
}

impl CircleSeriesConfig {
    pub fn stacked() -> Self {
        Self {
            series_type: SeriesType::Stacked,
            ..Self::default()
        }
    }
}

/// Rectangle under a hovered marker, down to the baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub visible: bool,
}

/// One point marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleDescriptor {
    pub class_names: Vec<String>,
    pub index: usize,
    pub label: Label,
    pub tooltip_label: String,
    pub series_name: Label,
    pub value: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Distance from the baseline to the marker center
    pub tooltip_bar_height: f64,
    /// 1 when the label is the emphasized value, else 0
    pub opacity: f64,
    pub visible: bool,
    pub active: bool,
    pub pointer_events: PointerEvents,
    pub fill: Fill,
    pub stroke: String,
    /// Fill of the tooltip bar
    pub gradient: GradientSpec,
    /// Present for standard series only
    pub tooltip_bar: Option<TooltipBar>,
}

impl CircleDescriptor {
    /// Click event: the point's label and value
    pub fn select_event(&self) -> ChartEvent {
        ChartEvent::Select {
            name: self.label.clone(),
            value: self.value,
        }
    }

    pub fn tooltip(&self, values: &dyn ValueFormatter) -> TooltipText {
        TooltipText {
            title: format!("{} • {}", self.series_name, self.tooltip_label),
            value: values.format_value(self.value),
        }
    }

    pub fn set_tooltip_bar(&mut self, visible: bool) {
        if let Some(bar) = self.tooltip_bar.as_mut() {
            bar.visible = visible;
        }
    }

    /// Pointer entered the marker: show its bar and activate the owning series
    pub fn hover(&mut self, entries: &mut ActiveEntrySet) -> Option<ChartEvent> {
        self.set_tooltip_bar(true);
        entries.activate(self.series_name.clone())
    }

    /// Pointer left the marker
    pub fn unhover(&mut self, entries: &mut ActiveEntrySet) -> Option<ChartEvent> {
        self.set_tooltip_bar(false);
        entries.deactivate(self.series_name.clone())
    }
}

/// Builds the markers of one series
pub struct CircleSeriesBuilder<'a> {
    config: &'a CircleSeriesConfig,
    x: ScaleAdapter<'a>,
    y: ScaleAdapter<'a>,
    interaction: &'a InteractionState,
    labels: &'a dyn LabelFormatter,
}

impl<'a> CircleSeriesBuilder<'a> {
    pub fn new(
        config: &'a CircleSeriesConfig,
        x_scale: &'a dyn DomainScale,
        y_scale: &'a dyn DomainScale,
        interaction: &'a InteractionState,
    ) -> Self {
        Self {
            config,
            x: ScaleAdapter::new(x_scale, config.scale_type),
            y: ScaleAdapter::linear(y_scale),
            interaction,
            labels: &LocaleLabelFormatter,
        }
    }

    /// Swap the tooltip label formatter
    pub fn with_label_formatter(mut self, labels: &'a dyn LabelFormatter) -> Self {
        self.labels = labels;
        self
    }

    /// Points with no value are filtered out; points breaking a scale
    /// contract are skipped and reported in `rejected`.
    pub fn build(&self, series: &Series) -> BuildOutput<CircleDescriptor> {
        let mut output = BuildOutput::new();

        for (index, point) in series.values.iter().enumerate() {
            let Some(value) = point.value else {
                continue;
            };

            match self.build_circle(series, index, point, value) {
                Ok(circle) => output.primitives.push(circle),
                Err(error) => {
                    tracing::warn!("Skipping marker {} of {}: {}", point.label, series.name, error);
                    output.rejected.push(RejectedPoint {
                        index,
                        label: point.label.clone(),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            "Built {} markers for {} ({} visible)",
            output.primitives.len(),
            series.name,
            output.primitives.iter().filter(|c| c.visible).count()
        );
        output
    }

    fn build_circle(
        &self,
        series: &Series,
        index: usize,
        point: &DataPoint,
        value: f64,
    ) -> Result<CircleDescriptor, ChartError> {
        let y_value = if self.config.series_type.is_standard() {
            value
        } else {
            point.lower() + value
        };
        if !y_value.is_finite() {
            return Err(ChartError::NonFiniteValue {
                label: point.label.to_string(),
            });
        }

        let cx = self.x.apply(&point.label)?;
        let cy = self.y.apply_number(y_value)?;
        let radius = self.config.radius;
        let tooltip_bar_height = self.y.range().0 - cy;

        let opacity = if self.interaction.is_emphasized(&point.label) { 1.0 } else { 0.0 };

        // A non-empty active set overrides single-value emphasis entirely
        let visible = if self.interaction.active_entries.is_empty() {
            opacity != 0.0
        } else {
            self.interaction.is_active(&series.name)
        };

        let tooltip_bar = self.config.series_type.is_standard().then(|| TooltipBar {
            x: cx - radius,
            y: cy,
            width: radius * 2.0,
            height: tooltip_bar_height,
            visible: false,
        });

        Ok(CircleDescriptor {
            class_names: vec![format!("circle-data-{}", index)],
            index,
            label: point.label.clone(),
            tooltip_label: self.labels.format_label(&point.label),
            series_name: series.name.clone(),
            value,
            cx,
            cy,
            radius,
            tooltip_bar_height,
            opacity,
            visible,
            active: self.interaction.is_active(&point.label),
            pointer_events: if value == 0.0 {
                PointerEvents::None
            } else {
                PointerEvents::All
            },
            fill: Fill::flat(self.config.color.clone()),
            stroke: self.config.stroke_color.clone(),
            gradient: GradientSpec::fade(
                self.config.color.clone(),
                GradientOrientation::Vertical,
                0.2,
                1.0,
            ),
            tooltip_bar,
        })
    }
}
