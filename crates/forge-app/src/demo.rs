//! Random chart requests for demos and smoke runs

use crate::request::{BarRequest, ChartRequest, CircleRequest, InteractionRequest, PieRequest};
use chrono::{Duration, TimeZone, Utc};
use clap::ValueEnum;
use forge_charts::{BarConfig, CircleSeriesConfig, PieChartConfig, ViewConfig};
use forge_core::{DataPoint, Label, ScaleType, Series};
use rand::{rngs::StdRng, Rng, SeedableRng};

const QUARTERS: &[&str] = &["Q1", "Q2", "Q3", "Q4"];
const COUNTRIES: &[&str] = &[
    "Germany", "France", "Spain", "Italy", "Poland", "Sweden", "Norway", "Austria", "Portugal",
    "Greece",
];
const SERIES_NAMES: &[&str] = &["Revenue", "Costs"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Bar,
    Circle,
    Pie,
}

/// Seedable generator of demo requests
pub struct DemoGenerator {
    rng: StdRng,
    volatility: f64,
}

impl DemoGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
            volatility: 0.15,
        }
    }

    pub fn request(&mut self, kind: DemoKind, points: usize) -> ChartRequest {
        let points = points.max(1);
        tracing::debug!("Generating {:?} demo with {} points", kind, points);

        match kind {
            DemoKind::Bar => ChartRequest::Bar(self.bar(points)),
            DemoKind::Circle => ChartRequest::Circle(self.circle(points)),
            DemoKind::Pie => ChartRequest::Pie(self.pie(points)),
        }
    }

    /// Random walk step around `value`
    fn walk(&mut self, value: f64) -> f64 {
        let step = (self.rng.r#gen::<f64>() - 0.5) * 2.0 * self.volatility;
        (value * (1.0 + step)).max(1.0).round()
    }

    fn bar(&mut self, points: usize) -> BarRequest {
        let mut value = self.rng.gen_range(40.0..120.0_f64).round();
        let values = (0..points)
            .map(|i| {
                value = self.walk(value);
                let year = 2020 + i / QUARTERS.len();
                DataPoint::new(format!("{} {}", QUARTERS[i % QUARTERS.len()], year), value)
            })
            .collect();

        let active = if self.rng.gen_bool(0.5) {
            vec![Label::text(format!("{} 2020", QUARTERS[0]))]
        } else {
            Vec::new()
        };

        BarRequest {
            view: ViewConfig::new(800.0, 400.0).with_axes(30.0, 50.0),
            config: BarConfig {
                gradient: self.rng.gen_bool(0.5),
                ..BarConfig::default()
            },
            series: Series::new("Sales", values),
            scheme: Some("vivid".to_string()),
            interaction: InteractionRequest {
                active,
                emphasized: None,
            },
        }
    }

    fn circle(&mut self, points: usize) -> CircleRequest {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        let dates: Vec<Label> = (0..points)
            .map(|i| Label::text((start + Duration::days(i as i64)).format("%Y-%m-%d").to_string()))
            .collect();

        let series = SERIES_NAMES
            .iter()
            .map(|name| {
                let mut value = self.rng.gen_range(20.0..80.0_f64).round();
                let values = dates
                    .iter()
                    .map(|date| {
                        value = self.walk(value);
                        DataPoint::new(date.clone(), value)
                    })
                    .collect();
                Series::new(*name, values)
            })
            .collect();

        let emphasized = dates[self.rng.gen_range(0..dates.len())].clone();

        CircleRequest {
            view: ViewConfig::new(800.0, 400.0).with_axes(30.0, 50.0),
            config: CircleSeriesConfig {
                scale_type: ScaleType::Time,
                ..CircleSeriesConfig::default()
            },
            series,
            scheme: Some("cool".to_string()),
            interaction: InteractionRequest {
                active: Vec::new(),
                emphasized: Some(emphasized),
            },
        }
    }

    fn pie(&mut self, points: usize) -> PieRequest {
        let data = COUNTRIES
            .iter()
            .take(points)
            .map(|country| {
                let value = (self.rng.gen_range(5.0..50.0_f64) * 10.0).round() / 10.0;
                DataPoint::new(*country, value)
            })
            .collect();

        PieRequest {
            config: PieChartConfig {
                labels: true,
                doughnut: self.rng.gen_bool(0.3),
                explode_slices: self.rng.gen_bool(0.3),
                ..PieChartConfig::default()
            },
            data,
            scheme: "vivid".to_string(),
            interaction: InteractionRequest::default(),
        }
    }
}
