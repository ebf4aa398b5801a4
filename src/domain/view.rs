// Display models handed to the rendering surface
use super::dates::{display_iso_date, Granularity};
use super::evolution::EvolutionPoint;
use super::format::tick_interval;
use super::metrics::{derive_metrics, SeriesMetrics};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    /// Zero counts as positive.
    pub fn from_variation(variation: f64) -> Self {
        if variation >= 0.0 {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }
}

/// Falls back to the raw string when the API sends something unparsable.
pub fn date_label(iso: &str, granularity: Granularity) -> String {
    display_iso_date(iso, granularity).unwrap_or_else(|e| {
        tracing::warn!("{}", e);
        iso.to_string()
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub tick_interval: usize,
    pub stats: Option<SeriesMetrics>,
}

impl ChartData {
    pub fn from_points(points: &[EvolutionPoint], ticks: usize, percent_decimals: usize) -> Self {
        let chart_points = points
            .iter()
            .map(|p| ChartPoint {
                date: p.date.clone(),
                label: date_label(&p.date, Granularity::DayMonth),
                value: p.value,
            })
            .collect();

        Self {
            points: chart_points,
            tick_interval: tick_interval(points.len(), ticks),
            stats: derive_metrics(points, percent_decimals),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCard {
    pub name: String,
    pub banker: String,
    pub email: String,
    pub initial: String,
    pub current: String,
    pub variation: f64,
    pub variation_display: String,
    pub variation_percent: String,
    pub trend: Trend,
    pub is_new: bool,
    /// First reporting day (`DD/MM/YYYY`) for clients outside the cohort.
    pub new_since: Option<String>,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankerPlCard {
    pub name: String,
    pub client_count: u32,
    pub color: Option<String>,
    pub initial: String,
    pub current: String,
    pub variation: f64,
    pub variation_display: String,
    pub variation_percent: String,
    pub trend: Trend,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankerCaptacaoCard {
    pub name: String,
    pub color: Option<String>,
    pub period: String,
    pub initial: String,
    #[serde(rename = "final")]
    pub final_value: String,
    pub variation: f64,
    pub variation_percent: String,
    pub trend: Trend,
    pub chart: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub id: String,
    pub title: String,
    pub value: String,
    pub change: Option<String>,
    pub trend: Option<Trend>,
}

impl MetricTile {
    pub fn new(id: &str, title: &str, value: String) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            value,
            change: None,
            trend: None,
        }
    }

    pub fn with_change(mut self, change: String, trend: Trend) -> Self {
        self.change = Some(change);
        self.trend = Some(trend);
        self
    }
}
