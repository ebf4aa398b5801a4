// Derived statistics of a single series and the dashboard-wide snapshot
use super::evolution::EvolutionPoint;
use super::format::round_to;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMetrics {
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub variation: f64,
    pub variation_percent: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

/// Endpoint, spread and summary statistics of one series.
///
/// `max`, `min` and `mean` cover every point, not only the endpoints. An
/// empty series has nothing to show and yields `None`.
pub fn derive_metrics(points: &[EvolutionPoint], percent_decimals: usize) -> Option<SeriesMetrics> {
    let first = points.first()?;
    let last = points.last()?;

    let initial = first.value;
    let final_value = last.value;
    let variation = final_value - initial;
    let variation_percent = if initial == 0.0 {
        0.0
    } else {
        round_to(variation / initial * 100.0, percent_decimals)
    };

    let (mut max, mut min, mut sum) = (f64::MIN, f64::MAX, 0.0);
    for point in points {
        max = max.max(point.value);
        min = min.min(point.value);
        sum += point.value;
    }

    Some(SeriesMetrics {
        initial,
        final_value,
        variation,
        variation_percent,
        max,
        min,
        mean: sum / points.len() as f64,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopBanker {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "captacao")]
    pub inflow: f64,
}

/// Office-wide totals from `/api/metrics`, replaced wholesale on each fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(rename = "totalClientes")]
    pub total_clients: u32,
    #[serde(rename = "novosClientes")]
    pub new_clients: u32,
    #[serde(rename = "plTotal")]
    pub total_pl: f64,
    #[serde(rename = "plVariacao")]
    pub pl_variation_percent: f64,
    #[serde(rename = "captacaoPeriodo")]
    pub period_inflow: f64,
    #[serde(rename = "top3Bankers", default)]
    pub top3_bankers: Vec<TopBanker>,
    #[serde(rename = "periodoInicio", default)]
    pub period_start: Option<String>,
    #[serde(rename = "periodoFim", default)]
    pub period_end: Option<String>,
}
