// Overview service - Metric tiles and the office-wide charts
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::domain::dates::Granularity;
use crate::domain::evolution::EvolutionPoint;
use crate::domain::format::{format_currency, format_signed, format_thousands, CurrencyScale};
use crate::domain::metrics::MetricsSnapshot;
use crate::domain::records::{CaptacaoEvolution, ClientsPl};
use crate::domain::view::{date_label, ChartData, MetricTile, Trend};
use serde::Serialize;
use std::sync::Arc;

const PERCENT_DECIMALS: usize = 2;
const CHART_TICKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopBankerRow {
    pub rank: usize,
    pub name: String,
    pub inflow: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsView {
    pub tiles: Vec<MetricTile>,
    pub top_bankers: Vec<TopBankerRow>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalPlView {
    pub chart: ChartData,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptacaoView {
    pub chart: ChartData,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRow {
    pub name: String,
    pub banker: String,
    pub email: String,
    pub pl: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientsTableView {
    pub rows: Vec<ClientRow>,
    pub last_date: Option<String>,
}

/// Each overview widget loads on its own so one failing endpoint leaves the
/// others on screen.
#[derive(Clone)]
pub struct OverviewService {
    repository: Arc<dyn DashboardRepository>,
    scale: CurrencyScale,
}

impl OverviewService {
    pub fn new(repository: Arc<dyn DashboardRepository>, scale: CurrencyScale) -> Self {
        Self { repository, scale }
    }

    pub async fn get_metrics(&self) -> Result<MetricsView, FetchError> {
        let snapshot = self.repository.metrics().await?;
        Ok(metrics_view(&snapshot, self.scale))
    }

    pub async fn get_total_pl(&self) -> Result<TotalPlView, FetchError> {
        let points = self.repository.total_pl().await?;
        Ok(total_pl_view(&points, self.scale))
    }

    pub async fn get_captacao(&self) -> Result<CaptacaoView, FetchError> {
        let evolution = self.repository.captacao_evolution().await?;
        Ok(captacao_view(&evolution, self.scale))
    }

    pub async fn get_clients_table(&self) -> Result<ClientsTableView, FetchError> {
        let clients = self.repository.clients_pl().await?;
        Ok(clients_table_view(clients))
    }
}

pub fn metrics_view(snapshot: &MetricsSnapshot, scale: CurrencyScale) -> MetricsView {
    let pl_trend = Trend::from_variation(snapshot.pl_variation_percent);

    let mut total_clients = MetricTile::new(
        "total_clients",
        "Total clients",
        snapshot.total_clients.to_string(),
    );
    if snapshot.new_clients > 0 {
        total_clients =
            total_clients.with_change(format!("+{} new", snapshot.new_clients), Trend::Positive);
    }

    let tiles = vec![
        total_clients,
        MetricTile::new("new_clients", "New clients", snapshot.new_clients.to_string()),
        MetricTile::new(
            "total_pl",
            "Total PL",
            format_currency(Some(snapshot.total_pl), scale),
        )
        .with_change(
            format!("{}%", format_signed(snapshot.pl_variation_percent, PERCENT_DECIMALS)),
            pl_trend,
        ),
        MetricTile::new(
            "period_inflow",
            "Period inflow",
            format_currency(Some(snapshot.period_inflow), scale),
        ),
    ];

    let top_bankers = snapshot
        .top3_bankers
        .iter()
        .take(3)
        .enumerate()
        .map(|(i, b)| TopBankerRow {
            rank: i + 1,
            name: b.name.clone(),
            inflow: format_currency(Some(b.inflow), scale),
        })
        .collect();

    let period = match (&snapshot.period_start, &snapshot.period_end) {
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            date_label(start, Granularity::Full),
            date_label(end, Granularity::Full)
        )),
        _ => None,
    };

    MetricsView {
        tiles,
        top_bankers,
        period,
    }
}

pub fn total_pl_view(points: &[EvolutionPoint], scale: CurrencyScale) -> TotalPlView {
    TotalPlView {
        chart: ChartData::from_points(points, CHART_TICKS, PERCENT_DECIMALS),
        latest: points.last().map(|p| format_currency(Some(p.value), scale)),
    }
}

pub fn captacao_view(evolution: &CaptacaoEvolution, scale: CurrencyScale) -> CaptacaoView {
    CaptacaoView {
        chart: ChartData::from_points(&evolution.points, CHART_TICKS, PERCENT_DECIMALS),
        total: format_currency(Some(evolution.total), scale),
    }
}

/// Largest books first.
pub fn clients_table_view(mut clients: ClientsPl) -> ClientsTableView {
    clients.clients.sort_by(|a, b| b.pl.total_cmp(&a.pl));
    ClientsTableView {
        rows: clients
            .clients
            .iter()
            .map(|c| ClientRow {
                name: c.name.clone(),
                banker: c.banker.clone(),
                email: c.email.clone(),
                pl: format_thousands(c.pl),
            })
            .collect(),
        last_date: clients
            .last_date
            .as_deref()
            .map(|d| date_label(d, Granularity::Full)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::TopBanker;
    use crate::domain::records::ClientPl;

    fn snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            total_clients: 24,
            new_clients: 3,
            total_pl: 4_234_567.0,
            pl_variation_percent: -1.256,
            period_inflow: 320_000.0,
            top3_bankers: vec![
                TopBanker {
                    name: "Bruno".to_string(),
                    inflow: 150_000.0,
                },
                TopBanker {
                    name: "Ana".to_string(),
                    inflow: 1_250_000.0,
                },
            ],
            period_start: Some("2025-12-01".to_string()),
            period_end: Some("2026-01-20".to_string()),
        }
    }

    #[test]
    fn test_metric_tiles() {
        let view = metrics_view(&snapshot(), CurrencyScale::default());
        let by_id = |id: &str| view.tiles.iter().find(|t| t.id == id).unwrap().clone();

        let clients = by_id("total_clients");
        assert_eq!(clients.value, "24");
        assert_eq!(clients.change.as_deref(), Some("+3 new"));

        let pl = by_id("total_pl");
        assert_eq!(pl.value, "$4.235M");
        assert_eq!(pl.change.as_deref(), Some("-1.26%"));
        assert_eq!(pl.trend, Some(Trend::Negative));

        assert_eq!(by_id("period_inflow").value, "$320K");
        assert_eq!(view.period.as_deref(), Some("01/12/2025 - 20/01/2026"));
    }

    #[test]
    fn test_top_bankers_keep_backend_ranking() {
        let view = metrics_view(&snapshot(), CurrencyScale::default());
        assert_eq!(view.top_bankers.len(), 2);
        assert_eq!(view.top_bankers[0].rank, 1);
        assert_eq!(view.top_bankers[0].name, "Bruno");
        assert_eq!(view.top_bankers[1].inflow, "$1.250M");
    }

    #[test]
    fn test_no_new_clients_has_no_change() {
        let mut snapshot = snapshot();
        snapshot.new_clients = 0;
        snapshot.period_end = None;
        let view = metrics_view(&snapshot, CurrencyScale::default());
        assert_eq!(view.tiles[0].change, None);
        assert_eq!(view.period, None);
    }

    #[test]
    fn test_total_pl_stats() {
        let points = vec![
            EvolutionPoint::new("2025-12-01", 4_000_000.0),
            EvolutionPoint::new("2025-12-02", 4_500_000.0),
            EvolutionPoint::new("2025-12-03", 4_200_000.0),
        ];
        let view = total_pl_view(&points, CurrencyScale::default());
        let stats = view.chart.stats.unwrap();
        assert_eq!(stats.max, 4_500_000.0);
        assert_eq!(stats.min, 4_000_000.0);
        assert!((stats.mean - 12_700_000.0 / 3.0).abs() < 1e-6);
        assert_eq!(view.latest.as_deref(), Some("$4.200M"));

        let empty = total_pl_view(&[], CurrencyScale::default());
        assert!(empty.chart.is_empty());
        assert_eq!(empty.latest, None);
    }

    #[test]
    fn test_captacao_total() {
        let view = captacao_view(
            &CaptacaoEvolution {
                points: vec![EvolutionPoint::new("2025-12-01", 10_000.0)],
                total: 87_500.0,
            },
            CurrencyScale::default(),
        );
        assert_eq!(view.total, "$88K");
        assert_eq!(view.chart.points[0].label, "01/12");
    }

    #[test]
    fn test_clients_table_sorted_by_pl() {
        let client = |name: &str, pl: f64| ClientPl {
            name: name.to_string(),
            cpf: String::new(),
            banker: "Bruno".to_string(),
            email: String::new(),
            pl,
            date: "2026-01-20".to_string(),
        };
        let view = clients_table_view(ClientsPl {
            clients: vec![client("Ana", 245_000.0), client("Caio", 512_390.0)],
            last_date: Some("2026-01-20".to_string()),
        });
        assert_eq!(view.rows[0].name, "Caio");
        assert_eq!(view.rows[0].pl, "$512,390");
        assert_eq!(view.last_date.as_deref(), Some("20/01/2026"));
    }
}
