// Bankers service - Captação and PL cards plus the comparison chart
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::application::series_aggregator::{aggregate, AggregatedTable};
use crate::domain::dates::display_period;
use crate::domain::evolution::EvolutionPoint;
use crate::domain::format::{
    format_axis_thousands, format_millions, format_percent, format_signed_axis_thousands,
};
use crate::domain::palette::banker_color;
use crate::domain::records::{BankerCaptacao, BankerEvolution};
use crate::domain::selection::MultiSelection;
use crate::domain::view::{BankerCaptacaoCard, BankerPlCard, ChartData, Trend};
use serde::Serialize;
use std::sync::Arc;

const CAPTACAO_PERCENT_DECIMALS: usize = 1;
const PL_PERCENT_DECIMALS: usize = 2;
const CARD_TICKS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptacaoComparison {
    pub selection: MultiSelection,
    pub colors: Vec<(String, Option<String>)>,
    /// Selected columns only.
    pub table: AggregatedTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankersView {
    /// PL endpoint order; drives the colors everywhere on the page.
    pub order: Vec<String>,
    pub banker_count: usize,
    pub captacao_cards: Vec<BankerCaptacaoCard>,
    pub pl_cards: Vec<BankerPlCard>,
    pub comparison: CaptacaoComparison,
}

#[derive(Clone)]
pub struct BankersService {
    repository: Arc<dyn DashboardRepository>,
}

impl BankersService {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    /// Both endpoints are requested together; either failing fails the view.
    pub async fn get_view(&self, selected: Option<&[String]>) -> Result<BankersView, FetchError> {
        let (captacao, pl) = tokio::try_join!(
            self.repository.bankers_captacao(),
            self.repository.bankers_evolution()
        )?;
        tracing::debug!(
            "Fetched {} captação and {} PL banker series",
            captacao.len(),
            pl.len()
        );
        Ok(build_view(captacao, pl, selected))
    }
}

pub fn build_view(
    mut captacao: Vec<BankerCaptacao>,
    mut pl: Vec<BankerEvolution>,
    selected: Option<&[String]>,
) -> BankersView {
    let order: Vec<String> = pl.iter().map(|b| b.name.clone()).collect();
    let comparison = comparison_chart(&captacao, &order, selected);

    captacao.sort_by(|a, b| b.final_value.total_cmp(&a.final_value));
    pl.sort_by(|a, b| b.pl_final.total_cmp(&a.pl_final));

    let captacao_cards = captacao
        .iter()
        .filter_map(|b| captacao_card(b, &order))
        .collect();
    let pl_cards = pl.iter().map(|b| pl_card(b, &order)).collect();

    BankersView {
        banker_count: pl.len(),
        order,
        captacao_cards,
        pl_cards,
        comparison,
    }
}

fn comparison_chart(
    captacao: &[BankerCaptacao],
    order: &[String],
    selected: Option<&[String]>,
) -> CaptacaoComparison {
    let series: Vec<(&str, &[EvolutionPoint])> = captacao
        .iter()
        .map(|b| (b.name.as_str(), b.evolution.as_slice()))
        .collect();
    let table = aggregate(&series, Some(order));

    let mut selection = MultiSelection::new(table.columns.iter().cloned());
    if let Some(names) = selected {
        selection.clear_all();
        for name in names {
            if !selection.is_selected(name) {
                selection.toggle(name);
            }
        }
    }

    let colors = table
        .columns
        .iter()
        .map(|name| (name.clone(), banker_color(name, order).map(str::to_string)))
        .collect();

    CaptacaoComparison {
        table: table.project(&selection),
        selection,
        colors,
    }
}

/// `None` for a banker without any inflow data; such cards are not shown.
pub fn captacao_card(banker: &BankerCaptacao, order: &[String]) -> Option<BankerCaptacaoCard> {
    let series = banker.series();
    let (first, last) = (series.first_date()?, series.last_date()?);
    let variation = banker.variation();

    Some(BankerCaptacaoCard {
        name: banker.name.clone(),
        color: banker_color(&banker.name, order).map(str::to_string),
        period: display_period(first, last).unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            format!("{} - {}", first, last)
        }),
        initial: format_axis_thousands(Some(banker.initial)),
        final_value: format_axis_thousands(Some(banker.final_value)),
        variation,
        variation_percent: format_percent(variation, banker.initial, CAPTACAO_PERCENT_DECIMALS),
        trend: Trend::from_variation(variation),
        chart: ChartData::from_points(&series.evolution, CARD_TICKS, CAPTACAO_PERCENT_DECIMALS),
    })
}

pub fn pl_card(banker: &BankerEvolution, order: &[String]) -> BankerPlCard {
    BankerPlCard {
        name: banker.name.clone(),
        client_count: banker.client_count,
        color: banker_color(&banker.name, order).map(str::to_string),
        initial: format_millions(banker.pl_initial, 2),
        current: format_millions(banker.pl_final, 2),
        variation: banker.variation,
        variation_display: format_signed_axis_thousands(banker.variation),
        variation_percent: format_percent(banker.variation, banker.pl_initial, PL_PERCENT_DECIMALS),
        trend: Trend::from_variation(banker.variation),
        chart: ChartData::from_points(&banker.evolution, CARD_TICKS, PL_PERCENT_DECIMALS),
    }
}
