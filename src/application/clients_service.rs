// Clients service - Per-client PL cards with banker and cohort filters
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::domain::dates::Granularity;
use crate::domain::format::{format_percent, format_signed_thousands, format_thousands};
use crate::domain::records::ClientEvolution;
use crate::domain::selection::{is_new_entity, SingleSelection};
use crate::domain::view::{date_label, ChartData, ClientCard, Trend};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

const PERCENT_DECIMALS: usize = 2;
const CHART_TICKS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientsView {
    /// Dropdown entries, sorted.
    pub bankers: Vec<String>,
    pub selected_banker: Option<String>,
    pub only_new: bool,
    pub cards: Vec<ClientCard>,
    pub shown: usize,
    pub total: usize,
    pub empty_message: Option<String>,
}

/// Banker dropdown and "new clients only" toggle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientsFilter {
    pub banker: Option<String>,
    pub only_new: bool,
}

#[derive(Clone)]
pub struct ClientsService {
    repository: Arc<dyn DashboardRepository>,
    reference_date: String,
}

impl ClientsService {
    pub fn new(repository: Arc<dyn DashboardRepository>, reference_date: String) -> Self {
        Self {
            repository,
            reference_date,
        }
    }

    pub async fn get_view(&self, filter: &ClientsFilter) -> Result<ClientsView, FetchError> {
        let clients = self.repository.clients_evolution().await?;
        tracing::debug!("Fetched evolution for {} clients", clients.len());
        Ok(build_view(&clients, &self.reference_date, filter))
    }
}

pub fn build_view(clients: &[ClientEvolution], reference_date: &str, filter: &ClientsFilter) -> ClientsView {
    let bankers: BTreeSet<&str> = clients.iter().map(|c| c.banker.as_str()).collect();
    let mut selection = SingleSelection::new(bankers);
    if let Some(banker) = &filter.banker {
        selection.select(banker);
        if selection.selected().is_none() {
            tracing::warn!("Banker filter {} matches no client, showing all", banker);
        }
    }

    let cards: Vec<ClientCard> = clients
        .iter()
        .filter(|c| selection.matches(&c.banker))
        .filter(|c| !filter.only_new || is_new_entity(&c.evolution, reference_date))
        .map(|c| client_card(c, reference_date))
        .collect();

    let empty_message = if cards.is_empty() {
        Some(match selection.selected() {
            Some(banker) => format!("No clients found for {}", banker),
            None => "No data available".to_string(),
        })
    } else {
        None
    };

    ClientsView {
        bankers: selection.available().to_vec(),
        selected_banker: selection.selected().map(str::to_string),
        only_new: filter.only_new,
        shown: cards.len(),
        total: clients.len(),
        cards,
        empty_message,
    }
}

pub fn client_card(client: &ClientEvolution, reference_date: &str) -> ClientCard {
    let series = client.series();
    let variation = client.pl_final - client.pl_initial;
    let is_new = is_new_entity(&series.evolution, reference_date);
    let new_since = if is_new {
        series.first_date().map(|d| date_label(d, Granularity::Full))
    } else {
        None
    };

    ClientCard {
        name: client.name.clone(),
        banker: client.banker.clone(),
        email: client.email.clone(),
        initial: format_thousands(client.pl_initial),
        current: format_thousands(client.pl_final),
        variation,
        variation_display: format_signed_thousands(variation),
        variation_percent: format_percent(variation, client.pl_initial, PERCENT_DECIMALS),
        trend: Trend::from_variation(variation),
        is_new,
        new_since,
        chart: ChartData::from_points(&series.evolution, CHART_TICKS, PERCENT_DECIMALS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evolution::EvolutionPoint;

    fn client(name: &str, banker: &str, points: &[(&str, f64)]) -> ClientEvolution {
        let evolution: Vec<EvolutionPoint> = points
            .iter()
            .map(|(d, v)| EvolutionPoint::new(*d, *v))
            .collect();
        let pl_initial = evolution.first().map(|p| p.value).unwrap_or(0.0);
        let pl_final = evolution.last().map(|p| p.value).unwrap_or(0.0);
        ClientEvolution {
            name: name.to_string(),
            cpf: String::new(),
            banker: banker.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            pl_initial,
            pl_final,
            variation: pl_final - pl_initial,
            evolution,
        }
    }

    fn sample() -> Vec<ClientEvolution> {
        vec![
            client("Ana", "Bruno", &[("2025-12-01", 1000.0), ("2025-12-02", 1250.0)]),
            client("Caio", "Daniela", &[("2025-12-10", 500.0), ("2025-12-11", 400.0)]),
            client("Eva", "Bruno", &[("2025-12-15", 2000.0)]),
        ]
    }

    #[test]
    fn test_card_values() {
        let card = client_card(&sample()[0], "2025-12-01");
        assert_eq!(card.initial, "$1,000");
        assert_eq!(card.current, "$1,250");
        assert_eq!(card.variation_display, "+$250");
        assert_eq!(card.variation_percent, "+25.00");
        assert_eq!(card.trend, Trend::Positive);
        assert!(!card.is_new);
        assert_eq!(card.new_since, None);

        let card = client_card(&sample()[1], "2025-12-01");
        assert_eq!(card.variation_percent, "-20.00");
        assert_eq!(card.trend, Trend::Negative);
        assert!(card.is_new);
        assert_eq!(card.new_since.as_deref(), Some("10/12/2025"));
    }

    #[test]
    fn test_zero_initial_percent() {
        let card = client_card(
            &client("Zed", "Bruno", &[("2025-12-01", 0.0), ("2025-12-02", 10.0)]),
            "2025-12-01",
        );
        assert_eq!(card.variation_percent, "0");
    }

    #[test]
    fn test_unfiltered_view() {
        let view = build_view(&sample(), "2025-12-01", &ClientsFilter::default());
        assert_eq!(view.bankers, vec!["Bruno", "Daniela"]);
        assert_eq!((view.shown, view.total), (3, 3));
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_banker_and_new_filters_combine() {
        let filter = ClientsFilter {
            banker: Some("Bruno".to_string()),
            only_new: true,
        };
        let view = build_view(&sample(), "2025-12-01", &filter);
        let names: Vec<&str> = view.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eva"]);
        assert_eq!((view.shown, view.total), (1, 3));
        assert_eq!(view.selected_banker.as_deref(), Some("Bruno"));
        assert_eq!(view.bankers, vec!["Bruno", "Daniela"]);
    }

    #[test]
    fn test_empty_messages() {
        let filter = ClientsFilter {
            banker: Some("Daniela".to_string()),
            only_new: false,
        };
        let mut clients = sample();
        clients[1].evolution[0].date = "2025-12-01".to_string();
        let view = build_view(
            &clients,
            "2025-12-01",
            &ClientsFilter {
                only_new: true,
                ..filter
            },
        );
        assert_eq!(view.empty_message.as_deref(), Some("No clients found for Daniela"));

        let view = build_view(&[], "2025-12-01", &ClientsFilter::default());
        assert_eq!(view.empty_message.as_deref(), Some("No data available"));
        assert_eq!(view.total, 0);
    }

    #[test]
    fn test_unknown_banker_filter_shows_all() {
        let filter = ClientsFilter {
            banker: Some("Nobody".to_string()),
            only_new: false,
        };
        let view = build_view(&sample(), "2025-12-01", &filter);
        assert_eq!(view.selected_banker, None);
        assert_eq!(view.shown, 3);
    }
}
