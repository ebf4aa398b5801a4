// Application state - services plus the current state of every view
use crate::application::bankers_service::{BankersService, BankersView};
use crate::application::clients_service::{ClientsFilter, ClientsService, ClientsView};
use crate::application::dashboard_repository::FetchError;
use crate::application::overview_service::{
    CaptacaoView, ClientsTableView, MetricsView, OverviewService, TotalPlView,
};
use crate::application::view_state::ViewSlot;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One slot per panel; each loads and fails on its own.
#[derive(Debug)]
pub struct DashboardSlots {
    pub metrics: ViewSlot<MetricsView>,
    pub total_pl: ViewSlot<TotalPlView>,
    pub captacao: ViewSlot<CaptacaoView>,
    pub clients_table: ViewSlot<ClientsTableView>,
    pub clients: ViewSlot<ClientsView>,
    pub bankers: ViewSlot<BankersView>,
}

impl Default for DashboardSlots {
    fn default() -> Self {
        Self {
            metrics: ViewSlot::new("metrics"),
            total_pl: ViewSlot::new("total_pl"),
            captacao: ViewSlot::new("captacao"),
            clients_table: ViewSlot::new("clients_table"),
            clients: ViewSlot::new("clients"),
            bankers: ViewSlot::new("bankers"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub overview_service: OverviewService,
    pub clients_service: ClientsService,
    pub bankers_service: BankersService,
    pub clients_filter: ClientsFilter,
    pub bankers_selection: Option<Vec<String>>,
    pub slots: Arc<Mutex<DashboardSlots>>,
}

impl AppState {
    pub fn new(
        overview_service: OverviewService,
        clients_service: ClientsService,
        bankers_service: BankersService,
        clients_filter: ClientsFilter,
        bankers_selection: Option<Vec<String>>,
    ) -> Self {
        Self {
            overview_service,
            clients_service,
            bankers_service,
            clients_filter,
            bankers_selection,
            slots: Arc::new(Mutex::new(DashboardSlots::default())),
        }
    }

    /// Reloads every view concurrently.
    pub async fn refresh(&self) {
        tokio::join!(
            self.load(|s| &mut s.metrics, self.overview_service.get_metrics()),
            self.load(|s| &mut s.total_pl, self.overview_service.get_total_pl()),
            self.load(|s| &mut s.captacao, self.overview_service.get_captacao()),
            self.load(
                |s| &mut s.clients_table,
                self.overview_service.get_clients_table()
            ),
            self.load(
                |s| &mut s.clients,
                self.clients_service.get_view(&self.clients_filter)
            ),
            self.load(
                |s| &mut s.bankers,
                self.bankers_service
                    .get_view(self.bankers_selection.as_deref())
            ),
        );
    }

    /// Marks the slot loading, awaits the fetch without holding the lock,
    /// then hands the outcome back under the token it was issued.
    async fn load<T, F>(
        &self,
        slot: impl Fn(&mut DashboardSlots) -> &mut ViewSlot<T>,
        fetch: F,
    ) -> bool
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let token = slot(&mut *self.slots.lock().await).begin();
        let result = fetch.await;
        slot(&mut *self.slots.lock().await).resolve(token, result)
    }

    pub async fn snapshot(&self) -> serde_json::Value {
        let slots = self.slots.lock().await;
        serde_json::json!({
            "metrics": slots.metrics.state(),
            "total_pl": slots.total_pl.state(),
            "captacao": slots.captacao.state(),
            "clients_table": slots.clients_table.state(),
            "clients": slots.clients.state(),
            "bankers": slots.bankers.state(),
        })
    }
}
