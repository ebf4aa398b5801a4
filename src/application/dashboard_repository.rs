// Repository trait for dashboard data access
use crate::domain::evolution::EvolutionPoint;
use crate::domain::metrics::MetricsSnapshot;
use crate::domain::records::{
    BankerCaptacao, BankerEvolution, CaptacaoEvolution, ClientEvolution, ClientsPl,
};
use async_trait::async_trait;
use thiserror::Error;

/// Every way a view fetch can fail. Views show the message as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed with status {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response format: {0}")]
    InvalidFormat(String),
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Latest PL of every client (`/api/clients/pl`)
    async fn clients_pl(&self) -> Result<ClientsPl, FetchError>;

    /// PL evolution per client (`/api/clients/evolution`)
    async fn clients_evolution(&self) -> Result<Vec<ClientEvolution>, FetchError>;

    /// PL evolution per banker (`/api/bankers/evolution`)
    async fn bankers_evolution(&self) -> Result<Vec<BankerEvolution>, FetchError>;

    /// Accumulated inflow per banker (`/api/bankers/captacao`)
    async fn bankers_captacao(&self) -> Result<Vec<BankerCaptacao>, FetchError>;

    /// Accumulated office inflow (`/api/captacao/evolucao`)
    async fn captacao_evolution(&self) -> Result<CaptacaoEvolution, FetchError>;

    /// Office-wide PL per day (`/api/pl/total`)
    async fn total_pl(&self) -> Result<Vec<EvolutionPoint>, FetchError>;

    /// Dashboard totals (`/api/metrics`)
    async fn metrics(&self) -> Result<MetricsSnapshot, FetchError>;
}
