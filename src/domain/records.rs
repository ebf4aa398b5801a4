// Backend record shapes, one per API payload
use super::evolution::{EntitySeries, EvolutionPoint};
use serde::{Deserialize, Serialize};

/// Latest PL of one client (`/api/clients/pl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPl {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub banker: String,
    #[serde(default)]
    pub email: String,
    pub pl: f64,
    #[serde(rename = "data")]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientsPl {
    pub clients: Vec<ClientPl>,
    pub last_date: Option<String>,
}

/// PL evolution of one client (`/api/clients/evolution`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEvolution {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub banker: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "pl_inicial", default)]
    pub pl_initial: f64,
    #[serde(rename = "pl_final", default)]
    pub pl_final: f64,
    #[serde(rename = "variacao", default)]
    pub variation: f64,
    #[serde(default)]
    pub evolution: Vec<EvolutionPoint>,
}

impl ClientEvolution {
    pub fn series(&self) -> EntitySeries {
        EntitySeries::from_points(self.name.clone(), self.evolution.clone())
    }
}

/// Aggregated PL evolution of one banker's book (`/api/bankers/evolution`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankerEvolution {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "clientes_count", default)]
    pub client_count: u32,
    #[serde(default)]
    pub evolution: Vec<EvolutionPoint>,
    #[serde(rename = "pl_inicial", default)]
    pub pl_initial: f64,
    #[serde(rename = "pl_final", default)]
    pub pl_final: f64,
    #[serde(rename = "variacao", default)]
    pub variation: f64,
}

/// Accumulated inflow of one banker (`/api/bankers/captacao`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankerCaptacao {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub evolution: Vec<EvolutionPoint>,
    #[serde(rename = "captacao_total", default)]
    pub total: f64,
    #[serde(rename = "captacao_inicial", default)]
    pub initial: f64,
    #[serde(rename = "captacao_final", default)]
    pub final_value: f64,
}

impl BankerCaptacao {
    pub fn series(&self) -> EntitySeries {
        EntitySeries::from_points(self.name.clone(), self.evolution.clone())
    }

    /// Final minus initial inflow, as shown on the card.
    pub fn variation(&self) -> f64 {
        self.final_value - self.initial
    }
}

/// Accumulated inflow of the whole office (`/api/captacao/evolucao`).
#[derive(Debug, Clone, PartialEq)]
pub struct CaptacaoEvolution {
    pub points: Vec<EvolutionPoint>,
    pub total: f64,
}
