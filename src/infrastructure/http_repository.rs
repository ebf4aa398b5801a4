// HTTP repository implementation for the dashboard backend
use crate::application::dashboard_repository::{DashboardRepository, FetchError};
use crate::domain::evolution::EvolutionPoint;
use crate::domain::metrics::MetricsSnapshot;
use crate::domain::records::{
    BankerCaptacao, BankerEvolution, CaptacaoEvolution, ClientEvolution, ClientsPl,
};
use crate::infrastructure::response_cache::ResponseCache;
use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const CLIENTS_PL: &str = "/api/clients/pl";
const CLIENTS_EVOLUTION: &str = "/api/clients/evolution";
const BANKERS_EVOLUTION: &str = "/api/bankers/evolution";
const BANKERS_CAPTACAO: &str = "/api/bankers/captacao";
const CAPTACAO_EVOLUTION: &str = "/api/captacao/evolucao";
const TOTAL_PL: &str = "/api/pl/total";
const METRICS: &str = "/api/metrics";

pub struct HttpDashboardRepository {
    client: reqwest::Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl HttpDashboardRepository {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        cache_ttl: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: cache_ttl.map(ResponseCache::new),
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Fetches an endpoint and checks the `success` envelope.
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError> {
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(endpoint).await {
                tracing::debug!("Cache hit for {}", endpoint);
                return Ok(body);
            }
        }

        let url = self.build_url(endpoint);
        // cache-busting timestamp, sent on every request
        let stamp = chrono::Utc::now().timestamp_millis();
        tracing::debug!("Fetching {}?t={}", url, stamp);

        let response = self
            .client
            .get(&url)
            .query(&[("t", stamp)])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::InvalidFormat(format!("{} is not JSON: {}", endpoint, e)))?;

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("missing success flag");
            return Err(FetchError::InvalidFormat(format!("{}: {}", endpoint, reason)));
        }

        if let Some(cache) = &self.cache {
            cache.insert(endpoint, body.clone()).await;
        }
        Ok(body)
    }
}

fn field<T: DeserializeOwned>(body: &Value, key: &str) -> Result<T, FetchError> {
    let value = body
        .get(key)
        .ok_or_else(|| FetchError::InvalidFormat(format!("missing field {}", key)))?;
    serde_json::from_value(value.clone())
        .map_err(|e| FetchError::InvalidFormat(format!("field {}: {}", key, e)))
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn clients_pl(&self) -> Result<ClientsPl, FetchError> {
        let body = self.fetch(CLIENTS_PL).await?;
        Ok(ClientsPl {
            clients: field(&body, "data")?,
            last_date: body
                .get("lastDate")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn clients_evolution(&self) -> Result<Vec<ClientEvolution>, FetchError> {
        let body = self.fetch(CLIENTS_EVOLUTION).await?;
        field(&body, "data")
    }

    async fn bankers_evolution(&self) -> Result<Vec<BankerEvolution>, FetchError> {
        let body = self.fetch(BANKERS_EVOLUTION).await?;
        field(&body, "data")
    }

    async fn bankers_captacao(&self) -> Result<Vec<BankerCaptacao>, FetchError> {
        let body = self.fetch(BANKERS_CAPTACAO).await?;
        field(&body, "data")
    }

    async fn captacao_evolution(&self) -> Result<CaptacaoEvolution, FetchError> {
        let body = self.fetch(CAPTACAO_EVOLUTION).await?;
        Ok(CaptacaoEvolution {
            points: field(&body, "data")?,
            total: body
                .get("captacao_total")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        })
    }

    async fn total_pl(&self) -> Result<Vec<EvolutionPoint>, FetchError> {
        let body = self.fetch(TOTAL_PL).await?;
        field(&body, "data")
    }

    async fn metrics(&self) -> Result<MetricsSnapshot, FetchError> {
        let body = self.fetch(METRICS).await?;
        field(&body, "metrics")
    }
}
