use crate::application::clients_service::ClientsFilter;
use crate::domain::format::CurrencyScale;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

const MAX_MILLION_DECIMALS: usize = 6;
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// First day of the reporting cohort; clients whose series starts on any
/// other day are "new".
const DEFAULT_REFERENCE_DATE: &str = "2025-12-01";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub cohort: CohortSettings,
    pub display: DisplaySettings,
    #[serde(default)]
    pub clients: ClientsFilter,
    #[serde(default)]
    pub bankers: BankersSettings,
    #[serde(default)]
    pub refresh_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CohortSettings {
    pub reference_date: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub million_decimals: usize,
}

impl DisplaySettings {
    pub fn currency_scale(&self) -> CurrencyScale {
        CurrencyScale {
            million_decimals: self.million_decimals,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BankersSettings {
    /// Bankers shown on the captação comparison chart; all when unset.
    #[serde(default)]
    pub selected: Option<Vec<String>>,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("cohort.reference_date", DEFAULT_REFERENCE_DATE)?
        .set_default("display.million_decimals", 3)
}

/// `DASHBOARD__API__BASE_URL` and friends; `bankers.selected` is a
/// comma-separated list.
fn environment() -> Environment {
    Environment::with_prefix("DASHBOARD")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("bankers.selected")
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let builder = with_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment());
    finish(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = builder.build()?.try_deserialize()?;
    if config.display.million_decimals > MAX_MILLION_DECIMALS {
        anyhow::bail!(
            "display.million_decimals must be at most {}, got {}",
            MAX_MILLION_DECIMALS,
            config.display.million_decimals
        );
    }
    Ok(config)
}
