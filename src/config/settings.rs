use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::{Deserialize, Serialize};

use crate::utils::logging::log_config_loaded;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiSettings {
    /// URL do backend; `/api/v1` é acrescentado quando ausente
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    #[serde(default = "default_revisions_ttl_seconds")]
    pub revisions_ttl_seconds: u64,
    #[serde(default = "default_state_map_ttl_seconds")]
    pub state_map_ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            revisions_ttl_seconds: default_revisions_ttl_seconds(),
            state_map_ttl_seconds: default_state_map_ttl_seconds(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

// 5 minutos: revisões mudam a cada edição do work item
fn default_revisions_ttl_seconds() -> u64 {
    5 * 60
}

// 1 hora: mapeamento de estados raramente muda
fn default_state_map_ttl_seconds() -> u64 {
    60 * 60
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_err() {
            tracing::debug!("Arquivo .env não encontrado - usando variáveis de ambiente do sistema");
        }

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        // Mesmos nomes usados pelo front-end (VITE_API_URL / VITE_API_TOKEN)
        if let Ok(url) = std::env::var("APONTA_API_URL") {
            builder = builder.set_override("api.base_url", url)?;
        }
        if let Ok(token) = std::env::var("APONTA_API_TOKEN") {
            builder = builder.set_override("api.token", token)?;
        }

        // APONTA_CACHE__REVISIONS_TTL_SECONDS=60, etc.
        builder = builder.add_source(
            Environment::with_prefix("APONTA")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = Self::build(builder)?;
        log_config_loaded(&run_mode);
        Ok(settings)
    }

    /// Carrega a partir de um TOML em memória (sem arquivos nem ambiente)
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;

        if settings.api.base_url.trim().is_empty() {
            return Err(ConfigError::Message("api.base_url não pode ser vazio".to_string()));
        }

        Ok(settings)
    }
}
