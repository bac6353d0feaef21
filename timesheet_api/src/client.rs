//! Cliente HTTP para a API de timesheet do Aponta

use crate::auth::TokenProvider;
use crate::error::{Result, TimesheetApiError};
use reqwest::{Client as HttpClient, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Sufixo de versão que toda base URL absoluta deve terminar
pub const API_VERSION_PREFIX: &str = "/api/v1";

/// Normaliza a base URL da API
///
/// - remove barras finais
/// - acrescenta `/api/v1` em URLs absolutas que ainda não o tenham
/// - URLs relativas são mantidas como vieram (o cliente as rejeita)
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');

    if trimmed.ends_with(API_VERSION_PREFIX) || trimmed.contains("/api/v1/") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        format!("{}{}", trimmed, API_VERSION_PREFIX)
    } else {
        trimmed.to_string()
    }
}

/// Cliente para a API de timesheet
///
/// Apenas leituras: os endpoints consumidos aqui são idempotentes e sem
/// efeitos colaterais do ponto de vista do chamador.
#[derive(Clone)]
pub struct TimesheetClient {
    http_client: HttpClient,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for TimesheetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimesheetClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TimesheetClient {
    /// Cria um novo cliente
    ///
    /// # Timeouts
    ///
    /// - Total: 30s
    /// - Connect: 5s
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        Self::with_timeouts(base_url, tokens, 30, 5)
    }

    /// Cria um novo cliente com timeouts customizados
    pub fn with_timeouts(
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
        total_timeout_secs: u64,
        connect_timeout_secs: u64,
    ) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(TimesheetApiError::ConfigError("base URL vazia".to_string()));
        }

        let base_url = normalize_base_url(base_url);
        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(TimesheetApiError::ConfigError(format!(
                    "base URL precisa ser absoluta (http/https): {}",
                    base_url
                )))
            }
        }

        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(total_timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| TimesheetApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            tokens,
        })
    }

    /// URL base já normalizada (termina em `/api/v1`)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Monta a URL completa de um endpoint, garantindo a barra inicial
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Executa um GET com renovação de token em caso de 401
    pub(crate) async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = self.build_url(endpoint);
        let token = self.tokens.token().await;

        let response = self.send_get(&url, query, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return self.handle_response(response).await;
        }

        tracing::warn!("401 em GET {}, solicitando token renovado", url);

        let Some(fresh_token) = self.tokens.refresh_token().await else {
            return Err(TimesheetApiError::AuthError(format!(
                "401 em {} e nenhum token renovado disponível",
                endpoint
            )));
        };

        let retry = self.send_get(&url, query, Some(&fresh_token)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            return Err(TimesheetApiError::AuthError(format!(
                "401 em {} mesmo após renovar o token",
                endpoint
            )));
        }

        self.handle_response(retry).await
    }

    /// Executa um GET e parseia JSON
    ///
    /// Retorna `None` para 204 ou corpo vazio.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let response = self.get(endpoint, query).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }

    async fn send_get(&self, url: &str, query: &[(&str, &str)], token: Option<&str>) -> Result<Response> {
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self
            .http_client
            .get(url)
            .query(query)
            .header("Accept", "application/json");

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        Ok(request.send().await?)
    }

    /// Processa a resposta HTTP e trata erros
    async fn handle_response(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!("Timesheet API error ({}): {}", status_code, error_body);

        // O backend (FastAPI) usa "detail"; proxies costumam usar "error"/"message"
        let message = match serde_json::from_str::<Value>(&error_body) {
            Ok(json) => json
                .get("detail")
                .or_else(|| json.get("error"))
                .or_else(|| json.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or(&error_body)
                .to_string(),
            Err(_) => error_body,
        };

        Err(TimesheetApiError::ApiError {
            status: status_code,
            message,
        })
    }
}
