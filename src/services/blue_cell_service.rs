//! Orquestração das células azuis
//!
//! Busca revisões e mapeamento de estados em paralelo (cada um com seu cache)
//! e alimenta o avaliador. Enquanto algum dado falta ou falhou, a linha
//! inteira fica sem destaque: o erro é registrado e devolvido ao chamador,
//! nunca propagado como falha de renderização.

use crate::config::{CacheSettings, Settings};
use crate::models::{StateCategoryMap, WeekDates, WeekHighlights, WorkItemRevision, NO_HIGHLIGHTS};
use crate::services::blue_cells::compute_week_highlights;
use crate::services::query_cache::QueryCache;
use crate::services::timesheet_source::TimesheetSource;
use crate::utils::logging::{log_cache_hit, log_error, log_info, log_validation_error, log_warning};
use crate::utils::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;
use timesheet_api::{StaticToken, TimesheetClient};

/// Chave do cache de revisões: (work item, organização, projeto)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionsKey {
    pub work_item_id: u64,
    pub organization: String,
    pub project: String,
}

/// Chave do cache de estados: (organização, processo, tipo de work item)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateMapKey {
    pub organization: String,
    pub process_id: String,
    pub work_item_type: String,
}

/// Parâmetros de uma linha da grade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueCellQuery {
    pub work_item_id: u64,
    pub organization: String,
    pub project: String,
    pub process_id: String,
    pub work_item_type: String,
    pub week: WeekDates,
    pub user_id: String,
}

impl BlueCellQuery {
    fn revisions_key(&self) -> RevisionsKey {
        RevisionsKey {
            work_item_id: self.work_item_id,
            organization: self.organization.clone(),
            project: self.project.clone(),
        }
    }

    fn state_map_key(&self) -> StateMapKey {
        StateMapKey {
            organization: self.organization.clone(),
            process_id: self.process_id.clone(),
            work_item_type: self.work_item_type.clone(),
        }
    }
}

/// Resultado de uma linha: sempre 7 booleanos, mais o erro da busca se houver
#[derive(Debug)]
pub struct BlueCells {
    pub highlights: WeekHighlights,
    pub error: Option<AppError>,
}

impl BlueCells {
    fn unhighlighted(error: Option<AppError>) -> Self {
        Self {
            highlights: NO_HIGHLIGHTS,
            error,
        }
    }

    pub fn any(&self) -> bool {
        self.highlights.iter().any(|cell| *cell)
    }
}

pub struct BlueCellService<S> {
    source: Arc<S>,
    revisions: QueryCache<RevisionsKey, Arc<Vec<WorkItemRevision>>>,
    state_maps: QueryCache<StateMapKey, Arc<StateCategoryMap>>,
}

impl<S> Clone for BlueCellService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            revisions: self.revisions.clone(),
            state_maps: self.state_maps.clone(),
        }
    }
}

impl BlueCellService<TimesheetClient> {
    /// Monta o serviço com o cliente HTTP descrito em `settings`
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let token = settings.api.token.clone().unwrap_or_default();
        if token.is_empty() {
            log_warning("api.token ausente: requisições ao backend seguirão sem Authorization");
        }

        let client = TimesheetClient::with_timeouts(
            &settings.api.base_url,
            Arc::new(StaticToken::new(token)),
            settings.api.timeout_seconds,
            settings.api.connect_timeout_seconds,
        )?;

        log_info(&format!("Células azuis usando a API em {}", client.base_url()));

        Ok(Self::new(client, &settings.cache))
    }
}

impl<S: TimesheetSource> BlueCellService<S> {
    pub fn new(source: S, cache: &CacheSettings) -> Self {
        Self {
            source: Arc::new(source),
            revisions: QueryCache::new(Duration::from_secs(cache.revisions_ttl_seconds)),
            state_maps: QueryCache::new(Duration::from_secs(cache.state_map_ttl_seconds)),
        }
    }

    /// Células azuis de uma linha da grade
    pub async fn highlights(&self, query: &BlueCellQuery) -> BlueCells {
        if query.user_id.trim().is_empty() {
            log_validation_error("user_id", "usuário não identificado, células sem destaque");
            return BlueCells::unhighlighted(None);
        }

        let (revisions, state_map) = tokio::join!(self.revisions_for(query), self.state_map_for(query));

        match (revisions, state_map) {
            (Ok(revisions), Ok(state_map)) => BlueCells {
                highlights: compute_week_highlights(&revisions, &query.week, &query.user_id, &state_map),
                error: None,
            },
            (Err(err), _) | (_, Err(err)) => {
                log_error(&format!(
                    "Células azuis indisponíveis para work item {}: {}",
                    query.work_item_id, err
                ));
                BlueCells::unhighlighted(Some(err))
            }
        }
    }

    /// Descarta revisões em cache de um work item (após criar/editar apontamento)
    pub async fn invalidate_work_item(&self, work_item_id: u64) -> usize {
        self.revisions
            .invalidate_where(|key| key.work_item_id == work_item_id)
            .await
    }

    pub async fn invalidate_all(&self) {
        self.revisions.clear().await;
        self.state_maps.clear().await;
    }

    async fn revisions_for(&self, query: &BlueCellQuery) -> AppResult<Arc<Vec<WorkItemRevision>>> {
        let key = query.revisions_key();
        if let Some(cached) = self.revisions.get(&key).await {
            log_cache_hit("revisions", &key.work_item_id.to_string());
            return Ok(cached);
        }

        let revisions = Arc::new(
            self.source
                .fetch_revisions(query.work_item_id, &query.organization, &query.project)
                .await?,
        );
        self.revisions.insert(key, Arc::clone(&revisions)).await;
        Ok(revisions)
    }

    async fn state_map_for(&self, query: &BlueCellQuery) -> AppResult<Arc<StateCategoryMap>> {
        let key = query.state_map_key();
        if let Some(cached) = self.state_maps.get(&key).await {
            log_cache_hit("process-states", &format!("{}/{}", key.process_id, key.work_item_type));
            return Ok(cached);
        }

        let state_map = Arc::new(
            self.source
                .fetch_state_category_map(
                    &query.organization,
                    &query.project,
                    &query.process_id,
                    &query.work_item_type,
                )
                .await?,
        );
        self.state_maps.insert(key, Arc::clone(&state_map)).await;
        Ok(state_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use timesheet_api::TimesheetApiError;

    /// Fonte em memória que conta as chamadas
    #[derive(Default)]
    struct FakeSource {
        revisions: Vec<WorkItemRevision>,
        state_map: StateCategoryMap,
        fail_revisions: bool,
        revision_calls: AtomicUsize,
        state_map_calls: AtomicUsize,
    }

    impl TimesheetSource for FakeSource {
        async fn fetch_revisions(
            &self,
            _work_item_id: u64,
            _organization: &str,
            _project: &str,
        ) -> AppResult<Vec<WorkItemRevision>> {
            self.revision_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_revisions {
                return Err(AppError::InternalError("backend indisponível".to_string()));
            }
            Ok(self.revisions.clone())
        }

        async fn fetch_state_category_map(
            &self,
            _organization: &str,
            _project: &str,
            _process_id: &str,
            _work_item_type: &str,
        ) -> AppResult<StateCategoryMap> {
            self.state_map_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.state_map.clone())
        }
    }

    fn source() -> FakeSource {
        FakeSource {
            revisions: vec![WorkItemRevision::parse("2025-01-19T10:00Z", Some("Active"), Some("u1"))],
            state_map: [("Active", "InProgress")].into_iter().collect(),
            ..FakeSource::default()
        }
    }

    fn query(user_id: &str) -> BlueCellQuery {
        BlueCellQuery {
            work_item_id: 42,
            organization: "contoso".to_string(),
            project: "proj-1".to_string(),
            process_id: "agile".to_string(),
            work_item_type: "Task".to_string(),
            week: WeekDates::containing(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()).unwrap(),
            user_id: user_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_highlights_for_assigned_user() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        let cells = service.highlights(&query("u1")).await;

        assert!(cells.error.is_none());
        assert_eq!(cells.highlights, [true; 7]);
        assert!(cells.any());
    }

    #[tokio::test]
    async fn test_other_user_gets_no_highlights() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        let cells = service.highlights(&query("u2")).await;

        assert!(cells.error.is_none());
        assert_eq!(cells.highlights, NO_HIGHLIGHTS);
    }

    #[tokio::test]
    async fn test_empty_user_skips_fetch() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        let cells = service.highlights(&query("  ")).await;

        assert_eq!(cells.highlights, NO_HIGHLIGHTS);
        assert!(cells.error.is_none());
        assert_eq!(service.source.revision_calls.load(Ordering::SeqCst), 0);
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_safe_default_with_error() {
        let failing = FakeSource {
            fail_revisions: true,
            ..source()
        };
        let service = BlueCellService::new(failing, &CacheSettings::default());

        let cells = service.highlights(&query("u1")).await;

        assert_eq!(cells.highlights, NO_HIGHLIGHTS);
        assert!(matches!(cells.error, Some(AppError::InternalError(_))));
    }

    #[tokio::test]
    async fn test_inputs_are_cached_between_weeks() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        service.highlights(&query("u1")).await;
        let mut next_week = query("u1");
        next_week.week = WeekDates::containing(NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()).unwrap();
        service.highlights(&next_week).await;

        assert_eq!(service.source.revision_calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let failing = FakeSource {
            fail_revisions: true,
            ..source()
        };
        let service = BlueCellService::new(failing, &CacheSettings::default());

        service.highlights(&query("u1")).await;
        service.highlights(&query("u1")).await;

        assert_eq!(service.source.revision_calls.load(Ordering::SeqCst), 2);
        // o mapeamento foi obtido na primeira chamada e segue em cache
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidate_work_item_forces_refetch() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        service.highlights(&query("u1")).await;
        assert_eq!(service.invalidate_work_item(42).await, 1);
        assert_eq!(service.invalidate_work_item(99).await, 0);
        service.highlights(&query("u1")).await;

        assert_eq!(service.source.revision_calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revisions_expire_before_state_map() {
        let service = BlueCellService::new(source(), &CacheSettings::default());

        service.highlights(&query("u1")).await;
        tokio::time::advance(Duration::from_secs(301)).await;
        service.highlights(&query("u1")).await;

        assert_eq!(service.source.revision_calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 1);

        service.invalidate_all().await;
        service.highlights(&query("u1")).await;
        assert_eq!(service.source.state_map_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_from_settings_builds_http_service() {
        let settings = Settings::from_toml(
            r#"
            [api]
            base_url = "https://api.aponta.app"
            token = "pat-123"
            "#,
        )
        .unwrap();

        let service = BlueCellService::from_settings(&settings).unwrap();

        assert_eq!(service.source.base_url(), "https://api.aponta.app/api/v1");
        assert_eq!(service.revisions.ttl(), Duration::from_secs(300));
        assert_eq!(service.state_maps.ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_from_settings_without_token() {
        let settings = Settings::from_toml(
            r#"
            [api]
            base_url = "http://localhost:8000/"
            "#,
        )
        .unwrap();

        let service = BlueCellService::from_settings(&settings).unwrap();
        assert_eq!(service.source.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_from_settings_rejects_relative_base_url() {
        let settings = Settings::from_toml(
            r#"
            [api]
            base_url = "/api/v1"
            "#,
        )
        .unwrap();

        let result = BlueCellService::from_settings(&settings);
        assert!(matches!(
            result,
            Err(AppError::TimesheetApi(TimesheetApiError::ConfigError(_)))
        ));
    }
}
