use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Instala o subscriber global de tracing (`RUST_LOG`, padrão `info`)
///
/// Retorna false se outro subscriber já estava instalado.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_revisions_fetched(work_item_id: u64, count: usize) {
    info!("Revisions fetched: work item {} - {} revisions", work_item_id, count);
}

pub fn log_state_map_fetched(organization: &str, process_id: &str, work_item_type: &str, count: usize) {
    info!(
        "State map fetched: {}/{}/{} - {} states",
        organization, process_id, work_item_type, count
    );
}

pub fn log_cache_hit(kind: &str, key: &str) {
    debug!("Cache hit: {} - {}", kind, key);
}

pub fn log_timesheet_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!("Timesheet API error: {} - Status: {:?} - Error: {}", endpoint, status, error);
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
