//! Histórico de revisões de um Work Item
//!
//! Cada revisão é um snapshot imutável. Campos ausentes ou malformados viram
//! `None` na conversão; quem avalia decide o que fazer com eles.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use timesheet_api::types::WorkItemRevisionDto;

/// Data-hora com offset explícito mas sem segundos (`2025-01-19T10:00+03:00`)
const MINUTE_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// Formatos sem offset aceitos além de RFC 3339 (sempre interpretados como UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRevision {
    pub changed_date: Option<DateTime<Utc>>,
    pub state: Option<String>,
    pub assigned_to_id: Option<String>,
}

impl WorkItemRevision {
    /// Cria a revisão a partir de um timestamp textual
    ///
    /// Um timestamp inválido resulta em `changed_date = None`.
    pub fn parse(changed_date: &str, state: Option<&str>, assigned_to_id: Option<&str>) -> Self {
        Self {
            changed_date: parse_timestamp(changed_date),
            state: state.map(str::to_string),
            assigned_to_id: assigned_to_id.map(str::to_string),
        }
    }
}

impl From<&WorkItemRevisionDto> for WorkItemRevision {
    fn from(dto: &WorkItemRevisionDto) -> Self {
        Self {
            changed_date: dto.fields.changed_date.as_deref().and_then(parse_timestamp),
            state: dto.fields.state.clone(),
            assigned_to_id: dto.assigned_to_id().map(str::to_string),
        }
    }
}

impl From<WorkItemRevisionDto> for WorkItemRevision {
    fn from(dto: WorkItemRevisionDto) -> Self {
        Self::from(&dto)
    }
}

/// Interpreta um timestamp ISO-8601
///
/// Aceita RFC 3339 completo, data-hora com offset sem segundos, data-hora sem
/// offset (com ou sem `Z`, com ou sem segundos) e data pura (meia-noite UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_str(raw, MINUTE_OFFSET_FORMAT) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}
