// ============================================================================
// Células azuis (Blue Cells) do timesheet
// ============================================================================
//
// Uma célula da grade semanal fica azul quando, no início daquele dia (00:00
// UTC), o Work Item:
//
// 1. estava num estado cuja categoria é "InProgress"
// 2. estava atribuído ao usuário logado (comparação por ID, não por nome)
//
// O estado "em vigor" num dia é o da revisão mais recente com
// `changed_date <= início do dia`. Revisões com a mesma data: vale a última
// na ordem em que vieram da API.
//
// Este módulo é puro e nunca falha: revisões vazias, data inválida, estado
// ausente ou não mapeado e usuário vazio resultam em `false`.

use crate::models::{StateCategoryMap, WeekDates, WeekHighlights, WorkItemRevision, NO_HIGHLIGHTS};
use chrono::{DateTime, NaiveDate, Utc};

/// Instante 00:00:00 UTC de uma data `YYYY-MM-DD`
pub fn day_start(day: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Decide se a célula de `day` deve ser destacada para `user_id`
pub fn is_highlighted_day(
    revisions: &[WorkItemRevision],
    day: &str,
    user_id: &str,
    state_map: &StateCategoryMap,
) -> bool {
    let Some(start) = day_start(day) else {
        return false;
    };

    let active = revisions
        .iter()
        .filter(|rev| rev.changed_date.is_some_and(|changed| changed <= start))
        .fold(None::<&WorkItemRevision>, |best, rev| match best {
            Some(current) if current.changed_date > rev.changed_date => Some(current),
            _ => Some(rev),
        });

    active.is_some_and(|rev| revision_is_highlighted(rev, user_id, state_map))
}

/// Aplica `is_highlighted_day` a cada uma das 7 datas da semana
pub fn compute_week_highlights(
    revisions: &[WorkItemRevision],
    week: &WeekDates,
    user_id: &str,
    state_map: &StateCategoryMap,
) -> WeekHighlights {
    RevisionTimeline::new(revisions).week_highlights(week, user_id, state_map)
}

fn revision_is_highlighted(rev: &WorkItemRevision, user_id: &str, state_map: &StateCategoryMap) -> bool {
    if user_id.is_empty() {
        return false;
    }

    let Some(state) = rev.state.as_deref().filter(|state| !state.is_empty()) else {
        return false;
    };

    state_map.is_in_progress(state) && rev.assigned_to_id.as_deref() == Some(user_id)
}

/// Revisões ordenadas por data, para responder vários dias sem reordenar
///
/// Revisões sem data nunca entram em vigor e ficam de fora.
#[derive(Debug, Clone)]
pub struct RevisionTimeline<'a> {
    entries: Vec<(DateTime<Utc>, &'a WorkItemRevision)>,
}

impl<'a> RevisionTimeline<'a> {
    pub fn new(revisions: &'a [WorkItemRevision]) -> Self {
        let mut entries: Vec<_> = revisions
            .iter()
            .filter_map(|rev| rev.changed_date.map(|changed| (changed, rev)))
            .collect();

        // sort estável: empates mantêm a ordem da API
        entries.sort_by_key(|(changed, _)| *changed);

        Self { entries }
    }

    /// Revisão em vigor no instante `at`
    pub fn as_of(&self, at: DateTime<Utc>) -> Option<&'a WorkItemRevision> {
        let in_effect = self.entries.partition_point(|(changed, _)| *changed <= at);
        in_effect.checked_sub(1).map(|idx| self.entries[idx].1)
    }

    pub fn is_highlighted(&self, day: &str, user_id: &str, state_map: &StateCategoryMap) -> bool {
        day_start(day)
            .and_then(|start| self.as_of(start))
            .is_some_and(|rev| revision_is_highlighted(rev, user_id, state_map))
    }

    pub fn week_highlights(&self, week: &WeekDates, user_id: &str, state_map: &StateCategoryMap) -> WeekHighlights {
        let mut highlights = NO_HIGHLIGHTS;
        for (cell, day) in highlights.iter_mut().zip(week.iter()) {
            *cell = self.is_highlighted(day, user_id, state_map);
        }
        highlights
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
