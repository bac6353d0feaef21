//! Mapeamento estado -> categoria do processo
//!
//! Os nomes de estado variam por processo ("Active", "Em andamento", "Doing"),
//! mas a categoria é fixa no Azure DevOps. As regras de negócio olham apenas
//! para a categoria.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categoria semântica de um estado
///
/// Comparação exata e sensível a maiúsculas, como o backend envia.
/// Categorias desconhecidas são preservadas em `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateCategory {
    Proposed,
    InProgress,
    Resolved,
    Completed,
    Removed,
    Other(String),
}

impl StateCategory {
    pub fn as_str(&self) -> &str {
        match self {
            StateCategory::Proposed => "Proposed",
            StateCategory::InProgress => "InProgress",
            StateCategory::Resolved => "Resolved",
            StateCategory::Completed => "Completed",
            StateCategory::Removed => "Removed",
            StateCategory::Other(raw) => raw,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, StateCategory::InProgress)
    }
}

impl From<&str> for StateCategory {
    fn from(raw: &str) -> Self {
        match raw {
            "Proposed" => StateCategory::Proposed,
            "InProgress" => StateCategory::InProgress,
            "Resolved" => StateCategory::Resolved,
            "Completed" => StateCategory::Completed,
            "Removed" => StateCategory::Removed,
            other => StateCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for StateCategory {
    fn from(raw: String) -> Self {
        StateCategory::from(raw.as_str())
    }
}

impl From<StateCategory> for String {
    fn from(category: StateCategory) -> Self {
        match category {
            StateCategory::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dicionário nome do estado -> categoria de um tipo de Work Item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCategoryMap {
    states: HashMap<String, StateCategory>,
}

impl StateCategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, state: impl Into<String>, category: impl Into<StateCategory>) {
        self.states.insert(state.into(), category.into());
    }

    pub fn category_of(&self, state: &str) -> Option<&StateCategory> {
        self.states.get(state)
    }

    /// Estado não mapeado nunca é considerado em andamento
    pub fn is_in_progress(&self, state: &str) -> bool {
        self.category_of(state).is_some_and(StateCategory::is_in_progress)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl From<HashMap<String, String>> for StateCategoryMap {
    fn from(raw: HashMap<String, String>) -> Self {
        raw.into_iter().collect()
    }
}

impl<S, C> FromIterator<(S, C)> for StateCategoryMap
where
    S: Into<String>,
    C: Into<StateCategory>,
{
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        Self {
            states: iter
                .into_iter()
                .map(|(state, category)| (state.into(), category.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(StateCategory::from("InProgress"), StateCategory::InProgress);
        assert_eq!(StateCategory::from("Completed"), StateCategory::Completed);
        assert_eq!(
            StateCategory::from("inprogress"),
            StateCategory::Other("inprogress".to_string())
        );
    }

    #[test]
    fn test_unknown_category_passes_through() {
        let category = StateCategory::from("ToDo");
        assert_eq!(category.to_string(), "ToDo");
        assert_eq!(String::from(category), "ToDo");
    }

    #[test]
    fn test_map_lookup() {
        let map: StateCategoryMap = [("Active", "InProgress"), ("New", "Proposed")]
            .into_iter()
            .collect();

        assert_eq!(map.len(), 2);
        assert!(map.is_in_progress("Active"));
        assert!(!map.is_in_progress("New"));
        assert!(!map.is_in_progress("Closed"));
        assert!(!map.is_in_progress("active"));
    }

    #[test]
    fn test_map_from_wire() {
        let raw: HashMap<String, String> =
            serde_json::from_str(r#"{"Doing": "InProgress", "Done": "Completed"}"#).unwrap();
        let map = StateCategoryMap::from(raw);

        assert_eq!(map.category_of("Done"), Some(&StateCategory::Completed));
        assert!(map.is_in_progress("Doing"));
    }

    #[test]
    fn test_map_serde_is_flat_object() {
        let mut map = StateCategoryMap::new();
        map.insert("Active", "InProgress");

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "Active": "InProgress" }));

        let back: StateCategoryMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
