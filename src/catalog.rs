// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::settings::Filters;
use crate::types::settings::GROUP_COUNT;
use crate::types::settings::PERIOD_COUNT;

/// The full set of element cards.
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Read and validate the catalog file. Either every record loads, or the
    /// whole load fails.
    pub async fn load(path: &Path) -> Fallible<Self> {
        log::debug!("Loading catalog from {}...", path.display());
        let start = Instant::now();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            ErrorReport::new(format!(
                "failed to read catalog {}: {e}",
                path.display()
            ))
        })?;
        let catalog = Self::from_json(&content)?;
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Catalog loaded in {duration}ms ({} cards).",
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Fallible<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)
            .map_err(|e| ErrorReport::new(format!("malformed catalog: {e}")))?;
        let mut ids: HashSet<CardId> = HashSet::new();
        for card in &cards {
            validate_card(card)?;
            if !ids.insert(card.id()) {
                return fail(format!("malformed catalog: duplicate id {}", card.id()));
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards passing every filter category, in catalog order.
    pub fn query(&self, filters: &Filters) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| filters.period.matches(Some(card.period())))
            .filter(|card| filters.group.matches(card.group()))
            .cloned()
            .collect()
    }
}

fn validate_card(card: &Card) -> Fallible<()> {
    let id = card.id();
    if card.symbol().trim().is_empty() {
        return fail(format!("malformed catalog: card {id} has a blank symbol"));
    }
    if card.name().trim().is_empty() {
        return fail(format!("malformed catalog: card {id} has a blank name"));
    }
    if !(1..=PERIOD_COUNT).contains(&card.period()) {
        return fail(format!(
            "malformed catalog: card {id} has invalid period {}",
            card.period()
        ));
    }
    if let Some(group) = card.group() {
        if !(1..=GROUP_COUNT).contains(&group) {
            return fail(format!(
                "malformed catalog: card {id} has invalid group {group}"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::types::selection::Selection;

    const SAMPLE: &str = r#"[
        {"id": 1, "symbol": "H", "name": "Vodík", "atomic_number": 1, "period": 1, "group": 1},
        {"id": 2, "symbol": "He", "name": "Helium", "atomic_number": 2, "period": 1, "group": 18},
        {"id": 3, "symbol": "Li", "name": "Lithium", "atomic_number": 3, "period": 2, "group": 1},
        {"id": 10, "symbol": "Ne", "name": "Neon", "atomic_number": 10, "period": 2, "group": 18},
        {"id": 11, "symbol": "Na", "name": "Sodík", "atomic_number": 11, "period": 3, "group": 1},
        {"id": 58, "symbol": "Ce", "name": "Cer", "atomic_number": 58, "period": 6}
    ]"#;

    fn ids(cards: &[Card]) -> Vec<CardId> {
        cards.iter().map(|card| card.id()).collect()
    }

    #[test]
    fn test_from_json() -> Fallible<()> {
        let catalog = Catalog::from_json(SAMPLE)?;
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
        let symbols: Vec<&str> = catalog.cards.iter().map(|c| c.symbol()).collect();
        assert_eq!(symbols, vec!["H", "He", "Li", "Ne", "Na", "Ce"]);
        Ok(())
    }

    #[test]
    fn test_query_without_filters_returns_everything() -> Fallible<()> {
        let catalog = Catalog::from_json(SAMPLE)?;
        let cards = catalog.query(&Filters::default());
        assert_eq!(ids(&cards), vec![1, 2, 3, 10, 11, 58]);
        Ok(())
    }

    #[test]
    fn test_query_ors_within_and_ands_across_categories() -> Fallible<()> {
        let catalog = Catalog::from_json(SAMPLE)?;
        let filters = Filters {
            period: Selection::only([1, 2]),
            group: Selection::only([18]),
        };
        assert_eq!(ids(&catalog.query(&filters)), vec![2, 10]);
        let filters = Filters {
            period: Selection::only([1, 3]),
            group: Selection::all(),
        };
        assert_eq!(ids(&catalog.query(&filters)), vec![1, 2, 11]);
        Ok(())
    }

    #[test]
    fn test_query_group_filter_excludes_groupless_cards() -> Fallible<()> {
        let catalog = Catalog::from_json(SAMPLE)?;
        let filters = Filters {
            period: Selection::only([6]),
            group: Selection::only([3]),
        };
        assert!(catalog.query(&filters).is_empty());
        let filters = Filters {
            period: Selection::only([6]),
            group: Selection::all(),
        };
        assert_eq!(ids(&catalog.query(&filters)), vec![58]);
        Ok(())
    }

    #[test]
    fn test_query_returns_independent_copies() -> Fallible<()> {
        let catalog = Catalog::from_json(SAMPLE)?;
        let mut cards = catalog.query(&Filters::default());
        cards.clear();
        assert_eq!(catalog.len(), 6);
        Ok(())
    }

    #[test]
    fn test_malformed_json() {
        let result = Catalog::from_json("[{\"id\": 1,");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field() {
        let result = Catalog::from_json(r#"[{"id": 1, "symbol": "H", "period": 1}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_id() {
        let json = r#"[
            {"id": 1, "symbol": "H", "name": "Vodík", "atomic_number": 1, "period": 1, "group": 1},
            {"id": 1, "symbol": "He", "name": "Helium", "atomic_number": 2, "period": 1, "group": 18}
        ]"#;
        let err = Catalog::from_json(json).err().unwrap();
        assert_eq!(
            err.to_string(),
            "error: malformed catalog: duplicate id 1"
        );
    }

    #[test]
    fn test_invalid_period_and_group() {
        let json = r#"[{"id": 1, "symbol": "H", "name": "Vodík", "atomic_number": 1, "period": 8, "group": 1}]"#;
        assert!(Catalog::from_json(json).is_err());
        let json = r#"[{"id": 1, "symbol": "H", "name": "Vodík", "atomic_number": 1, "period": 1, "group": 19}]"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[test]
    fn test_blank_symbol() {
        let json = r#"[{"id": 1, "symbol": " ", "name": "Vodík", "atomic_number": 1, "period": 1, "group": 1}]"#;
        assert!(Catalog::from_json(json).is_err());
    }

    #[tokio::test]
    async fn test_load_fixture() -> Fallible<()> {
        let path = PathBuf::from("./test/elements.json");
        let catalog = Catalog::load(&path).await?;
        assert_eq!(catalog.len(), 11);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let path = PathBuf::from("./test/derpherp.json");
        let result = Catalog::load(&path).await;
        assert!(result.is_err());
    }
}
