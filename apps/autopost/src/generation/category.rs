//! Category Selector — weighted group draw, then name resolution with fallbacks.
//!
//! Never fails: store misses and store errors both fall through to the baked-in
//! catalog, and a name missing from the catalog falls through to a uniform pick
//! over the whole catalog.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::catalog::{self, CATEGORIES};
use crate::generation::random::Dice;
use crate::models::category::CategoryRow;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Relationship,
    SelfWorth,
    Ambition,
    Friendship,
    Healing,
}

impl CategoryGroup {
    #[cfg(test)]
    pub const ALL: [CategoryGroup; 5] = [
        CategoryGroup::Relationship,
        CategoryGroup::SelfWorth,
        CategoryGroup::Ambition,
        CategoryGroup::Friendship,
        CategoryGroup::Healing,
    ];

    /// Maps a draw in `[0, 100)` onto the 40/25/15/10/10 buckets.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 40.0 {
            CategoryGroup::Relationship
        } else if roll < 65.0 {
            CategoryGroup::SelfWorth
        } else if roll < 80.0 {
            CategoryGroup::Ambition
        } else if roll < 90.0 {
            CategoryGroup::Friendship
        } else {
            CategoryGroup::Healing
        }
    }

    /// Category names in this group. The healing group has no `healing`
    /// category; it resolves to the breakup/moving-on pair.
    pub fn category_names(&self) -> &'static [&'static str] {
        match self {
            CategoryGroup::Relationship => &[
                "relationship_conflict",
                "love_and_commitment",
                "effort_imbalance",
                "dating_realities",
                "toxic_relationships",
            ],
            CategoryGroup::SelfWorth => &["self_worth", "self_growth", "personal_boundaries"],
            CategoryGroup::Ambition => &["success_drive", "discipline", "financial_mindset"],
            CategoryGroup::Friendship => &["friendship_truths", "loyalty_and_trust"],
            CategoryGroup::Healing => &["breakup_healing", "moving_on"],
        }
    }
}

/// Where the selected category record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySource {
    Store,
    Catalog,
    RandomCatalog,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedCategory {
    pub group: CategoryGroup,
    pub category: CategoryRow,
    pub source: CategorySource,
}

pub struct CategorySelector {
    store: Arc<dyn Store>,
}

impl CategorySelector {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Draws a group and a name within it. Pure apart from the dice.
    pub fn draw(dice: &Dice) -> (CategoryGroup, &'static str) {
        let group = CategoryGroup::from_roll(dice.unit() * 100.0);
        let names = group.category_names();
        (group, names[dice.index(names.len())])
    }

    pub async fn select(&self, dice: &Dice) -> SelectedCategory {
        let (group, name) = Self::draw(dice);
        self.resolve(group, name, dice).await
    }

    /// Store record first, then the catalog entry, then any catalog entry.
    pub(crate) async fn resolve(
        &self,
        group: CategoryGroup,
        name: &str,
        dice: &Dice,
    ) -> SelectedCategory {
        match self.store.find_category_by_name(name).await {
            Ok(Some(category)) => {
                return SelectedCategory {
                    group,
                    category,
                    source: CategorySource::Store,
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Category lookup for \"{name}\" failed, using catalog: {e}"),
        }

        let now = Utc::now();
        if let Some(seed) = catalog::find_category(name) {
            warn!("Category \"{name}\" not in store, using in-memory fallback");
            return SelectedCategory {
                group,
                category: seed.to_row(now),
                source: CategorySource::Catalog,
            };
        }

        warn!("Category \"{name}\" not found anywhere, using random fallback");
        let seed = &CATEGORIES[dice.index(CATEGORIES.len())];
        SelectedCategory {
            group,
            category: seed.to_row(now),
            source: CategorySource::RandomCatalog,
        }
    }
}
