//! Baked-in reference data. Seeds the store on first boot and backs category
//! selection when the store is missing a record.

use chrono::{DateTime, Utc};

use crate::models::category::CategoryRow;
use crate::models::persona::PersonaRow;

pub struct CategorySeed {
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

impl CategorySeed {
    pub fn to_row(&self, created_at: DateTime<Utc>) -> CategoryRow {
        CategoryRow {
            name: self.name.to_string(),
            description: self.description.to_string(),
            keywords: self.keywords.iter().map(|k| k.to_string()).collect(),
            created_at,
        }
    }
}

pub struct PersonaSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

impl PersonaSeed {
    pub fn to_row(&self, created_at: DateTime<Utc>) -> PersonaRow {
        PersonaRow {
            name: self.name.to_string(),
            description: self.description.to_string(),
            tags: self.tags.iter().map(|t| t.to_string()).collect(),
            created_at,
        }
    }
}

pub static CATEGORIES: &[CategorySeed] = &[
    CategorySeed {
        name: "relationship_conflict",
        description: "Navigating disagreements and finding understanding",
        keywords: &["conflict", "understanding", "patience", "resolution", "communication"],
    },
    CategorySeed {
        name: "breakup_healing",
        description: "Recovering from heartbreak and finding self again",
        keywords: &["healing", "letting go", "heartbreak", "recovery", "strength"],
    },
    CategorySeed {
        name: "self_worth",
        description: "Recognizing your own value and standards",
        keywords: &["value", "standards", "respect", "confidence", "authenticity"],
    },
    CategorySeed {
        name: "loyalty_and_trust",
        description: "The importance of faithfulness and honesty",
        keywords: &["loyalty", "trust", "faithfulness", "honesty", "integrity"],
    },
    CategorySeed {
        name: "effort_imbalance",
        description: "Addressing one-sided relationships",
        keywords: &["effort", "reciprocity", "balance", "fairness", "investment"],
    },
    CategorySeed {
        name: "moving_on",
        description: "The courage to leave what no longer serves you",
        keywords: &["growth", "change", "past", "future", "courage"],
    },
    CategorySeed {
        name: "toxic_relationships",
        description: "Identifying and escaping unhealthy patterns",
        keywords: &["boundaries", "red flags", "health", "distance", "protection"],
    },
    CategorySeed {
        name: "self_growth",
        description: "The journey of becoming your best self",
        keywords: &["growth", "learning", "evolution", "potential", "becoming"],
    },
    CategorySeed {
        name: "discipline",
        description: "Doing what needs to be done",
        keywords: &["discipline", "consistency", "habits", "focus", "willpower"],
    },
    CategorySeed {
        name: "financial_mindset",
        description: "Thinking correctly about wealth and success",
        keywords: &["money", "wealth", "abundance", "freedom", "investment"],
    },
    CategorySeed {
        name: "success_drive",
        description: "The ambition to achieve greatness",
        keywords: &["ambition", "drive", "goals", "achievement", "hustle"],
    },
    CategorySeed {
        name: "friendship_truths",
        description: "Real talk about friends and circles",
        keywords: &["friendship", "circle", "loyalty", "support", "truth"],
    },
    CategorySeed {
        name: "love_and_commitment",
        description: "Deep dedication in partnership",
        keywords: &["commitment", "dedication", "partnership", "forever", "choice"],
    },
    CategorySeed {
        name: "personal_boundaries",
        description: "Protecting your energy and space",
        keywords: &["boundaries", "space", "energy", "protection", "limits"],
    },
    CategorySeed {
        name: "dating_realities",
        description: "The modern truth about seeking love",
        keywords: &["dating", "modern love", "expectations", "reality", "search"],
    },
];

pub static PERSONAS: &[PersonaSeed] = &[
    PersonaSeed {
        name: "Marcus Aurelius",
        description: "Roman Emperor and Stoic philosopher",
        tags: &["stoicism", "wisdom", "discipline", "leadership"],
    },
    PersonaSeed {
        name: "Maya Angelou",
        description: "Poet and civil rights activist",
        tags: &["resilience", "courage", "self-growth", "healing"],
    },
    PersonaSeed {
        name: "Rumi",
        description: "Persian poet and Sufi mystic",
        tags: &["love", "spirituality", "wisdom", "healing"],
    },
    PersonaSeed {
        name: "Eleanor Roosevelt",
        description: "Former First Lady and human rights advocate",
        tags: &["courage", "leadership", "self-growth", "empowerment"],
    },
    PersonaSeed {
        name: "Seneca",
        description: "Stoic philosopher",
        tags: &["stoicism", "wisdom", "discipline", "life"],
    },
    PersonaSeed {
        name: "Buddha",
        description: "Spiritual teacher and founder of Buddhism",
        tags: &["wisdom", "peace", "mindfulness", "healing"],
    },
    PersonaSeed {
        name: "Oprah Winfrey",
        description: "Media mogul and philanthropist",
        tags: &["success", "empowerment", "self-growth", "motivation"],
    },
    PersonaSeed {
        name: "Nelson Mandela",
        description: "Anti-apartheid revolutionary and former President",
        tags: &["courage", "leadership", "resilience", "healing"],
    },
    PersonaSeed {
        name: "Lao Tzu",
        description: "Ancient Chinese philosopher",
        tags: &["wisdom", "simplicity", "balance", "life"],
    },
    PersonaSeed {
        name: "Brené Brown",
        description: "Research professor and author",
        tags: &["vulnerability", "courage", "connection", "self-growth"],
    },
];

pub fn find_category(name: &str) -> Option<&'static CategorySeed> {
    CATEGORIES.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_category_names_are_unique() {
        let names: HashSet<_> = CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CATEGORIES.len());
    }

    #[test]
    fn test_persona_names_are_unique() {
        let names: HashSet<_> = PERSONAS.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), PERSONAS.len());
    }

    #[test]
    fn test_find_category_hit_and_miss() {
        assert!(find_category("discipline").is_some());
        assert!(find_category("healing").is_none());
    }

    #[test]
    fn test_to_row_keeps_keyword_order() {
        let row = CATEGORIES[0].to_row(Utc::now());
        assert_eq!(row.name, "relationship_conflict");
        assert_eq!(row.keywords.first().map(String::as_str), Some("conflict"));
        assert_eq!(row.keywords.len(), 5);
    }
}
