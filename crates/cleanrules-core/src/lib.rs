pub mod report;
pub mod rules;
pub mod settings;

use std::path::PathBuf;

pub use report::{render, render_all, render_all_as, render_as, render_index, Format, RenderOptions};
pub use rules::{Rule, RULES};
pub use settings::{read_settings, read_settings_from, settings_dir, write_settings_to, Settings};

// --- Errors ---

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown rule `{id}`")]
    NotFound {
        id: String,
        /// Closest catalog id, if the request looks like a typo of one
        suggestion: Option<&'static str>,
    },

    #[error("serialize rules: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings file {}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

// --- Catalog ---

/// All rules in guide order. The slice is static, so repeated calls yield the same sequence.
pub fn list_rules() -> &'static [Rule] {
    RULES
}

/// Look up a rule by exact id.
pub fn get_rule(id: &str) -> Result<&'static Rule> {
    match RULES.iter().find(|r| r.id == id) {
        Some(rule) => {
            tracing::debug!(id, "rule found");
            Ok(rule)
        }
        None => {
            let suggestion = suggest(id).map(|r| r.id);
            tracing::warn!(id, ?suggestion, "unknown rule");
            Err(Error::NotFound {
                id: id.to_string(),
                suggestion,
            })
        }
    }
}

pub fn rule_ids() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|r| r.id)
}

/// Find the rule a mistyped id most likely refers to.
/// Tries case-insensitive id, then title, then substring either way, then a shared prefix.
pub fn suggest(query: &str) -> Option<&'static Rule> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    if let Some(r) = RULES.iter().find(|r| r.id == query) {
        return Some(r);
    }

    if let Some(r) = RULES.iter().find(|r| r.title.to_lowercase() == query) {
        return Some(r);
    }

    // "error handling" and "error_handling" should both land on "error-handling"
    let normalized = query.replace([' ', '_'], "-");
    if let Some(r) = RULES.iter().find(|r| r.id == normalized) {
        return Some(r);
    }

    if let Some(r) = RULES
        .iter()
        .find(|r| r.id.contains(&normalized) || normalized.contains(r.id))
    {
        return Some(r);
    }

    RULES
        .iter()
        .map(|r| (r, common_prefix_len(r.id, &normalized)))
        .filter(|(_, len)| *len >= 3)
        .max_by_key(|(_, len)| *len)
        .map(|(r, _)| r)
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_resolves_to_itself() {
        for rule in list_rules() {
            assert_eq!(get_rule(rule.id).unwrap().id, rule.id);
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        match get_rule("nonexistent") {
            Err(Error::NotFound { id, suggestion }) => {
                assert_eq!(id, "nonexistent");
                assert_eq!(suggestion, None);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(get_rule("Naming").is_err());
    }

    #[test]
    fn not_found_carries_suggestion() {
        match get_rule("error_handling") {
            Err(Error::NotFound { suggestion, .. }) => assert_eq!(suggestion, Some("error-handling")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn suggest_matches_titles_and_fragments() {
        assert_eq!(suggest("Naming").map(|r| r.id), Some("naming"));
        assert_eq!(suggest("Readable tests").map(|r| r.id), Some("tests"));
        assert_eq!(suggest("data").map(|r| r.id), Some("data-structures"));
        assert_eq!(suggest("format").map(|r| r.id), Some("formatting"));
        assert_eq!(suggest("commentary").map(|r| r.id), Some("comments"));
        assert_eq!(suggest("xyz"), None);
        assert_eq!(suggest("   "), None);
    }

    #[test]
    fn error_messages() {
        let err = get_rule("bogus").unwrap_err();
        assert_eq!(err.to_string(), "unknown rule `bogus`");
    }

    #[test]
    fn rule_ids_follow_catalog_order() {
        let ids: Vec<_> = rule_ids().collect();
        let from_list: Vec<_> = list_rules().iter().map(|r| r.id).collect();
        assert_eq!(ids, from_list);
    }
}
