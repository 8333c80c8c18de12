//! Fuzzy name suggestions for catalogue lookups that miss.
//!
//! Names are scored with Jaro-Winkler against the full display name and
//! against each word of it, so `"ketanest"` finds `"Esketamin (Ketanest S)"`.

use strsim::jaro_winkler;

use super::Catalogue;

/// Minimum similarity for a name to be suggested.
const MIN_SIMILARITY: f64 = 0.80;

/// A suggested catalogue name.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion<'a> {
    pub name: &'a str,
    /// Similarity (0.0 - 1.0)
    pub score: f64,
}

impl Catalogue {
    /// Names similar to `query`, best first.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Suggestion<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<Suggestion<'_>> = self
            .names()
            .map(|name| Suggestion {
                name,
                score: name_similarity(name, &query),
            })
            .filter(|s| s.score >= MIN_SIMILARITY)
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }
}

fn name_similarity(name: &str, query: &str) -> f64 {
    let lower = name.to_lowercase();
    let whole = jaro_winkler(&lower, query);

    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| jaro_winkler(word, query))
        .fold(whole, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::standard_catalogue;

    #[test]
    fn test_suggest_by_brand_name() {
        let suggestions = standard_catalogue().suggest("ketanest", 3);
        assert_eq!(suggestions[0].name, "Esketamin (Ketanest S)");
    }

    #[test]
    fn test_suggest_misspelling() {
        let suggestions = standard_catalogue().suggest("noradrenaline", 3);
        assert_eq!(suggestions[0].name, "Noradrenalin (Arterenol)");
    }

    #[test]
    fn test_suggest_limit_and_order() {
        let suggestions = standard_catalogue().suggest("remifentanil", 5);
        assert!(suggestions.len() >= 2);
        assert!(suggestions[..2].iter().all(|s| s.name.starts_with("Remifentanil")));
        assert!(suggestions[0].score >= suggestions[1].score);

        assert_eq!(standard_catalogue().suggest("remifentanil", 1).len(), 1);
    }

    #[test]
    fn test_suggest_nothing_similar() {
        assert!(standard_catalogue().suggest("zzzzqx", 5).is_empty());
        assert!(standard_catalogue().suggest("   ", 5).is_empty());
    }
}
