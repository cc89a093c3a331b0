use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{PromoError, Result};
use crate::models::{PromoDraft, PromoRecord, OTHER_CATEGORY};

/// Ordered category -> keywords table. Order decides ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    entries: Vec<(String, Vec<String>)>,
}

const DEFAULT_CATEGORIES: &[(&str, &[&str])] = &[
    ("Flights", &["flight", "airline", "airfare", "fly", "domestic", "international"]),
    ("Travel", &["hotel", "vacation", "travel", "resort", "cruise", "booking", "getaway"]),
    ("Food", &["pizza", "restaurant", "menu", "delivery", "meal", "burger", "food"]),
    ("Entertainment", &["concert", "tickets", "festival", "movie", "show", "event", "music"]),
    ("Electronics", &["laptop", "phone", "tv", "headphones", "electronics", "tablet", "camera"]),
    ("Beauty", &["beauty", "skincare", "makeup", "fragrance", "salon", "cosmetics"]),
    ("Retail", &["clothing", "apparel", "shoes", "accessories", "store", "shop", "shipping"]),
    ("Other", &[]),
];

impl CategoryMap {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(name, kws)| (name.to_string(), kws.iter().map(|k| k.to_string()).collect()))
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Map<String, Value> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let Value::Array(items) = value else {
                return Err(PromoError::CategoryMap(format!(
                    "keywords for '{name}' must be a list"
                )));
            };
            let keywords = items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            entries.push((name, keywords));
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load `path`, degrading to an empty map (everything "Other") when the
    /// file is missing or malformed.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "category map unavailable, using none"
                );
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut map = Map::new();
        for (name, keywords) in &self.entries {
            map.insert(
                name.clone(),
                Value::Array(keywords.iter().cloned().map(Value::String).collect()),
            );
        }
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn score(search_text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|k| !k.is_empty() && search_text.contains(&k.to_lowercase()))
        .count()
}

/// Pick the category whose keywords best match the draft's snippets.
pub fn categorize(draft: &PromoDraft, categories: &CategoryMap) -> String {
    let search_text = format!("{} {}", draft.raw_snippet, draft.subject).to_lowercase();

    let mut best: Option<(&str, usize)> = None;
    for (name, keywords) in categories.entries() {
        if name == OTHER_CATEGORY {
            continue;
        }
        let s = score(&search_text, keywords);
        if s > 0 && best.map_or(true, |(_, top)| s > top) {
            best = Some((name.as_str(), s));
        }
    }
    best.map(|(name, _)| name.to_string())
        .unwrap_or_else(|| OTHER_CATEGORY.to_string())
}

pub fn categorize_drafts(drafts: Vec<PromoDraft>, categories: &CategoryMap) -> Vec<PromoRecord> {
    drafts
        .into_iter()
        .map(|draft| {
            let category = categorize(&draft, categories);
            PromoRecord::from_draft(draft, category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(snippet: &str, subject: &str) -> PromoDraft {
        PromoDraft {
            code: "SAVE10".to_string(),
            discount: "10% off".to_string(),
            expiration: None,
            merchant: "Shop".to_string(),
            raw_snippet: snippet.to_string(),
            subject: subject.to_string(),
        }
    }

    fn map(json: &str) -> CategoryMap {
        CategoryMap::from_json(json).unwrap()
    }

    #[test]
    fn test_highest_score_wins() {
        let cats = map(r#"{"Food": ["pizza"], "Flights": ["flight", "airline"]}"#);
        let d = draft("Book a flight on our airline, pizza on board", "");
        assert_eq!(categorize(&d, &cats), "Flights");
    }

    #[test]
    fn test_tie_goes_to_first_in_map_order() {
        let d = draft("pizza and a movie", "");
        assert_eq!(categorize(&d, &map(r#"{"Food": ["pizza"], "Fun": ["movie"]}"#)), "Food");
        assert_eq!(categorize(&d, &map(r#"{"Fun": ["movie"], "Food": ["pizza"]}"#)), "Fun");
    }

    #[test]
    fn test_subject_is_searched_case_insensitively() {
        let cats = map(r#"{"Travel": ["Hotel"]}"#);
        assert_eq!(categorize(&draft("nothing here", "HOTEL deals"), &cats), "Travel");
    }

    #[test]
    fn test_other_when_nothing_scores() {
        let cats = map(r#"{"Food": ["pizza"]}"#);
        assert_eq!(categorize(&draft("socks", "sale"), &cats), OTHER_CATEGORY);
        assert_eq!(categorize(&draft("socks", "sale"), &CategoryMap::default()), OTHER_CATEGORY);
    }

    #[test]
    fn test_other_entry_is_never_scored() {
        let cats = map(r#"{"Other": ["socks"], "Food": ["pizza"]}"#);
        assert_eq!(categorize(&draft("socks", ""), &cats), OTHER_CATEGORY);
    }

    #[test]
    fn test_counts_keywords_not_occurrences() {
        let cats = map(r#"{"A": ["pizza"], "B": ["menu", "meal"]}"#);
        let d = draft("pizza pizza pizza, see the menu for a meal", "");
        assert_eq!(categorize(&d, &cats), "B");
    }

    #[test]
    fn test_from_json_rejects_non_list() {
        assert!(CategoryMap::from_json(r#"{"Food": "pizza"}"#).is_err());
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let cats = CategoryMap::builtin();
        let reloaded = CategoryMap::from_json(&cats.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, cats);
        assert_eq!(reloaded.entries()[0].0, "Flights");
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cats = CategoryMap::load_or_empty(&dir.path().join("missing.json"));
        assert!(cats.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.json");
        std::fs::write(&path, r#"{"Zeta": ["z"], "Alpha": ["a"]}"#).unwrap();
        let cats = CategoryMap::load(&path).unwrap();
        let names: Vec<_> = cats.entries().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
