use serde::{Deserialize, Serialize};

use crate::source::Source;

/// How a result matched the query, as reported by the backend ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactWord,
    ExactTranslation,
    StartsWord,
    StartsTranslation,
    ContainsWord,
    ContainsTranslation,
    #[serde(rename = "fuzzy_match")]
    Fuzzy,
    Random,
    #[serde(other)]
    Other,
}

impl MatchType {
    pub fn description(&self) -> &'static str {
        match self {
            MatchType::ExactWord => "Exact word match",
            MatchType::ExactTranslation => "Exact translation match",
            MatchType::StartsWord => "Word starts with query",
            MatchType::StartsTranslation => "Translation starts with query",
            MatchType::ContainsWord => "Word contains query",
            MatchType::ContainsTranslation => "Translation contains query",
            MatchType::Fuzzy => "Similar match",
            MatchType::Random => "Random entry",
            MatchType::Other => "Match found",
        }
    }
}

/// One row of a federated search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub id: String,
    pub source: Source,
    #[serde(default)]
    pub source_display_name: String,
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub relevance_score: f64,
    pub match_type: MatchType,
    #[serde(default)]
    pub highlighted_text: Option<String>,
    /// Cross-source identity, stable for the whole session
    #[serde(default)]
    pub global_id: String,
}

impl SearchResult {
    pub fn new(
        source: Source,
        id: impl Into<String>,
        word: impl Into<String>,
        translation: impl Into<String>,
        entry_type: impl Into<String>,
        match_type: MatchType,
    ) -> Self {
        let mut result = Self {
            id: id.into(),
            source,
            source_display_name: source.display_name().to_string(),
            word: word.into(),
            translation: translation.into(),
            entry_type: entry_type.into(),
            relevance_score: 0.0,
            match_type,
            highlighted_text: None,
            global_id: String::new(),
        };
        result.ensure_global_id();
        result
    }

    /// Identifier used by favorite calls: native id, or the word when the
    /// source has none
    pub fn entry_key(&self) -> &str {
        if self.id.is_empty() {
            &self.word
        } else {
            &self.id
        }
    }

    /// Fills `global_id` when the backend left it out. An existing value is
    /// never touched.
    pub fn ensure_global_id(&mut self) {
        if self.global_id.is_empty() {
            self.global_id = format!("{}:{}", self.source.collection_name(), self.entry_key());
        }
        if self.source_display_name.is_empty() {
            self.source_display_name = self.source.display_name().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "id": "1",
            "source": "AQELEI",
            "sourceDisplayName": "Aqelɛi",
            "word": "aman",
            "translation": "water",
            "type": "noun",
            "relevanceScore": 100,
            "matchType": "exact_word",
            "highlightedText": null,
            "globalId": "dictionary_aqelɛi:1"
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.source, Source::Aqelei);
        assert_eq!(result.entry_type, "noun");
        assert_eq!(result.match_type, MatchType::ExactWord);
        assert_eq!(result.global_id, "dictionary_aqelɛi:1");
        assert_eq!(result.relevance_score, 100.0);
    }

    #[test]
    fn unknown_match_type_falls_back() {
        let json = r#"{"source":"VERBS","word":"ddu","matchType":"phonetic"}"#;
        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.match_type, MatchType::Other);
        assert_eq!(result.match_type.description(), "Match found");
        assert_eq!(MatchType::Fuzzy.description(), "Similar match");
    }

    #[test]
    fn global_id_is_filled_once() {
        let json = r#"{"source":"VERBS","word":"ddu","matchType":"random"}"#;
        let mut result: SearchResult = serde_json::from_str(json).unwrap();
        assert!(result.global_id.is_empty());

        result.ensure_global_id();
        assert_eq!(result.global_id, "verbs:ddu");
        assert_eq!(result.source_display_name, "Verbs");

        result.id = "42".to_string();
        result.ensure_global_id();
        assert_eq!(result.global_id, "verbs:ddu");
    }

    #[test]
    fn entry_key_prefers_id() {
        let with_id = SearchResult::new(Source::Aqelei, "7", "aman", "water", "noun", MatchType::ExactWord);
        assert_eq!(with_id.entry_key(), "7");
        assert_eq!(with_id.global_id, "dictionary_aqelɛi:7");

        let without_id = SearchResult::new(Source::Aqelei, "", "aman", "water", "noun", MatchType::ExactWord);
        assert_eq!(without_id.entry_key(), "aman");
    }
}
