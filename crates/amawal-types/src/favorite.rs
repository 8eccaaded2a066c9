use serde::{Deserialize, Serialize};

use crate::result::SearchResult;

/// Denormalized snapshot sent when adding a favorite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub source_collection: String,
    pub entry_id: String,
    pub entry_word: String,
    pub entry_translation: String,
    pub entry_type: String,
}

impl FavoriteRequest {
    pub fn from_result(result: &SearchResult) -> Self {
        Self {
            source_collection: result.source.collection_name().to_string(),
            entry_id: result.entry_key().to_string(),
            entry_word: result.word.clone(),
            entry_translation: result.translation.clone(),
            entry_type: result.entry_type.clone(),
        }
    }
}

/// Favorite as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub source_collection: String,
    pub entry_id: String,
    #[serde(default)]
    pub entry_word: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorited: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemovalStatus {
    pub removed: bool,
}
