//! Boundary decoding of yt-dlp `--dump-single-json` output.
//!
//! yt-dlp prints either a single video or a playlist-like object (channel,
//! playlist, search) whose `entries` are shallow video records when run with
//! `--flat-playlist`. Both shapes are decoded into [`ExtractedInfo`]; every
//! field is optional and type mismatches decode as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::{lenient_opt_string, lenient_opt_u64};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Thumbnail {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VideoRecord {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient_thumbnails")]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub view_count: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub like_count: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub comment_count: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub timestamp: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub uploader: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub uploader_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub channel_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub channel_follower_count: Option<u64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub webpage_url: Option<String>,
}

impl VideoRecord {
    /// Largest thumbnail from the list (yt-dlp orders them ascending), else the
    /// single `thumbnail` field.
    pub fn best_thumbnail(&self) -> Option<&str> {
        self.thumbnails
            .iter()
            .rev()
            .find_map(|t| t.url.as_deref())
            .or(self.thumbnail.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionRecord {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub uploader: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub webpage_url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub channel_follower_count: Option<u64>,
    #[serde(deserialize_with = "lenient_entries")]
    pub entries: Vec<VideoRecord>,
}

/// The two shapes yt-dlp can answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedInfo {
    Video(VideoRecord),
    Collection(CollectionRecord),
}

impl ExtractedInfo {
    /// Decode raw extractor output. `Ok(None)` means "nothing usable came back"
    /// (`null` or an empty object).
    pub fn decode(value: Value) -> Result<Option<Self>, serde_json::Error> {
        let is_collection = match &value {
            Value::Object(map) if map.is_empty() => return Ok(None),
            Value::Object(map) => {
                map.get("_type").and_then(Value::as_str) == Some("playlist")
                    || map.contains_key("entries")
            }
            Value::Null => return Ok(None),
            _ => false,
        };

        if is_collection {
            Ok(Some(Self::Collection(serde_json::from_value(value)?)))
        } else {
            Ok(Some(Self::Video(serde_json::from_value(value)?)))
        }
    }
}

fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<VideoRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(|item| item.is_object())
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_thumbnails<'de, D>(deserializer: D) -> Result<Vec<Thumbnail>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
