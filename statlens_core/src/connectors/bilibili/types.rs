use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::{lenient_opt_u64, lenient_string, lenient_u64, null_as_default};

/// `{code, message, data}` wrapper shared by every Bilibili web API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Owner {
    #[serde(deserialize_with = "lenient_u64")]
    pub mid: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub face: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VideoStatRaw {
    #[serde(deserialize_with = "lenient_u64")]
    pub view: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub danmaku: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub reply: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub favorite: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub coin: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub share: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub like: u64,
}

/// `/x/web-interface/view` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VideoView {
    #[serde(deserialize_with = "lenient_string")]
    pub bvid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pic: String,
    #[serde(deserialize_with = "lenient_string")]
    pub desc: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub pubdate: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(deserialize_with = "null_as_default")]
    pub stat: VideoStatRaw,
}

/// `/x/space/acc/info` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountInfo {
    #[serde(deserialize_with = "lenient_u64")]
    pub mid: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub face: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sign: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardProfile {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub face: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sign: String,
}

/// `/x/web-interface/card` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardInfo {
    pub card: Option<CardProfile>,
    /// Number of uploads, not views
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub archive_count: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub like_num: u64,
}

/// One entry of `/x/space/arc/search`, whose counters use different names
/// than the full video record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArcItem {
    #[serde(deserialize_with = "lenient_string")]
    pub bvid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pic: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
    #[serde(deserialize_with = "lenient_u64")]
    pub created: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub play: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub video_review: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub comment: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub favorites: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArcList {
    pub vlist: Option<Vec<ArcItem>>,
}

/// `/x/space/arc/search` payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArcSearch {
    pub list: Option<ArcList>,
}

impl ArcSearch {
    /// Most recent upload, if the creator has any.
    pub fn into_first(self) -> Option<ArcItem> {
        self.list?.vlist?.into_iter().next()
    }
}

/// One entry of `/x/web-interface/archive/related`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelatedVideo {
    #[serde(deserialize_with = "lenient_string")]
    pub bvid: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(deserialize_with = "null_as_default")]
    pub stat: VideoStatRaw,
}

/// `/x/web-interface/archive/related` payload. Entries are decoded one at a
/// time and the ones that do not decode are dropped, so upstream order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedList(pub Vec<RelatedVideo>);

impl RelatedList {
    pub fn into_vec(self) -> Vec<RelatedVideo> {
        self.0
    }
}

impl<'de> Deserialize<'de> for RelatedList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => RelatedList(
                items
                    .into_iter()
                    .filter(|item| item.is_object())
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => RelatedList::default(),
        })
    }
}

/// `/x/relation/stat` payload
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RelationStat {
    #[serde(deserialize_with = "lenient_u64")]
    pub follower: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub following: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveStat {
    #[serde(deserialize_with = "lenient_opt_u64")]
    pub view: Option<u64>,
}

/// `/x/space/upstat` payload
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UpStat {
    pub archive: Option<ArchiveStat>,
    #[serde(deserialize_with = "lenient_u64")]
    pub likes: u64,
}
