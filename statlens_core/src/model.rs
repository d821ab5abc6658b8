//! The normalized creator analysis returned for every input, whatever the platform.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on `AnalysisResult::competitors`.
pub const MAX_COMPETITORS: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Bilibili,
    Youtube,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bilibili => write!(f, "bilibili"),
            Self::Youtube => write!(f, "youtube"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub platform: Platform,
    pub target_uploader: TargetUploader,
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetUploader {
    pub info: UploaderInfo,
    pub stats: UploaderStats,
    pub current_video: CurrentVideo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UploaderInfo {
    pub name: String,
    /// Avatar URL, empty when unknown
    pub face: String,
    /// Creator bio
    pub sign: String,
    pub fans: u64,
    pub follower: u64,
    /// Channel / space URL, empty when unknown
    pub link: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploaderStats {
    pub likes: u64,
    /// Cumulative view count across the creator's catalog
    pub archive_view: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CurrentVideo {
    /// BV id or YouTube video id, empty when unknown
    pub id: String,
    pub title: String,
    pub desc: String,
    pub pic: String,
    /// Unix seconds, 0 when unknown
    pub pubdate: u64,
    pub stat: VideoStat,
}

/// Counters have no platform equivalent on YouTube (danmaku, coin) and stay 0 there.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoStat {
    pub view: u64,
    pub danmaku: u64,
    pub reply: u64,
    pub favorite: u64,
    pub coin: u64,
    pub share: u64,
    pub like: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Competitor {
    pub mid: u64,
    pub name: String,
    pub face: String,
    pub fans: u64,
    pub follower: u64,
    pub video_title: String,
    pub video_view: u64,
    pub link: String,
}

impl CurrentVideo {
    pub const NO_VIDEOS_TITLE: &'static str = "No videos found";
    pub const UNTITLED: &'static str = "Untitled";

    /// Stand-in for a creator with no uploads.
    pub fn no_videos() -> Self {
        Self {
            title: Self::NO_VIDEOS_TITLE.to_string(),
            ..Self::default()
        }
    }

    pub fn untitled() -> Self {
        Self {
            title: Self::UNTITLED.to_string(),
            ..Self::default()
        }
    }
}
