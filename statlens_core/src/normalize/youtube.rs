// src/normalize/youtube.rs
//
// YouTube creator analysis over flat yt-dlp output. Extraction failure is not
// fatal here: the demonstration record stands in so the caller always gets a
// well-formed result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::connectors::youtube::{
    CollectionRecord, ExtractedInfo, MetadataExtractor, VideoRecord,
};
use crate::demo::{
    demo_competitors, known_creator, known_video, KnownVideo, DEMO_FALLBACK_RECORD,
};
use crate::model::{
    AnalysisResult, CurrentVideo, Platform, TargetUploader, UploaderInfo, UploaderStats,
    VideoStat,
};
use crate::normalize::resolution::{
    resolve_channel_url, resolve_collection_uploader, resolve_video_channel_url, UNKNOWN_UPLOADER,
};
use crate::normalize::CompetitorSet;
use crate::utils::non_empty;

pub struct YouTubeNormalizer {
    extractor: Arc<dyn MetadataExtractor>,
}

impl YouTubeNormalizer {
    pub fn new(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self { extractor }
    }

    /// Analyze a canonical YouTube target (channel, handle, video URL or
    /// `ytsearch1:` query). Never fails.
    pub async fn analyze(&self, target: &str) -> AnalysisResult {
        let (mut info, current_video) = match self.extract_or_demo(target).await {
            ExtractedInfo::Video(record) => map_video(target, &record),
            ExtractedInfo::Collection(collection) => map_collection(&collection),
        };
        let archive_view = apply_demo_overrides(target, &mut info);

        // Fixed demonstration list: there is no related-creator discovery yet
        let competitors: CompetitorSet = demo_competitors().into_iter().collect();

        AnalysisResult {
            platform: Platform::Youtube,
            target_uploader: TargetUploader {
                info,
                stats: UploaderStats {
                    likes: 0,
                    archive_view,
                },
                current_video,
            },
            competitors: competitors.into_vec(),
        }
    }

    async fn extract_or_demo(&self, target: &str) -> ExtractedInfo {
        let raw = match self.extractor.extract(target, true).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(extractor = self.extractor.name(), target, error = %e, "extraction failed");
                return demo_info();
            }
        };

        match ExtractedInfo::decode(raw) {
            Ok(Some(info)) => info,
            Ok(None) => {
                info!(target, "extractor returned nothing");
                demo_info()
            }
            Err(e) => {
                warn!(target, error = %e, "extractor output did not decode");
                demo_info()
            }
        }
    }
}

fn demo_info() -> ExtractedInfo {
    info!("substituting demonstration record");
    ExtractedInfo::Video(DEMO_FALLBACK_RECORD.clone())
}

fn map_video(target: &str, record: &VideoRecord) -> (UploaderInfo, CurrentVideo) {
    let known = known_video(target);
    // Known demo video: fill counters the flat record left missing or zero
    let count = |extracted: Option<u64>, demo: fn(&KnownVideo) -> u64| {
        match (extracted.filter(|n| *n > 0), known) {
            (Some(n), _) => n,
            (None, Some(video)) => demo(video),
            (None, None) => 0,
        }
    };

    let follower = record.channel_follower_count.unwrap_or(0);
    let info = UploaderInfo {
        name: non_empty(record.uploader.as_deref())
            .unwrap_or(UNKNOWN_UPLOADER)
            .to_string(),
        face: String::new(),
        sign: String::new(),
        fans: follower,
        follower,
        link: resolve_video_channel_url(record).value,
    };

    let current = CurrentVideo {
        id: record.id.clone().unwrap_or_default(),
        title: non_empty(record.title.as_deref())
            .unwrap_or(CurrentVideo::UNTITLED)
            .to_string(),
        desc: record.description.clone().unwrap_or_default(),
        pic: non_empty(record.thumbnail.as_deref())
            .or(record.best_thumbnail())
            .unwrap_or_default()
            .to_string(),
        pubdate: record.timestamp.unwrap_or(0),
        stat: VideoStat {
            view: count(record.view_count, |v| v.view_count),
            reply: count(record.comment_count, |v| v.comment_count),
            like: count(record.like_count, |v| v.like_count),
            ..VideoStat::default()
        },
    };

    (info, current)
}

fn map_collection(collection: &CollectionRecord) -> (UploaderInfo, CurrentVideo) {
    let first = collection.entries.first();
    debug!(entries = collection.entries.len(), "mapping collection");

    let current = match first {
        Some(entry) => CurrentVideo {
            id: entry.id.clone().unwrap_or_default(),
            title: non_empty(entry.title.as_deref())
                .unwrap_or(CurrentVideo::UNTITLED)
                .to_string(),
            desc: entry.description.clone().unwrap_or_default(),
            pic: entry.best_thumbnail().unwrap_or_default().to_string(),
            pubdate: entry.timestamp.unwrap_or(0),
            stat: VideoStat {
                view: entry.view_count.unwrap_or(0),
                reply: entry.comment_count.unwrap_or(0),
                like: entry.like_count.unwrap_or(0),
                ..VideoStat::default()
            },
        },
        None => CurrentVideo::untitled(),
    };

    let follower = collection.channel_follower_count.unwrap_or(0);
    let info = UploaderInfo {
        name: resolve_collection_uploader(collection, first).value,
        face: String::new(),
        sign: String::new(),
        fans: follower,
        follower,
        link: resolve_channel_url(collection, first).value,
    };

    (info, current)
}

/// Apply the demonstration tables; returns the channel view total (0 when
/// neither the creator nor the video is known).
///
/// A known video wins over a known creator for the channel figures. The
/// creator avatar wins over the video's fallback avatar.
fn apply_demo_overrides(target: &str, info: &mut UploaderInfo) -> u64 {
    let creator = known_creator(&info.name);
    let video = known_video(target);

    if let Some(creator) = creator {
        info.face = creator.avatar.to_string();
    }

    if let Some(video) = video {
        debug!(video_id = video.video_id, "applying known video overrides");
        info.fans = video.fans;
        info.follower = video.fans;
        if info.face.is_empty() {
            info.face = video.fallback_avatar.to_string();
        }
        return video.channel_view_count;
    }

    match creator {
        Some(creator) => {
            debug!(needle = creator.needle, "applying known creator overrides");
            info.fans = creator.fans;
            info.follower = creator.fans;
            creator.channel_view_count
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_video_defaults_missing_fields() {
        let (info, current) = map_video("https://youtu.be/aaaaaaaaaaa", &VideoRecord::default());
        assert_eq!(info.name, "Unknown");
        assert_eq!(info.fans, 0);
        assert_eq!(current.title, "Untitled");
        assert_eq!(current.stat, VideoStat::default());
    }

    #[test]
    fn test_map_video_fills_known_video_counters() {
        let record = VideoRecord {
            view_count: Some(7),
            ..VideoRecord::default()
        };
        let (_, current) = map_video("https://www.youtube.com/watch?v=HMC-s_zkNyE", &record);
        assert_eq!(current.stat.view, 7);
        assert_eq!(current.stat.like, 5_600);
        assert_eq!(current.stat.reply, 420);
    }

    #[test]
    fn test_empty_collection_is_untitled() {
        let (info, current) = map_collection(&CollectionRecord::default());
        assert_eq!(current.title, "Untitled");
        assert_eq!(info.name, "Unknown");
        assert_eq!(info.link, "");
    }

    #[test]
    fn test_overrides_without_match_keep_generic_values() {
        let mut info = UploaderInfo {
            name: "Marques Brownlee".into(),
            fans: 19,
            follower: 19,
            ..UploaderInfo::default()
        };
        assert_eq!(apply_demo_overrides("https://www.youtube.com/@mkbhd", &mut info), 0);
        assert_eq!(info.fans, 19);
        assert_eq!(info.face, "");
    }

    #[test]
    fn test_known_creator_override_wins() {
        let mut info = UploaderInfo {
            name: "Fireship".into(),
            fans: 19,
            follower: 19,
            ..UploaderInfo::default()
        };
        let views = apply_demo_overrides("https://www.youtube.com/@fireship", &mut info);
        assert_eq!(views, 350_000_000);
        assert_eq!(info.fans, 3_100_000);
        assert_eq!(info.follower, 3_100_000);
        assert!(info.face.starts_with("https://yt3.googleusercontent.com/"));
    }
}
