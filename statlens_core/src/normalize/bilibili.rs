// src/normalize/bilibili.rs
//
// Bilibili creator analysis. The identity fetches (the video record on the
// video path, the upload listing on the space path, the basic profile) are
// essential; everything else degrades to an empty or zero value with a warning.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::connectors::bilibili::{
    AccountInfo, ArcItem, BilibiliApi, CardInfo, RelatedVideo, UpStat, VideoView,
};
use crate::error::{AnalysisError, Result};
use crate::model::{
    AnalysisResult, Competitor, CurrentVideo, Platform, TargetUploader, UploaderInfo,
    UploaderStats, VideoStat,
};
use crate::normalize::resolution::{resolve_archive_view, resolve_likes, resolve_profile_text};
use crate::normalize::CompetitorSet;
use crate::resolver::{extract_bvid, extract_space_mid, BILIBILI_SPACE_HOST};

pub fn space_url(mid: u64) -> String {
    format!("https://{}/{}", BILIBILI_SPACE_HOST, mid)
}

/// The video the analysis is anchored on, plus the owner fields its record
/// carried (used as a last-resort profile source).
#[derive(Debug, Default)]
struct SeedVideo {
    current: CurrentVideo,
    owner_name: String,
    owner_face: String,
}

impl SeedVideo {
    fn bvid(&self) -> Option<&str> {
        Some(self.current.id.as_str()).filter(|id| !id.is_empty())
    }
}

impl From<VideoView> for SeedVideo {
    fn from(view: VideoView) -> Self {
        let stat = view.stat;
        Self {
            current: CurrentVideo {
                id: view.bvid,
                title: view.title,
                desc: view.desc,
                pic: view.pic,
                pubdate: view.pubdate,
                stat: VideoStat {
                    view: stat.view,
                    danmaku: stat.danmaku,
                    reply: stat.reply,
                    favorite: stat.favorite,
                    coin: stat.coin,
                    share: stat.share,
                    like: stat.like,
                },
            },
            owner_name: view.owner.name,
            owner_face: view.owner.face,
        }
    }
}

/// Listing entries use their own counter names and carry no coin, share or
/// like counts.
impl From<ArcItem> for SeedVideo {
    fn from(item: ArcItem) -> Self {
        Self {
            current: CurrentVideo {
                id: item.bvid,
                title: item.title,
                desc: item.description,
                pic: item.pic,
                pubdate: item.created,
                stat: VideoStat {
                    view: item.play,
                    danmaku: item.video_review,
                    reply: item.comment,
                    favorite: item.favorites,
                    coin: 0,
                    share: 0,
                    like: 0,
                },
            },
            owner_name: item.author,
            owner_face: String::new(),
        }
    }
}

pub struct BilibiliNormalizer {
    api: Arc<dyn BilibiliApi>,
}

impl BilibiliNormalizer {
    pub fn new(api: Arc<dyn BilibiliApi>) -> Self {
        Self { api }
    }

    /// Analyze a canonical Bilibili target: a video URL carrying a BV id, or a
    /// creator space URL.
    pub async fn analyze(&self, target: &str) -> Result<AnalysisResult> {
        if target.contains("BV") {
            let bvid = extract_bvid(target).ok_or_else(|| {
                AnalysisError::MalformedTarget(format!("no video id in {}", target))
            })?;
            return self.analyze_video(bvid).await;
        }

        if target.contains(BILIBILI_SPACE_HOST) {
            let mid = extract_space_mid(target).ok_or_else(|| {
                AnalysisError::MalformedTarget(format!("no creator id in {}", target))
            })?;
            return self.analyze_space(mid).await;
        }

        Err(AnalysisError::MalformedTarget(format!(
            "not a Bilibili video or space URL: {}",
            target
        )))
    }

    async fn analyze_video(&self, bvid: &str) -> Result<AnalysisResult> {
        let view = self.api.video_view(bvid).await?;
        let mid = view.owner.mid;
        if mid == 0 {
            return Err(AnalysisError::MissingData("/x/web-interface/view owner.mid"));
        }
        debug!(bvid, mid, "resolved video owner");
        self.finish(mid, SeedVideo::from(view)).await
    }

    async fn analyze_space(&self, mid: u64) -> Result<AnalysisResult> {
        let seed = match self.recent_upload(mid).await? {
            Some(item) => self.full_record_or_listing(item).await,
            None => SeedVideo {
                current: CurrentVideo::no_videos(),
                ..SeedVideo::default()
            },
        };
        self.finish(mid, seed).await
    }

    // An error envelope from the listing means "nothing to show", not failure
    async fn recent_upload(&self, mid: u64) -> Result<Option<ArcItem>> {
        match self.api.recent_upload(mid).await {
            Ok(item) => Ok(item),
            Err(e) if e.is_upstream_rejection() => {
                warn!(mid, error = %e, "upload listing rejected, using placeholder video");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn full_record_or_listing(&self, item: ArcItem) -> SeedVideo {
        if item.bvid.is_empty() {
            return SeedVideo::from(item);
        }
        match self.api.video_view(&item.bvid).await {
            Ok(view) => SeedVideo::from(view),
            Err(e) => {
                warn!(
                    bvid = %item.bvid,
                    error = %e,
                    "full video record unavailable, using listing fields"
                );
                SeedVideo::from(item)
            }
        }
    }

    async fn finish(&self, mid: u64, seed: SeedVideo) -> Result<AnalysisResult> {
        let (profile, card, upstat, follower, competitors) = futures::join!(
            self.basic_profile(mid),
            self.card(mid),
            self.upstat(mid),
            self.follower_count(mid),
            self.competitors(mid, seed.bvid()),
        );
        let profile = profile?;

        let card_profile = card.card.clone().unwrap_or_default();
        let name = resolve_profile_text(
            "name",
            &profile.name,
            Some(card_profile.name.as_str()),
            Some(seed.owner_name.as_str()),
        );
        let face = resolve_profile_text(
            "face",
            &profile.face,
            Some(card_profile.face.as_str()),
            Some(seed.owner_face.as_str()),
        );
        let sign = resolve_profile_text(
            "sign",
            &profile.sign,
            Some(card_profile.sign.as_str()),
            None,
        );

        Ok(AnalysisResult {
            platform: Platform::Bilibili,
            target_uploader: TargetUploader {
                info: UploaderInfo {
                    name: name.value,
                    face: face.value,
                    sign: sign.value,
                    fans: follower,
                    follower,
                    link: space_url(mid),
                },
                stats: UploaderStats {
                    likes: resolve_likes(&card, &upstat).value,
                    archive_view: resolve_archive_view(&upstat, &card).value,
                },
                current_video: seed.current,
            },
            competitors,
        })
    }

    async fn basic_profile(&self, mid: u64) -> Result<AccountInfo> {
        match self.api.account_info(mid).await {
            Ok(info) => Ok(info),
            Err(e) if e.is_upstream_rejection() => {
                warn!(mid, error = %e, "basic profile rejected, relying on card backfill");
                Ok(AccountInfo::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn card(&self, mid: u64) -> CardInfo {
        self.api.card(mid).await.unwrap_or_else(|e| {
            warn!(mid, error = %e, "card unavailable");
            CardInfo::default()
        })
    }

    async fn upstat(&self, mid: u64) -> UpStat {
        self.api.upstat(mid).await.unwrap_or_else(|e| {
            warn!(mid, error = %e, "upload statistics unavailable");
            UpStat::default()
        })
    }

    async fn follower_count(&self, mid: u64) -> u64 {
        match self.api.relation_stat(mid).await {
            Ok(stat) => stat.follower,
            Err(e) => {
                warn!(mid, error = %e, "follower count unavailable, using 0");
                0
            }
        }
    }

    async fn related(&self, bvid: &str) -> Vec<RelatedVideo> {
        self.api.related(bvid).await.unwrap_or_else(|e| {
            warn!(bvid, error = %e, "related videos unavailable");
            Vec::new()
        })
    }

    async fn competitors(&self, target_mid: u64, bvid: Option<&str>) -> Vec<Competitor> {
        let Some(bvid) = bvid else {
            return Vec::new();
        };

        let mut set = CompetitorSet::new(Some(target_mid));
        for video in self.related(bvid).await {
            if set.is_full() {
                break;
            }
            // Entries without an owner id cannot be deduplicated
            if video.owner.mid == 0 {
                continue;
            }
            set.offer(competitor_from_related(video));
        }

        let mut competitors = set.into_vec();
        let followers = join_all(competitors.iter().map(|c| self.follower_count(c.mid))).await;
        for (competitor, follower) in competitors.iter_mut().zip(followers) {
            competitor.fans = follower;
            competitor.follower = follower;
        }
        competitors
    }
}

fn competitor_from_related(video: RelatedVideo) -> Competitor {
    let mid = video.owner.mid;
    Competitor {
        mid,
        name: video.owner.name,
        face: video.owner.face,
        fans: 0,
        follower: 0,
        video_title: video.title,
        video_view: video.stat.view,
        link: space_url(mid),
    }
}
