//! Field resolution with explicit precedence.
//!
//! Each resolver lists its candidate sources in order; the first source that
//! holds a usable value wins, otherwise the documented default applies. The
//! winning [`Source`] is returned alongside the value so callers can log it.

use tracing::debug;

use crate::connectors::bilibili::{CardInfo, UpStat};
use crate::connectors::youtube::{CollectionRecord, VideoRecord};
use crate::utils::non_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    UpstatArchiveView,
    /// Upload count standing in for views; last resort only
    CardArchiveCount,
    CardLikeNum,
    UpstatLikes,
    BasicProfile,
    CardProfile,
    VideoOwner,
    CollectionUploader,
    CollectionTitle,
    CollectionUrl,
    FirstEntryUploader,
    FirstEntryUploaderUrl,
    FirstEntryChannelUrl,
    ChannelUrl,
    UploaderUrl,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Resolved<T> {
    fn default_to(value: T) -> Self {
        Self {
            value,
            source: Source::Default,
        }
    }
}

/// First `(source, Some(value))` in table order.
pub fn first_present<T>(
    field: &'static str,
    candidates: impl IntoIterator<Item = (Source, Option<T>)>,
) -> Option<Resolved<T>> {
    let resolved = candidates
        .into_iter()
        .find_map(|(source, value)| value.map(|value| Resolved { value, source }));
    match &resolved {
        Some(r) => debug!(field, source = ?r.source, "resolved field"),
        None => debug!(field, "no source present, using default"),
    }
    resolved
}

/// Creator-wide view total.
///
/// | order | source | note |
/// |---|---|---|
/// | 1 | upstat `archive.view` | present even when 0 |
/// | 2 | card `archive_count` | an upload count, kept only as a last resort |
/// | - | 0 | |
pub fn resolve_archive_view(upstat: &UpStat, card: &CardInfo) -> Resolved<u64> {
    first_present(
        "archive_view",
        [
            (
                Source::UpstatArchiveView,
                upstat.archive.and_then(|archive| archive.view),
            ),
            (Source::CardArchiveCount, card.archive_count),
        ],
    )
    .unwrap_or_else(|| Resolved::default_to(0))
}

/// Creator-wide like total: card `like_num`, then upstat `likes`, else 0.
/// Zero counts are treated as absent since both endpoints report 0 on partial data.
pub fn resolve_likes(card: &CardInfo, upstat: &UpStat) -> Resolved<u64> {
    first_present(
        "likes",
        [
            (Source::CardLikeNum, Some(card.like_num).filter(|n| *n > 0)),
            (Source::UpstatLikes, Some(upstat.likes).filter(|n| *n > 0)),
        ],
    )
    .unwrap_or_else(|| Resolved::default_to(0))
}

/// Name/avatar/bio text: basic profile, then card profile, then the owner
/// block embedded in the video record, else empty.
pub fn resolve_profile_text(
    field: &'static str,
    basic: &str,
    card: Option<&str>,
    owner: Option<&str>,
) -> Resolved<String> {
    first_present(
        field,
        [
            (Source::BasicProfile, non_empty(Some(basic))),
            (Source::CardProfile, non_empty(card)),
            (Source::VideoOwner, non_empty(owner)),
        ],
    )
    .map(|r| Resolved {
        value: r.value.to_string(),
        source: r.source,
    })
    .unwrap_or_else(|| Resolved::default_to(String::new()))
}

pub const UNKNOWN_UPLOADER: &str = "Unknown";

/// Collection uploader: its `uploader`, its `title`, the first entry's
/// `uploader`, else "Unknown".
pub fn resolve_collection_uploader(
    collection: &CollectionRecord,
    first_entry: Option<&VideoRecord>,
) -> Resolved<String> {
    first_present(
        "uploader_name",
        [
            (
                Source::CollectionUploader,
                non_empty(collection.uploader.as_deref()),
            ),
            (
                Source::CollectionTitle,
                non_empty(collection.title.as_deref()),
            ),
            (
                Source::FirstEntryUploader,
                non_empty(first_entry.and_then(|e| e.uploader.as_deref())),
            ),
        ],
    )
    .map(|r| Resolved {
        value: r.value.to_string(),
        source: r.source,
    })
    .unwrap_or_else(|| Resolved::default_to(UNKNOWN_UPLOADER.to_string()))
}

/// Search pages and search pseudo-URLs do not identify a channel.
pub fn is_search_results_page(url: &str) -> bool {
    url.contains("youtube.com/results") || url.starts_with("ytsearch")
}

/// Collection channel URL: its own `webpage_url`/`url` unless that is a
/// search page, then the first entry's `uploader_url`, then its
/// `channel_url`, else empty.
pub fn resolve_channel_url(
    collection: &CollectionRecord,
    first_entry: Option<&VideoRecord>,
) -> Resolved<String> {
    let own = non_empty(collection.webpage_url.as_deref())
        .or(non_empty(collection.url.as_deref()))
        .filter(|url| !is_search_results_page(url));

    first_present(
        "channel_url",
        [
            (Source::CollectionUrl, own),
            (
                Source::FirstEntryUploaderUrl,
                non_empty(first_entry.and_then(|e| e.uploader_url.as_deref())),
            ),
            (
                Source::FirstEntryChannelUrl,
                non_empty(first_entry.and_then(|e| e.channel_url.as_deref())),
            ),
        ],
    )
    .map(|r| Resolved {
        value: r.value.to_string(),
        source: r.source,
    })
    .unwrap_or_else(|| Resolved::default_to(String::new()))
}

/// Single video channel URL: `channel_url`, then `uploader_url`, else empty.
pub fn resolve_video_channel_url(record: &VideoRecord) -> Resolved<String> {
    first_present(
        "channel_url",
        [
            (Source::ChannelUrl, non_empty(record.channel_url.as_deref())),
            (Source::UploaderUrl, non_empty(record.uploader_url.as_deref())),
        ],
    )
    .map(|r| Resolved {
        value: r.value.to_string(),
        source: r.source,
    })
    .unwrap_or_else(|| Resolved::default_to(String::new()))
}
