//! Input classifier that decides which platform and entity a raw string refers to.
//!
//! The client submits one free-form string: a URL, a numeric creator id, an
//! `@handle`, a bare name or a few words to search for. Rules are checked in
//! priority order and the first match wins; nothing here touches the network.
//!
//! # Example
//!
//! ```rust
//! use statlens_core::model::Platform;
//! use statlens_core::resolver::{Classifier, TargetKind};
//!
//! let classifier = Classifier::new();
//!
//! let resolved = classifier.classify("123456").unwrap();
//! assert_eq!(resolved.platform, Platform::Bilibili);
//! assert_eq!(resolved.target, "https://space.bilibili.com/123456");
//!
//! let resolved = classifier.classify("@mkbhd").unwrap();
//! assert_eq!(resolved.platform, Platform::Youtube);
//! assert_eq!(resolved.kind, TargetKind::Creator);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::model::Platform;

pub const BILIBILI_DOMAIN: &str = "bilibili.com";
pub const BILIBILI_SPACE_HOST: &str = "space.bilibili.com";
pub const YOUTUBE_DOMAIN: &str = "youtube.com";
pub const YOUTUBE_SHORT_DOMAIN: &str = "youtu.be";
/// yt-dlp pseudo-URL returning only the first search hit.
pub const YOUTUBE_SEARCH_PREFIX: &str = "ytsearch1:";

static ALL_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static BVID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"BV[0-9A-Za-z]{10}").unwrap());
static SPACE_MID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"space\.bilibili\.com/(?P<mid>[0-9]+)").unwrap());
static YOUTUBE_VIDEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|shorts/|embed/)|youtu\.be/)(?P<video_id>[A-Za-z0-9_-]{11})",
    )
    .unwrap()
});

/// What the canonical target names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A single video
    Video,
    /// A creator space, channel or handle
    Creator,
    /// Free-text query answered with the first search result
    Search,
    /// A platform URL whose entity could not be identified up front
    Unknown,
}

/// Classifier decision, ready to hand to the platform normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub platform: Platform,
    pub kind: TargetKind,
    /// Canonical URL (or search pseudo-URL)
    pub target: String,
    /// Id of the rule that matched
    pub rule: String,
}

/// Rule definition for classifying inputs
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub id: &'static str,
    pub platform: Platform,
    /// Priority (higher = checked first)
    pub priority: u32,
    pub matches: fn(&str) -> bool,
    pub canonicalize: fn(&str) -> String,
    pub kind: fn(&str) -> TargetKind,
    pub description: &'static str,
}

/// Information about a rule for documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub platform: Platform,
    pub description: String,
    pub example: String,
}

pub struct Classifier {
    rules: Vec<ClassifierRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            rules: build_default_rules(),
        }
    }

    /// Classify a raw input string.
    ///
    /// The input is trimmed first. Fails with `UnsupportedPlatform` when no
    /// rule applies. Blank input is a bare token and lands on the YouTube
    /// handle rule like any other.
    pub fn classify(&self, input: &str) -> Result<ResolvedTarget, AnalysisError> {
        let input = input.trim();
        let rule = self
            .rules
            .iter()
            .find(|rule| (rule.matches)(input))
            .ok_or(AnalysisError::UnsupportedPlatform)?;

        let target = (rule.canonicalize)(input);
        Ok(ResolvedTarget {
            platform: rule.platform,
            kind: (rule.kind)(&target),
            target,
            rule: rule.id.to_string(),
        })
    }

    pub fn can_classify(&self, input: &str) -> bool {
        self.classify(input).is_ok()
    }

    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.rules
            .iter()
            .map(|r| RuleInfo {
                id: r.id.to_string(),
                platform: r.platform,
                description: r.description.to_string(),
                example: get_rule_example(r.id).to_string(),
            })
            .collect()
    }
}

/// Neither a scheme nor anything domain-like.
fn is_bare_token(input: &str) -> bool {
    !input.contains("://") && !input.contains('.')
}

fn bilibili_kind(target: &str) -> TargetKind {
    if extract_bvid(target).is_some() {
        TargetKind::Video
    } else if extract_space_mid(target).is_some() {
        TargetKind::Creator
    } else {
        TargetKind::Unknown
    }
}

fn youtube_kind(target: &str) -> TargetKind {
    if target.starts_with(YOUTUBE_SEARCH_PREFIX) {
        TargetKind::Search
    } else if extract_youtube_video_id(target).is_some() {
        TargetKind::Video
    } else {
        TargetKind::Creator
    }
}

fn build_default_rules() -> Vec<ClassifierRule> {
    let mut rules = vec![
        ClassifierRule {
            id: "bilibili_mid",
            platform: Platform::Bilibili,
            priority: 100,
            matches: |s| ALL_DIGITS_RE.is_match(s),
            canonicalize: |s| format!("https://{}/{}", BILIBILI_SPACE_HOST, s),
            kind: |_| TargetKind::Creator,
            description: "Bilibili creator id (digits only)",
        },
        ClassifierRule {
            id: "youtube_handle",
            platform: Platform::Youtube,
            priority: 90,
            matches: |s| s.starts_with('@'),
            canonicalize: |s| format!("https://www.{}/{}", YOUTUBE_DOMAIN, s),
            kind: |_| TargetKind::Creator,
            description: "YouTube handle (@name)",
        },
        ClassifierRule {
            id: "youtube_search",
            platform: Platform::Youtube,
            priority: 80,
            matches: |s| is_bare_token(s) && s.contains(' '),
            canonicalize: |s| format!("{}{}", YOUTUBE_SEARCH_PREFIX, s),
            kind: |_| TargetKind::Search,
            description: "Free-text name, first YouTube search result",
        },
        ClassifierRule {
            id: "youtube_bare_handle",
            platform: Platform::Youtube,
            priority: 70,
            matches: is_bare_token,
            canonicalize: |s| format!("https://www.{}/@{}", YOUTUBE_DOMAIN, s),
            kind: |_| TargetKind::Creator,
            description: "Single word, treated as a YouTube handle",
        },
        ClassifierRule {
            id: "bilibili_url",
            platform: Platform::Bilibili,
            priority: 60,
            matches: |s| s.contains(BILIBILI_DOMAIN),
            canonicalize: |s| s.to_string(),
            kind: bilibili_kind,
            description: "Bilibili video or space URL",
        },
        ClassifierRule {
            id: "youtube_url",
            platform: Platform::Youtube,
            priority: 50,
            matches: |s| s.contains(YOUTUBE_DOMAIN) || s.contains(YOUTUBE_SHORT_DOMAIN),
            canonicalize: |s| s.to_string(),
            kind: youtube_kind,
            description: "YouTube video, channel or playlist URL",
        },
    ];

    // Sort by priority (highest first); stable, so equal priorities keep table order
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    rules
}

fn get_rule_example(rule_id: &str) -> &'static str {
    match rule_id {
        "bilibili_mid" => "123456",
        "youtube_handle" => "@mkbhd",
        "youtube_search" => "joma tech",
        "youtube_bare_handle" => "fireship",
        "bilibili_url" => "https://www.bilibili.com/video/BV1GJ411x7h7",
        "youtube_url" => "https://www.youtube.com/watch?v=HMC-s_zkNyE",
        _ => "",
    }
}

/// BV video id anywhere in a Bilibili URL.
pub fn extract_bvid(url: &str) -> Option<&str> {
    BVID_RE.find(url).map(|m| m.as_str())
}

/// Numeric creator id from a `space.bilibili.com/<mid>` URL.
pub fn extract_space_mid(url: &str) -> Option<u64> {
    SPACE_MID_RE
        .captures(url)?
        .name("mid")?
        .as_str()
        .parse()
        .ok()
}

pub fn extract_youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_VIDEO_RE
        .captures(url)?
        .name("video_id")
        .map(|m| m.as_str())
}
