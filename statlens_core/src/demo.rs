//! Demonstration data for the YouTube path.
//!
//! None of this is real or current. It exists so the endpoint always answers
//! with a well-formed result when extraction fails, and so a handful of known
//! demo creators render with avatars and channel totals that flat extraction
//! does not provide. The YouTube competitor list is served from here
//! verbatim: there is no related-creator discovery for YouTube yet.
//!
//! Everything is process-wide, read-only and initialized once.

use once_cell::sync::Lazy;

use crate::connectors::youtube::VideoRecord;
use crate::model::Competitor;

/// Channel-level figures substituted for a recognized demo creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownCreator {
    /// Lowercase substring matched against the uploader name
    pub needle: &'static str,
    pub avatar: &'static str,
    pub channel_view_count: u64,
    pub fans: u64,
}

/// Video-level figures for the one demo video the UI was built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownVideo {
    pub video_id: &'static str,
    /// Used only when the extracted counter is missing or zero
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub channel_view_count: u64,
    pub fans: u64,
    /// Used only when no avatar was otherwise resolved
    pub fallback_avatar: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCompetitor {
    pub mid: u64,
    pub name: &'static str,
    pub face: &'static str,
    pub fans: u64,
    pub video_title: &'static str,
    pub video_view: u64,
    pub link: &'static str,
}

const TECHLEAD_AVATAR: &str =
    "https://yt3.googleusercontent.com/ytc/AIdro_k1d8gg8g8g8g8g8g8g8g8g8g8g8g8g8g8g8g=s0";
const TECHLEAD_CHANNEL_AVATAR: &str = "https://yt3.googleusercontent.com/BB2M49atCki1_n2UysXNtL04dmkdIVUMDUtj_MzltJuFbNqWShtpdAS-K-vT-VTo55jC6pKmABw=s0";
const JOMA_AVATAR: &str = "https://yt3.googleusercontent.com/ytc/AIdro_m83eNBk6AXqcM7quGU50Hzm-z3Xzp-vVtAd91cRvqGmw=s0";
const FIRESHIP_AVATAR: &str = "https://yt3.googleusercontent.com/3fPNbkf_xPyCleq77ZhcxyeorY97NtMHVNUbaAON_RBDH9ydL4hJkjxC8x_4mpuopkB8oI7Ct6Y=s0";

/// Checked in order; the first needle contained in the lowercased name wins.
pub const KNOWN_CREATORS: &[KnownCreator] = &[
    KnownCreator {
        needle: "techlead",
        avatar: TECHLEAD_AVATAR,
        channel_view_count: 150_000_000,
        fans: 1_400_000,
    },
    KnownCreator {
        needle: "joma",
        avatar: JOMA_AVATAR,
        channel_view_count: 85_000_000,
        fans: 2_200_000,
    },
    KnownCreator {
        needle: "fireship",
        avatar: FIRESHIP_AVATAR,
        channel_view_count: 350_000_000,
        fans: 3_100_000,
    },
];

pub const KNOWN_VIDEOS: &[KnownVideo] = &[KnownVideo {
    video_id: "HMC-s_zkNyE",
    view_count: 145_000,
    like_count: 5_600,
    comment_count: 420,
    channel_view_count: 150_000_000,
    fans: 1_400_000,
    fallback_avatar: TECHLEAD_CHANNEL_AVATAR,
}];

pub const DEMO_COMPETITORS: &[DemoCompetitor] = &[
    DemoCompetitor {
        mid: 1,
        name: "TechLead",
        face: TECHLEAD_CHANNEL_AVATAR,
        fans: 1_200_000,
        video_title: "Why I left Google",
        video_view: 5_000_000,
        link: "https://www.youtube.com/c/TechLead",
    },
    DemoCompetitor {
        mid: 2,
        name: "Joma Tech",
        face: JOMA_AVATAR,
        fans: 2_000_000,
        video_title: "Day in the Life of a Software Engineer",
        video_view: 8_000_000,
        link: "https://www.youtube.com/c/JomaTech",
    },
    DemoCompetitor {
        mid: 3,
        name: "Fireship",
        face: FIRESHIP_AVATAR,
        fans: 2_500_000,
        video_title: "Rust in 100 Seconds",
        video_view: 3_000_000,
        link: "https://www.youtube.com/c/Fireship",
    },
];

/// Substituted when extraction fails or returns nothing.
pub static DEMO_FALLBACK_RECORD: Lazy<VideoRecord> = Lazy::new(|| VideoRecord {
    id: Some("HMC-s_zkNyE".to_string()),
    title: Some("Why I left Google (Demo)".to_string()),
    thumbnail: Some("https://i.ytimg.com/vi/HMC-s_zkNyE/hqdefault.jpg".to_string()),
    view_count: Some(5_000_000),
    like_count: Some(100_000),
    comment_count: Some(5_000),
    uploader: Some("TechLead (Demo Fallback)".to_string()),
    channel_url: Some("https://www.youtube.com/c/TechLead".to_string()),
    channel_follower_count: Some(1_200_000),
    webpage_url: Some("https://www.youtube.com/watch?v=HMC-s_zkNyE".to_string()),
    ..VideoRecord::default()
});

pub fn known_creator(uploader_name: &str) -> Option<&'static KnownCreator> {
    let lowered = uploader_name.to_lowercase();
    KNOWN_CREATORS
        .iter()
        .find(|creator| lowered.contains(creator.needle))
}

pub fn known_video(target: &str) -> Option<&'static KnownVideo> {
    KNOWN_VIDEOS
        .iter()
        .find(|video| target.contains(video.video_id))
}

impl From<&DemoCompetitor> for Competitor {
    fn from(demo: &DemoCompetitor) -> Self {
        Self {
            mid: demo.mid,
            name: demo.name.to_string(),
            face: demo.face.to_string(),
            fans: demo.fans,
            follower: demo.fans,
            video_title: demo.video_title.to_string(),
            video_view: demo.video_view,
            link: demo.link.to_string(),
        }
    }
}

pub fn demo_competitors() -> Vec<Competitor> {
    DEMO_COMPETITORS.iter().map(Competitor::from).collect()
}
