mod common;

use serde_json::json;

use common::{bilibili_analyzer, FakeBilibili, Reply};
use statlens_core::model::VideoStat;
use statlens_core::{AnalysisError, Platform};

const BVID: &str = "BV1GJ411x7h7";
const TARGET_MID: u64 = 100;

fn video(bvid: &str, mid: u64) -> Reply {
    Reply::Data(json!({
        "bvid": bvid,
        "title": "target video",
        "pic": "http://i0.hdslb.com/bfs/archive/cover.jpg",
        "desc": "what this video is about",
        "pubdate": 1_700_000_000,
        "owner": {"mid": mid, "name": "owner name", "face": "http://owner/face.jpg"},
        "stat": {
            "view": 12345, "danmaku": 67, "reply": 89, "favorite": 10,
            "coin": 11, "share": 12, "like": 13
        }
    }))
}

fn related_entry(bvid: &str, mid: u64) -> serde_json::Value {
    json!({
        "bvid": bvid,
        "title": format!("video by {mid}"),
        "owner": {
            "mid": mid,
            "name": format!("up {mid}"),
            "face": format!("http://face/{mid}.jpg")
        },
        "stat": {"view": mid * 10}
    })
}

/// A creator whose every endpoint answers normally.
fn healthy_creator() -> FakeBilibili {
    let mut api = FakeBilibili::default();
    api.views.insert(BVID.to_string(), video(BVID, TARGET_MID));
    api.accounts.insert(
        TARGET_MID,
        Reply::Data(json!({
            "mid": TARGET_MID,
            "name": "Creator",
            "face": "http://face.jpg",
            "sign": "bio"
        })),
    );
    api.cards.insert(
        TARGET_MID,
        Reply::Data(json!({
            "card": {"name": "Card Creator", "face": "http://card/face.jpg", "sign": "card bio"},
            "archive_count": 321,
            "like_num": 4567
        })),
    );
    api.upstats.insert(
        TARGET_MID,
        Reply::Data(json!({"archive": {"view": 987654}, "likes": 1})),
    );
    api.relations
        .insert(TARGET_MID, Reply::Data(json!({"follower": 777, "following": 3})));
    api
}

#[tokio::test]
async fn test_video_path_full_result() {
    let mut api = healthy_creator();
    api.related.insert(
        BVID.to_string(),
        Reply::Data(json!([
            related_entry("BV1aaaaaaaaa", TARGET_MID),
            related_entry("BV1bbbbbbbbb", 201),
            related_entry("BV1ccccccccc", 201),
            related_entry("BV1ddddddddd", 202),
            related_entry("BV1eeeeeeeee", 203),
            related_entry("BV1fffffffff", 204),
            related_entry("BV1ggggggggg", 205),
            related_entry("BV1hhhhhhhhh", 206)
        ])),
    );
    for mid in [201, 202, 204, 205] {
        api.relations
            .insert(mid, Reply::Data(json!({"follower": mid * 2})));
    }
    // 203 has no relation stat configured and must degrade to 0

    let (analyzer, api) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();

    assert_eq!(result.platform, Platform::Bilibili);
    let target = &result.target_uploader;
    assert_eq!(target.info.name, "Creator");
    assert_eq!(target.info.sign, "bio");
    assert_eq!(target.info.fans, 777);
    assert_eq!(target.info.follower, 777);
    assert_eq!(target.info.link, "https://space.bilibili.com/100");
    assert_eq!(target.stats.archive_view, 987654);
    assert_eq!(target.stats.likes, 4567);
    assert_eq!(target.current_video.id, BVID);
    assert_eq!(target.current_video.stat.view, 12345);
    assert_eq!(target.current_video.stat.like, 13);

    let mids: Vec<_> = result.competitors.iter().map(|c| c.mid).collect();
    assert_eq!(mids, vec![201, 202, 203, 204, 205]);
    assert_eq!(result.competitors[0].video_title, "video by 201");
    assert_eq!(result.competitors[0].fans, 402);
    assert_eq!(result.competitors[0].follower, 402);
    assert_eq!(result.competitors[2].follower, 0);
    assert_eq!(result.competitors[4].link, "https://space.bilibili.com/205");

    // Follower lookups only for the target and the kept competitors
    assert_eq!(api.called("relation:"), 6);
}

#[tokio::test]
async fn test_competitors_never_include_target() {
    let mut api = healthy_creator();
    api.related.insert(
        BVID.to_string(),
        Reply::Data(json!([
            related_entry("BV1aaaaaaaaa", TARGET_MID),
            related_entry("BV1bbbbbbbbb", TARGET_MID),
            related_entry("BV1ccccccccc", 0)
        ])),
    );

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();
    assert!(result.competitors.is_empty());
}

#[tokio::test]
async fn test_empty_creator_gets_placeholder_video() {
    let mid = 300;
    let mut api = FakeBilibili::default();
    api.uploads
        .insert(mid, Reply::Data(json!({"list": {"vlist": []}, "page": {"count": 0}})));
    api.accounts
        .insert(mid, Reply::Data(json!({"mid": mid, "name": "New Creator", "face": ""})));

    let (analyzer, api) = bilibili_analyzer(api);
    let result = analyzer.analyze("300").await.unwrap();

    let video = &result.target_uploader.current_video;
    assert_eq!(video.title, "No videos found");
    assert_eq!(video.stat, VideoStat::default());
    assert_eq!(result.target_uploader.info.name, "New Creator");
    assert_eq!(result.target_uploader.info.fans, 0);
    assert_eq!(result.target_uploader.stats.archive_view, 0);
    assert!(result.competitors.is_empty());
    assert_eq!(api.called("related:"), 0);
    assert_eq!(api.called("view:"), 0);
}

#[tokio::test]
async fn test_rejected_listing_gets_placeholder_video() {
    let mid = 301;
    let mut api = FakeBilibili::default();
    api.uploads.insert(mid, Reply::Rejected(-352));
    api.accounts
        .insert(mid, Reply::Data(json!({"mid": mid, "name": "Blocked Listing"})));

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://space.bilibili.com/301")
        .await
        .unwrap();
    assert_eq!(
        result.target_uploader.current_video.title,
        "No videos found"
    );
}

#[tokio::test]
async fn test_listing_transport_failure_propagates() {
    let mut api = FakeBilibili::default();
    api.uploads.insert(302, Reply::Transport);

    let (analyzer, _) = bilibili_analyzer(api);
    let err = analyzer.analyze("302").await.unwrap_err();
    assert!(matches!(err, AnalysisError::Timeout(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_listing_remap_when_full_record_fails() {
    let mid = 303;
    let listed = "BV1xx411c7mD";
    let mut api = FakeBilibili::default();
    api.uploads.insert(
        mid,
        Reply::Data(json!({"list": {"vlist": [{
            "bvid": listed,
            "title": "latest upload",
            "pic": "//i2.hdslb.com/cover.jpg",
            "description": "listing description",
            "author": "Listing Author",
            "created": 1_690_000_000,
            "play": "2,500",
            "video_review": 40,
            "comment": 30,
            "favorites": 20
        }]}})),
    );
    api.views.insert(listed.to_string(), Reply::Transport);
    api.accounts.insert(mid, Reply::Rejected(-352));
    api.related.insert(
        listed.to_string(),
        Reply::Data(json!([related_entry("BV1bbbbbbbbb", 401)])),
    );

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer.analyze("303").await.unwrap();

    let video = &result.target_uploader.current_video;
    assert_eq!(video.id, listed);
    assert_eq!(video.title, "latest upload");
    assert_eq!(video.desc, "listing description");
    assert_eq!(
        video.stat,
        VideoStat {
            view: 2500,
            danmaku: 40,
            reply: 30,
            favorite: 20,
            coin: 0,
            share: 0,
            like: 0,
        }
    );
    // Profile and card both unavailable: the listing author is all that is left
    assert_eq!(result.target_uploader.info.name, "Listing Author");
    assert_eq!(result.competitors.len(), 1);
    assert_eq!(result.competitors[0].mid, 401);
}

#[tokio::test]
async fn test_card_backfills_missing_profile_fields() {
    let mut api = healthy_creator();
    api.accounts.insert(
        TARGET_MID,
        Reply::Data(json!({"mid": TARGET_MID, "name": "", "face": null})),
    );

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();
    let info = &result.target_uploader.info;
    assert_eq!(info.name, "Card Creator");
    assert_eq!(info.face, "http://card/face.jpg");
    assert_eq!(info.sign, "card bio");
}

#[tokio::test]
async fn test_archive_view_falls_back_to_card_count() {
    let mut api = healthy_creator();
    api.upstats.insert(TARGET_MID, Reply::Transport);

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();
    assert_eq!(result.target_uploader.stats.archive_view, 321);
}

#[tokio::test]
async fn test_auxiliary_failures_degrade_to_zero() {
    let mut api = healthy_creator();
    api.cards.insert(TARGET_MID, Reply::Transport);
    api.upstats.insert(TARGET_MID, Reply::Rejected(-799));
    api.relations.insert(TARGET_MID, Reply::Rejected(-412));
    api.related.insert(BVID.to_string(), Reply::Transport);

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();
    let target = &result.target_uploader;
    assert_eq!(target.info.name, "Creator");
    assert_eq!(target.info.fans, 0);
    assert_eq!(target.stats.archive_view, 0);
    assert_eq!(target.stats.likes, 0);
    assert!(result.competitors.is_empty());
}

#[tokio::test]
async fn test_video_failure_propagates() {
    let mut api = healthy_creator();
    api.views.insert(BVID.to_string(), Reply::Rejected(-404));

    let (analyzer, _) = bilibili_analyzer(api);
    let err = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Upstream { code: -404, .. }));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_profile_transport_failure_propagates() {
    let mut api = healthy_creator();
    api.accounts.insert(TARGET_MID, Reply::Transport);

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await;
    assert!(matches!(result, Err(AnalysisError::Timeout(_))));
}

#[tokio::test]
async fn test_url_without_identity_is_malformed() {
    let (analyzer, api) = bilibili_analyzer(FakeBilibili::default());

    let err = analyzer
        .analyze("https://www.bilibili.com/festival/2024")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedTarget(_)));

    let err = analyzer
        .analyze("https://www.bilibili.com/video/BVshort")
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedTarget(_)));
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_related_entry_is_skipped() {
    let mut api = healthy_creator();
    api.related.insert(
        BVID.to_string(),
        Reply::Data(json!([
            related_entry("BV1aaaaaaaaa", 201),
            {"bvid": "BV1bbbbbbbbb", "title": "broken", "owner": null, "stat": null},
            related_entry("BV1ccccccccc", 202)
        ])),
    );

    let (analyzer, _) = bilibili_analyzer(api);
    let result = analyzer
        .analyze("https://www.bilibili.com/video/BV1GJ411x7h7")
        .await
        .unwrap();
    let mids: Vec<_> = result.competitors.iter().map(|c| c.mid).collect();
    assert_eq!(mids, vec![201, 202]);
}

#[tokio::test]
async fn test_space_path_prefers_full_video_record() {
    let mut api = healthy_creator();
    api.uploads.insert(
        TARGET_MID,
        Reply::Data(json!({"list": {"vlist": [{
            "bvid": BVID,
            "title": "listing title",
            "description": "listing description",
            "author": "Listing Author",
            "play": 1,
            "video_review": 2,
            "comment": 3,
            "favorites": 4
        }]}})),
    );
    api.related.insert(
        BVID.to_string(),
        Reply::Data(json!([related_entry("BV1bbbbbbbbb", 201)])),
    );

    let (analyzer, api) = bilibili_analyzer(api);
    let result = analyzer.analyze("100").await.unwrap();

    let video = &result.target_uploader.current_video;
    assert_eq!(video.id, BVID);
    assert_eq!(video.title, "target video");
    assert_eq!(video.desc, "what this video is about");
    assert_eq!(
        video.stat,
        VideoStat {
            view: 12345,
            danmaku: 67,
            reply: 89,
            favorite: 10,
            coin: 11,
            share: 12,
            like: 13,
        }
    );
    assert_eq!(result.target_uploader.info.link, "https://space.bilibili.com/100");
    assert_eq!(result.competitors.len(), 1);
    assert_eq!(result.competitors[0].mid, 201);

    let calls = api.calls.lock().unwrap();
    assert!(calls.contains(&format!("view:{}", BVID)));
    assert!(calls.contains(&format!("related:{}", BVID)));
}
