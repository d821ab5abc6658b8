use statlens_core::resolver::{Classifier, TargetKind};
use statlens_core::{AnalysisError, Platform};

#[test]
fn test_numeric_id_is_bilibili_space() {
    let classifier = Classifier::new();

    let resolved = classifier.classify("123456").unwrap();
    assert_eq!(resolved.platform, Platform::Bilibili);
    assert_eq!(resolved.kind, TargetKind::Creator);
    assert_eq!(resolved.target, "https://space.bilibili.com/123456");
    assert_eq!(resolved.rule, "bilibili_mid");
}

#[test]
fn test_handles() {
    let classifier = Classifier::new();

    let resolved = classifier.classify("@mkbhd").unwrap();
    assert_eq!(resolved.platform, Platform::Youtube);
    assert_eq!(resolved.target, "https://www.youtube.com/@mkbhd");

    // No space, no domain: bare handle
    let resolved = classifier.classify("fireship").unwrap();
    assert_eq!(resolved.platform, Platform::Youtube);
    assert_eq!(resolved.kind, TargetKind::Creator);
    assert_eq!(resolved.target, "https://www.youtube.com/@fireship");
}

#[test]
fn test_free_text_is_search() {
    let classifier = Classifier::new();

    let resolved = classifier.classify("  hello world ").unwrap();
    assert_eq!(resolved.platform, Platform::Youtube);
    assert_eq!(resolved.kind, TargetKind::Search);
    assert_eq!(resolved.target, "ytsearch1:hello world");
}

#[test]
fn test_bilibili_urls() {
    let classifier = Classifier::new();

    let resolved = classifier
        .classify("https://www.bilibili.com/video/BV1GJ411x7h7?p=1")
        .unwrap();
    assert_eq!(resolved.platform, Platform::Bilibili);
    assert_eq!(resolved.kind, TargetKind::Video);
    assert_eq!(
        resolved.target,
        "https://www.bilibili.com/video/BV1GJ411x7h7?p=1"
    );

    let resolved = classifier
        .classify("https://space.bilibili.com/946974/video")
        .unwrap();
    assert_eq!(resolved.kind, TargetKind::Creator);

    let resolved = classifier
        .classify("https://www.bilibili.com/festival/2024")
        .unwrap();
    assert_eq!(resolved.platform, Platform::Bilibili);
    assert_eq!(resolved.kind, TargetKind::Unknown);
}

#[test]
fn test_youtube_urls() {
    let classifier = Classifier::new();

    let resolved = classifier
        .classify("https://www.youtube.com/watch?v=HMC-s_zkNyE")
        .unwrap();
    assert_eq!(resolved.platform, Platform::Youtube);
    assert_eq!(resolved.kind, TargetKind::Video);

    let resolved = classifier.classify("https://youtu.be/HMC-s_zkNyE").unwrap();
    assert_eq!(resolved.kind, TargetKind::Video);

    let resolved = classifier
        .classify("https://www.youtube.com/@Fireship/videos")
        .unwrap();
    assert_eq!(resolved.kind, TargetKind::Creator);
}

#[test]
fn test_unsupported_inputs() {
    let classifier = Classifier::new();

    for input in ["https://example.com/video/1", "example.com"] {
        let err = classifier.classify(input).unwrap_err();
        assert!(
            matches!(err, AnalysisError::UnsupportedPlatform),
            "{input:?} should be unsupported"
        );
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Unsupported platform");
    }
}

#[test]
fn test_digits_win_over_bare_handle() {
    // All-digit input is also a bare token; the creator-id rule is checked first
    let resolved = Classifier::new().classify("42").unwrap();
    assert_eq!(resolved.platform, Platform::Bilibili);
}

#[test]
fn test_blank_input_is_bare_handle() {
    let classifier = Classifier::new();

    for input in ["", "   "] {
        let resolved = classifier.classify(input).unwrap();
        assert_eq!(resolved.platform, Platform::Youtube);
        assert_eq!(resolved.kind, TargetKind::Creator);
        assert_eq!(resolved.target, "https://www.youtube.com/@");
        assert_eq!(resolved.rule, "youtube_bare_handle");
    }
}
