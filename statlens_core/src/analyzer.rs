// src/analyzer.rs

use std::sync::Arc;

use tracing::info;

use crate::config::AnalyzerConfig;
use crate::connectors::{BilibiliApi, HttpBilibiliClient, MetadataExtractor, YtDlpExtractor};
use crate::error::Result;
use crate::model::{AnalysisResult, Platform};
use crate::normalize::{BilibiliNormalizer, YouTubeNormalizer};
use crate::resolver::{Classifier, ResolvedTarget};

/// Classify an input and dispatch it to the matching platform normalizer.
///
/// Holds no per-request state; one instance is shared by every request.
pub struct CreatorAnalyzer {
    classifier: Classifier,
    bilibili: BilibiliNormalizer,
    youtube: YouTubeNormalizer,
}

impl CreatorAnalyzer {
    /// Build with the real HTTP and yt-dlp clients.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let bilibili = HttpBilibiliClient::new(config)?;
        let extractor = YtDlpExtractor::new(config);
        Ok(Self::with_clients(Arc::new(bilibili), Arc::new(extractor)))
    }

    pub fn with_clients(
        bilibili: Arc<dyn BilibiliApi>,
        extractor: Arc<dyn MetadataExtractor>,
    ) -> Self {
        Self {
            classifier: Classifier::new(),
            bilibili: BilibiliNormalizer::new(bilibili),
            youtube: YouTubeNormalizer::new(extractor),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn classify(&self, input: &str) -> Result<ResolvedTarget> {
        self.classifier.classify(input)
    }

    pub async fn analyze(&self, input: &str) -> Result<AnalysisResult> {
        let resolved = self.classify(input)?;
        info!(
            platform = %resolved.platform,
            rule = %resolved.rule,
            target = %resolved.target,
            "classified input"
        );
        self.analyze_resolved(&resolved).await
    }

    pub async fn analyze_resolved(&self, resolved: &ResolvedTarget) -> Result<AnalysisResult> {
        match resolved.platform {
            Platform::Bilibili => self.bilibili.analyze(&resolved.target).await,
            Platform::Youtube => Ok(self.youtube.analyze(&resolved.target).await),
        }
    }
}
