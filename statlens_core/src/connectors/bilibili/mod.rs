// src/connectors/bilibili/mod.rs

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;

mod types;
pub use types::{
    AccountInfo, ArcItem, ArcSearch, ArchiveStat, CardInfo, CardProfile, Envelope, Owner,
    RelatedList, RelatedVideo, RelationStat, UpStat, VideoStatRaw, VideoView,
};

const VIDEO_VIEW: &str = "/x/web-interface/view";
const ACCOUNT_INFO: &str = "/x/space/acc/info";
const CARD: &str = "/x/web-interface/card";
const ARC_SEARCH: &str = "/x/space/arc/search";
const RELATED: &str = "/x/web-interface/archive/related";
const RELATION_STAT: &str = "/x/relation/stat";
const UPSTAT: &str = "/x/space/upstat";

/// Read-only Bilibili web API surface used by the normalizer.
///
/// Every method fails with [`AnalysisError::Upstream`] when the envelope
/// carries a non-zero code; the caller decides whether that is fatal.
#[async_trait]
pub trait BilibiliApi: Send + Sync {
    async fn video_view(&self, bvid: &str) -> Result<VideoView, AnalysisError>;

    async fn account_info(&self, mid: u64) -> Result<AccountInfo, AnalysisError>;

    async fn card(&self, mid: u64) -> Result<CardInfo, AnalysisError>;

    /// First page, one item: the creator's most recent upload.
    async fn recent_upload(&self, mid: u64) -> Result<Option<ArcItem>, AnalysisError>;

    async fn related(&self, bvid: &str) -> Result<Vec<RelatedVideo>, AnalysisError>;

    async fn relation_stat(&self, mid: u64) -> Result<RelationStat, AnalysisError>;

    async fn upstat(&self, mid: u64) -> Result<UpStat, AnalysisError>;
}

#[derive(Clone)]
pub struct HttpBilibiliClient {
    client: reqwest::Client,
    api_base: String,
}

impl HttpBilibiliClient {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let mut headers = HeaderMap::new();
        let referer = HeaderValue::from_str(&config.referer)
            .map_err(|e| AnalysisError::Config(format!("invalid referer: {}", e)))?;
        headers.insert(REFERER, referer);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_base: config.bilibili_api_base.trim_end_matches('/').to_string(),
        })
    }

    // Helper: GET an endpoint and unwrap its `{code, message, data}` envelope
    async fn fetch_data<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, AnalysisError> {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!(endpoint, ?params, "bilibili request");

        let response = self.client.get(&url).query(params).send().await?;
        let envelope = response.json::<Envelope<T>>().await?;
        unwrap_envelope(endpoint, envelope)
    }
}

fn unwrap_envelope<T>(endpoint: &'static str, envelope: Envelope<T>) -> Result<T, AnalysisError> {
    if envelope.code != 0 {
        return Err(AnalysisError::Upstream {
            endpoint,
            code: envelope.code,
            message: envelope.message,
        });
    }
    envelope.data.ok_or(AnalysisError::MissingData(endpoint))
}

#[async_trait]
impl BilibiliApi for HttpBilibiliClient {
    async fn video_view(&self, bvid: &str) -> Result<VideoView, AnalysisError> {
        self.fetch_data(VIDEO_VIEW, &[("bvid", bvid.to_string())])
            .await
    }

    async fn account_info(&self, mid: u64) -> Result<AccountInfo, AnalysisError> {
        self.fetch_data(ACCOUNT_INFO, &[("mid", mid.to_string())])
            .await
    }

    async fn card(&self, mid: u64) -> Result<CardInfo, AnalysisError> {
        self.fetch_data(CARD, &[("mid", mid.to_string())]).await
    }

    async fn recent_upload(&self, mid: u64) -> Result<Option<ArcItem>, AnalysisError> {
        let search: ArcSearch = self
            .fetch_data(
                ARC_SEARCH,
                &[
                    ("mid", mid.to_string()),
                    ("ps", "1".to_string()),
                    ("pn", "1".to_string()),
                ],
            )
            .await?;
        Ok(search.into_first())
    }

    async fn related(&self, bvid: &str) -> Result<Vec<RelatedVideo>, AnalysisError> {
        let list: RelatedList = self
            .fetch_data(RELATED, &[("bvid", bvid.to_string())])
            .await?;
        Ok(list.into_vec())
    }

    async fn relation_stat(&self, mid: u64) -> Result<RelationStat, AnalysisError> {
        self.fetch_data(RELATION_STAT, &[("vmid", mid.to_string())])
            .await
    }

    async fn upstat(&self, mid: u64) -> Result<UpStat, AnalysisError> {
        self.fetch_data(UPSTAT, &[("mid", mid.to_string())]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_rejects_non_zero_code() {
        let envelope: Envelope<RelationStat> =
            serde_json::from_value(json!({"code": -412, "message": "request was banned"}))
                .unwrap();
        let err = unwrap_envelope(RELATION_STAT, envelope).unwrap_err();
        assert!(matches!(err, AnalysisError::Upstream { code: -412, .. }));
        assert!(err.is_upstream_rejection());
    }

    #[test]
    fn test_unwrap_envelope_requires_data() {
        let envelope: Envelope<RelationStat> =
            serde_json::from_value(json!({"code": 0, "message": "0"})).unwrap();
        let err = unwrap_envelope(RELATION_STAT, envelope).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingData(RELATION_STAT)));
    }

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let envelope: Envelope<RelationStat> = serde_json::from_value(json!({
            "code": 0,
            "message": "0",
            "data": {"mid": 2, "following": 10, "follower": 1234}
        }))
        .unwrap();
        let stat = unwrap_envelope(RELATION_STAT, envelope).unwrap();
        assert_eq!(stat.follower, 1234);
    }

    #[test]
    fn test_client_builds_from_default_config() {
        let client = HttpBilibiliClient::new(&AnalyzerConfig::default()).unwrap();
        assert_eq!(client.api_base, "https://api.bilibili.com");
    }
}
