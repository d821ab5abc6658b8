#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use statlens_core::connectors::bilibili::{
    AccountInfo, ArcItem, ArcSearch, CardInfo, RelatedList, RelatedVideo, RelationStat, UpStat,
    VideoView,
};
use statlens_core::connectors::{BilibiliApi, MetadataExtractor};
use statlens_core::{AnalysisError, CreatorAnalyzer};

/// Canned upstream answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Data(Value),
    /// Error envelope with this code
    Rejected(i64),
    /// Request never got an answer
    Transport,
}

fn answer<T: DeserializeOwned>(
    endpoint: &'static str,
    reply: Option<&Reply>,
) -> Result<T, AnalysisError> {
    match reply {
        Some(Reply::Data(value)) => Ok(serde_json::from_value(value.clone())?),
        Some(Reply::Rejected(code)) => Err(AnalysisError::Upstream {
            endpoint,
            code: *code,
            message: "rejected".to_string(),
        }),
        Some(Reply::Transport) => Err(AnalysisError::Timeout(format!("{} timed out", endpoint))),
        None => Err(AnalysisError::Upstream {
            endpoint,
            code: -404,
            message: "not found".to_string(),
        }),
    }
}

/// In-memory Bilibili API. Unconfigured keys answer with a -404 envelope.
#[derive(Default)]
pub struct FakeBilibili {
    pub views: HashMap<String, Reply>,
    pub accounts: HashMap<u64, Reply>,
    pub cards: HashMap<u64, Reply>,
    pub uploads: HashMap<u64, Reply>,
    pub related: HashMap<String, Reply>,
    pub relations: HashMap<u64, Reply>,
    pub upstats: HashMap<u64, Reply>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBilibili {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn called(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl BilibiliApi for FakeBilibili {
    async fn video_view(&self, bvid: &str) -> Result<VideoView, AnalysisError> {
        self.record(format!("view:{}", bvid));
        answer("/x/web-interface/view", self.views.get(bvid))
    }

    async fn account_info(&self, mid: u64) -> Result<AccountInfo, AnalysisError> {
        self.record(format!("account:{}", mid));
        answer("/x/space/acc/info", self.accounts.get(&mid))
    }

    async fn card(&self, mid: u64) -> Result<CardInfo, AnalysisError> {
        self.record(format!("card:{}", mid));
        answer("/x/web-interface/card", self.cards.get(&mid))
    }

    async fn recent_upload(&self, mid: u64) -> Result<Option<ArcItem>, AnalysisError> {
        self.record(format!("upload:{}", mid));
        let search: ArcSearch = answer("/x/space/arc/search", self.uploads.get(&mid))?;
        Ok(search.into_first())
    }

    async fn related(&self, bvid: &str) -> Result<Vec<RelatedVideo>, AnalysisError> {
        self.record(format!("related:{}", bvid));
        let list: RelatedList = answer("/x/web-interface/archive/related", self.related.get(bvid))?;
        Ok(list.into_vec())
    }

    async fn relation_stat(&self, mid: u64) -> Result<RelationStat, AnalysisError> {
        self.record(format!("relation:{}", mid));
        answer("/x/relation/stat", self.relations.get(&mid))
    }

    async fn upstat(&self, mid: u64) -> Result<UpStat, AnalysisError> {
        self.record(format!("upstat:{}", mid));
        answer("/x/space/upstat", self.upstats.get(&mid))
    }
}

/// Extractor returning one canned value (or failing) for every target.
pub struct FakeExtractor {
    response: Result<Value, String>,
    pub calls: Mutex<Vec<(String, bool)>>,
}

impl FakeExtractor {
    pub fn returning(value: Value) -> Self {
        Self {
            response: Ok(value),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            response: Err(stderr.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MetadataExtractor for FakeExtractor {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn extract(&self, target: &str, flat: bool) -> Result<Value, AnalysisError> {
        self.calls.lock().unwrap().push((target.to_string(), flat));
        self.response
            .clone()
            .map_err(AnalysisError::Extraction)
    }
}

pub fn bilibili_analyzer(api: FakeBilibili) -> (CreatorAnalyzer, Arc<FakeBilibili>) {
    let api = Arc::new(api);
    let analyzer = CreatorAnalyzer::with_clients(
        api.clone(),
        Arc::new(FakeExtractor::failing("not used")),
    );
    (analyzer, api)
}

pub fn youtube_analyzer(extractor: FakeExtractor) -> (CreatorAnalyzer, Arc<FakeExtractor>) {
    let extractor = Arc::new(extractor);
    let analyzer =
        CreatorAnalyzer::with_clients(Arc::new(FakeBilibili::default()), extractor.clone());
    (analyzer, extractor)
}
