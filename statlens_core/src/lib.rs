// src/lib.rs
pub mod analyzer;
pub mod config;
pub mod connectors;
pub mod demo;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod utils;

pub use analyzer::CreatorAnalyzer;
pub use config::AnalyzerConfig;
pub use error::AnalysisError;
pub use model::{AnalysisResult, Competitor, Platform};
pub use resolver::{Classifier, ResolvedTarget, TargetKind};
