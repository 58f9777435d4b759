//! Assistant engine: HTTP analysis client and effect execution.
mod client;
mod engine;
mod settings;
mod types;
mod wire;

pub use client::{failure_message, Analyzer, ReqwestAnalyzer};
pub use engine::{EngineEvents, EngineHandle};
pub use settings::{AnalyzeSettings, DEFAULT_ENDPOINT};
pub use types::{AnalyzeError, EngineEvent, FailureKind};
pub use wire::parse_analysis;
