//! Improver Core - progress-tracked improvement agent
//!
//! Provides:
//! - The improvement bundle model (repository, goals, engagement areas)
//! - A runner that walks the fixed improvement sequence and reports each step
//! - Pluggable progress sinks (tracing, JSON lines, in-memory)

pub mod config;
pub mod domain;
pub mod fakes;
pub mod obs;
pub mod progress;
pub mod runner;
pub mod sink;
pub mod stream;
pub mod telemetry;

pub use config::load_bundle;
pub use domain::{
    BundleError, Engagement, EngagementAreas, Goals, ImprovementArea, ImprovementBundle,
    ProcessFault, RepositoryInfo, Result, UnknownArea,
};
pub use progress::{ProgressEntry, ProgressFormat, Severity, StepCounter};
pub use runner::{ImproveAgent, RunSummary};
pub use sink::{ProgressSink, TracingSink};
pub use stream::{JsonLinesSink, StreamEvent};
pub use telemetry::init_tracing;

/// Improver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
