//! Domain model for the improver agent.

pub mod area;
pub mod bundle;
pub mod error;

pub use area::{EngagementAreas, ImprovementArea, UnknownArea};
pub use bundle::{Engagement, Goals, ImprovementBundle, RepositoryInfo};
pub use error::{BundleError, ProcessFault, Result};
