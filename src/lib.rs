pub mod config;
pub mod detectors;
pub mod engine;
pub mod render;
pub mod schema;
pub mod session;
pub mod tools;

pub use config::Config;
pub use engine::DetectionEngine;
pub use schema::{DetectionResult, DetectorId, Preview, ResultSet};
pub use session::PreviewSession;
pub use tools::ToolId;
