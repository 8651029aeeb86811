// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod best_score;
pub mod celebration;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod medal;
pub mod notify;
pub mod presenter;
pub mod runtime;
pub mod session;
pub mod sound;
pub mod timer;

pub use difficulty::{DifficultyCatalog, DifficultyProfile};
pub use error::ConfigError;
pub use medal::{judge, MedalResult, Tier};
pub use session::{Phase, Session, SessionState};
