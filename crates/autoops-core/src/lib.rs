pub mod task;
pub mod clock;
pub mod settings;
pub mod error;

// Re-exports
pub use task::TaskKind;
pub use clock::{Clock, FixedClock, SystemClock, username_for};
pub use settings::Settings;
pub use error::{Error, Result};
