pub mod progress;
pub mod tracing;

pub use progress::{classification_line, report};
pub use self::tracing::{init_from_config, init_tracing};
