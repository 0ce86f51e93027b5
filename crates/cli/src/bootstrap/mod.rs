mod config;
mod hints;
mod logging;

pub use config::load_config;
pub use hints::load_hints;
pub use logging::init_logging;
