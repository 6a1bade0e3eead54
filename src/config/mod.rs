pub mod parser;
pub mod types;

pub use parser::{load_config, Overrides};
pub use types::Config;
