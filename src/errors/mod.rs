pub mod types;

pub use types::PhishguardError;
