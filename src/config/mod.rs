pub mod settings;

pub use settings::{ApiSettings, CacheSettings, Settings};
