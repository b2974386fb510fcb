pub mod model;

pub use model::{CleanerConfig, LoggingConfig, Settings, load_settings};

#[cfg(test)]
mod model_test;
