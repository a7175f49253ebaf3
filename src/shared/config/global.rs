use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::shared::config::model::{Settings, load_settings};

/// Loaded on first use; a missing or invalid file aborts startup.
pub static CONFIG: Lazy<Arc<Settings>> = Lazy::new(|| {
    Arc::new(load_settings().expect("failed to load configuration (see FARE_SCOUT_CONFIG)"))
});
