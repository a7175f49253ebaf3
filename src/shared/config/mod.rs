pub mod global;
pub mod model;

pub use global::CONFIG;
pub use model::{
    BrokerConfig, GatewayConfig, LoggingConfig, MakerConfig, PollerConfig, Settings, TasksConfig,
};
