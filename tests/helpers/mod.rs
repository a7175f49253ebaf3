pub mod echo_worker;
pub mod factories;
pub mod recording_sleeper;
pub mod scripted_gateway;

pub use echo_worker::{direct_reply, spawn_echo_worker};
pub use recording_sleeper::RecordingSleeper;
pub use scripted_gateway::ScriptedGateway;
