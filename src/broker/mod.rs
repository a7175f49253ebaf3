pub mod delivery;
pub mod errors;
pub mod memory;
pub mod message;

pub use delivery::{Consumer, Delivery};
pub use errors::BrokerError;
pub use memory::{Broker, ReplyQueue};
pub use message::{CorrelationId, Message, Properties, ReplyTo, Route};
