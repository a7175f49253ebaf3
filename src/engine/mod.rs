pub mod errors;
pub mod search;
pub mod tasks;
pub mod types;
pub mod worker;

pub use errors::*;
