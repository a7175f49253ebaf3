pub mod poll_response_factory;
pub mod sub_query_factory;

pub use poll_response_factory::{ItineraryFactory, PollResponseFactory};
pub use sub_query_factory::{SubQueryFactory, date};

#[cfg(test)]
mod poll_response_factory_test;
