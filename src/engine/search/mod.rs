pub mod credentials;
pub mod orchestrator;
pub mod query;
pub mod result;

pub use credentials::CredentialPool;
pub use orchestrator::SearchOrchestrator;
pub use query::{MatrixCell, SearchQuery, TripKind};
pub use result::{FlightResult, build_results};
