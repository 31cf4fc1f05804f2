//! Domain types and models

pub mod endpoint;
pub mod environment;
pub mod gateway;

pub use endpoint::{EndpointMethod, EndpointRecord};
pub use environment::Environment;
pub use gateway::{
    CancelOutcome, CancelRequest, ConnectionStatus, CreateOutcome, CreateRequest, DocumentDetail,
    DocumentHeader, DocumentItem, FilterCriteria, NormalizedRecord,
};
