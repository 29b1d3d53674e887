mod request;
mod response;

pub use request::FeatureRequest;
pub use response::{HealthResponse, SaveResponse};
