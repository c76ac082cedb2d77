mod storage_client_errors;
mod uri_errors;
mod validation_errors;

pub use storage_client_errors::*;
pub use uri_errors::*;
pub use validation_errors::*;
