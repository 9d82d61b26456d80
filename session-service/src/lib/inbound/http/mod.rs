pub mod errors;
pub mod extractors;
pub mod middleware;

pub use errors::ApiError;
pub use extractors::ApiKeyCredential;
pub use extractors::BearerToken;
pub use middleware::AuthenticatedUser;
