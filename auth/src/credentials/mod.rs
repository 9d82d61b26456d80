pub mod errors;
pub mod extractor;

pub use errors::CredentialError;
pub use extractor::extract_api_key;
pub use extractor::extract_bearer;
pub use extractor::extract_credential;
pub use extractor::Scheme;
