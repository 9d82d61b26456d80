pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::session;
pub use outbound::repositories;

// Re-export commonly used types
pub use domain::session::errors::SessionError;
pub use domain::session::models::*;
pub use domain::session::ports::SessionServicePort;
pub use domain::session::service::SessionService;
