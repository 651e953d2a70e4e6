pub mod directory;
pub mod error;
pub mod metrics;
pub mod qr;
pub mod token;

pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use error::ServiceError;
pub use metrics::{get_metrics, init_metrics};
pub use token::{AccessTokenClaims, TokenCodec};
