//! georoute AWS - managed service clients
//!
//! Handles the anonymous identity exchange and the route-calculation call
//! against Amazon Location Service through the AWS SDK.

pub mod client;
pub mod credentials;
pub mod error;
pub mod sdk;

pub use aws_credential_types::Credentials;
pub use client::GeoRoutesClient;
pub use credentials::{region_from_pool_id, CognitoCredentialsProvider};
pub use error::{AuthError, RouteError};
pub use sdk::load_shared_config;
