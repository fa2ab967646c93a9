//! georoute stack - provisioning declarations
//!
//! Declares the resources the viewer consumes: a map/tile API key, an
//! anonymous identity pool and a role limited to route calculation.

pub mod policy;
pub mod stack;

pub use policy::{Condition, Effect, Expr, PolicyDocument, Principal, Statement};
pub use stack::{
    ApiKey, FederatedRole, IdentityPool, Output, Stack, StackContext, StackError,
    API_KEY_NAME_CONTEXT, DEFAULT_API_KEY_NAME, MAP_ACTIONS, ROUTE_ACTION,
};
