//! 应用层

pub mod authorization;
pub mod identity;

pub use authorization::{AuthorizationService, Scope};
pub use identity::IdentityResolver;
