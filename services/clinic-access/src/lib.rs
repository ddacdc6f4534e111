//! clinic-access - 临床记录系统的授权层
//!
//! 决定哪个已认证主体可以对哪个资源实例执行哪个操作。
//! 入口为 [`AuthorizationService::authorize`]，主体由 [`IdentityResolver`] 构建

pub mod application;
pub mod domain;
pub mod error;
pub mod runtime;

pub use application::{AuthorizationService, IdentityResolver, Scope};
pub use domain::{
    AccessClass, Action, ActionClassifier, Decision, DecisionReason, PolicyRegistry, Principal,
    ResourceDescriptor, ResourceType, RoleName,
};
pub use error::{AccessError, AccessResult};
