//! 授权领域模型

pub mod action;
pub mod decision;
pub mod ownership;
pub mod policy;
pub mod principal;
pub mod resource;
pub mod role;

pub use action::{AccessClass, Action, ActionClassifier};
pub use decision::{Decision, DecisionReason};
pub use ownership::{OwnerKey, OwnershipEvaluator, OwnershipRule};
pub use policy::{Evaluation, PolicyEngine, PolicyRegistry, PolicySpec, RoleGrant};
pub use principal::Principal;
pub use resource::{ResourceDescriptor, ResourceType};
pub use role::RoleName;
