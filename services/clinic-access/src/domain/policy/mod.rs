//! 策略领域模块

pub mod evaluator;
pub mod registry;
pub mod spec;

pub use evaluator::{Evaluation, PolicyEngine};
pub use registry::PolicyRegistry;
pub use spec::{PolicySpec, RoleGrant};
