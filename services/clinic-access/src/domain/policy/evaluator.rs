//! 策略评估引擎
//!
//! 纯计算，不做任何 I/O。需要归属判断时返回 `Evaluation::OwnershipRequired`，
//! 由调用方完成唯一一次档案查询后用 `Decision::from_ownership` 收尾
//!
//! 算法:
//! 1. 超级用户或管理员 -> Allow(admin-override)
//! 2. 查找资源类型的策略 (缺失为配置错误)
//! 3. 将操作分类为读或写
//! 4. 任一角色授予该类别 -> Allow(role-grant)
//! 5. 开启归属例外且请求指向具体实例 -> 交给归属判断
//! 6. 否则 Deny(insufficient-role)
//!
//! 组合规则为最宽松优先，没有显式 Deny

use std::sync::Arc;

use super::registry::PolicyRegistry;
use crate::domain::{
    Action, ActionClassifier, Decision, DecisionReason, OwnershipRule, Principal,
    ResourceDescriptor,
};
use crate::error::AccessResult;

/// 引擎评估结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// 已得出决策
    Decided(Decision),
    /// 角色授权不足，需要按规则判断归属
    OwnershipRequired(OwnershipRule),
}

/// 策略引擎
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    registry: Arc<PolicyRegistry>,
}

impl PolicyEngine {
    pub fn new(registry: Arc<PolicyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn evaluate(
        &self,
        principal: &Principal,
        action: Action,
        resource: &ResourceDescriptor,
    ) -> AccessResult<Evaluation> {
        if principal.is_admin() {
            return Ok(Evaluation::Decided(Decision::allow(
                DecisionReason::AdminOverride,
            )));
        }

        let spec = self.registry.get(resource.resource_type)?;
        let class = ActionClassifier::classify(action);

        if spec.granting_role(principal.roles(), class).is_some() {
            return Ok(Evaluation::Decided(Decision::allow(DecisionReason::RoleGrant)));
        }

        if spec.owner_override() && resource.instance_id.is_some() {
            if let Some(rule) = OwnershipRule::for_resource(resource.resource_type) {
                return Ok(Evaluation::OwnershipRequired(rule));
            }
        }

        Ok(Evaluation::Decided(Decision::deny(
            DecisionReason::InsufficientRole,
        )))
    }
}
