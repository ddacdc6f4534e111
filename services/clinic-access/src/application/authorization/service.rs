//! 授权检查服务
//!
//! 资源服务层的唯一决策入口。可在获取集合前调用一次，
//! 获取实例后带上实例描述再调用一次做实例级判断

use std::sync::Arc;

use hms_common::{ProfileId, RecordId};
use hms_errors::AppError;
use hms_ports::RecordStore;
use tracing::{debug, info};

use crate::domain::{
    Action, Decision, Evaluation, OwnershipEvaluator, OwnershipRule, PolicyEngine, PolicyRegistry,
    Principal, ResourceDescriptor, ResourceType,
};
use crate::error::AccessResult;

/// 集合查询的可见范围
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// 全部记录
    All,
    /// 只包含归属该档案的记录
    OwnedBy(ProfileId),
    /// 无可见记录
    Nothing,
}

/// 授权服务
pub struct AuthorizationService<S>
where
    S: RecordStore,
{
    engine: PolicyEngine,
    ownership: OwnershipEvaluator<S>,
    store: Arc<S>,
}

impl<S> AuthorizationService<S>
where
    S: RecordStore,
{
    pub fn new(registry: Arc<PolicyRegistry>, store: Arc<S>) -> Self {
        Self {
            engine: PolicyEngine::new(registry),
            ownership: OwnershipEvaluator::new(store.clone()),
            store,
        }
    }

    /// 执行授权检查
    pub async fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        resource: &ResourceDescriptor,
    ) -> AccessResult<Decision> {
        use metrics::{counter, histogram};
        let start = std::time::Instant::now();

        let result = self.authorize_internal(principal, action, resource).await;

        match &result {
            Ok(decision) => {
                counter!("clinic_access_decisions_total",
                    "resource" => resource.resource_type.as_str(),
                    "allowed" => decision.allowed.to_string(),
                    "reason" => decision.reason.code()
                )
                .increment(1);
                audit(principal, action, resource, decision);
            }
            Err(e) => {
                counter!("clinic_access_errors_total").increment(1);
                tracing::error!(
                    identity_id = %principal.identity_id(),
                    resource_type = %resource.resource_type,
                    action = %action,
                    error = %e,
                    "Authorization check failed"
                );
            }
        }

        histogram!("clinic_access_decision_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn authorize_internal(
        &self,
        principal: &Principal,
        action: Action,
        resource: &ResourceDescriptor,
    ) -> AccessResult<Decision> {
        match self.engine.evaluate(principal, action, resource)? {
            Evaluation::Decided(decision) => Ok(decision),
            Evaluation::OwnershipRequired(rule) => {
                let owns = self.ownership.owns(principal, resource, rule).await?;
                Ok(Decision::from_ownership(owns))
            }
        }
    }

    /// 集合操作的可见范围
    ///
    /// 角色授权覆盖整个集合时返回 `All`；
    /// 只有归属例外时返回主体档案，由服务层按归属过滤
    pub async fn scope_for(
        &self,
        principal: &Principal,
        action: Action,
        resource_type: ResourceType,
    ) -> AccessResult<Scope> {
        let collection = ResourceDescriptor::collection(resource_type);
        let evaluation = self.engine.evaluate(principal, action, &collection)?;
        if let Evaluation::Decided(decision) = evaluation {
            if decision.allowed {
                return Ok(Scope::All);
            }
        }

        let spec = self.engine.registry().get(resource_type)?;
        let rule = match OwnershipRule::for_resource(resource_type) {
            Some(rule) if spec.owner_override() => rule,
            _ => return Ok(Scope::Nothing),
        };

        Ok(self
            .ownership
            .linked_profile(principal, rule.profile_type)
            .await?
            .map_or(Scope::Nothing, Scope::OwnedBy))
    }

    /// 从存储读取实例，构建带归属信息的资源描述
    pub async fn describe(
        &self,
        resource_type: ResourceType,
        id: &RecordId,
    ) -> AccessResult<ResourceDescriptor> {
        let record = self
            .store
            .fetch(resource_type.as_str(), id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} {} not found", resource_type, id)))?;

        Ok(ResourceDescriptor {
            resource_type,
            instance_id: Some(record.id),
            owner_ref: record.owner_profile_id,
        })
    }
}

fn audit(
    principal: &Principal,
    action: Action,
    resource: &ResourceDescriptor,
    decision: &Decision,
) {
    let instance_id = resource
        .instance_id
        .as_ref()
        .map(|id| id.as_str())
        .unwrap_or("-");

    if decision.allowed {
        debug!(
            target: "audit",
            identity_id = %principal.identity_id(),
            resource_type = %resource.resource_type,
            instance_id,
            action = %action,
            allowed = true,
            reason = decision.reason.code(),
            "Access allowed"
        );
    } else {
        info!(
            target: "audit",
            identity_id = %principal.identity_id(),
            resource_type = %resource.resource_type,
            instance_id,
            action = %action,
            allowed = false,
            reason = decision.reason.code(),
            "Access denied"
        );
    }
}
