//! 归属判断
//!
//! 医生档案及其派生记录 (预约、问诊、处方、检验单、检验报告) 只对归属医生开放。
//! 判断失败一律视为不归属，不作为错误返回

use std::sync::Arc;

use hms_common::ProfileId;
use hms_ports::{ProfileType, RecordStore};
use tracing::debug;

use super::{Principal, ResourceDescriptor, ResourceType};
use crate::error::AccessResult;

/// 实例归属档案的取值位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKey {
    /// 实例本身就是档案 (如医生档案)
    Instance,
    /// 实例通过 `owner_ref` 指向归属档案
    OwnerRef,
}

/// 某资源类型的归属规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipRule {
    pub profile_type: ProfileType,
    pub owner_key: OwnerKey,
}

impl OwnershipRule {
    pub fn for_resource(resource_type: ResourceType) -> Option<Self> {
        let owner_key = match resource_type {
            ResourceType::Doctor => OwnerKey::Instance,
            ResourceType::Appointment
            | ResourceType::Consultation
            | ResourceType::MedicinePrescription
            | ResourceType::LabTestPrescription
            | ResourceType::LabTestReport => OwnerKey::OwnerRef,
            _ => return None,
        };

        Some(Self {
            profile_type: ProfileType::Doctor,
            owner_key,
        })
    }

    /// 实例的归属档案
    pub fn instance_owner(&self, resource: &ResourceDescriptor) -> Option<ProfileId> {
        match self.owner_key {
            OwnerKey::Instance => resource.instance_id.as_ref().map(|id| id.as_profile_id()),
            OwnerKey::OwnerRef => resource.owner_ref.clone(),
        }
    }
}

/// 归属判断器
pub struct OwnershipEvaluator<S>
where
    S: RecordStore,
{
    store: Arc<S>,
}

impl<S> OwnershipEvaluator<S>
where
    S: RecordStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 主体关联的档案
    ///
    /// 主体已携带同类型档案时不查询存储；否则最多查询一次
    pub async fn linked_profile(
        &self,
        principal: &Principal,
        profile_type: ProfileType,
    ) -> AccessResult<Option<ProfileId>> {
        if let Some(profile_id) = principal.linked_profile_of(profile_type) {
            return Ok(Some(profile_id.clone()));
        }

        let profile = self
            .store
            .fetch_owner_profile(principal.identity_id(), profile_type)
            .await?;

        Ok(profile
            .filter(|p| p.profile_type == profile_type)
            .map(|p| p.id))
    }

    /// 主体是否拥有该实例
    pub async fn owns(
        &self,
        principal: &Principal,
        resource: &ResourceDescriptor,
        rule: OwnershipRule,
    ) -> AccessResult<bool> {
        let Some(owner) = rule.instance_owner(resource) else {
            debug!(
                resource_type = %resource.resource_type,
                "Instance owner unknown, treating as not owned"
            );
            return Ok(false);
        };

        let Some(profile_id) = self.linked_profile(principal, rule.profile_type).await? else {
            debug!(
                identity_id = %principal.identity_id(),
                profile_type = %rule.profile_type,
                "No linked profile, treating as not owned"
            );
            return Ok(false);
        };

        Ok(profile_id == owner)
    }
}
