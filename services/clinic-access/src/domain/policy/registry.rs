//! 资源策略注册表
//!
//! 进程级静态配置: 启动时加载并校验完整性，之后只读

use std::collections::BTreeMap;

use hms_config::{AccessConfig, PolicyConfig};
use tracing::warn;

use super::spec::{PolicySpec, RoleGrant};
use crate::domain::{Action, OwnershipRule, ResourceType, RoleName};
use crate::error::{AccessError, AccessResult};

/// 资源策略注册表
#[derive(Debug, Clone)]
pub struct PolicyRegistry {
    specs: BTreeMap<ResourceType, PolicySpec>,
}

impl PolicyRegistry {
    /// 内置策略表
    ///
    /// Staff 在所有资源上只读；写操作只授予对应业务角色。
    /// 归属例外不区分读写: 医生对自己的预约也可写，
    /// 需要只读时由服务层在路由上限制
    pub fn builtin() -> Self {
        use RoleName::*;
        use ResourceType as R;

        let read = RoleGrant::READ;
        let rw = RoleGrant::READ_WRITE;

        let specs = BTreeMap::from([
            (R::User, PolicySpec::new()),
            (R::Staff, PolicySpec::new().grant(Staff, read)),
            (
                R::Specialization,
                PolicySpec::new()
                    .grant(Staff, read)
                    .grant(Doctor, read)
                    .grant(Receptionist, read),
            ),
            (
                R::Doctor,
                PolicySpec::new()
                    .grant(Staff, read)
                    .grant(Receptionist, read)
                    .with_owner_override(true),
            ),
            (
                R::Patient,
                PolicySpec::new()
                    .grant(Receptionist, rw)
                    .grant(Staff, read)
                    .grant(Doctor, read),
            ),
            (
                R::Appointment,
                PolicySpec::new()
                    .grant(Receptionist, rw)
                    .grant(Staff, read)
                    .with_owner_override(true),
            ),
            (
                R::Consultation,
                PolicySpec::new()
                    .grant(Staff, read)
                    .grant(Pharmacist, read)
                    .with_owner_override(true),
            ),
            (
                R::MedicineCategory,
                PolicySpec::new()
                    .grant(Pharmacist, rw)
                    .grant(Staff, read)
                    .grant(Doctor, read),
            ),
            (
                R::Medicine,
                PolicySpec::new()
                    .grant(Pharmacist, rw)
                    .grant(Staff, read)
                    .grant(Doctor, read),
            ),
            (
                R::MedicineStock,
                PolicySpec::new().grant(Pharmacist, rw).grant(Staff, read),
            ),
            (
                R::MedicinePrescription,
                PolicySpec::new()
                    .grant(Pharmacist, read)
                    .grant(Staff, read)
                    .with_owner_override(true),
            ),
            (
                R::LabTest,
                PolicySpec::new()
                    .grant(LabTechnician, rw)
                    .grant(Doctor, read)
                    .grant(Staff, read),
            ),
            (
                R::LabTestPrescription,
                PolicySpec::new()
                    .grant(LabTechnician, read)
                    .grant(Staff, read)
                    .with_owner_override(true),
            ),
            (
                R::LabTestReport,
                PolicySpec::new()
                    .grant(LabTechnician, rw)
                    .grant(Staff, read)
                    .with_owner_override(true),
            ),
            (
                R::Billing,
                PolicySpec::new()
                    .grant(Receptionist, rw)
                    .grant(Pharmacist, rw)
                    .grant(Staff, read),
            ),
        ]);

        Self { specs }
    }

    /// 从策略条目构建并校验
    pub fn from_specs(
        specs: impl IntoIterator<Item = (ResourceType, PolicySpec)>,
    ) -> AccessResult<Self> {
        let registry = Self {
            specs: specs.into_iter().collect(),
        };
        registry.validate()?;
        Ok(registry)
    }

    /// 从配置构建
    ///
    /// `inherit_defaults` 为 true 时配置条目整体替换内置表中的对应资源类型
    pub fn from_config(config: &AccessConfig) -> AccessResult<Self> {
        let mut specs = if config.inherit_defaults {
            Self::builtin().specs
        } else {
            BTreeMap::new()
        };

        for (name, policy) in &config.policies {
            let resource_type: ResourceType = name.parse()?;
            specs.insert(resource_type, spec_from_config(resource_type, policy)?);
        }

        Self::from_specs(specs)
    }

    /// 校验: 每个资源类型都有条目，开启归属例外的资源类型必须有归属规则
    fn validate(&self) -> AccessResult<()> {
        for resource_type in ResourceType::ALL {
            let spec = self
                .specs
                .get(&resource_type)
                .ok_or(AccessError::IncompletePolicy(resource_type))?;

            if spec.owner_override() && OwnershipRule::for_resource(resource_type).is_none() {
                return Err(AccessError::OwnershipUnsupported(resource_type));
            }
        }
        Ok(())
    }

    pub fn get(&self, resource_type: ResourceType) -> AccessResult<&PolicySpec> {
        self.specs
            .get(&resource_type)
            .ok_or_else(|| AccessError::UnknownResourceType(resource_type.to_string()))
    }

    /// 校验服务层的路由声明 (资源类型名 + 操作名)
    pub fn bind(&self, resource_type: &str, action: &str) -> AccessResult<(ResourceType, Action)> {
        let resource_type: ResourceType = resource_type.parse()?;
        let action: Action = action.parse()?;
        self.get(resource_type)?;
        Ok((resource_type, action))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, &PolicySpec)> {
        self.specs.iter().map(|(t, s)| (*t, s))
    }
}

fn spec_from_config(
    resource_type: ResourceType,
    policy: &PolicyConfig,
) -> AccessResult<PolicySpec> {
    let mut spec = PolicySpec::new().with_owner_override(policy.owner_override);

    for (role_name, grant) in &policy.roles {
        let role: RoleName = role_name.parse()?;
        if role == RoleName::Administrator {
            warn!(
                resource_type = %resource_type,
                "Ignoring grant for administrator; administrators are always allowed"
            );
            continue;
        }
        spec = spec.grant(
            role,
            RoleGrant {
                can_read: grant.read,
                can_write: grant.write,
            },
        );
    }

    Ok(spec)
}
