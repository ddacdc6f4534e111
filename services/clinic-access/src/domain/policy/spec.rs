//! 单个资源类型的策略

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{AccessClass, RoleName};

/// 角色对资源类型的整体授权
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub can_read: bool,
    pub can_write: bool,
}

impl RoleGrant {
    pub const READ: RoleGrant = RoleGrant {
        can_read: true,
        can_write: false,
    };

    pub const READ_WRITE: RoleGrant = RoleGrant {
        can_read: true,
        can_write: true,
    };

    pub fn allows(&self, class: AccessClass) -> bool {
        match class {
            AccessClass::Read => self.can_read,
            AccessClass::Write => self.can_write,
        }
    }
}

/// 资源类型的策略: 角色授权表 + 归属例外
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    grants: BTreeMap<RoleName, RoleGrant>,
    owner_override: bool,
}

impl PolicySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, role: RoleName, grant: RoleGrant) -> Self {
        self.grants.insert(role, grant);
        self
    }

    /// 开启归属例外: 记录的归属者可以操作该记录
    pub fn with_owner_override(mut self, enabled: bool) -> Self {
        self.owner_override = enabled;
        self
    }

    pub fn owner_override(&self) -> bool {
        self.owner_override
    }

    pub fn grants(&self) -> &BTreeMap<RoleName, RoleGrant> {
        &self.grants
    }

    /// 返回第一个授予该读写类别的角色
    pub fn granting_role(
        &self,
        roles: &BTreeSet<RoleName>,
        class: AccessClass,
    ) -> Option<RoleName> {
        roles
            .iter()
            .copied()
            .find(|role| self.grants.get(role).is_some_and(|g| g.allows(class)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granting_role() {
        let spec = PolicySpec::new()
            .grant(RoleName::Staff, RoleGrant::READ)
            .grant(RoleName::Pharmacist, RoleGrant::READ_WRITE);

        let staff = BTreeSet::from([RoleName::Staff]);
        assert_eq!(spec.granting_role(&staff, AccessClass::Read), Some(RoleName::Staff));
        assert_eq!(spec.granting_role(&staff, AccessClass::Write), None);

        let both = BTreeSet::from([RoleName::Staff, RoleName::Pharmacist]);
        assert_eq!(
            spec.granting_role(&both, AccessClass::Write),
            Some(RoleName::Pharmacist)
        );

        assert_eq!(spec.granting_role(&BTreeSet::new(), AccessClass::Read), None);
    }

    #[test]
    fn test_role_without_entry_grants_nothing() {
        let spec = PolicySpec::new().grant(RoleName::Doctor, RoleGrant::default());
        let doctor = BTreeSet::from([RoleName::Doctor]);
        assert_eq!(spec.granting_role(&doctor, AccessClass::Read), None);
    }
}
