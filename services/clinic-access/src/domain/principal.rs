//! 请求主体

use std::collections::BTreeSet;

use hms_common::{IdentityId, ProfileId};
use hms_ports::{LinkedProfile, ProfileType};

use super::role::RoleName;

/// 已认证的请求主体
///
/// 每个请求构建一次，构建后只读
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    identity_id: IdentityId,
    is_superuser: bool,
    roles: BTreeSet<RoleName>,
    linked_profile: Option<LinkedProfile>,
}

impl Principal {
    pub fn new(identity_id: impl Into<IdentityId>) -> Self {
        Self {
            identity_id: identity_id.into(),
            is_superuser: false,
            roles: BTreeSet::new(),
            linked_profile: None,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleName>) -> Self {
        self.roles.extend(roles);
        self
    }

    pub fn with_superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = is_superuser;
        self
    }

    pub fn with_linked_profile(
        mut self,
        profile_type: ProfileType,
        profile_id: impl Into<ProfileId>,
    ) -> Self {
        self.linked_profile = Some(LinkedProfile::new(profile_type, profile_id));
        self
    }

    pub fn identity_id(&self) -> &IdentityId {
        &self.identity_id
    }

    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    pub fn roles(&self) -> &BTreeSet<RoleName> {
        &self.roles
    }

    pub fn linked_profile(&self) -> Option<&LinkedProfile> {
        self.linked_profile.as_ref()
    }

    /// 指定类型的关联档案 ID，类型不符时为 None
    pub fn linked_profile_of(&self, profile_type: ProfileType) -> Option<&ProfileId> {
        self.linked_profile
            .as_ref()
            .filter(|p| p.profile_type == profile_type)
            .map(|p| &p.id)
    }

    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// 超级用户或管理员，跳过所有其他规则
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.has_role(RoleName::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_detection() {
        assert!(Principal::new("1").with_superuser(true).is_admin());
        assert!(
            Principal::new("2")
                .with_roles([RoleName::Administrator])
                .is_admin()
        );
        assert!(
            !Principal::new("3")
                .with_roles([RoleName::Staff, RoleName::Doctor])
                .is_admin()
        );
    }

    #[test]
    fn test_roles_deduplicated() {
        let principal = Principal::new("4").with_roles([RoleName::Doctor, RoleName::Doctor]);
        assert_eq!(principal.roles().len(), 1);
        assert!(principal.has_role(RoleName::Doctor));
        assert!(principal.linked_profile().is_none());
    }

    #[test]
    fn test_linked_profile_is_typed() {
        let principal = Principal::new("5").with_linked_profile(ProfileType::Staff, "P7");
        assert_eq!(
            principal.linked_profile_of(ProfileType::Staff),
            Some(&ProfileId::from("P7"))
        );
        assert!(principal.linked_profile_of(ProfileType::Doctor).is_none());
    }
}
