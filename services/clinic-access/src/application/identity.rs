//! 身份解析
//!
//! 角色只从认证凭证的角色声明这一个来源解析，下游不再重新推导

use std::collections::BTreeSet;
use std::sync::Arc;

use hms_ports::{Authenticator, Credential, VerifiedIdentity};
use tracing::{debug, warn};

use crate::domain::{Principal, RoleName};
use crate::error::{AccessError, AccessResult};

/// 身份解析器
pub struct IdentityResolver<A>
where
    A: Authenticator,
{
    authenticator: Arc<A>,
}

impl<A> IdentityResolver<A>
where
    A: Authenticator,
{
    pub fn new(authenticator: Arc<A>) -> Self {
        Self { authenticator }
    }

    /// 从请求凭证构建主体
    ///
    /// 凭证缺失或验证失败返回 `AccessError::Unauthenticated`
    pub async fn resolve(&self, credential: Option<&Credential>) -> AccessResult<Principal> {
        let Some(credential) = credential else {
            warn!("Missing credential");
            return Err(AccessError::Unauthenticated("Missing credential".to_string()));
        };

        let identity = self.authenticator.verify(credential).await.map_err(|e| {
            warn!(error = %e, "Credential verification failed");
            AccessError::Unauthenticated(e.to_string())
        })?;

        Ok(principal_from(identity))
    }
}

/// 将验证后的身份规范化为主体，无法识别的角色声明被丢弃
pub fn principal_from(identity: VerifiedIdentity) -> Principal {
    let mut roles = BTreeSet::new();
    for claim in &identity.raw_role_claims {
        match RoleName::from_claim(claim) {
            Some(role) => {
                roles.insert(role);
            }
            None => warn!(
                identity_id = %identity.identity_id,
                claim = %claim,
                "Dropping unrecognized role claim"
            ),
        }
    }

    debug!(
        identity_id = %identity.identity_id,
        is_superuser = identity.is_superuser,
        roles = ?roles,
        "Principal resolved"
    );

    let principal = Principal::new(identity.identity_id)
        .with_superuser(identity.is_superuser)
        .with_roles(roles);

    match identity.linked_profile {
        Some(profile) => principal.with_linked_profile(profile.profile_type, profile.id),
        None => principal,
    }
}
