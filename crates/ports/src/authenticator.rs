//! 认证协作方接口

use async_trait::async_trait;
use hms_common::IdentityId;
use hms_errors::AppResult;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::LinkedProfile;

/// 请求携带的凭证 (Bearer token)
#[derive(Debug, Clone)]
pub struct Credential {
    token: Secret<String>,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
        }
    }

    /// 从 `Authorization` 请求头解析，只接受 `Bearer <token>`
    pub fn from_authorization_header(header: &str) -> Option<Self> {
        let token = header.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        Some(Self::bearer(token))
    }

    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// 认证协作方验证通过后返回的身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub identity_id: IdentityId,
    pub is_superuser: bool,
    /// 未规范化的角色声明，原样来自凭证
    pub raw_role_claims: Vec<String>,
    /// 凭证中携带的关联档案 (可选)，类型与 ID 必须同时存在
    pub linked_profile: Option<LinkedProfile>,
}

/// 认证协作方
///
/// 凭证无效时返回 `AppError::Unauthenticated`
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn verify(&self, credential: &Credential) -> AppResult<VerifiedIdentity>;
}
