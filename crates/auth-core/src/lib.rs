//! hms-auth-core - 认证核心库
//!
//! JWT Claims 与令牌验证。令牌由外部认证服务签发，这里只负责验证并转换为 `VerifiedIdentity`

use async_trait::async_trait;
use hms_common::{IdentityId, ProfileId};
use hms_errors::{AppError, AppResult};
use hms_ports::{Authenticator, Credential, LinkedProfile, ProfileType, VerifiedIdentity};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity ID)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Token type (access or refresh)
    #[serde(default)]
    pub token_type: String,
    /// 超级用户
    #[serde(default)]
    pub is_superuser: bool,
    /// 角色声明 (未规范化)
    #[serde(default)]
    pub roles: Vec<String>,
    /// 关联档案 ID (如医生档案 "D001")
    #[serde(default)]
    pub profile_id: Option<String>,
    /// 关联档案类型 (如 "doctor")，缺失时忽略 `profile_id`
    #[serde(default)]
    pub profile_type: Option<String>,
}

impl Claims {
    pub fn identity_id(&self) -> AppResult<IdentityId> {
        if self.sub.trim().is_empty() {
            return Err(AppError::unauthenticated("Missing subject in token"));
        }
        Ok(IdentityId::new(self.sub.clone()))
    }

    /// 验证 token 类型
    pub fn is_access_token(&self) -> bool {
        self.token_type == "access"
    }

    /// 关联档案，类型与 ID 缺一或类型无法识别时丢弃
    pub fn linked_profile(&self) -> Option<LinkedProfile> {
        let id = self.profile_id.as_deref().filter(|id| !id.trim().is_empty())?;
        let profile_type = match self.profile_type.as_deref()?.parse::<ProfileType>() {
            Ok(profile_type) => profile_type,
            Err(e) => {
                warn!(sub = %self.sub, error = %e, "Dropping profile claim");
                return None;
            }
        };
        Some(LinkedProfile::new(profile_type, ProfileId::new(id)))
    }

    /// 转换为认证协作方的输出
    pub fn into_verified_identity(self) -> AppResult<VerifiedIdentity> {
        let identity_id = self.identity_id()?;
        let linked_profile = self.linked_profile();
        Ok(VerifiedIdentity {
            identity_id,
            is_superuser: self.is_superuser,
            raw_role_claims: self.roles,
            linked_profile,
        })
    }
}

/// 基于 HS256 JWT 的认证器
#[derive(Clone)]
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    leeway_secs: u64,
}

impl JwtAuthenticator {
    pub fn new(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
            leeway_secs: 0,
        }
    }

    /// 设置允许的时钟偏差
    pub fn with_leeway(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// 验证令牌
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthenticated(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.jti.is_empty() {
            return Err(AppError::unauthenticated("Token ID (jti) missing"));
        }

        Ok(claims)
    }

    /// 验证访问令牌（确保是 access token）
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(AppError::unauthenticated("Not an access token"));
        }

        Ok(claims)
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn verify(&self, credential: &Credential) -> AppResult<VerifiedIdentity> {
        let claims = self.validate_access_token(credential.token())?;
        debug!(identity_id = %claims.sub, "Token verified");
        claims.into_verified_identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test_secret";

    fn claims(token_type: &str, roles: &[&str]) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "17".to_string(),
            exp: now + 3600,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
            iss: "hms".to_string(),
            aud: "hms-api".to_string(),
            token_type: token_type.to_string(),
            is_superuser: false,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            profile_id: Some("D001".to_string()),
            profile_type: Some("doctor".to_string()),
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn authenticator() -> JwtAuthenticator {
        JwtAuthenticator::new(SECRET, "hms", "hms-api")
    }

    #[tokio::test]
    async fn test_verify_access_token() {
        let token = sign(&claims("access", &["Doctor"]), SECRET);

        let identity = authenticator()
            .verify(&Credential::bearer(token))
            .await
            .unwrap();

        assert_eq!(identity.identity_id, IdentityId::from("17"));
        assert!(!identity.is_superuser);
        assert_eq!(identity.raw_role_claims, vec!["Doctor".to_string()]);
        assert_eq!(
            identity.linked_profile,
            Some(LinkedProfile::new(ProfileType::Doctor, "D001"))
        );
    }

    #[tokio::test]
    async fn test_refresh_token_rejected() {
        let token = sign(&claims("refresh", &[]), SECRET);

        let err = authenticator()
            .verify(&Credential::bearer(token))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let token = sign(&claims("access", &["Doctor"]), "another_secret");

        let err = authenticator()
            .verify(&Credential::bearer(token))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn test_wrong_audience_rejected() {
        let mut c = claims("access", &[]);
        c.aud = "other-api".to_string();
        let token = sign(&c, SECRET);

        assert!(authenticator().validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut c = claims("access", &[]);
        c.exp = chrono::Utc::now().timestamp() - 120;
        let token = sign(&c, SECRET);

        assert!(authenticator().validate_token(&token).is_err());
        // 偏差足够大时仍可接受
        assert!(
            authenticator()
                .with_leeway(300)
                .validate_token(&token)
                .is_ok()
        );
    }

    #[test]
    fn test_missing_jti_rejected() {
        let mut c = claims("access", &[]);
        c.jti = String::new();
        let token = sign(&c, SECRET);

        let err = authenticator().validate_token(&token).unwrap_err();
        assert!(err.to_string().contains("jti"));
    }

    #[test]
    fn test_blank_profile_claim_dropped() {
        let mut c = claims("access", &[]);
        c.profile_id = Some("  ".to_string());

        let identity = c.into_verified_identity().unwrap();
        assert!(identity.linked_profile.is_none());
    }

    #[test]
    fn test_untyped_profile_claim_dropped() {
        let mut c = claims("access", &[]);
        c.profile_type = None;
        assert!(c.linked_profile().is_none());

        c.profile_type = Some("patient".to_string());
        assert!(c.linked_profile().is_none());

        c.profile_type = Some("Staff".to_string());
        assert_eq!(
            c.linked_profile(),
            Some(LinkedProfile::new(ProfileType::Staff, "D001"))
        );
    }

    #[test]
    fn test_blank_subject_rejected() {
        let mut c = claims("access", &[]);
        c.sub = String::new();

        assert!(matches!(
            c.into_verified_identity(),
            Err(AppError::Unauthenticated(_))
        ));
    }
}
