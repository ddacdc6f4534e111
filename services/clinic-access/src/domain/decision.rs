//! 授权决策

use hms_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 决策原因 (用于审计日志的机器可读代码)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionReason {
    AdminOverride,
    RoleGrant,
    OwnerOverride,
    InsufficientRole,
}

impl DecisionReason {
    pub fn code(&self) -> &'static str {
        match self {
            DecisionReason::AdminOverride => "admin-override",
            DecisionReason::RoleGrant => "role-grant",
            DecisionReason::OwnerOverride => "owner-override",
            DecisionReason::InsufficientRole => "insufficient-role",
        }
    }
}

impl std::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// 授权决策
///
/// Deny 是正常返回值，不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    /// 归属检查的结果
    pub fn from_ownership(owns: bool) -> Self {
        if owns {
            Self::allow(DecisionReason::OwnerOverride)
        } else {
            Self::deny(DecisionReason::InsufficientRole)
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// 拒绝时转换为 `AppError::Forbidden`，便于服务层使用 `?`
    pub fn ensure_allowed(self) -> AppResult<Self> {
        if self.allowed {
            Ok(self)
        } else {
            Err(AppError::forbidden(self.reason.code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_allowed() {
        let allowed = Decision::allow(DecisionReason::RoleGrant);
        assert_eq!(allowed.ensure_allowed().unwrap(), allowed);

        let err = Decision::deny(DecisionReason::InsufficientRole)
            .ensure_allowed()
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref code) if code == "insufficient-role"));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_from_ownership() {
        assert_eq!(
            Decision::from_ownership(true),
            Decision::allow(DecisionReason::OwnerOverride)
        );
        assert_eq!(
            Decision::from_ownership(false),
            Decision::deny(DecisionReason::InsufficientRole)
        );
    }

    #[test]
    fn test_serialized_reason_code() {
        let json = serde_json::to_value(Decision::allow(DecisionReason::AdminOverride)).unwrap();
        assert_eq!(json["allowed"], true);
        assert_eq!(json["reason"], "admin-override");
    }
}
