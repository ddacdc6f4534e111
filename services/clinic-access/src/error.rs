use hms_errors::AppError;
use thiserror::Error;

use crate::domain::ResourceType;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
    #[error("Policy table has no entry for resource type: {0}")]
    IncompletePolicy(ResourceType),
    #[error("Owner override is not supported for resource type: {0}")]
    OwnershipUnsupported(ResourceType),
    #[error(transparent)]
    Upstream(#[from] AppError),
}

impl AccessError {
    /// 配置类错误只应在启动期出现
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AccessError::UnknownResourceType(_)
                | AccessError::UnsupportedAction(_)
                | AccessError::UnknownRole(_)
                | AccessError::IncompletePolicy(_)
                | AccessError::OwnershipUnsupported(_)
        )
    }
}

impl From<AccessError> for AppError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::Unauthenticated(msg) => AppError::Unauthenticated(msg),
            AccessError::Upstream(e) => e,
            other => AppError::Configuration(other.to_string()),
        }
    }
}

pub type AccessResult<T> = Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_map_to_configuration() {
        let err: AppError = AccessError::UnsupportedAction("approve".to_string()).into();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(err.to_string().contains("approve"));
    }

    #[test]
    fn test_unauthenticated_maps_to_401() {
        let err: AppError = AccessError::Unauthenticated("missing credential".to_string()).into();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_upstream_passes_through() {
        let err: AppError = AccessError::from(AppError::database("connection reset")).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_is_configuration() {
        assert!(AccessError::IncompletePolicy(ResourceType::Billing).is_configuration());
        assert!(!AccessError::Unauthenticated(String::new()).is_configuration());
        assert!(!AccessError::from(AppError::internal("x")).is_configuration());
    }
}
