//! 持久化协作方接口

use async_trait::async_trait;
use hms_common::{IdentityId, ProfileId, RecordId};
use hms_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// 账号可关联的档案类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProfileType {
    Doctor,
    Staff,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Doctor => "doctor",
            ProfileType::Staff => "staff",
        }
    }
}

impl std::str::FromStr for ProfileType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(ProfileType::Doctor),
            "staff" => Ok(ProfileType::Staff),
            other => Err(AppError::validation(format!("Unknown profile type: {}", other))),
        }
    }
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 主体携带的关联档案，档案 ID 只在同类型内有意义
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedProfile {
    pub profile_type: ProfileType,
    pub id: ProfileId,
}

impl LinkedProfile {
    pub fn new(profile_type: ProfileType, id: impl Into<ProfileId>) -> Self {
        Self {
            profile_type,
            id: id.into(),
        }
    }
}

/// 账号关联的档案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub id: ProfileId,
    pub profile_type: ProfileType,
    pub identity_id: IdentityId,
}

/// 存储中的记录，只暴露授权需要的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub resource_type: String,
    pub id: RecordId,
    /// 记录归属的档案 (如问诊记录的医生)
    pub owner_profile_id: Option<ProfileId>,
}

/// 持久化协作方
///
/// 未找到返回 `Ok(None)`，存储故障返回 `Err`
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 根据资源类型和 ID 获取记录
    async fn fetch(&self, resource_type: &str, id: &RecordId) -> AppResult<Option<StoredRecord>>;

    /// 获取账号关联的指定类型档案
    async fn fetch_owner_profile(
        &self,
        identity_id: &IdentityId,
        profile_type: ProfileType,
    ) -> AppResult<Option<OwnerProfile>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_type_parsing() {
        assert_eq!("Doctor".parse::<ProfileType>().unwrap(), ProfileType::Doctor);
        assert_eq!(" staff ".parse::<ProfileType>().unwrap(), ProfileType::Staff);
        assert!("patient".parse::<ProfileType>().is_err());
    }
}
