//! 操作与读写分类

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// 资源服务层的 CRUD 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::List,
        Action::Retrieve,
        Action::Create,
        Action::Update,
        Action::PartialUpdate,
        Action::Destroy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Retrieve => "retrieve",
            Action::Create => "create",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AccessError::UnsupportedAction(s.to_string()))
    }
}

/// 读写分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessClass {
    Read,
    Write,
}

impl std::fmt::Display for AccessClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessClass::Read => write!(f, "read"),
            AccessClass::Write => write!(f, "write"),
        }
    }
}

/// 操作分类器
///
/// 分类只取决于操作本身，与实例内容无关
pub struct ActionClassifier;

impl ActionClassifier {
    pub fn classify(action: Action) -> AccessClass {
        match action {
            Action::List | Action::Retrieve => AccessClass::Read,
            Action::Create | Action::Update | Action::PartialUpdate | Action::Destroy => {
                AccessClass::Write
            }
        }
    }
}
