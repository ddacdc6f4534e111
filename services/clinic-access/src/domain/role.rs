//! 角色

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// 角色名 (非层级)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    Administrator,
    Doctor,
    Staff,
    Receptionist,
    LabTechnician,
    Pharmacist,
}

impl RoleName {
    pub const ALL: [RoleName; 6] = [
        RoleName::Administrator,
        RoleName::Doctor,
        RoleName::Staff,
        RoleName::Receptionist,
        RoleName::LabTechnician,
        RoleName::Pharmacist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Administrator => "administrator",
            RoleName::Doctor => "doctor",
            RoleName::Staff => "staff",
            RoleName::Receptionist => "receptionist",
            RoleName::LabTechnician => "lab_technician",
            RoleName::Pharmacist => "pharmacist",
        }
    }

    /// 解析角色声明
    ///
    /// 忽略大小写以及 `_` `-` 空格，接受历史别名:
    /// `Admin`/`ADMIN`, `Reception`/`RECEPTIONIST`, `LABTECH`/`LabTechnician`
    pub fn from_claim(claim: &str) -> Option<Self> {
        let normalized: String = claim
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "administrator" | "admin" => Some(RoleName::Administrator),
            "doctor" => Some(RoleName::Doctor),
            "staff" => Some(RoleName::Staff),
            "receptionist" | "reception" => Some(RoleName::Receptionist),
            "labtechnician" | "labtech" => Some(RoleName::LabTechnician),
            "pharmacist" => Some(RoleName::Pharmacist),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleName {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_claim(s).ok_or_else(|| AccessError::UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_and_casing() {
        for claim in ["Admin", "ADMIN", "admin", "Administrator"] {
            assert_eq!(RoleName::from_claim(claim), Some(RoleName::Administrator));
        }
        for claim in ["Reception", "RECEPTIONIST", "receptionist"] {
            assert_eq!(RoleName::from_claim(claim), Some(RoleName::Receptionist));
        }
        for claim in ["LABTECH", "LabTechnician", "lab_technician", "Lab Technician", "lab-tech"] {
            assert_eq!(RoleName::from_claim(claim), Some(RoleName::LabTechnician));
        }
        assert_eq!(RoleName::from_claim("DOCTOR"), Some(RoleName::Doctor));
        assert_eq!(RoleName::from_claim("Pharmacist"), Some(RoleName::Pharmacist));
    }

    #[test]
    fn test_unknown_claim() {
        assert_eq!(RoleName::from_claim("nurse"), None);
        assert_eq!(RoleName::from_claim(""), None);
        assert!(matches!(
            "janitor".parse::<RoleName>(),
            Err(AccessError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for role in RoleName::ALL {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
    }
}
