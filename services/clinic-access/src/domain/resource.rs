//! 资源类型与资源描述

use hms_common::{ProfileId, RecordId};
use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// 受保护的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    User,
    Staff,
    Specialization,
    Doctor,
    Patient,
    Appointment,
    Consultation,
    MedicineCategory,
    Medicine,
    MedicineStock,
    MedicinePrescription,
    LabTest,
    LabTestPrescription,
    LabTestReport,
    Billing,
}

impl ResourceType {
    pub const ALL: [ResourceType; 15] = [
        ResourceType::User,
        ResourceType::Staff,
        ResourceType::Specialization,
        ResourceType::Doctor,
        ResourceType::Patient,
        ResourceType::Appointment,
        ResourceType::Consultation,
        ResourceType::MedicineCategory,
        ResourceType::Medicine,
        ResourceType::MedicineStock,
        ResourceType::MedicinePrescription,
        ResourceType::LabTest,
        ResourceType::LabTestPrescription,
        ResourceType::LabTestReport,
        ResourceType::Billing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::User => "user",
            ResourceType::Staff => "staff",
            ResourceType::Specialization => "specialization",
            ResourceType::Doctor => "doctor",
            ResourceType::Patient => "patient",
            ResourceType::Appointment => "appointment",
            ResourceType::Consultation => "consultation",
            ResourceType::MedicineCategory => "medicine_category",
            ResourceType::Medicine => "medicine",
            ResourceType::MedicineStock => "medicine_stock",
            ResourceType::MedicinePrescription => "medicine_prescription",
            ResourceType::LabTest => "lab_test",
            ResourceType::LabTestPrescription => "lab_test_prescription",
            ResourceType::LabTestReport => "lab_test_report",
            ResourceType::Billing => "billing",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AccessError::UnknownResourceType(s.to_string()))
    }
}

/// 资源描述
///
/// 集合级请求 (list/create) 不带 `instance_id`；
/// 实例级请求带 `instance_id`，需要归属判断时由服务层补充 `owner_ref`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub resource_type: ResourceType,
    pub instance_id: Option<RecordId>,
    /// 记录归属的档案 ID
    pub owner_ref: Option<ProfileId>,
}

impl ResourceDescriptor {
    /// 集合级描述
    pub fn collection(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            instance_id: None,
            owner_ref: None,
        }
    }

    /// 实例级描述
    pub fn instance(resource_type: ResourceType, instance_id: impl Into<RecordId>) -> Self {
        Self {
            resource_type,
            instance_id: Some(instance_id.into()),
            owner_ref: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<ProfileId>) -> Self {
        self.owner_ref = Some(owner.into());
        self
    }
}
