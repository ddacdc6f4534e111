//! 决策指标 (独立测试进程，全局 recorder 只安装一次)

use std::sync::Arc;

use async_trait::async_trait;
use clinic_access::{
    Action, AuthorizationService, PolicyRegistry, Principal, ResourceDescriptor, ResourceType,
    RoleName,
};
use hms_common::{IdentityId, RecordId};
use hms_errors::AppResult;
use hms_ports::{OwnerProfile, ProfileType, RecordStore, StoredRecord};

struct EmptyStore;

#[async_trait]
impl RecordStore for EmptyStore {
    async fn fetch(&self, _resource_type: &str, _id: &RecordId) -> AppResult<Option<StoredRecord>> {
        Ok(None)
    }

    async fn fetch_owner_profile(
        &self,
        _identity_id: &IdentityId,
        _profile_type: ProfileType,
    ) -> AppResult<Option<OwnerProfile>> {
        Ok(None)
    }
}

#[tokio::test]
async fn test_decisions_recorded() {
    let handle = hms_telemetry::init_metrics().unwrap();
    assert!(hms_telemetry::init_metrics().is_err());

    let service =
        AuthorizationService::new(Arc::new(PolicyRegistry::builtin()), Arc::new(EmptyStore));
    let staff = Principal::new("12").with_roles([RoleName::Staff]);
    let resource = ResourceDescriptor::collection(ResourceType::Specialization);

    service.authorize(&staff, Action::List, &resource).await.unwrap();
    service.authorize(&staff, Action::Create, &resource).await.unwrap();

    let rendered = handle.render();
    assert!(rendered.contains("clinic_access_decisions_total"));
    assert!(rendered.contains("reason=\"role-grant\""));
    assert!(rendered.contains("reason=\"insufficient-role\""));
}
