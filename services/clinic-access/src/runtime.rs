//! 服务启动
//!
//! 所有配置错误都在这里暴露，请求期不会再遇到

use std::sync::Arc;

use hms_auth_core::JwtAuthenticator;
use hms_config::AppConfig;
use hms_telemetry::{init_tracing, init_tracing_json};
use secrecy::ExposeSecret;
use tracing::info;

use crate::domain::PolicyRegistry;
use crate::error::AccessResult;

/// 初始化服务运行时
pub fn init_runtime(config: &AppConfig) {
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );
}

/// 加载并校验策略表
pub fn build_registry(config: &AppConfig) -> AccessResult<Arc<PolicyRegistry>> {
    let registry = PolicyRegistry::from_config(&config.access)?;
    info!(
        resource_types = registry.iter().count(),
        overrides = config.access.policies.len(),
        inherit_defaults = config.access.inherit_defaults,
        "Policy registry loaded"
    );
    Ok(Arc::new(registry))
}

/// 构建 JWT 认证器
pub fn build_authenticator(config: &AppConfig) -> JwtAuthenticator {
    JwtAuthenticator::new(
        config.jwt.secret.expose_secret(),
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
    )
    .with_leeway(config.jwt.leeway_secs)
}
