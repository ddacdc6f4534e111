//! Clinic Access - 策略表启动校验
//!
//! 加载配置、校验策略表并输出生效的授权表，任何配置错误以非零状态退出

use clinic_access::runtime::{build_registry, init_runtime};
use hms_config::AppConfig;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir =
        std::env::var("CLINIC_ACCESS_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;

    init_runtime(&config);

    let registry = build_registry(&config).inspect_err(|e| {
        error!(error = %e, "Policy registry rejected");
    })?;

    for (resource_type, spec) in registry.iter() {
        let grants: Vec<String> = spec
            .grants()
            .iter()
            .map(|(role, grant)| {
                let mode = match (grant.can_read, grant.can_write) {
                    (true, true) => "rw",
                    (true, false) => "r",
                    (false, true) => "w",
                    (false, false) => "-",
                };
                format!("{}:{}", role, mode)
            })
            .collect();

        info!(
            resource_type = %resource_type,
            owner_override = spec.owner_override(),
            grants = %grants.join(","),
            "Effective policy"
        );
    }

    info!("Configuration valid");

    Ok(())
}
