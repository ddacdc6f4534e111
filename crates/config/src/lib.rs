//! hms-config - 配置加载库
//!
//! 加载顺序: `default.toml` -> `<APP_ENV>.toml` -> `HMS_` 前缀环境变量 (嵌套键用 `__` 分隔)

use std::collections::BTreeMap;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// JWT 验证配置 (本系统只验证令牌，不签发)
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    /// 允许的时钟偏差 (秒)
    #[serde(default)]
    pub leeway_secs: u64,
}

fn default_issuer() -> String {
    "hms".to_string()
}

fn default_audience() -> String {
    "hms-api".to_string()
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 单个角色对某资源类型的授权
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RoleGrantConfig {
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub write: bool,
}

/// 某资源类型的策略覆盖
///
/// ```toml
/// [access.policies.specialization]
/// owner_override = false
/// roles = { staff = { read = true }, doctor = { read = true } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub owner_override: bool,
    /// 角色名 -> 授权，角色名在服务启动时校验
    #[serde(default)]
    pub roles: BTreeMap<String, RoleGrantConfig>,
}

/// 访问控制配置
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// 为 true 时 `policies` 只覆盖内置策略表中的对应条目；
    /// 为 false 时 `policies` 必须列出全部资源类型
    #[serde(default = "default_inherit_defaults")]
    pub inherit_defaults: bool,
    /// 资源类型名 -> 策略
    #[serde(default)]
    pub policies: BTreeMap<String, PolicyConfig>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            inherit_defaults: default_inherit_defaults(),
            policies: BTreeMap::new(),
        }
    }
}

fn default_inherit_defaults() -> bool {
    true
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("HMS_").split("__"));

        Self::from_figment(figment)
    }

    /// 从任意 Figment 提取配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;
