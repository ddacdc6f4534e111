use crate::{AppConfig, JwtConfig, RoleGrantConfig};
use figment::{
    Figment,
    providers::{Format, Toml},
};
use secrecy::{ExposeSecret, Secret};

const MINIMAL: &str = r#"
app_name = "clinic-access"

[jwt]
secret = "test-secret"
"#;

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = JwtConfig {
        secret: Secret::new("hs256-signing-key".to_string()),
        issuer: "hms".to_string(),
        audience: "hms-api".to_string(),
        leeway_secs: 0,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("hs256-signing-key"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_defaults_applied() {
    let config = AppConfig::from_figment(Figment::from(Toml::string(MINIMAL))).unwrap();

    assert_eq!(config.app_env, "development");
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.jwt.issuer, "hms");
    assert_eq!(config.jwt.audience, "hms-api");
    assert_eq!(config.jwt.secret.expose_secret(), "test-secret");
    assert_eq!(config.telemetry.log_level, "info");
    assert!(config.access.inherit_defaults);
    assert!(config.access.policies.is_empty());
}

#[test]
fn test_policy_overrides_parsed() {
    let toml = format!(
        "{}\n{}",
        MINIMAL,
        r#"
[access]
inherit_defaults = false

[access.policies.specialization]
roles = { staff = { read = true }, doctor = { read = true, write = true } }

[access.policies.doctor]
owner_override = true
"#
    );

    let config = AppConfig::from_figment(Figment::from(Toml::string(&toml))).unwrap();
    assert!(!config.access.inherit_defaults);

    let specialization = &config.access.policies["specialization"];
    assert!(!specialization.owner_override);
    assert_eq!(
        specialization.roles["staff"],
        RoleGrantConfig { read: true, write: false }
    );
    assert_eq!(
        specialization.roles["doctor"],
        RoleGrantConfig { read: true, write: true }
    );

    let doctor = &config.access.policies["doctor"];
    assert!(doctor.owner_override);
    assert!(doctor.roles.is_empty());
}

#[test]
fn test_missing_jwt_section_fails() {
    let result = AppConfig::from_figment(Figment::from(Toml::string(r#"app_name = "x""#)));
    assert!(result.is_err());
}
