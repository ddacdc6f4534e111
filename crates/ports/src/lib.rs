//! ports - 抽象 trait 层
//!
//! 授权引擎依赖的外部协作方接口：认证服务与持久化存储

mod authenticator;
mod record_store;

pub use authenticator::*;
pub use record_store::*;
