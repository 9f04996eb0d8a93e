//! # Infrastructure Common
//!
//! 这个 crate 提供了服务定位器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`Lifetime`] - 服务生命周期
//! - [`ServiceTag`] - 附加在实现类型上的服务标记
//! - [`ServiceKey`] - 键控服务的非空标识
//! - [`TypeInfo`] - 类型标识（支持 `dyn Trait`）
//! - [`ConfigurationError`] / [`ResolutionError`] - 错误类型
//! - [`ServiceLocatorOptions`] - 配置选项

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
