//! # Dependency Injection Abstractions
//!
//! 服务定位器的抽象层，定义扫描、绑定、注册和解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeScanner`] - 类型扫描器接口
//! - [`Binding`] - 提交给容器的绑定
//! - [`ServiceRegistry`] - 宿主容器的注册原语
//! - [`Resolver`] / [`ResolverExt`] - 服务解析接口
//! - [`ServiceModule`] / [`Discoverable`] - 服务清单

pub mod binding;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use binding::*;
pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
