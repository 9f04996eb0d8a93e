//! # 服务定位器实现
//!
//! 扫描模块中带服务标记的类型，按标记规划绑定，并注册到宿主容器。
//!
//! ## 组成
//!
//! - [`ModuleScanner`] - 模块扫描
//! - [`BindingPlanner`] - 绑定规划
//! - [`RegistrationApplier`] - 注册应用
//! - [`ServiceLocator`] - 串联以上三个阶段
//! - [`ServiceCollection`] / [`ServiceProvider`] / [`ServiceScope`] - 宿主容器

pub mod applier;
pub mod container;
pub mod locator;
pub mod planner;
pub mod provider;
pub mod scanner;

pub use applier::{ApplyReport, RegistrationApplier};
pub use container::ServiceCollection;
pub use locator::ServiceLocator;
pub use planner::BindingPlanner;
pub use provider::{ServiceProvider, ServiceScope};
pub use scanner::ModuleScanner;
