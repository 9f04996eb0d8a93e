//! 演示服务
//!
//! 这里的类型都通过 `#[service]` 标记，由服务定位器按模块路径自动注册。

pub mod keyed;
pub mod multiple;
pub mod scoped;
pub mod singleton;
pub mod transient;
