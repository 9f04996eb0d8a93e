//! # Service Macros
//!
//! 这个 crate 提供了用于声明服务标记的过程宏。
//!
//! ## 核心宏
//!
//! - [`service`] - 服务标记宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use service_macros::service;
//!
//! pub trait ICache: Send + Sync {
//!     fn get(&self, key: &str) -> String;
//! }
//!
//! #[derive(Default)]
//! #[service(singleton, key = "big", implements(dyn ICache))]
//! pub struct BigCache;
//! ```
//!
//! 使用方需要依赖 `infrastructure-common`、`di-abstractions` 和 `ctor`。

use proc_macro::TokenStream;
use syn::parse_macro_input;

mod service;

/// 服务标记宏
///
/// 为结构体生成 `Discoverable` 实现，并在程序启动时把它登记到
/// `module_path!()` 对应的服务目录中。
///
/// # 参数
///
/// - `singleton` / `scoped` / `transient` - 生命周期（必填）
/// - `key = "name"` - 服务键，不能为空
/// - `implements(dyn A, dyn B)` - 实现的接口，按声明顺序注册
/// - `factory = path::to::fn` - 工厂函数 `fn(&dyn Resolver) -> ResolutionResult<Self>`，
///   未指定时使用 `Default`
///
/// 同一类型可以重复标记，每个标记独立注册，接口取并集。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default)]
/// #[service(scoped, implements(dyn ISameService))]
/// pub struct SameServiceOne;
/// ```
#[proc_macro_attribute]
pub fn service(args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as syn::ItemStruct);
    match service::expand(args.into(), item) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
