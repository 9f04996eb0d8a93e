//! 服务发现清单
//!
//! 两种清单来源：
//!
//! - [`ServiceModule`]：在启动调用点显式构建的模块清单，保持声明顺序
//! - 全局服务目录：`#[service]` 宏在程序启动时按 `module_path!()` 自动登记

use crate::factory::{Discoverable, ServiceEntry};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// 服务条目工厂
pub type EntryFactory = fn() -> ServiceEntry;

/// 显式模块清单
#[derive(Debug, Clone)]
pub struct ServiceModule {
    name: String,
    entries: Vec<ServiceEntry>,
}

impl ServiceModule {
    /// 创建新的模块清单
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// 登记可发现的服务类型
    pub fn register<T: Discoverable>(mut self) -> Self {
        self.entries.push(T::service_entry());
        self
    }

    /// 登记服务条目
    pub fn add_entry(mut self, entry: ServiceEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 条目，保持声明顺序
    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }
}

/// 服务目录条目
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// 定义类型的模块路径
    pub module_path: &'static str,
    /// 完整类型名称
    pub type_name: &'static str,
    /// 条目工厂
    pub factory: EntryFactory,
}

impl CatalogEntry {
    /// 是否属于指定模块（模块自身或其子模块）
    pub fn belongs_to(&self, module: &str) -> bool {
        self.module_path == module
            || self
                .module_path
                .strip_prefix(module)
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

/// 全局服务目录
static SERVICE_CATALOG: Lazy<RwLock<Vec<CatalogEntry>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 登记服务目录条目
///
/// 由 `#[service]` 宏生成的启动函数调用。
pub fn register_catalog_entry(module_path: &'static str, type_name: &'static str, factory: EntryFactory) {
    SERVICE_CATALOG.write().push(CatalogEntry {
        module_path,
        type_name,
        factory,
    });
}

/// 获取指定模块下的目录条目
///
/// 登记顺序取决于链接顺序，这里按完整类型名称排序，保证多次运行结果一致。
pub fn catalog_entries(module: &str) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = SERVICE_CATALOG
        .read()
        .iter()
        .filter(|entry| entry.belongs_to(module))
        .copied()
        .collect();
    entries.sort_by(|a, b| {
        a.type_name
            .cmp(b.type_name)
            .then_with(|| a.module_path.cmp(b.module_path))
    });
    entries
}

/// 检查模块路径格式：以 `::` 分隔的标识符
pub fn is_valid_module_path(path: &str) -> bool {
    !path.is_empty()
        && path.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c == '_' || c.is_alphabetic())
                && chars.all(|c| c == '_' || c.is_alphanumeric())
        })
}
