//! 元数据定义
//!
//! 提供服务标记（生命周期 + 可选键）和类型标识信息

use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::lifecycle::Lifetime;
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性只由 `TypeId` 决定，名称仅用于日志与错误信息。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 `dyn Trait`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径和泛型参数）
    pub fn short_name(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        let name = name.split('<').next().unwrap_or(name);
        name.rsplit("::").next().unwrap_or(name)
    }

    /// 名称是否匹配（完整名称或简短名称，不区分大小写）
    pub fn matches_name(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.name) || name.eq_ignore_ascii_case(self.short_name())
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 服务键
///
/// 不透明的非空标识，空字符串永远不是合法的键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey(Cow<'static, str>);

impl ServiceKey {
    /// 创建服务键，空键返回错误
    pub fn new(key: impl Into<String>) -> ConfigurationResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::EmptyServiceKey);
        }
        Ok(Self(Cow::Owned(key)))
    }

    /// 从静态字符串创建服务键
    ///
    /// 在常量上下文中使用时，空键会在编译期报错。
    pub const fn from_static(key: &'static str) -> Self {
        assert!(!key.is_empty(), "服务键不能为空");
        Self(Cow::Borrowed(key))
    }

    /// 获取键的字符串表示
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ServiceKey {
    type Error = ConfigurationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ServiceKey {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 服务标记
///
/// 附加在候选类型上的声明式元数据。一个类型可以携带多个标记，
/// 每个标记独立产生一组绑定。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceTag {
    /// 生命周期
    pub lifetime: Lifetime,
    /// 可选的服务键，`None` 表示非键控
    pub key: Option<ServiceKey>,
}

impl ServiceTag {
    /// 创建非键控服务标记
    pub fn new(lifetime: Lifetime) -> Self {
        Self {
            lifetime,
            key: None,
        }
    }

    /// 创建键控服务标记
    pub fn keyed(lifetime: Lifetime, key: impl Into<String>) -> ConfigurationResult<Self> {
        Ok(Self {
            lifetime,
            key: Some(ServiceKey::new(key)?),
        })
    }

    /// 设置服务键
    pub fn with_key(mut self, key: ServiceKey) -> Self {
        self.key = Some(key);
        self
    }

    /// 是否为键控标记
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }
}
