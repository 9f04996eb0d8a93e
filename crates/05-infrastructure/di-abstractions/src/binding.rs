//! 绑定定义
//!
//! 绑定是提交给宿主容器的最小单元。

use crate::factory::{Activator, InterfaceDescriptor};
use infrastructure_common::{Lifetime, ServiceKey, TypeInfo};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 绑定的多重性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// 独占：同一 `(service, key)` 先注册者胜出
    Exclusive,
    /// 可枚举：同一 `(service, key)` 的全部注册都会保留
    Enumerable,
}

/// 实例槽
///
/// 同一标记产生的全部绑定共享一个实例槽，因此具体类型视图和接口视图
/// 在同一作用域内观察到的是同一个实例。每次分配的槽标识都不同。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceSlot {
    id: u64,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl InstanceSlot {
    /// 分配新的实例槽
    pub fn allocate(implementation: TypeInfo, lifetime: Lifetime) -> Self {
        static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

        Self {
            id: NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed),
            implementation,
            lifetime,
        }
    }

    /// 槽标识
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// 服务绑定
#[derive(Clone)]
pub struct Binding {
    /// 服务标识（接口或实现类型本身）
    pub service: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 服务键
    pub key: Option<ServiceKey>,
    /// 多重性
    pub multiplicity: Multiplicity,
    /// 实例槽
    pub slot: InstanceSlot,
    /// 激活器
    pub activator: Activator,
    /// 服务视图
    pub view: InterfaceDescriptor,
}

impl Binding {
    /// 是否为键控绑定
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }

    /// 注册键
    pub fn registration_key(&self) -> RegistrationKey {
        RegistrationKey {
            service: self.service,
            key: self.key.clone(),
        }
    }

    /// 生成描述符
    pub fn descriptor(&self) -> BindingDescriptor {
        BindingDescriptor {
            service: self.service,
            implementation: self.implementation,
            lifetime: self.lifetime,
            key: self.key.clone(),
            multiplicity: self.multiplicity,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("service", &self.service.name)
            .field("implementation", &self.implementation.name)
            .field("lifetime", &self.lifetime)
            .field("key", &self.key)
            .field("multiplicity", &self.multiplicity)
            .field("activator", &"<function>")
            .finish()
    }
}

/// 注册键：`(service, key)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    pub service: TypeInfo,
    pub key: Option<ServiceKey>,
}

impl RegistrationKey {
    /// 创建注册键
    pub fn new(service: TypeInfo, key: Option<&ServiceKey>) -> Self {
        Self {
            service,
            key: key.cloned(),
        }
    }
}

impl fmt::Display for RegistrationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}[{}]", self.service.short_name(), key),
            None => f.write_str(self.service.short_name()),
        }
    }
}

/// 绑定描述符，用于诊断和测试
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub service: TypeInfo,
    pub implementation: TypeInfo,
    pub lifetime: Lifetime,
    pub key: Option<ServiceKey>,
    pub multiplicity: Multiplicity,
}

impl fmt::Display for BindingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}, {:?})",
            RegistrationKey {
                service: self.service,
                key: self.key.clone(),
            },
            self.implementation.short_name(),
            self.lifetime,
            self.multiplicity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait ICache {}
    struct BigCache;

    #[test]
    fn test_slots_are_unique() {
        let a = InstanceSlot::allocate(TypeInfo::of::<BigCache>(), Lifetime::Singleton);
        let b = InstanceSlot::allocate(TypeInfo::of::<BigCache>(), Lifetime::Singleton);
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_registration_key_display() {
        let key = RegistrationKey::new(TypeInfo::of::<dyn ICache>(), None);
        assert_eq!(key.to_string(), "ICache");

        let big = ServiceKey::from_static("big");
        let key = RegistrationKey::new(TypeInfo::of::<dyn ICache>(), Some(&big));
        assert_eq!(key.to_string(), "ICache[big]");
    }
}
