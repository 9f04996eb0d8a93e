//! 服务注册表抽象接口
//!
//! 宿主容器对外暴露的注册原语。

use crate::binding::{Binding, BindingDescriptor};
use infrastructure_common::{ConfigurationResult, ServiceKey, TypeInfo};

/// 服务注册表 trait
pub trait ServiceRegistry {
    /// 检查 `(service, key)` 是否已有任何注册
    fn contains(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool;

    /// 追加注册，同一 `(service, key)` 的注册按提交顺序保留
    fn add(&mut self, binding: Binding) -> ConfigurationResult<()>;

    /// 仅当 `(service, key)` 尚无注册时注册，返回是否实际注册
    fn try_add(&mut self, binding: Binding) -> ConfigurationResult<bool> {
        if self.contains(binding.service, binding.key.as_ref()) {
            return Ok(false);
        }
        self.add(binding)?;
        Ok(true)
    }

    /// 获取全部注册的描述符，按提交顺序
    fn descriptors(&self) -> Vec<BindingDescriptor>;

    /// 注册数量
    fn len(&self) -> usize {
        self.descriptors().len()
    }

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
