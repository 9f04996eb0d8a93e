//! 绑定规划器
//!
//! 把候选类型的每个服务标记展开为一组有序的绑定。
//!
//! 非键控标记：
//!
//! 1. 实现类型自身，独占
//! 2. 每个接口各一个可枚举绑定
//!
//! 键控标记：
//!
//! 1. 实现类型自身，键控独占
//! 2. 每个接口先一个键控独占绑定，再一个非键控可枚举绑定

use di_abstractions::{Binding, CandidateType, InstanceSlot, InterfaceDescriptor, Multiplicity};
use infrastructure_common::{ConfigurationResult, Lifetime, RegistrationOptions, ServiceKey, ServiceTag};
use tracing::debug;

/// 绑定规划器
#[derive(Debug, Clone, Default)]
pub struct BindingPlanner {
    options: RegistrationOptions,
}

impl BindingPlanner {
    /// 使用注册选项创建规划器
    pub fn new(options: RegistrationOptions) -> Self {
        Self { options }
    }

    /// 注册选项
    pub fn options(&self) -> &RegistrationOptions {
        &self.options
    }

    /// 检查类型是否被排除
    pub fn is_excluded(&self, candidate: &CandidateType) -> bool {
        self.options
            .excluded_types
            .iter()
            .any(|name| candidate.implementation.matches_name(name))
    }

    /// 计算生效的生命周期
    ///
    /// 完整类型名称的覆盖优先于简短名称。配置源可能把键转为小写，
    /// 因此名称匹配不区分大小写。
    pub fn effective_lifetime(
        &self,
        candidate: &CandidateType,
        tag: &ServiceTag,
    ) -> ConfigurationResult<Lifetime> {
        let implementation = candidate.implementation;
        let lookup = |name: &str| {
            self.options
                .lifetime_overrides
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        };
        let overridden = lookup(implementation.name).or_else(|| lookup(implementation.short_name()));

        match overridden {
            Some(value) => value.parse(),
            None => Ok(tag.lifetime),
        }
    }

    /// 规划单个标记
    pub fn plan(&self, candidate: &CandidateType, tag: &ServiceTag) -> ConfigurationResult<Vec<Binding>> {
        let lifetime = self.effective_lifetime(candidate, tag)?;
        let slot = InstanceSlot::allocate(candidate.implementation, lifetime);
        let make = |view: &InterfaceDescriptor, key: Option<&ServiceKey>, multiplicity: Multiplicity| Binding {
            service: view.service(),
            implementation: candidate.implementation,
            lifetime,
            key: key.cloned(),
            multiplicity,
            slot: slot.clone(),
            activator: candidate.activator.clone(),
            view: view.clone(),
        };

        let mut bindings = Vec::with_capacity(1 + candidate.interfaces.len() * 2);
        match &tag.key {
            None => {
                bindings.push(make(&candidate.self_view, None, Multiplicity::Exclusive));
                for interface in &candidate.interfaces {
                    bindings.push(make(interface, None, Multiplicity::Enumerable));
                }
            }
            Some(key) => {
                bindings.push(make(&candidate.self_view, Some(key), Multiplicity::Exclusive));
                for interface in &candidate.interfaces {
                    bindings.push(make(interface, Some(key), Multiplicity::Exclusive));
                    bindings.push(make(interface, None, Multiplicity::Enumerable));
                }
            }
        }

        for binding in &bindings {
            debug!("规划绑定: {}", binding.descriptor());
        }
        Ok(bindings)
    }

    /// 规划全部候选类型，保持扫描顺序和标记顺序
    pub fn plan_all(&self, candidates: &[CandidateType]) -> ConfigurationResult<Vec<Binding>> {
        let mut bindings = Vec::new();
        for candidate in candidates {
            if self.is_excluded(candidate) {
                debug!("类型已排除: {}", candidate.implementation.name);
                continue;
            }
            for tag in &candidate.tags {
                bindings.extend(self.plan(candidate, tag)?);
            }
        }
        Ok(bindings)
    }
}
