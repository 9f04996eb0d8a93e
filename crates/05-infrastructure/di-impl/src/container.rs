//! 服务集合
//!
//! 宿主容器的注册阶段。同一 `(service, key)` 的注册按提交顺序保留，
//! 构建后得到不可变的 [`ServiceProvider`]。

use crate::provider::ServiceProvider;
use di_abstractions::{
    Activator, Binding, BindingDescriptor, InstanceSlot, InterfaceDescriptor, Multiplicity,
    RegistrationKey, Resolver, ServiceInstance, ServiceRegistry,
};
use infrastructure_common::{
    ConfigurationError, ConfigurationResult, Lifetime, ProviderOptions, ResolutionResult, ServiceKey,
    TypeInfo,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 服务集合
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    bindings: Vec<Binding>,
    index: HashMap<RegistrationKey, Vec<usize>>,
}

impl ServiceCollection {
    /// 创建空的服务集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 按提交顺序获取全部绑定
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// 获取指定 `(service, key)` 的绑定，按提交顺序
    pub fn bindings_for(&self, service: TypeInfo, key: Option<&ServiceKey>) -> Vec<&Binding> {
        self.index
            .get(&RegistrationKey::new(service, key))
            .map(|positions| positions.iter().map(|&i| &self.bindings[i]).collect())
            .unwrap_or_default()
    }

    /// 获取指定服务类型的全部描述符
    pub fn descriptors_of<I: ?Sized + 'static>(&self) -> Vec<BindingDescriptor> {
        self.bindings_for(TypeInfo::of::<I>(), None)
            .into_iter()
            .map(Binding::descriptor)
            .collect()
    }

    /// 获取指定服务类型和键的全部描述符
    pub fn keyed_descriptors_of<I: ?Sized + 'static>(&self, key: &str) -> Vec<BindingDescriptor> {
        let Ok(key) = ServiceKey::new(key) else {
            return Vec::new();
        };
        self.bindings_for(TypeInfo::of::<I>(), Some(&key))
            .into_iter()
            .map(Binding::descriptor)
            .collect()
    }

    /// 手动注册已有实例（单例），已注册时跳过
    pub fn try_add_instance<I>(&mut self, instance: Arc<I>) -> ConfigurationResult<bool>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.try_add_factory::<I, _>(Lifetime::Singleton, move |_| Ok(instance.clone()))
    }

    /// 手动注册工厂，已注册时跳过
    pub fn try_add_factory<I, F>(&mut self, lifetime: Lifetime, factory: F) -> ConfigurationResult<bool>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> ResolutionResult<Arc<I>> + Send + Sync + 'static,
    {
        self.try_add(Self::manual_binding::<I, F>(lifetime, None, factory))
    }

    /// 手动注册键控工厂，已注册时跳过
    pub fn try_add_keyed_factory<I, F>(
        &mut self,
        lifetime: Lifetime,
        key: &str,
        factory: F,
    ) -> ConfigurationResult<bool>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> ResolutionResult<Arc<I>> + Send + Sync + 'static,
    {
        let key = ServiceKey::new(key)?;
        self.try_add(Self::manual_binding::<I, F>(lifetime, Some(key), factory))
    }

    /// 手动追加工厂
    pub fn add_factory<I, F>(&mut self, lifetime: Lifetime, factory: F) -> ConfigurationResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> ResolutionResult<Arc<I>> + Send + Sync + 'static,
    {
        let mut binding = Self::manual_binding::<I, F>(lifetime, None, factory);
        binding.multiplicity = Multiplicity::Enumerable;
        self.add(binding)
    }

    /// 构建服务容器
    pub fn build(self) -> ServiceProvider {
        self.build_with(ProviderOptions::default())
    }

    /// 使用容器选项构建服务容器
    pub fn build_with(self, options: ProviderOptions) -> ServiceProvider {
        ServiceProvider::new(self.bindings, options)
    }

    // 手动注册的实例以 `Arc<I>` 本身作为具体实例保存
    fn manual_binding<I, F>(lifetime: Lifetime, key: Option<ServiceKey>, factory: F) -> Binding
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> ResolutionResult<Arc<I>> + Send + Sync + 'static,
    {
        let implementation = TypeInfo::of::<I>();
        let activator: Activator = Arc::new(move |resolver: &dyn Resolver| {
            factory(resolver).map(|it| Arc::new(it) as ServiceInstance)
        });

        Binding {
            service: implementation,
            implementation,
            lifetime,
            key,
            multiplicity: Multiplicity::Exclusive,
            slot: InstanceSlot::allocate(implementation, lifetime),
            activator,
            view: InterfaceDescriptor::of::<I, Arc<I>>(|outer| (*outer).clone()),
        }
    }

    fn validate(binding: &Binding) -> ConfigurationResult<()> {
        let reject = |message: &str| {
            Err(ConfigurationError::registration_rejected(
                binding.service.name,
                binding.implementation.name,
                message,
            ))
        };

        if binding.view.service() != binding.service {
            return reject("服务视图与服务标识不一致");
        }
        if binding.slot.implementation != binding.implementation {
            return reject("实例槽与实现类型不一致");
        }
        if binding.slot.lifetime != binding.lifetime {
            return reject("实例槽与生命周期不一致");
        }
        Ok(())
    }
}

impl ServiceRegistry for ServiceCollection {
    fn contains(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool {
        self.index
            .get(&RegistrationKey::new(service, key))
            .is_some_and(|positions| !positions.is_empty())
    }

    fn add(&mut self, binding: Binding) -> ConfigurationResult<()> {
        Self::validate(&binding)?;
        debug!("注册服务: {}", binding.descriptor());

        self.index
            .entry(binding.registration_key())
            .or_default()
            .push(self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }

    fn descriptors(&self) -> Vec<BindingDescriptor> {
        self.bindings.iter().map(Binding::descriptor).collect()
    }

    fn len(&self) -> usize {
        self.bindings.len()
    }
}
