//! 服务容器与作用域
//!
//! 单例实例缓存在根容器中，作用域实例缓存在各自的 [`ServiceScope`] 中，
//! 瞬态实例每次解析都重新创建。同一实例槽的所有视图共享缓存实例。

use dashmap::DashMap;
use di_abstractions::{Binding, RegistrationKey, ResolutionChain, Resolver, ServiceInstance, ServiceView};
use infrastructure_common::{
    Lifetime, ProviderOptions, ResolutionError, ResolutionResult, Scope, ServiceKey, TypeInfo,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type InstanceCache = DashMap<u64, Arc<OnceCell<ServiceInstance>>>;

struct ProviderInner {
    registrations: HashMap<RegistrationKey, Vec<Binding>>,
    singletons: InstanceCache,
    /// 未开启作用域校验时，从根容器解析的作用域服务缓存在这里
    root_scoped: InstanceCache,
    options: ProviderOptions,
    root: Scope,
}

/// 服务容器（根）
#[derive(Clone)]
pub struct ServiceProvider {
    inner: Arc<ProviderInner>,
}

impl ServiceProvider {
    pub(crate) fn new(bindings: Vec<Binding>, options: ProviderOptions) -> Self {
        let mut registrations: HashMap<RegistrationKey, Vec<Binding>> = HashMap::new();
        for binding in bindings {
            registrations
                .entry(binding.registration_key())
                .or_default()
                .push(binding);
        }

        debug!("构建服务容器，共 {} 个注册键", registrations.len());
        Self {
            inner: Arc::new(ProviderInner {
                registrations,
                singletons: DashMap::new(),
                root_scoped: DashMap::new(),
                options,
                root: Scope::root(),
            }),
        }
    }

    /// 创建新的作用域
    pub fn create_scope(&self) -> ServiceScope {
        self.create_named_scope("scope")
    }

    /// 创建命名作用域
    pub fn create_named_scope(&self, name: impl Into<String>) -> ServiceScope {
        let scope = self.inner.root.child(name);
        debug!("创建作用域: {} ({})", scope.name, scope.id);

        ServiceScope {
            inner: self.inner.clone(),
            scope,
            instances: Arc::new(DashMap::new()),
        }
    }

    /// 容器选项
    pub fn options(&self) -> &ProviderOptions {
        &self.inner.options
    }

    /// 根作用域
    pub fn scope(&self) -> &Scope {
        &self.inner.root
    }

    fn context(&self) -> ResolutionContext<'_> {
        ResolutionContext::root(&self.inner, ResolutionChain::new())
    }
}

impl Resolver for ServiceProvider {
    fn resolve_view(&self, service: TypeInfo, key: Option<&ServiceKey>) -> ResolutionResult<ServiceView> {
        self.context().resolve_view(service, key)
    }

    fn resolve_all_views(
        &self,
        service: TypeInfo,
        key: Option<&ServiceKey>,
    ) -> ResolutionResult<Vec<ServiceView>> {
        self.context().resolve_all_views(service, key)
    }

    fn can_resolve(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool {
        self.inner.lookup(service, key).is_some()
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("registrations", &self.inner.registrations.len())
            .field("singletons", &self.inner.singletons.len())
            .field("options", &self.inner.options)
            .finish()
    }
}

/// 服务作用域
///
/// 作用域服务在同一作用域内共享实例，不同作用域之间相互隔离。
#[derive(Clone)]
pub struct ServiceScope {
    inner: Arc<ProviderInner>,
    scope: Scope,
    instances: Arc<InstanceCache>,
}

impl ServiceScope {
    /// 作用域信息
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// 当前作用域已创建的作用域实例数量
    pub fn instance_count(&self) -> usize {
        self.instances
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    fn context(&self) -> ResolutionContext<'_> {
        ResolutionContext {
            inner: &self.inner,
            scoped: &self.instances,
            is_root: false,
            chain: ResolutionChain::new(),
        }
    }
}

impl Resolver for ServiceScope {
    fn resolve_view(&self, service: TypeInfo, key: Option<&ServiceKey>) -> ResolutionResult<ServiceView> {
        self.context().resolve_view(service, key)
    }

    fn resolve_all_views(
        &self,
        service: TypeInfo,
        key: Option<&ServiceKey>,
    ) -> ResolutionResult<Vec<ServiceView>> {
        self.context().resolve_all_views(service, key)
    }

    fn can_resolve(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool {
        self.inner.lookup(service, key).is_some()
    }
}

impl fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceScope")
            .field("scope", &self.scope)
            .field("instances", &self.instances.len())
            .finish()
    }
}

impl ProviderInner {
    fn lookup(&self, service: TypeInfo, key: Option<&ServiceKey>) -> Option<&[Binding]> {
        self.registrations
            .get(&RegistrationKey::new(service, key))
            .map(Vec::as_slice)
            .filter(|bindings| !bindings.is_empty())
    }
}

/// 一次解析调用的上下文，工厂通过它解析依赖
struct ResolutionContext<'a> {
    inner: &'a ProviderInner,
    scoped: &'a InstanceCache,
    is_root: bool,
    chain: ResolutionChain,
}

impl<'a> ResolutionContext<'a> {
    fn root(inner: &'a ProviderInner, chain: ResolutionChain) -> Self {
        Self {
            inner,
            scoped: &inner.root_scoped,
            is_root: true,
            chain,
        }
    }

    fn activate(&self, binding: &Binding) -> ResolutionResult<ServiceInstance> {
        // 先检查循环依赖，再进入实例缓存，避免同一实例槽的重入初始化
        let chain = self.chain.push(binding.implementation)?;

        match binding.lifetime {
            Lifetime::Transient => {
                let context = ResolutionContext { chain, ..*self };
                Self::create(binding, &context)
            }
            Lifetime::Singleton => {
                let context = ResolutionContext::root(self.inner, chain);
                Self::cached(&self.inner.singletons, binding, &context)
            }
            Lifetime::Scoped => {
                if self.is_root && self.inner.options.validate_scopes {
                    return Err(ResolutionError::ScopeRequired {
                        type_name: binding.service.name.to_string(),
                    });
                }
                let context = ResolutionContext { chain, ..*self };
                Self::cached(self.scoped, binding, &context)
            }
        }
    }

    fn cached(
        cache: &InstanceCache,
        binding: &Binding,
        context: &ResolutionContext<'_>,
    ) -> ResolutionResult<ServiceInstance> {
        let cell = cache.entry(binding.slot.id()).or_default().value().clone();
        cell.get_or_try_init(|| Self::create(binding, context)).cloned()
    }

    fn create(binding: &Binding, context: &ResolutionContext<'_>) -> ResolutionResult<ServiceInstance> {
        trace!(
            "创建实例: {} ({}, 深度 {})",
            binding.implementation.name,
            binding.lifetime,
            context.chain.depth()
        );
        (binding.activator)(context)
    }

    fn not_registered(service: TypeInfo, key: Option<&ServiceKey>) -> ResolutionError {
        match key {
            Some(key) => ResolutionError::KeyedNotRegistered {
                type_name: service.name.to_string(),
                key: key.to_string(),
            },
            None => ResolutionError::not_registered(service.name),
        }
    }
}

impl Resolver for ResolutionContext<'_> {
    fn resolve_view(&self, service: TypeInfo, key: Option<&ServiceKey>) -> ResolutionResult<ServiceView> {
        let binding = self
            .inner
            .lookup(service, key)
            .and_then(<[Binding]>::first)
            .ok_or_else(|| Self::not_registered(service, key))?;

        let instance = self.activate(binding)?;
        binding.view.project(instance)
    }

    fn resolve_all_views(
        &self,
        service: TypeInfo,
        key: Option<&ServiceKey>,
    ) -> ResolutionResult<Vec<ServiceView>> {
        self.inner
            .lookup(service, key)
            .unwrap_or_default()
            .iter()
            .map(|binding| binding.view.project(self.activate(binding)?))
            .collect()
    }

    fn can_resolve(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool {
        self.inner.lookup(service, key).is_some()
    }
}
