//! 服务解析器抽象接口
//!
//! [`Resolver`] 是对象安全的类型擦除接口，[`ResolverExt`] 在其上提供类型化的
//! `resolve` / `resolve_keyed` / `resolve_all`。

use crate::factory::ServiceView;
use infrastructure_common::{ResolutionError, ResolutionResult, ServiceKey, TypeInfo};
use std::sync::Arc;

/// 服务解析器 trait
pub trait Resolver: Send + Sync {
    /// 解析单个服务视图
    ///
    /// 同一 `(service, key)` 有多个注册时，返回第一个注册。
    fn resolve_view(&self, service: TypeInfo, key: Option<&ServiceKey>) -> ResolutionResult<ServiceView>;

    /// 按注册顺序解析全部服务视图，没有注册时返回空列表
    fn resolve_all_views(
        &self,
        service: TypeInfo,
        key: Option<&ServiceKey>,
    ) -> ResolutionResult<Vec<ServiceView>>;

    /// 检查是否可以解析指定服务
    fn can_resolve(&self, service: TypeInfo, key: Option<&ServiceKey>) -> bool;
}

/// 类型化解析扩展
pub trait ResolverExt: Resolver {
    /// 解析服务（具体类型或 `dyn Trait`）
    fn resolve<I>(&self) -> ResolutionResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        downcast_view(self.resolve_view(TypeInfo::of::<I>(), None)?)
    }

    /// 按键解析服务
    fn resolve_keyed<I>(&self, key: &str) -> ResolutionResult<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let service = TypeInfo::of::<I>();
        let key = ServiceKey::new(key).map_err(|_| ResolutionError::KeyedNotRegistered {
            type_name: service.name.to_string(),
            key: key.to_string(),
        })?;
        downcast_view(self.resolve_view(service, Some(&key))?)
    }

    /// 尝试解析服务，未注册或创建失败时返回 `None`
    fn try_resolve<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<I>().ok()
    }

    /// 解析指定服务的全部实现，保持注册顺序
    fn resolve_all<I>(&self) -> ResolutionResult<Vec<Arc<I>>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.resolve_all_views(TypeInfo::of::<I>(), None)?
            .into_iter()
            .map(downcast_view)
            .collect()
    }

    /// 检查服务是否已注册
    fn is_registered<I>(&self) -> bool
    where
        I: ?Sized + 'static,
    {
        self.can_resolve(TypeInfo::of::<I>(), None)
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

/// 把服务视图还原为 `Arc<I>`
pub fn downcast_view<I>(view: ServiceView) -> ResolutionResult<Arc<I>>
where
    I: ?Sized + Send + Sync + 'static,
{
    view.downcast::<Arc<I>>()
        .map(|boxed| *boxed)
        .map_err(|_| ResolutionError::TypeMismatch {
            type_name: std::any::type_name::<I>().to_string(),
        })
}

/// 解析链
///
/// 记录正在激活的实现类型，用于检测循环依赖。
#[derive(Debug, Clone, Default)]
pub struct ResolutionChain {
    chain: Vec<TypeInfo>,
}

impl ResolutionChain {
    /// 创建空的解析链
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加类型，返回新的解析链；类型已在链中时返回循环依赖错误
    pub fn push(&self, implementation: TypeInfo) -> ResolutionResult<Self> {
        if self.chain.contains(&implementation) {
            let chain = self
                .chain
                .iter()
                .map(TypeInfo::short_name)
                .chain(std::iter::once(implementation.short_name()))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ResolutionError::CircularDependency {
                dependency_chain: chain,
            });
        }

        let mut chain = self.chain.clone();
        chain.push(implementation);
        Ok(Self { chain })
    }

    /// 当前深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}
