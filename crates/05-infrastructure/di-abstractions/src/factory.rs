//! 服务工厂与服务条目
//!
//! 没有运行时反射，实现类型的构造方式和它实现的接口都由作者显式声明。

use crate::resolver::Resolver;
use infrastructure_common::{ResolutionError, ResolutionResult, ServiceTag, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 已创建的具体服务实例（类型擦除）
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// 服务视图：装箱的 `Arc<I>`，`I` 可以是具体类型或 `dyn Trait`
pub type ServiceView = Box<dyn Any + Send + Sync>;

/// 服务激活器，负责创建具体实例
pub type Activator = Arc<dyn Fn(&dyn Resolver) -> ResolutionResult<ServiceInstance> + Send + Sync>;

/// 服务投影器，把具体实例转换为某个服务标识的视图
pub type Projector = Arc<dyn Fn(ServiceInstance) -> ResolutionResult<ServiceView> + Send + Sync>;

/// 接口描述符
///
/// 描述实现类型以某个服务标识（通常是 `dyn Trait`）对外暴露的方式。
#[derive(Clone)]
pub struct InterfaceDescriptor {
    service: TypeInfo,
    projector: Projector,
}

impl InterfaceDescriptor {
    /// 创建接口描述符
    ///
    /// `cast` 通常写成 `|it| it`，由编译器完成 `Arc<T>` 到 `Arc<dyn I>` 的转换。
    pub fn of<I, T>(cast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let projector: Projector = Arc::new(move |instance: ServiceInstance| {
            let concrete = instance
                .downcast::<T>()
                .map_err(|_| ResolutionError::TypeMismatch {
                    type_name: std::any::type_name::<T>().to_string(),
                })?;
            Ok(Box::new(cast(concrete)) as ServiceView)
        });

        Self {
            service: TypeInfo::of::<I>(),
            projector,
        }
    }

    /// 以实现类型自身作为服务标识
    pub fn identity<T: Send + Sync + 'static>() -> Self {
        Self::of::<T, T>(|it| it)
    }

    /// 服务标识
    pub fn service(&self) -> TypeInfo {
        self.service
    }

    /// 投影具体实例
    pub fn project(&self, instance: ServiceInstance) -> ResolutionResult<ServiceView> {
        (self.projector)(instance)
    }
}

impl fmt::Debug for InterfaceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceDescriptor")
            .field("service", &self.service.name)
            .field("projector", &"<function>")
            .finish()
    }
}

/// 服务条目
///
/// 清单中的一项：实现类型、构造方式、实现的接口以及服务标记。
/// 没有激活器的条目视为抽象类型，扫描时会被跳过。
#[derive(Clone)]
pub struct ServiceEntry {
    implementation: TypeInfo,
    activator: Option<Activator>,
    self_view: Option<InterfaceDescriptor>,
    interfaces: Vec<InterfaceDescriptor>,
    tags: Vec<ServiceTag>,
}

impl ServiceEntry {
    /// 使用工厂函数创建具体类型条目
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> ResolutionResult<T> + Send + Sync + 'static,
    {
        let activator: Activator = Arc::new(move |resolver: &dyn Resolver| {
            factory(resolver).map(|it| Arc::new(it) as ServiceInstance)
        });

        Self {
            implementation: TypeInfo::of::<T>(),
            activator: Some(activator),
            self_view: Some(InterfaceDescriptor::identity::<T>()),
            interfaces: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// 使用 `Default` 创建具体类型条目
    pub fn with_default<T>() -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::new::<T, _>(|_| Ok(T::default()))
    }

    /// 创建抽象类型条目（不可实例化）
    pub fn declared<T: ?Sized + 'static>() -> Self {
        Self {
            implementation: TypeInfo::of::<T>(),
            activator: None,
            self_view: None,
            interfaces: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// 添加实现的接口
    pub fn with_interface(mut self, interface: InterfaceDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// 添加服务标记
    pub fn with_tag(mut self, tag: ServiceTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// 实现类型
    pub fn implementation(&self) -> TypeInfo {
        self.implementation
    }

    /// 激活器，抽象类型为 `None`
    pub fn activator(&self) -> Option<&Activator> {
        self.activator.as_ref()
    }

    /// 实现类型自身的视图，抽象类型为 `None`
    pub fn self_view(&self) -> Option<&InterfaceDescriptor> {
        self.self_view.as_ref()
    }

    /// 声明的接口，保持声明顺序
    pub fn interfaces(&self) -> &[InterfaceDescriptor] {
        &self.interfaces
    }

    /// 服务标记
    pub fn tags(&self) -> &[ServiceTag] {
        &self.tags
    }

    /// 是否为抽象类型
    pub fn is_abstract(&self) -> bool {
        self.activator.is_none()
    }
}

impl fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("implementation", &self.implementation.name)
            .field("interfaces", &self.interfaces)
            .field("tags", &self.tags)
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

/// 可发现的服务 trait
///
/// 通常由 `#[service(...)]` 宏生成。
pub trait Discoverable: Send + Sync + 'static {
    /// 获取服务条目
    fn service_entry() -> ServiceEntry
    where
        Self: Sized;
}
