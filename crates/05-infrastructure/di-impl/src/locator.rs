//! 服务定位器
//!
//! 串联扫描、规划和应用三个阶段。任何阶段出错都会中止整个注册流程，
//! 宿主注册表保持调用前的状态。

use crate::applier::{ApplyReport, RegistrationApplier};
use crate::container::ServiceCollection;
use crate::planner::BindingPlanner;
use crate::scanner::ModuleScanner;
use di_abstractions::{ModuleRef, ServiceRegistry, TypeScanner};
use infrastructure_common::{ConfigurationError, ConfigurationResult, RegistrationOptions};
use tracing::{error, info};

/// 服务定位器
#[derive(Debug, Clone, Default)]
pub struct ServiceLocator<S = ModuleScanner> {
    scanner: S,
    planner: BindingPlanner,
    applier: RegistrationApplier,
}

impl ServiceLocator<ModuleScanner> {
    /// 使用注册选项创建服务定位器
    pub fn new(options: RegistrationOptions) -> Self {
        Self::with_scanner(ModuleScanner::new(), options)
    }
}

impl<S: TypeScanner> ServiceLocator<S> {
    /// 使用自定义扫描器创建服务定位器
    pub fn with_scanner(scanner: S, options: RegistrationOptions) -> Self {
        Self {
            scanner,
            planner: BindingPlanner::new(options),
            applier: RegistrationApplier::new(),
        }
    }

    /// 扫描模块并把全部服务注册到宿主注册表
    ///
    /// 独占绑定遵循“先注册者胜出”，因此调用前已有的注册不会被覆盖，
    /// 对同一模块重复调用也不会产生新的注册。
    pub fn register<'a, R>(&self, module: impl Into<ModuleRef<'a>>, registry: &mut R) -> ConfigurationResult<ApplyReport>
    where
        R: ServiceRegistry + Clone,
    {
        let module = module.into();
        info!("开始注册模块: {} (扫描器: {})", module, self.scanner.name());

        let result = self.run(&module, registry);
        match &result {
            Ok(report) => info!(
                "模块 {} 注册完成: 注册 {}, 追加 {}, 跳过 {}",
                module, report.registered, report.appended, report.skipped
            ),
            Err(e) => error!("模块 {} 注册失败: {}", module, e),
        }
        result
    }

    fn run<R>(&self, module: &ModuleRef<'_>, registry: &mut R) -> ConfigurationResult<ApplyReport>
    where
        R: ServiceRegistry + Clone,
    {
        if !self.scanner.supports(module) {
            return Err(ConfigurationError::invalid_module(
                module.as_str(),
                format!("扫描器 {} 不支持该模块引用", self.scanner.name()),
            ));
        }

        let candidates = self.scanner.scan(module)?;
        let bindings = self.planner.plan_all(&candidates)?;
        self.applier.apply_staged(registry, bindings)
    }
}

impl ServiceCollection {
    /// 扫描模块并注册其中全部带服务标记的类型
    ///
    /// ```ignore
    /// let mut services = ServiceCollection::new();
    /// services.add_service_locator(module_path!())?;
    /// let provider = services.build();
    /// ```
    pub fn add_service_locator<'a>(&mut self, module: impl Into<ModuleRef<'a>>) -> ConfigurationResult<&mut Self> {
        self.add_service_locator_with(module, &RegistrationOptions::default())
    }

    /// 使用注册选项扫描模块
    pub fn add_service_locator_with<'a>(
        &mut self,
        module: impl Into<ModuleRef<'a>>,
        options: &RegistrationOptions,
    ) -> ConfigurationResult<&mut Self> {
        ServiceLocator::new(options.clone()).register(module, self)?;
        Ok(self)
    }
}
