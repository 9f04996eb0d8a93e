//! 注册应用器
//!
//! 按规划顺序把绑定提交给宿主注册表：独占绑定使用 `try_add`，
//! 可枚举绑定使用 `add`。

use di_abstractions::{Binding, Multiplicity, ServiceRegistry};
use infrastructure_common::ConfigurationResult;
use tracing::{debug, info};

/// 应用结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// 独占绑定实际注册的数量
    pub registered: usize,
    /// 可枚举绑定追加的数量
    pub appended: usize,
    /// 因已有注册而跳过的独占绑定数量
    pub skipped: usize,
}

impl ApplyReport {
    /// 实际写入注册表的绑定数量
    pub fn total_added(&self) -> usize {
        self.registered + self.appended
    }
}

/// 注册应用器
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationApplier;

impl RegistrationApplier {
    /// 创建新的应用器
    pub fn new() -> Self {
        Self
    }

    /// 直接应用到注册表
    ///
    /// 出错时已提交的绑定不会回滚，需要原子性时使用 [`Self::apply_staged`]。
    pub fn apply<R>(&self, registry: &mut R, bindings: Vec<Binding>) -> ConfigurationResult<ApplyReport>
    where
        R: ServiceRegistry + ?Sized,
    {
        let mut report = ApplyReport::default();

        for binding in bindings {
            match binding.multiplicity {
                Multiplicity::Exclusive => {
                    if registry.try_add(binding)? {
                        report.registered += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                Multiplicity::Enumerable => {
                    registry.add(binding)?;
                    report.appended += 1;
                }
            }
        }

        debug!(
            "应用绑定完成: 注册 {}, 追加 {}, 跳过 {}",
            report.registered, report.appended, report.skipped
        );
        Ok(report)
    }

    /// 在注册表副本上应用，全部成功后再提交
    pub fn apply_staged<R>(&self, registry: &mut R, bindings: Vec<Binding>) -> ConfigurationResult<ApplyReport>
    where
        R: ServiceRegistry + Clone,
    {
        let mut staged = registry.clone();
        let report = self.apply(&mut staged, bindings)?;
        *registry = staged;

        info!("提交 {} 个服务绑定", report.total_added());
        Ok(report)
    }
}
