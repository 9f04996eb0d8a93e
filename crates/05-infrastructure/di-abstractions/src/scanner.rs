//! 类型扫描器抽象接口
//!
//! 扫描模块，找出所有带服务标记的具体类型

use crate::discovery::ServiceModule;
use crate::factory::{Activator, InterfaceDescriptor, ServiceEntry};
use infrastructure_common::{ConfigurationResult, ServiceTag, TypeInfo};
use std::fmt;

/// 模块引用
#[derive(Debug, Clone, Copy)]
pub enum ModuleRef<'a> {
    /// 全局服务目录中的模块路径，例如 `my_app::services`
    Path(&'a str),
    /// 显式模块清单
    Manifest(&'a ServiceModule),
}

impl<'a> ModuleRef<'a> {
    /// 获取模块引用的字符串表示
    pub fn as_str(&self) -> &'a str {
        match *self {
            ModuleRef::Path(path) => path,
            ModuleRef::Manifest(module) => module.name(),
        }
    }
}

impl fmt::Display for ModuleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> From<&'a str> for ModuleRef<'a> {
    fn from(path: &'a str) -> Self {
        ModuleRef::Path(path)
    }
}

impl<'a> From<&'a ServiceModule> for ModuleRef<'a> {
    fn from(module: &'a ServiceModule) -> Self {
        ModuleRef::Manifest(module)
    }
}

/// 候选类型
///
/// 扫描得到的可实例化类型，只在一次注册流程中存在。
#[derive(Clone)]
pub struct CandidateType {
    /// 实现类型
    pub implementation: TypeInfo,
    /// 实现的接口，保持声明顺序
    pub interfaces: Vec<InterfaceDescriptor>,
    /// 服务标记
    pub tags: Vec<ServiceTag>,
    /// 激活器
    pub activator: Activator,
    /// 实现类型自身的视图
    pub self_view: InterfaceDescriptor,
}

impl CandidateType {
    /// 从服务条目创建候选类型，抽象类型或没有标记的类型返回 `None`
    pub fn from_entry(entry: &ServiceEntry) -> Option<Self> {
        if entry.tags().is_empty() {
            return None;
        }
        let activator = entry.activator()?.clone();
        let self_view = entry.self_view()?.clone();

        Some(Self {
            implementation: entry.implementation(),
            interfaces: entry.interfaces().to_vec(),
            tags: entry.tags().to_vec(),
            activator,
            self_view,
        })
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateType")
            .field("implementation", &self.implementation.name)
            .field("interfaces", &self.interfaces)
            .field("tags", &self.tags)
            .finish()
    }
}

/// 类型扫描器 trait
pub trait TypeScanner: Send + Sync {
    /// 扫描模块，返回带标记的候选类型，顺序在多次运行间保持一致
    fn scan(&self, module: &ModuleRef<'_>) -> ConfigurationResult<Vec<CandidateType>>;

    /// 获取扫描器名称
    fn name(&self) -> &str;

    /// 检查是否支持指定的模块引用
    fn supports(&self, module: &ModuleRef<'_>) -> bool;
}
