//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
///
/// 注册流程（扫描 → 规划 → 应用）中的任何配置错误都是致命的，
/// 出现时整个注册流程立即中止，不会留下部分注册的容器。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("无法识别的生命周期: {value}")]
    UnrecognizedLifetime { value: String },

    #[error("服务键不能为空")]
    EmptyServiceKey,

    #[error("模块引用无效: {reference}, 原因: {message}")]
    InvalidModule { reference: String, message: String },

    #[error("模块不存在或未包含任何服务: {reference}")]
    ModuleNotFound { reference: String },

    #[error("容器拒绝注册: {service} -> {implementation}, 原因: {message}")]
    RegistrationRejected {
        service: String,
        implementation: String,
        message: String,
    },

    #[error("选项加载失败: {message}")]
    OptionsLoadFailed { message: String },
}

impl ConfigurationError {
    /// 创建模块引用无效错误
    pub fn invalid_module(reference: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidModule {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// 创建注册被拒绝错误
    pub fn registration_rejected(
        service: impl Into<String>,
        implementation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RegistrationRejected {
            service: service.into(),
            implementation: implementation.into(),
            message: message.into(),
        }
    }
}

/// 服务解析错误类型
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("服务未注册: {type_name}")]
    NotRegistered { type_name: String },

    #[error("键控服务未注册: {type_name}, 键: {key}")]
    KeyedNotRegistered { type_name: String, key: String },

    #[error("服务类型不匹配: {type_name}")]
    TypeMismatch { type_name: String },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("作用域服务不能从根容器解析: {type_name}")]
    ScopeRequired { type_name: String },

    #[error("服务创建失败: {type_name}, 原因: {source}")]
    CreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ResolutionError {
    /// 创建服务未注册错误
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::NotRegistered {
            type_name: type_name.into(),
        }
    }

    /// 创建服务创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::CreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
pub type ResolutionResult<T> = Result<T, ResolutionError>;
