//! 服务定位器配置选项

use crate::errors::{ConfigurationError, ConfigurationResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 服务定位器选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceLocatorOptions {
    /// 注册选项
    pub registration: RegistrationOptions,
    /// 容器选项
    pub provider: ProviderOptions,
}

impl ServiceLocatorOptions {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "SERVICE_LOCATOR";

    /// 从配置文件和环境变量加载选项
    ///
    /// 文件不存在时只使用环境变量，例如 `SERVICE_LOCATOR__PROVIDER__VALIDATE_SCOPES=true`。
    pub fn load(path: impl AsRef<Path>) -> ConfigurationResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigurationError::OptionsLoadFailed {
                message: e.to_string(),
            })?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigurationError::OptionsLoadFailed {
                message: e.to_string(),
            })
    }
}

/// 注册选项
///
/// 作用于规划阶段：类型名称可以是简短名称，也可以是完整类型名称。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationOptions {
    /// 生命周期覆盖（类型名称 -> 生命周期名称）
    pub lifetime_overrides: HashMap<String, String>,
    /// 排除的类型名称
    pub excluded_types: Vec<String>,
}

impl RegistrationOptions {
    /// 添加生命周期覆盖
    pub fn with_lifetime_override(
        mut self,
        type_name: impl Into<String>,
        lifetime: impl Into<String>,
    ) -> Self {
        self.lifetime_overrides
            .insert(type_name.into(), lifetime.into());
        self
    }

    /// 添加排除类型
    pub fn with_excluded_type(mut self, type_name: impl Into<String>) -> Self {
        self.excluded_types.push(type_name.into());
        self
    }
}

/// 容器选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderOptions {
    /// 禁止从根容器解析作用域服务
    pub validate_scopes: bool,
}
