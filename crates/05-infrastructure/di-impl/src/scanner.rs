//! 模块扫描器实现

use di_abstractions::{
    catalog_entries, is_valid_module_path, CandidateType, ModuleRef, ServiceEntry, TypeScanner,
};
use infrastructure_common::{ConfigurationError, ConfigurationResult};
use std::collections::HashSet;
use tracing::debug;

/// 模块扫描器
///
/// 支持显式模块清单和全局服务目录两种模块引用。
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleScanner;

impl ModuleScanner {
    /// 创建新的模块扫描器
    pub fn new() -> Self {
        Self
    }

    fn load_entries(module: &ModuleRef<'_>) -> ConfigurationResult<Vec<ServiceEntry>> {
        match module {
            ModuleRef::Manifest(manifest) => {
                if manifest.name().trim().is_empty() {
                    return Err(ConfigurationError::invalid_module(
                        manifest.name(),
                        "模块名称不能为空",
                    ));
                }
                Ok(manifest.entries().to_vec())
            }
            ModuleRef::Path(path) => {
                if !is_valid_module_path(path) {
                    return Err(ConfigurationError::invalid_module(
                        *path,
                        "模块路径必须是以 :: 分隔的标识符",
                    ));
                }

                let catalog = catalog_entries(path);
                if catalog.is_empty() {
                    return Err(ConfigurationError::ModuleNotFound {
                        reference: path.to_string(),
                    });
                }
                Ok(catalog.iter().map(|entry| (entry.factory)()).collect())
            }
        }
    }
}

impl TypeScanner for ModuleScanner {
    fn scan(&self, module: &ModuleRef<'_>) -> ConfigurationResult<Vec<CandidateType>> {
        let entries = Self::load_entries(module)?;

        // 同一类型只扫描一次，保留首次出现
        let mut seen = HashSet::new();
        let candidates: Vec<CandidateType> = entries
            .iter()
            .filter(|entry| seen.insert(entry.implementation()))
            .filter_map(CandidateType::from_entry)
            .collect();

        debug!(
            "扫描模块 {} 完成，共 {} 个条目，发现 {} 个候选类型",
            module,
            entries.len(),
            candidates.len()
        );
        Ok(candidates)
    }

    fn name(&self) -> &str {
        "module-scanner"
    }

    fn supports(&self, module: &ModuleRef<'_>) -> bool {
        matches!(module, ModuleRef::Path(_) | ModuleRef::Manifest(_))
    }
}
