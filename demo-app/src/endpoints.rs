//! 模拟的 HTTP 端点
//!
//! 每次调用对应一个请求，在独立的作用域中解析服务。

use crate::services::keyed::ICache;
use crate::services::multiple::ISameService;
use crate::services::scoped::{IScopedService, ScopedService};
use crate::services::singleton::ISingletonService;
use crate::services::transient::ITransientService;
use anyhow::bail;
use di_abstractions::{Resolver, ResolverExt};
use serde_json::{json, Value};
use tracing::debug;

/// 全部路由
pub const ROUTES: &[&str] = &[
    "/api/scoped",
    "/api/scoped/bytype",
    "/api/singleton",
    "/api/transient",
    "/api/same",
    "/api/keyed/big",
    "/api/keyed/small",
    "/api/keyed/all",
];

/// 处理一次请求
pub fn handle(route: &str, scope: &dyn Resolver) -> anyhow::Result<Value> {
    let body = match route {
        "/api/scoped" => {
            let first = scope.resolve::<dyn IScopedService>()?;
            first.add_value("value1");
            let second = scope.resolve::<dyn IScopedService>()?;
            second.add_value("value2");
            json!(second.values())
        }
        "/api/scoped/bytype" => {
            let service = scope.resolve::<ScopedService>()?;
            service.add_value("value1");
            json!(service.values())
        }
        "/api/singleton" => {
            let first = scope.resolve::<dyn ISingletonService>()?;
            first.add_value("value1");
            let second = scope.resolve::<dyn ISingletonService>()?;
            second.add_value("value2");
            json!(second.values())
        }
        "/api/transient" => {
            let first = scope.resolve::<dyn ITransientService>()?;
            first.add_value("value1");
            let second = scope.resolve::<dyn ITransientService>()?;
            json!(second.values())
        }
        "/api/same" => {
            let services = scope.resolve_all::<dyn ISameService>()?;
            debug!(
                "ISameService 实现: {:?}",
                services.iter().map(|service| service.name()).collect::<Vec<_>>()
            );
            json!(services.len())
        }
        "/api/keyed/big" => json!(scope.resolve_keyed::<dyn ICache>("big")?.get("test")),
        "/api/keyed/small" => json!(scope.resolve_keyed::<dyn ICache>("small")?.get("test")),
        "/api/keyed/all" => {
            let caches = scope.resolve_all::<dyn ICache>()?;
            json!(caches.iter().map(|cache| cache.get("test")).collect::<Vec<_>>())
        }
        other => bail!("未知路由: {other}"),
    };
    Ok(body)
}
