//! 服务定位器集中集成测试
//!
//! 服务通过 `#[service]` 登记到服务目录，再按模块路径扫描注册。

use di_abstractions::ResolverExt;
use di_impl::{ServiceCollection, ServiceProvider};
use std::sync::Arc;

mod services {
    pub mod scoped {
        use parking_lot::Mutex;
        use service_macros::service;

        pub trait IScopedService: Send + Sync {
            fn add_value(&self, value: &str);
            fn values(&self) -> Vec<String>;
        }

        #[derive(Debug, Default)]
        #[service(scoped, implements(dyn IScopedService))]
        pub struct ScopedService {
            values: Mutex<Vec<String>>,
        }

        impl IScopedService for ScopedService {
            fn add_value(&self, value: &str) {
                self.values.lock().push(value.to_string());
            }

            fn values(&self) -> Vec<String> {
                self.values.lock().clone()
            }
        }
    }

    pub mod singleton {
        use parking_lot::Mutex;
        use service_macros::service;

        pub trait ISingletonService: Send + Sync {
            fn add_value(&self, value: &str);
            fn values(&self) -> Vec<String>;
        }

        #[derive(Debug, Default)]
        #[service(singleton, implements(dyn ISingletonService))]
        pub struct SingletonService {
            values: Mutex<Vec<String>>,
        }

        impl ISingletonService for SingletonService {
            fn add_value(&self, value: &str) {
                self.values.lock().push(value.to_string());
            }

            fn values(&self) -> Vec<String> {
                self.values.lock().clone()
            }
        }
    }

    pub mod transient {
        use parking_lot::Mutex;
        use service_macros::service;

        pub trait ITransientService: Send + Sync {
            fn add_value(&self, value: &str);
            fn values(&self) -> Vec<String>;
        }

        #[derive(Debug, Default)]
        #[service(transient, implements(dyn ITransientService))]
        pub struct TransientService {
            values: Mutex<Vec<String>>,
        }

        impl ITransientService for TransientService {
            fn add_value(&self, value: &str) {
                self.values.lock().push(value.to_string());
            }

            fn values(&self) -> Vec<String> {
                self.values.lock().clone()
            }
        }
    }

    pub mod multiple {
        use service_macros::service;

        pub trait ISameService: Send + Sync {
            fn name(&self) -> &'static str;
        }

        #[derive(Debug, Default)]
        #[service(scoped, implements(dyn ISameService))]
        pub struct SameServiceOne;

        impl ISameService for SameServiceOne {
            fn name(&self) -> &'static str {
                "SameServiceOne"
            }
        }

        #[derive(Debug, Default)]
        #[service(scoped, implements(dyn ISameService))]
        pub struct SameServiceTwo;

        impl ISameService for SameServiceTwo {
            fn name(&self) -> &'static str {
                "SameServiceTwo"
            }
        }

        // 没有服务标记，不会被注册
        #[derive(Debug, Default)]
        pub struct SameServiceUntagged;

        impl ISameService for SameServiceUntagged {
            fn name(&self) -> &'static str {
                "SameServiceUntagged"
            }
        }
    }

    pub mod keyed {
        use service_macros::service;

        pub trait ICache: Send + Sync {
            fn get(&self, key: &str) -> String;
        }

        #[derive(Debug, Default)]
        #[service(singleton, key = "big", implements(dyn ICache))]
        pub struct BigCache;

        impl ICache for BigCache {
            fn get(&self, key: &str) -> String {
                format!("Big cache: {key}")
            }
        }

        #[derive(Debug, Default)]
        #[service(singleton, key = "small", implements(dyn ICache))]
        pub struct SmallCache;

        impl ICache for SmallCache {
            fn get(&self, key: &str) -> String {
                format!("Small cache: {key}")
            }
        }
    }
}

use services::keyed::{BigCache, ICache};
use services::multiple::ISameService;
use services::scoped::{IScopedService, ScopedService};
use services::singleton::{ISingletonService, SingletonService};
use services::transient::{ITransientService, TransientService};

fn services_module() -> String {
    format!("{}::services", module_path!())
}

fn build_provider() -> ServiceProvider {
    let mut services = ServiceCollection::new();
    services
        .add_service_locator(services_module().as_str())
        .expect("扫描服务模块失败");
    services.build()
}

#[test]
fn test_scoped_service() {
    let provider = build_provider();
    let scope = provider.create_scope();

    let first = scope.resolve::<dyn IScopedService>().unwrap();
    first.add_value("value1");
    let second = scope.resolve::<dyn IScopedService>().unwrap();
    second.add_value("value2");

    assert_eq!(
        serde_json::to_string(&second.values()).unwrap(),
        r#"["value1","value2"]"#
    );
}

#[test]
fn test_scoped_service_by_type() {
    let provider = build_provider();
    let scope = provider.create_scope();

    let service = scope.resolve::<ScopedService>().unwrap();
    service.add_value("value1");
    assert_eq!(service.values(), vec!["value1"]);
}

#[test]
fn test_singleton_service() {
    let provider = build_provider();

    let first = provider.create_scope().resolve::<dyn ISingletonService>().unwrap();
    first.add_value("value1");
    let second = provider.create_scope().resolve::<dyn ISingletonService>().unwrap();
    second.add_value("value2");

    assert_eq!(second.values(), vec!["value1", "value2"]);
    let concrete = provider.resolve::<SingletonService>().unwrap();
    assert_eq!(concrete.values().len(), 2);
}

#[test]
fn test_transient_service() {
    let provider = build_provider();
    let scope = provider.create_scope();

    let first = scope.resolve::<dyn ITransientService>().unwrap();
    first.add_value("value1");
    let second = scope.resolve::<dyn ITransientService>().unwrap();

    assert!(second.values().is_empty());
    assert!(!Arc::ptr_eq(
        &scope.resolve::<TransientService>().unwrap(),
        &scope.resolve::<TransientService>().unwrap()
    ));
}

#[test]
fn test_same_interface_enumerates_all_tagged() {
    let provider = build_provider();
    let scope = provider.create_scope();

    let names: Vec<&str> = scope
        .resolve_all::<dyn ISameService>()
        .unwrap()
        .iter()
        .map(|service| service.name())
        .collect();
    assert_eq!(names, vec!["SameServiceOne", "SameServiceTwo"]);
    assert!(!scope.is_registered::<services::multiple::SameServiceUntagged>());
}

#[test]
fn test_keyed_services() {
    let provider = build_provider();

    assert_eq!(
        provider.resolve_keyed::<dyn ICache>("big").unwrap().get("test"),
        "Big cache: test"
    );
    assert_eq!(
        provider.resolve_keyed::<dyn ICache>("small").unwrap().get("test"),
        "Small cache: test"
    );

    let all: Vec<String> = provider
        .resolve_all::<dyn ICache>()
        .unwrap()
        .iter()
        .map(|cache| cache.get("test"))
        .collect();
    assert_eq!(all, vec!["Big cache: test", "Small cache: test"]);
}

#[test]
fn test_keyed_concrete_type_requires_key() {
    let provider = build_provider();
    assert!(provider.resolve_keyed::<BigCache>("big").is_ok());
    assert!(provider.resolve::<BigCache>().is_err());
    assert!(provider.resolve_keyed::<dyn ICache>("medium").is_err());
}

#[test]
fn test_submodule_scan_only_registers_submodule() {
    let mut services = ServiceCollection::new();
    services
        .add_service_locator(format!("{}::keyed", services_module()).as_str())
        .unwrap();
    let provider = services.build();

    assert_eq!(provider.resolve_all::<dyn ICache>().unwrap().len(), 2);
    assert!(!provider.is_registered::<ScopedService>());
}

#[test]
fn test_second_pass_keeps_singular_resolution() {
    let mut services = ServiceCollection::new();
    let module = services_module();
    services.add_service_locator(module.as_str()).unwrap();
    services.add_service_locator(module.as_str()).unwrap();
    let provider = services.build();

    assert_eq!(
        provider.resolve_keyed::<dyn ICache>("big").unwrap().get("k"),
        "Big cache: k"
    );
    assert_eq!(provider.resolve_all::<dyn ICache>().unwrap().len(), 4);
}

#[tokio::test]
async fn test_scopes_isolated_across_tasks() -> anyhow::Result<()> {
    let provider = build_provider();

    let mut handles = Vec::new();
    for request in 0..8 {
        let provider = provider.clone();
        handles.push(tokio::spawn(async move {
            let scope = provider.create_named_scope(format!("request-{request}"));
            let service = scope.resolve::<dyn IScopedService>()?;
            service.add_value(&format!("request-{request}"));
            scope.resolve::<ScopedService>()?.add_value("again");
            anyhow::Ok(scope.resolve::<dyn IScopedService>()?.values())
        }));
    }

    for (request, handle) in handles.into_iter().enumerate() {
        let values = handle.await??;
        assert_eq!(values, vec![format!("request-{request}"), "again".to_string()]);
    }
    Ok(())
}

#[tokio::test]
async fn test_singleton_shared_across_tasks() -> anyhow::Result<()> {
    let provider = build_provider();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let provider = provider.clone();
        handles.push(tokio::spawn(async move {
            let scope = provider.create_scope();
            scope.resolve::<dyn ISingletonService>().map(|s| s.add_value("hit"))
        }));
    }
    for handle in handles {
        handle.await??;
    }

    assert_eq!(provider.resolve::<dyn ISingletonService>()?.values().len(), 4);
    Ok(())
}
