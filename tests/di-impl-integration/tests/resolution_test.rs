//! 工厂、多标记、循环依赖与作用域校验

use di_abstractions::{ResolverExt, ServiceRegistry};
use di_impl::ServiceCollection;
use infrastructure_common::{
    ConfigurationError, Lifetime, ProviderOptions, RegistrationOptions, ResolutionError,
};
use std::sync::Arc;

mod app {
    pub mod clock {
        use service_macros::service;

        pub trait IClock: Send + Sync {
            fn now(&self) -> u64;
        }

        #[derive(Debug)]
        #[service(singleton, implements(dyn IClock), factory = FixedClock::create)]
        pub struct FixedClock {
            pub at: u64,
        }

        impl FixedClock {
            fn create(_: &dyn di_abstractions::Resolver) -> infrastructure_common::ResolutionResult<Self> {
                Ok(Self { at: 42 })
            }
        }

        impl IClock for FixedClock {
            fn now(&self) -> u64 {
                self.at
            }
        }
    }

    pub mod greeting {
        use super::clock::IClock;
        use di_abstractions::{Resolver, ResolverExt};
        use infrastructure_common::ResolutionResult;
        use service_macros::service;
        use std::sync::Arc;

        pub trait IGreeter: Send + Sync {
            fn greet(&self) -> String;
        }

        #[service(scoped, implements(dyn IGreeter), factory = Greeter::create)]
        #[service(transient, key = "fresh")]
        pub struct Greeter {
            clock: Arc<dyn IClock>,
        }

        impl Greeter {
            fn create(resolver: &dyn Resolver) -> ResolutionResult<Self> {
                Ok(Self {
                    clock: resolver.resolve::<dyn IClock>()?,
                })
            }
        }

        impl IGreeter for Greeter {
            fn greet(&self) -> String {
                format!("hello at {}", self.clock.now())
            }
        }
    }
}

mod cycle {
    use di_abstractions::{Resolver, ResolverExt};
    use infrastructure_common::ResolutionResult;
    use service_macros::service;

    #[service(singleton, factory = Chicken::create)]
    pub struct Chicken;

    impl Chicken {
        fn create(resolver: &dyn Resolver) -> ResolutionResult<Self> {
            resolver.resolve::<Egg>()?;
            Ok(Self)
        }
    }

    #[service(transient, factory = Egg::create)]
    pub struct Egg;

    impl Egg {
        fn create(resolver: &dyn Resolver) -> ResolutionResult<Self> {
            resolver.resolve::<Chicken>()?;
            Ok(Self)
        }
    }
}

use app::clock::{FixedClock, IClock};
use app::greeting::{Greeter, IGreeter};

fn app_module() -> String {
    format!("{}::app", module_path!())
}

#[test]
fn test_factory_resolves_dependencies() {
    let mut services = ServiceCollection::new();
    services.add_service_locator(app_module().as_str()).unwrap();
    let provider = services.build();

    let scope = provider.create_scope();
    assert_eq!(scope.resolve::<dyn IGreeter>().unwrap().greet(), "hello at 42");
    assert_eq!(provider.resolve::<FixedClock>().unwrap().at, 42);
}

#[test]
fn test_repeated_attribute_adds_tags() {
    let mut services = ServiceCollection::new();
    services.add_service_locator(app_module().as_str()).unwrap();

    let plain = services.descriptors_of::<Greeter>();
    assert_eq!(plain.len(), 1);
    assert_eq!(plain[0].lifetime, Lifetime::Scoped);

    let keyed = services.keyed_descriptors_of::<dyn IGreeter>("fresh");
    assert_eq!(keyed.len(), 1);
    assert_eq!(keyed[0].lifetime, Lifetime::Transient);

    // 两个标记各自追加一个可枚举绑定
    assert_eq!(services.descriptors_of::<dyn IGreeter>().len(), 2);

    let provider = services.build();
    let scope = provider.create_scope();
    let a = scope.resolve_keyed::<Greeter>("fresh").unwrap();
    let b = scope.resolve_keyed::<Greeter>("fresh").unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    let c = scope.resolve::<Greeter>().unwrap();
    let d = scope.resolve::<Greeter>().unwrap();
    assert!(Arc::ptr_eq(&c, &d));
}

#[test]
fn test_pre_registered_instance_wins() {
    let mut services = ServiceCollection::new();
    services
        .try_add_instance::<dyn IClock>(Arc::new(FixedClock { at: 7 }))
        .unwrap();
    services.add_service_locator(app_module().as_str()).unwrap();
    let provider = services.build();

    let scope = provider.create_scope();
    assert_eq!(scope.resolve::<dyn IGreeter>().unwrap().greet(), "hello at 7");
    // 扫描得到的可枚举绑定仍然保留
    assert_eq!(provider.resolve_all::<dyn IClock>().unwrap().len(), 2);
}

#[test]
fn test_circular_dependency_reported() {
    let mut services = ServiceCollection::new();
    services
        .add_service_locator(format!("{}::cycle", module_path!()).as_str())
        .unwrap();
    let provider = services.build();

    match provider.resolve::<cycle::Chicken>() {
        Err(ResolutionError::CircularDependency { dependency_chain }) => {
            assert_eq!(dependency_chain, "Chicken -> Egg -> Chicken");
        }
        other => panic!("应检测到循环依赖: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_validate_scopes() {
    let mut services = ServiceCollection::new();
    services.add_service_locator(app_module().as_str()).unwrap();
    let provider = services.build_with(ProviderOptions {
        validate_scopes: true,
    });

    assert!(matches!(
        provider.resolve::<dyn IGreeter>(),
        Err(ResolutionError::ScopeRequired { .. })
    ));
    assert!(provider.create_scope().resolve::<dyn IGreeter>().is_ok());
    assert!(provider.resolve::<dyn IClock>().is_ok());
}

#[test]
fn test_invalid_override_aborts_pass() {
    let mut services = ServiceCollection::new();
    services
        .try_add_instance::<dyn IClock>(Arc::new(FixedClock { at: 1 }))
        .unwrap();

    let options = RegistrationOptions::default().with_lifetime_override("Greeter", "per-request");
    let err = services
        .add_service_locator_with(app_module().as_str(), &options)
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::UnrecognizedLifetime { .. }));
    assert_eq!(services.len(), 1);
}
