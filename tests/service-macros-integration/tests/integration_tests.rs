//! #[service] 宏集成测试

use di_abstractions::{catalog_entries, Discoverable};
use infrastructure_common::{Lifetime, ServiceTag, TypeInfo};
use service_macros::service;

mod services {
    use service_macros::service;

    pub trait IReport: Send + Sync {}

    #[derive(Debug, Default)]
    #[service(transient, implements(dyn IReport))]
    pub struct DailyReport;

    impl IReport for DailyReport {}

    #[derive(Debug, Default)]
    #[service(singleton, key = "weekly", implements(dyn IReport))]
    pub struct WeeklyReport;

    impl IReport for WeeklyReport {}
}

#[derive(Debug, Default)]
#[service(scoped)]
struct RootService;

#[test]
fn test_generated_entry() {
    let entry = RootService::service_entry();
    assert_eq!(entry.implementation(), TypeInfo::of::<RootService>());
    assert!(entry.interfaces().is_empty());
    assert_eq!(entry.tags(), &[ServiceTag::new(Lifetime::Scoped)]);
}

#[test]
fn test_catalog_registration_by_module() {
    let module = format!("{}::services", module_path!());
    let names: Vec<&str> = catalog_entries(&module)
        .iter()
        .map(|entry| entry.type_name)
        .collect();

    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with("DailyReport"));
    assert!(names[1].ends_with("WeeklyReport"));

    // 根模块包含子模块中的服务
    assert_eq!(catalog_entries(module_path!()).len(), 3);
}

#[test]
fn test_keyed_tag() {
    let entry = services::WeeklyReport::service_entry();
    let tag = &entry.tags()[0];
    assert_eq!(tag.lifetime, Lifetime::Singleton);
    assert_eq!(tag.key.as_ref().map(|k| k.as_str()), Some("weekly"));
}
