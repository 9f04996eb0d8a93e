use di_abstractions::{catalog_entries, Discoverable};
use infrastructure_common::{Lifetime, ServiceTag, TypeInfo};
use service_macros::service;

pub trait IScopedService: Send + Sync {}

#[derive(Debug, Default)]
#[service(scoped, implements(dyn IScopedService))]
pub struct ScopedService;

impl IScopedService for ScopedService {}

fn main() {
    let entry = ScopedService::service_entry();
    assert_eq!(entry.implementation(), TypeInfo::of::<ScopedService>());
    assert_eq!(entry.tags(), &[ServiceTag::new(Lifetime::Scoped)]);
    assert_eq!(entry.interfaces()[0].service(), TypeInfo::of::<dyn IScopedService>());

    let catalog = catalog_entries(module_path!());
    assert_eq!(catalog.len(), 1);
}
