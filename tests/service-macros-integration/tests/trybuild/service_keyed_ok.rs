use di_abstractions::{Discoverable, Resolver};
use infrastructure_common::{Lifetime, ResolutionResult};
use service_macros::service;

pub trait ICache: Send + Sync {
    fn get(&self, key: &str) -> String;
}

pub trait IFlush: Send + Sync {}

#[service(singleton, key = "big", implements(dyn ICache, dyn IFlush), factory = BigCache::create)]
#[service(transient, implements(dyn ICache))]
pub struct BigCache {
    prefix: String,
}

impl BigCache {
    fn create(_: &dyn Resolver) -> ResolutionResult<Self> {
        Ok(Self {
            prefix: "Big cache".to_string(),
        })
    }
}

impl ICache for BigCache {
    fn get(&self, key: &str) -> String {
        format!("{}: {key}", self.prefix)
    }
}

impl IFlush for BigCache {}

fn main() {
    let entry = BigCache::service_entry();
    assert_eq!(entry.interfaces().len(), 2);
    assert_eq!(entry.tags().len(), 2);
    assert_eq!(entry.tags()[0].key.as_ref().map(|k| k.as_str()), Some("big"));
    assert_eq!(entry.tags()[1].lifetime, Lifetime::Transient);
    assert!(!entry.is_abstract());
}
