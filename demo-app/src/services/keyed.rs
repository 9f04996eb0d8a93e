use service_macros::service;

/// 键控缓存
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
