use parking_lot::Mutex;
use service_macros::service;

/// 单例服务：整个进程共享
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
