use parking_lot::Mutex;
use service_macros::service;

/// 作用域服务：同一请求内共享
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
