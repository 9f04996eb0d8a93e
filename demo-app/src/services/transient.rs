use parking_lot::Mutex;
use service_macros::service;

/// 瞬态服务：每次解析都是新实例
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
