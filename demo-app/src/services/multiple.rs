use service_macros::service;

/// 同一接口的多个实现
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
