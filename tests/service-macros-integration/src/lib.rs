//! `#[service]` 宏集成测试工程，测试代码位于 `tests/` 目录
