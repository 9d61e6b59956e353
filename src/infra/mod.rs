//! Инфраструктурный слой вокруг советника:
//! - конфигурация;
//! - RNG-реализации для движка;
//! - атомарная запись файлов.

pub mod config;
pub mod persistence;
pub mod rng;

pub use config::AdvisorConfig;
pub use persistence::write_atomic;
pub use rng::*;
