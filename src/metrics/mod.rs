//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores de requests por código de estado, conexiones activas y
//! latencias (p50, p95, p99).

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
