//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Recolecta y agrega métricas del servidor en tiempo real. Lo comparten
//! todos los workers del pool.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Máximo de latencias a guardar para calcular percentiles
const MAX_LATENCIES: usize = 10_000;

/// Collector de métricas thread-safe
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsData>>,
    start_time: Instant,
}

/// Datos internos de métricas
#[derive(Default)]
struct MetricsData {
    /// Contador total de requests respondidos
    total_requests: u64,

    /// Requests por código de estado
    status_codes: BTreeMap<u16, u64>,

    /// Latencias registradas (en microsegundos), ventana deslizante
    latencies: VecDeque<u64>,

    /// Conexiones siendo atendidas ahora mismo
    active_connections: u64,
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MetricsData {
                latencies: VecDeque::with_capacity(MAX_LATENCIES),
                ..MetricsData::default()
            })),
            start_time: Instant::now(),
        }
    }

    /// Un worker que entra en pánico no debe dejar las métricas inutilizables
    fn data(&self) -> MutexGuard<'_, MetricsData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registra un request respondido
    pub fn record_request(&self, status_code: u16, latency: Duration) {
        let mut data = self.data();

        data.total_requests += 1;
        *data.status_codes.entry(status_code).or_insert(0) += 1;

        if data.latencies.len() >= MAX_LATENCIES {
            data.latencies.pop_front();
        }
        data.latencies.push_back(latency.as_micros() as u64);
    }

    /// Marca el inicio de una conexión
    pub fn connection_opened(&self) {
        self.data().active_connections += 1;
    }

    /// Marca el cierre de una conexión
    pub fn connection_closed(&self) {
        let mut data = self.data();
        data.active_connections = data.active_connections.saturating_sub(1);
    }

    /// Conexiones activas
    pub fn active_connections(&self) -> u64 {
        self.data().active_connections
    }

    /// Obtiene un snapshot de las métricas
    pub fn snapshot(&self) -> MetricsSnapshot {
        let data = self.data();
        let (p50, p95, p99, avg) = calculate_percentiles(&data.latencies);

        MetricsSnapshot {
            total_requests: data.total_requests,
            active_connections: data.active_connections,
            status_codes: data.status_codes.clone(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            latency_p50_us: p50,
            latency_p95_us: p95,
            latency_p99_us: p99,
            latency_avg_us: avg,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Calcula percentiles de latencia: (p50, p95, p99, promedio)
fn calculate_percentiles(latencies: &VecDeque<u64>) -> (u64, u64, u64, u64) {
    if latencies.is_empty() {
        return (0, 0, 0, 0);
    }

    let mut sorted: Vec<u64> = latencies.iter().copied().collect();
    sorted.sort_unstable();

    let len = sorted.len();
    let p50 = sorted[len * 50 / 100];
    let p95 = sorted[len * 95 / 100];
    let p99 = sorted[len * 99 / 100];

    let sum: u64 = sorted.iter().sum();
    let avg = sum / len as u64;

    (p50, p95, p99, avg)
}

/// Snapshot de métricas (para logs y tests)
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub active_connections: u64,
    pub status_codes: BTreeMap<u16, u64>,
    pub uptime_secs: u64,
    pub latency_p50_us: u64,
    pub latency_p95_us: u64,
    pub latency_p99_us: u64,
    pub latency_avg_us: u64,
}

impl MetricsSnapshot {
    /// Serializa el snapshot como JSON compacto
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
