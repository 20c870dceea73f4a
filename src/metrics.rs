//! 性能指标收集模块
//!
//! 统计淘汰查询次数、判定结果和最大流开销，指标不影响判定结果

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 查询结果分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// 未被淘汰
    Alive,
    /// 平凡淘汰
    Trivial,
    /// 最大流证明淘汰
    Flow,
    /// 查询失败（如球队不存在）
    Failed,
}

/// 求解器全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 查询统计
    query_stats: QueryStats,
    /// 网络与最大流统计
    flow_stats: FlowStats,
    /// 启动时间
    start_time: Instant,
}

/// 查询统计
#[derive(Debug)]
struct QueryStats {
    total_queries: AtomicU64,
    alive: AtomicU64,
    trivial_eliminations: AtomicU64,
    flow_eliminations: AtomicU64,
    failed_queries: AtomicU64,
    /// 查询总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 网络与最大流统计
#[derive(Debug)]
struct FlowStats {
    networks_built: AtomicU64,
    vertices_built: AtomicU64,
    edges_built: AtomicU64,
    augmenting_paths: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 查询指标
    pub total_queries: u64,
    pub alive: u64,
    pub trivial_eliminations: u64,
    pub flow_eliminations: u64,
    pub failed_queries: u64,
    pub avg_query_duration_ms: f64,

    // 最大流指标
    pub networks_built: u64,
    pub vertices_built: u64,
    pub edges_built: u64,
    pub augmenting_paths: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            query_stats: QueryStats {
                total_queries: AtomicU64::new(0),
                alive: AtomicU64::new(0),
                trivial_eliminations: AtomicU64::new(0),
                flow_eliminations: AtomicU64::new(0),
                failed_queries: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
            },
            flow_stats: FlowStats {
                networks_built: AtomicU64::new(0),
                vertices_built: AtomicU64::new(0),
                edges_built: AtomicU64::new(0),
                augmenting_paths: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录查询开始
    pub fn record_query_start(&self) -> QueryTimer {
        self.query_stats.total_queries.fetch_add(1, Ordering::Relaxed);
        QueryTimer::new()
    }

    /// 记录查询完成
    pub fn record_query_complete(&self, timer: QueryTimer, outcome: QueryOutcome) {
        let counter = match outcome {
            QueryOutcome::Alive => &self.query_stats.alive,
            QueryOutcome::Trivial => &self.query_stats.trivial_eliminations,
            QueryOutcome::Flow => &self.query_stats.flow_eliminations,
            QueryOutcome::Failed => &self.query_stats.failed_queries,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        self.query_stats
            .total_duration_us
            .fetch_add(timer.elapsed().as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录一次网络构建
    pub fn record_network(&self, vertices: usize, edges: usize) {
        self.flow_stats.networks_built.fetch_add(1, Ordering::Relaxed);
        self.flow_stats
            .vertices_built
            .fetch_add(vertices as u64, Ordering::Relaxed);
        self.flow_stats
            .edges_built
            .fetch_add(edges as u64, Ordering::Relaxed);
    }

    /// 记录增广路径条数
    pub fn record_augmenting_paths(&self, paths: usize) {
        self.flow_stats
            .augmenting_paths
            .fetch_add(paths as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_queries = self.query_stats.total_queries.load(Ordering::Relaxed);
        let total_duration_us = self.query_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_query_duration_ms = if total_queries > 0 {
            (total_duration_us as f64) / (total_queries as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_queries,
            alive: self.query_stats.alive.load(Ordering::Relaxed),
            trivial_eliminations: self.query_stats.trivial_eliminations.load(Ordering::Relaxed),
            flow_eliminations: self.query_stats.flow_eliminations.load(Ordering::Relaxed),
            failed_queries: self.query_stats.failed_queries.load(Ordering::Relaxed),
            avg_query_duration_ms,
            networks_built: self.flow_stats.networks_built.load(Ordering::Relaxed),
            vertices_built: self.flow_stats.vertices_built.load(Ordering::Relaxed),
            edges_built: self.flow_stats.edges_built.load(Ordering::Relaxed),
            augmenting_paths: self.flow_stats.augmenting_paths.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let entries: [(&str, &str, &str, String); 10] = [
            ("elimination_queries_total", "counter", "Total number of elimination queries", snapshot.total_queries.to_string()),
            ("elimination_alive_total", "counter", "Queries answered not eliminated", snapshot.alive.to_string()),
            ("elimination_trivial_total", "counter", "Queries answered by the trivial check", snapshot.trivial_eliminations.to_string()),
            ("elimination_flow_total", "counter", "Eliminations proven by max flow", snapshot.flow_eliminations.to_string()),
            ("elimination_failed_total", "counter", "Failed queries", snapshot.failed_queries.to_string()),
            ("elimination_query_duration_avg_ms", "gauge", "Average query duration in milliseconds", format!("{:.3}", snapshot.avg_query_duration_ms)),
            ("elimination_networks_built_total", "counter", "Flow networks constructed", snapshot.networks_built.to_string()),
            ("elimination_network_edges_total", "counter", "Edges across all constructed networks", snapshot.edges_built.to_string()),
            ("elimination_augmenting_paths_total", "counter", "Augmenting paths found by Edmonds-Karp", snapshot.augmenting_paths.to_string()),
            ("elimination_uptime_seconds", "counter", "Uptime in seconds", snapshot.uptime_seconds.to_string()),
        ];

        let mut content = String::new();
        for (name, kind, help, value) in entries {
            content.push_str(&format!("# HELP {} {}\n", name, help));
            content.push_str(&format!("# TYPE {} {}\n", name, kind));
            content.push_str(&format!("{} {}\n", name, value));
        }

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.query_stats.total_queries.store(0, Ordering::Relaxed);
        self.query_stats.alive.store(0, Ordering::Relaxed);
        self.query_stats.trivial_eliminations.store(0, Ordering::Relaxed);
        self.query_stats.flow_eliminations.store(0, Ordering::Relaxed);
        self.query_stats.failed_queries.store(0, Ordering::Relaxed);
        self.query_stats.total_duration_us.store(0, Ordering::Relaxed);

        self.flow_stats.networks_built.store(0, Ordering::Relaxed);
        self.flow_stats.vertices_built.store(0, Ordering::Relaxed);
        self.flow_stats.edges_built.store(0, Ordering::Relaxed);
        self.flow_stats.augmenting_paths.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 查询计时器
pub struct QueryTimer {
    start: Instant,
}

impl QueryTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}
