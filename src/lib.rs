//! Baseball Elimination - 分区夺冠淘汰判定
//!
//! 根据各队战绩与剩余赛程判断球队是否已无缘分区第一：
//! - 平凡淘汰：全胜也追不上某队现有胜场
//! - 非平凡淘汰：基于 Edmonds-Karp 最大流与最小割给出淘汰证书
//! - 文本 / JSON 赛程导入

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod division;
pub mod error;
pub mod import;
pub mod metrics;
pub mod network;

// 重导出常用类型
pub use algorithm::{
    certificate_of_elimination, is_eliminated, Certificate, EdmondsKarp, Elimination,
    EliminationKind, EliminationSolver, MaxFlow,
};
pub use config::{LoadOptions, RemainingCheck, SolverConfig, TrivialPolicy};
pub use division::{load_division, Division, ScheduleRecord, Team};
pub use error::{Error, Result};
pub use network::{Capacity, EdgeId, FlowEdge, FlowNetwork, VertexId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
