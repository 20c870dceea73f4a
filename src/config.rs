//! 求解与加载配置

use serde::{Deserialize, Serialize};

/// 平凡淘汰时证书的收集策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrivialPolicy {
    /// 收集所有平凡淘汰目标球队的对手
    #[default]
    CollectAll,
    /// 只返回按分区顺序找到的第一个
    FirstFound,
}

/// 求解器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub trivial_policy: TrivialPolicy,
    /// `analyze_all` 是否使用 rayon 并行
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            trivial_policy: TrivialPolicy::CollectAll,
            parallel: true,
        }
    }
}

/// 剩余场次校验方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemainingCheck {
    /// remaining 必须等于分区内剩余场次之和
    #[default]
    Exact,
    /// remaining 不小于分区内剩余场次之和（包含跨分区比赛）
    AtLeast,
}

/// 赛程加载选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    pub remaining: RemainingCheck,
}

impl LoadOptions {
    /// 允许跨分区比赛计入 remaining
    pub fn interdivision() -> Self {
        Self {
            remaining: RemainingCheck::AtLeast,
        }
    }
}
