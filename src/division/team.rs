//! 球队定义

use serde::{Deserialize, Serialize};

/// 赛程记录（加载输入的一行）
///
/// `against` 按全局统一的球队顺序给出与每支球队的剩余场次，
/// 自身位置为 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    pub against: Vec<u32>,
}

impl ScheduleRecord {
    pub fn new(
        name: impl Into<String>,
        wins: u32,
        losses: u32,
        remaining: u32,
        against: Vec<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            remaining,
            against,
        }
    }
}

/// 球队
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// 球队名称（分区内唯一）
    name: String,
    /// 在分区中的位置
    index: usize,
    wins: u32,
    losses: u32,
    remaining: u32,
}

impl Team {
    pub(crate) fn new(name: String, index: usize, wins: u32, losses: u32, remaining: u32) -> Self {
        Self {
            name,
            index,
            wins,
            losses,
            remaining,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// 赢下全部剩余比赛后的最大胜场
    pub fn max_wins(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.remaining)
    }
}
