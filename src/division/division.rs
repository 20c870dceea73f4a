//! 分区数据结构
//!
//! 加载后只读，可在多个查询线程间共享

use super::team::{ScheduleRecord, Team};
use crate::config::{LoadOptions, RemainingCheck};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use tracing::info;

/// 分区
#[derive(Debug, Clone)]
pub struct Division {
    /// 名称 -> 球队（保持加载顺序）
    teams: IndexMap<String, Team>,
    /// 对阵剩余场次矩阵，按球队位置索引
    against: Vec<Vec<u32>>,
}

/// 从赛程记录加载分区
///
/// `expected_count` 为输入头部声明的球队数，必须与记录数一致。
pub fn load_division(
    expected_count: usize,
    records: Vec<ScheduleRecord>,
    options: LoadOptions,
) -> Result<Division> {
    if expected_count != records.len() {
        return Err(Error::MalformedSchedule(format!(
            "声明球队数 {} 与记录数 {} 不一致",
            expected_count,
            records.len()
        )));
    }
    Division::from_records(records, options)
}

impl Division {
    /// 从赛程记录构建分区并校验一致性
    pub fn from_records(records: Vec<ScheduleRecord>, options: LoadOptions) -> Result<Self> {
        let n = records.len();
        let mut teams = IndexMap::with_capacity(n);
        let mut against = Vec::with_capacity(n);

        for (index, record) in records.into_iter().enumerate() {
            if record.against.len() != n {
                return Err(Error::MalformedSchedule(format!(
                    "{} 的对阵列表长度为 {}, 应为 {}",
                    record.name,
                    record.against.len(),
                    n
                )));
            }
            if record.against[index] != 0 {
                return Err(Error::MalformedSchedule(format!(
                    "{} 与自身的剩余场次应为 0, 实际为 {}",
                    record.name, record.against[index]
                )));
            }

            let row_sum: u64 = record.against.iter().map(|&g| u64::from(g)).sum();
            let remaining = u64::from(record.remaining);
            let consistent = match options.remaining {
                RemainingCheck::Exact => row_sum == remaining,
                RemainingCheck::AtLeast => row_sum <= remaining,
            };
            if !consistent {
                return Err(Error::MalformedSchedule(format!(
                    "{} 的剩余场次 {} 与对阵场次之和 {} 不符",
                    record.name, record.remaining, row_sum
                )));
            }

            let team = Team::new(
                record.name.clone(),
                index,
                record.wins,
                record.losses,
                record.remaining,
            );
            if teams.insert(record.name.clone(), team).is_some() {
                return Err(Error::MalformedSchedule(format!("球队重复: {}", record.name)));
            }
            against.push(record.against);
        }

        for i in 0..n {
            for j in (i + 1)..n {
                if against[i][j] != against[j][i] {
                    return Err(Error::MalformedSchedule(format!(
                        "对阵矩阵不对称: {} vs {} = {}, {} vs {} = {}",
                        teams[i].name(),
                        teams[j].name(),
                        against[i][j],
                        teams[j].name(),
                        teams[i].name(),
                        against[j][i]
                    )));
                }
            }
        }

        info!(teams = n, "division loaded");

        Ok(Self { teams, against })
    }

    /// 球队数量
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// 所有球队名称（加载顺序）
    pub fn team_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.teams.keys().map(|name| name.as_str())
    }

    /// 所有球队（加载顺序）
    pub fn teams(&self) -> impl Iterator<Item = &Team> + '_ {
        self.teams.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    /// 获取球队
    pub fn team(&self, name: &str) -> Result<&Team> {
        self.teams
            .get(name)
            .ok_or_else(|| Error::UnknownTeam(name.to_string()))
    }

    pub fn wins(&self, name: &str) -> Result<u32> {
        Ok(self.team(name)?.wins())
    }

    pub fn losses(&self, name: &str) -> Result<u32> {
        Ok(self.team(name)?.losses())
    }

    pub fn remaining(&self, name: &str) -> Result<u32> {
        Ok(self.team(name)?.remaining())
    }

    /// 两队之间的剩余场次
    pub fn games_against(&self, a: &str, b: &str) -> Result<u32> {
        let i = self.team(a)?.index();
        let j = self.team(b)?.index();
        Ok(self.against[i][j])
    }

    /// 按位置取剩余场次
    pub(crate) fn games_between(&self, i: usize, j: usize) -> u32 {
        self.against[i][j]
    }
}
