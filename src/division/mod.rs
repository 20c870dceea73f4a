//! 分区模型
//!
//! 球队战绩与剩余对阵矩阵

#[allow(clippy::module_inception)]
mod division;
mod team;

pub use division::{load_division, Division};
pub use team::{ScheduleRecord, Team};
