//! 赛程导入模块
//!
//! 支持空白分隔文本与 JSON 两种赛程格式
//!
//! 文本格式：
//! ```text
//! 4
//! Atlanta       83 71  8  0 1 6 1
//! Philadelphia  80 79  3  1 0 0 2
//! New_York      78 78  6  6 0 0 0
//! Montreal      77 82  3  1 2 0 0
//! ```

use crate::config::LoadOptions;
use crate::division::{load_division, Division, ScheduleRecord};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON 赛程文件
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub teams: Vec<ScheduleRecord>,
}

/// 赛程格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFormat {
    Text,
    Json,
}

impl ScheduleFormat {
    /// 按扩展名推断格式，默认文本
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ScheduleFormat::Json,
            _ => ScheduleFormat::Text,
        }
    }
}

/// 解析文本赛程
pub fn parse_schedule(text: &str, options: LoadOptions) -> Result<Division> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| Error::ParseError("赛程为空".to_string()))?;
    let n: usize = header.parse().map_err(|_| {
        Error::ParseError(format!("第 {} 行: 无效的球队数 '{}'", header_line, header))
    })?;

    let records = lines
        .map(|(line_no, line)| parse_record(line_no, line, n))
        .collect::<Result<Vec<_>>>()?;

    load_division(n, records, options)
}

/// 解析单行：name wins losses remaining g_1 .. g_n
fn parse_record(line_no: usize, line: &str, n: usize) -> Result<ScheduleRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != n + 4 {
        return Err(Error::ParseError(format!(
            "第 {} 行: 期望 {} 个字段, 实际 {} 个",
            line_no,
            n + 4,
            tokens.len()
        )));
    }

    let number = |token: &str| -> Result<u32> {
        token.parse::<u32>().map_err(|_| {
            Error::ParseError(format!("第 {} 行: 无效的数字 '{}'", line_no, token))
        })
    };

    Ok(ScheduleRecord {
        name: tokens[0].to_string(),
        wins: number(tokens[1])?,
        losses: number(tokens[2])?,
        remaining: number(tokens[3])?,
        against: tokens[4..]
            .iter()
            .map(|&t| number(t))
            .collect::<Result<Vec<_>>>()?,
    })
}

/// 解析 JSON 赛程
pub fn parse_schedule_json(text: &str, options: LoadOptions) -> Result<Division> {
    let document: ScheduleDocument = serde_json::from_str(text)
        .map_err(|e| Error::ParseError(format!("JSON 解析错误: {}", e)))?;
    Division::from_records(document.teams, options)
}

/// 从文件加载赛程，按扩展名选择格式
pub fn load_schedule_file<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Division> {
    let text = fs::read_to_string(path.as_ref())?;
    match ScheduleFormat::from_path(path) {
        ScheduleFormat::Text => parse_schedule(&text, options),
        ScheduleFormat::Json => parse_schedule_json(&text, options),
    }
}
