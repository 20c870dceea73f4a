//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的淘汰报告

use crate::algorithm::{Elimination, EliminationKind};
use crate::division::Division;
use crate::error::Result;
use crate::metrics::MetricsSnapshot;
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;

/// 打印模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式，每队一行结论
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印淘汰报告
    pub fn print_report(&self, division: &Division, results: &[Elimination]) -> String {
        if results.is_empty() {
            return "Empty division\n".to_string();
        }

        match self.mode {
            PrintMode::Table => self.format_table(division, results),
            PrintMode::Vertical => self.format_vertical(results),
        }
    }

    /// 表格格式
    fn format_table(&self, division: &Division, results: &[Elimination]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Team", "W", "L", "R", "Status", "Certificate"]);

        for result in results {
            let (wins, losses, remaining) = division
                .team(&result.team)
                .map(|t| {
                    (
                        t.wins().to_string(),
                        t.losses().to_string(),
                        t.remaining().to_string(),
                    )
                })
                .unwrap_or_default();

            let (status, certificate) = match &result.certificate {
                None => ("alive".to_string(), String::new()),
                Some(c) => {
                    let kind = match c.kind() {
                        EliminationKind::Trivial => "eliminated (trivial)",
                        EliminationKind::Flow => "eliminated",
                    };
                    (kind.to_string(), c.teams().collect::<Vec<_>>().join(" "))
                }
            };

            table.add_row(Row::new(vec![
                Cell::new(&result.team),
                Cell::new(&wins),
                Cell::new(&losses),
                Cell::new(&remaining),
                Cell::new(&status),
                Cell::new(&certificate),
            ]));
        }

        let eliminated = results.iter().filter(|r| r.is_eliminated()).count();
        format!(
            "{}\n{} team(s), {} eliminated\n",
            table,
            results.len(),
            eliminated
        )
    }

    /// 垂直格式
    fn format_vertical(&self, results: &[Elimination]) -> String {
        let mut output = String::new();

        for result in results {
            match &result.certificate {
                Some(certificate) => {
                    let members = certificate.teams().collect::<Vec<_>>().join(" ");
                    output.push_str(&format!(
                        "{} is eliminated by the subset R = {{ {} }}\n",
                        result.team, members
                    ));
                }
                None => {
                    output.push_str(&format!("{} is not eliminated\n", result.team));
                }
            }
        }

        output
    }

    /// 打印求解统计
    pub fn print_stats(&self, snapshot: &MetricsSnapshot) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["Queries", snapshot.total_queries.to_string()]);
        table.add_row(row!["Alive", snapshot.alive.to_string()]);
        table.add_row(row!["Trivial Eliminations", snapshot.trivial_eliminations.to_string()]);
        table.add_row(row!["Flow Eliminations", snapshot.flow_eliminations.to_string()]);
        table.add_row(row!["Networks Built", snapshot.networks_built.to_string()]);
        table.add_row(row!["Augmenting Paths", snapshot.augmenting_paths.to_string()]);
        table.add_row(row![
            "Avg Query (ms)",
            format!("{:.3}", snapshot.avg_query_duration_ms)
        ]);
        table.to_string()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    teams: usize,
    eliminated: usize,
    results: &'a [Elimination],
}

/// 渲染为 JSON 报告
pub fn render_json(results: &[Elimination]) -> Result<String> {
    let report = JsonReport {
        teams: results.len(),
        eliminated: results.iter().filter(|r| r.is_eliminated()).count(),
        results,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
