//! 命令行输出模块

mod printer;

pub use printer::{render_json, PrintMode, Printer};
