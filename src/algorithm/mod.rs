//! 图算法模块
//!
//! 包含最大流算法和基于最大流的淘汰判定

mod elimination;
mod max_flow;

pub use elimination::{
    build_network, certificate_of_elimination, is_eliminated, Certificate, Elimination,
    EliminationKind, EliminationNetwork, EliminationSolver,
};
pub use max_flow::{EdmondsKarp, MaxFlow};
