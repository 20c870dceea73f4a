//! 容量网络模块
//!
//! 定义最大流计算使用的顶点、边和网络结构

mod edge;
#[allow(clippy::module_inception)]
mod network;
mod vertex;

pub use edge::{Capacity, EdgeId, FlowEdge};
pub use network::FlowNetwork;
pub use vertex::VertexId;
