//! 容量网络
//!
//! 每条边同时挂在两个端点的邻接表上，正向与反向残余遍历共用同一份流量状态

use super::edge::{Capacity, EdgeId, FlowEdge};
use super::vertex::VertexId;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::ops::Range;

/// 有向容量网络
#[derive(Debug, Clone, Default)]
pub struct FlowNetwork {
    /// 所有边
    edges: Vec<FlowEdge>,
    /// 顶点 -> 关联边（按插入顺序）
    adjacency: Vec<Vec<EdgeId>>,
}

impl FlowNetwork {
    /// 创建空网络
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建含 `vertices` 个顶点的网络
    pub fn with_vertices(vertices: usize) -> Self {
        let mut network = Self::new();
        network.add_vertex_range(vertices);
        network
    }

    // ==================== 构建 ====================

    /// 分配 `count` 个连续顶点，返回其 ID 区间
    pub fn add_vertex_range(&mut self, count: usize) -> Range<VertexId> {
        let start = self.adjacency.len();
        self.adjacency.resize_with(start + count, Vec::new);
        VertexId::new(start)..VertexId::new(start + count)
    }

    /// 添加有向边
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        capacity: impl Into<Capacity>,
    ) -> Result<EdgeId> {
        self.validate(from)?;
        self.validate(to)?;

        let id = EdgeId::new(self.edges.len());
        self.edges.push(FlowEdge::new(id, from, to, capacity.into()));
        self.adjacency[from.index()].push(id);
        if from != to {
            self.adjacency[to.index()].push(id);
        }
        Ok(id)
    }

    fn validate(&self, v: VertexId) -> Result<()> {
        if v.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(Error::VertexNotFound(v.index()))
        }
    }

    // ==================== 查询 ====================

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        v.index() < self.adjacency.len()
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id.index()]
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.edges.iter()
    }

    /// 顶点的关联边（出边和入边）
    pub fn adjacent(&self, v: VertexId) -> &[EdgeId] {
        &self.adjacency[v.index()]
    }

    /// 从 `from` 沿边 `edge` 的残余容量
    pub fn residual_capacity(&self, edge: EdgeId, from: VertexId) -> u64 {
        self.edges[edge.index()].residual_capacity(from)
    }

    /// 从 `from` 沿边 `edge` 推送 `delta` 单位流量
    pub fn augment(&mut self, edge: EdgeId, from: VertexId, delta: u64) {
        self.edges[edge.index()].augment(from, delta);
    }

    /// 清空所有流量
    pub fn reset_flow(&mut self) {
        for edge in &mut self.edges {
            edge.clear_flow();
        }
    }

    // ==================== 残余图 ====================

    /// 残余图中从 `source` 可达的顶点（按顶点下标的标记数组）
    pub fn reachable_from(&self, source: VertexId) -> Vec<bool> {
        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();

        visited[source.index()] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &edge_id in self.adjacent(u) {
                let edge = self.edge(edge_id);
                let v = edge.other(u);
                if !visited[v.index()] && edge.residual_capacity(u) > 0 {
                    visited[v.index()] = true;
                    queue.push_back(v);
                }
            }
        }

        visited
    }

    /// 顶点净流出量（流出 - 流入）
    pub fn excess(&self, v: VertexId) -> i128 {
        self.adjacent(v)
            .iter()
            .map(|&id| {
                let edge = self.edge(id);
                let flow = i128::from(edge.flow());
                match (edge.src() == v, edge.dst() == v) {
                    (true, true) => 0,
                    (true, false) => flow,
                    _ => -flow,
                }
            })
            .sum()
    }

    /// 校验流量可行性：每条边不超容量，源汇以外顶点流量守恒
    pub fn check_feasible(&self, source: VertexId, sink: VertexId) -> bool {
        if !self.edges.iter().all(|e| e.capacity().admits(e.flow())) {
            return false;
        }
        (0..self.vertex_count())
            .map(VertexId::new)
            .filter(|&v| v != source && v != sink)
            .all(|v| self.excess(v) == 0)
    }
}
