//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）
//! 结束后残余图中源点可达的顶点即最小割的源侧

use crate::error::{Error, Result};
use crate::network::{EdgeId, FlowNetwork, VertexId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::trace;

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: u64,
    /// 增广路径条数
    pub augmenting_paths: usize,
    /// 残余图中源点可达标记（按顶点下标）
    reachable: Vec<bool>,
}

impl MaxFlow {
    /// 顶点是否在最小割的源侧
    pub fn in_cut(&self, v: VertexId) -> bool {
        self.reachable.get(v.index()).copied().unwrap_or(false)
    }

    /// 最小割源侧的全部顶点（升序）
    pub fn source_side(&self) -> Vec<VertexId> {
        self.reachable
            .iter()
            .enumerate()
            .filter(|(_, reached)| **reached)
            .map(|(i, _)| VertexId::new(i))
            .collect()
    }

    /// 跨越最小割的边（源侧 -> 汇侧）
    pub fn cut_edges(&self, network: &FlowNetwork) -> Vec<EdgeId> {
        network
            .edges()
            .filter(|e| self.in_cut(e.src()) && !self.in_cut(e.dst()))
            .map(|e| e.id())
            .collect()
    }
}

/// Edmonds-Karp 最大流算法
///
/// 直接在给定网络上修改流量，结束后网络保存最大流分配。
pub struct EdmondsKarp<'a> {
    network: &'a mut FlowNetwork,
    source: VertexId,
    sink: VertexId,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(network: &'a mut FlowNetwork, source: VertexId, sink: VertexId) -> Result<Self> {
        for v in [source, sink] {
            if !network.contains_vertex(v) {
                return Err(Error::VertexNotFound(v.index()));
            }
        }
        if source == sink {
            return Err(Error::AlgorithmError(format!(
                "源点与汇点相同: {}",
                source
            )));
        }
        Ok(Self {
            network,
            source,
            sink,
        })
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(mut self) -> MaxFlow {
        let mut augmenting_paths = 0;

        // 重复 BFS 找最短增广路径
        while let Some((path, bottleneck)) = self.bfs_find_path() {
            for &(edge, from) in &path {
                self.network.augment(edge, from, bottleneck);
            }
            augmenting_paths += 1;
            trace!(length = path.len(), bottleneck, "augmenting path");
        }

        debug_assert!(self.network.check_feasible(self.source, self.sink));

        let value = u64::try_from(self.network.excess(self.source)).unwrap_or_default();
        let reachable = self.network.reachable_from(self.source);

        MaxFlow {
            value,
            augmenting_paths,
            reachable,
        }
    }

    /// BFS 找增广路径
    ///
    /// 邻接边按插入顺序访问，保证结果可复现。返回路径上的 (边, 出发顶点) 与瓶颈。
    fn bfs_find_path(&self) -> Option<(Vec<(EdgeId, VertexId)>, u64)> {
        let n = self.network.vertex_count();
        let mut visited = vec![false; n];
        let mut parent: Vec<Option<EdgeId>> = vec![None; n];
        let mut queue = VecDeque::new();

        visited[self.source.index()] = true;
        queue.push_back(self.source);

        while let Some(u) = queue.pop_front() {
            if u == self.sink {
                break;
            }

            for &edge_id in self.network.adjacent(u) {
                let edge = self.network.edge(edge_id);
                let v = edge.other(u);
                if !visited[v.index()] && edge.residual_capacity(u) > 0 {
                    visited[v.index()] = true;
                    parent[v.index()] = Some(edge_id);
                    queue.push_back(v);
                }
            }
        }

        if !visited[self.sink.index()] {
            return None;
        }

        // 重构路径并计算瓶颈
        let mut path = Vec::new();
        let mut bottleneck = u64::MAX;
        let mut current = self.sink;
        while current != self.source {
            let edge_id = parent[current.index()]?;
            let from = self.network.edge(edge_id).other(current);
            bottleneck = bottleneck.min(self.network.residual_capacity(edge_id, from));
            path.push((edge_id, from));
            current = from;
        }
        path.reverse();

        Some((path, bottleneck))
    }
}
