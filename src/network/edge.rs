//! 容量边定义

use super::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 边 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// 边容量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capacity {
    Finite(u64),
    /// 无上界，大于任何可达流量
    Unbounded,
}

impl Capacity {
    /// 在当前流量下的剩余容量
    pub fn headroom(&self, flow: u64) -> u64 {
        match self {
            Capacity::Finite(cap) => cap - flow,
            Capacity::Unbounded => u64::MAX - flow,
        }
    }

    /// 流量是否在容量之内
    pub fn admits(&self, flow: u64) -> bool {
        match self {
            Capacity::Finite(cap) => flow <= *cap,
            Capacity::Unbounded => true,
        }
    }
}

impl From<u64> for Capacity {
    fn from(cap: u64) -> Self {
        Capacity::Finite(cap)
    }
}

/// 带流量的有向边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    capacity: Capacity,
    flow: u64,
}

impl FlowEdge {
    pub(crate) fn new(id: EdgeId, from: VertexId, to: VertexId, capacity: Capacity) -> Self {
        Self {
            id,
            from,
            to,
            capacity,
            flow: 0,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 起点
    pub fn src(&self) -> VertexId {
        self.from
    }

    /// 终点
    pub fn dst(&self) -> VertexId {
        self.to
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> u64 {
        self.flow
    }

    /// 给定一个端点，返回另一个端点
    pub fn other(&self, vertex: VertexId) -> VertexId {
        if vertex == self.from {
            self.to
        } else {
            assert_eq!(vertex, self.to, "顶点 {} 不是边 {:?} 的端点", vertex, self.id);
            self.from
        }
    }

    /// 从 `from` 出发沿此边的残余容量
    ///
    /// 正向为 capacity - flow，反向为 flow。
    pub fn residual_capacity(&self, from: VertexId) -> u64 {
        if from == self.from {
            self.capacity.headroom(self.flow)
        } else {
            assert_eq!(from, self.to, "顶点 {} 不是边 {:?} 的端点", from, self.id);
            self.flow
        }
    }

    /// 从 `from` 出发沿此边推送 `delta` 单位流量
    pub fn augment(&mut self, from: VertexId, delta: u64) {
        let residual = self.residual_capacity(from);
        assert!(
            delta <= residual,
            "边 {:?} 增广 {} 超出残余容量 {}",
            self.id,
            delta,
            residual
        );
        if from == self.from {
            self.flow += delta;
        } else {
            self.flow -= delta;
        }
        debug_assert!(self.capacity.admits(self.flow));
    }

    pub(crate) fn clear_flow(&mut self) {
        self.flow = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(capacity: Capacity) -> FlowEdge {
        FlowEdge::new(EdgeId::new(0), VertexId::new(0), VertexId::new(1), capacity)
    }

    #[test]
    fn test_residual_forward_and_backward() {
        let mut e = edge(Capacity::Finite(5));
        let (u, v) = (VertexId::new(0), VertexId::new(1));

        assert_eq!(e.residual_capacity(u), 5);
        assert_eq!(e.residual_capacity(v), 0);

        e.augment(u, 3);
        assert_eq!(e.flow(), 3);
        assert_eq!(e.residual_capacity(u), 2);
        assert_eq!(e.residual_capacity(v), 3);

        // 反向推送抵消流量
        e.augment(v, 2);
        assert_eq!(e.flow(), 1);
        assert_eq!(e.other(u), v);
        assert_eq!(e.other(v), u);
    }

    #[test]
    fn test_unbounded_capacity() {
        let mut e = edge(Capacity::Unbounded);
        e.augment(VertexId::new(0), 1_000_000);
        assert!(e.residual_capacity(VertexId::new(0)) > 1_000_000);
        assert!(e.capacity().admits(u64::MAX));
    }

    #[test]
    #[should_panic]
    fn test_augment_beyond_capacity_panics() {
        let mut e = edge(Capacity::Finite(2));
        e.augment(VertexId::new(0), 3);
    }

    #[test]
    #[should_panic]
    fn test_augment_backward_below_zero_panics() {
        let mut e = edge(Capacity::Finite(2));
        e.augment(VertexId::new(1), 1);
    }
}
