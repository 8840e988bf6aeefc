//! 平面图模块
//!
//! [`Graph`] 以数组（arena）形式持有全部角点，角点通过 [`CornerId`] 索引访问。
//! 角点不反向引用所属的图，"角点属于哪张图" 的关系由 facet 在外部维护，
//! 因此不存在引用环。
//!
//! 图的身份由 [`GraphId`] 决定：两张几何完全相同的图仍然是不同的图。
//!
//! # 模块结构
//! - `builder`: 由站点集合构建 Voronoi 角点图

pub mod builder;

use std::sync::atomic::{AtomicU64, Ordering};

use egui::{Pos2, Rect};

use crate::error::{Error, Result};
use crate::sampling::check_bounds;

pub use builder::build_voronoi_graph;

/// 图的唯一标识，进程内单调递增分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// 角点在所属图中的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerId(pub u32);

impl CornerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 图的顶点（Voronoi 多边形的角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    id: CornerId,
    location: Pos2,
}

impl Corner {
    pub fn id(&self) -> CornerId {
        self.id
    }

    /// 角点的世界坐标
    pub fn location(&self) -> Pos2 {
        self.location
    }
}

/// 覆盖一个矩形区域的平面图
///
/// 不实现 `Clone`：复制会产生两个身份相同的图。需要共享时使用 `Arc<Graph>`。
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    bounds: Rect,
    corners: Vec<Corner>,
}

impl Graph {
    /// 由角点坐标创建图，角点 id 按输入顺序分配
    ///
    /// # 错误
    /// - 边界尺寸为负数或坐标非有限时返回 [`Error::InvalidBounds`]
    /// - 任一角点坐标为 NaN 或无穷大时返回 [`Error::NonFiniteLocation`]
    pub fn new(bounds: Rect, locations: impl IntoIterator<Item = Pos2>) -> Result<Self> {
        check_bounds(bounds)?;

        let corners = locations
            .into_iter()
            .enumerate()
            .map(|(idx, location)| {
                if !(location.x.is_finite() && location.y.is_finite()) {
                    return Err(Error::NonFiniteLocation {
                        index: idx,
                        x: location.x,
                        y: location.y,
                    });
                }
                Ok(Corner {
                    id: CornerId(idx as u32),
                    location,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: GraphId::next(),
            bounds,
            corners,
        })
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// 图覆盖的矩形区域
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn corner(&self, id: CornerId) -> Option<&Corner> {
        self.corners.get(id.index())
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }
}
