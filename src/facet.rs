//! 图属性 facet
//!
//! facet 把每张图映射到它的标量模型（例如湿度）。一个区域内每个已生成的
//! 图块对应一个条目；条目只会被整体替换，不会原地修改。
//!
//! 标量模型由外部模拟步骤构建，在一次渲染或拾取期间只读。

use std::sync::Arc;

use egui::{pos2, vec2, ColorImage, Color32, Rect};

use crate::error::{Error, Result};
use crate::graph::{CornerId, Graph, GraphId};

/// 标量模型：为某一张图的每个角点关联一个浮点值
pub trait ScalarModel: Send + Sync {
    /// 模型所属的图
    fn graph_id(&self) -> GraphId;

    /// 角点的值；角点不属于该模型的图时返回 `None`
    fn value_at(&self, corner: CornerId) -> Option<f32>;
}

/// 按角点索引存储的标量值
#[derive(Debug, Clone, PartialEq)]
pub struct CornerValues {
    graph: GraphId,
    values: Vec<f32>,
}

impl CornerValues {
    /// 为 `graph` 创建标量模型，`values[i]` 对应 `CornerId(i)`
    ///
    /// # 错误
    /// 值的数量与角点数量不一致时返回 [`Error::ValueCountMismatch`]
    pub fn new(graph: &Graph, values: Vec<f32>) -> Result<Self> {
        if values.len() != graph.corner_count() {
            return Err(Error::ValueCountMismatch {
                expected: graph.corner_count(),
                actual: values.len(),
            });
        }

        Ok(Self {
            graph: graph.id(),
            values,
        })
    }

    /// 对每个角点求值构建标量模型
    pub fn from_fn(graph: &Graph, mut f: impl FnMut(&crate::graph::Corner) -> f32) -> Self {
        Self {
            graph: graph.id(),
            values: graph.corners().iter().map(&mut f).collect(),
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl ScalarModel for CornerValues {
    fn graph_id(&self) -> GraphId {
        self.graph
    }

    fn value_at(&self, corner: CornerId) -> Option<f32> {
        self.values.get(corner.index()).copied()
    }
}

/// 图到标量模型的映射
///
/// 键按插入顺序枚举；为已存在的图插入新模型会替换原条目并保持其位置。
#[derive(Debug, Clone)]
pub struct GraphFacet<M> {
    entries: Vec<(Arc<Graph>, M)>,
}

impl<M> Default for GraphFacet<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M: ScalarModel> GraphFacet<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册或替换 `graph` 的标量模型，返回被替换的旧模型
    ///
    /// # 错误
    /// 模型不属于 `graph` 时返回 [`Error::ForeignModel`]，facet 保持不变
    pub fn insert(&mut self, graph: Arc<Graph>, model: M) -> Result<Option<M>> {
        if model.graph_id() != graph.id() {
            return Err(Error::ForeignModel {
                expected: graph.id(),
                actual: model.graph_id(),
            });
        }

        match self.entries.iter_mut().find(|(g, _)| g.id() == graph.id()) {
            Some(entry) => Ok(Some(std::mem::replace(entry, (graph, model)).1)),
            None => {
                self.entries.push((graph, model));
                Ok(None)
            }
        }
    }

    pub fn get(&self, graph: &Graph) -> Option<&M> {
        self.entries
            .iter()
            .find(|(g, _)| g.id() == graph.id())
            .map(|(_, m)| m)
    }

    /// 所有图，按插入顺序
    pub fn keys(&self) -> impl Iterator<Item = &Arc<Graph>> + '_ {
        self.entries.iter().map(|(g, _)| g)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Graph, &M)> + '_ {
        self.entries.iter().map(|(g, m)| (g.as_ref(), m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 一块待绘制的世界区域（整数像素，X/Z 平面）
///
/// 目标图像的像素 (0, 0) 对应世界坐标 (`min_x`, `min_z`)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub min_x: i32,
    pub min_z: i32,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(min_x: i32, min_z: i32, width: usize, height: usize) -> Self {
        Self {
            min_x,
            min_z,
            width,
            height,
        }
    }

    /// 区域覆盖的世界矩形
    pub fn world_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.min_x as f32, self.min_z as f32),
            vec2(self.width as f32, self.height as f32),
        )
    }

    /// 与区域同尺寸的透明图像
    pub fn blank_image(&self) -> ColorImage {
        ColorImage::new([self.width, self.height], Color32::TRANSPARENT)
    }
}
