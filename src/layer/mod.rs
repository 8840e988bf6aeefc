//! 标量 facet 图层
//!
//! 把 facet 中每张图的每个角点画成一个实心圆，半径与角点的标量值成正比；
//! 并提供悬停查询：先按边界找到鼠标所在的图，再在该图内拾取最近的角点。
//!
//! # 主要类型
//! - [`ScalarFacetLayer`][]: 渲染与悬停查询
//! - [`LayerConfig`][]: 缩放系数、最小拾取半径、颜色和文本前缀
//! - [`Disc`][]: 渲染器要绘制的一个圆
//!
//! # 使用示例
//! ```ignore
//! let layer = ScalarFacetLayer::default();
//! let mut image = region.blank_image();
//! layer.render(&mut image, &region, &facet);
//!
//! if let Some(text) = layer.describe_at(&facet, 12.0, 40.0) {
//!     println!("{text}"); // "Moisture: 0.42"
//! }
//! ```

mod config;
pub mod raster;

use std::time::{Duration, Instant};

use egui::{ColorImage, Pos2};

use crate::facet::{GraphFacet, Region, ScalarModel};
use crate::graph::{Corner, CornerId, GraphId};
use crate::picker::pick_nearest;

pub use config::LayerConfig;

/// 渲染器绘制的一个圆（世界坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Pos2,
    pub radius: f32,
}

/// 一次渲染的统计信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub graphs: usize,
    pub corners: usize,
    pub elapsed: Duration,
}

/// 渲染完成后的回调
pub type RenderObserver = Box<dyn Fn(&RenderStats) + Send + Sync>;

/// 悬停拾取的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub graph: GraphId,
    pub corner: CornerId,
    pub location: Pos2,
    pub value: f32,
}

/// 以圆的大小表示角点标量值的图层
#[derive(Default)]
pub struct ScalarFacetLayer {
    config: LayerConfig,
    observer: Option<RenderObserver>,
}

impl ScalarFacetLayer {
    pub fn new(config: LayerConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// 每次渲染结束时调用 `observer`
    pub fn with_observer(mut self, observer: impl Fn(&RenderStats) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut LayerConfig {
        &mut self.config
    }

    /// 所有角点对应的圆，半径为 `scale * value`
    ///
    /// 模型中没有值的角点不产生圆。
    pub fn discs<'a, M: ScalarModel>(
        &self,
        facet: &'a GraphFacet<M>,
    ) -> impl Iterator<Item = Disc> + 'a {
        let scale = self.config.scale;
        facet.iter().flat_map(move |(graph, model)| {
            graph.corners().iter().filter_map(move |corner| {
                let value = model.value_at(corner.id())?;
                Some(Disc {
                    center: corner.location(),
                    radius: scale * value,
                })
            })
        })
    }

    /// 把 facet 绘制到区域对应的图像上
    ///
    /// 图像像素 (0, 0) 对应区域的最小世界坐标，只写入区域范围内的像素。
    /// 绘制顺序没有要求，后绘制的圆覆盖先绘制的圆。
    pub fn render<M: ScalarModel>(
        &self,
        image: &mut ColorImage,
        region: &Region,
        facet: &GraphFacet<M>,
    ) {
        let start = Instant::now();

        let origin = region.world_rect().min;
        let clip = [region.width, region.height];
        let mut corners = 0;
        for disc in self.discs(facet) {
            raster::fill_circle(image, clip, origin, disc.center, disc.radius, self.config.color);
            corners += 1;
        }

        let stats = RenderStats {
            graphs: facet.len(),
            corners,
            elapsed: start.elapsed(),
        };

        log::debug!(
            "Rendered {} corners of {} graphs in {}ms.",
            stats.corners,
            stats.graphs,
            stats.elapsed.as_millis()
        );

        if let Some(observer) = &self.observer {
            observer(&stats);
        }
    }

    /// 查找 `pos` 处的角点
    ///
    /// 先取 facet 中第一个边界包含 `pos` 的图，再以
    /// `max(min_pick_radius, scale * value)` 为半径拾取最近的角点。
    pub fn pick<M: ScalarModel>(&self, facet: &GraphFacet<M>, pos: Pos2) -> Option<Pick> {
        let (graph, model) = facet.iter().find(|(g, _)| g.bounds().contains(pos))?;

        let scale = self.config.scale;
        let candidates = graph
            .corners()
            .iter()
            .filter_map(|c| Some((c.location(), (c, model.value_at(c.id())?))));
        let (corner, value) = pick_nearest(
            pos,
            self.config.min_pick_radius,
            candidates,
            |(_, value): &(&Corner, f32)| value * scale,
        )?;

        Some(Pick {
            graph: graph.id(),
            corner: corner.id(),
            location: corner.location(),
            value,
        })
    }

    /// 世界坐标处的悬停文本，例如 `"Moisture: 0.42"`；未命中时返回 `None`
    pub fn describe_at<M: ScalarModel>(&self, facet: &GraphFacet<M>, wx: f32, wy: f32) -> Option<String> {
        self.pick(facet, Pos2::new(wx, wy))
            .map(|hit| self.config.format_value(hit.value))
    }
}
