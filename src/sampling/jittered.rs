//! 抖动网格采样

use egui::{Pos2, Rect};
use rand::{Rng, RngCore};

use super::{check_bounds, PointSampling};
use crate::error::Result;

/// 抖动网格采样
///
/// 把区域划分为 `ceil(sqrt(n))` 列的网格，每个格子放一个点，
/// 并在格子中心附近随机偏移。相比白噪声，点更不容易聚集，
/// 但同样不保证最小距离。
#[derive(Debug, Clone, Copy)]
pub struct JitteredGridSampling {
    /// 最大偏移量占半个格子尺寸的比例，取值 [0, 1]
    pub jitter: f32,
}

impl Default for JitteredGridSampling {
    fn default() -> Self {
        Self { jitter: 0.9 }
    }
}

impl PointSampling for JitteredGridSampling {
    fn create(&self, bounds: Rect, num_sites: usize, rng: &mut dyn RngCore) -> Result<Vec<Pos2>> {
        check_bounds(bounds)?;

        if num_sites == 0 {
            return Ok(Vec::new());
        }

        let cols = (num_sites as f64).sqrt().ceil() as usize;
        let rows = num_sites.div_ceil(cols);

        let cell_w = bounds.width() / cols as f32;
        let cell_h = bounds.height() / rows as f32;
        let jitter = self.jitter.clamp(0.0, 1.0);

        let mut points = Vec::with_capacity(num_sites);
        for i in 0..num_sites {
            let col = (i % cols) as f32;
            let row = (i / cols) as f32;

            // 偏移范围 [-jitter/2, jitter/2) 个格子
            let jitter_x = (rng.random::<f32>() - 0.5) * jitter;
            let jitter_y = (rng.random::<f32>() - 0.5) * jitter;

            let px = (bounds.min.x + (col + 0.5 + jitter_x) * cell_w)
                .clamp(bounds.min.x, bounds.max.x);
            let py = (bounds.min.y + (row + 0.5 + jitter_y) * cell_h)
                .clamp(bounds.min.y, bounds.max.y);
            points.push(Pos2::new(px, py));
        }

        Ok(points)
    }

    fn name(&self) -> &'static str {
        "jittered-grid"
    }
}
