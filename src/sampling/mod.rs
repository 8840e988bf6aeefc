//! 点采样策略模块
//!
//! 在矩形区域内生成候选站点坐标，供 Voronoi 图构建使用。
//!
//! # 主要类型
//! - [`PointSampling`][]: 采样策略 trait，所有策略可以互相替换
//! - [`NaivePointSampling`][]: 白噪声均匀采样，不保证点之间的最小距离
//! - [`JitteredGridSampling`][]: 抖动网格采样，点分布更均匀
//!
//! # 使用示例
//! ```ignore
//! use rand::SeedableRng;
//! use polyworld::sampling::{NaivePointSampling, PointSampling};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let bounds = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 100.0));
//! let sites = NaivePointSampling.create(bounds, 500, &mut rng)?;
//! ```

mod jittered;
mod naive;

use egui::{Pos2, Rect};
use rand::RngCore;

use crate::error::{Error, Result};

pub use jittered::JitteredGridSampling;
pub use naive::NaivePointSampling;

/// 点采样策略
///
/// 实现者必须无状态：同一个随机源序列总是产生同一组点。
/// 随机源由调用方持有，只在调用期间借用。
pub trait PointSampling: Send + Sync {
    /// 在 `bounds` 内生成恰好 `num_sites` 个点
    ///
    /// # 错误
    /// 区域尺寸为负数或坐标非有限时返回 [`Error::InvalidBounds`]
    fn create(&self, bounds: Rect, num_sites: usize, rng: &mut dyn RngCore) -> Result<Vec<Pos2>>;

    /// 策略名称，用于日志
    fn name(&self) -> &'static str;
}

/// 校验来自 UI 或命令行的采样数量
pub fn checked_count(requested: i64) -> Result<usize> {
    usize::try_from(requested).map_err(|_| Error::NegativeCount(requested))
}

/// 校验采样区域：尺寸非负且坐标有限，允许零宽或零高
pub fn check_bounds(bounds: Rect) -> Result<()> {
    let width = bounds.width();
    let height = bounds.height();
    let finite = bounds.min.x.is_finite()
        && bounds.min.y.is_finite()
        && bounds.max.x.is_finite()
        && bounds.max.y.is_finite();

    if finite && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidBounds { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_checked_count() {
        assert_eq!(checked_count(0).unwrap(), 0);
        assert_eq!(checked_count(5).unwrap(), 5);
        assert!(matches!(checked_count(-1), Err(Error::NegativeCount(-1))));
    }

    #[test]
    fn test_check_bounds() {
        assert!(check_bounds(Rect::from_min_size(Pos2::ZERO, vec2(10.0, 0.0))).is_ok());
        assert!(check_bounds(Rect::from_min_size(Pos2::ZERO, vec2(-1.0, 5.0))).is_err());
        assert!(check_bounds(Rect::from_min_size(Pos2::new(f32::NAN, 0.0), vec2(1.0, 1.0))).is_err());
    }
}
