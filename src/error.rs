//! 错误类型
//!
//! 所有错误都属于参数校验失败，在调用边界立即返回，内部不做恢复。
//! 退化几何、零值或空图不是错误，它们产生空结果或 `None`。

use crate::graph::GraphId;

/// polyworld 的错误类型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 请求的采样点数为负数
    #[error("sample count must not be negative, got {0}")]
    NegativeCount(i64),

    /// 采样区域尺寸为负数或包含非有限坐标
    #[error("invalid bounds: width {width}, height {height}")]
    InvalidBounds { width: f32, height: f32 },

    /// 角点坐标包含 NaN 或无穷大
    #[error("corner {index} has a non-finite location ({x}, {y})")]
    NonFiniteLocation { index: usize, x: f32, y: f32 },

    /// 标量值数量与图的角点数量不一致
    #[error("expected {expected} corner values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    /// 标量模型属于另一张图
    #[error("scalar model belongs to graph {actual:?}, not {expected:?}")]
    ForeignModel { expected: GraphId, actual: GraphId },

    /// 半径缩放系数不是有限数
    #[error("scale must be finite, got {0}")]
    NonFiniteScale(f32),
}

pub type Result<T> = std::result::Result<T, Error>;
