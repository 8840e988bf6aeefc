use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 标量图层的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// 圆半径 = scale * 标量值
    pub scale: f32,
    /// 悬停拾取时的最小半径，保证小值角点仍可选中
    pub min_pick_radius: f32,
    /// 圆的填充颜色
    pub color: Color32,
    /// 悬停文本的前缀，例如 "Moisture"
    pub label: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            min_pick_radius: 2.0,
            color: Color32::from_rgb(0x40, 0x40, 0xFF),
            label: "Moisture".to_owned(),
        }
    }
}

impl LayerConfig {
    /// 设置半径缩放系数，接受任意有限值（包括零和负数）
    pub fn set_scale(&mut self, scale: f32) -> Result<()> {
        if !scale.is_finite() {
            return Err(Error::NonFiniteScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    /// 悬停文本，数值保留两位小数
    pub fn format_value(&self, value: f32) -> String {
        format!("{}: {:.2}", self.label, value)
    }
}
