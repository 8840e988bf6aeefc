use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use crate::facet::CornerValues;
use crate::graph::Graph;

/// 角点噪声场的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseFieldConfig {
    /// 随机种子，相同种子得到相同的值
    pub seed: u32,

    /// 基础频率，越大细节越多
    pub frequency: f64,

    /// 叠加的噪声层数
    pub octaves: usize,
}

impl Default for NoiseFieldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frequency: 0.01,
            octaves: 4,
        }
    }
}

/// 为图的角点填充 [0, 1] 内的平滑值
///
/// 查看器和测试需要合理的角点值时，用它代替湿度模拟。
pub struct NoiseField {
    fbm: Fbm<Perlin>,
    frequency: f64,
}

impl NoiseField {
    pub fn new(config: &NoiseFieldConfig) -> Self {
        let fbm = Fbm::<Perlin>::new(config.seed).set_octaves(config.octaves.max(1));
        Self {
            fbm,
            frequency: config.frequency,
        }
    }

    /// 世界坐标处的值，从 [-1, 1] 映射到 [0, 1]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let v = self
            .fbm
            .get([x as f64 * self.frequency, y as f64 * self.frequency]);
        ((v + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }

    /// 为 `graph` 的每个角点保存一个噪声值的标量模型
    pub fn corner_values(&self, graph: &Graph) -> CornerValues {
        CornerValues::from_fn(graph, |corner| {
            let p = corner.location();
            self.sample(p.x, p.y)
        })
    }
}
