use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::facet::{CornerValues, GraphFacet, Region};
use crate::field::{NoiseField, NoiseFieldConfig};
use crate::graph::build_voronoi_graph;
use crate::sampling::{checked_count, JitteredGridSampling, NaivePointSampling, PointSampling};

pub const DEFAULT_TILE_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplerKind {
    Naive,
    JitteredGrid,
}

impl SamplerKind {
    pub fn sampler(self) -> Box<dyn PointSampling> {
        match self {
            SamplerKind::Naive => Box::new(NaivePointSampling),
            SamplerKind::JitteredGrid => Box::new(JitteredGridSampling::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    pub tiles_x: usize,
    pub tiles_z: usize,
    pub tile_size: usize,
    /// 每个图块的站点数，来自 UI，可能为负数
    pub sites_per_tile: i64,
    pub sampler: SamplerKind,
    pub noise: NoiseFieldConfig,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            tiles_x: 2,
            tiles_z: 2,
            tile_size: DEFAULT_TILE_SIZE,
            sites_per_tile: 400,
            sampler: SamplerKind::Naive,
            noise: NoiseFieldConfig::default(),
        }
    }
}

/// 由若干图块组成的世界，每个图块一张图
#[derive(Debug, Clone)]
pub struct World {
    pub regions: Vec<Region>,
    pub facet: GraphFacet<CornerValues>,
}

impl World {
    /// 为每个图块采样站点、构建图并填充标量值
    ///
    /// 每个图块使用由 `seed` 和图块序号派生的独立随机源，结果完全确定。
    pub fn generate(seed: u64, params: &GenerationParameters) -> Result<Self> {
        let num_sites = checked_count(params.sites_per_tile)?;
        let sampler = params.sampler.sampler();
        let field = NoiseField::new(&params.noise);
        let size = params.tile_size;

        let mut regions = Vec::with_capacity(params.tiles_x * params.tiles_z);
        let mut facet = GraphFacet::new();

        for tz in 0..params.tiles_z {
            for tx in 0..params.tiles_x {
                let region = Region::new((tx * size) as i32, (tz * size) as i32, size, size);
                let bounds = region.world_rect();

                let tile = (tz * params.tiles_x + tx) as u64;
                let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ tile);
                let sites = sampler.create(bounds, num_sites, &mut rng)?;

                let graph = Arc::new(build_voronoi_graph(bounds, &sites)?);
                let values = field.corner_values(&graph);
                facet.insert(graph, values)?;
                regions.push(region);
            }
        }

        log::debug!(
            "Generated {} tiles with the {} sampler ({} sites each)",
            regions.len(),
            sampler.name(),
            num_sites
        );

        Ok(Self { regions, facet })
    }

    /// 覆盖整个世界的区域
    pub fn extent(&self) -> Region {
        let max_x = self
            .regions
            .iter()
            .map(|r| r.min_x + r.width as i32)
            .max()
            .unwrap_or(0);
        let max_z = self
            .regions
            .iter()
            .map(|r| r.min_z + r.height as i32)
            .max()
            .unwrap_or(0);
        let min_x = self.regions.iter().map(|r| r.min_x).min().unwrap_or(0);
        let min_z = self.regions.iter().map(|r| r.min_z).min().unwrap_or(0);

        Region::new(
            min_x,
            min_z,
            (max_x - min_x) as usize,
            (max_z - min_z) as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn small() -> GenerationParameters {
        GenerationParameters {
            tiles_x: 2,
            tiles_z: 1,
            tile_size: 64,
            sites_per_tile: 40,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_tiles() {
        let world = World::generate(1, &small()).unwrap();
        assert_eq!(world.regions.len(), 2);
        assert_eq!(world.facet.len(), 2);
        assert_eq!(world.extent(), Region::new(0, 0, 128, 64));

        for (graph, values) in world.facet.iter() {
            assert!(graph.corner_count() > 0);
            assert_eq!(values.values().len(), graph.corner_count());
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let a = World::generate(9, &small()).unwrap();
        let b = World::generate(9, &small()).unwrap();

        let locations = |w: &World| -> Vec<Vec<egui::Pos2>> {
            w.facet
                .keys()
                .map(|g| g.corners().iter().map(|c| c.location()).collect())
                .collect()
        };
        assert_eq!(locations(&a), locations(&b));
    }

    #[test]
    fn test_negative_site_count() {
        let params = GenerationParameters {
            sites_per_tile: -3,
            ..small()
        };
        assert!(matches!(
            World::generate(1, &params),
            Err(Error::NegativeCount(-3))
        ));
    }
}
