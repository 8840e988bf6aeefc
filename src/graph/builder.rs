//! Voronoi 角点图构建
//!
//! Voronoi 图是 Delaunay 三角剖分的对偶图：每个 Delaunay 三角形的外心
//! 就是一个 Voronoi 角点。这里只需要角点的位置，不构建边和单元格。
//!
//! ```text
//! 站点 (Vec<Pos2>)
//!        │  delaunator::triangulate
//!        ▼
//! 三角形索引 ── 外心 (rayon 并行) ── 裁剪到边界 ── 去重
//!                                                   │
//!                                                   ▼
//!                                                 Graph
//! ```

use std::collections::HashSet;

use egui::{Pos2, Rect};
use rayon::prelude::*;

use super::Graph;
use crate::error::Result;
use crate::sampling::check_bounds;

/// 顶点坐标量化精度（用于去重）
const VERTEX_QUANTIZATION: f64 = 10000.0;

/// 由站点集合构建 Voronoi 角点图
///
/// 外心落在边界外的角点会被夹到边界上，因此所有角点都在 `bounds` 内。
/// 站点少于 3 个或全部共线时得到没有角点的图。
pub fn build_voronoi_graph(bounds: Rect, sites: &[Pos2]) -> Result<Graph> {
    check_bounds(bounds)?;

    let points: Vec<delaunator::Point> = sites
        .iter()
        .map(|p| delaunator::Point {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect();

    let triangulation = delaunator::triangulate(&points);

    let circumcenters: Vec<Pos2> = triangulation
        .triangles
        .par_chunks_exact(3)
        .map(|t| compute_circumcenter(&points, [t[0], t[1], t[2]]))
        .map(|c| c.clamp(bounds.min, bounds.max))
        .collect();

    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(circumcenters.len());
    let corners: Vec<Pos2> = circumcenters
        .into_iter()
        .filter(|c| {
            let key = (
                (c.x as f64 * VERTEX_QUANTIZATION).round() as i64,
                (c.y as f64 * VERTEX_QUANTIZATION).round() as i64,
            );
            seen.insert(key)
        })
        .collect();

    log::trace!(
        "Built graph from {} sites: {} triangles, {} corners",
        sites.len(),
        triangulation.triangles.len() / 3,
        corners.len()
    );

    Graph::new(bounds, corners)
}

/// 计算三角形外心，退化三角形返回重心
fn compute_circumcenter(points: &[delaunator::Point], indices: [usize; 3]) -> Pos2 {
    let a = &points[indices[0]];
    let b = &points[indices[1]];
    let c = &points[indices[2]];

    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-10 {
        return Pos2::new(
            ((a.x + b.x + c.x) / 3.0) as f32,
            ((a.y + b.y + c.y) / 3.0) as f32,
        );
    }

    let a_sq = a.x * a.x + a.y * a.y;
    let b_sq = b.x * b.x + b.y * b.y;
    let c_sq = c.x * c.x + c.y * c.y;

    let ux = (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d;
    let uy = (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d;

    Pos2::new(ux as f32, uy as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{NaivePointSampling, PointSampling};
    use egui::vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_square_has_single_corner() {
        // 正方形的两个三角形共享同一个外心（中心点）
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
        let sites = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];

        let graph = build_voronoi_graph(bounds, &sites).unwrap();
        assert_eq!(graph.corner_count(), 1);
        let center = graph.corners()[0].location();
        assert!((center.x - 5.0).abs() < 1e-4 && (center.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_too_few_sites() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
        let graph = build_voronoi_graph(bounds, &[Pos2::new(1.0, 1.0), Pos2::new(2.0, 2.0)]).unwrap();
        assert_eq!(graph.corner_count(), 0);
    }

    #[test]
    fn test_corners_inside_bounds() {
        let bounds = Rect::from_min_size(Pos2::new(64.0, 64.0), vec2(128.0, 128.0));
        let sites = NaivePointSampling
            .create(bounds, 200, &mut StdRng::seed_from_u64(11))
            .unwrap();

        let graph = build_voronoi_graph(bounds, &sites).unwrap();
        assert!(graph.corner_count() > 100);
        assert!(graph.corners().iter().all(|c| bounds.contains(c.location())));
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        let points = [
            delaunator::Point { x: 0.0, y: 0.0 },
            delaunator::Point { x: 4.0, y: 0.0 },
            delaunator::Point { x: 0.0, y: 2.0 },
        ];
        assert_eq!(compute_circumcenter(&points, [0, 1, 2]), Pos2::new(2.0, 1.0));
    }
}
