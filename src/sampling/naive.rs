//! 白噪声采样

use egui::{Pos2, Rect};
use rand::{Rng, RngCore};

use super::{check_bounds, PointSampling};
use crate::error::Result;

/// 白噪声均匀采样
///
/// 每个点的 x、y 坐标独立地从区域内均匀抽取，点之间没有任何协调，
/// 可能重合或聚集。不保证最小距离。
#[derive(Debug, Clone, Copy, Default)]
pub struct NaivePointSampling;

impl PointSampling for NaivePointSampling {
    fn create(&self, bounds: Rect, num_sites: usize, rng: &mut dyn RngCore) -> Result<Vec<Pos2>> {
        check_bounds(bounds)?;

        let width = bounds.width();
        let height = bounds.height();

        let mut points = Vec::with_capacity(num_sites);
        for _ in 0..num_sites {
            let px = bounds.min.x + rng.random::<f32>() * width;
            let py = bounds.min.y + rng.random::<f32>() * height;
            points.push(Pos2::new(px, py));
        }

        Ok(points)
    }

    fn name(&self) -> &'static str {
        "naive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 统计被消耗的随机数次数
    struct CountingRng {
        inner: StdRng,
        draws: usize,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dst)
        }
    }

    fn unit_square() -> Rect {
        Rect::from_min_size(Pos2::ZERO, vec2(1.0, 1.0))
    }

    #[test]
    fn test_count_and_bounds() {
        let bounds = Rect::from_min_size(Pos2::new(-5.0, 20.0), vec2(10.0, 3.0));
        let mut rng = StdRng::seed_from_u64(42);

        let points = NaivePointSampling.create(bounds, 1000, &mut rng).unwrap();
        assert_eq!(points.len(), 1000);
        for p in &points {
            assert!(p.x >= -5.0 && p.x <= 5.0, "x {} out of range", p.x);
            assert!(p.y >= 20.0 && p.y <= 23.0, "y {} out of range", p.y);
        }
    }

    #[test]
    fn test_zero_sites_consumes_nothing() {
        let mut rng = CountingRng {
            inner: StdRng::seed_from_u64(1),
            draws: 0,
        };

        let points = NaivePointSampling.create(unit_square(), 0, &mut rng).unwrap();
        assert!(points.is_empty());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn test_two_draws_per_site() {
        let mut rng = CountingRng {
            inner: StdRng::seed_from_u64(1),
            draws: 0,
        };

        NaivePointSampling.create(unit_square(), 25, &mut rng).unwrap();
        assert_eq!(rng.draws, 50);
    }

    #[test]
    fn test_deterministic() {
        let bounds = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));

        let a = NaivePointSampling
            .create(bounds, 100, &mut StdRng::seed_from_u64(99))
            .unwrap();
        let b = NaivePointSampling
            .create(bounds, 100, &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_bounds() {
        // 零高度：所有点落在同一条水平线上
        let bounds = Rect::from_min_size(Pos2::new(0.0, 7.0), vec2(10.0, 0.0));
        let mut rng = StdRng::seed_from_u64(3);

        let points = NaivePointSampling.create(bounds, 50, &mut rng).unwrap();
        assert_eq!(points.len(), 50);
        assert!(points.iter().all(|p| p.y == 7.0));
    }

    #[test]
    fn test_negative_bounds_rejected() {
        let bounds = Rect::from_min_max(Pos2::new(10.0, 0.0), Pos2::new(0.0, 10.0));
        let mut rng = StdRng::seed_from_u64(3);
        assert!(NaivePointSampling.create(bounds, 5, &mut rng).is_err());
    }

    #[test]
    fn test_uniform_distribution() {
        // 4x4 分箱卡方检验，自由度 15，显著性 0.001 的临界值约为 37.7
        const BINS: usize = 4;
        const SAMPLES: usize = 16_000;

        let mut rng = StdRng::seed_from_u64(2015);
        let points = NaivePointSampling
            .create(unit_square(), SAMPLES, &mut rng)
            .unwrap();

        let mut counts = [0usize; BINS * BINS];
        for p in &points {
            let bx = ((p.x * BINS as f32) as usize).min(BINS - 1);
            let by = ((p.y * BINS as f32) as usize).min(BINS - 1);
            counts[by * BINS + bx] += 1;
        }

        let expected = SAMPLES as f64 / (BINS * BINS) as f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();

        assert!(chi_square < 37.7, "chi-square {} too large: {:?}", chi_square, counts);
    }
}
