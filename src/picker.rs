//! 最近圆形拾取
//!
//! 每个候选对象是一个圆：圆心为候选位置，半径由半径函数给出。
//! 查询点落在某个圆内时该候选才算命中；多个命中时取距离最近者。
//!
//! 半径会被夹到一个最小值，使得值很小或为零的对象仍然可以被鼠标悬停选中。

use egui::Pos2;

/// 在所有包含光标的圆中找出离光标最近的一个
///
/// # 示例
/// ```ignore
/// let mut picker = CirclePickerClosest::new(cursor, |v: &f32| v * 4.0)
///     .with_min_radius(2.0);
/// for corner in graph.corners() {
///     picker.offer(corner.location(), values[corner.id().index()]);
/// }
/// let hit = picker.into_closest();
/// ```
pub struct CirclePickerClosest<T, F> {
    cursor: Pos2,
    radius_fn: F,
    min_radius: f32,
    closest: Option<(T, f32)>,
}

impl<T, F> CirclePickerClosest<T, F>
where
    F: Fn(&T) -> f32,
{
    pub fn new(cursor: Pos2, radius_fn: F) -> Self {
        Self {
            cursor,
            radius_fn,
            min_radius: 0.0,
            closest: None,
        }
    }

    /// 设置最小拾取半径
    pub fn with_min_radius(mut self, min_radius: f32) -> Self {
        self.min_radius = min_radius;
        self
    }

    /// 提交一个候选对象
    ///
    /// 只有严格更近的候选才会替换当前结果，距离相同时先提交者胜出。
    pub fn offer(&mut self, pos: Pos2, item: T) {
        let radius = self.min_radius.max((self.radius_fn)(&item));
        let distance = self.cursor.distance(pos);

        if distance <= radius {
            let closer = match &self.closest {
                Some((_, best)) => distance < *best,
                None => true,
            };
            if closer {
                self.closest = Some((item, distance));
            }
        }
    }

    pub fn closest(&self) -> Option<&T> {
        self.closest.as_ref().map(|(item, _)| item)
    }

    /// 命中对象到光标的距离
    pub fn closest_distance(&self) -> Option<f32> {
        self.closest.as_ref().map(|(_, d)| *d)
    }

    pub fn into_closest(self) -> Option<T> {
        self.closest.map(|(item, _)| item)
    }
}

/// 一次性拾取：返回半径包含 `query` 的候选中距离最近者
///
/// 有效半径为 `max(min_radius, radius_fn(item))`。
pub fn pick_nearest<T>(
    query: Pos2,
    min_radius: f32,
    candidates: impl IntoIterator<Item = (Pos2, T)>,
    radius_fn: impl Fn(&T) -> f32,
) -> Option<T> {
    let mut picker = CirclePickerClosest::new(query, radius_fn).with_min_radius(min_radius);
    for (pos, item) in candidates {
        picker.offer(pos, item);
    }
    picker.into_closest()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let hit = pick_nearest(Pos2::ZERO, 2.0, Vec::<(Pos2, u32)>::new(), |_| 1.0);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_min_radius_clamp() {
        let candidates = || vec![(Pos2::new(0.0, 0.0), "zero")];

        let hit = pick_nearest(Pos2::new(1.5, 0.0), 2.0, candidates(), |_| 0.0);
        assert_eq!(hit, Some("zero"));

        let miss = pick_nearest(Pos2::new(2.5, 0.0), 2.0, candidates(), |_| 0.0);
        assert_eq!(miss, None);
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        let hit = pick_nearest(Pos2::new(3.0, 4.0), 0.0, [(Pos2::ZERO, 1)], |_| 5.0);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_closest_among_hits() {
        // 远处的大圆也包含查询点，但近处的小圆更近
        let candidates = vec![
            (Pos2::new(10.0, 0.0), ("far", 20.0)),
            (Pos2::new(1.0, 0.0), ("near", 2.0)),
            (Pos2::new(0.5, 0.0), ("miss", 0.1)),
        ];

        let hit = pick_nearest(Pos2::ZERO, 0.0, candidates, |(_, r)| *r);
        assert_eq!(hit.map(|(name, _)| name), Some("near"));
    }

    #[test]
    fn test_exact_position_wins() {
        let candidates = vec![(Pos2::new(1.0, 1.0), 'a'), (Pos2::new(5.0, 5.0), 'b')];
        let hit = pick_nearest(Pos2::new(5.0, 5.0), 2.0, candidates, |_| 10.0);
        assert_eq!(hit, Some('b'));
    }

    #[test]
    fn test_tie_keeps_first() {
        let candidates = vec![(Pos2::new(-1.0, 0.0), 'a'), (Pos2::new(1.0, 0.0), 'b')];
        let hit = pick_nearest(Pos2::ZERO, 2.0, candidates, |_| 0.0);
        assert_eq!(hit, Some('a'));
    }

    #[test]
    fn test_picker_reports_distance() {
        let mut picker = CirclePickerClosest::new(Pos2::ZERO, |_: &u32| 10.0);
        picker.offer(Pos2::new(6.0, 8.0), 7);
        assert_eq!(picker.closest(), Some(&7));
        assert_eq!(picker.closest_distance(), Some(10.0));
    }
}
