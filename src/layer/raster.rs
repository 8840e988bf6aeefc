//! 软件光栅化：在 `ColorImage` 上绘制抗锯齿实心圆

use egui::{Color32, ColorImage, Pos2};

/// 在图像上绘制实心圆
///
/// `origin` 是图像像素 (0, 0) 对应的世界坐标，`center` 为世界坐标。
/// 边缘覆盖率按像素中心到圆心的距离近似：`clamp(r + 0.5 - d, 0, 1)`。
/// 只写入 `clip` 尺寸与图像尺寸交集内的像素；半径不为正或圆心非有限时不绘制。
pub fn fill_circle(
    image: &mut ColorImage,
    clip: [usize; 2],
    origin: Pos2,
    center: Pos2,
    radius: f32,
    color: Color32,
) {
    // 同时拒绝 NaN
    if !(radius > 0.0) || !(center.x.is_finite() && center.y.is_finite()) {
        return;
    }

    let width = clip[0].min(image.size[0]);
    let height = clip[1].min(image.size[1]);
    if width == 0 || height == 0 {
        return;
    }

    let cx = center.x - origin.x;
    let cy = center.y - origin.y;
    let reach = radius + 0.5;

    let x0 = (cx - reach).floor().max(0.0);
    let y0 = (cy - reach).floor().max(0.0);
    let x1 = (cx + reach).ceil().min(width as f32 - 1.0);
    let y1 = (cy + reach).ceil().min(height as f32 - 1.0);
    if !(x0 <= x1 && y0 <= y1) {
        return;
    }

    for py in y0 as usize..=y1 as usize {
        for px in x0 as usize..=x1 as usize {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let coverage = (reach - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let idx = py * image.size[0] + px;
            image.pixels[idx] = blend(image.pixels[idx], color, coverage);
        }
    }
}

fn blend(base: Color32, overlay: Color32, coverage: f32) -> Color32 {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * coverage).round() as u8;
    Color32::from_rgba_premultiplied(
        mix(base.r(), overlay.r()),
        mix(base.g(), overlay.g()),
        mix(base.b(), overlay.b()),
        mix(base.a(), overlay.a()),
    )
}
