//! 无界面检查：生成世界、逐区域渲染并打印若干位置的悬停文本

use egui::Color32;
use polyworld::world::{GenerationParameters, SamplerKind, World};
use polyworld::ScalarFacetLayer;

fn main() -> polyworld::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    for sampler in [SamplerKind::Naive, SamplerKind::JitteredGrid] {
        let params = GenerationParameters {
            sampler,
            ..Default::default()
        };
        let world = World::generate(2015, &params)?;
        let layer = ScalarFacetLayer::default();

        println!("\n=== {:?} ===", sampler);
        for region in &world.regions {
            let mut image = region.blank_image();
            layer.render(&mut image, region, &world.facet);

            let painted = image
                .pixels
                .iter()
                .filter(|&&c| c != Color32::TRANSPARENT)
                .count();
            println!(
                "Region ({}, {}): {:.1}% covered",
                region.min_x,
                region.min_z,
                painted as f32 * 100.0 / image.pixels.len() as f32
            );
        }

        // 前几个角点，外加一个离开所有图的位置
        let mut queries: Vec<egui::Pos2> = world
            .facet
            .keys()
            .flat_map(|g| g.corners().iter().take(3).map(|c| c.location()))
            .collect();
        queries.push(egui::Pos2::new(-100.0, -100.0));

        for p in queries {
            match layer.describe_at(&world.facet, p.x, p.y) {
                Some(text) => println!("({:.1}, {:.1}) -> {}", p.x, p.y, text),
                None => println!("({:.1}, {:.1}) -> nothing", p.x, p.y),
            }
        }
    }

    Ok(())
}
