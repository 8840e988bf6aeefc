use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use egui::{Color32, Pos2, Stroke, TextureHandle, TextureId};

use crate::facet::Region;
use crate::layer::{LayerConfig, ScalarFacetLayer};
use crate::world::{GenerationParameters, SamplerKind, World};

const BACKGROUND: Color32 = Color32::from_gray(24);
const MAX_SITES_PER_TILE: i64 = 20_000;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ViewerApp {
    seed: u64,
    params: GenerationParameters,
    layer_config: LayerConfig,

    #[serde(skip)]
    world: Option<World>,
    #[serde(skip)]
    layer: ScalarFacetLayer,
    #[serde(skip)]
    render_micros: Arc<AtomicU64>,
    #[serde(skip)]
    texture: Option<TextureHandle>,
    #[serde(skip)]
    texture_dirty: bool,
    #[serde(skip)]
    error: Option<String>,
}

// serde 用它补全缺失字段，因此这里不生成世界
impl Default for ViewerApp {
    fn default() -> Self {
        Self {
            seed: 1,
            params: GenerationParameters::default(),
            layer_config: LayerConfig::default(),
            world: None,
            layer: ScalarFacetLayer::default(),
            render_micros: Arc::new(AtomicU64::new(0)),
            texture: None,
            texture_dirty: true,
            error: None,
        }
    }
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let app = cc
            .storage
            .and_then(|storage| eframe::get_value::<ViewerApp>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.started()
    }

    /// 构建图层并生成一次世界
    fn started(mut self) -> Self {
        self.rebuild_layer();
        self.regenerate();
        self
    }

    fn rebuild_layer(&mut self) {
        let micros = self.render_micros.clone();
        self.layer = ScalarFacetLayer::new(self.layer_config.clone()).with_observer(move |stats| {
            micros.store(stats.elapsed.as_micros() as u64, Ordering::Relaxed);
        });
        self.texture_dirty = true;
    }

    fn regenerate(&mut self) {
        match World::generate(self.seed, &self.params) {
            Ok(world) => {
                self.world = Some(world);
                self.error = None;
            }
            Err(err) => {
                log::warn!("World generation failed: {err}");
                self.error = Some(err.to_string());
            }
        }
        self.texture_dirty = true;
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) -> Option<(TextureId, Region)> {
        let world = self.world.as_ref()?;
        let extent = world.extent();

        if self.texture_dirty || self.texture.is_none() {
            let mut image = extent.blank_image();
            image.pixels.fill(BACKGROUND);
            self.layer.render(&mut image, &extent, &world.facet);
            self.texture = Some(ctx.load_texture("moisture", image, egui::TextureOptions::LINEAR));
            self.texture_dirty = false;
        }

        self.texture.as_ref().map(|t| (t.id(), extent))
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sampling");
        let mut regenerate = false;
        ui.horizontal(|ui| {
            ui.label("Seed");
            regenerate |= ui
                .add(egui::DragValue::new(&mut self.seed).speed(1))
                .changed();
            if ui.button("Randomize").clicked() {
                self.seed = rand::random();
                regenerate = true;
            }
        });
        ui.horizontal(|ui| {
            ui.label("Sites per tile");
            regenerate |= ui
                .add(
                    egui::DragValue::new(&mut self.params.sites_per_tile)
                        .speed(10)
                        .range(0..=MAX_SITES_PER_TILE),
                )
                .changed();
        });
        ui.horizontal(|ui| {
            regenerate |= ui
                .radio_value(&mut self.params.sampler, SamplerKind::Naive, "Naive")
                .changed();
            regenerate |= ui
                .radio_value(&mut self.params.sampler, SamplerKind::JitteredGrid, "Jittered grid")
                .changed();
        });
        if regenerate {
            self.regenerate();
        }

        ui.separator();
        ui.heading("Layer");
        let mut scale = self.layer_config.scale;
        if ui
            .add(egui::Slider::new(&mut scale, 0.0..=16.0).text("Scale"))
            .changed()
        {
            match self.layer_config.set_scale(scale) {
                Ok(()) => self.rebuild_layer(),
                Err(err) => self.error = Some(err.to_string()),
            }
        }
        if ui
            .add(
                egui::Slider::new(&mut self.layer_config.min_pick_radius, 0.0..=10.0)
                    .text("Min pick radius"),
            )
            .changed()
        {
            self.rebuild_layer();
        }

        if let Some(err) = &self.error {
            ui.separator();
            ui.colored_label(Color32::LIGHT_RED, err);
        }
    }
}

impl eframe::App for ViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Polyworld moisture viewer");
        });

        egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));

        let texture = self.ensure_texture(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            let (Some((texture_id, extent)), Some(world)) = (texture, self.world.as_ref()) else {
                ui.label("No world generated yet");
                return;
            };

            let available = ui.available_size();
            let aspect = extent.width as f32 / extent.height.max(1) as f32;
            let target_width = available.x.min((available.y - 24.0) * aspect).max(1.0);
            let target_height = target_width / aspect;
            let image = egui::Image::new((texture_id, egui::vec2(target_width, target_height)))
                .sense(egui::Sense::hover());
            let response = ui.add(image);

            let to_world = |p: Pos2| {
                let rect = response.rect;
                Pos2::new(
                    extent.min_x as f32 + (p.x - rect.min.x) / rect.width() * extent.width as f32,
                    extent.min_z as f32 + (p.y - rect.min.y) / rect.height() * extent.height as f32,
                )
            };
            let to_screen = |p: Pos2| {
                let rect = response.rect;
                Pos2::new(
                    rect.min.x + (p.x - extent.min_x as f32) / extent.width as f32 * rect.width(),
                    rect.min.y + (p.y - extent.min_z as f32) / extent.height as f32 * rect.height(),
                )
            };

            let hover = response
                .hover_pos()
                .and_then(|p| self.layer.pick(&world.facet, to_world(p)));

            ui.label(format!(
                "{} graphs | last render {}µs",
                world.facet.len(),
                self.render_micros.load(Ordering::Relaxed)
            ));

            if let Some(hit) = hover {
                let radius = (self.layer_config.scale * hit.value)
                    .max(self.layer_config.min_pick_radius)
                    * response.rect.width()
                    / extent.width as f32;
                ui.painter().circle_stroke(
                    to_screen(hit.location),
                    radius,
                    Stroke::new(1.5, Color32::WHITE),
                );
                response.on_hover_text(self.layer_config.format_value(hit.value));
            }
        });
    }
}
