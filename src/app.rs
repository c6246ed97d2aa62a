use std::time::Instant;

use anyhow::Result;
use egui::{Color32, FontId, Sense, TextStyle, Visuals};

use crate::capture::RecordingManager;

pub mod types;

mod envelope;
mod interaction;
mod render;
mod viewport;

pub use types::{ChannelView, DragTarget, ScopeView};

#[derive(Clone, Debug, Default)]
pub struct StartupConfig {
    /// Channel count for the synthetic source (capture uses the device's).
    pub channels: usize,
    /// Skip the input device and use the synthetic source.
    pub synth: bool,
    pub time_scale: Option<f32>,
}

pub struct ScopeApp {
    manager: RecordingManager,
    pub scope: ScopeView,
    scroll_pos: f32,
    last_pump: Option<Instant>,
}

impl ScopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, startup: StartupConfig) -> Result<Self> {
        let mut visuals = Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(20, 20, 23);
        visuals.widgets.inactive.bg_fill = Color32::from_rgb(28, 28, 32);
        visuals.panel_fill = Color32::from_rgb(18, 18, 20);
        cc.egui_ctx.set_visuals(visuals);
        let mut style = (*cc.egui_ctx.style()).clone();
        style
            .text_styles
            .insert(TextStyle::Monospace, FontId::monospace(14.0));
        cc.egui_ctx.set_style(style);

        let manager = if startup.synth {
            RecordingManager::new_synthetic(startup.channels.max(1))
        } else {
            match RecordingManager::new() {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("no input device, using synthetic source: {e:?}");
                    RecordingManager::new_synthetic(startup.channels.max(1))
                }
            }
        };

        let mut scope = ScopeView::new(manager.sample_rate(), manager.capacity());
        if let Some(ts) = startup.time_scale {
            scope.time_scale = ts.clamp(1.0 / manager.sample_rate() as f32, types::TIME_SCALE_MAX);
        }
        scope.update_channels(manager.channel_count());

        Ok(Self {
            manager,
            scope,
            scroll_pos: 1000.0,
            last_pump: None,
        })
    }

    pub fn new_for_test(cc: &eframe::CreationContext<'_>, mut startup: StartupConfig) -> Result<Self> {
        startup.synth = true;
        Self::new(cc, startup)
    }

    pub fn manager(&self) -> &RecordingManager {
        &self.manager
    }

    fn ui_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.scope.thresh_mode, "Threshold")
                .clicked()
            {
                self.scope.toggle_thresh_mode();
            }
            if self.scope.thresh_mode {
                ui.separator();
                for i in 0..self.scope.views.len() {
                    if ui
                        .selectable_label(self.scope.selected_channel == i, format!("Ch {}", i + 1))
                        .clicked()
                    {
                        self.scope.set_selected_channel(i);
                    }
                }
            }
            ui.separator();
            if ui.button("\u{2212}").clicked() {
                self.scope.zoom_out();
            }
            if ui.button("+").clicked() {
                self.scope.zoom_in();
            }
            if ui.button("Reset").clicked() {
                self.scope.reset_zoom();
            }
            ui.label(
                egui::RichText::new(format!("{:.4} s/div", self.scope.time_scale)).monospace(),
            );
        });
    }

    fn ui_scope(&mut self, ui: &mut egui::Ui) {
        let avail = ui.available_size();
        let (resp, painter) = ui.allocate_painter(avail, Sense::click_and_drag());
        let rect = resp.rect;
        self.scope.set_view_size(rect.width(), rect.height());

        let hover = ui.input(|i| i.pointer.hover_pos());
        let pressed = ui.input(|i| i.pointer.button_pressed(egui::PointerButton::Primary));
        let down = ui.input(|i| i.pointer.button_down(egui::PointerButton::Primary));
        let released = ui.input(|i| i.pointer.button_released(egui::PointerButton::Primary));

        if let Some(p) = hover {
            if pressed && rect.contains(p) {
                self.scope.pointer_pressed(p.x - rect.left(), p.y - rect.top());
            }
            if down && self.scope.drag != DragTarget::None {
                self.scope.pointer_moved(p.y - rect.top());
            }
            let wheel = ui.input(|i| i.raw_scroll_delta);
            if wheel.y != 0.0 && rect.contains(p) {
                self.scope
                    .wheel(p.x - rect.left(), p.y - rect.top(), wheel.y > 0.0);
            }
        }
        if released || !down {
            self.scope.pointer_released();
        }

        let now = ui.input(|i| i.time);
        self.scope.draw(&painter, rect, &self.manager, now);
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = self
            .last_pump
            .map(|t| now.duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        self.last_pump = Some(now);
        self.manager.pump_synth(dt);
        self.scope.update_channels(self.manager.channel_count());

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.ui_controls(ui);
        });

        egui::TopBottomPanel::bottom("scroll").show(ctx, |ui| {
            ui.spacing_mut().slider_width = ui.available_width();
            let resp = ui.add(
                egui::Slider::new(&mut self.scroll_pos, 0.0..=1000.0)
                    .show_value(false)
                    .trailing_fill(true),
            );
            if resp.changed() {
                self.scope.set_rel_offset(self.scroll_pos);
            } else if !resp.dragged() {
                // follow offsets published by zoom/clamp
                self.scroll_pos = self.scope.rel_offset();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui_scope(ui);
        });

        // live traces scroll continuously
        ctx.request_repaint();
    }
}
