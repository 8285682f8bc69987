// ui.rs - egui front end over a Simulation

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use life::PATTERNS;
use tokio::runtime::Runtime;

use crate::app::Simulation;
use crate::config::AppConfig;
use crate::scheduler::lock_grid;

const BOARD_SIDE: f32 = 640.0;
const SPACING: f32 = 0.5;

pub struct LifeApp {
    // Dropped before the runtime so the scheduler task is aborted first
    simulation: Simulation,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    _runtime: Runtime,
}

impl LifeApp {
    pub fn new(runtime: Runtime, config: &AppConfig) -> Self {
        let [lr, lg, lb] = config.live_color;
        let [dr, dg, db] = config.dead_color;
        Self {
            simulation: Simulation::new(runtime.handle().clone(), config),
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            selected_pattern: 0,
            _runtime: runtime,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let button_text = if self.simulation.is_running() { "⏸ Stop" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                let ctx = ctx.clone();
                self.simulation.toggle(move || ctx.request_repaint());
            }

            if ui.add_enabled(self.simulation.can_grow(), egui::Button::new("➕ Expand")).clicked() {
                self.simulation.grow();
            }

            if ui.add_enabled(self.simulation.can_shrink(), egui::Button::new("➖ Shrink")).clicked() {
                self.simulation.shrink();
            }

            if ui.button("🎲 Random").clicked() {
                self.simulation.randomize();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
                    if let Err(e) = self.simulation.load_pattern(pattern) {
                        tracing::warn!("Cannot apply pattern: {}", e);
                    }
                }
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.simulation.generation()));
        });

        ui.separator();

        // Speed control
        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = self.simulation.speed();
            if ui.add(egui::Slider::new(&mut speed, 0.5..=30.0).suffix(" gen/sec")).changed() {
                self.simulation.set_speed(speed);
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&self, ui: &mut egui::Ui) {
        let grid = lock_grid(self.simulation.grid());
        let size = grid.size();

        let total_size = Vec2::splat(BOARD_SIDE);
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
        let start_pos = response.rect.min;

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        if size > 0 {
            let box_size = (BOARD_SIDE + SPACING) / size as f32 - SPACING;

            for (row, cells) in grid.read().iter().enumerate() {
                for (col, &alive) in cells.iter().enumerate() {
                    let x = start_pos.x + col as f32 * (box_size + SPACING);
                    let y = start_pos.y + row as f32 * (box_size + SPACING);
                    let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                    let cell_color = if alive { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        let live_cells = grid.live_count();
        let total_cells = size * size;
        drop(grid);

        ui.separator();

        let population = if total_cells == 0 {
            0.0
        } else {
            live_cells as f32 / total_cells as f32 * 100.0
        };
        ui.horizontal(|ui| {
            ui.label(format!("Size: {size}x{size}"));
            ui.label(format!("Live cells: {}", live_cells));
            ui.label(format!("Dead cells: {}", total_cells - live_cells));
            ui.label(format!("Population: {:.1}%", population));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui, ctx);

            ui.separator();

            ui.label("Start runs one generation per tick; Expand and Shrink resize the board.");

            ui.separator();

            self.board(ui);
        });
    }
}
