// ui.rs - Interactive egui window over a Session

use conway::{PATTERNS, Session, Step};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use tracing::info;

pub fn run(session: Session, update_interval: Duration) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    let app = LifeApp::new(session, update_interval);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("window closed with error: {err}"))
}

pub struct LifeApp {
    session: Session,
    is_running: bool,
    last_update: Instant,
    update_interval: Duration,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    board_text: String,
    load_error: Option<String>,
}

impl LifeApp {
    fn new(session: Session, update_interval: Duration) -> Self {
        let board_text = session.encode();
        Self {
            session,
            is_running: false,
            last_update: Instant::now(),
            update_interval,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            board_text,
            load_error: None,
        }
    }

    fn load_text(&mut self) {
        match conway::try_decode(self.board_text.trim()) {
            Ok(board) => {
                self.session.load(board);
                self.load_error = None;
            }
            Err(err) => self.load_error = Some(err.to_string()),
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            if let Step::Reseeded { period } = self.session.advance() {
                info!(period, "short cycle, reseeded");
            }
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.session.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.session.reseed();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    let board = self.session.board();
                    let placed = PATTERNS[self.selected_pattern].place(board.width(), board.height());
                    self.session.load(placed);
                }

                ui.separator();
                ui.label(format!("Generation: {}", self.session.generation()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                let mut depth = self.session.depth();
                ui.label("Cycle depth:");
                if ui.add(egui::DragValue::new(&mut depth).clamp_range(0..=conway::config::MAX_DEPTH)).changed() {
                    self.session.set_depth(depth);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.horizontal(|ui| {
                ui.label("Board:");
                ui.text_edit_singleline(&mut self.board_text);
                if ui.button("Save").clicked() {
                    self.board_text = self.session.encode();
                    ui.output_mut(|o| o.copied_text = self.board_text.clone());
                }
                if ui.button("Load").clicked() {
                    self.is_running = false;
                    self.load_text();
                }
            });
            if let Some(err) = &self.load_error {
                ui.colored_label(Color32::LIGHT_RED, err);
            }

            ui.separator();

            ui.label("Click cells to toggle them alive/dead. Use Start/Pause to run the simulation.");

            ui.separator();

            let board = self.session.board();
            let (width, height) = (board.width(), board.height());
            let spacing = 0.5;
            let box_size = (750.0 / width.max(height).max(1) as f32 - spacing).max(2.0);
            let pitch = box_size + spacing;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * width as f32 - spacing, pitch * height as f32 - spacing);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for y in 0..height {
                for x in 0..width {
                    let rect = Rect::from_min_size(
                        egui::pos2(start_pos.x + x as f32 * pitch, start_pos.y + y as f32 * pitch),
                        Vec2::splat(box_size),
                    );
                    let cell_color = if board.cell(x, y) { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, cell_color);
                    if box_size >= 6.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            let population = board.population();
            let total = (width * height).max(1);

            // Handle clicking (only when not running)
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - start_pos;
                    if offset.x >= 0.0 && offset.y >= 0.0 {
                        self.session.toggle((offset.x / pitch) as usize, (offset.y / pitch) as usize);
                    }
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {population}"));
                ui.label(format!("Dead cells: {}", total - population));
                ui.label(format!("Population: {:.1}%", population as f32 / total as f32 * 100.0));
                ui.label(format!("Reseeds: {}", self.session.reseeds()));
            });
        });

        // Keep the animation going while running
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
