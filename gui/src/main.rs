use anyhow::Context;
use eframe::egui;
use eframe::egui::{ScrollArea, Ui};
use eframe::run_native;
use life_engine::{CellState, Config, Frontend, GameOfLife};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

const GRID_ROWS: usize = 30;
const GRID_COLS: usize = 40;
const CELL_SIZE: f32 = 20.0;
const TICKS_PER_SECOND: u64 = 10;

/// State shared between the window and the ticker thread.
struct Simulation {
    life: GameOfLife,
    paused: bool,
    save_dir: PathBuf,
    status: String,
}

impl Simulation {
    fn new(life: GameOfLife, save_dir: PathBuf) -> Self {
        Self {
            life,
            paused: false,
            save_dir,
            status: String::new(),
        }
    }

    /// Advance one generation unless paused or finished. Returns whether the grid moved.
    fn tick(&mut self) -> bool {
        if self.paused || self.life.is_finished() {
            return false;
        }
        self.life.step();
        if self.life.is_exhausted() {
            log::info!("reached the generation limit at {}", self.life.generation());
        }
        true
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Toggle the cell under a point given in grid-local pixels.
    fn toggle_at(&mut self, x: f32, y: f32) -> Option<CellState> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / CELL_SIZE) as usize;
        let row = (y / CELL_SIZE) as usize;
        self.life.toggle(row, col).ok()
    }

    fn save(&mut self) {
        match self.life.save_snapshot(&self.save_dir) {
            Ok(path) => {
                log::info!("saved snapshot to {}", path.display());
                self.status = format!("saved {}", path.display());
            }
            Err(err) => {
                log::warn!("failed to save snapshot: {err}");
                self.status = format!("save failed: {err}");
            }
        }
    }

    fn summary(&self) -> String {
        let state = if self.paused {
            "paused"
        } else if self.life.is_exhausted() {
            "generation limit reached"
        } else if !self.life.has_changed() {
            "settled"
        } else {
            "running"
        };
        format!(
            "generation {}  population {}  {state}",
            self.life.generation(),
            self.life.current().population()
        )
    }
}

fn lock(simulation: &Mutex<Simulation>) -> MutexGuard<'_, Simulation> {
    simulation.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Windowed front end.
struct Gui {
    simulation: Arc<Mutex<Simulation>>,
    tick: Duration,
    seed: Option<u64>,
}

impl Gui {
    fn new(life: GameOfLife, config: &Config) -> Self {
        Self {
            simulation: Arc::new(Mutex::new(Simulation::new(life, config.save_dir.clone()))),
            tick: config.tick,
            seed: config.seed,
        }
    }
}

impl Frontend for Gui {
    fn run(&mut self) -> anyhow::Result<()> {
        let (rows, cols) = {
            let simulation = lock(&self.simulation);
            (simulation.life.rows(), simulation.life.cols())
        };
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([
                (CELL_SIZE * cols as f32 + 40.0).max(480.0),
                CELL_SIZE * rows as f32 + 120.0,
            ]),
            ..Default::default()
        };

        let shared = Arc::clone(&self.simulation);
        let tick = self.tick;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        run_native(
            "Game of Life",
            options,
            Box::new(move |cc| {
                let ctx = cc.egui_ctx.clone();
                let ticker = Arc::clone(&shared);

                // Background thread advancing the simulation
                thread::spawn(move || loop {
                    thread::sleep(tick);
                    if lock(&ticker).tick() {
                        ctx.request_repaint();
                    }
                });

                Ok(Box::new(GuiOfLife::new(shared, rng)))
            }),
        )
        .map_err(|err| anyhow::anyhow!("window closed with an error: {err}"))
    }
}

struct GuiOfLife {
    simulation: Arc<Mutex<Simulation>>,
    rng: StdRng,
}

impl GuiOfLife {
    fn new(simulation: Arc<Mutex<Simulation>>, rng: StdRng) -> Self {
        Self { simulation, rng }
    }

    fn controls(&mut self, ui: &mut Ui) {
        let mut simulation = lock(&self.simulation);
        ui.horizontal(|ui| {
            let label = if simulation.paused { "Resume" } else { "Pause" };
            if ui.button(label).clicked() {
                simulation.toggle_pause();
            }
            if ui.button("Step").clicked() {
                simulation.life.step();
            }
            if ui.button("Randomize").clicked() {
                simulation.life.randomize(&mut self.rng);
            }
            if ui.button("Clear").clicked() {
                simulation.life.clear();
            }
            if ui.button("Save").clicked() {
                simulation.save();
            }
        });
        ui.label(simulation.summary());
        if !simulation.status.is_empty() {
            ui.label(simulation.status.as_str());
        }
    }

    fn create_grid(&mut self, ui: &mut Ui) {
        let mut simulation = lock(&self.simulation);
        let grid = simulation.life.current();

        // Calculate the grid starting point
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(CELL_SIZE * grid.cols() as f32, CELL_SIZE * grid.rows() as f32),
            egui::Sense::click(),
        );

        // Draw each cell at its calculated position
        let painter = ui.painter();
        for (row_index, row) in grid.iter_rows().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let pos = rect.min + egui::vec2(col_index as f32 * CELL_SIZE, row_index as f32 * CELL_SIZE);

                let color = if cell.is_alive() {
                    egui::Color32::WHITE
                } else {
                    egui::Color32::DARK_GRAY
                };

                painter.rect_filled(
                    egui::Rect::from_min_size(pos, egui::vec2(CELL_SIZE - 1.0, CELL_SIZE - 1.0)),
                    CELL_SIZE / 4f32,
                    color,
                );
            }
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let offset = pointer - rect.min;
                simulation.toggle_at(offset.x, offset.y);
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (space, save) = ctx.input(|input| {
            (input.key_pressed(egui::Key::Space), input.key_pressed(egui::Key::S))
        });
        if space || save {
            let mut simulation = lock(&self.simulation);
            if space {
                simulation.toggle_pause();
            }
            if save {
                simulation.save();
            }
        }
    }
}

impl eframe::App for GuiOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                ui.heading("Game of Life");
                self.controls(ui);
                self.create_grid(ui);
            });
        });
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = Config {
        rows: GRID_ROWS,
        cols: GRID_COLS,
        max_generations: None,
        randomize: false,
        tick: Duration::from_millis(1000 / TICKS_PER_SECOND),
        ..Config::default()
    }
    .with_env_overrides()
    .context("invalid LIFE_* setting")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.pattern = Some(PathBuf::from(path));
    }

    let life = config.build().context("failed to set up the simulation")?;
    log::info!("starting {}x{} windowed simulation", life.rows(), life.cols());

    Gui::new(life, &config).run()
}
