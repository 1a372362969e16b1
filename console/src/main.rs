use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use life_engine::{CellState, Config, Frontend, GameOfLife};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const ALIVE_GLYPH: char = 'O';
const DEAD_GLYPH: char = ' ';

/// Draws each generation as text inside a border.
struct Console<W: Write> {
    life: GameOfLife,
    out: W,
    tick: Duration,
    ansi: bool,
}

impl<W: Write> Console<W> {
    fn new(life: GameOfLife, out: W, tick: Duration) -> Self {
        Self {
            life,
            out,
            tick,
            ansi: true,
        }
    }

    /// Plain frames without terminal escape codes.
    fn plain(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn draw(&mut self) -> io::Result<()> {
        let grid = self.life.current();
        let border = format!("+{}+\n", "-".repeat(grid.cols()));

        let mut frame = String::with_capacity((grid.rows() + 3) * (grid.cols() + 3));
        if self.ansi {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&border);
        for row in grid.iter_rows() {
            frame.push('|');
            frame.extend(row.iter().map(|cell| match cell {
                CellState::Alive => ALIVE_GLYPH,
                CellState::Dead => DEAD_GLYPH,
            }));
            frame.push_str("|\n");
        }
        frame.push_str(&border);
        frame.push_str(&self.status());
        frame.push('\n');

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    fn status(&self) -> String {
        let generation = match self.life.max_generations() {
            Some(max) => format!("{}/{max}", self.life.generation()),
            None => self.life.generation().to_string(),
        };
        format!(
            "generation {generation}  population {}",
            self.life.current().population()
        )
    }

    fn run_loop(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;
            thread::sleep(self.tick);

            if self.life.is_finished() {
                break;
            }
            self.life.step();
        }
        Ok(())
    }
}

impl<W: Write> Frontend for Console<W> {
    fn run(&mut self) -> anyhow::Result<()> {
        if self.ansi {
            self.out.write_all(HIDE_CURSOR.as_bytes())?;
        }
        let result = self.run_loop();
        if self.ansi {
            self.out.write_all(SHOW_CURSOR.as_bytes())?;
            self.out.flush()?;
        }
        result.context("failed to draw to the terminal")?;

        if self.life.is_exhausted() {
            log::info!("reached the generation limit at {}", self.life.generation());
        } else {
            log::info!("grid settled at generation {}", self.life.generation());
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = Config::default().with_env_overrides().context("invalid LIFE_* setting")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.pattern = Some(PathBuf::from(path));
    }

    let life = config.build().context("failed to set up the simulation")?;
    log::info!("starting {}x{} console simulation", life.rows(), life.cols());

    let mut console = Console::new(life, io::stdout().lock(), config.tick);
    console.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(grid: &str) -> Console<Vec<u8>> {
        let life: GameOfLife = grid.parse().unwrap();
        Console::new(life, Vec::new(), Duration::ZERO).plain()
    }

    fn output(console: &Console<Vec<u8>>) -> String {
        String::from_utf8(console.out.clone()).unwrap()
    }

    #[test]
    fn frame_has_border_and_glyphs() {
        let mut console = console("010\n001\n");
        console.draw().unwrap();
        assert_eq!(
            output(&console),
            "+---+\n| O |\n|  O|\n+---+\ngeneration 1  population 2\n"
        );
    }

    #[test]
    fn status_shows_limit() {
        let life = GameOfLife::new(2, 2).with_max_generations(Some(50));
        let console = Console::new(life, Vec::new(), Duration::ZERO);
        assert_eq!(console.status(), "generation 1/50  population 0");
    }

    #[test]
    fn runs_until_settled() {
        // A block settles after one step.
        let mut console = console("110\n110\n000\n");
        console.run().unwrap();
        assert_eq!(console.life.generation(), 2);
        let frames = output(&console).matches("generation").count();
        assert_eq!(frames, 2);
    }

    #[test]
    fn empty_grid_draws_once() {
        let mut console = console("000\n000\n");
        console.run().unwrap();
        assert_eq!(console.life.generation(), 1);
        assert_eq!(output(&console).matches('+').count(), 4);
    }

    #[test]
    fn stops_at_generation_limit() {
        let life: GameOfLife = "00000\n00100\n00100\n00100\n00000\n".parse().unwrap();
        let mut console =
            Console::new(life.with_max_generations(Some(4)), Vec::new(), Duration::ZERO).plain();
        console.run().unwrap();
        assert_eq!(console.life.generation(), 4);
        assert!(console.life.is_exhausted());
    }

    #[test]
    fn ansi_mode_clears_and_restores_cursor() {
        let life = GameOfLife::new(1, 1);
        let mut console = Console::new(life, Vec::new(), Duration::ZERO);
        console.run().unwrap();
        let out = output(&console);
        assert!(out.starts_with(HIDE_CURSOR));
        assert!(out.contains(CLEAR_SCREEN));
        assert!(out.ends_with(SHOW_CURSOR));
    }
}
