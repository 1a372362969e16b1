//! The interface every front end implements.

use crate::life::GameOfLife;

pub trait Frontend {
    /// Drive the simulation until it finishes or the user quits.
    fn run(&mut self) -> anyhow::Result<()>;
}

/// Runs the simulation without drawing anything.
pub struct Headless {
    life: GameOfLife,
}

impl Headless {
    pub fn new(life: GameOfLife) -> Self {
        Self { life }
    }

    pub fn life(&self) -> &GameOfLife {
        &self.life
    }

    pub fn into_inner(self) -> GameOfLife {
        self.life
    }
}

impl Frontend for Headless {
    fn run(&mut self) -> anyhow::Result<()> {
        while !self.life.is_finished() {
            self.life.step();
        }
        log::debug!("headless run stopped at generation {}", self.life.generation());
        Ok(())
    }
}
