use std::io::BufRead;

use anyhow::Context;
use fieldsweep_core::*;

use crate::command::{Command, CommandError, HELP};
use crate::view::Presenter;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Feeds player commands to the engine and engine results to a presenter.
pub struct Session<P> {
    engine: MinefieldEngine,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    pub fn new(engine: MinefieldEngine, presenter: P) -> Self {
        Self { engine, presenter }
    }

    pub fn engine(&self) -> &MinefieldEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn into_presenter(self) -> P {
        self.presenter
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> anyhow::Result<()> {
        self.presenter.new_field(&self.engine.snapshot())?;

        for line in input.lines() {
            let line = line.context("Could not read command")?;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(err) => {
                    log::debug!("rejected input {:?}: {}", line, err);
                    self.presenter.message(&err.to_string())?;
                    continue;
                }
            };
            if self.handle(command)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> anyhow::Result<Flow> {
        log::trace!("command: {:?}", command);
        match command {
            Command::Reveal(x, y) => {
                let outcome = self.reveal(x, y);
                if outcome.is_loss() {
                    log::info!("struck a mine at ({}, {})", x, y);
                }
                self.presenter
                    .revealed((x, y), &outcome, &self.engine.snapshot())?;
            }
            Command::NewGame => {
                let snapshot = self.engine.generate();
                log::info!(
                    "new {}x{} field with {} mines",
                    snapshot.size.0,
                    snapshot.size.1,
                    snapshot.mine_count
                );
                self.presenter.new_field(&snapshot)?;
            }
            Command::Width(width) => self.update_config(|config| config.with_width(width))?,
            Command::Height(height) => self.update_config(|config| config.with_height(height))?,
            Command::Mines(mines) => self.update_config(|config| config.with_mine_count(mines))?,
            Command::Percent(percent) => {
                self.update_config(|config| config.with_mine_fraction(percent / 100.0))?
            }
            Command::Draw => self.presenter.draw(&self.engine.snapshot())?,
            Command::Snapshot => {
                let json = serde_json::to_string(&self.engine.snapshot())?;
                self.presenter.message(&json)?;
            }
            Command::Help => self.presenter.message(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Player coordinates may be negative; those can never be on the field.
    fn reveal(&mut self, x: i32, y: i32) -> RevealOutcome {
        match (Coord::try_from(x), Coord::try_from(y)) {
            (Ok(x), Ok(y)) => self.engine.reveal((x, y)),
            _ if self.engine.is_lost() => RevealOutcome::AlreadyLost,
            _ => RevealOutcome::InvalidPosition,
        }
    }

    fn update_config(&mut self, update: impl FnOnce(GameConfig) -> GameConfig) -> anyhow::Result<()> {
        let config = update(self.engine.config());
        self.engine.set_config(config);
        self.presenter.settings(&config)?;
        Ok(())
    }
}
