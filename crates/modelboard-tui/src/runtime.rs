//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the only place side effects happen; `update` stays pure.

use std::io::Stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use modelboard_core::config::Config;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::state::AppState;
use crate::{render, terminal, update};

/// How long to wait for input before redrawing.
pub const POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
}

impl TuiRuntime {
    pub fn new(state: AppState) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        Ok(Self { terminal, state })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }

            if !event::poll(POLL_DURATION).context("Failed to poll terminal events")? {
                continue;
            }
            let event = event::read().context("Failed to read terminal event")?;
            let effects = update::update(&mut self.state, event);
            self.execute_effects(effects);
            dirty = true;
        }

        debug!("Browser closed");
        Ok(())
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::SaveLocale(locale) => {
                    if let Err(err) = Config::save_locale(locale) {
                        warn!(error = %format!("{err:#}"), "Failed to save locale");
                        self.state.status = Some(format!("{err:#}"));
                    }
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
