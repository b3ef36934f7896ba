use crate::{Context, Game};
use anyhow::Result;
use ratatui::DefaultTerminal;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Wake-up interval when the game does not ask for ticks, so input keeps
/// being polled.
const IDLE_POLL: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Drives the game until it asks to quit, then hands it back.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<G::Message>();
        let ctx = Context::new(tx);

        self.game.on_start(&ctx);
        info!("engine started");

        loop {
            if self.game.take_bell() {
                let mut out = std::io::stdout();
                out.write_all(b"\x07")?;
                out.flush()?;
            }
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking)
            if crossterm::event::poll(Duration::ZERO)? {
                if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                    self.game.handle_input(key, &ctx);
                }
            }
            if self.game.should_quit() {
                break;
            }

            let tick_rate = self.game.tick_rate();
            let tick_fused = tokio::time::sleep(tick_rate.unwrap_or(IDLE_POLL));

            tokio::select! {
                // Results of background jobs spawned through the context
                Some(msg) = rx.recv() => {
                    self.game.handle_message(msg, &ctx);
                }

                // Nothing to do; waking up redraws and polls input again
                _ = tick_fused => {}
            }
        }

        debug!("engine stopped");
        Ok(self.game)
    }
}
