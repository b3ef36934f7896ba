/// Core game interface: one game, one event loop, async jobs feeding back
/// into it as messages.
use std::future::Future;
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Handle passed to every game callback.
pub struct Context<M> {
    tx: UnboundedSender<M>,
}

impl<M: Send + 'static> Context<M> {
    pub fn new(tx: UnboundedSender<M>) -> Self {
        Self { tx }
    }

    /// Runs `job` on the runtime and delivers its result through
    /// [`Game::handle_message`]. Jobs are not cancelled; a game that may
    /// outlive a request should tag the result and check it on arrival.
    pub fn spawn<F>(&self, job: F)
    where
        F: Future<Output = M> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let msg = job.await;
            let _ = tx.send(msg);
        });
    }
}

/// Main game trait. All methods run on the engine loop, never concurrently.
pub trait Game {
    /// Results of background jobs.
    type Message: Send + 'static;

    /// Redraw interval while the screen changes on its own, e.g. during an
    /// animation. `None` means the game only redraws on input and messages.
    fn tick_rate(&self) -> Option<Duration> {
        None
    }

    fn on_start(&mut self, _ctx: &Context<Self::Message>) {}

    /// Returns `true` once per event that should ring the terminal bell.
    fn take_bell(&mut self) -> bool {
        false
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Message>);

    fn handle_message(&mut self, msg: Self::Message, ctx: &Context<Self::Message>);

    fn render(&self, frame: &mut ratatui::Frame);

    fn should_quit(&self) -> bool {
        false
    }
}
