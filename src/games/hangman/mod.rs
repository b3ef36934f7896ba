/// Hangman: one player, one word, a figure that grows with every miss.
pub mod app;
pub mod dictionary;
pub mod figure;
pub mod game;
pub mod i18n;
pub mod renderer;
pub mod store;
pub mod words;

pub use app::{HangmanApp, HangmanMsg, Settings};
pub use game::{Difficulty, Language, LetterStatus, Outcome, Session, SessionId, Transition};
pub use renderer::Theme;
