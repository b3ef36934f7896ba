use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::games::hangman::dictionary::{DefinitionProvider, Purpose};
use crate::games::hangman::figure::Figure;
use crate::games::hangman::game::{Difficulty, Language, Session, SessionId, Transition};
use crate::games::hangman::i18n::messages;
use crate::games::hangman::renderer::{self, Theme};
use crate::games::hangman::store::{GameResult, KeyValueStore, ResultStore};
use crate::games::hangman::words::WordProvider;
use crate::{Context, Game};

/// Redraw rate while a stroke is animating.
const FRAME: Duration = Duration::from_millis(33);

/// Results of lookups, tagged with the session that asked for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangmanMsg {
    WordFetched { session: SessionId, word: String },
    DefinitionFetched { session: SessionId, purpose: Purpose, text: String },
}

/// Choices that survive restarts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    pub language: Language,
    pub difficulty: Difficulty,
    pub theme: Theme,
    /// Ring the terminal bell when a game ends.
    pub sound: bool,
}

pub struct HangmanApp<S> {
    settings: Settings,
    session: Session,
    last_id: u64,
    figure: Figure,
    results: ResultStore<S>,
    words: Arc<WordProvider>,
    definitions: Arc<DefinitionProvider>,
    message: String,
    definition: Option<String>,
    leaderboard_open: bool,
    bell: bool,
    quit: bool,
}

impl<S: KeyValueStore> HangmanApp<S> {
    pub fn new(
        settings: Settings,
        results: ResultStore<S>,
        words: WordProvider,
        definitions: DefinitionProvider,
    ) -> Self {
        Self {
            settings,
            session: Session::loading(SessionId(0), settings.language, settings.difficulty),
            last_id: 0,
            figure: Figure::new(settings.difficulty),
            results,
            words: Arc::new(words),
            definitions: Arc::new(definitions),
            message: String::new(),
            definition: None,
            leaderboard_open: false,
            bell: false,
            quit: false,
        }
    }

    /// Throws away the current game and asks for a new word. Anything still
    /// in flight for the old session is dropped when it arrives.
    pub fn start_session(&mut self, ctx: &Context<HangmanMsg>) {
        self.last_id += 1;
        let id = SessionId(self.last_id);
        let Settings { language, difficulty, .. } = self.settings;

        self.session = Session::loading(id, language, difficulty);
        self.figure.reset(difficulty);
        self.message.clear();
        self.definition = None;
        info!(session = id.0, %language, %difficulty, "session started");

        let words = Arc::clone(&self.words);
        ctx.spawn(async move {
            let word = words.next_word(language).await;
            HangmanMsg::WordFetched { session: id, word }
        });
    }

    pub fn guess(&mut self, letter: char, ctx: &Context<HangmanMsg>) {
        let now = Instant::now();
        match self.session.guess(letter) {
            Transition::Missed { step } => {
                self.figure.draw_step(step, now);
            }
            Transition::Won => self.finish(GameResult::Win, ctx),
            Transition::Lost { step } => {
                self.figure.draw_step(step, now);
                self.finish(GameResult::Loss, ctx);
            }
            Transition::Ignored | Transition::Revealed | Transition::Hinted { .. } => {}
        }
    }

    pub fn use_hint(&mut self, ctx: &Context<HangmanMsg>) {
        if let Transition::Hinted { step, lost } = self.session.use_hint() {
            self.figure.draw_step(step, Instant::now());
            debug!(session = self.session.id().0, lost, "hint used");
            if lost {
                // The end-of-game definition replaces the hint.
                self.finish(GameResult::Loss, ctx);
            } else {
                self.request_definition(Purpose::Hint, ctx);
            }
        }
    }

    fn finish(&mut self, result: GameResult, ctx: &Context<HangmanMsg>) {
        let word = self.session.word().unwrap_or_default();
        let text = messages(self.session.language());
        self.message = match result {
            GameResult::Win => text.win_message.to_string(),
            GameResult::Loss => format!("{}{}", text.lose_message, word),
        };
        self.bell = self.settings.sound;
        self.results.record_result(
            result,
            &word,
            self.session.difficulty(),
            self.session.language(),
        );
        self.request_definition(Purpose::Definition, ctx);
    }

    fn request_definition(&self, purpose: Purpose, ctx: &Context<HangmanMsg>) {
        let Some(word) = self.session.word() else {
            return;
        };
        let session = self.session.id();
        let language = self.session.language();
        let definitions = Arc::clone(&self.definitions);
        ctx.spawn(async move {
            let text = definitions.define(&word, language, purpose).await;
            HangmanMsg::DefinitionFetched { session, purpose, text }
        });
    }

    fn set_language(&mut self, language: Language, ctx: &Context<HangmanMsg>) {
        self.settings.language = language;
        self.start_session(ctx);
    }

    fn set_difficulty(&mut self, difficulty: Difficulty, ctx: &Context<HangmanMsg>) {
        self.settings.difficulty = difficulty;
        self.start_session(ctx);
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn results(&self) -> &ResultStore<S> {
        &self.results
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn leaderboard_open(&self) -> bool {
        self.leaderboard_open
    }
}

impl<S: KeyValueStore> Game for HangmanApp<S> {
    type Message = HangmanMsg;

    fn tick_rate(&self) -> Option<Duration> {
        self.figure.is_animating(Instant::now()).then_some(FRAME)
    }

    fn on_start(&mut self, ctx: &Context<Self::Message>) {
        self.start_session(ctx);
    }

    fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Message>) {
        if event.kind != KeyEventKind::Press {
            return;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        if !event.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            return;
        }
        if self.leaderboard_open {
            if matches!(event.code, KeyCode::Esc | KeyCode::F(3)) {
                self.leaderboard_open = false;
            }
            return;
        }
        match event.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::F(1) => self.use_hint(ctx),
            KeyCode::F(2) => self.start_session(ctx),
            KeyCode::F(3) => self.leaderboard_open = true,
            KeyCode::F(4) => self.set_language(self.settings.language.next(), ctx),
            KeyCode::F(5) => self.set_difficulty(self.settings.difficulty.next(), ctx),
            KeyCode::F(6) => self.settings.theme = self.settings.theme.toggle(),
            KeyCode::F(7) => self.settings.sound = !self.settings.sound,
            KeyCode::Char(c) if self.session.language().accepts(c) => self.guess(c, ctx),
            _ => {}
        }
    }

    fn handle_message(&mut self, msg: Self::Message, _ctx: &Context<Self::Message>) {
        match msg {
            HangmanMsg::WordFetched { session, word } => {
                if session != self.session.id() {
                    debug!(stale = session.0, current = self.session.id().0, "dropping late word");
                    return;
                }
                self.session.install_word(&word);
                debug!(session = session.0, len = word.chars().count(), "word installed");
            }
            HangmanMsg::DefinitionFetched { session, purpose, text } => {
                if session != self.session.id() {
                    debug!(stale = session.0, current = self.session.id().0, "dropping late definition");
                    return;
                }
                if purpose == Purpose::Hint && self.session.outcome().is_terminal() {
                    debug!(session = session.0, "dropping hint for a finished game");
                    return;
                }
                self.definition = Some(format!("{}{}", purpose.prefix(), text));
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::render(frame, self);
    }

    fn should_quit(&self) -> bool {
        self.quit
    }
}
