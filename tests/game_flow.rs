// End-to-end games driven through the public API: a session, the figure
// and the result store working together without a terminal.

use std::time::Instant;

use hangman::games::hangman::figure::{segments, Figure};
use hangman::games::hangman::store::{
    GameResult, KeyValueStore, MemoryStore, ResultStore, HISTORY_KEY, WINS_KEY,
};
use hangman::games::hangman::{
    Difficulty, HangmanApp, HangmanMsg, Language, Outcome, Session, SessionId, Settings, Theme,
    Transition,
};
use hangman::Context;
use hangman::Game;

#[test]
fn winning_game_is_recorded() {
    let mut session = Session::new(SessionId(1), Language::English, Difficulty::Medium, "cat");
    let mut results = ResultStore::load(MemoryStore::new());

    let mut last = Transition::Ignored;
    for letter in ['c', 'a', 't'] {
        last = session.guess(letter);
    }
    assert_eq!(last, Transition::Won);
    assert_eq!(session.revealed(), &[Some('c'), Some('a'), Some('t')]);

    results.record_result(GameResult::Win, "cat", session.difficulty(), session.language());
    assert_eq!(results.totals().wins, 1);
    assert_eq!(results.totals().losses, 0);
    assert_eq!(results.history()[0].result, GameResult::Win);
    assert_eq!(results.store().get(WINS_KEY).unwrap().as_deref(), Some("1"));
    assert!(results.store().get(HISTORY_KEY).unwrap().unwrap().contains("\"Win\""));
}

#[test]
fn every_miss_adds_one_stroke_until_the_figure_is_complete() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let mut session = Session::new(SessionId(2), Language::English, difficulty, "jazz");
        let mut figure = Figure::new(difficulty);
        let now = Instant::now();

        for letter in "bcdefghiklmnopqrstuvwxy".chars() {
            match session.guess(letter) {
                Transition::Missed { step } | Transition::Lost { step } => {
                    assert!(figure.draw_step(step, now));
                }
                other => panic!("unexpected {other:?}"),
            }
            if session.outcome() == Outcome::Lost {
                break;
            }
        }

        assert_eq!(session.outcome(), Outcome::Lost);
        assert_eq!(figure.strokes().len(), segments(difficulty).len());
        assert_eq!(session.masked(), "j a z z");
    }
}

#[test]
fn hint_then_misses_share_the_budget() {
    let mut session = Session::new(SessionId(3), Language::Spanish, Difficulty::Hard, "luna");
    assert_eq!(session.use_hint(), Transition::Hinted { step: 1, lost: false });
    assert_eq!(session.guess('x'), Transition::Missed { step: 2 });
    assert_eq!(session.guess('l'), Transition::Revealed);
    assert_eq!(session.guess('y'), Transition::Missed { step: 3 });
    assert_eq!(session.guess('z'), Transition::Lost { step: 4 });
    assert_eq!(session.wrong_count(), session.max_wrong_guesses());
}

#[tokio::test]
async fn full_spanish_game_through_the_app() {
    let client = reqwest::Client::new();
    let mut app = HangmanApp::new(
        Settings { language: Language::Spanish, difficulty: Difficulty::Easy, theme: Theme::Light, sound: false },
        ResultStore::load(MemoryStore::new()),
        hangman::games::hangman::words::WordProvider::new(client.clone(), "http://127.0.0.1:9/"),
        hangman::games::hangman::dictionary::DefinitionProvider::new(client, "http://127.0.0.1:9/{word}"),
    );
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let ctx = Context::new(tx);

    app.on_start(&ctx);
    let msg = rx.recv().await.unwrap();
    assert!(matches!(msg, HangmanMsg::WordFetched { .. }));
    app.handle_message(msg, &ctx);

    let word = app.session().word().unwrap();
    for letter in word.chars() {
        app.guess(letter, &ctx);
    }
    assert_eq!(app.session().outcome(), Outcome::Won);
    assert_eq!(app.message(), "¡Ganaste!");
    assert_eq!(app.results().totals().wins, 1);
    assert_eq!(app.results().history()[0].word, word);

    let msg = rx.recv().await.unwrap();
    app.handle_message(msg, &ctx);
    assert!(app.definition().unwrap().starts_with("Definition: "));
}
