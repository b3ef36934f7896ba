/// Hangman screen: header, figure canvas, word, keyboard, messages and the
/// leaderboard overlay.
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Painter, Shape};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::games::hangman::app::HangmanApp;
use crate::games::hangman::figure::{Figure, Point, Primitive, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::games::hangman::game::{LetterStatus, Outcome, Session};
use crate::games::hangman::i18n::messages;
use crate::games::hangman::store::{GameRecord, GameResult, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                correct: Color::Green,
                wrong: Color::Red,
                muted: Color::DarkGray,
                stroke: Color::Black,
            },
            Theme::Dark => Palette {
                text: Color::White,
                background: Color::Black,
                accent: Color::Cyan,
                correct: Color::LightGreen,
                wrong: Color::LightRed,
                muted: Color::Gray,
                stroke: Color::White,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    pub accent: Color,
    pub correct: Color,
    pub wrong: Color,
    pub muted: Color,
    pub stroke: Color,
}

/// Partial or full circle, painted as sampled points.
struct ArcShape {
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
    color: Color,
}

impl Shape for ArcShape {
    fn draw(&self, painter: &mut Painter) {
        let sweep = self.end - self.start;
        let samples = ((sweep.abs() * self.radius).ceil() as usize).max(1) * 2;
        for i in 0..=samples {
            let angle = self.start + sweep * (i as f64 / samples as f64);
            let (x, y) = flip(Point {
                x: self.center.x + self.radius * angle.cos(),
                y: self.center.y + self.radius * angle.sin(),
            });
            if let Some((px, py)) = painter.get_point(x, y) {
                painter.paint(px, py, self.color);
            }
        }
    }
}

/// Surface coordinates grow downwards, the canvas grows upwards.
fn flip(p: Point) -> (f64, f64) {
    (p.x, SURFACE_HEIGHT - p.y)
}

pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &HangmanApp<S>) {
    let palette = app.settings().theme.palette();
    let session = app.session();
    let text = messages(session.language());

    frame.render_widget(
        Block::default().style(Style::default().fg(palette.text).bg(palette.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app, palette);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(chunks[1]);
    render_figure(frame, body[0], app.figure(), palette);
    render_word_panel(frame, body[1], app, palette);

    render_keyboard(frame, chunks[2], session, palette);

    frame.render_widget(
        Paragraph::new(text.help)
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center),
        chunks[3],
    );

    if app.leaderboard_open() {
        render_leaderboard(frame, app.results().history(), session, palette);
    }
}

fn render_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &HangmanApp<S>, palette: Palette) {
    let settings = app.settings();
    let text = messages(settings.language);
    let totals = app.results().totals();
    let line = Line::from(vec![
        Span::styled(text.title, Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::raw(format!("{}{}", text.wins_label, totals.wins)),
        Span::raw(" | "),
        Span::raw(format!("{}{}", text.losses_label, totals.losses)),
        Span::raw("   "),
        Span::styled(
            format!(
                "{}{}  ·  {}  ·  {}",
                text.language_label,
                settings.language.name(),
                settings.difficulty,
                settings.theme
            ),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_figure(frame: &mut Frame, area: Rect, figure: &Figure, palette: Palette) {
    let now = Instant::now();
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .marker(Marker::Braille)
        .background_color(palette.background)
        .x_bounds([0.0, SURFACE_WIDTH])
        .y_bounds([0.0, SURFACE_HEIGHT])
        .paint(move |ctx| {
            for primitive in figure.primitives(now) {
                match primitive {
                    Primitive::Line { from, to } => {
                        let (x1, y1) = flip(from);
                        let (x2, y2) = flip(to);
                        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, palette.stroke));
                    }
                    Primitive::Arc { center, radius, start, end } => {
                        ctx.draw(&ArcShape { center, radius, start, end, color: palette.stroke });
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn render_word_panel<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &HangmanApp<S>, palette: Palette) {
    let session = app.session();
    let text = messages(session.language());

    let word = if session.is_loading() {
        Line::styled(text.loading, Style::default().fg(palette.muted))
    } else {
        let color = match session.outcome() {
            Outcome::InProgress => palette.text,
            Outcome::Won => palette.correct,
            Outcome::Lost => palette.wrong,
        };
        Line::styled(session.masked(), Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let mut lines = vec![
        word,
        Line::raw(""),
        Line::styled(
            format!("{}/{}", session.wrong_count(), session.max_wrong_guesses()),
            Style::default().fg(palette.muted),
        ),
        Line::raw(""),
    ];
    if !app.message().is_empty() {
        lines.push(Line::styled(
            app.message().to_string(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(""));
    }
    if let Some(definition) = app.definition() {
        lines.push(Line::raw(definition.to_string()));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_keyboard(frame: &mut Frame, area: Rect, session: &Session, palette: Palette) {
    let finished = session.outcome().is_terminal();
    let spans: Vec<Span> = session
        .language()
        .keyboard()
        .chars()
        .flat_map(|letter| {
            let style = match session.status(letter) {
                LetterStatus::Correct => Style::default().fg(palette.correct).add_modifier(Modifier::BOLD),
                LetterStatus::Wrong => Style::default().fg(palette.wrong).add_modifier(Modifier::CROSSED_OUT),
                LetterStatus::Unguessed if finished => Style::default().fg(palette.muted),
                LetterStatus::Unguessed => Style::default().fg(palette.text),
            };
            [Span::styled(letter.to_string(), style), Span::raw(" ")]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_leaderboard(frame: &mut Frame, history: &[GameRecord], session: &Session, palette: Palette) {
    let text = messages(session.language());
    let area = centered(frame.area(), 80, 70);
    let block = Block::default()
        .title(format!(" {} ", text.leaderboard_title))
        .borders(Borders::ALL)
        .style(Style::default().fg(palette.text).bg(palette.background));

    frame.render_widget(Clear, area);

    if history.is_empty() {
        frame.render_widget(
            Paragraph::new(text.no_games).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let header = Row::new(["Date", "Result", "Word", "Difficulty", "Language"])
        .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD));
    let rows = history.iter().map(|record| {
        let color = match record.result {
            GameResult::Win => palette.correct,
            GameResult::Loss => palette.wrong,
        };
        Row::new([
            Cell::from(record.date.clone()),
            Cell::from(record.result.label()).style(Style::default().fg(color)),
            Cell::from(record.word.clone()),
            Cell::from(record.difficulty.to_string()),
            Cell::from(record.language.to_string()),
        ])
    });
    let widths = [
        Constraint::Length(20),
        Constraint::Length(7),
        Constraint::Min(10),
        Constraint::Length(11),
        Constraint::Length(9),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::app::Settings;
    use crate::games::hangman::dictionary::DefinitionProvider;
    use crate::games::hangman::game::{Difficulty, Language};
    use crate::games::hangman::store::{GameResult, MemoryStore, ResultStore};
    use crate::{Context, Game};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use crate::games::hangman::words::WordProvider;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn flip_inverts_y() {
        assert_eq!(flip(Point { x: 10.0, y: 240.0 }), (10.0, 10.0));
    }

    #[test]
    fn theme_parses_and_toggles() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn draws_the_loading_screen() {
        let client = reqwest::Client::new();
        let app = HangmanApp::new(
            Settings { language: Language::French, difficulty: Difficulty::Easy, theme: Theme::Light, sound: false },
            ResultStore::load(MemoryStore::new()),
            WordProvider::new(client.clone(), "http://127.0.0.1:9/word"),
            DefinitionProvider::new(client, "http://127.0.0.1:9/{word}"),
        );
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Jeu du Pendu"));
        assert!(screen.contains("Recherche d'un mot..."));
    }

    #[test]
    fn leaderboard_lists_games_oldest_first() {
        let mut results = ResultStore::load(MemoryStore::new());
        results.record_result(GameResult::Win, "perro", Difficulty::Easy, Language::Spanish);
        results.record_result(GameResult::Loss, "gato", Difficulty::Hard, Language::Spanish);

        let client = reqwest::Client::new();
        let mut app = HangmanApp::new(
            Settings { language: Language::Spanish, difficulty: Difficulty::Easy, theme: Theme::Dark, sound: false },
            results,
            WordProvider::new(client.clone(), "http://127.0.0.1:9/word"),
            DefinitionProvider::new(client, "http://127.0.0.1:9/{word}"),
        );
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        app.handle_input(KeyEvent::new(KeyCode::F(3), KeyModifiers::NONE), &Context::new(tx));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        let first = screen.find("perro").unwrap();
        let second = screen.find("gato").unwrap();
        assert!(first < second);
    }
}
