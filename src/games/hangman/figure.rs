//! Geometry and timing of the hanging figure.
//!
//! Coordinates use a 200×250 surface with the origin at the top left and y
//! growing downwards. The renderer flips them for the terminal canvas.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use crate::games::hangman::game::Difficulty;

pub const SURFACE_WIDTH: f64 = 200.0;
pub const SURFACE_HEIGHT: f64 = 250.0;
pub const STROKE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

const fn pt(x: f64, y: f64) -> Point {
    Point { x, y }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Arc { center: Point, radius: f64, start: f64, end: f64 },
    Line { from: Point, to: Point },
}

impl Primitive {
    /// The primitive drawn up to `progress` (0.0 to 1.0) of its length.
    pub fn partial(&self, progress: f64) -> Primitive {
        let t = progress.clamp(0.0, 1.0);
        match *self {
            Primitive::Arc { center, radius, start, end } => Primitive::Arc {
                center,
                radius,
                start,
                end: start + (end - start) * t,
            },
            Primitive::Line { from, to } => Primitive::Line {
                from,
                to: pt(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub label: &'static str,
    pub shape: Primitive,
}

const fn line(label: &'static str, from: Point, to: Point) -> Segment {
    Segment { label, shape: Primitive::Line { from, to } }
}

const BOTTOM: f64 = SURFACE_HEIGHT - 10.0;

pub const GALLOWS: [Primitive; 4] = [
    Primitive::Line { from: pt(10.0, BOTTOM), to: pt(190.0, BOTTOM) },
    Primitive::Line { from: pt(50.0, BOTTOM), to: pt(50.0, 10.0) },
    Primitive::Line { from: pt(50.0, 10.0), to: pt(150.0, 10.0) },
    Primitive::Line { from: pt(150.0, 10.0), to: pt(150.0, 40.0) },
];

const FIGURE: [Segment; 8] = [
    Segment {
        label: "head",
        shape: Primitive::Arc { center: pt(150.0, 60.0), radius: 20.0, start: 0.0, end: TAU },
    },
    line("body", pt(150.0, 80.0), pt(150.0, 140.0)),
    line("left arm", pt(150.0, 100.0), pt(130.0, 120.0)),
    line("right arm", pt(150.0, 100.0), pt(170.0, 120.0)),
    line("left leg", pt(150.0, 140.0), pt(130.0, 180.0)),
    line("right leg", pt(150.0, 140.0), pt(170.0, 180.0)),
    line("left hand", pt(130.0, 120.0), pt(120.0, 130.0)),
    line("right hand", pt(170.0, 120.0), pt(180.0, 130.0)),
];

/// Draw steps for a difficulty, one per wrong guess it allows.
pub fn segments(difficulty: Difficulty) -> &'static [Segment] {
    match difficulty {
        Difficulty::Easy => &FIGURE[..8],
        Difficulty::Medium => &FIGURE[..6],
        Difficulty::Hard => &FIGURE[..4],
    }
}

/// One segment being drawn. Progress is derived from the wall clock on
/// every frame, so a stroke needs no timer of its own.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub step: usize,
    pub segment: Segment,
    started: Instant,
    duration: Duration,
}

impl Stroke {
    pub fn new(step: usize, segment: Segment, started: Instant, duration: Duration) -> Self {
        Self { step, segment, started, duration }
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn current(&self, now: Instant) -> Primitive {
        self.segment.shape.partial(self.progress(now))
    }
}

/// The persistent drawing surface: gallows plus every step drawn so far.
#[derive(Debug, Clone)]
pub struct Figure {
    difficulty: Difficulty,
    strokes: Vec<Stroke>,
    duration: Duration,
}

impl Figure {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_duration(difficulty, STROKE_DURATION)
    }

    pub fn with_duration(difficulty: Difficulty, duration: Duration) -> Self {
        Self { difficulty, strokes: Vec::new(), duration }
    }

    /// Clears the surface back to the bare gallows.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.strokes.clear();
    }

    /// Starts drawing step `step` (1-indexed). Steps past the table or
    /// already on the surface are ignored.
    pub fn draw_step(&mut self, step: usize, now: Instant) -> bool {
        let table = segments(self.difficulty);
        if step == 0 || step > table.len() || self.strokes.iter().any(|s| s.step == step) {
            return false;
        }
        self.strokes.push(Stroke::new(step, table[step - 1], now, self.duration));
        true
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.strokes.iter().any(|s| !s.is_done(now))
    }

    /// Everything to paint at `now`, gallows first.
    pub fn primitives(&self, now: Instant) -> impl Iterator<Item = Primitive> + '_ {
        GALLOWS
            .iter()
            .copied()
            .chain(self.strokes.iter().map(move |s| s.current(now)))
    }
}
