pub mod physics;

use rand::Rng;

use crate::config::{
    BALL_SIZE, HEIGHT, INITIAL_BALL_SPEED, PADDLE_HEIGHT, PADDLE_MARGIN, PADDLE_WIDTH, WIDTH,
};

/// Axis-aligned rectangle in logical screen units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 { self.x }
    pub fn right(&self) -> f32 { self.x + self.w }
    pub fn top(&self) -> f32 { self.y }
    pub fn bottom(&self) -> f32 { self.y + self.h }
    pub fn center_x(&self) -> f32 { self.x + self.w / 2.0 }
    pub fn center_y(&self) -> f32 { self.y + self.h / 2.0 }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    /// Strict overlap; rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            rect: Rect::new(x, (HEIGHT - PADDLE_HEIGHT) / 2.0, PADDLE_WIDTH, PADDLE_HEIGHT),
        }
    }

    /// Move vertically by `dy`, then clamp to the screen.
    pub fn shift(&mut self, dy: f32) {
        self.rect.y = (self.rect.y + dy).clamp(0.0, HEIGHT - self.rect.h);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    pub fn centered() -> Self {
        Self {
            rect: Rect::new(
                (WIDTH - BALL_SIZE) / 2.0,
                (HEIGHT - BALL_SIZE) / 2.0,
                BALL_SIZE,
                BALL_SIZE,
            ),
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Re-center with a fresh random-sign velocity on both axes.
    pub fn serve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Ball::centered();
        self.vx = INITIAL_BALL_SPEED * random_sign(rng);
        self.vy = INITIAL_BALL_SPEED * random_sign(rng);
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

/// Held paddle controls for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// How the right paddle is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opponent {
    Ai,
    Human,
}

/// What happened during one physics step. The app turns these into sounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub wall_bounce: bool,
    pub paddle_hit: bool,
    pub scored: Option<Side>,
}

/// Mutable state of one play session.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut session = Self {
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball: Ball::centered(),
            score: Score::default(),
        };
        session.ball.serve(rng);
        session
    }

    /// Center the paddles, zero the score and serve.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Session::new(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rect_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.intersects(&touching), "shared edge is not an overlap");
        assert!(a.intersects(&overlapping));
        assert!(a.contains(0.0, 9.9));
        assert!(!a.contains(10.0, 5.0));
    }

    #[test]
    fn test_paddle_shift_is_clamped() {
        let mut paddle = Paddle::new(Side::Left);
        paddle.shift(-10_000.0);
        assert_eq!(paddle.rect.top(), 0.0);
        paddle.shift(10_000.0);
        assert_eq!(paddle.rect.bottom(), HEIGHT);
    }

    #[test]
    fn test_new_session_is_centered_and_served() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let session = Session::new(&mut rng);
            assert_eq!(session.score, Score::default());
            assert_eq!(session.left.rect.center_y(), HEIGHT / 2.0);
            assert_eq!(session.right.rect.center_y(), HEIGHT / 2.0);
            assert_eq!(session.ball.rect.center_x(), WIDTH / 2.0);
            assert_eq!(session.ball.vx.abs(), INITIAL_BALL_SPEED);
            assert_eq!(session.ball.vy.abs(), INITIAL_BALL_SPEED);
        }
    }

    #[test]
    fn test_serve_randomizes_both_signs() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ball = Ball::centered();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            ball.serve(&mut rng);
            seen.insert((ball.vx > 0.0, ball.vy > 0.0));
        }
        assert_eq!(seen.len(), 4, "every direction should come up eventually");
    }

    #[test]
    fn test_reset_zeroes_score_and_recenters_paddles() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(&mut rng);
        session.score = Score { left: 3, right: 5 };
        session.left.shift(-200.0);
        session.right.shift(200.0);

        session.reset(&mut rng);

        assert_eq!(session.score, Score::default());
        assert_eq!(session.left, Paddle::new(Side::Left));
        assert_eq!(session.right, Paddle::new(Side::Right));
    }
}
