use rand::Rng;

use crate::config::{
    AI_PADDLE_SPEED, HEIGHT, MAX_BALL_SPEED, PADDLE_BOUNCE_GAIN, PADDLE_SPEED, WIDTH,
};
use crate::game::{Ball, FrameEvents, Opponent, Paddle, PaddleInput, Session, Side};

/// Advance one frame of play: paddles, ball, walls, paddles again, scoring.
pub fn step<R: Rng + ?Sized>(
    session: &mut Session,
    input: PaddleInput,
    opponent: Opponent,
    rng: &mut R,
) -> FrameEvents {
    move_player(&mut session.left, input.left_up, input.left_down);
    match opponent {
        Opponent::Human => move_player(&mut session.right, input.right_up, input.right_down),
        Opponent::Ai => move_ai(&mut session.right, &session.ball),
    }

    session.ball.rect.x += session.ball.vx;
    session.ball.rect.y += session.ball.vy;

    let wall_bounce = bounce_walls(&mut session.ball);
    let paddle_hit = bounce_paddles(&mut session.ball, &session.left, &session.right);
    let scored = check_scoring(session, rng);

    FrameEvents { wall_bounce, paddle_hit, scored }
}

pub fn move_player(paddle: &mut Paddle, up: bool, down: bool) {
    if up {
        paddle.shift(-PADDLE_SPEED);
    }
    if down {
        paddle.shift(PADDLE_SPEED);
    }
}

/// Chase the ball's center, one unit slower than a player. No prediction.
pub fn move_ai(paddle: &mut Paddle, ball: &Ball) {
    let center = paddle.rect.center_y();
    let target = ball.rect.center_y();
    if center < target && paddle.rect.bottom() < HEIGHT {
        paddle.shift(AI_PADDLE_SPEED);
    } else if center > target && paddle.rect.top() > 0.0 {
        paddle.shift(-AI_PADDLE_SPEED);
    }
}

/// Reflect off the top or bottom wall. Only a ball heading into the wall is
/// flipped, so a ball still touching it on the next frame keeps its course.
pub fn bounce_walls(ball: &mut Ball) -> bool {
    let into_top = ball.rect.top() <= 0.0 && ball.vy < 0.0;
    let into_bottom = ball.rect.bottom() >= HEIGHT && ball.vy > 0.0;
    if into_top || into_bottom {
        ball.vy = -ball.vy;
        true
    } else {
        false
    }
}

/// Reflect off a paddle, speeding up by the bounce gain and clamping each
/// axis to the max speed. A ball overlapping a paddle while already moving
/// away from it is left alone.
pub fn bounce_paddles(ball: &mut Ball, left: &Paddle, right: &Paddle) -> bool {
    let hit_left = ball.vx < 0.0 && ball.rect.intersects(&left.rect);
    let hit_right = ball.vx > 0.0 && ball.rect.intersects(&right.rect);
    if !hit_left && !hit_right {
        return false;
    }
    ball.vx = (-ball.vx * PADDLE_BOUNCE_GAIN).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
    ball.vy = (ball.vy * PADDLE_BOUNCE_GAIN).clamp(-MAX_BALL_SPEED, MAX_BALL_SPEED);
    true
}

/// Award a point once the ball has fully left the screen sideways, then serve.
/// Paddles stay where they are.
pub fn check_scoring<R: Rng + ?Sized>(session: &mut Session, rng: &mut R) -> Option<Side> {
    let side = if session.ball.rect.right() <= 0.0 {
        Side::Right
    } else if session.ball.rect.left() >= WIDTH {
        Side::Left
    } else {
        return None;
    };
    session.score.increment(side);
    session.ball.serve(rng);
    Some(side)
}
