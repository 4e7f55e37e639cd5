use super::{grid_position, Entity, Frame, Sprite, BOARD_WIDTH, COL_WIDTH};
use crate::engine::Point;
use rand::Rng;

/// A bug running left to right along one lane, forever
#[derive(Debug, Clone)]
pub struct Enemy {
    pub(crate) position: Point,
    /// milliseconds to cross the whole board
    crossing_ms: f64,
}

impl Enemy {
    /// x where an enemy enters (and re-enters) the board
    pub const START_X: f64 = -COL_WIDTH;

    /// Enemy entering `lane` with a crossing time drawn from `crossing_ms`
    pub fn new<R: Rng + ?Sized>(lane: i32, crossing_ms: (u32, u32), rng: &mut R) -> Self {
        let (min, max) = crossing_ms;
        let crossing: u32 = rng.gen_range(min..=max);
        Enemy {
            position: Point {
                x: Self::START_X,
                y: grid_position(0, lane).y,
            },
            crossing_ms: f64::from(crossing),
        }
    }

    #[cfg(test)]
    fn crossing_ms(&self) -> f64 {
        self.crossing_ms
    }

    /// pixels per second
    fn velocity(&self) -> f64 {
        BOARD_WIDTH / (self.crossing_ms / 1000.0)
    }
}

impl Entity for Enemy {
    fn update(&mut self, frame: &mut Frame<'_>) {
        let x = self.position.x + self.velocity() * frame.dt;
        // off the right edge -> back to the left
        self.position.x = if x > BOARD_WIDTH { Self::START_X } else { x };
    }

    fn position(&self) -> Point {
        self.position
    }

    fn sprite(&self) -> Sprite {
        Sprite::EnemyBug
    }
}
