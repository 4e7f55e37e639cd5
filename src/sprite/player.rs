use super::{
    grid_position, Entity, Frame, ScoreKeeper, Sprite, BOARD_WIDTH, COL_WIDTH, NUM_COLS,
    ROW_HEIGHT, START_ROW,
};
use crate::engine::Point;
use crate::util::random_int_inclusive;
use rand::Rng;

// scoring rules
const GOAL_BONUS: i32 = 200;
const HIT_SCORE_PENALTY: i32 = 50;
const HIT_TIME_PENALTY: f64 = 10.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// Arrow keys only, everything else is ignored
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Direction::Left),
            "ArrowUp" => Some(Direction::Up),
            "ArrowRight" => Some(Direction::Right),
            "ArrowDown" => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub(crate) position: Point,
    initial_y: f64,
}

impl Default for Player {
    /// Leftmost column of the start row
    fn default() -> Self {
        let position = grid_position(0, START_ROW);
        Player {
            position,
            initial_y: position.y,
        }
    }
}

impl Player {
    /// Random column on the start row
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let col = random_int_inclusive(rng, 0, NUM_COLS as i32 - 1);
        let mut player = Player::default();
        player.position.x = grid_position(col, START_ROW).x;
        player
    }

    pub fn initial_y(&self) -> f64 {
        self.initial_y
    }

    /// Moves one cell right away; the board edges are enforced on `update`
    pub fn handle_input(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.position.x -= COL_WIDTH,
            Direction::Up => self.position.y -= ROW_HEIGHT,
            Direction::Right => self.position.x += COL_WIDTH,
            Direction::Down => self.position.y += ROW_HEIGHT,
        }
    }

    /// Hit by an enemy: back to the start row, keep the column
    pub fn do_collide(&mut self, scores: &mut dyn ScoreKeeper) {
        self.position.y = self.initial_y;
        scores.change_score(-HIT_SCORE_PENALTY);
        scores.change_time(-HIT_TIME_PENALTY);
    }
}

impl Entity for Player {
    fn update(&mut self, frame: &mut Frame<'_>) {
        let last_col = BOARD_WIDTH - COL_WIDTH;
        if self.position.x <= 0.0 {
            self.position.x = 0.0;
        }
        if self.position.x >= BOARD_WIDTH {
            self.position.x = last_col;
        }

        if self.position.y <= 0.0 {
            self.position.y = 0.0;
        }
        if self.position.y > self.initial_y {
            self.position.y = self.initial_y;
        }

        // made it to the water
        if self.position.y == 0.0 {
            self.position.y = self.initial_y;
            frame.scores.change_score(GOAL_BONUS);
        }
    }

    fn position(&self) -> Point {
        self.position
    }

    fn sprite(&self) -> Sprite {
        Sprite::CharBoy
    }
}
