// ┌──────────────────────────────────────────────────────────────────────────┐
// │                          Board Layout (505 x 606)                        │
// ├──────────┬───────────────────────────────────────────────────────────────┤
// │ row 0    │ water  - goal row, reaching it scores and sends player home   │
// │ row 1..3 │ stone  - enemy lanes, gem spawns                              │
// │ row 4..5 │ grass  - player starts on row 5                               │
// └──────────┴───────────────────────────────────────────────────────────────┘
// - columns are 101px wide, rows 83px tall
// - sprites sit 25px above their row so they look planted on the tile

pub mod enemy;
pub mod gem;
pub mod player;

use crate::engine::Point;
use rand::RngCore;

pub const COL_WIDTH: f64 = 101.0;
pub const ROW_HEIGHT: f64 = 83.0;
pub const NUM_ROWS: usize = 6;
pub const NUM_COLS: usize = 5;
pub const BOARD_WIDTH: f64 = COL_WIDTH * NUM_COLS as f64;
pub const BOARD_HEIGHT: f64 = 606.0;
pub const SPRITE_OFFSET: f64 = 25.0;
/// Row the player starts on
pub const START_ROW: i32 = 5;
/// Rows enemies run along and gems spawn on
pub const LANES: [i32; 3] = [1, 2, 3];

/// Where a sprite sitting on `(col, row)` is drawn
pub fn grid_position(col: i32, row: i32) -> Point {
    Point {
        x: f64::from(col) * COL_WIDTH,
        y: f64::from(row) * ROW_HEIGHT - SPRITE_OFFSET,
    }
}

/// Every image the game draws
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sprite {
    StoneBlock,
    WaterBlock,
    GrassBlock,
    EnemyBug,
    CharBoy,
    GemBlue,
    GemGreen,
    GemOrange,
}

impl Sprite {
    pub const ALL: [Sprite; 8] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::EnemyBug,
        Sprite::CharBoy,
        Sprite::GemBlue,
        Sprite::GemGreen,
        Sprite::GemOrange,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::CharBoy => "images/char-boy.png",
            Sprite::GemBlue => "images/Gem%20Blue.png",
            Sprite::GemGreen => "images/Gem%20Green.png",
            Sprite::GemOrange => "images/Gem%20Orange.png",
        }
    }
}

/// Anything the scene can be drawn onto
pub trait Surface {
    fn draw_sprite(&self, sprite: Sprite, position: Point);
    /// Right aligned label, its band is cleared before drawing
    fn draw_label(&self, text: &str, baseline: f64);
}

/// The slice of game state entities are allowed to change
pub trait ScoreKeeper {
    fn change_score(&mut self, delta: i32);
    fn change_time(&mut self, seconds: f64);
}

/// Everything an entity may touch during one update
pub struct Frame<'a> {
    /// seconds since the previous tick
    pub dt: f64,
    pub rng: &'a mut dyn RngCore,
    pub scores: &'a mut dyn ScoreKeeper,
}

/// Shared update/render contract for enemies, the gem and the player
pub trait Entity {
    fn update(&mut self, frame: &mut Frame<'_>);
    fn position(&self) -> Point;
    fn sprite(&self) -> Sprite;

    fn render(&self, surface: &dyn Surface) {
        surface.draw_sprite(self.sprite(), self.position());
    }
}

/// Same row, and x ranges within one column width of each other
pub fn overlaps(a: Point, b: Point) -> bool {
    a.y == b.y && a.x - COL_WIDTH <= b.x && a.x + COL_WIDTH >= b.x
}
