use crate::config::GameConfig;
use crate::engine::{LoopControl, Point};
use crate::sprite::enemy::Enemy;
use crate::sprite::gem::Gem;
use crate::sprite::player::{Direction, Player};
use crate::sprite::{
    overlaps, Entity, Frame, ScoreKeeper, Sprite, Surface, COL_WIDTH, LANES, NUM_COLS, NUM_ROWS,
    ROW_HEIGHT,
};
use crate::storage::HighScoreStore;
use crate::util::to_time_string;
use rand::rngs::StdRng;

/// Tile for each board row, top to bottom
const ROW_TILES: [Sprite; NUM_ROWS] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

const SCORE_BASELINE: f64 = 26.0;
const HIGH_SCORE_BASELINE: f64 = 46.0;

/// Asked with the final score once the clock runs out, `true` plays again
pub type RestartPrompt = Box<dyn FnMut(i32) -> bool>;

/// Score and clock of the current game
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scoreboard {
    score: i32,
    /// seconds left
    time: f64,
}

impl Scoreboard {
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

impl ScoreKeeper for Scoreboard {
    fn change_score(&mut self, delta: i32) {
        self.score += delta;
    }

    fn change_time(&mut self, seconds: f64) {
        self.time += seconds;
    }
}

/// What the player ran into this tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    None,
    /// index into the enemy list
    Enemy(usize),
    Gem,
}

/// Owns every entity plus score, clock and high score, advanced one tick
/// per animation frame.
///
/// Tick order:
/// 1. time up -> save high score, ask to restart (reset) or halt
/// 2. dt from the previous tick
/// 3. enemies, gem, then player update
/// 4. collisions, at most one per tick
/// 5. clock runs down, never below 0
pub struct Session {
    config: GameConfig,
    rng: StdRng,
    enemies: Vec<Enemy>,
    player: Player,
    gem: Gem,
    scoreboard: Scoreboard,
    last_tick: f64,
    highest_score: i32,
    store: Box<dyn HighScoreStore>,
    restart: RestartPrompt,
}

impl Session {
    /// A fresh game, ready for its first tick
    pub fn new(
        config: GameConfig,
        rng: StdRng,
        now: f64,
        store: Box<dyn HighScoreStore>,
        restart: RestartPrompt,
    ) -> Self {
        let highest_score = store.load().unwrap_or_else(|err| {
            error!("Could not read high score : {:#}", err);
            0
        });
        let mut session = Session {
            config,
            rng,
            enemies: Vec::new(),
            player: Player::default(),
            gem: Gem::default(),
            scoreboard: Scoreboard::default(),
            last_tick: now,
            highest_score,
            store,
            restart,
        };
        session.reset(now);
        session
    }

    /// New enemies, player and gem, score 0 and a full clock
    pub fn reset(&mut self, now: f64) {
        let crossing_ms = self.config.crossing_ms();
        let per_lane = self.config.enemies_per_lane;
        let rng = &mut self.rng;
        self.enemies = LANES
            .iter()
            .flat_map(|&lane| std::iter::repeat(lane).take(per_lane))
            .map(|lane| Enemy::new(lane, crossing_ms, rng))
            .collect();
        self.player = Player::new(&mut self.rng);
        self.gem = Gem::new(&mut self.rng);
        self.scoreboard = Scoreboard {
            score: 0,
            time: self.config.round_seconds,
        };
        self.last_tick = now;
        log!(
            "New game : {} enemies, {}s on the clock",
            self.enemies.len(),
            self.scoreboard.time
        );
    }

    pub fn tick(&mut self, now: f64) -> LoopControl {
        if self.scoreboard.time <= 0.0 {
            let score = self.scoreboard.score;
            log!("Time over, final score {}", score);
            self.save_highest_score();
            if (self.restart)(score) {
                self.reset(now);
            } else {
                return LoopControl::Halt;
            }
        }

        // a frame stamped before the last tick does not run time backwards
        let mut dt = ((now - self.last_tick) / 1000.0).max(0.0);
        if let Some(max) = self.config.max_frame_seconds {
            dt = dt.min(max);
        }

        self.update_entities(dt);
        self.check_collisions();

        self.scoreboard.time = (self.scoreboard.time - dt).max(0.0);
        self.last_tick = now;
        LoopControl::Continue
    }

    pub fn handle_input(&mut self, direction: Direction) {
        self.player.handle_input(direction);
    }

    pub fn change_score(&mut self, delta: i32) {
        self.scoreboard.change_score(delta);
    }

    pub fn change_time(&mut self, seconds: f64) {
        self.scoreboard.change_time(seconds);
    }

    fn update_entities(&mut self, dt: f64) {
        let mut frame = Frame {
            dt,
            rng: &mut self.rng,
            scores: &mut self.scoreboard,
        };
        for enemy in self.enemies.iter_mut() {
            enemy.update(&mut frame);
        }
        self.gem.update(&mut frame);
        self.player.update(&mut frame);
    }

    /// First overlapping enemy wins, the gem only counts when no enemy hit
    pub fn check_collisions(&mut self) -> Collision {
        let player = self.player.position();
        let hit = self
            .enemies
            .iter()
            .position(|enemy| overlaps(player, enemy.position()));

        if let Some(index) = hit {
            self.player.do_collide(&mut self.scoreboard);
            return Collision::Enemy(index);
        }
        if overlaps(player, self.gem.position()) {
            self.gem.do_collide(&mut self.scoreboard, &mut self.rng);
            return Collision::Gem;
        }
        Collision::None
    }

    /// Stores the current score if it beats the stored one, returns whether it did
    pub fn save_highest_score(&mut self) -> bool {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(err) => {
                error!("Could not read high score : {:#}", err);
                self.highest_score
            }
        };
        let best = stored.max(self.highest_score);
        if self.scoreboard.score <= best {
            self.highest_score = best;
            return false;
        }

        self.highest_score = self.scoreboard.score;
        log!("New high score {}", self.highest_score);
        if let Err(err) = self.store.save(self.highest_score) {
            error!("Could not save high score : {:#}", err);
        }
        true
    }

    /// Background, entities, then the score labels
    pub fn draw(&self, surface: &dyn Surface) {
        for (row, tile) in ROW_TILES.iter().enumerate() {
            for col in 0..NUM_COLS {
                let position = Point {
                    x: col as f64 * COL_WIDTH,
                    y: row as f64 * ROW_HEIGHT,
                };
                surface.draw_sprite(*tile, position);
            }
        }

        for entity in self.entities() {
            entity.render(surface);
        }

        surface.draw_label(&self.score_label(), SCORE_BASELINE);
        surface.draw_label(&self.high_score_label(), HIGH_SCORE_BASELINE);
    }

    /// Draw order: enemies, gem, player on top
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.enemies
            .iter()
            .map(|enemy| enemy as &dyn Entity)
            .chain(std::iter::once(&self.gem as &dyn Entity))
            .chain(std::iter::once(&self.player as &dyn Entity))
    }

    pub fn score_label(&self) -> String {
        format!(
            "Score: {}, Time: {}",
            self.scoreboard.score,
            to_time_string(self.scoreboard.time)
        )
    }

    pub fn high_score_label(&self) -> String {
        format!("Highest score: {}", self.highest_score)
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn highest_score(&self) -> i32 {
        self.highest_score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn gem(&self) -> &Gem {
        &self.gem
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }
}
