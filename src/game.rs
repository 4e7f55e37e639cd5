use crate::browser;
use crate::config::GameConfig;
use crate::engine::{self, input::KeyState, Game, LoopControl, Point, Rect, Renderer};
use crate::session::Session;
use crate::sprite::player::Direction;
use crate::sprite::{Sprite, Surface, BOARD_HEIGHT, BOARD_WIDTH};
use crate::storage::{HighScoreStore, LocalStorageHighScore, MemoryHighScore};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use web_sys::HtmlImageElement;

/// ┌──────────────────────── Frame Flow ─────────────────────────┐
/// │                                                             │
/// │  GameLoop (engine.rs)                                       │
/// │   ├─► drain keyup channel into KeyState                     │
/// │   ├─► Frogger::update(now, keys)                            │
/// │   │     ├─► arrow keys -> Player::handle_input              │
/// │   │     └─► Session::tick(now) -> Continue / Halt           │
/// │   └─► Frogger::draw -> Session::draw onto a Canvas          │
/// │                                                             │
/// └─────────────────────────────────────────────────────────────┘
pub enum Frogger {
    /// Images and config still loading
    Loading,
    /// Playing, or waiting on the play again prompt
    Loaded(Level),
}

pub struct Level {
    session: Session,
    images: Images,
}

type Images = HashMap<Sprite, HtmlImageElement>;

impl Frogger {
    const CONFIG_PATH: &'static str = "frogger.json";
    const PLAY_AGAIN: &'static str = "Time over. Do you want to play again?";

    pub fn new() -> Self {
        Frogger::Loading
    }

    /// All sprites in parallel, the game starts once every one is in
    async fn load_images() -> Result<Images> {
        let loads = Sprite::ALL.iter().map(|&sprite| async move {
            engine::load_image(sprite.path())
                .await
                .with_context(|| format!("Failed to load sprite image from : {}", sprite.path()))
                .map(|image| (sprite, image))
        });
        Ok(try_join_all(loads).await?.into_iter().collect())
    }

    fn open_high_scores(key: &str) -> Box<dyn HighScoreStore> {
        match LocalStorageHighScore::open(key) {
            Ok(store) => Box::new(store),
            Err(err) => {
                error!("High score will not outlive this page : {:#}", err);
                Box::new(MemoryHighScore::default())
            }
        }
    }

    fn ask_to_play_again(score: i32) -> bool {
        log!("Asking to play again after scoring {}", score);
        browser::confirm(Self::PLAY_AGAIN).unwrap_or_else(|err| {
            error!("Play again prompt failed : {:#}", err);
            false
        })
    }
}

impl Default for Frogger {
    fn default() -> Self {
        Frogger::new()
    }
}

#[async_trait(?Send)]
impl Game for Frogger {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Frogger::Loading => {
                let canvas = browser::canvas()?;
                canvas.set_width(BOARD_WIDTH as u32);
                canvas.set_height(BOARD_HEIGHT as u32);

                let (images, config) =
                    futures::join!(Self::load_images(), GameConfig::load(Self::CONFIG_PATH));
                let images = images?;
                let store = Self::open_high_scores(&config.high_score_key);
                let session = Session::new(
                    config,
                    StdRng::from_entropy(),
                    browser::now()?,
                    store,
                    Box::new(Self::ask_to_play_again),
                );
                Ok(Box::new(Frogger::Loaded(Level { session, images })))
            }
            Frogger::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, now: f64, keystate: &KeyState) -> LoopControl {
        match self {
            Frogger::Loading => LoopControl::Continue,
            Frogger::Loaded(level) => {
                for direction in keystate.released().filter_map(Direction::from_key_code) {
                    level.session.handle_input(direction);
                }
                level.session.tick(now)
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let Frogger::Loaded(level) = self {
            let canvas = Canvas {
                renderer,
                images: &level.images,
            };
            level.session.draw(&canvas);
        }
    }
}

/// Draws sprites by looking their images up by name
struct Canvas<'a> {
    renderer: &'a Renderer,
    images: &'a Images,
}

impl Canvas<'_> {
    const LABEL_MARGIN: f64 = 10.0;
    const LABEL_HEIGHT: f64 = 20.0;
    /// distance from a label's band top to its baseline
    const LABEL_ASCENT: f64 = 18.0;
}

impl Surface for Canvas<'_> {
    fn draw_sprite(&self, sprite: Sprite, position: Point) {
        match self.images.get(&sprite) {
            Some(image) => self.renderer.draw_image(image, &position),
            None => log!("Warning: no image loaded for {:?}", sprite),
        }
    }

    fn draw_label(&self, text: &str, baseline: f64) {
        self.renderer.clear(&Rect {
            x: 0.0,
            y: baseline - Self::LABEL_ASCENT,
            width: BOARD_WIDTH,
            height: Self::LABEL_HEIGHT,
        });
        self.renderer.draw_text(
            text,
            &Point {
                x: BOARD_WIDTH - Self::LABEL_MARGIN,
                y: baseline,
            },
        );
    }
}
