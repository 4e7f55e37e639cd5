use crate::browser;
use anyhow::{anyhow, Error, Result};
// web assembly is single threaded, so Rc RefCell over Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closures ourselves and know the expected type
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use self::input::KeyState;

/// What the loop should do after a tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoopControl {
    /// draw this frame and schedule the next one
    Continue,
    /// stop scheduling frames, the game is over for good
    Halt,
}

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `now` is the animation frame timestamp in milliseconds
    fn update(&mut self, now: f64, keystate: &KeyState) -> LoopControl;
    fn draw(&self, renderer: &Renderer);
}

pub struct GameLoop;

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// One update per animation frame with the raw frame timestamp; the game
    /// computes its own variable time step from it.
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut keyevent_receiver = input::prepare_input()?;
        let mut game = game.initialize().await?;
        let mut keystate = KeyState::new();
        let renderer = Renderer::new(browser::context()?);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            input::process_input(&mut keystate, &mut keyevent_receiver);
            let control = game.update(perf, &keystate);
            keystate.clear();
            match control {
                LoopControl::Continue => {
                    game.draw(&renderer);
                    if let Some(next) = f.borrow().as_ref() {
                        if let Err(err) = browser::request_animation_frame(next) {
                            error!("GameLoop: could not schedule next frame : {:#?}", err);
                        }
                    }
                }
                LoopControl::Halt => log!("GameLoop: halted"),
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    const LABEL_FONT: &'static str = "16pt Impact";

    /// Wraps the context and applies the label text settings once
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        context.set_font(Self::LABEL_FONT);
        context.set_text_align("end");
        context.set_fill_style_str("white");
        context.set_stroke_style_str("black");
        context.set_line_width(1.0);
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn draw_image(&self, image: &HtmlImageElement, position: &Point) {
        if let Err(err) = self
            .context
            .draw_image_with_html_image_element(image, position.x, position.y)
        {
            error!("Renderer: draw_image failed : {:#?}", err);
        }
    }

    /// Filled and outlined text, anchored at its right edge
    pub fn draw_text(&self, text: &str, position: &Point) {
        let filled = self.context.fill_text(text, position.x, position.y);
        let stroked = self.context.stroke_text(text, position.x, position.y);
        if let Err(err) = filled.and(stroked) {
            error!("Renderer: draw_text failed : {:#?}", err);
        }
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image: {:#?}",
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields the channel result
    // - second ? yields the image load result
    rx.await??;

    Ok(image)
}

pub mod input {
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    pub enum KeyPress {
        KeyUp(String),
    }

    /// Keys released since the previous frame, in arrival order
    #[derive(Debug, Default)]
    pub struct KeyState {
        released: Vec<String>,
    }

    impl KeyState {
        pub fn new() -> Self {
            KeyState::default()
        }

        pub fn released(&self) -> impl Iterator<Item = &str> {
            self.released.iter().map(String::as_str)
        }

        pub fn set_released(&mut self, code: &str) {
            self.released.push(code.to_string());
        }

        pub fn clear(&mut self) {
            self.released.clear();
        }
    }

    /// Listens for keyup on the document and forwards the key codes
    pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
        let (keyup_sender, keyevent_receiver) = unbounded();
        let onkeyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
            let _ = keyup_sender.unbounded_send(KeyPress::KeyUp(event.code()));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        browser::document()?.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        onkeyup.forget();

        Ok(keyevent_receiver)
    }

    pub fn process_input(state: &mut KeyState, keyevent_receiver: &mut UnboundedReceiver<KeyPress>) {
        // Ok(None) : channel closed, Err : nothing queued
        while let Ok(Some(event)) = keyevent_receiver.try_next() {
            match event {
                KeyPress::KeyUp(code) => state.set_released(&code),
            }
        }
    }

}
