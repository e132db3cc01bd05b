//! JavaScript bindings (WASM only)
//!
//! Structured values cross the boundary as JSON strings; the UI layer owns
//! rendering and pointer events.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::consts::TICK_INTERVAL_MS;
use crate::finance::{FinanceTracker, NewTransaction, TransactionKind, TransactionPatch};
use crate::persistence::Storage;
use crate::platform::web::{Interval, load_image};
use crate::puzzle::{
    ContainerRect, DragResult, DragTracker, GameConfig, IntervalId, Location, MoveOutcome,
    PuzzleGame,
};
use crate::settings::{Theme, ThemePreference, system_prefers_dark};

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed
        return;
    }
    log::info!("Budget Jigsaw starting...");
}

/// Set `data-theme` on the document root
fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

#[wasm_bindgen]
pub struct FinanceApp {
    tracker: FinanceTracker,
    theme: ThemePreference,
}

#[wasm_bindgen]
impl FinanceApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FinanceApp {
        let storage = Storage::browser();
        let theme = ThemePreference::load(storage.clone(), system_prefers_dark());
        apply_theme(theme.theme());
        FinanceApp {
            tracker: FinanceTracker::load(storage),
            theme,
        }
    }

    pub fn transactions(&self) -> Result<String, JsValue> {
        to_json(self.tracker.transactions.list())
    }

    pub fn categories(&self) -> Result<String, JsValue> {
        to_json(self.tracker.categories.list())
    }

    pub fn summary(&self) -> Result<String, JsValue> {
        to_json(&self.tracker.summary())
    }

    /// Returns the new transaction id
    pub fn add_transaction(
        &mut self,
        kind: &str,
        amount: f64,
        category: String,
        date: Option<String>,
        description: Option<String>,
    ) -> Result<String, JsValue> {
        let kind = TransactionKind::from_str(kind)
            .ok_or_else(|| js_err(format!("unknown transaction type '{kind}'")))?;
        let mut new = NewTransaction::new(kind, amount, category)
            .described(description.unwrap_or_default());
        if let Some(date) = date.filter(|d| !d.is_empty()) {
            new = new.on(date.parse().map_err(js_err)?);
        }
        let tx = self.tracker.transactions.add(new).map_err(js_err)?;
        Ok(tx.id.clone())
    }

    /// `patch` is a JSON object with any of type/amount/category/date/description
    pub fn update_transaction(&mut self, id: &str, patch: &str) -> Result<bool, JsValue> {
        let patch: TransactionPatch = serde_json::from_str(patch).map_err(js_err)?;
        self.tracker.transactions.update(id, patch).map_err(js_err)
    }

    pub fn delete_transaction(&mut self, id: &str) -> bool {
        self.tracker.transactions.delete(id)
    }

    pub fn clear_transactions(&mut self) {
        self.tracker.transactions.clear();
    }

    pub fn add_category(&mut self, name: String) -> bool {
        self.tracker.categories.add(name)
    }

    pub fn remove_category(&mut self, name: &str) -> bool {
        self.tracker.categories.remove(name)
    }

    pub fn reset_categories(&mut self) {
        self.tracker.categories.reset();
    }

    pub fn export_json(&self) -> Result<String, JsValue> {
        self.tracker.export_json().map_err(js_err)
    }

    pub fn export_file_name(&self) -> String {
        self.tracker.export_file_name()
    }

    /// Rejects with the parse error message on failure
    pub fn import_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.tracker.import_json(json).map(|_| ()).map_err(js_err)
    }

    pub fn clear_all(&mut self) {
        self.tracker.clear_all();
    }

    pub fn theme(&self) -> String {
        self.theme.theme().as_str().to_string()
    }

    pub fn set_theme(&mut self, theme: &str) -> Result<(), JsValue> {
        let theme = Theme::from_str(theme)
            .ok_or_else(|| js_err(format!("unknown theme '{theme}'")))?;
        self.theme.set(theme);
        apply_theme(theme);
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> String {
        let theme = self.theme.toggle();
        apply_theme(theme);
        theme.as_str().to_string()
    }
}

impl Default for FinanceApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Game plus the browser interval currently driving its timer
struct Session {
    game: PuzzleGame,
    drag: DragTracker,
    interval: Option<(IntervalId, Interval)>,
}

/// Make the browser interval match the game timer: clear it when the timer
/// stopped, replace it when the timer was restarted.
fn sync_timer(session: &Rc<RefCell<Session>>) {
    let wanted = session.borrow().game.active_interval();
    let current = session.borrow().interval.as_ref().map(|(id, _)| *id);
    if wanted == current {
        return;
    }

    // Dropping the old interval clears it before a new one is armed
    session.borrow_mut().interval = None;
    let Some(id) = wanted else {
        return;
    };

    let weak: Weak<RefCell<Session>> = Rc::downgrade(session);
    let tick = move || {
        if let Some(session) = weak.upgrade() {
            session.borrow_mut().game.tick(id);
        }
    };
    match Interval::every(TICK_INTERVAL_MS, tick) {
        Ok(interval) => session.borrow_mut().interval = Some((id, interval)),
        Err(err) => log::error!("Failed to start timer: {err:?}"),
    }
}

fn outcome_label(outcome: MoveOutcome) -> &'static str {
    match outcome {
        MoveOutcome::NotFound => "not_found",
        MoveOutcome::Pinned => "pinned",
        MoveOutcome::Moved {
            completed: true, ..
        } => "completed",
        MoveOutcome::Moved { snapped: true, .. } => "snapped",
        MoveOutcome::Moved { .. } => "moved",
    }
}

fn parse_location(location: &str) -> Result<Location, JsValue> {
    Location::from_str(location).ok_or_else(|| js_err(format!("unknown location '{location}'")))
}

fn container(rect: &web_sys::DomRect) -> ContainerRect {
    ContainerRect::new(rect.left() as f32, rect.top() as f32)
}

#[wasm_bindgen]
pub struct PuzzleApp {
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl PuzzleApp {
    /// Resume the saved game, if any
    #[wasm_bindgen(constructor)]
    pub fn new() -> PuzzleApp {
        let game = PuzzleGame::restore(Storage::browser(), GameConfig::default());
        PuzzleApp {
            session: Rc::new(RefCell::new(Session {
                game,
                drag: DragTracker::new(),
                interval: None,
            })),
        }
    }

    /// Decode and attach an image; resolves once it is ready
    pub fn upload_image(&self, url: String) -> js_sys::Promise {
        let session = self.session.clone();
        future_to_promise(async move {
            let image = load_image(&url).await?;
            session.borrow_mut().game.upload_image(image);
            sync_timer(&session);
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn start_puzzle(&self, difficulty: u32) -> Result<(), JsValue> {
        self.session
            .borrow_mut()
            .game
            .start_puzzle(difficulty)
            .map_err(js_err)?;
        sync_timer(&self.session);
        Ok(())
    }

    pub fn reset(&self) {
        {
            let mut session = self.session.borrow_mut();
            session.game.reset();
            session.drag.cancel();
        }
        sync_timer(&self.session);
    }

    /// Returns one of `moved`, `snapped`, `completed`, `pinned`, `not_found`
    pub fn move_piece(&self, id: u32, location: &str, x: f32, y: f32) -> Result<String, JsValue> {
        let location = parse_location(location)?;
        let outcome = self
            .session
            .borrow_mut()
            .game
            .move_piece(id, location, Vec2::new(x, y));
        sync_timer(&self.session);
        Ok(outcome_label(outcome).to_string())
    }

    pub fn toggle_preview(&self) -> bool {
        self.session.borrow_mut().game.toggle_preview()
    }

    pub fn state(&self) -> Result<String, JsValue> {
        to_json(self.session.borrow().game.state())
    }

    /// Fraction of pieces placed, 0.0 - 1.0
    pub fn progress(&self) -> f32 {
        self.session.borrow().game.state().progress()
    }

    pub fn high_scores(&self) -> Result<String, JsValue> {
        to_json(self.session.borrow().game.high_scores())
    }

    /// Leaderboard entries for one piece count, fastest first
    pub fn high_scores_for(&self, difficulty: u32) -> Result<String, JsValue> {
        let session = self.session.borrow();
        let scores = session.game.high_scores();
        let entries: Vec<_> = scores.for_difficulty(difficulty).collect();
        to_json(&entries)
    }

    /// Returns false if the piece does not exist
    pub fn drag_start(
        &self,
        id: u32,
        pointer_x: f32,
        pointer_y: f32,
        rect: &web_sys::DomRect,
    ) -> bool {
        let mut session = self.session.borrow_mut();
        let Some(pos) = session.game.state().piece(id).map(|p| p.pos) else {
            return false;
        };
        session
            .drag
            .start(id, pos, Vec2::new(pointer_x, pointer_y), container(rect));
        true
    }

    /// Current piece position `[x, y]`, empty when not dragging
    pub fn drag_update(
        &self,
        pointer_x: f32,
        pointer_y: f32,
        rect: &web_sys::DomRect,
    ) -> Vec<f32> {
        self.session
            .borrow_mut()
            .drag
            .update(Vec2::new(pointer_x, pointer_y), container(rect))
            .map(|p| vec![p.x, p.y])
            .unwrap_or_default()
    }

    /// Drop the dragged piece into `location`
    pub fn drag_end(&self, location: &str) -> Result<String, JsValue> {
        let location = parse_location(location)?;
        let ended = self.session.borrow_mut().drag.end();
        let Some(result) = ended else {
            return Ok(outcome_label(MoveOutcome::NotFound).to_string());
        };
        let DragResult { piece_id, position } = result;
        self.move_piece(piece_id, location.as_str(), position.x, position.y)
    }

    pub fn drag_cancel(&self) {
        self.session.borrow_mut().drag.cancel();
    }
}

impl Default for PuzzleApp {
    fn default() -> Self {
        Self::new()
    }
}
