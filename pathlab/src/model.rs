//! Elm-architecture Model implementation for the terminal frontend.

use std::time::Duration;

use pathlab_core::Point;
use pathlab_term::{
    AttrMask, Effect, Key, Model, MouseAction, Msg, Screen, ScreenCell, Style,
};

use crate::colors::*;
use crate::session::{Mode, Session};
use crate::snapshot::path_mask;
use crate::tile::Tile;

/// Terminal columns per grid cell.
const CELL_WIDTH: i32 = 2;

/// Narrowest screen that fits the status and help lines.
const MIN_WIDTH: i32 = 64;

const HELP_LINE: &str = " s/e/w mode  click paint  r run  c clear  m maze  q quit";

/// The terminal lab: a [`Session`] plus animation timing.
pub struct LabModel {
    session: Session,
    step_delay: Duration,
    /// Last cell painted by the current drag, so one drag paints a cell once.
    drag_last: Option<Point>,
    notice: Option<&'static str>,
}

impl LabModel {
    pub fn new(session: Session, step_delay: Duration) -> Self {
        Self {
            session,
            step_delay,
            drag_last: None,
            notice: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Screen size needed for the grid plus the status and help lines.
    pub fn screen_size(&self) -> (i32, i32) {
        let n = self.session.size();
        ((n * CELL_WIDTH).max(MIN_WIDTH), n + 2)
    }

    /// Grid cell under a screen position, if any.
    fn cell_at(&self, pos: Point) -> Option<Point> {
        let n = self.session.size();
        let p = Point::new(pos.x.div_euclid(CELL_WIDTH), pos.y);
        (pos.x >= 0 && pos.y >= 0 && p.x < n && p.y < n).then_some(p)
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        let accepted = match key {
            Key::Char('s') => self.session.set_mode(Mode::Start),
            Key::Char('e') => self.session.set_mode(Mode::End),
            Key::Char('w') => self.session.set_mode(Mode::Wall),
            Key::Char('c') => self.session.clear(),
            Key::Char('m') => self.session.generate_maze(),
            Key::Char('r') | Key::Enter => {
                if self.session.run() {
                    self.notice = None;
                    return Some(Effect::Tick(self.step_delay));
                }
                if !self.session.is_running() {
                    self.notice = Some("place a start and an end first");
                }
                return None;
            }
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            _ => return None,
        };
        if accepted {
            self.notice = None;
        }
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Main => {
                self.drag_last = self.cell_at(pos);
                if let Some(p) = self.drag_last {
                    self.paint(p);
                }
            }
            MouseAction::Drag if self.session.mode() == Mode::Wall => {
                let cell = self.cell_at(pos);
                if cell.is_some() && cell != self.drag_last {
                    self.drag_last = cell;
                    if let Some(p) = cell {
                        self.paint(p);
                    }
                }
            }
            // Start and end move by click only.
            MouseAction::Drag => {}
            MouseAction::Release => self.drag_last = None,
        }
    }

    fn paint(&mut self, p: Point) {
        if self.session.click_cell(p.x, p.y) {
            self.notice = None;
        }
    }

    fn handle_tick(&mut self) -> Option<Effect> {
        let step = self.session.advance()?;
        (!step.is_terminal()).then_some(Effect::Tick(self.step_delay))
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    fn draw_grid(&self, screen: &mut Screen) {
        let on_path = path_mask(&self.session);
        for (i, (p, cell)) in self.session.grid().iter().enumerate() {
            let [left, right] = Tile::of(cell, on_path[i]).screen_cells();
            screen.set(Point::new(p.x * CELL_WIDTH, p.y), left);
            screen.set(Point::new(p.x * CELL_WIDTH + 1, p.y), right);
        }
    }

    fn draw_status(&self, screen: &mut Screen) {
        let y = self.session.size();
        let style = Style::default().with_fg(FG_EMPH).with_bg(BG_STATUS);
        for x in 0..screen.width() {
            screen.set(Point::new(x, y), ScreenCell::default().with_style(style));
        }

        let stats = self.session.stats();
        let status = format!(
            " mode: {}  {}  expanded: {}  open: {}  path: {}",
            self.session.mode(),
            self.session.state(),
            stats.expanded,
            stats.open,
            stats.path_len
        );
        screen.print(Point::new(0, y), &status, style);

        // A notice takes the help line's place until the next accepted intent.
        match self.notice {
            Some(notice) => {
                let style = Style::default()
                    .with_fg(FG_NOTICE)
                    .with_attrs(AttrMask::BOLD);
                screen.print(Point::new(1, y + 1), notice, style);
            }
            None => {
                let help = Style::default().with_fg(FG_DIM);
                screen.print(Point::new(0, y + 1), HELP_LINE, help);
            }
        }
    }
}

impl Model for LabModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key } => self.handle_key(key),
            Msg::Mouse { action, pos } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Tick => self.handle_tick(),
            Msg::Quit => Some(Effect::End),
            Msg::Init | Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(ScreenCell::default().with_style(Style::default().with_fg(FG).with_bg(BG)));
        self.draw_grid(screen);
        self.draw_status(screen);
    }
}
