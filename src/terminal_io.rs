use std::collections::HashMap;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use log::error;

use crate::rendering::GameGrid;
use crate::types::Vector2D;

/// A key counts as held while its last press or repeat is at most this many frames old.
/// Terminals without release events only report OS key-repeat, which arrives faster than this.
const HOLD_WINDOW_FRAMES: u64 = 8;

/// Longest step handed to the simulation, so a stalled terminal does not teleport entities.
const MAX_FRAME_DT: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseDown(Vector2D),
    Resize(u16, u16),
}

pub fn translate_event(event: Event, game_grid: &GameGrid) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, kind: KeyEventKind::Press, .. })
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(InputEvent::Quit)
        }
        Event::Key(KeyEvent { code, kind, .. }) => match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => Some(InputEvent::KeyDown(code)),
            KeyEventKind::Release => Some(InputEvent::KeyUp(code)),
        },
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
            Some(InputEvent::MouseDown(game_grid.world_of(column, row)))
        }
        Event::Resize(width, height) => Some(InputEvent::Resize(width, height)),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    key_frames: HashMap<KeyCode, u64>,
    frame: u64,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
        self.key_frames.retain(|_, last| frame.saturating_sub(*last) <= HOLD_WINDOW_FRAMES);
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(code) => {
                self.key_frames.insert(normalize(*code), self.frame);
            }
            InputEvent::KeyUp(code) => {
                self.key_frames.remove(&normalize(*code));
            }
            _ => {}
        }
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.key_frames
            .get(&normalize(code))
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW_FRAMES)
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Scripted run for the headless mode: fly, shoot, grab both power-ups and quit.
    pub fn demo_script() -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        events.insert(1, vec![Event::Key(KeyCode::Left.into())]);
        events.insert(2, vec![Event::Key(KeyCode::Left.into()), Event::Key(KeyCode::Char(' ').into())]);
        events.insert(20, vec![Event::Key(KeyCode::Char('g').into())]);
        events.insert(21, vec![Event::Key(KeyCode::Char(' ').into())]);
        events.insert(40, vec![Event::Key(KeyCode::Char('r').into())]);
        events.insert(41, vec![Event::Key(KeyCode::Right.into()), Event::Key(KeyCode::Char(' ').into())]);
        events.insert(600, vec![Event::Key(KeyCode::Char('q').into())]);
        SimulatedInput::new(events)
    }

    pub fn poll(&mut self, frame_count: u64) -> Vec<Event> {
        self.events.remove(&frame_count).unwrap_or_default()
    }
}

pub enum InputSource {
    Terminal,
    Simulated(SimulatedInput),
}

impl InputSource {
    pub fn poll_events(&mut self, frame_count: u64, game_grid: &GameGrid) -> io::Result<Vec<InputEvent>> {
        let raw = match self {
            InputSource::Simulated(sim_input) => sim_input.poll(frame_count),
            InputSource::Terminal => {
                let mut raw = Vec::new();
                while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
                    raw.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
                }
                raw
            }
        };
        Ok(raw.into_iter().filter_map(|event| translate_event(event, game_grid)).collect())
    }

    /// Blocks until a key or click arrives, for the static screens.
    pub fn wait_for_acknowledge(&mut self) -> io::Result<bool> {
        match self {
            InputSource::Simulated(_) => Ok(true),
            InputSource::Terminal => loop {
                match event::read()? {
                    Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                        if modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        return Ok(false);
                    }
                    Event::Key(KeyEvent { kind: KeyEventKind::Press, .. }) => return Ok(true),
                    Event::Mouse(MouseEvent { kind: MouseEventKind::Down(_), .. }) => return Ok(true),
                    _ => {}
                }
            },
        }
    }
}

pub struct FrameClock {
    last_tick: Instant,
    fixed_step: Option<f64>,
}

impl FrameClock {
    pub fn realtime() -> Self {
        FrameClock { last_tick: Instant::now(), fixed_step: None }
    }

    pub fn fixed(step: f64) -> Self {
        FrameClock { last_tick: Instant::now(), fixed_step: Some(step) }
    }

    pub fn tick(&mut self, target_fps: u32) -> f64 {
        if let Some(step) = self.fixed_step {
            return step;
        }
        let frame = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        dt.min(MAX_FRAME_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_expires_without_repeats() {
        let mut input = InputState::new();
        input.begin_frame(1);
        input.apply(&InputEvent::KeyDown(KeyCode::Left));
        input.begin_frame(1 + HOLD_WINDOW_FRAMES);
        assert!(input.is_pressed(KeyCode::Left));
        input.begin_frame(2 + HOLD_WINDOW_FRAMES);
        assert!(!input.is_pressed(KeyCode::Left));
    }

    #[test]
    fn release_clears_key_and_letters_ignore_case() {
        let mut input = InputState::new();
        input.apply(&InputEvent::KeyDown(KeyCode::Char('A')));
        assert!(input.is_pressed(KeyCode::Char('a')));
        input.apply(&InputEvent::KeyUp(KeyCode::Char('a')));
        assert!(!input.is_pressed(KeyCode::Char('A')));
    }

    #[test]
    fn mouse_click_is_mapped_to_world_space() {
        let grid = GameGrid::new(80, 24);
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: 12,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(translate_event(click, &grid), Some(InputEvent::MouseDown(Vector2D::new(400.0, 300.0))));
    }

    #[test]
    fn ctrl_c_means_quit() {
        let grid = GameGrid::new(80, 24);
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate_event(event, &grid), Some(InputEvent::Quit));
    }

    #[test]
    fn fixed_clock_reports_constant_step() {
        let mut clock = FrameClock::fixed(1.0 / 60.0);
        assert_eq!(clock.tick(60), 1.0 / 60.0);
        assert_eq!(clock.tick(60), 1.0 / 60.0);
    }
}
