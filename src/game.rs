use std::io;

use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assets::{Assets, Sprite};
use crate::constants::TARGET_FPS;
use crate::error::GameError;
use crate::rendering::{GameGrid, OutputTarget};
use crate::session::{Session, SessionOutcome};
use crate::terminal_io::{FrameClock, InputEvent, InputSource, InputState};
use crate::waves::Waves;

pub struct Game {
    pub game_grid: GameGrid,
    pub stdout_target: OutputTarget,
    input: InputSource,
    clock: FrameClock,
    max_frames: Option<u64>,
    seed: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        input: InputSource,
        clock: FrameClock,
        max_frames: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        Game {
            game_grid: GameGrid::new(terminal_width, terminal_height),
            stdout_target,
            input,
            clock,
            max_frames,
            seed,
        }
    }

    pub fn run(&mut self, assets: &Assets) -> Result<SessionOutcome, GameError> {
        if !self.stdout_target.is_headless() && !self.show_title_screen(assets)? {
            return Ok(SessionOutcome::Quit);
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Session::new(Waves::campaign(), rng)?;
        let outcome = self.game_loop(&mut session, assets)?;
        info!("Session ended: {:?}, score {}", outcome, session.score);

        match outcome {
            SessionOutcome::Won => self.show_end_screen(&assets.victory, session.score)?,
            SessionOutcome::Lost => self.show_end_screen(&assets.defeat, session.score)?,
            SessionOutcome::Quit | SessionOutcome::Running => {}
        }
        Ok(outcome)
    }

    fn game_loop(&mut self, session: &mut Session, assets: &Assets) -> Result<SessionOutcome, GameError> {
        let mut input_state = InputState::new();
        let mut frame_count: u64 = 0;

        loop {
            if self.max_frames.is_some_and(|max| frame_count >= max) {
                info!("Frame limit reached after {} frames.", frame_count);
                return Ok(SessionOutcome::Quit);
            }

            let dt = self.clock.tick(TARGET_FPS);
            input_state.begin_frame(frame_count);
            let events = self.input.poll_events(frame_count, &self.game_grid)?;
            for event in &events {
                input_state.apply(event);
                if let InputEvent::Resize(width, height) = event {
                    info!("Terminal resized to {}x{}", width, height);
                    self.game_grid.resize(*width, *height);
                }
            }

            let outcome = session.step(&events, &input_state, dt);
            session.draw(&mut self.game_grid, assets);
            self.stdout_target
                .present(&self.game_grid)
                .map_err(|e| { error!("Failed to render frame: {}", e); e })?;

            frame_count += 1;
            if outcome != SessionOutcome::Running {
                return Ok(outcome);
            }
        }
    }

    /// Returns false if the player quit from the title screen.
    fn show_title_screen(&mut self, assets: &Assets) -> io::Result<bool> {
        let controls_text = [
            "Controls:",
            "  Arrows / WASD : Move",
            "  Space         : Fire",
            "  G             : Double Gun",
            "  R             : Rapid Fire",
            "  Click / Enter : Next Wave",
            "  Esc / q       : Quit",
        ];

        self.game_grid.clear();
        self.game_grid.draw_slide(&assets.title);
        let controls_start_y = (self.game_grid.height / 2).saturating_sub(1);
        for (i, line) in controls_text.iter().enumerate() {
            self.game_grid.draw_text_centered(controls_start_y + i as u16, line);
        }
        self.game_grid.draw_text_centered(self.game_grid.height.saturating_sub(3), "Press any key to begin...");
        self.stdout_target.present(&self.game_grid)?;

        self.input.wait_for_acknowledge()
    }

    fn show_end_screen(&mut self, slide: &Sprite, score: u32) -> io::Result<()> {
        self.game_grid.clear();
        self.game_grid.draw_slide(slide);
        let middle = self.game_grid.height / 2;
        self.game_grid.draw_text_centered(middle + 2, &format!("Final Score: {}", score));
        self.game_grid.draw_text_centered(middle + 4, "Press any key to exit...");
        self.stdout_target.present(&self.game_grid)?;
        info!("End screen displayed. Waiting for final key press.");

        self.input.wait_for_acknowledge()?;
        self.game_grid.clear_screen_manual(&mut self.stdout_target)
    }
}
