use crossterm::event::KeyCode;
use log::{error, info};
use rand::Rng;
use rand::rngs::StdRng;

use crate::ammo::AmmoManager;
use crate::assets::Assets;
use crate::collision::detect_collisions;
use crate::constants::*;
use crate::enemy::EnemyManager;
use crate::entities::{Asteroid, Explosion, Projectile};
use crate::error::GameError;
use crate::player::Player;
use crate::rendering::{GameGrid, Starfield};
use crate::terminal_io::{InputEvent, InputState};
use crate::types::{Rect, Vector2D};
use crate::waves::{WaveState, Waves};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Running,
    Won,
    Lost,
    Quit,
}

pub struct Session {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub asteroids: Vec<Asteroid>,
    pub enemy_manager: EnemyManager,
    pub waves: Waves,
    pub ammo_manager: AmmoManager,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    starfield: Starfield,
    rng: StdRng,
    outcome: SessionOutcome,
}

impl Session {
    pub fn new(mut waves: Waves, mut rng: StdRng) -> Result<Self, GameError> {
        waves.start_wave(0)?;
        Ok(Session {
            player: Player::new(),
            projectiles: Vec::new(),
            asteroids: Vec::new(),
            enemy_manager: EnemyManager::new(),
            waves,
            ammo_manager: AmmoManager::new(),
            explosions: Vec::new(),
            score: 0,
            starfield: Starfield::new(&mut rng),
            rng,
            outcome: SessionOutcome::Running,
        })
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.outcome
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Quit
            | InputEvent::KeyDown(KeyCode::Esc)
            | InputEvent::KeyDown(KeyCode::Char('q'))
            | InputEvent::KeyDown(KeyCode::Char('Q')) => {
                info!("Quit requested.");
                self.outcome = SessionOutcome::Quit;
            }
            InputEvent::KeyDown(KeyCode::Char(' ')) => {
                if self.waves.is_wave_active() && self.player.ammo > 0 {
                    self.player.shoot(&mut self.projectiles);
                }
            }
            InputEvent::KeyDown(KeyCode::Char('r')) | InputEvent::KeyDown(KeyCode::Char('R')) => {
                self.player.activate_rapid_fire();
            }
            InputEvent::KeyDown(KeyCode::Char('g')) | InputEvent::KeyDown(KeyCode::Char('G')) => {
                self.player.activate_double_gun();
            }
            InputEvent::KeyDown(KeyCode::Enter) | InputEvent::MouseDown(_) => self.acknowledge_wave(),
            _ => {}
        }
    }

    fn acknowledge_wave(&mut self) {
        if !self.waves.is_between_waves() {
            return;
        }
        match self.waves.advance() {
            Ok(WaveState::Complete) => self.outcome = SessionOutcome::Won,
            Ok(_) => {}
            Err(e) => error!("Could not advance waves: {}", e),
        }
    }

    /// Runs one frame: input, then every entity advanced by the same `dt`,
    /// then collisions and pruning. Between waves only asteroids and the
    /// background keep moving, and nothing collides.
    pub fn step(&mut self, events: &[InputEvent], input: &InputState, dt: f64) -> SessionOutcome {
        if self.outcome != SessionOutcome::Running {
            return self.outcome;
        }
        if self.player.is_dead() {
            self.outcome = SessionOutcome::Lost;
            return self.outcome;
        }

        for event in events {
            self.handle_event(event);
            if self.outcome != SessionOutcome::Running {
                return self.outcome;
            }
        }

        let wave_active = self.waves.is_wave_active();
        if wave_active {
            self.player.move_by(input, dt);
            self.player.update(dt);
            self.player.update_shooting_sprite();

            self.projectiles.retain_mut(|projectile| {
                projectile.update(dt);
                !projectile.is_off_screen()
            });

            self.waves.update(dt, &mut self.enemy_manager, &mut self.asteroids, &mut self.rng);
            self.enemy_manager.update(dt, &mut self.rng);
        }

        // Asteroids already on screen keep falling while the banner is up.
        self.asteroids.retain_mut(|asteroid| {
            asteroid.update(dt);
            !asteroid.is_off_screen()
        });

        if wave_active {
            let report = detect_collisions(
                &mut self.player,
                &mut self.asteroids,
                &mut self.projectiles,
                &mut self.enemy_manager,
                &mut self.explosions,
            );
            self.score += report.score();

            if self.rng.gen_bool(AMMO_SPAWN_CHANCE) {
                self.ammo_manager.spawn_ammo(&mut self.rng);
            }
            let collected = self.ammo_manager.update(dt, self.player.rect());
            self.player.add_ammo(collected as u32 * AMMO_PER_PICKUP);

            self.explosions.retain_mut(|explosion| {
                explosion.update(dt);
                !explosion.done
            });
        }

        self.starfield.update(dt);

        if self.player.is_dead() {
            info!("Player destroyed with score {}", self.score);
            self.outcome = SessionOutcome::Lost;
        }
        self.outcome
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        game_grid.clear();
        self.starfield.draw(game_grid);
        self.draw_health_bar(game_grid);

        self.player.draw(game_grid, assets);
        for projectile in &self.projectiles {
            projectile.draw(game_grid, assets);
        }
        for asteroid in &self.asteroids {
            asteroid.draw(game_grid, assets);
        }
        self.enemy_manager.draw(game_grid, assets);
        self.ammo_manager.draw(game_grid, assets);
        for explosion in &self.explosions {
            explosion.draw(game_grid, assets);
        }

        self.draw_hud(game_grid);

        if let Some([line1, line2]) = self.waves.cleared_message() {
            let middle = game_grid.height / 2;
            game_grid.draw_text_centered(middle.saturating_sub(1), line1);
            game_grid.draw_text_centered(middle + 1, line2);
        }
    }

    fn health_bar_rect() -> Rect {
        Rect::from_position(Vector2D::new(10.0, 10.0), HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT)
    }

    fn draw_health_bar(&self, game_grid: &mut GameGrid) {
        let bar = Session::health_bar_rect();
        game_grid.fill_rect(bar, '-');
        let filled = Rect { width: bar.width * self.player.health_ratio(), ..bar };
        game_grid.fill_rect(filled, '=');
    }

    fn draw_hud(&self, game_grid: &mut GameGrid) {
        let text_row = game_grid.row_below(Session::health_bar_rect());
        game_grid.draw_text(1, text_row, &format!("Ammo: {}", self.player.ammo));
        game_grid.draw_text(1, text_row + 1, &format!("Score: {}", self.score));

        let wave_label = format!("Wave {}/{}", self.waves.current_wave() + 1, self.waves.wave_count());
        let right = game_grid.width.saturating_sub(wave_label.len() as u16 + 1);
        game_grid.draw_text(right, 0, &wave_label);

        let mut power_ups = Vec::new();
        if self.player.double_gun_mode {
            power_ups.push(format!("DOUBLE GUN {:.1}s", self.player.double_gun_timer));
        }
        if self.player.is_rapid_fire_active() {
            power_ups.push(format!("RAPID FIRE {:.1}s", self.player.rapid_fire_timer));
        }
        for (i, label) in power_ups.iter().enumerate() {
            let x = game_grid.width.saturating_sub(label.len() as u16 + 1);
            game_grid.draw_text(x, 1 + i as u16, label);
        }

        let hint = "Arrows/WASD: Move  Space: Fire  G: Double Gun  R: Rapid Fire  Q: Quit";
        game_grid.draw_text(1, game_grid.height.saturating_sub(1), hint);
    }
}
