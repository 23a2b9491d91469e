use crossterm::event::KeyCode;
use log::info;

use crate::animation::{Animation, AnimationState};
use crate::assets::Assets;
use crate::constants::*;
use crate::entities::Projectile;
use crate::rendering::GameGrid;
use crate::terminal_io::InputState;
use crate::types::{Rect, Vector2D};

pub struct Player {
    pub position: Vector2D,
    pub size: f64,
    pub speed: f64,
    pub health: i32,
    pub max_health: i32,
    pub ammo: u32,
    pub shot_cooldown: f64,
    pub shooting_speed_factor: f64,
    pub double_gun_mode: bool,
    pub double_gun_timer: f64,
    pub rapid_fire_timer: f64,
    pub animation: AnimationState,
    muzzle_flash: f64,
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Player {
            position: Vector2D::new((SCREEN_WIDTH - PLAYER_SIZE) / 2.0, SCREEN_HEIGHT - PLAYER_SIZE * 2.0),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            ammo: PLAYER_START_AMMO,
            shot_cooldown: 0.0,
            shooting_speed_factor: 1.0,
            double_gun_mode: false,
            double_gun_timer: 0.0,
            rapid_fire_timer: 0.0,
            animation: AnimationState::new(Animation::ShipIdle),
            muzzle_flash: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.position, self.size, self.size)
    }

    pub fn move_by(&mut self, input: &InputState, dt: f64) {
        let mut direction = Vector2D::ZERO;
        if input.is_pressed(KeyCode::Left) || input.is_pressed(KeyCode::Char('a')) {
            direction.x -= 1.0;
        }
        if input.is_pressed(KeyCode::Right) || input.is_pressed(KeyCode::Char('d')) {
            direction.x += 1.0;
        }
        if input.is_pressed(KeyCode::Up) || input.is_pressed(KeyCode::Char('w')) {
            direction.y -= 1.0;
        }
        if input.is_pressed(KeyCode::Down) || input.is_pressed(KeyCode::Char('s')) {
            direction.y += 1.0;
        }
        let length = direction.length();
        if length == 0.0 {
            return;
        }
        let step = direction.scale(self.speed * dt / length);
        let next = self.position.add(step);
        self.position = Vector2D::new(
            next.x.clamp(0.0, SCREEN_WIDTH - self.size),
            next.y.clamp(0.0, SCREEN_HEIGHT - self.size),
        );
    }

    /// Fires if there is ammo and the gun has cooled down. One trigger pull costs one
    /// round even when the double gun puts two shots on screen; rapid fire makes it free.
    pub fn shoot(&mut self, projectiles: &mut Vec<Projectile>) -> bool {
        if self.ammo == 0 || self.shot_cooldown > 0.0 {
            return false;
        }

        let x = self.position.x + self.size / 2.0 - PLAYER_PROJECTILE_SIZE / 2.0;
        let y = self.position.y - PLAYER_PROJECTILE_SIZE;
        if self.double_gun_mode {
            let offset = DOUBLE_GUN_SPACING / 2.0;
            projectiles.push(Projectile::player(Vector2D::new(x - offset, y)));
            projectiles.push(Projectile::player(Vector2D::new(x + offset, y)));
        } else {
            projectiles.push(Projectile::player(Vector2D::new(x, y)));
        }

        if !self.is_rapid_fire_active() {
            self.ammo -= 1;
        }
        self.shot_cooldown = SHOT_COOLDOWN * self.shooting_speed_factor;
        self.muzzle_flash = MUZZLE_FLASH_DURATION;
        true
    }

    pub fn activate_double_gun(&mut self) -> bool {
        if self.double_gun_mode {
            return false;
        }
        self.double_gun_mode = true;
        self.double_gun_timer = DOUBLE_GUN_DURATION;
        info!("Double Gun Mode Activated");
        true
    }

    /// Halves the cooldown and suspends ammo cost. Re-activating restarts the timer.
    pub fn activate_rapid_fire(&mut self) {
        self.shooting_speed_factor = RAPID_FIRE_SPEED_FACTOR;
        self.rapid_fire_timer = RAPID_FIRE_DURATION;
        info!("Shooting Speed Boost Activated");
    }

    pub fn is_rapid_fire_active(&self) -> bool {
        self.rapid_fire_timer > 0.0
    }

    pub fn update(&mut self, dt: f64) {
        self.shot_cooldown = (self.shot_cooldown - dt).max(0.0);
        self.muzzle_flash = (self.muzzle_flash - dt).max(0.0);

        if self.double_gun_mode {
            self.double_gun_timer -= dt;
            if self.double_gun_timer <= 0.0 {
                self.double_gun_timer = 0.0;
                self.double_gun_mode = false;
                info!("Double Gun Mode expired");
            }
        }

        if self.rapid_fire_timer > 0.0 {
            self.rapid_fire_timer -= dt;
            if self.rapid_fire_timer <= 0.0 {
                self.rapid_fire_timer = 0.0;
                self.shooting_speed_factor = 1.0;
                info!("Shooting Speed Boost expired");
            }
        }

        self.animation.update(dt);
    }

    pub fn update_shooting_sprite(&mut self) {
        if self.muzzle_flash > 0.0 {
            self.animation.set(Animation::ShipFiring);
        } else {
            self.animation.set(Animation::ShipIdle);
        }
    }

    pub fn add_ammo(&mut self, rounds: u32) {
        self.ammo = self.ammo.saturating_add(rounds);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Health is never clamped on write; readers get it clamped to the bar's range.
    pub fn health_ratio(&self) -> f64 {
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        game_grid.blit(assets.frame(self.animation.current, self.animation.frame_index), self.position);
    }
}
