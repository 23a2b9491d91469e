use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use rand::Rng;

use crate::animation::{Animation, AnimationState};
use crate::assets::Assets;
use crate::constants::*;
use crate::entities::Projectile;
use crate::error::GameError;
use crate::rendering::GameGrid;
use crate::types::{Rect, Vector2D};

/// How long an enemy flashes its damage frame after being hit.
const DAMAGE_FLASH_DURATION: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Zigzag,
    Spread,
}

/// Movement/firing class carried by each kind. Only the stat table differs between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Straight,
    Zigzag,
    Spread,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub speed: f64,
    pub health: i32,
    pub shoot_interval: f64,
    pub pattern: Pattern,
}

impl EnemyKind {
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats { speed: 100.0, health: 1, shoot_interval: 1.5, pattern: Pattern::Straight },
            EnemyKind::Zigzag => EnemyStats { speed: 80.0, health: 2, shoot_interval: 2.0, pattern: Pattern::Zigzag },
            EnemyKind::Spread => EnemyStats { speed: 60.0, health: 3, shoot_interval: 1.0, pattern: Pattern::Spread },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Zigzag => "zigzag",
            EnemyKind::Spread => "spread",
        }
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(EnemyKind::Basic),
            "zigzag" => Ok(EnemyKind::Zigzag),
            "spread" => Ok(EnemyKind::Spread),
            other => Err(GameError::UnknownEnemyKind(other.to_string())),
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Enemy {
    pub position: Vector2D,
    pub kind: EnemyKind,
    pub pattern: Pattern,
    pub speed: f64,
    pub health: i32,
    pub size: f64,
    pub direction: Vector2D,
    pub change_direction_interval: f64,
    pub direction_timer: f64,
    pub shoot_interval: f64,
    pub shoot_timer: f64,
    pub projectiles: Vec<Projectile>,
    pub animation: AnimationState,
    damage_timer: f64,
}

impl Enemy {
    pub fn new(x: f64, y: f64, kind: EnemyKind) -> Self {
        let stats = kind.stats();
        Enemy {
            position: Vector2D::new(x, y),
            kind,
            pattern: stats.pattern,
            speed: stats.speed,
            health: stats.health,
            size: ENEMY_SIZE,
            direction: Vector2D::new(0.0, 1.0),
            change_direction_interval: CHANGE_DIRECTION_INTERVAL,
            direction_timer: 0.0,
            shoot_interval: stats.shoot_interval,
            shoot_timer: 0.0,
            projectiles: Vec::new(),
            animation: AnimationState::new(Animation::EnemyIdle),
            damage_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.position, self.size, self.size)
    }

    pub fn max_x(&self) -> f64 {
        SCREEN_WIDTH - self.size - ENEMY_RIGHT_MARGIN
    }

    pub fn max_y(&self) -> f64 {
        SCREEN_HEIGHT * ENEMY_BAND_FRACTION - self.size
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        self.move_within_band(dt, rng);

        self.shoot_timer += dt;
        if self.shoot_timer >= self.shoot_interval {
            self.shoot();
            self.shoot_timer = 0.0;
        }

        if self.damage_timer > 0.0 {
            self.damage_timer -= dt;
            if self.damage_timer <= 0.0 {
                self.animation.set(Animation::EnemyIdle);
            }
        }
        self.animation.update(dt);

        self.projectiles.retain_mut(|projectile| {
            projectile.update(dt);
            !projectile.is_off_screen()
        });
    }

    fn move_within_band(&mut self, dt: f64, rng: &mut impl Rng) {
        self.direction_timer += dt;
        if self.direction_timer >= self.change_direction_interval {
            self.change_direction(rng);
            self.direction_timer = 0.0;
        }

        let candidate = self.position.add(self.direction.scale(self.speed * dt));
        let x_ok = (0.0..=self.max_x()).contains(&candidate.x);
        let y_ok = (0.0..=self.max_y()).contains(&candidate.y);
        if x_ok && y_ok {
            self.position = candidate;
        } else {
            self.change_direction(rng);
        }
    }

    pub fn change_direction(&mut self, rng: &mut impl Rng) {
        let angle = rng.gen_range(0.0..360.0);
        self.direction = Vector2D::new(1.0, 0.0).rotated_degrees(angle);
    }

    /// Fires straight down from the middle of the front edge.
    pub fn shoot(&mut self) {
        let x = self.position.x + self.size / 2.0 - ENEMY_PROJECTILE_SIZE / 2.0;
        let y = self.position.y + self.size;
        self.projectiles.push(Projectile::enemy(Vector2D::new(x, y)));
    }

    pub fn hit(&mut self, damage: i32) {
        self.health -= damage;
        self.damage_timer = DAMAGE_FLASH_DURATION;
        self.animation.set(Animation::EnemyDamage);
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        game_grid.blit(assets.frame(self.animation.current, self.animation.frame_index), self.position);
        for projectile in &self.projectiles {
            projectile.draw(game_grid, assets);
        }
    }
}

#[derive(Default)]
pub struct EnemyManager {
    pub enemies: Vec<Enemy>,
}

impl EnemyManager {
    pub fn new() -> Self {
        EnemyManager::default()
    }

    pub fn spawn_enemy(&mut self, x: f64, y: f64, kind: EnemyKind) {
        info!("Spawning {} enemy at ({:.0}, {:.0})", kind, x, y);
        self.enemies.push(Enemy::new(x, y, kind));
    }

    pub fn spawn_named(&mut self, x: f64, y: f64, kind: &str) -> Result<(), GameError> {
        let kind = kind.parse::<EnemyKind>().map_err(|e| {
            warn!("Rejected enemy spawn: {}", e);
            e
        })?;
        self.spawn_enemy(x, y, kind);
        Ok(())
    }

    pub fn update(&mut self, dt: f64, rng: &mut impl Rng) {
        for enemy in &mut self.enemies {
            enemy.update(dt, rng);
        }
        self.prune();
    }

    pub fn prune(&mut self) {
        self.enemies.retain(|enemy| enemy.position.y <= SCREEN_HEIGHT && !enemy.is_destroyed());
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        for enemy in &self.enemies {
            enemy.draw(game_grid, assets);
        }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
