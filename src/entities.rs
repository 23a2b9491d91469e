use rand::Rng;

use crate::animation::{Animation, AnimationState};
use crate::assets::Assets;
use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::{Rect, Vector2D};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

// --- Projectile: straight-line shot fired by the player or an enemy ---
#[derive(Clone, Debug)]
pub struct Projectile {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: f64,
    pub owner: ProjectileOwner,
    pub damage: i32,
}

impl Projectile {
    pub fn new(position: Vector2D, velocity: Vector2D, size: f64, owner: ProjectileOwner) -> Self {
        Projectile { position, velocity, size, owner, damage: PROJECTILE_DAMAGE }
    }

    pub fn player(position: Vector2D) -> Self {
        Projectile::new(
            position,
            Vector2D::new(0.0, -PLAYER_PROJECTILE_SPEED),
            PLAYER_PROJECTILE_SIZE,
            ProjectileOwner::Player,
        )
    }

    pub fn enemy(position: Vector2D) -> Self {
        Projectile::new(
            position,
            Vector2D::new(0.0, ENEMY_PROJECTILE_SPEED),
            ENEMY_PROJECTILE_SIZE,
            ProjectileOwner::Enemy,
        )
    }

    pub fn update(&mut self, dt: f64) {
        self.position = self.position.add(self.velocity.scale(dt));
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.position, self.size, self.size)
    }

    /// Past the screen edge it is travelling towards.
    pub fn is_off_screen(&self) -> bool {
        (self.velocity.y < 0.0 && self.position.y < 0.0)
            || (self.velocity.y > 0.0 && self.position.y > SCREEN_HEIGHT)
            || (self.velocity.x < 0.0 && self.position.x + self.size < 0.0)
            || (self.velocity.x > 0.0 && self.position.x > SCREEN_WIDTH)
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        let sprite = match self.owner {
            ProjectileOwner::Player => &assets.player_projectile,
            ProjectileOwner::Enemy => &assets.enemy_projectile,
        };
        game_grid.blit(sprite, self.position);
    }
}

// --- Asteroid: falls straight down until it leaves the screen or is shot ---
#[derive(Clone, Debug)]
pub struct Asteroid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: f64,
    pub health: i32,
}

impl Asteroid {
    pub fn new(x: f64, y: f64) -> Self {
        Asteroid {
            position: Vector2D::new(x, y),
            velocity: Vector2D::new(0.0, ASTEROID_SPEED),
            size: ASTEROID_SIZE,
            health: ASTEROID_HEALTH,
        }
    }

    pub fn spawn_random(rng: &mut impl Rng) -> Self {
        Asteroid::new(rng.gen_range(0.0..SCREEN_WIDTH - ASTEROID_SIZE), -ASTEROID_SIZE)
    }

    pub fn update(&mut self, dt: f64) {
        self.position = self.position.add(self.velocity.scale(dt));
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.position, self.size, self.size)
    }

    pub fn is_off_screen(&self) -> bool {
        self.position.y > SCREEN_HEIGHT
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        game_grid.blit(&assets.asteroid, self.position);
    }
}

// --- Explosion: plays its frames once, then reports done ---
#[derive(Clone, Debug)]
pub struct Explosion {
    pub position: Vector2D,
    pub animation: AnimationState,
    pub done: bool,
}

impl Explosion {
    pub fn new(position: Vector2D) -> Self {
        Explosion {
            position,
            animation: AnimationState::with_frame_duration(Animation::Explosion, EXPLOSION_FRAME_DURATION),
            done: false,
        }
    }

    pub fn update(&mut self, dt: f64) {
        if !self.done && self.animation.update(dt) {
            self.done = true;
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        if !self.done {
            game_grid.blit(assets.frame(Animation::Explosion, self.animation.frame_index), self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectiles_are_pruned_along_their_direction_of_travel() {
        let mut shot = Projectile::player(Vector2D::new(100.0, 5.0));
        assert!(!shot.is_off_screen());
        shot.update(0.1);
        assert!(shot.is_off_screen());

        let enemy_shot = Projectile::enemy(Vector2D::new(100.0, -5.0));
        assert!(!enemy_shot.is_off_screen());
    }

    #[test]
    fn asteroid_falls_at_fixed_speed() {
        let mut asteroid = Asteroid::new(10.0, 0.0);
        asteroid.update(2.0);
        assert_eq!(asteroid.position, Vector2D::new(10.0, 2.0 * ASTEROID_SPEED));
    }

    #[test]
    fn explosion_finishes_after_its_last_frame() {
        let mut explosion = Explosion::new(Vector2D::ZERO);
        for _ in 0..Animation::Explosion.frame_count() - 1 {
            explosion.update(EXPLOSION_FRAME_DURATION);
            assert!(!explosion.done);
        }
        explosion.update(EXPLOSION_FRAME_DURATION);
        assert!(explosion.done);
    }
}
