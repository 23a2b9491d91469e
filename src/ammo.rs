use rand::Rng;

use crate::assets::Assets;
use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::{Rect, Vector2D};

pub struct AmmoPickup {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: f64,
    pub lifetime: f64,
}

impl AmmoPickup {
    pub fn new(position: Vector2D) -> Self {
        AmmoPickup {
            position,
            velocity: Vector2D::new(0.0, AMMO_FALL_SPEED),
            size: AMMO_SIZE,
            lifetime: AMMO_LIFETIME,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position(self.position, self.size, self.size)
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        game_grid.blit(&assets.ammo, self.position);
    }
}

#[derive(Default)]
pub struct AmmoManager {
    pub pickups: Vec<AmmoPickup>,
}

impl AmmoManager {
    pub fn new() -> Self {
        AmmoManager::default()
    }

    pub fn spawn_ammo(&mut self, rng: &mut impl Rng) {
        let x = rng.gen_range(0.0..SCREEN_WIDTH - AMMO_SIZE);
        self.spawn_ammo_at(Vector2D::new(x, 0.0));
    }

    pub fn spawn_ammo_at(&mut self, position: Vector2D) {
        self.pickups.push(AmmoPickup::new(position));
    }

    /// Moves every pickup and returns how many the player touched this frame.
    /// Collected, expired and fallen pickups are removed.
    pub fn update(&mut self, dt: f64, player_rect: Rect) -> usize {
        let mut collected = 0;
        self.pickups.retain_mut(|pickup| {
            pickup.position = pickup.position.add(pickup.velocity.scale(dt));
            pickup.lifetime -= dt;
            if pickup.rect().intersects(&player_rect) {
                collected += 1;
                return false;
            }
            pickup.lifetime > 0.0 && pickup.position.y <= SCREEN_HEIGHT
        });
        collected
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        for pickup in &self.pickups {
            pickup.draw(game_grid, assets);
        }
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_away() -> Rect {
        Rect::new(-1000.0, -1000.0, 1.0, 1.0)
    }

    #[test]
    fn pickups_expire_after_their_lifetime() {
        let mut manager = AmmoManager::new();
        manager.spawn_ammo_at(Vector2D::new(100.0, 0.0));
        manager.update(AMMO_LIFETIME / 2.0, far_away());
        assert_eq!(manager.len(), 1);
        manager.update(AMMO_LIFETIME / 2.0, far_away());
        assert!(manager.is_empty());
    }

    #[test]
    fn pickups_fall_off_the_bottom() {
        let mut manager = AmmoManager::new();
        manager.spawn_ammo_at(Vector2D::new(100.0, SCREEN_HEIGHT - 1.0));
        manager.update(0.1, far_away());
        assert!(manager.is_empty());
    }

    #[test]
    fn touching_the_player_collects() {
        let mut manager = AmmoManager::new();
        manager.spawn_ammo_at(Vector2D::new(100.0, 100.0));
        manager.spawn_ammo_at(Vector2D::new(600.0, 100.0));
        let collected = manager.update(0.0, Rect::new(90.0, 90.0, 40.0, 40.0));
        assert_eq!(collected, 1);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.pickups[0].position.x, 600.0);
    }
}
