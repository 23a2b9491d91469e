use crate::constants::*;
use crate::enemy::EnemyManager;
use crate::entities::{Asteroid, Explosion, Projectile, ProjectileOwner};
use crate::player::Player;
use crate::types::Vector2D;

#[derive(Debug, Default)]
pub struct CollisionReport {
    pub destroyed_asteroids: Vec<Vector2D>,
    pub destroyed_enemies: Vec<Vector2D>,
    pub player_hits: u32,
}

impl CollisionReport {
    pub fn score(&self) -> u32 {
        self.destroyed_asteroids.len() as u32 * SCORE_ASTEROID + self.destroyed_enemies.len() as u32 * SCORE_ENEMY
    }
}

/// Resolves every overlap for this frame. Hits are marked during the scan and
/// the dead entities are removed afterwards, so no collection is mutated while
/// it is being walked. Each shot damages at most one target.
pub fn detect_collisions(
    player: &mut Player,
    asteroids: &mut Vec<Asteroid>,
    projectiles: &mut Vec<Projectile>,
    enemy_manager: &mut EnemyManager,
    explosions: &mut Vec<Explosion>,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut spent_shots = vec![false; projectiles.len()];
    let mut asteroid_destroyed = vec![false; asteroids.len()];

    // Player shots against enemies, then asteroids.
    for (shot_index, shot) in projectiles.iter().enumerate() {
        if shot.owner != ProjectileOwner::Player {
            continue;
        }
        let shot_rect = shot.rect();

        if let Some(enemy) = enemy_manager
            .enemies
            .iter_mut()
            .find(|enemy| !enemy.is_destroyed() && enemy.rect().intersects(&shot_rect))
        {
            enemy.hit(shot.damage);
            spent_shots[shot_index] = true;
            if enemy.is_destroyed() {
                report.destroyed_enemies.push(enemy.position);
            }
            continue;
        }

        if let Some((asteroid_index, asteroid)) = asteroids
            .iter_mut()
            .enumerate()
            .find(|(i, asteroid)| !asteroid_destroyed[*i] && asteroid.rect().intersects(&shot_rect))
        {
            asteroid.health -= shot.damage;
            spent_shots[shot_index] = true;
            if asteroid.is_destroyed() {
                asteroid_destroyed[asteroid_index] = true;
                report.destroyed_asteroids.push(asteroid.position);
            }
        }
    }

    let player_rect = player.rect();

    // Asteroids ramming the player.
    for (i, asteroid) in asteroids.iter_mut().enumerate() {
        if !asteroid_destroyed[i] && asteroid.rect().intersects(&player_rect) {
            asteroid.health = 0;
            asteroid_destroyed[i] = true;
            report.destroyed_asteroids.push(asteroid.position);
            report.player_hits += 1;
        }
    }

    for enemy in &mut enemy_manager.enemies {
        // Enemy shots reaching the player.
        let before = enemy.projectiles.len();
        enemy.projectiles.retain(|shot| !shot.rect().intersects(&player_rect));
        report.player_hits += (before - enemy.projectiles.len()) as u32;

        // Enemy hull touching the player.
        if !enemy.is_destroyed() && enemy.rect().intersects(&player_rect) {
            enemy.health = 0;
            report.destroyed_enemies.push(enemy.position);
            report.player_hits += 1;
        }
    }

    player.take_damage(report.player_hits as i32 * COLLISION_DAMAGE);

    for &position in report.destroyed_enemies.iter().chain(&report.destroyed_asteroids) {
        explosions.push(Explosion::new(position));
    }

    let mut shot_index = 0;
    projectiles.retain(|_| {
        let keep = !spent_shots[shot_index];
        shot_index += 1;
        keep
    });
    let mut asteroid_index = 0;
    asteroids.retain(|_| {
        let keep = !asteroid_destroyed[asteroid_index];
        asteroid_index += 1;
        keep
    });
    enemy_manager.prune();

    report
}
