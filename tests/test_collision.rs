use vibe_shooter::collision::detect_collisions;
use vibe_shooter::constants::*;
use vibe_shooter::enemy::{EnemyKind, EnemyManager};
use vibe_shooter::entities::{Asteroid, Explosion, Projectile};
use vibe_shooter::player::Player;
use vibe_shooter::types::Vector2D;

struct Scene {
    player: Player,
    asteroids: Vec<Asteroid>,
    projectiles: Vec<Projectile>,
    enemies: EnemyManager,
    explosions: Vec<Explosion>,
}

impl Scene {
    fn new() -> Self {
        Scene {
            player: Player::new(),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            enemies: EnemyManager::new(),
            explosions: Vec::new(),
        }
    }

    fn resolve(&mut self) -> vibe_shooter::collision::CollisionReport {
        detect_collisions(
            &mut self.player,
            &mut self.asteroids,
            &mut self.projectiles,
            &mut self.enemies,
            &mut self.explosions,
        )
    }
}

// ── Player shots ──────────────────────────────────────────────────────────────

#[test]
fn shot_destroys_basic_enemy_and_leaves_explosion() {
    let mut scene = Scene::new();
    scene.enemies.spawn_enemy(100.0, 50.0, EnemyKind::Basic);
    scene.projectiles.push(Projectile::player(Vector2D::new(115.0, 60.0)));

    let report = scene.resolve();

    assert!(scene.enemies.is_empty());
    assert!(scene.projectiles.is_empty());
    assert_eq!(report.destroyed_enemies, vec![Vector2D::new(100.0, 50.0)]);
    assert_eq!(report.score(), SCORE_ENEMY);
    assert_eq!(scene.explosions.len(), 1);
    assert_eq!(scene.explosions[0].position, Vector2D::new(100.0, 50.0));
}

#[test]
fn tougher_enemy_survives_a_single_shot() {
    let mut scene = Scene::new();
    scene.enemies.spawn_enemy(100.0, 50.0, EnemyKind::Zigzag);
    scene.projectiles.push(Projectile::player(Vector2D::new(115.0, 60.0)));

    let report = scene.resolve();

    assert_eq!(scene.enemies.len(), 1);
    assert_eq!(scene.enemies.enemies[0].health, 1);
    assert!(scene.projectiles.is_empty());
    assert!(scene.explosions.is_empty());
    assert_eq!(report.score(), 0);
}

#[test]
fn shot_destroys_asteroid() {
    let mut scene = Scene::new();
    scene.asteroids.push(Asteroid::new(500.0, 100.0));
    scene.asteroids.push(Asteroid::new(100.0, 100.0));
    scene.projectiles.push(Projectile::player(Vector2D::new(510.0, 110.0)));

    let report = scene.resolve();

    assert_eq!(scene.asteroids.len(), 1);
    assert_eq!(scene.asteroids[0].position, Vector2D::new(100.0, 100.0));
    assert_eq!(report.score(), SCORE_ASTEROID);
    assert_eq!(scene.explosions.len(), 1);
}

#[test]
fn one_shot_hits_only_one_target() {
    let mut scene = Scene::new();
    scene.enemies.spawn_enemy(100.0, 100.0, EnemyKind::Basic);
    scene.asteroids.push(Asteroid::new(100.0, 100.0));
    scene.projectiles.push(Projectile::player(Vector2D::new(110.0, 110.0)));

    let report = scene.resolve();

    assert!(scene.enemies.is_empty());
    assert_eq!(scene.asteroids.len(), 1);
    assert_eq!(report.score(), SCORE_ENEMY);
}

#[test]
fn misses_and_touching_edges_change_nothing() {
    let mut scene = Scene::new();
    scene.enemies.spawn_enemy(100.0, 50.0, EnemyKind::Basic);
    // Exactly abutting the enemy's right edge.
    scene.projectiles.push(Projectile::player(Vector2D::new(140.0, 60.0)));

    let report = scene.resolve();

    assert_eq!(scene.enemies.len(), 1);
    assert_eq!(scene.projectiles.len(), 1);
    assert_eq!(report.score(), 0);
    assert_eq!(scene.player.health, PLAYER_MAX_HEALTH);
}

// ── Damage to the player ──────────────────────────────────────────────────────

#[test]
fn enemy_shot_hits_player_and_is_consumed() {
    let mut scene = Scene::new();
    scene.enemies.spawn_enemy(100.0, 50.0, EnemyKind::Basic);
    let target = scene.player.position;
    scene.enemies.enemies[0].projectiles.push(Projectile::enemy(target));

    let report = scene.resolve();

    assert_eq!(report.player_hits, 1);
    assert_eq!(scene.player.health, PLAYER_MAX_HEALTH - COLLISION_DAMAGE);
    assert!(scene.enemies.enemies[0].projectiles.is_empty());
    assert_eq!(scene.enemies.len(), 1);
}

#[test]
fn player_shots_never_hurt_the_player() {
    let mut scene = Scene::new();
    let target = scene.player.position;
    scene.projectiles.push(Projectile::player(target));

    let report = scene.resolve();

    assert_eq!(report.player_hits, 0);
    assert_eq!(scene.projectiles.len(), 1);
}

#[test]
fn ramming_asteroid_is_destroyed_and_hurts_player() {
    let mut scene = Scene::new();
    let position = scene.player.position;
    scene.asteroids.push(Asteroid::new(position.x, position.y));

    let report = scene.resolve();

    assert!(scene.asteroids.is_empty());
    assert_eq!(report.player_hits, 1);
    assert_eq!(scene.player.health, PLAYER_MAX_HEALTH - COLLISION_DAMAGE);
    assert_eq!(scene.explosions.len(), 1);
}

#[test]
fn ramming_enemy_is_destroyed() {
    let mut scene = Scene::new();
    let position = scene.player.position;
    scene.enemies.spawn_enemy(position.x, position.y, EnemyKind::Spread);

    let report = scene.resolve();

    assert!(scene.enemies.is_empty());
    assert_eq!(report.player_hits, 1);
    assert_eq!(report.destroyed_enemies.len(), 1);
}

#[test]
fn health_may_drop_below_zero() {
    let mut scene = Scene::new();
    scene.player.health = 1;
    let position = scene.player.position;
    scene.asteroids.push(Asteroid::new(position.x, position.y));
    scene.asteroids.push(Asteroid::new(position.x + 5.0, position.y));

    scene.resolve();

    assert_eq!(scene.player.health, -1);
    assert!(scene.player.is_dead());
    assert_eq!(scene.player.health_ratio(), 0.0);
}
