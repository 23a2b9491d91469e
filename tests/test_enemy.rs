use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vibe_shooter::constants::*;
use vibe_shooter::enemy::*;
use vibe_shooter::error::GameError;
use vibe_shooter::types::Vector2D;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Stat table ────────────────────────────────────────────────────────────────

#[test]
fn spawn_uses_stat_table_for_each_kind() {
    let mut manager = EnemyManager::new();
    manager.spawn_enemy(10.0, 20.0, EnemyKind::Basic);
    manager.spawn_enemy(10.0, 20.0, EnemyKind::Zigzag);
    manager.spawn_enemy(10.0, 20.0, EnemyKind::Spread);

    let stats: Vec<(f64, i32, f64)> =
        manager.enemies.iter().map(|e| (e.speed, e.health, e.shoot_interval)).collect();
    assert_eq!(stats, vec![(100.0, 1, 1.5), (80.0, 2, 2.0), (60.0, 3, 1.0)]);
    assert_eq!(manager.enemies[1].pattern, Pattern::Zigzag);
    assert_eq!(manager.enemies[0].position, Vector2D::new(10.0, 20.0));
}

#[test]
fn unknown_kind_is_rejected_and_nothing_spawns() {
    let mut manager = EnemyManager::new();
    let result = manager.spawn_named(0.0, 0.0, "kamikaze");
    assert!(matches!(result, Err(GameError::UnknownEnemyKind(ref name)) if name == "kamikaze"));
    assert!(manager.is_empty());

    manager.spawn_named(0.0, 0.0, "spread").unwrap();
    assert_eq!(manager.enemies[0].kind, EnemyKind::Spread);
}

#[test]
fn kind_names_round_trip_through_parse() {
    for kind in [EnemyKind::Basic, EnemyKind::Zigzag, EnemyKind::Spread] {
        assert_eq!(kind.to_string().parse::<EnemyKind>().unwrap(), kind);
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn enemy_stays_inside_top_band() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyKind::Basic);
    let max_x = SCREEN_WIDTH - enemy.size - 10.0;
    let max_y = 0.3 * SCREEN_HEIGHT - enemy.size;

    for _ in 0..10_000 {
        let dt = rng.gen_range(0.0..0.1);
        enemy.update(dt, &mut rng);
        assert!((0.0..=max_x).contains(&enemy.position.x), "x out of band: {}", enemy.position.x);
        assert!((0.0..=max_y).contains(&enemy.position.y), "y out of band: {}", enemy.position.y);
    }
}

#[test]
fn blocked_move_rerolls_direction_and_stays_put() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(0.0, 0.0, EnemyKind::Basic);
    enemy.direction = Vector2D::new(-1.0, 0.0);
    enemy.update(0.1, &mut rng);
    assert_eq!(enemy.position, Vector2D::new(0.0, 0.0));
    assert_ne!(enemy.direction, Vector2D::new(-1.0, 0.0));
}

#[test]
fn direction_changes_on_its_interval() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyKind::Spread);
    enemy.direction = Vector2D::ZERO;
    enemy.update(CHANGE_DIRECTION_INTERVAL - 0.5, &mut rng);
    assert_eq!(enemy.direction, Vector2D::ZERO);
    enemy.update(0.5, &mut rng);
    assert!((enemy.direction.length() - 1.0).abs() < 1e-9);
    assert_eq!(enemy.direction_timer, 0.0);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fires_straight_down_when_timer_elapses() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyKind::Basic);
    enemy.speed = 0.0;

    enemy.update(1.0, &mut rng);
    assert!(enemy.projectiles.is_empty());
    enemy.update(0.5, &mut rng);
    assert_eq!(enemy.projectiles.len(), 1);
    assert_eq!(enemy.shoot_timer, 0.0);

    let shot = &enemy.projectiles[0];
    assert_eq!(shot.velocity, Vector2D::new(0.0, 200.0));
    assert!(shot.position.y >= enemy.position.y + enemy.size - 1e-9);
}

#[test]
fn owned_projectiles_are_pruned_below_screen() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyKind::Basic);
    enemy.speed = 0.0;
    enemy.shoot();
    enemy.projectiles[0].position.y = SCREEN_HEIGHT - 1.0;
    enemy.update(0.1, &mut rng);
    assert!(enemy.projectiles.is_empty());
}

// ── Manager pruning ───────────────────────────────────────────────────────────

#[test]
fn manager_removes_dead_and_fallen_enemies() {
    let mut rng = seeded_rng();
    let mut manager = EnemyManager::new();
    manager.spawn_enemy(100.0, 50.0, EnemyKind::Basic);
    manager.spawn_enemy(200.0, 50.0, EnemyKind::Zigzag);
    manager.spawn_enemy(300.0, 50.0, EnemyKind::Spread);

    manager.enemies[0].health = 0;
    manager.enemies[1].position.y = SCREEN_HEIGHT + 1.0;
    manager.update(0.01, &mut rng);

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.enemies[0].kind, EnemyKind::Spread);
}

#[test]
fn hit_flashes_damage_frame_then_returns_to_idle() {
    use vibe_shooter::animation::Animation;

    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(200.0, 50.0, EnemyKind::Spread);
    enemy.hit(1);
    assert_eq!(enemy.health, 2);
    assert_eq!(enemy.animation.current, Animation::EnemyDamage);
    enemy.update(0.25, &mut rng);
    assert_eq!(enemy.animation.current, Animation::EnemyIdle);
}
