// --- World ---
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const TARGET_FPS: u32 = 60;

// --- Player ---
pub const PLAYER_SIZE: f64 = 40.0;
pub const PLAYER_SPEED: f64 = 300.0;
pub const PLAYER_MAX_HEALTH: i32 = 10;
pub const PLAYER_START_AMMO: u32 = 20;
pub const SHOT_COOLDOWN: f64 = 0.25; // Seconds between shots
pub const MUZZLE_FLASH_DURATION: f64 = 0.1;
pub const DOUBLE_GUN_DURATION: f64 = 3.0;
pub const DOUBLE_GUN_SPACING: f64 = 24.0; // Distance between the two barrels
pub const RAPID_FIRE_DURATION: f64 = 5.0;
pub const RAPID_FIRE_SPEED_FACTOR: f64 = 0.5;

// --- Projectiles ---
pub const PLAYER_PROJECTILE_SPEED: f64 = 500.0;
pub const PLAYER_PROJECTILE_SIZE: f64 = 10.0;
pub const ENEMY_PROJECTILE_SPEED: f64 = 200.0;
pub const ENEMY_PROJECTILE_SIZE: f64 = 20.0;
pub const PROJECTILE_DAMAGE: i32 = 1;

// --- Enemies ---
pub const ENEMY_SIZE: f64 = 40.0;
pub const ENEMY_RIGHT_MARGIN: f64 = 10.0;
pub const ENEMY_BAND_FRACTION: f64 = 0.3; // Enemies stay in the top 30% of the screen
pub const CHANGE_DIRECTION_INTERVAL: f64 = 3.0;
pub const ANIMATION_FRAME_DURATION: f64 = 0.1;

// --- Asteroids ---
pub const ASTEROID_SIZE: f64 = 50.0;
pub const ASTEROID_SPEED: f64 = 150.0;
pub const ASTEROID_HEALTH: i32 = 1;

// --- Ammo ---
pub const AMMO_SIZE: f64 = 24.0;
pub const AMMO_FALL_SPEED: f64 = 120.0;
pub const AMMO_LIFETIME: f64 = 8.0;
pub const AMMO_SPAWN_CHANCE: f64 = 0.01; // Per active frame
pub const AMMO_PER_PICKUP: u32 = 1;

// --- Explosions ---
pub const EXPLOSION_FRAME_DURATION: f64 = 0.08;

// --- Damage and score ---
pub const COLLISION_DAMAGE: i32 = 1;
pub const SCORE_ASTEROID: u32 = 1;
pub const SCORE_ENEMY: u32 = 3;

// --- Background ---
pub const BACKGROUND_SCROLL_SPEED: f64 = 100.0;
pub const BACKGROUND_STAR_COUNT: usize = 60;

// --- HUD ---
pub const HEALTH_BAR_WIDTH: f64 = 200.0;
pub const HEALTH_BAR_HEIGHT: f64 = 20.0;
