use log::info;
use rand::Rng;

use crate::constants::*;
use crate::enemy::{EnemyKind, EnemyManager};
use crate::entities::Asteroid;
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    Inactive,
    Active,
    BetweenWaves,
    Complete,
}

impl WaveState {
    fn describe(self) -> &'static str {
        match self {
            WaveState::Inactive => "no wave has started",
            WaveState::Active => "a wave is active",
            WaveState::BetweenWaves => "waiting between waves",
            WaveState::Complete => "every wave is complete",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub x: f64,
    pub y: f64,
    pub at: f64,
}

impl EnemySpawn {
    pub fn new(kind: EnemyKind, x: f64, y: f64, at: f64) -> Self {
        EnemySpawn { kind, x, y, at }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Completion {
    /// Every scheduled enemy has spawned and none are left alive.
    EnemiesCleared,
    /// The wave lasts this many seconds from its start, and never ends before its last spawn.
    Duration(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveDescriptor {
    pub spawns: Vec<EnemySpawn>,
    pub asteroid_interval: Option<f64>,
    pub completion: Completion,
    pub cleared_message: [&'static str; 2],
}

impl WaveDescriptor {
    pub fn new(mut spawns: Vec<EnemySpawn>, asteroid_interval: Option<f64>, completion: Completion) -> Self {
        spawns.sort_by(|a, b| a.at.total_cmp(&b.at));
        WaveDescriptor { spawns, asteroid_interval, completion, cleared_message: ["Wave Complete! Click to Start Next Wave!", ""] }
    }

    pub fn with_message(mut self, line1: &'static str, line2: &'static str) -> Self {
        self.cleared_message = [line1, line2];
        self
    }
}

/// Scripted spawn schedule and the wave progression state machine:
/// `Inactive -> Active -> BetweenWaves -> Active ... -> Complete`.
/// Leaving `BetweenWaves` always takes an explicit `advance`.
pub struct Waves {
    wave_data: Vec<WaveDescriptor>,
    state: WaveState,
    current_wave: usize,
    elapsed: f64,
    next_spawn: usize,
    asteroid_timer: f64,
}

impl Waves {
    pub fn new(wave_data: Vec<WaveDescriptor>) -> Self {
        Waves { wave_data, state: WaveState::Inactive, current_wave: 0, elapsed: 0.0, next_spawn: 0, asteroid_timer: 0.0 }
    }

    pub fn campaign() -> Self {
        Waves::new(default_waves())
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn current_wave(&self) -> usize {
        self.current_wave
    }

    pub fn wave_count(&self) -> usize {
        self.wave_data.len()
    }

    pub fn is_wave_active(&self) -> bool {
        self.state == WaveState::Active
    }

    pub fn is_between_waves(&self) -> bool {
        self.state == WaveState::BetweenWaves
    }

    pub fn is_complete(&self) -> bool {
        self.state == WaveState::Complete
    }

    pub fn cleared_message(&self) -> Option<[&'static str; 2]> {
        match self.state {
            WaveState::BetweenWaves => self.wave_data.get(self.current_wave).map(|wave| wave.cleared_message),
            _ => None,
        }
    }

    fn next_index(&self) -> usize {
        match self.state {
            WaveState::Inactive => 0,
            _ => self.current_wave + 1,
        }
    }

    pub fn start_wave(&mut self, index: usize) -> Result<(), GameError> {
        if !matches!(self.state, WaveState::Inactive | WaveState::BetweenWaves) {
            return Err(GameError::InvalidTransition { from: self.state.describe(), action: "start a wave" });
        }
        if index >= self.wave_data.len() {
            return Err(GameError::NoSuchWave(index));
        }
        let expected = self.next_index();
        if index != expected {
            return Err(GameError::WaveOutOfOrder { expected, requested: index });
        }

        self.current_wave = index;
        self.state = WaveState::Active;
        self.elapsed = 0.0;
        self.next_spawn = 0;
        self.asteroid_timer = 0.0;
        info!("Wave {} started", index + 1);
        Ok(())
    }

    pub fn advance(&mut self) -> Result<WaveState, GameError> {
        if self.state != WaveState::BetweenWaves {
            return Err(GameError::InvalidTransition { from: self.state.describe(), action: "advance" });
        }
        let next = self.current_wave + 1;
        if next < self.wave_data.len() {
            self.start_wave(next)?;
        } else {
            self.state = WaveState::Complete;
            info!("All waves complete!");
        }
        Ok(self.state)
    }

    pub fn update(
        &mut self,
        dt: f64,
        enemy_manager: &mut EnemyManager,
        asteroids: &mut Vec<Asteroid>,
        rng: &mut impl Rng,
    ) {
        if self.state != WaveState::Active {
            return;
        }
        let wave = &self.wave_data[self.current_wave];
        self.elapsed += dt;

        while let Some(spawn) = wave.spawns.get(self.next_spawn) {
            if spawn.at > self.elapsed {
                break;
            }
            enemy_manager.spawn_enemy(spawn.x, spawn.y, spawn.kind);
            self.next_spawn += 1;
        }
        let all_spawned = self.next_spawn >= wave.spawns.len();

        let finished = all_spawned
            && match wave.completion {
                Completion::EnemiesCleared => enemy_manager.is_empty(),
                Completion::Duration(seconds) => self.elapsed >= seconds,
            };

        if let (Some(interval), false) = (wave.asteroid_interval, finished) {
            self.asteroid_timer += dt;
            while self.asteroid_timer >= interval {
                self.asteroid_timer -= interval;
                asteroids.push(Asteroid::spawn_random(rng));
            }
        }

        if finished {
            self.state = WaveState::BetweenWaves;
            info!("Wave {} complete", self.current_wave + 1);
        }
    }
}

fn column(slot: usize, slots: usize) -> f64 {
    let usable = SCREEN_WIDTH - ENEMY_SIZE - ENEMY_RIGHT_MARGIN;
    usable * (slot as f64 + 0.5) / slots as f64
}

fn squadron(kind: EnemyKind, count: usize, y: f64, start: f64, stagger: f64) -> Vec<EnemySpawn> {
    (0..count).map(|i| EnemySpawn::new(kind, column(i, count), y, start + i as f64 * stagger)).collect()
}

pub fn default_waves() -> Vec<WaveDescriptor> {
    let top = 20.0;
    let low = SCREEN_HEIGHT * ENEMY_BAND_FRACTION - ENEMY_SIZE - 20.0;

    let mut shower_escort = squadron(EnemyKind::Basic, 2, top, 2.0, 6.0);
    shower_escort.extend(squadron(EnemyKind::Basic, 2, low, 10.0, 4.0));

    let mut final_round = squadron(EnemyKind::Spread, 3, top, 0.0, 1.0);
    final_round.extend(squadron(EnemyKind::Zigzag, 2, low, 6.0, 2.0));
    final_round.extend(squadron(EnemyKind::Spread, 2, low, 14.0, 2.0));

    vec![
        WaveDescriptor::new(squadron(EnemyKind::Basic, 4, top, 0.0, 1.5), None, Completion::EnemiesCleared)
            .with_message("Wave Complete! Click to Start Next Wave!", "Asteroids approaching."),
        WaveDescriptor::new(shower_escort, Some(1.2), Completion::Duration(25.0))
            .with_message("Wave Complete! Our engineers installed a double gun.", "Press 'G' to equip."),
        WaveDescriptor::new(squadron(EnemyKind::Zigzag, 5, top, 0.0, 2.0), Some(4.0), Completion::EnemiesCleared)
            .with_message("Wave Complete! Final round", "Toughest enemies approach"),
        WaveDescriptor::new(final_round, Some(3.0), Completion::EnemiesCleared)
            .with_message("VICTORY!!!", ""),
    ]
}
