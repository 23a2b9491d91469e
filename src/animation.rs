use crate::constants::ANIMATION_FRAME_DURATION;

/// Every sprite sequence the game can play. Each variant names the asset file
/// holding its frames, so a missing or misspelled animation fails to compile
/// rather than at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Animation {
    ShipIdle,
    ShipFiring,
    EnemyIdle,
    EnemyDamage,
    Explosion,
}

impl Animation {
    pub const ALL: [Animation; 5] = [
        Animation::ShipIdle,
        Animation::ShipFiring,
        Animation::EnemyIdle,
        Animation::EnemyDamage,
        Animation::Explosion,
    ];

    pub fn frame_count(self) -> usize {
        match self {
            Animation::ShipIdle => 2,
            Animation::ShipFiring => 1,
            Animation::EnemyIdle => 2,
            Animation::EnemyDamage => 1,
            Animation::Explosion => 4,
        }
    }

    pub fn asset_name(self) -> &'static str {
        match self {
            Animation::ShipIdle => "ship_idle",
            Animation::ShipFiring => "ship_firing",
            Animation::EnemyIdle => "enemy_idle",
            Animation::EnemyDamage => "enemy_damage",
            Animation::Explosion => "explosion",
        }
    }

    /// Enemy art is drawn nose-up like the ship and turned to face the player on load.
    pub fn load_rotation(self) -> i32 {
        match self {
            Animation::EnemyIdle | Animation::EnemyDamage => 180,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AnimationState {
    pub current: Animation,
    pub frame_index: usize,
    pub frame_timer: f64,
    pub frame_duration: f64,
}

impl AnimationState {
    pub fn new(animation: Animation) -> Self {
        AnimationState::with_frame_duration(animation, ANIMATION_FRAME_DURATION)
    }

    pub fn with_frame_duration(animation: Animation, frame_duration: f64) -> Self {
        AnimationState { current: animation, frame_index: 0, frame_timer: 0.0, frame_duration }
    }

    /// Advances the frame clock. Returns true when the sequence wrapped back to its first frame.
    pub fn update(&mut self, dt: f64) -> bool {
        self.frame_timer += dt;
        if self.frame_timer < self.frame_duration {
            return false;
        }
        self.frame_timer = 0.0;
        self.frame_index = (self.frame_index + 1) % self.current.frame_count();
        self.frame_index == 0
    }

    pub fn set(&mut self, animation: Animation) {
        if self.current != animation {
            self.current = animation;
            self.frame_index = 0;
            self.frame_timer = 0.0;
        }
    }
}
