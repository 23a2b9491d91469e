pub mod ammo;
pub mod animation;
pub mod assets;
pub mod collision;
pub mod constants;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod game;
pub mod player;
pub mod rendering;
pub mod session;
pub mod terminal_io;
pub mod types;
pub mod waves;
