use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::animation::Animation;
use crate::error::GameError;

const FRAME_SEPARATOR: &str = "---";
const ASSET_DIR: &str = "assets";

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    pub fn from_rows(rows: Vec<Vec<char>>) -> Self {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, ' ');
                row
            })
            .collect();
        Sprite { rows, width }
    }

    pub fn parse(name: &str, text: &str) -> Result<Sprite, GameError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        while lines.first().is_some_and(|line| line.trim().is_empty()) {
            lines.remove(0);
        }
        if lines.is_empty() {
            return Err(GameError::InvalidSprite { name: name.to_string(), reason: "no visible rows".to_string() });
        }
        Ok(Sprite::from_rows(lines.iter().map(|line| line.trim_end().chars().collect()).collect()))
    }

    pub fn parse_frames(name: &str, text: &str) -> Result<Vec<Sprite>, GameError> {
        let mut frames = Vec::new();
        let mut current = String::new();
        for line in text.lines() {
            if line.trim() == FRAME_SEPARATOR {
                frames.push(Sprite::parse(name, &current)?);
                current.clear();
            } else {
                current.push_str(line);
                current.push('\n');
            }
        }
        frames.push(Sprite::parse(name, &current)?);
        Ok(frames)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn scaled(&self, width: usize, height: usize) -> Sprite {
        let width = width.max(1);
        let height = height.max(1);
        let rows = (0..height)
            .map(|y| {
                let src_y = y * self.height() / height;
                (0..width).map(|x| self.rows[src_y][x * self.width / width]).collect()
            })
            .collect();
        Sprite { rows, width }
    }

    /// Rotates clockwise by the nearest multiple of 90 degrees. Directional
    /// glyphs are swapped so the art keeps pointing the right way.
    pub fn rotated(&self, degrees: i32) -> Sprite {
        let quarter_turns = (degrees as f64 / 90.0).round() as i32;
        let mut sprite = self.clone();
        for _ in 0..quarter_turns.rem_euclid(4) {
            sprite = sprite.rotated_quarter();
        }
        sprite
    }

    fn rotated_quarter(&self) -> Sprite {
        let height = self.height();
        let rows = (0..self.width)
            .map(|x| (0..height).map(|y| rotate_glyph(self.rows[height - 1 - y][x])).collect())
            .collect();
        Sprite { rows, width: height }
    }
}

fn rotate_glyph(c: char) -> char {
    match c {
        '^' => '>',
        '>' => 'v',
        'v' => '<',
        '<' => '^',
        '|' => '-',
        '-' => '|',
        '/' => '\\',
        '\\' => '/',
        other => other,
    }
}

/// Every image the game draws, loaded once before the first frame and shared
/// read-only for the rest of the process.
pub struct Assets {
    animations: Vec<Vec<Sprite>>,
    pub player_projectile: Sprite,
    pub enemy_projectile: Sprite,
    pub asteroid: Sprite,
    pub ammo: Sprite,
    pub title: Sprite,
    pub victory: Sprite,
    pub defeat: Sprite,
}

impl Assets {
    /// First `assets/` found next to the executable, then in the working
    /// directory. The source checkout is only a fallback for `cargo run`.
    pub fn default_dir() -> PathBuf {
        let beside_exe = env::current_exe().ok().and_then(|exe| exe.parent().map(|dir| dir.join(ASSET_DIR)));
        let in_cwd = env::current_dir().ok().map(|dir| dir.join(ASSET_DIR));
        let fallback = Path::new(env!("CARGO_MANIFEST_DIR")).join(ASSET_DIR);
        Assets::find_dir(beside_exe.into_iter().chain(in_cwd), fallback)
    }

    fn find_dir(candidates: impl IntoIterator<Item = PathBuf>, fallback: PathBuf) -> PathBuf {
        candidates.into_iter().find(|dir| dir.is_dir()).unwrap_or(fallback)
    }

    pub fn load(dir: &Path) -> Result<Assets, GameError> {
        info!("Loading assets from {}", dir.display());
        let mut animations = Vec::with_capacity(Animation::ALL.len());
        for animation in Animation::ALL {
            let name = animation.asset_name();
            let frames = Sprite::parse_frames(name, &read_asset(dir, name)?)?;
            if frames.len() != animation.frame_count() {
                return Err(GameError::InvalidSprite {
                    name: name.to_string(),
                    reason: format!("expected {} frames, found {}", animation.frame_count(), frames.len()),
                });
            }
            let rotation = animation.load_rotation();
            animations.push(frames.into_iter().map(|frame| frame.rotated(rotation)).collect());
        }

        let assets = Assets {
            animations,
            player_projectile: load_sprite(dir, "bolt")?,
            enemy_projectile: load_sprite(dir, "enemy_bolt")?.rotated(180),
            asteroid: load_sprite(dir, "asteroid")?,
            ammo: load_sprite(dir, "ammo")?,
            title: load_sprite(dir, "title")?,
            victory: load_sprite(dir, "victory")?,
            defeat: load_sprite(dir, "defeat")?,
        };
        info!("Assets loaded.");
        Ok(assets)
    }

    pub fn frames(&self, animation: Animation) -> &[Sprite] {
        &self.animations[animation as usize]
    }

    pub fn frame(&self, animation: Animation, index: usize) -> &Sprite {
        let frames = self.frames(animation);
        &frames[index % frames.len()]
    }
}

fn read_asset(dir: &Path, name: &str) -> Result<String, GameError> {
    let path = dir.join(format!("{}.txt", name));
    fs::read_to_string(&path).map_err(|source| GameError::Asset { path, source })
}

fn load_sprite(dir: &Path, name: &str) -> Result<Sprite, GameError> {
    Sprite::parse(name, &read_asset(dir, name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_transposes_and_swaps_glyphs() {
        let sprite = Sprite::parse("arrow", "^\n|").unwrap();
        let turned = sprite.rotated(90);
        assert_eq!(turned.width(), 2);
        assert_eq!(turned.height(), 1);
        assert_eq!(turned.rows()[0], vec!['-', '>']);
    }

    #[test]
    fn half_turn_points_down() {
        let sprite = Sprite::parse("ship", " ^ \n/_\\").unwrap();
        let flipped = sprite.rotated(180);
        assert_eq!(flipped.rows()[1], vec![' ', 'v', ' ']);
        assert_eq!(flipped.rotated(180), sprite);
    }

    #[test]
    fn scaling_keeps_requested_size() {
        let sprite = Sprite::parse("block", "ab\ncd").unwrap();
        let big = sprite.scaled(4, 4);
        assert_eq!((big.width(), big.height()), (4, 4));
        assert_eq!(big.rows()[3][3], 'd');
        assert_eq!(sprite.scaled(1, 1).rows()[0], vec!['a']);
    }

    #[test]
    fn frames_are_split_on_separator_lines() {
        let frames = Sprite::parse_frames("boom", "*\n---\n+\n---\n.").unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].rows()[0], vec!['.']);
    }

    #[test]
    fn empty_sprite_is_rejected() {
        assert!(matches!(Sprite::parse("blank", "  \n"), Err(GameError::InvalidSprite { .. })));
    }

    #[test]
    fn bundled_assets_load() {
        let assets = Assets::load(&Assets::default_dir()).unwrap();
        for animation in Animation::ALL {
            assert_eq!(assets.frames(animation).len(), animation.frame_count());
        }
    }

    #[test]
    fn asset_dir_prefers_first_existing_candidate() {
        let bundled = Assets::default_dir();
        let missing = PathBuf::from("/definitely/not/here");
        let found = Assets::find_dir([missing.clone(), bundled.clone()], missing.clone());
        assert_eq!(found, bundled);
        assert_eq!(Assets::find_dir([missing.clone()], bundled.clone()), bundled);
    }

    #[test]
    fn missing_directory_is_an_asset_error() {
        let result = Assets::load(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(GameError::Asset { .. })));
    }
}
