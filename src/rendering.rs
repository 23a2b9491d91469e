use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::Print,
};
use log::info;
use rand::Rng;

use crate::assets::Sprite;
use crate::constants::*;
use crate::types::{Rect, Vector2D, wrap_coordinate};

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn copy_from(&mut self, game_grid: &GameGrid) {
        for (y, row) in self.buffer.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = game_grid.get_char(x as u16, y as u16).unwrap_or(' ');
            }
        }
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }

    pub fn present(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => {
                for (y, row) in game_grid.grid.iter().enumerate() {
                    queue!(s, MoveTo(0, y as u16), Print(row.iter().collect::<String>()))?;
                }
                s.flush()
            }
            OutputTarget::ScreenBuffer(sb) => {
                sb.copy_from(game_grid);
                sb.print_to_log();
                Ok(())
            }
        }
    }

    pub fn is_headless(&self) -> bool {
        matches!(self, OutputTarget::ScreenBuffer(_))
    }
}

// --- GameGrid: character surface the world is projected onto ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn get_char(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    fn put(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 {
            self.set_char(x as u16, y as u16, c);
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = GameGrid::new(width, height);
    }

    fn cells_per_unit(&self) -> (f64, f64) {
        (self.width as f64 / SCREEN_WIDTH, self.height as f64 / SCREEN_HEIGHT)
    }

    pub fn cell_of(&self, position: Vector2D) -> (i32, i32) {
        let (sx, sy) = self.cells_per_unit();
        ((position.x * sx).floor() as i32, (position.y * sy).floor() as i32)
    }

    pub fn world_of(&self, column: u16, row: u16) -> Vector2D {
        let (sx, sy) = self.cells_per_unit();
        Vector2D::new(column as f64 / sx, row as f64 / sy)
    }

    pub fn blit(&mut self, sprite: &Sprite, position: Vector2D) {
        let (origin_x, origin_y) = self.cell_of(position);
        for (dy, row) in sprite.rows().iter().enumerate() {
            for (dx, &c) in row.iter().enumerate() {
                if c != ' ' {
                    self.put(origin_x + dx as i32, origin_y + dy as i32, c);
                }
            }
        }
    }

    /// Any non-empty rect covers at least one cell.
    fn cell_span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (sx, sy) = self.cells_per_unit();
        let left = (rect.x * sx).floor() as i32;
        let top = (rect.y * sy).floor() as i32;
        let right = ((rect.right() * sx).ceil() as i32).max(left + 1);
        let bottom = ((rect.bottom() * sy).ceil() as i32).max(top + 1);
        (left, top, right, bottom)
    }

    /// First cell row below everything `fill_rect` would paint for `rect`.
    pub fn row_below(&self, rect: Rect) -> u16 {
        let (_, _, _, bottom) = self.cell_span(rect);
        bottom.clamp(0, u16::MAX as i32) as u16
    }

    pub fn fill_rect(&mut self, rect: Rect, c: char) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (left, top, right, bottom) = self.cell_span(rect);
        for y in top..bottom {
            for x in left..right {
                self.put(x, y, c);
            }
        }
    }

    pub fn draw_text(&mut self, x: u16, y: u16, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x.saturating_add(i as u16), y, c);
        }
    }

    pub fn draw_text_centered(&mut self, y: u16, text: &str) {
        let x = (self.width / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.draw_text(x, y, text);
    }

    /// Draws a full-screen slide in cell space, shrunk when the terminal is too small for it.
    pub fn draw_slide(&mut self, sprite: &Sprite) {
        let slide = if sprite.width() > self.width as usize || sprite.height() > self.height as usize {
            sprite.scaled(sprite.width().min(self.width as usize), sprite.height().min(self.height as usize))
        } else {
            sprite.clone()
        };
        let x = (self.width as i32 - slide.width() as i32) / 2;
        let y = (self.height as i32 - slide.height() as i32) / 3;
        for (dy, row) in slide.rows().iter().enumerate() {
            for (dx, &c) in row.iter().enumerate() {
                self.put(x + dx as i32, y + dy as i32, c);
            }
        }
    }

    pub fn row_string(&self, y: u16) -> String {
        self.grid.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        let blank = GameGrid::new(self.width, self.height);
        stdout.present(&blank)
    }
}

// --- Scrolling starfield drawn behind everything else ---
pub struct Starfield {
    stars: Vec<Vector2D>,
    layer_offsets: [f64; 2],
}

impl Starfield {
    pub fn new(rng: &mut impl Rng) -> Self {
        let stars = (0..BACKGROUND_STAR_COUNT)
            .map(|_| Vector2D::new(rng.gen_range(0.0..SCREEN_WIDTH), rng.gen_range(0.0..SCREEN_HEIGHT)))
            .collect();
        Starfield { stars, layer_offsets: [0.0, -SCREEN_HEIGHT] }
    }

    /// Two copies of the field scroll down and each jumps back above the screen once it leaves the bottom.
    pub fn update(&mut self, dt: f64) {
        for offset in &mut self.layer_offsets {
            *offset += BACKGROUND_SCROLL_SPEED * dt;
            if *offset >= SCREEN_HEIGHT {
                *offset = -SCREEN_HEIGHT;
            }
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for (layer, offset) in self.layer_offsets.iter().enumerate() {
            let glyph = if layer == 0 { '.' } else { '\'' };
            for star in &self.stars {
                let y = star.y + offset;
                if (0.0..SCREEN_HEIGHT).contains(&y) {
                    let x = wrap_coordinate(star.x + layer as f64 * SCREEN_WIDTH / 2.0, SCREEN_WIDTH);
                    let (cx, cy) = game_grid.cell_of(Vector2D::new(x, y));
                    game_grid.put(cx, cy, glyph);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_maps_onto_cells_proportionally() {
        let grid = GameGrid::new(80, 24);
        assert_eq!(grid.cell_of(Vector2D::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_of(Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0)), (40, 12));
        assert_eq!(grid.world_of(40, 12), Vector2D::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));
    }

    #[test]
    fn blit_skips_transparent_cells_and_clips() {
        let mut grid = GameGrid::new(80, 24);
        grid.set_char(1, 0, '#');
        let sprite = Sprite::parse("gap", "a b").unwrap();
        grid.blit(&sprite, Vector2D::new(0.0, 0.0));
        assert_eq!(&grid.row_string(0)[..3], "a#b");
        grid.blit(&sprite, Vector2D::new(-100.0, SCREEN_HEIGHT + 100.0));
    }

    #[test]
    fn tiny_rect_still_covers_a_cell() {
        let mut grid = GameGrid::new(80, 24);
        grid.fill_rect(Rect::new(10.0, 10.0, 1.0, 1.0), '=');
        assert_eq!(grid.get_char(1, 0), Some('='));
        grid.fill_rect(Rect::new(100.0, 100.0, 0.0, 20.0), '#');
        assert!(!grid.row_string(4).contains('#'));
    }

    #[test]
    fn row_below_clears_partially_covered_rows() {
        let grid = GameGrid::new(80, 24);
        // y 10..30 lands on rows 0.4..1.2, so the bar paints rows 0 and 1.
        assert_eq!(grid.row_below(Rect::new(10.0, 10.0, 200.0, 20.0)), 2);
        assert_eq!(grid.row_below(Rect::new(0.0, 0.0, 10.0, 25.0)), 1);
    }

    #[test]
    fn starfield_layers_wrap_back_above_the_screen() {
        let mut rng = rand::thread_rng();
        let mut field = Starfield::new(&mut rng);
        field.update(SCREEN_HEIGHT / BACKGROUND_SCROLL_SPEED);
        assert_eq!(field.layer_offsets, [-SCREEN_HEIGHT, 0.0]);
    }
}
