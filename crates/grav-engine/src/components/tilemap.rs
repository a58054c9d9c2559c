//! Tile grid and the pixel-space queries the physics core runs against it.
//!
//! The grid is owned by whoever loads levels; the physics core only sees
//! it through the read-only [`TileQuery`] trait. Tiles are stored in
//! row-major order: index = y * width + x.

use glam::Vec2;

/// Size of one tile in pixels.
pub const TILE_SIZE: i32 = 32;

/// An axis-aligned pixel rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Whether two rectangles overlap (touching edges do not count).
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether a point lies inside the rectangle.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Grow the rectangle outward by `margin` on every side.
    pub fn inflate(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + 2 * margin,
            self.h + 2 * margin,
        )
    }
}

/// Kind of a single tile in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Empty,
    Solid,
    Spawn,
    Exit,
    Hazard,
}

impl TileKind {
    /// Mapping used by the ASCII level format. Unknown characters are
    /// treated as empty space.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => TileKind::Solid,
            'S' => TileKind::Spawn,
            'E' => TileKind::Exit,
            '^' => TileKind::Hazard,
            _ => TileKind::Empty,
        }
    }
}

/// Read-only pixel-space interface the physics core consumes.
///
/// All queries are total: out-of-bounds coordinates answer as empty
/// space, never panic.
pub trait TileQuery {
    /// Size of one tile in pixels. Collision resolution uses this to
    /// enumerate the tiles under a body's footprint.
    fn tile_size(&self) -> i32;

    /// Whether the pixel at (px, py) lies inside a solid tile.
    fn is_solid(&self, px: i32, py: i32) -> bool;

    /// Whether the pixel at (px, py) lies inside a hazard tile.
    fn is_hazard(&self, px: i32, py: i32) -> bool;

    /// Whether a body with the given rect has reached the exit.
    fn is_exit(&self, px: i32, py: i32, body: Rect) -> bool;
}

/// The level tile grid, plus the spawn and exit points read out of it.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_size: i32,
    tiles: Vec<TileKind>,
    spawn_pos: Vec2,
    exit_pos: Vec2,
}

impl TileGrid {
    /// Create an empty grid. Spawn and exit default to arbitrary
    /// in-bounds points until a map assigns them.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tile_size: TILE_SIZE,
            tiles: vec![TileKind::Empty; (width * height) as usize],
            spawn_pos: Vec2::new(100.0, 100.0),
            exit_pos: Vec2::new(600.0, 100.0),
        }
    }

    /// Build a grid from ASCII art rows. Rows may be ragged; short rows
    /// are padded with empty tiles. Spawn and exit tiles record their
    /// tile-center pixel positions.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut grid = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let kind = TileKind::from_char(c);
                grid.set(x as i32, y as i32, kind);

                let center = Vec2::new(
                    (x as i32 * TILE_SIZE + TILE_SIZE / 2) as f32,
                    (y as i32 * TILE_SIZE + TILE_SIZE / 2) as f32,
                );
                match kind {
                    TileKind::Spawn => grid.spawn_pos = center,
                    TileKind::Exit => grid.exit_pos = center,
                    _ => {}
                }
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel position of the spawn tile's center.
    pub fn spawn_pos(&self) -> Vec2 {
        self.spawn_pos
    }

    /// Pixel position of the exit tile's center.
    pub fn exit_pos(&self) -> Vec2 {
        self.exit_pos
    }

    /// Tile at grid coordinates. Out of bounds reads as empty.
    pub fn get(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return TileKind::Empty;
        }
        self.tiles[(y as u32 * self.width + x as u32) as usize]
    }

    /// Set a tile at grid coordinates. Out of bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, kind: TileKind) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.tiles[(y as u32 * self.width + x as u32) as usize] = kind;
    }

    /// Tile kind under a pixel position.
    pub fn kind_at_pixel(&self, px: i32, py: i32) -> TileKind {
        self.get(
            px.div_euclid(self.tile_size),
            py.div_euclid(self.tile_size),
        )
    }

    /// Pixel-space bounds of the whole grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.width as i32 * self.tile_size,
            self.height as i32 * self.tile_size,
        )
    }
}

impl TileQuery for TileGrid {
    fn tile_size(&self) -> i32 {
        self.tile_size
    }

    fn is_solid(&self, px: i32, py: i32) -> bool {
        self.kind_at_pixel(px, py) == TileKind::Solid
    }

    fn is_hazard(&self, px: i32, py: i32) -> bool {
        self.kind_at_pixel(px, py) == TileKind::Hazard
    }

    fn is_exit(&self, _px: i32, _py: i32, body: Rect) -> bool {
        let exit = Rect::new(
            self.exit_pos.x as i32 - TILE_SIZE / 2,
            self.exit_pos.y as i32 - TILE_SIZE / 2,
            TILE_SIZE,
            TILE_SIZE,
        );
        body.overlaps(&exit)
    }
}
