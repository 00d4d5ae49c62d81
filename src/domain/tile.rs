/// Tile kinds and their display glyphs.
/// Glyphs live here so the projection and the renderer share one table.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Empty,
    Wall,
    Hazard,
    Finish,
    Player,
}

impl Tile {
    /// Character used when projecting the grid to text.
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => 'H',
            Tile::Hazard => 'X',
            Tile::Finish => 'O',
            Tile::Player => 'P',
        }
    }
}
