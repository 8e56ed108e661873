use crate::chamber::{Chamber, ChamberId, ChamberKind, NEIGHBOUR_COUNT, Position, VisitState};
use crate::chamber_map::ChamberMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// (row, col) offsets of sides 0..5, clockwise from the upper-right.
/// Odd rows sit half a cell to the right of even rows.
const SIDE_OFFSETS: [[(isize, isize); NEIGHBOUR_COUNT]; 2] = [
    // even rows: NE, E, SE, SW, W, NW
    [(-1, 0), (0, 1), (1, 0), (1, -1), (0, -1), (-1, -1)],
    // odd rows
    [(-1, 1), (0, 1), (1, 1), (1, 0), (0, -1), (-1, 0)],
];

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read map file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map has no size header")]
    MissingHeader,
    #[error("bad size header {line:?}, expected \"<rows> <cols>\"")]
    BadHeader { line: String },
    #[error("map dimensions must be positive, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("expected {expected} rows of chambers, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} chambers, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid map character {ch:?} at row {row}, column {col}")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("map has no entrance")]
    MissingEntrance,
    #[error("second entrance at {second}, the first one is at {first}")]
    MultipleEntrances { first: Position, second: Position },
}

/// A hexagonal grid of chambers loaded from a map file.
///
/// ```text
/// # rows cols, then one line per row
/// 2 3
/// E L .
///  * . T
/// ```
#[derive(Debug, Clone)]
pub struct Pyramid {
    rows: usize,
    cols: usize,
    chambers: Vec<Chamber>,
    entrance: ChamberId,
    treasures: usize,
}

impl Pyramid {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines.next().ok_or(MapError::MissingHeader)?;
        let (rows, cols) = parse_header(header)?;

        let grid: Vec<&str> = lines.collect();
        if grid.len() != rows {
            return Err(MapError::RowCount {
                expected: rows,
                found: grid.len(),
            });
        }

        let mut chambers = Vec::new();
        let mut entrance: Option<Position> = None;
        let mut treasures = 0;

        for (row, line) in grid.iter().enumerate() {
            let mut width = 0;
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let kind = ChamberKind::from_symbol(ch)
                    .ok_or(MapError::InvalidCharacter { ch, row, col })?;
                let position = Position { row, col };
                match kind {
                    ChamberKind::Entrance => {
                        if let Some(first) = entrance {
                            return Err(MapError::MultipleEntrances {
                                first,
                                second: position,
                            });
                        }
                        entrance = Some(position);
                    }
                    ChamberKind::Treasure => treasures += 1,
                    _ => {}
                }
                chambers.push(Chamber::new(kind, position));
                width += 1;
            }
            if width != cols {
                return Err(MapError::RowWidth {
                    row,
                    expected: cols,
                    found: width,
                });
            }
        }

        let entrance = entrance.ok_or(MapError::MissingEntrance)?;
        let mut pyramid = Self {
            rows,
            cols,
            chambers,
            entrance: ChamberId(entrance.row * cols + entrance.col),
            treasures,
        };
        pyramid.link_neighbours();

        debug!(
            "Loaded {}x{} pyramid: entrance {}, {} treasures",
            rows, cols, entrance, treasures
        );
        Ok(pyramid)
    }

    fn link_neighbours(&mut self) {
        for index in 0..self.chambers.len() {
            let Position { row, col } = self.chambers[index].position;
            for side in 0..NEIGHBOUR_COUNT {
                self.chambers[index].neighbours[side] = self.neighbour_id(row, col, side);
            }
        }
    }

    fn neighbour_id(&self, row: usize, col: usize, side: usize) -> Option<ChamberId> {
        let (dr, dc) = SIDE_OFFSETS[row % 2].get(side).copied()?;
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < self.rows && c < self.cols).then(|| ChamberId(r * self.cols + c))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn chambers(&self) -> &[Chamber] {
        &self.chambers
    }

    pub fn chamber_at(&self, row: usize, col: usize) -> Option<ChamberId> {
        (row < self.rows && col < self.cols).then(|| ChamberId(row * self.cols + col))
    }

    /// Draws the grid with the traversal's marks: `+` on the path, `-`
    /// backtracked, `$` a collected treasure.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (row, line) in self.chambers.chunks(self.cols).enumerate() {
            if row % 2 == 1 {
                out.push(' ');
            }
            let glyphs: Vec<String> = line.iter().map(|c| glyph(c).to_string()).collect();
            out.push_str(&glyphs.join(" "));
            out.push('\n');
        }
        out
    }
}

fn glyph(chamber: &Chamber) -> char {
    match (chamber.kind, chamber.state()) {
        (ChamberKind::Entrance, _) => 'E',
        (ChamberKind::Treasure, VisitState::Pushed | VisitState::Popped) => '$',
        (_, VisitState::Pushed) => '+',
        (_, VisitState::Popped) => '-',
        (kind, VisitState::Unvisited) => kind.symbol(),
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), MapError> {
    let bad = || MapError::BadHeader {
        line: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    let rows = parts.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    let cols = parts.next().and_then(|s| s.parse().ok()).ok_or_else(bad)?;
    if parts.next().is_some() {
        return Err(bad());
    }
    if rows == 0 || cols == 0 {
        return Err(MapError::EmptyGrid { rows, cols });
    }
    // chamber ids are row * cols + col
    if rows.checked_mul(cols).is_none() {
        return Err(bad());
    }
    Ok((rows, cols))
}

impl ChamberMap for Pyramid {
    fn entrance(&self) -> ChamberId {
        self.entrance
    }

    fn treasure_count(&self) -> usize {
        self.treasures
    }

    fn chamber_count(&self) -> usize {
        self.chambers.len()
    }

    fn chamber(&self, id: ChamberId) -> &Chamber {
        &self.chambers[id.0]
    }

    fn chamber_mut(&mut self, id: ChamberId) -> &mut Chamber {
        &mut self.chambers[id.0]
    }
}
