use serde::Serialize;
use std::fmt;

pub const NEIGHBOUR_COUNT: usize = 6;

/// Stable handle to a chamber inside its map.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ChamberId(pub usize);

impl fmt::Display for ChamberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChamberKind {
    Entrance,
    Treasure,
    Lighted,
    Plain,
    Sealed,
}

impl ChamberKind {
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'E' => Some(Self::Entrance),
            'T' => Some(Self::Treasure),
            'L' => Some(Self::Lighted),
            '.' => Some(Self::Plain),
            '*' => Some(Self::Sealed),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Entrance => 'E',
            Self::Treasure => 'T',
            Self::Lighted => 'L',
            Self::Plain => '.',
            Self::Sealed => '*',
        }
    }
}

/// Where the traversal left a chamber.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum VisitState {
    #[default]
    Unvisited,
    Pushed,
    Popped,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct Chamber {
    pub kind: ChamberKind,
    pub position: Position,
    /// neighbours[i] = chamber through side i, None at the map edge
    pub neighbours: [Option<ChamberId>; NEIGHBOUR_COUNT],
    state: VisitState,
}

impl Chamber {
    pub fn new(kind: ChamberKind, position: Position) -> Self {
        Self {
            kind,
            position,
            neighbours: [None; NEIGHBOUR_COUNT],
            state: VisitState::Unvisited,
        }
    }

    /// Neighbour through side `i`; `None` for a missing side or `i >= 6`.
    pub fn neighbour(&self, i: usize) -> Option<ChamberId> {
        self.neighbours.get(i).copied().flatten()
    }

    pub fn is_sealed(&self) -> bool {
        self.kind == ChamberKind::Sealed
    }

    pub fn is_lighted(&self) -> bool {
        self.kind == ChamberKind::Lighted
    }

    pub fn is_treasure(&self) -> bool {
        self.kind == ChamberKind::Treasure
    }

    pub fn is_marked(&self) -> bool {
        self.state != VisitState::Unvisited
    }

    pub fn state(&self) -> VisitState {
        self.state
    }

    pub fn mark_pushed(&mut self) {
        self.state = VisitState::Pushed;
    }

    /// Records a backtrack. The chamber stays marked, so it is never entered
    /// again.
    pub fn mark_popped(&mut self) {
        self.state = VisitState::Popped;
    }
}
