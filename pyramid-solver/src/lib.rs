pub mod chamber;
pub mod chamber_map;
pub mod path_finder;
pub mod pyramid;
pub mod report;
pub mod stack;

pub use chamber::{Chamber, ChamberId, ChamberKind, Position, VisitState};
pub use chamber_map::ChamberMap;
pub use path_finder::{Exploration, PathFinder, find_path};
pub use pyramid::{MapError, Pyramid};
pub use report::PathReport;
pub use stack::{DLStack, StackError};
