use crate::chamber::{ChamberKind, Position};
use crate::chamber_map::ChamberMap;
use crate::path_finder::Exploration;
use crate::stack::DLStack;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PathStep {
    pub row: usize,
    pub col: usize,
    pub kind: ChamberKind,
}

/// Summary of a run, shaped for JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathReport {
    pub map: String,
    pub complete: bool,
    pub treasures_found: usize,
    pub treasures_total: usize,
    pub pushes: usize,
    pub pops: usize,
    /// Entrance first.
    pub path: Vec<PathStep>,
}

impl PathReport {
    pub fn new<M: ChamberMap>(map_name: impl Into<String>, map: &M, exploration: &Exploration) -> Self {
        let mut path: Vec<PathStep> = exploration
            .path
            .iter()
            .map(|&id| {
                let chamber = map.chamber(id);
                PathStep {
                    row: chamber.position.row,
                    col: chamber.position.col,
                    kind: chamber.kind,
                }
            })
            .collect();
        path.reverse();

        Self {
            map: map_name.into(),
            complete: exploration.is_complete(),
            treasures_found: exploration.treasures_found,
            treasures_total: exploration.treasures_total,
            pushes: exploration.pushes,
            pops: exploration.pops,
            path,
        }
    }

    /// Chamber positions in stack order, most recent first.
    pub fn render_trail(&self) -> String {
        let trail: DLStack<Position> = self
            .path
            .iter()
            .map(|step| Position {
                row: step.row,
                col: step.col,
            })
            .collect();
        trail.to_string()
    }
}
