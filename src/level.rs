//! Plain-text levels: equal-length rows of characters, each mapped to a [CellState] through a
//! [Legend]. Row `y` of the text holds the cells with that `y` coordinate, column `x` the cells
//! with that `x` coordinate.
use crate::grid::{CellState, Grid};
use crate::{FxIndexMap, GridError, GridResult};
use grid_util::point::Point;
use log::debug;

/// Character written by [Grid::to_rows] for states the legend has no character for.
pub const UNMAPPED_CHAR: char = '?';

/// Maps level characters to cell states. Characters without an entry read as
/// [Free](CellState::Free).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Legend {
    map: FxIndexMap<char, CellState>,
}

impl Default for Legend {
    /// `.` free, `#` blocked, `S` start, `D` destination, `*` on-route.
    fn default() -> Legend {
        Legend::empty()
            .with('.', CellState::Free)
            .with('#', CellState::Blocked)
            .with('S', CellState::Start)
            .with('D', CellState::Destination)
            .with('*', CellState::OnRoute)
    }
}

impl Legend {
    pub fn empty() -> Legend {
        Legend {
            map: FxIndexMap::default(),
        }
    }

    pub fn with(mut self, c: char, state: CellState) -> Legend {
        self.insert(c, state);
        self
    }

    /// Adds or replaces the mapping of `c`.
    pub fn insert(&mut self, c: char, state: CellState) {
        self.map.insert(c, state);
    }

    pub fn state_for(&self, c: char) -> CellState {
        self.map.get(&c).copied().unwrap_or_default()
    }

    /// The first character mapped to `state`, in insertion order.
    pub fn char_for(&self, state: CellState) -> Option<char> {
        self.map
            .iter()
            .find(|(_, s)| **s == state)
            .map(|(&c, _)| c)
    }
}

impl FromIterator<(char, CellState)> for Legend {
    fn from_iter<I: IntoIterator<Item = (char, CellState)>>(iter: I) -> Legend {
        Legend {
            map: iter.into_iter().collect(),
        }
    }
}

/// Checks that the rows form a non-empty rectangle and returns its width.
fn level_width<S: AsRef<str>>(rows: &[S]) -> GridResult<usize> {
    let expected = match rows.first() {
        Some(row) => row.as_ref().chars().count(),
        None => return Err(GridError::EmptyLevel),
    };
    if expected == 0 {
        return Err(GridError::EmptyLevel);
    }
    for (row, line) in rows.iter().enumerate() {
        let found = line.as_ref().chars().count();
        if found != expected {
            return Err(GridError::InconsistentRowLength {
                row,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}

impl Grid {
    /// Replaces the grid with the level described by `rows`. The rows are validated before
    /// anything is changed. When several characters map to the start or the destination, the
    /// last one in reading order wins.
    pub fn load_from_rows<S: AsRef<str>>(&mut self, rows: &[S], legend: &Legend) -> GridResult<()> {
        let width = level_width(rows)?;
        self.resize(width, rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                let state = legend.state_for(c);
                if state != CellState::Free {
                    self.set_state(Point::new(x as i32, y as i32), state)?;
                }
            }
        }
        debug!(
            "Loaded {}x{} level, start {:?}, destination {:?}",
            width,
            rows.len(),
            self.start_position(),
            self.destination_position()
        );
        Ok(())
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S], legend: &Legend) -> GridResult<Grid> {
        let mut grid = Grid::new(1, 1)?;
        grid.load_from_rows(rows, legend)?;
        Ok(grid)
    }

    /// Parses a level from text with one row per line.
    pub fn from_level_str(text: &str, legend: &Legend) -> GridResult<Grid> {
        let rows = text.lines().collect::<Vec<&str>>();
        Grid::from_rows(&rows, legend)
    }

    /// Writes the grid back as rows of characters.
    pub fn to_rows(&self, legend: &Legend) -> Vec<String> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| {
                        self.state(Point::new(x, y))
                            .and_then(|state| legend.char_for(state))
                            .unwrap_or(UNMAPPED_CHAR)
                    })
                    .collect::<String>()
            })
            .collect()
    }
}
