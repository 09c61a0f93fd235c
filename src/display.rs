//! Plain text projection of a grid, built only from [`CellView`]s.

use colored::Colorize as _;
use hashbrown::HashSet;

use crate::{
    core::Dims,
    maze::{CellView, CellWall, Grid},
};

const CURSOR: &str = " @ ";
const TRAIL: &str = " . ";
const BLOCKED: &str = " x ";
const EMPTY: &str = "   ";
const UNVISITED: &str = " # ";

/// Draws `grid` with `trail` and the optional `cursor` highlighted.
///
/// Dead ends are marked only with `show_blocked` and never over the trail.
pub fn render_text(
    grid: &Grid,
    trail: &[Dims],
    cursor: Option<Dims>,
    show_blocked: bool,
) -> String {
    let Dims(cols, rows) = grid.size();
    let on_trail: HashSet<Dims> = trail.iter().copied().collect();
    let view = |x, y| -> CellView {
        grid.cell_at(x, y)
            .unwrap_or_else(|| panic!("cell ({}, {}) out of bounds", x, y))
    };

    let mut out = String::new();
    for y in 0..rows {
        for x in 0..cols {
            out.push('+');
            out.push_str(horizontal(view(x, y).has_wall(CellWall::Top)));
        }
        out.push_str("+\n");

        for x in 0..cols {
            let cell = view(x, y);
            out.push(vertical(cell.has_wall(CellWall::Left)));

            let pos = Dims(x, y);
            let body = if Some(pos) == cursor {
                CURSOR.bright_green().bold().to_string()
            } else if on_trail.contains(&pos) {
                TRAIL.yellow().to_string()
            } else if show_blocked && cell.blocked {
                BLOCKED.red().to_string()
            } else if !cell.visited {
                UNVISITED.dimmed().to_string()
            } else {
                EMPTY.to_string()
            };
            out.push_str(&body);
        }
        out.push(vertical(view(cols - 1, y).has_wall(CellWall::Right)));
        out.push('\n');
    }

    for x in 0..cols {
        out.push('+');
        out.push_str(horizontal(view(x, rows - 1).has_wall(CellWall::Bottom)));
    }
    out.push('+');

    out
}

fn horizontal(wall: bool) -> &'static str {
    if wall {
        "---"
    } else {
        "   "
    }
}

fn vertical(wall: bool) -> char {
    if wall {
        '|'
    } else {
        ' '
    }
}
