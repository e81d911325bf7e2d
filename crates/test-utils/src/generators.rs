//! Generators for synthetic ADCIRC files.
//!
//! Values follow predictable patterns so tests can check every entry
//! without keeping a copy of the expected array around.

use std::fmt::Write;

/// Dry sentinel written by ADCIRC.
pub const DRY_SENTINEL: f64 = -99999.0;

/// Output interval used for generated timesteps, in seconds.
pub const TIME_STEP_SECONDS: f64 = 3600.0;

/// Value written for `(node, column, time)` by [`field_file_text`].
///
/// `node * 1000 + column * 100 + time`, all 0-based.
pub fn expected_value(node: usize, column: usize, time: usize) -> f64 {
    (node * 1000 + column * 100 + time) as f64
}

/// Time value written for timestep `time` (0-based).
pub fn expected_time(time: usize) -> f64 {
    (time + 1) as f64 * TIME_STEP_SECONDS
}

/// Coordinates of node `index` in a grid from [`rectangular_grid_text`].
pub fn grid_node(nx: usize, index: usize) -> (f64, f64) {
    ((index % nx) as f64, (index / nx) as f64)
}

/// Depth of node `index` in a grid from [`rectangular_grid_text`].
pub fn grid_depth(nx: usize, index: usize) -> f64 {
    let (x, y) = grid_node(nx, index);
    1.0 + x + 0.5 * y
}

/// Text of an `nx` by `ny` structured triangulation.
///
/// Nodes are numbered row by row starting at 1, spaced one unit apart.
/// Each cell is split into two counter-clockwise triangles, giving
/// `2 * (nx - 1) * (ny - 1)` elements.
pub fn rectangular_grid_text(nx: usize, ny: usize) -> String {
    let num_nodes = nx * ny;
    let cells_x = nx.saturating_sub(1);
    let cells_y = ny.saturating_sub(1);
    let num_elements = 2 * cells_x * cells_y;

    let mut text = String::new();
    let _ = writeln!(text, "generated {}x{} grid", nx, ny);
    let _ = writeln!(text, "{} {}", num_elements, num_nodes);

    for index in 0..num_nodes {
        let (x, y) = grid_node(nx, index);
        let _ = writeln!(
            text,
            "{:>8} {:>14.7} {:>14.7} {:>14.7}",
            index + 1,
            x,
            y,
            grid_depth(nx, index)
        );
    }

    let mut element = 1;
    for row in 0..cells_y {
        for col in 0..cells_x {
            let sw = row * nx + col + 1;
            let se = sw + 1;
            let nw = sw + nx;
            let ne = nw + 1;
            let _ = writeln!(text, "{} 3 {} {} {}", element, sw, se, ne);
            let _ = writeln!(text, "{} 3 {} {} {}", element + 1, sw, ne, nw);
            element += 2;
        }
    }
    text
}

/// 0-based triangles [`rectangular_grid_text`] writes, in file order.
pub fn rectangular_grid_triangles(nx: usize, ny: usize) -> Vec<[i32; 3]> {
    let mut triangles = Vec::new();
    for row in 0..ny.saturating_sub(1) {
        for col in 0..nx.saturating_sub(1) {
            let sw = (row * nx + col) as i32;
            let se = sw + 1;
            let nw = sw + nx as i32;
            let ne = nw + 1;
            triangles.push([sw, se, ne]);
            triangles.push([sw, ne, nw]);
        }
    }
    triangles
}

/// Boundary section in the shape ADCIRC writes after the element table.
pub fn boundary_section_text() -> String {
    [
        "1 = Number of open boundaries",
        "2 = Total number of open boundary nodes",
        "2 = Number of nodes for open boundary 1",
        "1",
        "2",
        "1 = Number of land boundaries",
        "2 = Total number of land boundary nodes",
        "2 0 = Number of nodes for land boundary 1",
        "3",
        "4",
        "",
    ]
    .join("\n")
}

/// Text of a time-series file with values from [`expected_value`].
///
/// Every column of each `(node, time)` pair listed in `dry` is written as
/// [`DRY_SENTINEL`].
pub fn field_file_text(
    num_nodes: usize,
    num_columns: usize,
    num_times: usize,
    dry: &[(usize, usize)],
) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "generated field");
    let _ = writeln!(
        text,
        "{:>5} {:>7} {:>16.7E} {:>7} {:>4}",
        num_times, num_nodes, TIME_STEP_SECONDS, 36, num_columns
    );

    for time in 0..num_times {
        let _ = writeln!(text, "{:>16.7E} {:>10}", expected_time(time), (time + 1) * 36);
        for node in 0..num_nodes {
            let _ = write!(text, "{:>8}", node + 1);
            for column in 0..num_columns {
                let value = if dry.contains(&(node, time)) {
                    DRY_SENTINEL
                } else {
                    expected_value(node, column, time)
                };
                let _ = write!(text, " {:>16.7E}", value);
            }
            text.push('\n');
        }
    }
    text
}
