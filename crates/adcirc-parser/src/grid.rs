//! Reader for ADCIRC grid specification files (fort.14).
//!
//! # Format
//!
//! ```text
//! <title>
//! <num_elements> <num_nodes>
//! <node_id> <x> <y> <depth>                  (num_nodes lines)
//! <elem_id> <n_vertices> <v1> <v2> <v3>      (num_elements lines)
//! [boundary specification, not parsed]
//! ```
//!
//! Element vertices are 1-based in the file and stored 0-based.

use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{AdcircError, AdcircResult};
use crate::lines::{initial_capacity, LineReader, READER_PATH};

/// Axis-aligned extent of the mesh nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Triangulated mesh geometry read from a grid file.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Title line of the grid file
    pub title: String,
    /// (x, y) per node, indexed by 0-based node order in the file
    pub coordinates: Vec<[f64; 2]>,
    /// Depth per node
    pub depths: Vec<f64>,
    /// 0-based vertex indices per element, counter-clockwise as given
    pub triangles: Vec<[i32; 3]>,
    /// Non-blank lines after the element table that were not parsed
    pub skipped_boundary_lines: usize,
}

impl Mesh {
    pub fn num_nodes(&self) -> usize {
        self.coordinates.len()
    }

    pub fn num_elements(&self) -> usize {
        self.triangles.len()
    }

    /// Coordinates of node `index`.
    pub fn node(&self, index: usize) -> Option<[f64; 2]> {
        self.coordinates.get(index).copied()
    }

    /// Vertex coordinates of element `index`.
    ///
    /// Returns `None` if the element or any of its vertices is out of range;
    /// connectivity is stored as read and never validated against the node count.
    pub fn triangle_nodes(&self, index: usize) -> Option<[[f64; 2]; 3]> {
        let tri = self.triangles.get(index)?;
        let vertex = |v: i32| usize::try_from(v).ok().and_then(|i| self.node(i));
        Some([vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?])
    }

    /// Bounding extent of all nodes, or `None` for an empty mesh.
    pub fn extent(&self) -> Option<Extent> {
        let (first, rest) = self.coordinates.split_first()?;
        let init = Extent {
            min_x: first[0],
            min_y: first[1],
            max_x: first[0],
            max_y: first[1],
        };
        Some(rest.iter().fold(init, |e, [x, y]| Extent {
            min_x: e.min_x.min(*x),
            min_y: e.min_y.min(*y),
            max_x: e.max_x.max(*x),
            max_y: e.max_y.max(*y),
        }))
    }
}

/// Read a grid specification file.
pub fn read_grid(path: impl AsRef<Path>) -> AdcircResult<Mesh> {
    let path = path.as_ref();
    info!(path = %path.display(), "Reading ADCIRC grid");
    let mut reader = LineReader::open(path)?;
    parse_grid(&mut reader)
}

/// Read a grid specification from any buffered reader.
pub fn read_grid_from<R: BufRead>(input: R) -> AdcircResult<Mesh> {
    parse_grid(&mut LineReader::new(input, READER_PATH))
}

fn parse_grid<R: BufRead>(reader: &mut LineReader<R>) -> AdcircResult<Mesh> {
    let title = reader.title()?;

    let header = reader.record("grid header")?;
    header.require(2, "grid header (num_elements num_nodes)")?;
    let num_elements: usize = header.parse(0, "element count")?;
    let num_nodes: usize = header.parse(1, "node count")?;
    debug!(num_elements, num_nodes, title = %title, "Parsed grid header");

    let mut coordinates = Vec::with_capacity(initial_capacity(num_nodes));
    let mut depths = Vec::with_capacity(initial_capacity(num_nodes));
    for n in 0..num_nodes {
        let record = reader.record(&format!("node record {} of {}", n + 1, num_nodes))?;
        record.require(4, "node record (id x y depth)")?;
        let x: f64 = record.parse(1, "x coordinate")?;
        let y: f64 = record.parse(2, "y coordinate")?;
        let depth: f64 = record.parse(3, "depth")?;
        coordinates.push([x, y]);
        depths.push(depth);
    }

    let mut triangles = Vec::with_capacity(initial_capacity(num_elements));
    for n in 0..num_elements {
        let record = reader.record(&format!("element record {} of {}", n + 1, num_elements))?;
        record.require(5, "element record (id n_vertices v1 v2 v3)")?;
        let mut tri = [0i32; 3];
        for (k, slot) in tri.iter_mut().enumerate() {
            let vertex: i32 = record.parse(2 + k, "node index")?;
            *slot = vertex.checked_sub(1).ok_or_else(|| {
                AdcircError::format(
                    record.line(),
                    format!("node index at token {} is out of i32 range", 3 + k),
                )
            })?;
        }
        triangles.push(tri);
    }

    let skipped_boundary_lines = reader.skip_remaining()?;
    if skipped_boundary_lines > 0 {
        warn!(
            lines = skipped_boundary_lines,
            "Boundary data reading has not been implemented, continuing"
        );
    }

    info!(
        nodes = coordinates.len(),
        elements = triangles.len(),
        "Finished reading ADCIRC grid"
    );

    Ok(Mesh {
        title,
        coordinates,
        depths,
        triangles,
        skipped_boundary_lines,
    })
}
