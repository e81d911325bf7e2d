//! Integration tests for grid file reading.
//!
//! Synthetic grids are written to temp files so every check runs against
//! the file-backed reader, not just the in-memory one.

use adcirc_parser::{read_grid, AdcircError};
use test_utils::{
    boundary_section_text, grid_depth, grid_node, rectangular_grid_text,
    rectangular_grid_triangles, TempFixture, MINIMAL_GRID,
};

#[test]
fn test_minimal_grid_from_file() {
    let fixture = TempFixture::new();
    let path = fixture.write("fort.14", MINIMAL_GRID);

    let mesh = read_grid(&path).unwrap();
    assert_eq!(mesh.title, "minimal grid");
    assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    assert_eq!(mesh.depths, vec![10.0, 20.0, 30.0]);
}

#[test]
fn test_generated_grids_have_consistent_lengths() {
    let fixture = TempFixture::new();
    for (nx, ny) in [(2, 2), (5, 3), (1, 4), (10, 10)] {
        let path = fixture.write(&format!("grid_{}x{}.14", nx, ny), &rectangular_grid_text(nx, ny));
        let mesh = read_grid(&path).unwrap();

        let n = nx * ny;
        assert_eq!(mesh.coordinates.len(), n);
        assert_eq!(mesh.depths.len(), n);
        assert_eq!(mesh.triangles.len(), 2 * (nx - 1) * (ny - 1));
        assert_eq!(mesh.triangles, rectangular_grid_triangles(nx, ny));
        for tri in &mesh.triangles {
            for &v in tri {
                assert!(v >= 0 && (v as usize) < n, "index {} out of range", v);
            }
        }
    }
}

#[test]
fn test_generated_grid_values() {
    let fixture = TempFixture::new();
    let path = fixture.write("fort.14", &rectangular_grid_text(4, 3));
    let mesh = read_grid(&path).unwrap();

    for index in 0..12 {
        let (x, y) = grid_node(4, index);
        assert_eq!(mesh.coordinates[index], [x, y]);
        assert_eq!(mesh.depths[index], grid_depth(4, index));
    }

    let extent = mesh.extent().unwrap();
    assert_eq!((extent.min_x, extent.max_x), (0.0, 3.0));
    assert_eq!((extent.min_y, extent.max_y), (0.0, 2.0));
}

#[test]
fn test_boundary_section_does_not_change_result() {
    let fixture = TempFixture::new();
    let grid = rectangular_grid_text(3, 3);
    let plain = fixture.write("plain.14", &grid);
    let with_boundary = fixture.write("boundary.14", &(grid + &boundary_section_text()));

    let a = read_grid(&plain).unwrap();
    let b = read_grid(&with_boundary).unwrap();
    assert_eq!(a.coordinates, b.coordinates);
    assert_eq!(a.depths, b.depths);
    assert_eq!(a.triangles, b.triangles);
    assert_eq!(a.skipped_boundary_lines, 0);
    assert_eq!(b.skipped_boundary_lines, 10);
}

#[test]
fn test_header_missing_node_count() {
    let fixture = TempFixture::new();
    let path = fixture.write("bad.14", "title\n4\n");
    let err = read_grid(&path).unwrap_err();
    match err {
        AdcircError::Format { line, .. } => assert_eq!(line, 2),
        other => panic!("expected format error, got {:?}", other),
    }
}

#[test]
fn test_header_not_numeric() {
    let fixture = TempFixture::new();
    let path = fixture.write("bad.14", "title\nNE NP\n");
    assert!(read_grid(&path).unwrap_err().is_format());
}

#[test]
fn test_fewer_nodes_than_declared() {
    let fixture = TempFixture::new();
    let text: String = rectangular_grid_text(3, 3).lines().take(6).map(|l| format!("{}\n", l)).collect();
    let path = fixture.write("short.14", &text);
    let err = read_grid(&path).unwrap_err();
    assert_eq!(err.line(), Some(7));
}

#[test]
fn test_missing_file() {
    let fixture = TempFixture::new();
    let err = read_grid(fixture.dir().join("absent.14")).unwrap_err();
    assert!(matches!(err, AdcircError::Io { .. }));
}

#[test]
fn test_blank_line_between_node_records() {
    let fixture = TempFixture::new();
    let path = fixture.write("gap.14", "title\n0 2\n1 0.0 0.0 1.0\n\n2 1.0 0.0 2.0\n");
    let err = read_grid(&path).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_whitespace_line_in_element_table() {
    let fixture = TempFixture::new();
    let mut text: String = rectangular_grid_text(2, 2);
    text.insert_str(text.rfind("2 3 ").unwrap(), "   \t\n");
    let path = fixture.write("gap.14", &text);
    let err = read_grid(&path).unwrap_err();
    assert_eq!(err.line(), Some(2 + 4 + 2));
}

#[test]
fn test_huge_counts_on_truncated_file() {
    let fixture = TempFixture::new();
    let path = fixture.write("huge.14", &format!("title\n{} {}\n", usize::MAX, usize::MAX / 8));
    let err = read_grid(&path).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.line(), Some(3));
}
