//! ASCII STL parsing.
//!
//! The accepted grammar is the standard ASCII STL subset: lines are
//! tokenized by whitespace, runs of lines delimited by `endfacet`
//! (case-insensitive) constitute one facet, and lines whose first token
//! is `vertex` contribute three real coordinates. Facet normals,
//! `outer loop`/`endloop`, `solid`/`endsolid` and any other tokens are
//! ignored. A facet with a vertex count other than three is a fatal
//! error.

use super::{Facet, Mesh};
use crate::geometry::Point;
use crate::{Error, Result};
use std::path::Path;

/// Load an ASCII STL file into a mesh.
pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse_stl(&content)
}

/// Parse ASCII STL text into a mesh.
pub fn parse_stl(content: &str) -> Result<Mesh> {
    let mut facets = Vec::new();
    let mut vertices: Vec<Point> = Vec::with_capacity(3);

    for (lineno, line) in content.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };

        if first.eq_ignore_ascii_case("vertex") {
            let mut coords = [0.0f64; 3];
            for coord in &mut coords {
                let token = tokens.next().ok_or_else(|| {
                    Error::Stl(format!("line {}: vertex with missing coordinate", lineno + 1))
                })?;
                *coord = token.parse().map_err(|_| {
                    Error::Stl(format!(
                        "line {}: invalid vertex coordinate '{}'",
                        lineno + 1,
                        token
                    ))
                })?;
            }
            vertices.push(Point::new(coords[0], coords[1], coords[2]));
        } else if first.eq_ignore_ascii_case("endfacet") {
            if vertices.len() != 3 {
                return Err(Error::Stl(format!(
                    "line {}: facet with {} vertices, expected 3",
                    lineno + 1,
                    vertices.len()
                )));
            }
            facets.push(Facet::new([vertices[0], vertices[1], vertices[2]]));
            vertices.clear();
        }
        // facet normal, outer loop, endloop, solid, endsolid: ignored
    }

    if !vertices.is_empty() {
        return Err(Error::Stl(format!(
            "unterminated facet with {} vertices at end of input",
            vertices.len()
        )));
    }

    Ok(Mesh::new(facets))
}
