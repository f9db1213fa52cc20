//! Wavefront OBJ loading.
//!
//! Parses the text-based OBJ format into renderer-agnostic triangle
//! geometry. Supported records are `v` (position), `vn` (normal) and `f`
//! (face); texture coordinates and everything else are ignored. Faces with
//! more than three corners are fan-triangulated from the first vertex.
//!
//! Malformed records and out-of-range face indices abort the load: a
//! silently incomplete mesh would misrepresent the scene.

use std::fs;
use std::path::Path;

use lux_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading OBJ geometry.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read OBJ file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed {kind} record")]
    Malformed { line: usize, kind: &'static str },

    #[error("line {line}: {kind} index {index} out of range ({available} available)")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        available: usize,
    },
}

/// One triangle of loaded geometry.
///
/// `normals` is present only when every corner of the source face
/// referenced a vertex normal; otherwise the consumer applies flat shading.
#[derive(Debug, Clone)]
pub struct ObjTriangle {
    pub positions: [Vec3; 3],
    pub normals: Option<[Vec3; 3]>,
}

/// Triangulated geometry loaded from an OBJ source.
#[derive(Debug, Clone, Default)]
pub struct ObjGeometry {
    pub triangles: Vec<ObjTriangle>,
}

impl ObjGeometry {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// One corner of a face: resolved position index plus optional normal index.
struct Corner {
    position: usize,
    normal: Option<usize>,
}

/// Load OBJ geometry from a file.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<ObjGeometry, ObjError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ObjError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let geometry = parse_obj(&source)?;
    log::debug!(
        "loaded {} triangles from {}",
        geometry.triangle_count(),
        path.display()
    );
    Ok(geometry)
}

/// Parse OBJ geometry from text.
pub fn parse_obj(source: &str) -> Result<ObjGeometry, ObjError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut geometry = ObjGeometry::default();

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => positions.push(parse_vec3(tokens, line_no, "vertex")?),
            Some("vn") => {
                let n = parse_vec3(tokens, line_no, "normal")?;
                normals.push(n.normalize());
            }
            Some("f") => {
                let corners = tokens
                    .map(|token| parse_corner(token, line_no, positions.len(), normals.len()))
                    .collect::<Result<Vec<Corner>, ObjError>>()?;

                if corners.len() < 3 {
                    return Err(ObjError::Malformed {
                        line: line_no,
                        kind: "face",
                    });
                }

                // Fan triangulation: (0, i, i+1)
                for i in 1..corners.len() - 1 {
                    geometry.triangles.push(build_triangle(
                        [&corners[0], &corners[i], &corners[i + 1]],
                        &positions,
                        &normals,
                    ));
                }
            }
            // Comments, texture coordinates, groups, materials: ignored
            _ => {}
        }
    }

    Ok(geometry)
}

/// Parse three floats from the remaining tokens of a `v`/`vn` record.
fn parse_vec3<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line: usize,
    kind: &'static str,
) -> Result<Vec3, ObjError> {
    let mut component = || -> Result<f32, ObjError> {
        tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(ObjError::Malformed { line, kind })
    };

    Ok(Vec3::new(component()?, component()?, component()?))
}

/// Parse one face corner token (`v`, `v/vt`, `v//vn` or `v/vt/vn`) and
/// resolve its 1-based indices against the vertices seen so far.
fn parse_corner(
    token: &str,
    line: usize,
    position_count: usize,
    normal_count: usize,
) -> Result<Corner, ObjError> {
    let mut parts = token.split('/');

    let position_index: i64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or(ObjError::Malformed { line, kind: "face" })?;
    let position = resolve_index(position_index, position_count, line, "vertex")?;

    // Texture coordinate slot, ignored
    let _ = parts.next();

    let normal = match parts.next() {
        Some(part) if !part.is_empty() => {
            let normal_index: i64 = part
                .parse()
                .map_err(|_| ObjError::Malformed { line, kind: "face" })?;
            Some(resolve_index(normal_index, normal_count, line, "normal")?)
        }
        _ => None,
    };

    Ok(Corner { position, normal })
}

/// Convert a 1-based OBJ index to a 0-based array index, rejecting
/// references to vertices that do not exist.
fn resolve_index(
    index: i64,
    available: usize,
    line: usize,
    kind: &'static str,
) -> Result<usize, ObjError> {
    if index < 1 || index as usize > available {
        return Err(ObjError::IndexOutOfRange {
            line,
            kind,
            index,
            available,
        });
    }
    Ok(index as usize - 1)
}

fn build_triangle(corners: [&Corner; 3], positions: &[Vec3], normals: &[Vec3]) -> ObjTriangle {
    let triangle_positions = [
        positions[corners[0].position],
        positions[corners[1].position],
        positions[corners[2].position],
    ];

    // Per-vertex normals only when the whole face carries them
    let triangle_normals = match (corners[0].normal, corners[1].normal, corners[2].normal) {
        (Some(a), Some(b), Some(c)) => Some([normals[a], normals[b], normals[c]]),
        _ => None,
    };

    ObjTriangle {
        positions: triangle_positions,
        normals: triangle_normals,
    }
}
