//! Minimal Wavefront OBJ reader producing the raw per-occurrence arrays
//! [`mesh_planner_core::model::Mesh::from_raw`] expects (spec §6, "External
//! interfaces" — mesh ingestion is a binary-crate concern, not a core one).
//!
//! Supports `v`/`vn`/`f` records. Faces may reference normals (`f a//b`) or
//! omit them (`f a`), in which case the flat face normal is assigned to all
//! three corners.

use crate::error::AppError;
use mesh_planner_core::model::{Mesh, Point3};
use mesh_planner_core::PlannerError;
use std::collections::HashMap;
use std::path::Path;

pub fn read_obj(path: &Path) -> Result<Mesh, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::MeshFileError {
        path: path.display().to_string(),
        source,
    })?;

    let mut file_positions: Vec<Point3> = Vec::new();
    let mut file_normals: Vec<Point3> = Vec::new();
    let mut occurrences: HashMap<(usize, Option<usize>), usize> = HashMap::new();
    let mut raw_positions: Vec<Point3> = Vec::new();
    let mut raw_normals: Vec<Point3> = Vec::new();
    let mut raw_triangles: Vec<[usize; 3]> = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else { continue };
        let parse_err = |reason: String| AppError::MeshParseError {
            path: path.display().to_string(),
            line: line_no + 1,
            reason,
        };

        match tag {
            "v" => {
                let xyz = parse_xyz(tokens).map_err(parse_err)?;
                file_positions.push(xyz);
            }
            "vn" => {
                let xyz = parse_xyz(tokens).map_err(parse_err)?;
                file_normals.push(xyz);
            }
            "f" => {
                let corners: Vec<&str> = tokens.collect();
                if corners.len() != 3 {
                    return Err(parse_err(format!(
                        "only triangulated faces are supported, found {} corners",
                        corners.len()
                    )));
                }
                let mut refs = [(0usize, None::<usize>); 3];
                for (slot, corner) in corners.iter().enumerate() {
                    refs[slot] = parse_face_corner(corner).map_err(parse_err)?;
                }

                let positions: [Point3; 3] = refs
                    .map(|(p, _)| file_positions.get(p.wrapping_sub(1)).copied().unwrap_or(Point3::ZERO));
                let fallback_normal = face_normal(positions[0], positions[1], positions[2]);

                let mut tri = [0usize; 3];
                for (slot, (p_idx, n_idx)) in refs.into_iter().enumerate() {
                    let position = *file_positions
                        .get(p_idx.wrapping_sub(1))
                        .ok_or_else(|| parse_err(format!("vertex index {p_idx} out of range")))?;
                    let normal = match n_idx {
                        Some(n) => *file_normals
                            .get(n.wrapping_sub(1))
                            .ok_or_else(|| parse_err(format!("normal index {n} out of range")))?,
                        None => fallback_normal,
                    };
                    let key = (p_idx, n_idx);
                    let raw_id = *occurrences.entry(key).or_insert_with(|| {
                        let id = raw_positions.len();
                        raw_positions.push(position);
                        raw_normals.push(normal);
                        id
                    });
                    tri[slot] = raw_id;
                }
                raw_triangles.push(tri);
            }
            _ => continue,
        }
    }

    let mesh = Mesh::from_raw(&raw_positions, &raw_normals, &raw_triangles).map_err(PlannerError::from)?;
    Ok(mesh)
}

fn parse_xyz<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<Point3, String> {
    let mut next = || {
        tokens
            .next()
            .ok_or_else(|| "expected 3 coordinates".to_string())
            .and_then(|t| t.parse::<f64>().map_err(|e| e.to_string()))
    };
    Ok(Point3::new(next()?, next()?, next()?))
}

fn parse_face_corner(corner: &str) -> Result<(usize, Option<usize>), String> {
    let mut parts = corner.split('/');
    let p = parts
        .next()
        .ok_or_else(|| "empty face corner".to_string())?
        .parse::<usize>()
        .map_err(|e| e.to_string())?;
    let _texture = parts.next();
    let normal = match parts.next() {
        Some(s) if !s.is_empty() => Some(s.parse::<usize>().map_err(|e| e.to_string())?),
        _ => None,
    };
    Ok((p, normal))
}

fn face_normal(a: Point3, b: Point3, c: Point3) -> Point3 {
    let u = b - a;
    let v = c - a;
    let cross = Point3::new(
        u.y * v.z - u.z * v.y,
        u.z * v.x - u.x * v.z,
        u.x * v.y - u.y * v.x,
    );
    let n = cross.norm();
    if n <= 0.0 {
        Point3::GRAVITY
    } else {
        cross * (1.0 / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn reads_a_unit_triangle_with_explicit_normals() {
        let file = write_fixture(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
        );
        let mesh = read_obj(file.path()).unwrap();
        assert_eq!(mesh.n_vertices(), 3);
        assert_eq!(mesh.n_triangles(), 1);
    }

    #[test]
    fn falls_back_to_the_flat_face_normal_when_absent() {
        let file = write_fixture("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        let mesh = read_obj(file.path()).unwrap();
        let normal = mesh.normal(mesh_planner_core::model::VertexId::new(0)).unwrap();
        assert!((normal.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_a_non_triangular_face() {
        let file = write_fixture("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3 4\n");
        let err = read_obj(file.path()).unwrap_err();
        assert!(matches!(err, AppError::MeshParseError { .. }));
    }
}
