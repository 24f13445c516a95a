use std::{
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use index_vec::{Idx, IndexVec};
use thiserror::Error;

use crate::{
    geometry::{FloatType, TexturePoint, Triangle, WorldPoint, WorldVector, normalize_or_zero},
    util::lenient::parse_or_default,
};

use super::{Mesh, MeshTriangle, NormalIdx, PositionIdx, TextureIdx, TriangleIdx};

#[derive(Debug, Error)]
pub enum ObjLoadError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read file: {0}")]
    Read(#[from] io::Error),
}

/// Face index that points outside of its attribute array.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("Triangle {triangle} references {kind} {index}, but only {count} are defined")]
struct InvalidIndex {
    triangle: usize,
    kind: AttributeKind,
    index: i64,
    count: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum AttributeKind {
    Position,
    TextureCoordinate,
    Normal,
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AttributeKind::Position => "vertex",
            AttributeKind::TextureCoordinate => "texture coordinate",
            AttributeKind::Normal => "normal",
        })
    }
}

impl Mesh {
    /// Loads a mesh from an OBJ file.
    pub fn with_obj(path: impl AsRef<Path>, faceted: bool) -> Result<Mesh, ObjLoadError> {
        let mut mesh = Mesh::new(faceted);
        mesh.load_obj(path)?;
        Ok(mesh)
    }

    /// Replaces the geometry of this mesh with the content of an OBJ file.
    /// On error the mesh is left unchanged.
    pub fn load_obj(&mut self, path: impl AsRef<Path>) -> Result<(), ObjLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ObjLoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        self.read_obj(BufReader::new(file))
    }

    /// Replaces the geometry of this mesh with OBJ data read from `reader`.
    ///
    /// Supports `v`, `vn`, `vt` and `f` records, everything else is skipped. Polygons are
    /// split into triangle fans around their first corner.
    /// Unparsable numbers read as zero, so an unparsable index refers to the sentinel.
    /// Triangles with indices outside of the defined attributes are skipped with a warning.
    /// Only unreadable input fails the load, the mesh is left unchanged then.
    pub fn read_obj(&mut self, mut reader: impl BufRead) -> Result<(), ObjLoadError> {
        let mut obj = ObjData::default();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            obj.parse_line(&String::from_utf8_lossy(&buffer));
        }

        let triangles: IndexVec<TriangleIdx, _> = obj
            .faces
            .iter()
            .enumerate()
            .filter_map(|(i, corners)| match obj.resolve_triangle(i, corners) {
                Ok(triangle) => Some(triangle),
                Err(e) => {
                    log::warn!("Skipping triangle: {e}");
                    None
                }
            })
            .collect();

        self.positions = obj.positions;
        self.normals = obj.normals;
        self.texture_coords = obj.texture_coords;
        self.triangles = triangles;
        self.bounding_sphere = OnceLock::new();

        log::info!("Mesh loaded, {} triangles", self.triangles.len());

        Ok(())
    }
}

/// Attribute references of a single polygon corner, as written in the file.
/// Absent references are zero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct FaceCorner {
    position: i64,
    texture: i64,
    normal: i64,
}

impl FaceCorner {
    /// Parses `v`, `v/vt`, `v//vn` or `v/vt/vn`
    fn parse(token: &str) -> FaceCorner {
        let mut items = token.split('/');
        FaceCorner {
            position: parse_or_default(items.next()),
            texture: parse_or_default(items.next()),
            normal: parse_or_default(items.next()),
        }
    }
}

/// Content of an OBJ file before indices are validated.
struct ObjData {
    positions: IndexVec<PositionIdx, WorldPoint>,
    normals: IndexVec<NormalIdx, WorldVector>,
    texture_coords: IndexVec<TextureIdx, TexturePoint>,
    faces: Vec<Triangle<FaceCorner>>,
}

impl Default for ObjData {
    fn default() -> Self {
        let empty = Mesh::default();
        ObjData {
            positions: empty.positions,
            normals: empty.normals,
            texture_coords: empty.texture_coords,
            faces: Vec::new(),
        }
    }
}

impl ObjData {
    fn parse_line(&mut self, line: &str) {
        if line.starts_with('#') {
            return;
        }

        let mut tokens = line.split_whitespace();
        let Some(kind) = tokens.next() else {
            return;
        };

        match kind {
            "v" => {
                self.positions.push(WorldPoint::from(parse_vector(tokens)));
            }
            "vn" => {
                self.normals.push(parse_vector(tokens));
            }
            "vt" => {
                let u = parse_or_default(tokens.next());
                let v = parse_or_default(tokens.next());
                self.texture_coords.push(TexturePoint::new(u, v, 0.0));
            }
            "f" => {
                let corners: Vec<FaceCorner> = tokens.map(FaceCorner::parse).collect();
                if corners.len() < 3 {
                    log::warn!("Skipping face with {} corners", corners.len());
                    return;
                }
                self.faces.extend(
                    corners
                        .windows(2)
                        .skip(1)
                        .map(|pair| Triangle::new(corners[0], pair[0], pair[1])),
                );
            }
            _ => {}
        }
    }

    /// Converts file indices of a face into mesh indices and derives the triangle geometry.
    fn resolve_triangle(
        &self,
        triangle: usize,
        corners: &Triangle<FaceCorner>,
    ) -> Result<MeshTriangle, InvalidIndex> {
        let positions = resolve_indices(
            corners,
            |corner| corner.position,
            self.positions.len(),
            AttributeKind::Position,
            triangle,
        )?;
        let texture_coords = resolve_indices(
            corners,
            |corner| corner.texture,
            self.texture_coords.len(),
            AttributeKind::TextureCoordinate,
            triangle,
        )?;
        let normals = resolve_indices(
            corners,
            |corner| corner.normal,
            self.normals.len(),
            AttributeKind::Normal,
            triangle,
        )?;

        let corner_positions = positions.map(|i| self.positions[*i]);
        let corner_texture_coords = texture_coords.map(|i| self.texture_coords[*i]);
        let (dndx, dndy) = texture_differentials(&corner_positions, &corner_texture_coords);

        Ok(MeshTriangle {
            positions,
            normals,
            texture_coords,
            face_normal: normalize_or_zero(corner_positions.normal()),
            dndx,
            dndy,
        })
    }
}

/// Converts one kind of file indices of a face into indices of an attribute array that has
/// `len` entries including the sentinel.
fn resolve_indices<I: Idx>(
    corners: &Triangle<FaceCorner>,
    index: impl Fn(&FaceCorner) -> i64,
    len: usize,
    kind: AttributeKind,
    triangle: usize,
) -> Result<Triangle<I>, InvalidIndex> {
    let resolved = corners.map(|corner| resolve_index(index(corner), len, kind, triangle));
    Ok(Triangle::new(resolved[0]?, resolved[1]?, resolved[2]?))
}

fn resolve_index<I: Idx>(
    index: i64,
    len: usize,
    kind: AttributeKind,
    triangle: usize,
) -> Result<I, InvalidIndex> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .map(I::from_usize)
        .ok_or(InvalidIndex {
            triangle,
            kind,
            index,
            count: len - 1,
        })
}

fn parse_vector<'a>(mut tokens: impl Iterator<Item = &'a str>) -> WorldVector {
    let x = parse_or_default(tokens.next());
    let y = parse_or_default(tokens.next());
    let z = parse_or_default(tokens.next());
    WorldVector::new(x, y, z)
}

/// Calculates unit vectors in object space along which the texture coordinates u and v grow.
///
/// Texture edges are expressed in terms of position edges by solving
/// `(1, 0) = px * tex_ab + qx * tex_ac` and `(0, 1) = py * tex_ab + qy * tex_ac`,
/// then `dndx = px * ab + qx * ac` and `dndy = py * ab + qy * ac`.
/// Degenerate texture edges give zero vectors.
fn texture_differentials(
    positions: &Triangle<WorldPoint>,
    texture_coords: &Triangle<TexturePoint>,
) -> (WorldVector, WorldVector) {
    let [ab, ac] = positions.edges();
    let [tex_ab, tex_ac] = texture_coords.edges();

    let (px, qx) = solve_2d(&tex_ab, &tex_ac, 1.0, 0.0);
    let (py, qy) = solve_2d(&tex_ab, &tex_ac, 0.0, 1.0);

    (
        normalize_or_zero(ab * px + ac * qx),
        normalize_or_zero(ab * py + ac * qy),
    )
}

/// Solves `x * a + y * b = (h0, h1)` in the xy plane using Cramer's rule.
/// Results are infinite or NaN if `a` and `b` are collinear.
fn solve_2d(
    a: &WorldVector,
    b: &WorldVector,
    h0: FloatType,
    h1: FloatType,
) -> (FloatType, FloatType) {
    let det = a.x * b.y - a.y * b.x;
    let x = (h0 * b.y - h1 * b.x) / det;
    let y = (a.x * h1 - a.y * h0) / det;
    (x, y)
}
