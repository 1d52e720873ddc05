use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, warn};
use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{MeshingError, Result};
use crate::math::{triangle_2d, Point2};
use crate::outline::Outline;
use crate::refine::RefinementPredicate;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Refinement passes before the engine gives up on the area bound.
const MAX_REFINEMENT_PASSES: usize = 64;

/// Upper bound on Steiner vertices added during refinement.
const MAX_STEINER_VERTICES: usize = 100_000;

/// Complete problem description handed to the triangulation engine:
/// the boundary outline, one interior point marking the region that must
/// stay unmeshed, and the predicate bounding triangle size.
#[derive(Debug)]
pub struct MeshProblem {
    pub outline: Outline,
    pub hole: Point2,
    pub refinement: Box<dyn RefinementPredicate>,
}

/// Two-dimensional triangle mesh produced by the engine.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub triangles: Vec<[usize; 3]>,
}

/// Triangulates a [`MeshProblem`] with constrained Delaunay refinement.
pub struct Triangulate<'a> {
    problem: &'a MeshProblem,
}

impl<'a> Triangulate<'a> {
    /// Creates a new `Triangulate` operation.
    #[must_use]
    pub fn new(problem: &'a MeshProblem) -> Self {
        Self { problem }
    }

    /// Executes the triangulation, returning the refined mesh.
    ///
    /// The outline loops are inserted as constraint edges, the enclosed
    /// region is selected by odd-even constraint crossing (so the hole
    /// loop's interior stays void), and triangles rejected by the
    /// refinement predicate are split by centroid insertion until the
    /// predicate accepts them or the vertex budget runs out.
    ///
    /// # Errors
    ///
    /// Returns an [`OutlineError`](crate::error::OutlineError) when the
    /// outline violates its invariants, and a [`MeshingError`] when point
    /// insertion fails or the hole point lands inside the meshed region.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let outline = &self.problem.outline;
        outline.validate()?;

        let mut cdt = Cdt::new();
        let mut handles = Vec::with_capacity(outline.points.len());
        for p in &outline.points {
            let h = insert_point(&mut cdt, Point2::new(p.x, p.y))?;
            handles.push(h);
        }
        for seg in &outline.segments {
            let from = handles[seg.start];
            let to = handles[seg.end];
            if from != to {
                cdt.add_constraint(from, to);
            }
        }

        let mut enclosed = classify_enclosed_faces(&cdt);
        self.check_hole_is_void(&cdt, &enclosed)?;

        let mut passes = 0;
        loop {
            let centroids = self.collect_violations(&cdt, &enclosed);
            if centroids.is_empty() {
                break;
            }
            passes += 1;
            if passes > MAX_REFINEMENT_PASSES
                || cdt.num_vertices() >= outline.points.len() + MAX_STEINER_VERTICES
            {
                warn!(
                    "refinement stopped early after {passes} passes with {} vertices",
                    cdt.num_vertices()
                );
                break;
            }
            for c in centroids {
                insert_point(&mut cdt, c)?;
            }
            enclosed = classify_enclosed_faces(&cdt);
        }

        let mesh = extract_mesh(&cdt, &enclosed);
        debug!(
            "triangulated outline into {} vertices, {} triangles after {passes} refinement passes",
            mesh.vertices.len(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }

    /// Collects the centroids of enclosed triangles the predicate rejects.
    fn collect_violations(&self, cdt: &Cdt, enclosed: &HashSet<usize>) -> Vec<Point2> {
        let mut centroids = Vec::new();
        for face in cdt.inner_faces() {
            if !enclosed.contains(&face.fix().index()) {
                continue;
            }
            let tri = face_triangle(&face);
            let area = triangle_2d::area(tri[0], tri[1], tri[2]);
            if self.problem.refinement.should_refine(&tri, area) {
                centroids.push(Point2::new(
                    (tri[0].x + tri[1].x + tri[2].x) / 3.0,
                    (tri[0].y + tri[1].y + tri[2].y) / 3.0,
                ));
            }
        }
        centroids
    }

    /// Confirms the hole point lies outside every enclosed triangle.
    fn check_hole_is_void(&self, cdt: &Cdt, enclosed: &HashSet<usize>) -> Result<()> {
        let hole = self.problem.hole;
        for face in cdt.inner_faces() {
            if !enclosed.contains(&face.fix().index()) {
                continue;
            }
            let tri = face_triangle(&face);
            if triangle_2d::contains_point(tri[0], tri[1], tri[2], hole) {
                return Err(MeshingError::HoleInsideRegion {
                    x: hole.x,
                    y: hole.y,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn insert_point(cdt: &mut Cdt, p: Point2) -> Result<spade::handles::FixedVertexHandle> {
    cdt.insert(SpadePoint2::new(p.x, p.y))
        .map_err(|e: InsertionError| MeshingError::Insertion(format!("{e}")).into())
}

fn face_triangle<DE, UE, F>(
    face: &spade::handles::FaceHandle<'_, InnerTag, SpadePoint2<f64>, DE, UE, F>,
) -> [Point2; 3] {
    let verts = face.vertices();
    [
        Point2::new(verts[0].position().x, verts[0].position().y),
        Point2::new(verts[1].position().x, verts[1].position().y),
        Point2::new(verts[2].position().x, verts[2].position().y),
    ]
}

/// Classifies which inner faces lie inside the boundary using flood-fill.
///
/// Starts from faces adjacent to the outer (infinite) face at depth 0. Each
/// time a constraint edge is crossed, depth increments. Odd depth means the
/// face is enclosed; a hole loop's interior sits at depth 2 and stays void.
fn classify_enclosed_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut enclosed = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    // Seed: inner faces adjacent to the outer face via directed edges
    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            let rev_face = edge.rev().face();
            if let Some(inner) = rev_face.as_inner() {
                let idx = inner.fix().index();
                if depth_map.contains_key(&idx) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(idx, depth);
                if depth % 2 == 1 {
                    enclosed.insert(idx);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    // BFS flood-fill
    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let neighbor = edge.rev().face();
            if let Some(inner_neighbor) = neighbor.as_inner() {
                let n_idx = inner_neighbor.fix().index();
                if depth_map.contains_key(&n_idx) {
                    continue;
                }
                let new_depth = if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    depth + 1
                } else {
                    depth
                };
                depth_map.insert(n_idx, new_depth);
                if new_depth % 2 == 1 {
                    enclosed.insert(n_idx);
                }
                queue.push_back((inner_neighbor.fix(), new_depth));
            }
        }
    }

    enclosed
}

/// Builds the output mesh from the enclosed CDT faces, deduplicating
/// vertices through an index map.
fn extract_mesh(cdt: &Cdt, enclosed: &HashSet<usize>) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let mut vertex_map: HashMap<usize, usize> = HashMap::new();

    for face in cdt.inner_faces() {
        if !enclosed.contains(&face.fix().index()) {
            continue;
        }

        let mut tri = [0usize; 3];
        for (i, vh) in face.vertices().iter().enumerate() {
            let idx = vh.fix().index();
            let mesh_idx = if let Some(&existing) = vertex_map.get(&idx) {
                existing
            } else {
                let pos = vh.position();
                let new_idx = mesh.vertices.len();
                mesh.vertices.push(Point2::new(pos.x, pos.y));
                vertex_map.insert(idx, new_idx);
                new_idx
            };
            tri[i] = mesh_idx;
        }
        mesh.triangles.push(tri);
    }

    mesh
}
