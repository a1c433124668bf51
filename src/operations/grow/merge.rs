use tracing::{debug, trace};

use super::GrownSet;
use crate::config::MergePolicy;
use crate::error::GeometryError;
use crate::math::{convex_hull_indices, segment_enters_convex, segments_intersect, Point2};
use crate::world::{GrownVertex, Shape, ShapeId};

/// Merges overlapping grown shapes into the convex hull of their union.
///
/// Two shapes overlap when a pair of their edges intersects or an edge of one
/// runs through the interior of the other. Shapes that only share boundary
/// stay apart. Overlapping shapes are grouped transitively within a pass;
/// each group with more than one member is replaced by the hull of all its
/// vertices, and the resulting shapes are renumbered densely.
pub struct MergeOverlapping {
    policy: MergePolicy,
    eps: f64,
}

impl MergeOverlapping {
    /// Creates a new `MergeOverlapping` operation.
    #[must_use]
    pub fn new(policy: MergePolicy, eps: f64) -> Self {
        Self { policy, eps }
    }

    /// Merges overlapping shapes according to the policy.
    ///
    /// With [`MergePolicy::FixedPoint`] passes repeat until one merges
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateObstacle` if a merged hull has no
    /// area.
    pub fn execute(&self, grown: GrownSet) -> Result<GrownSet, GeometryError> {
        match self.policy {
            MergePolicy::Disabled => Ok(grown),
            MergePolicy::SinglePass => Ok(self.merge_pass(grown)?.0),
            MergePolicy::FixedPoint => {
                let mut current = grown;
                let mut passes = 0;
                loop {
                    let (next, merged) = self.merge_pass(current)?;
                    passes += 1;
                    if !merged {
                        debug!(passes, shapes = next.shapes.len(), "merge reached fixed point");
                        return Ok(next);
                    }
                    current = next;
                }
            }
        }
    }

    /// Runs one merge pass. The flag is `true` if any shapes were merged.
    fn merge_pass(&self, set: GrownSet) -> Result<(GrownSet, bool), GeometryError> {
        let n = set.shapes.len();
        let boxes: Vec<Bounds> = set
            .shapes
            .iter()
            .map(|s| Bounds::of(set.vertices[s.range()].iter().map(|v| v.point)))
            .collect();

        let mut groups = UnionFind::new(n);
        let mut merged = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if groups.find(i) == groups.find(j) || !boxes[i].overlaps(&boxes[j], self.eps) {
                    continue;
                }
                if self.overlap(&set, set.shapes[i], set.shapes[j]) {
                    trace!(first = i, second = j, "grown shapes overlap");
                    groups.union(i, j);
                    merged = true;
                }
            }
        }
        if !merged {
            return Ok((set, false));
        }

        // Members listed in ascending order, groups keyed by their largest
        // member, which is also the root.
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n];
        for i in 0..n {
            members[groups.find(i)].push(i);
        }

        let mut out = GrownSet::default();
        for group in members.iter().filter(|m| !m.is_empty()) {
            let id = ShapeId(out.shapes.len());
            let pooled: Vec<GrownVertex> = group
                .iter()
                .flat_map(|&s| set.vertices[set.shapes[s].range()].iter().copied())
                .collect();
            if group.len() == 1 {
                out.push_shape(pooled.into_iter().map(|v| GrownVertex { shape: id, ..v }));
                continue;
            }

            let points: Vec<Point2> = pooled.iter().map(|v| v.point).collect();
            let hull = convex_hull_indices(&points, self.eps)?;
            debug!(
                shapes = ?group,
                into = id.0,
                vertices = hull.len(),
                "merged overlapping grown shapes"
            );
            out.push_shape(hull.into_iter().map(|k| GrownVertex {
                shape: id,
                ..pooled[k]
            }));
        }
        Ok((out, true))
    }

    fn overlap(&self, set: &GrownSet, a: Shape, b: Shape) -> bool {
        self.outlines_cross(set, a, b)
            || self.edge_inside(set, a, b)
            || self.edge_inside(set, b, a)
    }

    /// Some edge of `a` passes through the interior of `b`.
    fn edge_inside(&self, set: &GrownSet, a: Shape, b: Shape) -> bool {
        let v = &set.vertices;
        a.edges().any(|(a0, a1)| {
            let outline = b.edges().map(|(b0, b1)| (v[b0].point, v[b1].point));
            segment_enters_convex(&v[a0].point, &v[a1].point, outline, self.eps)
        })
    }

    fn outlines_cross(&self, set: &GrownSet, a: Shape, b: Shape) -> bool {
        a.edges().any(|(a0, a1)| {
            b.edges().any(|(b0, b1)| {
                segments_intersect(
                    &set.vertices[a0].point,
                    &set.vertices[a1].point,
                    &set.vertices[b0].point,
                    &set.vertices[b1].point,
                    self.eps,
                )
            })
        })
    }
}

/// Axis-aligned bounds used to skip distant shape pairs.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Point2,
    max: Point2,
}

impl Bounds {
    fn of(points: impl Iterator<Item = Point2>) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Self { min, max }
    }

    fn overlaps(&self, other: &Bounds, eps: f64) -> bool {
        self.min.x <= other.max.x + eps
            && other.min.x <= self.max.x + eps
            && self.min.y <= other.max.y + eps
            && other.min.y <= self.max.y + eps
    }
}

/// Disjoint sets over shape indices; the larger index of a union becomes the
/// root.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra.min(rb)] = ra.max(rb);
        }
    }
}
