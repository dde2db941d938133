use crate::math::{Point2, Segment};
use crate::mesh::{Mesh, VertexPayload};

/// Default line-of-sight test through the walkable region.
///
/// `from`–`to` is visible iff no boundary edge strictly crosses it and every
/// piece of it between boundary vertices it passes through has a walkable
/// midpoint. The second check rejects lines that leave the mesh through a
/// vertex or run along a gap without crossing any edge.
#[must_use]
pub fn is_visible<T: VertexPayload>(mesh: &Mesh<T>, from: &Point2, to: &Point2) -> bool {
    let boundary = mesh.boundary_edges();
    if boundary.iter().any(|edge| edge.crosses(from, to).is_some()) {
        return false;
    }

    let line = Segment::new(*from, *to);
    let mut cuts = vec![0.0, 1.0];
    for edge in boundary {
        for corner in [edge.a, edge.b] {
            if !line.contains(&corner) {
                continue;
            }
            if let Some(t) = line.project(&corner) {
                if t > 0.0 && t < 1.0 {
                    cuts.push(t);
                }
            }
        }
    }
    cuts.sort_by(f64::total_cmp);
    cuts.dedup();

    cuts.windows(2)
        .all(|w| mesh.is_walkable(&line.point_at((w[0] + w[1]) * 0.5)))
}
