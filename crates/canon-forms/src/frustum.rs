//! The truncated-pyramid family: square frustum mesh and realizer.

use crate::artifact::MeshArtifact;
use canon_kernel::{
    Form, FormRealization, RealizeContext, Realizer, RealizerFault, RealizerIdentity,
};
use std::collections::BTreeMap;

/// Build a square frustum: a pyramid truncated parallel to its base.
///
/// The base square has the given edge; the top square edge is
/// `base_edge * truncation_ratio`; the base sits on the XZ plane.
pub fn square_frustum(base_edge: f64, height: f64, truncation_ratio: f64) -> MeshArtifact {
    let b = base_edge / 2.0;
    let t = base_edge * truncation_ratio / 2.0;

    let vertices = vec![
        // base ring
        [-b, 0.0, -b],
        [b, 0.0, -b],
        [b, 0.0, b],
        [-b, 0.0, b],
        // top ring
        [-t, height, -t],
        [t, height, -t],
        [t, height, t],
        [-t, height, t],
    ];

    let triangles = vec![
        // base (facing down)
        [0, 2, 1],
        [0, 3, 2],
        // top (facing up)
        [4, 5, 6],
        [4, 6, 7],
        // sides
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];

    MeshArtifact {
        vertices,
        triangles,
    }
}

/// Realizer for truncated pyramids.
pub struct FrustumRealizer;

impl FrustumRealizer {
    fn positive_param(form: &Form, param: &str) -> Result<f64, RealizerFault> {
        let value = form
            .param(param)
            .ok_or_else(|| RealizerFault::MissingParameter {
                param: param.into(),
            })?;
        if !(value.is_finite() && value > 0.0) {
            return Err(RealizerFault::ParameterOutOfRange {
                param: param.into(),
                detail: format!("must be positive, got {value}"),
            });
        }
        Ok(value)
    }
}

impl Realizer for FrustumRealizer {
    fn identity(&self) -> RealizerIdentity {
        RealizerIdentity::new("frustum", env!("CARGO_PKG_VERSION"))
    }

    fn supported_kinds(&self) -> &[&str] {
        &["TruncatedPyramid"]
    }

    fn realize_form(
        &self,
        form: &Form,
        ctx: &RealizeContext<'_>,
    ) -> Result<FormRealization, RealizerFault> {
        let base_edge = Self::positive_param(form, "base_edge")?;
        let height = Self::positive_param(form, "height")?;
        let ratio = Self::positive_param(form, "truncation_ratio")?;

        let artifact = square_frustum(base_edge, height, ratio).into_value();

        let base_area = base_edge * base_edge;
        let top_edge = base_edge * ratio;
        let top_area = top_edge * top_edge;
        let volume = height / 3.0 * (base_area + top_area + (base_area * top_area).sqrt());

        let mut metrics = BTreeMap::new();
        metrics.insert("base_area".to_string(), base_area);
        metrics.insert("top_area".to_string(), top_area);
        metrics.insert("volume".to_string(), volume);

        Ok(FormRealization {
            form_id: form.id.clone(),
            artifact,
            metrics,
            provenance: ctx.provenance(self.identity(), &form.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frustum_mesh_is_a_closed_box() {
        let mesh = square_frustum(2.0, 1.0, 0.5);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangles.len(), 12);
    }

    #[test]
    fn frustum_volume_formula() {
        // base 2x2 (A=4), ratio 0.5 → top 1x1 (A=1), height 3:
        // V = 3/3 * (4 + 1 + 2) = 7
        let base_area = 4.0_f64;
        let top_area = 1.0_f64;
        let volume = 3.0 / 3.0 * (base_area + top_area + (base_area * top_area).sqrt());
        assert!((volume - 7.0).abs() < 1e-12);
    }
}
