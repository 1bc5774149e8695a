//! The sphere family: UV-mesh service and sphere realizer.

use crate::artifact::MeshArtifact;
use crate::disc::segments_for;
use canon_kernel::{
    Form, FormRealization, RealizeContext, Realizer, RealizerFault, RealizerIdentity,
};
use std::collections::BTreeMap;
use std::f64::consts::PI;

const MIN_RINGS: usize = 8;
const MAX_RINGS: usize = 256;

/// Build a UV-sphere triangle mesh for the given radius.
///
/// Ring count follows the same chord-error bound as the disc outline,
/// halved for the meridian span and clamped to keep meshes tractable.
pub fn uv_sphere(radius: f64, epsilon: f64) -> MeshArtifact {
    let rings = (segments_for(radius, epsilon) / 2).clamp(MIN_RINGS, MAX_RINGS);
    let segments = rings * 2;

    let mut vertices = Vec::with_capacity((rings + 1) * segments);
    for ring in 0..=rings {
        let theta = PI * (ring as f64) / (rings as f64);
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..segments {
            let phi = 2.0 * PI * (segment as f64) / (segments as f64);
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push([
                radius * sin_theta * cos_phi,
                radius * cos_theta,
                radius * sin_theta * sin_phi,
            ]);
        }
    }

    let mut triangles = Vec::new();
    let seg = segments as u32;
    for ring in 0..rings as u32 {
        for segment in 0..seg {
            let next = (segment + 1) % seg;
            let a = ring * seg + segment;
            let b = ring * seg + next;
            let c = (ring + 1) * seg + segment;
            let d = (ring + 1) * seg + next;
            if ring > 0 {
                triangles.push([a, b, c]);
            }
            if ring < rings as u32 - 1 {
                triangles.push([b, d, c]);
            }
        }
    }

    MeshArtifact {
        vertices,
        triangles,
    }
}

/// Realizer for spheres.
pub struct SphereRealizer;

impl Realizer for SphereRealizer {
    fn identity(&self) -> RealizerIdentity {
        RealizerIdentity::new("sphere", env!("CARGO_PKG_VERSION"))
    }

    fn supported_kinds(&self) -> &[&str] {
        &["Sphere"]
    }

    fn realize_form(
        &self,
        form: &Form,
        ctx: &RealizeContext<'_>,
    ) -> Result<FormRealization, RealizerFault> {
        let radius = form
            .param("radius")
            .ok_or_else(|| RealizerFault::MissingParameter {
                param: "radius".into(),
            })?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RealizerFault::ParameterOutOfRange {
                param: "radius".into(),
                detail: format!("radius must be positive, got {radius}"),
            });
        }

        let artifact = uv_sphere(radius, ctx.epsilon).into_value();

        let mut metrics = BTreeMap::new();
        metrics.insert("surface_area".to_string(), 4.0 * PI * radius * radius);
        metrics.insert(
            "volume".to_string(),
            4.0 / 3.0 * PI * radius * radius * radius,
        );
        metrics.insert("radius".to_string(), radius);

        Ok(FormRealization {
            form_id: form.id.clone(),
            artifact,
            metrics,
            provenance: ctx.provenance(self.identity(), &form.id),
        })
    }
}
