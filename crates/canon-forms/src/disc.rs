//! The circle family: outline service and disc realizer.

use crate::artifact::PathArtifact;
use canon_kernel::{
    Form, FormRealization, RealizeContext, Realizer, RealizerFault, RealizerIdentity,
};
use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};

/// Segment-count bounds for tessellated outlines.
const MIN_SEGMENTS: usize = 16;
const MAX_SEGMENTS: usize = 4096;

/// Choose a segment count whose chord error stays within epsilon.
///
/// The sagitta of a chord spanning angle θ on a circle of radius r is
/// r·(1 − cos(θ/2)); solving for θ at sagitta = ε gives the widest
/// admissible segment. Clamped so degenerate tolerances still tessellate.
pub(crate) fn segments_for(radius: f64, epsilon: f64) -> usize {
    let ratio = (1.0 - epsilon / radius).clamp(-1.0, 1.0);
    let max_angle = 2.0 * ratio.acos();
    if max_angle <= 0.0 {
        return MIN_SEGMENTS;
    }
    let segments = (TAU / max_angle).ceil() as usize;
    segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Build the closed outline of a circle of the given radius.
///
/// Pure geometry; knows nothing about declarations or validation.
pub fn disc_outline(radius: f64, epsilon: f64) -> PathArtifact {
    let segments = segments_for(radius, epsilon);
    let points = (0..segments)
        .map(|i| {
            let angle = TAU * (i as f64) / (segments as f64);
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect();
    PathArtifact {
        points,
        closed: true,
    }
}

/// Realizer for planar circles.
///
/// Wraps [`disc_outline`]; derives area and circumference from the same
/// canonical radius the service received.
pub struct DiscRealizer;

impl Realizer for DiscRealizer {
    fn identity(&self) -> RealizerIdentity {
        RealizerIdentity::new("disc", env!("CARGO_PKG_VERSION"))
    }

    fn supported_kinds(&self) -> &[&str] {
        &["Circle"]
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

        let artifact = disc_outline(radius, ctx.epsilon).into_value();

        let mut metrics = BTreeMap::new();
        metrics.insert("area".to_string(), PI * radius * radius);
        metrics.insert("circumference".to_string(), TAU * radius);
        metrics.insert("radius".to_string(), radius);

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
    fn outline_is_closed_and_on_the_circle() {
        let path = disc_outline(10.0, 1e-3);
        assert!(path.closed);
        assert!(path.points.len() >= MIN_SEGMENTS);
        for [x, y] in &path.points {
            let r = (x * x + y * y).sqrt();
            assert!((r - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn tighter_epsilon_means_more_segments() {
        assert!(segments_for(10.0, 1e-6) > segments_for(10.0, 1e-2));
    }

    #[test]
    fn segment_count_is_clamped() {
        assert_eq!(segments_for(10.0, 1e-12), MAX_SEGMENTS);
        assert_eq!(segments_for(10.0, 100.0), MIN_SEGMENTS);
    }
}
