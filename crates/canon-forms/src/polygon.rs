//! The regular-polygon family.

use crate::artifact::PathArtifact;
use canon_kernel::{
    Form, FormRealization, RealizeContext, Realizer, RealizerFault, RealizerIdentity,
};
use std::collections::BTreeMap;
use std::f64::consts::{PI, TAU};

/// Build the closed outline of a regular n-gon on its circumcircle.
pub fn regular_polygon(sides: u32, circumradius: f64) -> PathArtifact {
    let points = (0..sides)
        .map(|i| {
            let angle = TAU * (i as f64) / (sides as f64);
            [circumradius * angle.cos(), circumradius * angle.sin()]
        })
        .collect();
    PathArtifact {
        points,
        closed: true,
    }
}

/// Realizer for regular polygons.
pub struct PolygonRealizer;

impl PolygonRealizer {
    /// The `sides` parameter must be an integer ≥ 3.
    fn sides_of(form: &Form) -> Result<u32, RealizerFault> {
        let sides = form
            .param("sides")
            .ok_or_else(|| RealizerFault::MissingParameter {
                param: "sides".into(),
            })?;
        if sides.fract() != 0.0 || sides < 3.0 || sides > u32::MAX as f64 {
            return Err(RealizerFault::ParameterOutOfRange {
                param: "sides".into(),
                detail: format!("sides must be an integer >= 3, got {sides}"),
            });
        }
        Ok(sides as u32)
    }
}

impl Realizer for PolygonRealizer {
    fn identity(&self) -> RealizerIdentity {
        RealizerIdentity::new("polygon", env!("CARGO_PKG_VERSION"))
    }

    fn supported_kinds(&self) -> &[&str] {
        &["RegularPolygon"]
    }

    fn realize_form(
        &self,
        form: &Form,
        ctx: &RealizeContext<'_>,
    ) -> Result<FormRealization, RealizerFault> {
        let sides = Self::sides_of(form)?;
        let circumradius =
            form.param("circumradius")
                .ok_or_else(|| RealizerFault::MissingParameter {
                    param: "circumradius".into(),
                })?;
        if !(circumradius.is_finite() && circumradius > 0.0) {
            return Err(RealizerFault::ParameterOutOfRange {
                param: "circumradius".into(),
                detail: format!("circumradius must be positive, got {circumradius}"),
            });
        }

        let artifact = regular_polygon(sides, circumradius).into_value();

        let n = sides as f64;
        let mut metrics = BTreeMap::new();
        metrics.insert(
            "area".to_string(),
            0.5 * n * circumradius * circumradius * (TAU / n).sin(),
        );
        metrics.insert(
            "perimeter".to_string(),
            2.0 * n * circumradius * (PI / n).sin(),
        );
        metrics.insert("sides".to_string(), n);

        Ok(FormRealization {
            form_id: form.id.clone(),
            artifact,
            metrics,
            provenance: ctx.provenance(self.identity(), &form.id),
        })
    }
}
