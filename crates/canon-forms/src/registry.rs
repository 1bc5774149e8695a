//! Explicit registration of the built-in realizers.

use crate::disc::DiscRealizer;
use crate::frustum::FrustumRealizer;
use crate::polygon::PolygonRealizer;
use crate::sphere::SphereRealizer;
use canon_kernel::{CanonEngine, RealizerRegistry, builtin_rules};
use std::sync::Arc;

/// Registry covering every built-in geometric family.
///
/// Registration happens here, at this explicit call — never as an
/// import-time side effect.
pub fn standard_registry() -> RealizerRegistry {
    let mut registry = RealizerRegistry::new();
    registry.register(Arc::new(DiscRealizer));
    registry.register(Arc::new(SphereRealizer));
    registry.register(Arc::new(PolygonRealizer));
    registry.register(Arc::new(FrustumRealizer));
    registry
}

/// An engine equipped with the built-in rules and realizers.
pub fn standard_engine() -> CanonEngine {
    CanonEngine::new(builtin_rules(), standard_registry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_the_built_in_kinds() {
        let registry = standard_registry();
        assert_eq!(
            registry.kinds(),
            vec!["Circle", "RegularPolygon", "Sphere", "TruncatedPyramid"]
        );
    }
}
