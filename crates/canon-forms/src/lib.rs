//! # Canon Forms
//!
//! The built-in geometric families for the Canon engine. Each family is
//! split the same way:
//!
//! - a **service**: a pure `build(params) -> artifact` function that owns
//!   all geometry computation,
//! - a **realizer**: the adapter that extracts canonical parameters, calls
//!   the service, derives metrics, and assembles provenance,
//! - a **solver**: a constructor producing a fully-specified `Declaration`
//!   from the family's canonical parameter.
//!
//! Realizers never compute geometry and never validate; services never see
//! declarations.

pub mod artifact;
pub mod disc;
pub mod frustum;
pub mod polygon;
pub mod registry;
pub mod solver;
pub mod sphere;

pub use artifact::{MeshArtifact, PathArtifact};
pub use disc::DiscRealizer;
pub use frustum::FrustumRealizer;
pub use polygon::PolygonRealizer;
pub use registry::{standard_engine, standard_registry};
pub use sphere::SphereRealizer;
