//! The declaration AST.
//!
//! A `Declaration` is the immutable input to the engine: one or more declared
//! forms, the relations and invariant constraints that bind them, optional
//! motion traces, and an explicit numeric tolerance. Construction performs no
//! validation — every judgment about a declaration is made by the rule set,
//! never by the constructor.
//!
//! Annotation fields (`title`, `notes`, `metadata`) carry human context only
//! and are excluded from the content signature under the default policy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Curvature character of a declared form.
///
/// Closed set: a form is flat, constantly curved, or variably curved.
/// Consistency with the form's `kind` is checked by the curvature rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurvatureClass {
    /// Zero curvature everywhere (lines, polygons, polyhedra).
    Flat,

    /// The same nonzero curvature everywhere (circles, spheres).
    Constant,

    /// Curvature varies along the form (ellipses, spirals, tori).
    Variable,
}

impl fmt::Display for CurvatureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Constant => write!(f, "constant"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

impl std::str::FromStr for CurvatureClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "constant" => Ok(Self::Constant),
            "variable" => Ok(Self::Variable),
            _ => Err(format!("unknown curvature class: {s}")),
        }
    }
}

/// Dimensional habitat of a form: the plane or space.
///
/// Serialized as the integers 2 and 3 to match declaration interchange files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DimensionalClass {
    /// A 2D form living in the plane.
    Planar,

    /// A 3D form living in space.
    Spatial,
}

impl DimensionalClass {
    /// The numeric rank: 2 for planar, 3 for spatial.
    pub fn rank(self) -> u8 {
        match self {
            Self::Planar => 2,
            Self::Spatial => 3,
        }
    }
}

impl From<DimensionalClass> for u8 {
    fn from(class: DimensionalClass) -> u8 {
        class.rank()
    }
}

impl TryFrom<u8> for DimensionalClass {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        match rank {
            2 => Ok(Self::Planar),
            3 => Ok(Self::Spatial),
            other => Err(format!("dimensional class must be 2 or 3, got {other}")),
        }
    }
}

impl fmt::Display for DimensionalClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.rank())
    }
}

/// A single declared geometric entity.
///
/// `id` must be unique within the owning declaration; `kind` names the
/// geometric family ("Circle", "Sphere", "TruncatedPyramid", ...); `params`
/// carries every numeric parameter the form depends on. A form is owned
/// exclusively by the declaration that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,

    pub kind: String,

    /// Numeric parameters, keyed by canonical parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,

    /// Symmetry tag; membership in the closed set for the form's
    /// dimensional class is checked by the symmetry rule.
    pub symmetry_class: String,

    pub curvature_class: CurvatureClass,

    pub dimensional_class: DimensionalClass,

    /// Free annotation, excluded from the signature by default.
    #[serde(default)]
    pub notes: String,
}

impl Form {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        dimensional_class: DimensionalClass,
        curvature_class: CurvatureClass,
        symmetry_class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            params: BTreeMap::new(),
            symmetry_class: symmetry_class.into(),
            curvature_class,
            dimensional_class,
            notes: String::new(),
        }
    }

    /// Add one numeric parameter (builder style).
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Attach an annotation note (builder style).
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Lookup one parameter by exact name.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Whether any parameter name starts with the given prefix.
    pub fn has_param_prefix(&self, prefix: &str) -> bool {
        self.params.keys().any(|k| k.starts_with(prefix))
    }

    /// Whether this form is explicitly tagged as negative space.
    ///
    /// Voids are declared either through the kind ("VoidCylinder") or a
    /// nonzero `void` parameter.
    pub fn is_void_tagged(&self) -> bool {
        self.kind.starts_with("Void") || self.param("void").is_some_and(|v| v != 0.0)
    }
}

/// A declared relation between two or more forms.
///
/// Relation kinds are open-vocabulary strings ("tangent-to", "mirror-of",
/// "subtracted-from"); the rules only interpret the kinds they know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: String,

    /// Referenced form ids, order-significant (e.g. the first id of a
    /// "subtracted-from" relation is the carved shape).
    pub form_ids: Vec<String>,

    #[serde(default)]
    pub notes: String,
}

impl Relation {
    pub fn new(kind: impl Into<String>, form_ids: Vec<String>) -> Self {
        Self {
            kind: kind.into(),
            form_ids,
            notes: String::new(),
        }
    }
}

/// The independent variable a trace moves over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDomain {
    Time,
    Angle,
}

impl fmt::Display for ParameterDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Angle => write!(f, "angle"),
        }
    }
}

/// The explicit motion parameter of a trace.
///
/// Motion is always declared as a named parameter with a domain and bounds —
/// never as an implicit side effect of evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionParameter {
    /// Parameter name ("t", "theta"). Empty means undeclared, which the
    /// motion rule rejects.
    pub name: String,

    pub domain: ParameterDomain,

    pub start: f64,

    pub end: f64,
}

/// A parametrized curve or motion declaration over one or more forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub id: String,

    /// The forms whose motion this trace drives.
    pub form_ids: Vec<String>,

    pub parameter: MotionParameter,

    #[serde(default)]
    pub notes: String,
}

/// Structured predicate of an invariant constraint.
///
/// All comparisons are made within the owning declaration's epsilon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ConstraintExpr {
    /// A named parameter equals a fixed value.
    ParamEquals { param: String, value: f64 },

    /// The ratio of two named parameters equals a fixed value.
    ParamRatio {
        numerator: String,
        denominator: String,
        value: f64,
    },

    /// The ratio of two named parameters equals the golden ratio.
    GoldenRatio { numerator: String, denominator: String },
}

/// A named invariant constraint scoped to a subset of forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvariantConstraint {
    pub name: String,

    pub expr: ConstraintExpr,

    /// Form ids the constraint applies to.
    pub scope: Vec<String>,

    #[serde(default)]
    pub notes: String,
}

/// An immutable declaration of geometric intent.
///
/// Built once by a solver and never mutated afterwards; everything the engine
/// does with it — validation, signing, realization — borrows it read-only.
/// The tolerance is always explicit: a declaration without an epsilon cannot
/// be deserialized, and a non-positive epsilon is rejected by the rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    /// Display title, excluded from the signature by default.
    #[serde(default)]
    pub title: String,

    /// Declared forms, order-significant.
    pub forms: Vec<Form>,

    #[serde(default)]
    pub relations: Vec<Relation>,

    #[serde(default)]
    pub constraints: Vec<InvariantConstraint>,

    #[serde(default)]
    pub traces: Vec<Trace>,

    /// Explicit numeric tolerance. Never defaulted.
    pub epsilon: f64,

    /// Free-form annotations, excluded from the signature by default.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Declaration {
    /// Construct a declaration from its forms and tolerance.
    ///
    /// Performs no validation; malformed declarations are diagnosed by
    /// `CanonEngine::validate`, never rejected here.
    pub fn new(title: impl Into<String>, forms: Vec<Form>, epsilon: f64) -> Self {
        Self {
            title: title.into(),
            forms,
            relations: Vec::new(),
            constraints: Vec::new(),
            traces: Vec::new(),
            epsilon,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach relations (builder style).
    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    /// Attach invariant constraints (builder style).
    pub fn with_constraints(mut self, constraints: Vec<InvariantConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Attach motion traces (builder style).
    pub fn with_traces(mut self, traces: Vec<Trace>) -> Self {
        self.traces = traces;
        self
    }

    /// Lookup a form by id.
    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|f| f.id == id)
    }

    /// Whether any trace drives the given form.
    pub fn is_traced(&self, form_id: &str) -> bool {
        self.traces
            .iter()
            .any(|t| t.form_ids.iter().any(|id| id == form_id))
    }

    /// Names of constraints whose scope includes the given form.
    ///
    /// Used for provenance assembly; this is bookkeeping, not validation.
    pub fn constraints_on(&self, form_id: &str) -> Vec<String> {
        self.constraints
            .iter()
            .filter(|c| c.scope.iter().any(|id| id == form_id))
            .map(|c| c.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensional_class_roundtrips_through_rank() {
        assert_eq!(DimensionalClass::try_from(2u8), Ok(DimensionalClass::Planar));
        assert_eq!(DimensionalClass::try_from(3u8), Ok(DimensionalClass::Spatial));
        assert!(DimensionalClass::try_from(4u8).is_err());
        assert_eq!(DimensionalClass::Spatial.rank(), 3);
    }

    #[test]
    fn dimensional_class_serializes_as_integer() {
        let json = serde_json::to_string(&DimensionalClass::Planar).expect("serialize");
        assert_eq!(json, "2");
        let back: DimensionalClass = serde_json::from_str("3").expect("deserialize");
        assert_eq!(back, DimensionalClass::Spatial);
    }

    #[test]
    fn curvature_class_parses() {
        assert_eq!(
            "constant".parse::<CurvatureClass>(),
            Ok(CurvatureClass::Constant)
        );
        assert!("curly".parse::<CurvatureClass>().is_err());
    }

    #[test]
    fn void_tagging_via_kind_or_param() {
        let by_kind = Form::new(
            "v1",
            "VoidCylinder",
            DimensionalClass::Spatial,
            CurvatureClass::Constant,
            "axial",
        );
        assert!(by_kind.is_void_tagged());

        let by_param = Form::new(
            "v2",
            "Cylinder",
            DimensionalClass::Spatial,
            CurvatureClass::Constant,
            "axial",
        )
        .with_param("void", 1.0);
        assert!(by_param.is_void_tagged());

        let untagged = Form::new(
            "v3",
            "Cylinder",
            DimensionalClass::Spatial,
            CurvatureClass::Constant,
            "axial",
        );
        assert!(!untagged.is_void_tagged());
    }

    #[test]
    fn declaration_lookups() {
        let decl = Declaration::new(
            "pair",
            vec![
                Form::new(
                    "a",
                    "Circle",
                    DimensionalClass::Planar,
                    CurvatureClass::Constant,
                    "rotational_infinite",
                )
                .with_param("radius", 1.0),
                Form::new(
                    "b",
                    "Circle",
                    DimensionalClass::Planar,
                    CurvatureClass::Constant,
                    "rotational_infinite",
                )
                .with_param("radius", 2.0),
            ],
            1e-9,
        )
        .with_constraints(vec![InvariantConstraint {
            name: "half".into(),
            expr: ConstraintExpr::ParamRatio {
                numerator: "radius".into(),
                denominator: "radius".into(),
                value: 0.5,
            },
            scope: vec!["a".into(), "b".into()],
            notes: String::new(),
        }]);

        assert!(decl.form("a").is_some());
        assert!(decl.form("missing").is_none());
        assert_eq!(decl.constraints_on("b"), vec!["half".to_string()]);
        assert!(!decl.is_traced("a"));
    }

    #[test]
    fn declaration_missing_epsilon_fails_to_parse() {
        let json = r#"{"title":"x","forms":[]}"#;
        let parsed: Result<Declaration, _> = serde_json::from_str(json);
        assert!(parsed.is_err(), "epsilon must be explicit");
    }
}
