//! Deterministic declaration signatures.
//!
//! Two independent constructions of the same semantic content MUST produce
//! identical signatures.
//!
//! Algorithm:
//! 1. Build a canonical view of the signature-relevant fields
//!    (forms, relations, constraints, traces, epsilon)
//! 2. Serialize via RFC 8785 (JCS) — sorted keys, no whitespace, canonical numbers
//! 3. signature = "d1_" || base32hex_lower(SHA256(viewBytes))
//!
//! Annotation fields (`title`, `notes`, `metadata`) are excluded under the
//! default policy so that editing human context never invalidates archived
//! verdicts. Whether annotations should ever participate is a policy choice,
//! not a constant: see [`SignaturePolicy`].

use crate::declaration::{Declaration, Form, InvariantConstraint, Relation, Trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// A content-addressed signature identifying a declaration.
///
/// Two declarations with the same signature carry the same semantic content;
/// archived verdicts and realizations are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Signature(pub String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Policy controlling which fields participate in the signature.
///
/// The default excludes annotations (`title`, `notes`, `metadata`) to
/// maximize cache reuse across cosmetic edits. Callers that archive verdicts
/// alongside their annotations can opt them in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignaturePolicy {
    /// Include `title`, per-item `notes`, and `metadata` in the signature.
    pub include_annotations: bool,
}

impl Declaration {
    /// Compute the signature under the default policy.
    pub fn signature(&self) -> Signature {
        self.signature_with(SignaturePolicy::default())
    }

    /// Compute the signature under an explicit policy.
    pub fn signature_with(&self, policy: SignaturePolicy) -> Signature {
        let view = canonical_view(self, policy);
        let bytes = jcs_serialize(&view);
        let hash = Sha256::digest(&bytes);
        let encoded = base32hex_lower_no_pad(&hash);
        Signature(format!("d1_{encoded}"))
    }
}

/// Build the canonical JSON view of a declaration.
///
/// Field order inside objects is irrelevant (JCS sorts keys); list order is
/// semantic and preserved as declared.
fn canonical_view(decl: &Declaration, policy: SignaturePolicy) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("schema".to_string(), Value::Number(1.into()));
    map.insert("epsilon".to_string(), number(decl.epsilon));
    map.insert(
        "forms".to_string(),
        Value::Array(decl.forms.iter().map(|f| form_view(f, policy)).collect()),
    );
    map.insert(
        "relations".to_string(),
        Value::Array(
            decl.relations
                .iter()
                .map(|r| relation_view(r, policy))
                .collect(),
        ),
    );
    map.insert(
        "constraints".to_string(),
        Value::Array(
            decl.constraints
                .iter()
                .map(|c| constraint_view(c, policy))
                .collect(),
        ),
    );
    map.insert(
        "traces".to_string(),
        Value::Array(decl.traces.iter().map(|t| trace_view(t, policy)).collect()),
    );

    if policy.include_annotations {
        map.insert("title".to_string(), Value::String(decl.title.clone()));
        map.insert(
            "metadata".to_string(),
            Value::Object(
                decl.metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );
    }

    Value::Object(map)
}

fn form_view(form: &Form, policy: SignaturePolicy) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("id".to_string(), Value::String(form.id.clone()));
    map.insert("kind".to_string(), Value::String(form.kind.clone()));
    map.insert(
        "params".to_string(),
        Value::Object(
            form.params
                .iter()
                .map(|(k, v)| (k.clone(), number(*v)))
                .collect(),
        ),
    );
    map.insert(
        "symmetry".to_string(),
        Value::String(form.symmetry_class.clone()),
    );
    map.insert(
        "curvature".to_string(),
        Value::String(form.curvature_class.to_string()),
    );
    map.insert(
        "dimension".to_string(),
        Value::Number(u64::from(form.dimensional_class.rank()).into()),
    );
    if policy.include_annotations {
        map.insert("notes".to_string(), Value::String(form.notes.clone()));
    }
    Value::Object(map)
}

fn relation_view(relation: &Relation, policy: SignaturePolicy) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("kind".to_string(), Value::String(relation.kind.clone()));
    map.insert(
        "forms".to_string(),
        Value::Array(
            relation
                .form_ids
                .iter()
                .map(|id| Value::String(id.clone()))
                .collect(),
        ),
    );
    if policy.include_annotations {
        map.insert("notes".to_string(), Value::String(relation.notes.clone()));
    }
    Value::Object(map)
}

fn constraint_view(constraint: &InvariantConstraint, policy: SignaturePolicy) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("name".to_string(), Value::String(constraint.name.clone()));
    map.insert(
        "expr".to_string(),
        serde_json::to_value(&constraint.expr).unwrap_or(Value::Null),
    );
    map.insert(
        "scope".to_string(),
        Value::Array(
            constraint
                .scope
                .iter()
                .map(|id| Value::String(id.clone()))
                .collect(),
        ),
    );
    if policy.include_annotations {
        map.insert("notes".to_string(), Value::String(constraint.notes.clone()));
    }
    Value::Object(map)
}

fn trace_view(trace: &Trace, policy: SignaturePolicy) -> Value {
    let mut map = serde_json::Map::new();
    map.insert("id".to_string(), Value::String(trace.id.clone()));
    map.insert(
        "forms".to_string(),
        Value::Array(
            trace
                .form_ids
                .iter()
                .map(|id| Value::String(id.clone()))
                .collect(),
        ),
    );
    map.insert(
        "parameter".to_string(),
        serde_json::to_value(&trace.parameter).unwrap_or(Value::Null),
    );
    if policy.include_annotations {
        map.insert("notes".to_string(), Value::String(trace.notes.clone()));
    }
    Value::Object(map)
}

/// Canonical number formatting.
///
/// Non-finite values cannot occur in valid declarations (the epsilon rule
/// rejects them) but must still hash deterministically; they map to null.
fn number(value: f64) -> Value {
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// RFC 8785 JSON Canonicalization Scheme.
///
/// Requirements:
/// - UTF-8
/// - Object keys sorted lexicographically
/// - No insignificant whitespace
/// - Canonical number formatting (no trailing zeros, no leading +, etc.)
fn jcs_serialize(value: &Value) -> Vec<u8> {
    match value {
        Value::Null => b"null".to_vec(),
        Value::Bool(b) => {
            if *b {
                b"true".to_vec()
            } else {
                b"false".to_vec()
            }
        }
        Value::Number(n) => {
            // For integers, the decimal representation; for floats, ES6-style
            // shortest formatting, which Rust's `{}` matches for our range.
            if let Some(i) = n.as_i64() {
                format!("{i}").into_bytes()
            } else if let Some(u) = n.as_u64() {
                format!("{u}").into_bytes()
            } else if let Some(f) = n.as_f64() {
                format!("{f}").into_bytes()
            } else {
                n.to_string().into_bytes()
            }
        }
        Value::String(_) => {
            // Strings use standard JSON escaping.
            serde_json::to_vec(value).unwrap_or_default()
        }
        Value::Array(arr) => {
            let mut buf = Vec::new();
            buf.push(b'[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                buf.extend_from_slice(&jcs_serialize(v));
            }
            buf.push(b']');
            buf
        }
        Value::Object(map) => {
            // Keys MUST be sorted lexicographically.
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            let mut buf = Vec::new();
            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                let key_json =
                    serde_json::to_vec(&Value::String((*key).clone())).unwrap_or_default();
                buf.extend_from_slice(&key_json);
                buf.push(b':');
                buf.extend_from_slice(&jcs_serialize(&map[*key]));
            }
            buf.push(b'}');
            buf
        }
    }
}

/// RFC 4648 base32hex encoding, lowercase, without padding.
///
/// Alphabet (lowercase): 0-9 a-v
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut result = String::new();
    let mut bits: u64 = 0;
    let mut num_bits: u32 = 0;

    for &byte in data {
        bits = (bits << 8) | (byte as u64);
        num_bits += 8;

        while num_bits >= 5 {
            num_bits -= 5;
            let idx = ((bits >> num_bits) & 0x1f) as usize;
            result.push(ALPHABET[idx] as char);
        }
    }

    if num_bits > 0 {
        let idx = ((bits << (5 - num_bits)) & 0x1f) as usize;
        result.push(ALPHABET[idx] as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{CurvatureClass, DimensionalClass};

    fn circle(radius: f64) -> Declaration {
        Declaration::new(
            "circle",
            vec![
                Form::new(
                    "c1",
                    "Circle",
                    DimensionalClass::Planar,
                    CurvatureClass::Constant,
                    "rotational_infinite",
                )
                .with_param("radius", radius),
            ],
            1e-9,
        )
    }

    #[test]
    fn signature_determinism() {
        let a = circle(10.0);
        let b = circle(10.0);
        assert_eq!(a.signature(), b.signature());
        assert!(a.signature().as_str().starts_with("d1_"));
    }

    #[test]
    fn signature_sensitive_to_params() {
        assert_ne!(circle(10.0).signature(), circle(11.0).signature());
    }

    #[test]
    fn signature_sensitive_to_kind_and_id() {
        let base = circle(10.0);

        let mut renamed = base.clone();
        renamed.forms[0].id = "c2".into();
        assert_ne!(base.signature(), renamed.signature());

        let mut rekinded = base.clone();
        rekinded.forms[0].kind = "Disc".into();
        assert_ne!(base.signature(), rekinded.signature());
    }

    #[test]
    fn signature_sensitive_to_epsilon() {
        let mut loose = circle(10.0);
        loose.epsilon = 1e-6;
        assert_ne!(circle(10.0).signature(), loose.signature());
    }

    #[test]
    fn signature_ignores_annotations_by_default() {
        let base = circle(10.0);

        let mut annotated = base.clone();
        annotated.title = "renamed".into();
        annotated.forms[0].notes = "a note".into();
        annotated.metadata.insert("author".into(), "pythagoras".into());

        assert_eq!(base.signature(), annotated.signature());
    }

    #[test]
    fn annotation_policy_widens_the_signature() {
        let policy = SignaturePolicy {
            include_annotations: true,
        };

        let base = circle(10.0);
        let mut annotated = base.clone();
        annotated.forms[0].notes = "a note".into();

        assert_eq!(base.signature(), annotated.signature());
        assert_ne!(
            base.signature_with(policy),
            annotated.signature_with(policy)
        );
    }

    #[test]
    fn jcs_sorts_object_keys() {
        let value = serde_json::json!({"b": 1, "a": {"d": 2, "c": 3}});
        let bytes = jcs_serialize(&value);
        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            r#"{"a":{"c":3,"d":2},"b":1}"#
        );
    }

    #[test]
    fn base32hex_alphabet_is_valid() {
        let hash = Sha256::digest(b"canon");
        let encoded = base32hex_lower_no_pad(&hash);
        assert!(
            encoded
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='v').contains(&c))
        );
    }
}
