//! Declaration integrity: the reference graph must be well-formed.
//!
//! Violations here are fatal and abort the remaining rules — a declaration
//! whose ids collide or dangle cannot be meaningfully judged by any rule
//! that navigates the graph.

use super::{CanonRule, article, rule_id};
use crate::declaration::Declaration;
use crate::finding::{Finding, Severity};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static FORM_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("form id pattern"));

pub struct IntegrityRule;

impl IntegrityRule {
    fn fatal(message: impl Into<String>) -> Finding {
        Finding::new(
            Severity::Fatal,
            rule_id::INTEGRITY,
            article::INTEGRITY,
            message,
        )
    }
}

impl CanonRule for IntegrityRule {
    fn id(&self) -> &'static str {
        rule_id::INTEGRITY
    }

    fn article(&self) -> &'static str {
        article::INTEGRITY
    }

    fn check(&self, decl: &Declaration) -> Vec<Finding> {
        let mut findings = Vec::new();

        let mut seen = BTreeSet::new();
        let mut reported = BTreeSet::new();
        for form in &decl.forms {
            if form.id.is_empty() {
                findings.push(Self::fatal("form with empty id").on_form(""));
                continue;
            }
            if !seen.insert(form.id.as_str()) && reported.insert(form.id.as_str()) {
                findings.push(
                    Self::fatal(format!("duplicate form id: {}", form.id)).on_form(&form.id),
                );
            }
            if !FORM_ID_PATTERN.is_match(&form.id) {
                findings.push(
                    Finding::new(
                        Severity::Warning,
                        rule_id::INTEGRITY,
                        article::INTEGRITY,
                        format!("form id {:?} is not a well-formed identifier", form.id),
                    )
                    .on_form(&form.id),
                );
            }
        }

        for relation in &decl.relations {
            if relation.form_ids.len() < 2 {
                findings.push(Self::fatal(format!(
                    "relation {:?} references fewer than two forms",
                    relation.kind
                )));
            }
            for id in &relation.form_ids {
                if !seen.contains(id.as_str()) {
                    findings.push(
                        Self::fatal(format!(
                            "relation {:?} references unknown form id: {id}",
                            relation.kind
                        ))
                        .on_form(id),
                    );
                }
            }
        }

        for constraint in &decl.constraints {
            for id in &constraint.scope {
                if !seen.contains(id.as_str()) {
                    findings.push(
                        Self::fatal(format!(
                            "constraint {:?} scopes unknown form id: {id}",
                            constraint.name
                        ))
                        .on_form(id),
                    );
                }
            }
        }

        for trace in &decl.traces {
            for id in &trace.form_ids {
                if !seen.contains(id.as_str()) {
                    findings.push(
                        Self::fatal(format!(
                            "trace {:?} drives unknown form id: {id}",
                            trace.id
                        ))
                        .on_form(id),
                    );
                }
            }
        }

        findings
    }
}
