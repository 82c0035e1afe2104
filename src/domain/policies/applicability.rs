//! Applicability rules
//!
//! A recipe's rules form a conjunction of predicates over the project
//! definition and host capabilities. Evaluation is pure: it reads the fact
//! table and never touches the filesystem.

use semver::VersionReq;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ProjectDefinition;
use crate::domain::value_objects::HostCapabilities;

/// Read-only facts a rule is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub project: &'a ProjectDefinition,
    pub capabilities: &'a HostCapabilities,
}

impl<'a> RuleContext<'a> {
    pub fn new(project: &'a ProjectDefinition, capabilities: &'a HostCapabilities) -> Self {
        Self {
            project,
            capabilities,
        }
    }

    /// A recipe qualifies only if every rule holds
    pub fn satisfies_all(&self, rules: &[Predicate]) -> bool {
        rules.iter().all(|rule| rule.evaluate(self))
    }
}

/// One applicability predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum Predicate {
    /// Project SDK is one of `values`
    ProjectSdk { values: Vec<String> },
    /// Project property `name` equals one of `values`
    ProjectProperty { name: String, values: Vec<String> },
    PropertyExists { name: String },
    /// Project runtime version satisfies `range`
    TargetRuntime { range: VersionReq },
    /// File exists at `path` relative to the project directory
    FileExists { path: String },
    PackageReference { name: String },
    /// Host capability flag is present
    Capability { name: String },
    Not { rule: Box<Predicate> },
    AnyOf { rules: Vec<Predicate> },
}

impl Predicate {
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            Predicate::ProjectSdk { values } => ctx
                .project
                .sdk()
                .is_some_and(|sdk| contains_ignore_case(values, sdk)),
            Predicate::ProjectProperty { name, values } => ctx
                .project
                .property(name)
                .is_some_and(|value| contains_ignore_case(values, value)),
            Predicate::PropertyExists { name } => ctx.project.property(name).is_some(),
            Predicate::TargetRuntime { range } => ctx
                .project
                .runtime_version()
                .is_some_and(|version| range.matches(version)),
            Predicate::FileExists { path } => ctx.project.has_file(path),
            Predicate::PackageReference { name } => ctx.project.references_package(name),
            Predicate::Capability { name } => ctx.capabilities.has(name),
            Predicate::Not { rule } => !rule.evaluate(ctx),
            Predicate::AnyOf { rules } => rules.iter().any(|rule| rule.evaluate(ctx)),
        }
    }
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.eq_ignore_ascii_case(needle))
}
