//! Shared value types for the generation domain.
//!
//! [`Idea`] is the subject of generation; [`Artifact`] and [`StageReport`]
//! describe what a stage persisted; [`GenerationResult`] is what one walk of
//! the pipeline returns.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    ContentKind, CorrectionLog, DocGenError, DocSelection, DocType, GenerationRunId, StageId,
    TemplateId,
};

/// Output directory used when an idea does not name one.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

// ---------------------------------------------------------------------------
// Idea
// ---------------------------------------------------------------------------

/// Background of the project an [`Idea`] describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaContext {
    /// Project name as stakeholders know it.
    pub project_name: String,
    /// Business domain (e.g. `"Business Management"`).
    pub domain: String,
    #[serde(default)]
    pub stakeholders: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
}

/// Structured description of a project to be documented.
///
/// The descriptive fields are owned by the caller. The workflow fields
/// (`docs`, `overwrite`, `output_dir`) are stamped by the executor before the
/// first stage runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
    pub context: IdeaContext,
    #[serde(default)]
    pub personas: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<String>,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub apis: Vec<String>,
    #[serde(default)]
    pub compliance: Vec<String>,
    /// Service-level objectives, metric name to target.
    #[serde(default)]
    pub slas: BTreeMap<String, String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,

    // Workflow fields
    #[serde(default)]
    pub docs: DocSelection,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Idea {
    /// Creates an idea with the required fields set and everything else empty.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        project_name: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            context: IdeaContext {
                project_name: project_name.into(),
                domain: domain.into(),
                stakeholders: Vec::new(),
                constraints: Vec::new(),
                assumptions: Vec::new(),
            },
            personas: Vec::new(),
            kpis: Vec::new(),
            modules: Vec::new(),
            entities: Vec::new(),
            apis: Vec::new(),
            compliance: Vec::new(),
            slas: BTreeMap::new(),
            created_at: Utc::now(),
            version: default_version(),
            docs: DocSelection::default(),
            overwrite: false,
            output_dir: default_output_dir(),
        }
    }

    /// Decodes an idea from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, DocGenError> {
        let idea: Idea = serde_json::from_str(json).map_err(|e| DocGenError::InvalidIdea {
            message: e.to_string(),
        })?;
        idea.validate()?;
        Ok(idea)
    }

    /// Checks that every field the templates cannot do without is present.
    pub fn validate(&self) -> Result<(), DocGenError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("context.project_name", &self.context.project_name),
            ("context.domain", &self.context.domain),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocGenError::InvalidIdea {
                message: format!("missing required field(s): {}", missing.join(", ")),
            })
        }
    }

    /// Short fingerprint of the descriptive fields.
    ///
    /// First 16 hex characters of SHA-256 over the idea's JSON with the
    /// workflow fields and `created_at` cleared, so re-running the same idea
    /// into a different directory yields the same hash.
    pub fn fingerprint(&self) -> String {
        let mut canonical = self.clone();
        canonical.docs = DocSelection::default();
        canonical.overwrite = false;
        canonical.output_dir = default_output_dir();
        canonical.created_at = DateTime::<Utc>::UNIX_EPOCH;
        // Serialising plain data (strings, vectors, BTreeMap) cannot fail.
        let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        hex::encode(digest)[..16].to_string()
    }

    /// A fully populated example idea used for smoke tests and demos.
    pub fn sample() -> Self {
        let mut idea = Self::new(
            "Sample SaaS Platform",
            "A comprehensive SaaS platform for business management",
            "BusinessManager SaaS",
            "Business Management",
        );
        idea.context.stakeholders = strings(&["CTO", "Product Manager", "Development Team"]);
        idea.context.constraints = strings(&["Budget: $500K", "Timeline: 6 months"]);
        idea.context.assumptions = strings(&["Cloud-first approach", "Modern tech stack"]);
        idea.personas = strings(&["Business Owner", "Manager", "Employee"]);
        idea.kpis = strings(&["User adoption rate", "Feature usage", "Customer satisfaction"]);
        idea.modules = strings(&["User Management", "Project Management", "Analytics"]);
        idea.entities = strings(&["User", "Project", "Task", "Report"]);
        idea.apis = strings(&["User API", "Project API", "Analytics API"]);
        idea.compliance = strings(&["GDPR", "SOC 2"]);
        idea.slas = [("uptime", "99.9%"), ("response_time", "< 200ms")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        idea
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Stage outputs
// ---------------------------------------------------------------------------

/// One persisted document or diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Human-readable artifact name (e.g. `"BRD/PRD"`).
    pub name: String,
    pub doc_type: DocType,
    /// Path actually written. Differs from the canonical path when the
    /// collision policy redirected the write to a `.new` sibling.
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub template: TemplateId,
}

/// Summary of one executed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageId,
    /// Human-readable stage name (e.g. `"ERD and API"`).
    pub name: String,
    pub artifacts: Vec<Artifact>,
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Everything one generation request produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub run_id: GenerationRunId,
    pub idea_hash: String,
    pub generated_at: DateTime<Utc>,
    pub output_dir: PathBuf,
    pub requested: DocSelection,
    /// Reports of executed stages keyed by stage key, in execution order.
    pub stages: IndexMap<String, StageReport>,
    /// Present when the correction pass ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrections: Option<CorrectionLog>,
}

impl GenerationResult {
    /// Every artifact written, in execution order.
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        self.stages.values().flat_map(|r| r.artifacts.iter())
    }

    /// Artifact types actually emitted, in execution order.
    pub fn produced_types(&self) -> Vec<DocType> {
        self.artifacts().map(|a| a.doc_type).collect()
    }

    /// Looks up the artifact written for `doc_type`.
    pub fn artifact(&self, doc_type: DocType) -> Option<&Artifact> {
        self.artifacts().find(|a| a.doc_type == doc_type)
    }
}

/// Result of a profile-driven request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRun {
    pub profile: String,
    pub documents: Vec<String>,
    pub result: GenerationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let idea = Idea::from_json(
            r#"{"title":"T","description":"D","context":{"project_name":"P","domain":"X"}}"#,
        )
        .unwrap();
        assert_eq!(idea.version, "1.0.0");
        assert_eq!(idea.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(idea.docs.is_empty());
        assert!(!idea.overwrite);
    }

    #[test]
    fn missing_context_is_invalid() {
        let err = Idea::from_json(r#"{"title":"T","description":"D"}"#).unwrap_err();
        assert!(matches!(err, DocGenError::InvalidIdea { .. }));
    }

    #[test]
    fn blank_required_fields_are_named() {
        let idea = Idea::new("  ", "D", "P", "");
        let err = idea.validate().unwrap_err().to_string();
        assert!(err.contains("title"));
        assert!(err.contains("context.domain"));
        assert!(!err.contains("description"));
    }

    #[test]
    fn fingerprint_ignores_workflow_fields() {
        let a = Idea::sample();
        let mut b = a.clone();
        b.docs = DocSelection::all();
        b.overwrite = true;
        b.output_dir = PathBuf::from("/elsewhere");
        b.created_at = Utc::now();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 16);

        b.title.push('!');
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn sample_idea_is_valid() {
        Idea::sample().validate().unwrap();
    }
}
