//! Post-generation correction rules.
//!
//! Four artifact types get a fixed review-notes block appended: business and
//! product requirements, system requirements, the entity-relationship model,
//! and the API specification. Every other type passes through unchanged.
//!
//! The rules are pure text transformations. They never re-render a template
//! and never look inside the document; given the same type and text they
//! always produce byte-identical output. Persisting the corrected text is the
//! job of the correction pass in the `nodes` crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{ContentKind, DocType};

const REVIEW_NOTES_TITLE: &str = "Review Notes";

/// Labels reported for a corrected type that has no specific list.
pub const GENERIC_IMPROVEMENTS: [&str; 3] =
    ["Improved clarity", "Enhanced structure", "Added missing details"];

/// Describes what the correction pass did to one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorrectionRecord {
    /// Review notes were appended.
    Corrected {
        doc_type: DocType,
        /// Length of the generated text in characters.
        original_length: usize,
        /// Length of the corrected text in characters.
        corrected_length: usize,
        improvements: Vec<String>,
        /// Where the corrected text was persisted. `None` when persisting
        /// failed; the failure is logged, not raised.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        persisted_to: Option<PathBuf>,
    },
    /// Nothing to correct.
    NoChange { doc_type: DocType },
    /// The generated artifact could not be read back, so no rule ran.
    Unreadable { doc_type: DocType, error: String },
}

impl CorrectionRecord {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Corrected { .. })
    }
}

/// The changelog of one correction pass, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionLog {
    pub records: Vec<CorrectionRecord>,
    /// Where the changelog itself was persisted, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog_path: Option<PathBuf>,
}

/// Output of [`correct`]: the (possibly unchanged) text and its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub text: String,
    pub record: CorrectionRecord,
}

/// The three review bullets for `doc_type`, or `None` for types the layer
/// does not touch.
pub fn review_notes(doc_type: DocType) -> Option<[&'static str; 3]> {
    match doc_type {
        DocType::BrdPrd => Some([
            "Confirm stakeholder alignment on scope and priorities before sign-off.",
            "Verify every KPI has a baseline, a target, and an owner.",
            "Revisit assumptions and constraints with the business sponsor each release.",
        ]),
        DocType::Srd => Some([
            "Trace each system requirement back to a business requirement.",
            "Confirm non-functional targets (availability, latency, capacity) are measurable.",
            "Review security and compliance obligations with the platform team.",
        ]),
        DocType::Erd => Some([
            "Confirm primary keys and cardinalities with the data owners.",
            "Check that audit timestamps exist on every mutable entity.",
            "Plan indexes for the foreign keys used by the hottest queries.",
        ]),
        DocType::Openapi => Some([
            "Apply rate limiting and document the quota headers on every endpoint.",
            "Confirm authentication scopes for each operation.",
            "Standardise error responses on a single problem-details schema.",
        ]),
        _ => None,
    }
}

/// Improvement labels recorded when `doc_type` is corrected.
///
/// Falls back to [`GENERIC_IMPROVEMENTS`] for types without a specific list.
pub fn improvement_labels(doc_type: DocType) -> Vec<String> {
    let labels: &[&str] = match doc_type {
        DocType::BrdPrd => &[
            "Added stakeholder alignment review",
            "Added KPI ownership check",
            "Added assumption revisit reminder",
        ],
        DocType::Srd => &[
            "Added requirement traceability check",
            "Added measurable non-functional targets review",
            "Added security and compliance review",
        ],
        DocType::Erd => &[
            "Added key and cardinality review",
            "Added audit timestamp check",
            "Added indexing guidance",
        ],
        DocType::Openapi => &[
            "Added rate limiting guidance",
            "Added authentication scope review",
            "Added error schema standardisation",
        ],
        _ => &GENERIC_IMPROVEMENTS,
    };
    labels.iter().map(|l| l.to_string()).collect()
}

/// Applies the correction rule for `doc_type` to `text`.
pub fn correct(doc_type: DocType, text: &str) -> Correction {
    let Some(notes) = review_notes(doc_type) else {
        return unchanged(doc_type, text);
    };

    let mut corrected = String::with_capacity(text.len() + 512);
    corrected.push_str(text.trim_end_matches('\n'));
    corrected.push_str(&notes_block(doc_type.content_kind(), &notes));

    if corrected == text {
        return unchanged(doc_type, text);
    }

    let record = CorrectionRecord::Corrected {
        doc_type,
        original_length: text.chars().count(),
        corrected_length: corrected.chars().count(),
        improvements: improvement_labels(doc_type),
        persisted_to: None,
    };
    Correction {
        text: corrected,
        record,
    }
}

fn unchanged(doc_type: DocType, text: &str) -> Correction {
    Correction {
        text: text.to_string(),
        record: CorrectionRecord::NoChange { doc_type },
    }
}

/// Renders the notes using syntax that keeps the artifact well-formed.
fn notes_block(kind: ContentKind, notes: &[&str]) -> String {
    let (heading, bullet) = match kind {
        ContentKind::Markdown => (format!("## {REVIEW_NOTES_TITLE}\n"), "- "),
        ContentKind::Mermaid => (format!("%% {REVIEW_NOTES_TITLE}"), "%% - "),
        ContentKind::Yaml => (format!("# {REVIEW_NOTES_TITLE}"), "# - "),
    };
    let mut block = format!("\n\n{heading}\n");
    for note in notes {
        block.push_str(bullet);
        block.push_str(note);
        block.push('\n');
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_types_pass_through() {
        for doc_type in DocType::ALL.into_iter().filter(|t| review_notes(*t).is_none()) {
            let out = correct(doc_type, "# Body\n");
            assert_eq!(out.text, "# Body\n");
            assert_eq!(out.record, CorrectionRecord::NoChange { doc_type });
        }
    }

    #[test]
    fn exactly_four_types_are_recognised() {
        let recognised: Vec<_> = DocType::ALL
            .into_iter()
            .filter(|t| review_notes(*t).is_some())
            .collect();
        assert_eq!(
            recognised,
            vec![DocType::BrdPrd, DocType::Srd, DocType::Erd, DocType::Openapi]
        );
    }

    #[test]
    fn business_notes_mention_stakeholder_alignment() {
        let out = correct(DocType::BrdPrd, "# BRD\n\nBody\n");
        assert!(out.text.starts_with("# BRD\n\nBody\n\n## Review Notes\n"));
        assert!(out.text.contains("stakeholder alignment"));
        assert!(out.record.is_change());
    }

    #[test]
    fn api_notes_are_yaml_comments_about_rate_limiting() {
        let out = correct(DocType::Openapi, "openapi: 3.0.3\n");
        let appended = &out.text["openapi: 3.0.3".len()..];
        for line in appended.lines().filter(|l| !l.is_empty()) {
            assert!(line.starts_with('#'), "non-comment line {line:?}");
        }
        assert!(appended.contains("rate limiting"));
    }

    #[test]
    fn diagram_notes_are_mermaid_comments() {
        let out = correct(DocType::Erd, "erDiagram\n");
        assert!(out.text.contains("\n%% Review Notes\n%% - "));
    }

    #[test]
    fn correction_is_deterministic() {
        let a = correct(DocType::Srd, "text");
        let b = correct(DocType::Srd, "text");
        assert_eq!(a, b);
    }

    #[test]
    fn record_carries_lengths_and_labels() {
        let out = correct(DocType::Srd, "héllo");
        match out.record {
            CorrectionRecord::Corrected {
                original_length,
                corrected_length,
                improvements,
                ..
            } => {
                assert_eq!(original_length, 5);
                assert_eq!(corrected_length, out.text.chars().count());
                assert_eq!(improvements, improvement_labels(DocType::Srd));
            }
            other => panic!("expected a correction, got {other:?}"),
        }
    }

    #[test]
    fn unrecognised_types_fall_back_to_generic_labels() {
        assert_eq!(improvement_labels(DocType::Frd), GENERIC_IMPROVEMENTS.to_vec());
        assert_ne!(improvement_labels(DocType::Openapi), GENERIC_IMPROVEMENTS.to_vec());
    }
}
