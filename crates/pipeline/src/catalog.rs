//! Artifact-type vocabulary and the fixed stage order.
//!
//! The pipeline knows eleven artifact types ([`DocType`]) produced by ten
//! stages ([`StageId`]). Stages run in the total order given by
//! [`StageId::ORDER`]; the ERD and OpenAPI types share one stage because the
//! data model and the API surface are generated as a single unit.
//!
//! Requested document sets arrive as free-form strings (they come from JSON
//! payloads, profiles, and the command line), so [`DocSelection`] keeps the raw
//! tags and answers membership questions against the typed vocabulary. Tags the
//! vocabulary does not know are carried along and ignored by the walk.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Artifact types
// ---------------------------------------------------------------------------

/// How an artifact's text is structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Structured prose (markdown).
    Markdown,
    /// A graph description (mermaid).
    Mermaid,
    /// Structured data (YAML).
    Yaml,
}

impl ContentKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Mermaid => "mermaid",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One artifact type the pipeline can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    BrdPrd,
    Frd,
    Srd,
    TrdTdd,
    Erd,
    Openapi,
    Wireframes,
    ProjectPlan,
    TestStrategy,
    CicdEnv,
    ReleaseRunbook,
}

impl DocType {
    /// Every type the pipeline can emit, in stage order.
    pub const ALL: [DocType; 11] = [
        DocType::BrdPrd,
        DocType::Frd,
        DocType::Srd,
        DocType::TrdTdd,
        DocType::Erd,
        DocType::Openapi,
        DocType::Wireframes,
        DocType::ProjectPlan,
        DocType::TestStrategy,
        DocType::CicdEnv,
        DocType::ReleaseRunbook,
    ];

    /// Parses a request tag. Matching is exact: no case folding, no aliases.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    /// Returns the request tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrdPrd => "brd_prd",
            Self::Frd => "frd",
            Self::Srd => "srd",
            Self::TrdTdd => "trd_tdd",
            Self::Erd => "erd",
            Self::Openapi => "openapi",
            Self::Wireframes => "wireframes",
            Self::ProjectPlan => "project_plan",
            Self::TestStrategy => "test_strategy",
            Self::CicdEnv => "cicd_env",
            Self::ReleaseRunbook => "release_runbook",
        }
    }

    /// Human-readable artifact name reported in stage summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BrdPrd => "BRD/PRD",
            Self::Frd => "FRD",
            Self::Srd => "SRD",
            Self::TrdTdd => "TRD/TDD",
            Self::Erd => "ERD",
            Self::Openapi => "OpenAPI",
            Self::Wireframes => "UI Wireframes",
            Self::ProjectPlan => "Project Plan",
            Self::TestStrategy => "Test Strategy",
            Self::CicdEnv => "CI/CD Environment",
            Self::ReleaseRunbook => "Release Runbook",
        }
    }

    /// Content kind of the artifact.
    pub fn content_kind(self) -> ContentKind {
        match self {
            Self::Erd | Self::Wireframes => ContentKind::Mermaid,
            Self::Openapi => ContentKind::Yaml,
            _ => ContentKind::Markdown,
        }
    }

    /// Canonical file name inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::BrdPrd => "brd_prd.md",
            Self::Frd => "frd.md",
            Self::Srd => "srd.md",
            Self::TrdTdd => "trd_tdd.md",
            Self::Erd => "erd.mmd",
            Self::Openapi => "openapi.yaml",
            Self::Wireframes => "wireframes.mmd",
            Self::ProjectPlan => "project_plan.md",
            Self::TestStrategy => "test_strategy.md",
            Self::CicdEnv => "cicd_env.md",
            Self::ReleaseRunbook => "release_runbook.md",
        }
    }

    /// Name of the template this type is rendered from. Matches the file name.
    pub fn template_name(self) -> &'static str {
        self.file_name()
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// One generation stage. Each stage emits the artifact types in [`StageId::outputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    BrdPrd,
    Frd,
    Srd,
    TrdTdd,
    ErdApi,
    Wireframes,
    ProjectPlan,
    TestStrategy,
    CicdEnv,
    ReleaseRunbook,
}

impl StageId {
    /// The fixed total execution order.
    ///
    /// Business requirements precede functional, functional precede system and
    /// technical, technical precede the data model and API, then delivery
    /// planning. Stages do not read each other's output.
    pub const ORDER: [StageId; 10] = [
        StageId::BrdPrd,
        StageId::Frd,
        StageId::Srd,
        StageId::TrdTdd,
        StageId::ErdApi,
        StageId::Wireframes,
        StageId::ProjectPlan,
        StageId::TestStrategy,
        StageId::CicdEnv,
        StageId::ReleaseRunbook,
    ];

    /// Key of this stage in the result mapping.
    pub fn key(self) -> &'static str {
        match self {
            Self::BrdPrd => "brd_prd",
            Self::Frd => "frd",
            Self::Srd => "srd",
            Self::TrdTdd => "trd_tdd",
            Self::ErdApi => "erd_api",
            Self::Wireframes => "wireframes",
            Self::ProjectPlan => "project_plan",
            Self::TestStrategy => "test_strategy",
            Self::CicdEnv => "cicd_env",
            Self::ReleaseRunbook => "release_runbook",
        }
    }

    /// Human-readable stage name reported in summaries.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ErdApi => "ERD and API",
            other => other.outputs()[0].display_name(),
        }
    }

    /// Artifact types this stage can emit, in emission order.
    pub fn outputs(self) -> &'static [DocType] {
        match self {
            Self::BrdPrd => &[DocType::BrdPrd],
            Self::Frd => &[DocType::Frd],
            Self::Srd => &[DocType::Srd],
            Self::TrdTdd => &[DocType::TrdTdd],
            Self::ErdApi => &[DocType::Erd, DocType::Openapi],
            Self::Wireframes => &[DocType::Wireframes],
            Self::ProjectPlan => &[DocType::ProjectPlan],
            Self::TestStrategy => &[DocType::TestStrategy],
            Self::CicdEnv => &[DocType::CicdEnv],
            Self::ReleaseRunbook => &[DocType::ReleaseRunbook],
        }
    }

    /// Returns the stage that emits `doc_type`.
    pub fn for_doc_type(doc_type: DocType) -> Self {
        match doc_type {
            DocType::Erd | DocType::Openapi => Self::ErdApi,
            DocType::BrdPrd => Self::BrdPrd,
            DocType::Frd => Self::Frd,
            DocType::Srd => Self::Srd,
            DocType::TrdTdd => Self::TrdTdd,
            DocType::Wireframes => Self::Wireframes,
            DocType::ProjectPlan => Self::ProjectPlan,
            DocType::TestStrategy => Self::TestStrategy,
            DocType::CicdEnv => Self::CicdEnv,
            DocType::ReleaseRunbook => Self::ReleaseRunbook,
        }
    }

    /// Returns `true` if any of this stage's artifact types is in `docs`.
    pub fn is_requested(self, docs: &DocSelection) -> bool {
        self.outputs().iter().any(|t| docs.contains(*t))
    }

    fn position(self) -> usize {
        // ORDER lists every variant exactly once.
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(Self::ORDER.len())
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The transition rule: the first stage strictly after `after` whose artifact
/// types intersect `docs`, or `None` when the walk is finished.
///
/// `after = None` selects the entry stage. The executor evaluates this after
/// every stage completes, so changes to `docs` made between stages are honoured.
pub fn next_stage(after: Option<StageId>, docs: &DocSelection) -> Option<StageId> {
    let start = after.map_or(0, |s| s.position() + 1);
    StageId::ORDER
        .iter()
        .skip(start)
        .copied()
        .find(|stage| stage.is_requested(docs))
}

// ---------------------------------------------------------------------------
// Requested documents
// ---------------------------------------------------------------------------

/// The set of requested artifact-type tags, in request order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocSelection(Vec<String>);

impl DocSelection {
    /// Builds a selection from tags as given. Empty tags and duplicates are
    /// dropped; tags are matched exactly, so `" srd"` is an unknown tag.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::default();
        for tag in tags {
            selection.insert(tag.as_ref());
        }
        selection
    }

    /// The full vocabulary, in stage order.
    pub fn all() -> Self {
        Self::new(DocType::ALL.iter().map(|t| t.as_str()))
    }

    /// Parses a comma-separated list such as `"brd_prd, srd,erd"`.
    pub fn from_comma_list(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim))
    }

    /// Adds a tag if it is non-empty and not already present.
    pub fn insert(&mut self, tag: &str) {
        if !tag.is_empty() && !self.0.iter().any(|t| t == tag) {
            self.0.push(tag.to_string());
        }
    }

    /// Removes a tag if present.
    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    /// Returns `true` if `doc_type` was requested.
    pub fn contains(&self, doc_type: DocType) -> bool {
        self.0.iter().any(|t| t == doc_type.as_str())
    }

    /// Requested tags that map onto the pipeline vocabulary, in request order.
    pub fn known(&self) -> Vec<DocType> {
        self.0.iter().filter_map(|t| DocType::parse(t)).collect()
    }

    /// Requested tags outside the pipeline vocabulary.
    pub fn unknown(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|t| DocType::parse(t).is_none())
            .map(String::as_str)
            .collect()
    }

    /// The raw tags in request order.
    pub fn tags(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for DocSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(docs: &DocSelection) -> Vec<StageId> {
        let mut visited = Vec::new();
        let mut cursor = next_stage(None, docs);
        while let Some(stage) = cursor {
            visited.push(stage);
            cursor = next_stage(Some(stage), docs);
        }
        visited
    }

    #[test]
    fn every_doc_type_round_trips_through_its_tag() {
        for doc_type in DocType::ALL {
            assert_eq!(DocType::parse(doc_type.as_str()), Some(doc_type));
        }
        assert_eq!(DocType::parse("BRD_PRD"), None);
        assert_eq!(DocType::parse("design_system"), None);
    }

    #[test]
    fn every_doc_type_belongs_to_exactly_one_stage() {
        for doc_type in DocType::ALL {
            let owners: Vec<_> = StageId::ORDER
                .iter()
                .filter(|s| s.outputs().contains(&doc_type))
                .collect();
            assert_eq!(owners, vec![&StageId::for_doc_type(doc_type)]);
        }
    }

    #[test]
    fn walk_visits_only_requested_stages_in_fixed_order() {
        let docs = DocSelection::new(["release_runbook", "srd", "brd_prd"]);
        assert_eq!(
            walk(&docs),
            vec![StageId::BrdPrd, StageId::Srd, StageId::ReleaseRunbook]
        );
    }

    #[test]
    fn either_half_of_the_data_model_unit_triggers_its_stage() {
        assert_eq!(walk(&DocSelection::new(["openapi"])), vec![StageId::ErdApi]);
        assert_eq!(walk(&DocSelection::new(["erd"])), vec![StageId::ErdApi]);
    }

    #[test]
    fn empty_or_unknown_selection_runs_nothing() {
        assert!(walk(&DocSelection::default()).is_empty());
        assert!(walk(&DocSelection::new(["design_system", "nonsense"])).is_empty());
    }

    #[test]
    fn full_vocabulary_visits_every_stage() {
        assert_eq!(walk(&DocSelection::all()), StageId::ORDER.to_vec());
    }

    #[test]
    fn next_stage_reads_the_selection_it_is_given() {
        let mut docs = DocSelection::new(["brd_prd"]);
        assert_eq!(next_stage(Some(StageId::BrdPrd), &docs), None);
        docs.insert("cicd_env");
        assert_eq!(next_stage(Some(StageId::BrdPrd), &docs), Some(StageId::CicdEnv));
    }

    #[test]
    fn comma_lists_are_trimmed_and_deduplicated() {
        let docs = DocSelection::from_comma_list(" brd_prd, srd,,brd_prd ,bogus");
        assert_eq!(docs.tags(), &["brd_prd", "srd", "bogus"]);
        assert_eq!(docs.known(), vec![DocType::BrdPrd, DocType::Srd]);
        assert_eq!(docs.unknown(), vec!["bogus"]);
    }

    #[test]
    fn explicit_tags_are_matched_exactly() {
        let mut docs = DocSelection::new([" brd_prd", "srd"]);
        docs.insert("frd ");
        assert_eq!(docs.tags(), &[" brd_prd", "srd", "frd "]);
        assert_eq!(docs.known(), vec![DocType::Srd]);
        assert_eq!(docs.unknown(), vec![" brd_prd", "frd "]);
        assert_eq!(walk(&docs), vec![StageId::Srd]);
    }
}
