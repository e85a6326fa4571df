use std::fs;
use std::path::Path;
use std::sync::Arc;

use artifacts::{list_outputs, FsArtifactWriter};
use nodes::{AskamaRenderer, GenerationRequest, PipelineExecutor, CHANGELOG_FILE};
use pipeline::{CorrectionRecord, DocGenError, DocSelection, DocType, Idea, StageId};

fn executor() -> PipelineExecutor {
    PipelineExecutor::new(Arc::new(AskamaRenderer::new()), Arc::new(FsArtifactWriter::new()))
}

fn request(dir: &Path, docs: &[&str]) -> GenerationRequest {
    GenerationRequest::new(DocSelection::new(docs.iter().copied())).output_dir(dir)
}

#[test]
fn sample_brd_twice_keeps_first_and_adds_new_file() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("outputs");
    let req = request(&out, &["brd_prd"]);

    let first = executor().run(Idea::sample(), &req).unwrap();
    let canonical = out.join("brd_prd.md");
    assert_eq!(list_outputs(&out).unwrap(), vec!["brd_prd.md"]);
    assert_eq!(first.artifact(DocType::BrdPrd).unwrap().path, canonical);
    let original = fs::read_to_string(&canonical).unwrap();
    assert!(original.contains("Sample SaaS Platform"));

    let second = executor().run(Idea::sample(), &req).unwrap();
    let redirected = out.join("brd_prd.md.new");
    assert_eq!(second.artifact(DocType::BrdPrd).unwrap().path, redirected);
    assert_eq!(fs::read_to_string(&canonical).unwrap(), original);
    assert!(fs::read_to_string(&redirected).unwrap().contains("Sample SaaS Platform"));
}

#[test]
fn overwrite_mode_leaves_one_file() {
    let tmp = tempfile::tempdir().unwrap();
    let req = request(tmp.path(), &["srd"]).overwrite(true);

    executor().run(Idea::sample(), &req).unwrap();
    let mut idea = Idea::sample();
    idea.title = "Renamed Platform".to_string();
    executor().run(idea, &req).unwrap();

    assert_eq!(list_outputs(tmp.path()).unwrap(), vec!["srd.md"]);
    let text = fs::read_to_string(tmp.path().join("srd.md")).unwrap();
    assert!(text.contains("Renamed Platform"));
}

#[test]
fn produced_types_are_the_known_part_of_the_request() {
    let cases: &[&[&str]] = &[
        &[],
        &["erd"],
        &["openapi", "frd"],
        &["erd", "openapi"],
        &["design_system", "wireframes", "nonsense"],
        &["release_runbook", "brd_prd", "cicd_env", "trd_tdd"],
    ];
    for docs in cases {
        let tmp = tempfile::tempdir().unwrap();
        let result = executor()
            .run(Idea::sample(), &request(tmp.path(), docs))
            .unwrap();

        let mut produced = result.produced_types();
        produced.sort();
        let mut expected: Vec<DocType> = docs.iter().filter_map(|d| DocType::parse(d)).collect();
        expected.sort();
        assert_eq!(produced, expected, "request {docs:?}");

        let files = list_outputs(tmp.path()).unwrap();
        assert_eq!(files.len(), expected.len(), "request {docs:?}");
    }
}

#[test]
fn all_documents_follow_the_stage_order() {
    let tmp = tempfile::tempdir().unwrap();
    let result = executor()
        .run(Idea::sample(), &GenerationRequest::all().output_dir(tmp.path()))
        .unwrap();

    let keys: Vec<&str> = result.stages.keys().map(String::as_str).collect();
    let expected: Vec<&str> = StageId::ORDER.iter().map(|s| s.key()).collect();
    assert_eq!(keys, expected);
    assert_eq!(result.stages["erd_api"].artifacts.len(), 2);
    assert_eq!(list_outputs(tmp.path()).unwrap().len(), DocType::ALL.len());
}

#[test]
fn render_failure_aborts_but_keeps_earlier_files() {
    let tmp = tempfile::tempdir().unwrap();
    let mut idea = Idea::sample();
    // Passes validation, but the runbook template needs a non-blank version.
    idea.version = " ".to_string();

    let err = executor()
        .run(idea, &request(tmp.path(), &["brd_prd", "release_runbook"]))
        .unwrap_err();

    assert!(matches!(err, DocGenError::Render { .. }), "{err}");
    assert_eq!(list_outputs(tmp.path()).unwrap(), vec!["brd_prd.md"]);
}

#[test]
fn write_failure_aborts_the_request() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();

    let err = executor()
        .run(Idea::sample(), &request(&blocker, &["frd"]))
        .unwrap_err();
    assert!(matches!(err, DocGenError::Write { .. }));
}

#[test]
fn correction_pass_writes_beside_the_original() {
    let tmp = tempfile::tempdir().unwrap();
    let req = request(tmp.path(), &["brd_prd", "frd", "openapi"]).correct(true);

    let result = executor().run(Idea::sample(), &req).unwrap();
    let log = result.corrections.expect("correction log");

    assert_eq!(log.records.len(), 3);
    assert!(log.records.iter().any(|r| *r == CorrectionRecord::NoChange { doc_type: DocType::Frd }));
    assert_eq!(log.changelog_path, Some(tmp.path().join(CHANGELOG_FILE)));
    assert_eq!(
        list_outputs(tmp.path()).unwrap(),
        vec![
            "brd_prd.md",
            "brd_prd.md.new",
            "corrections.json",
            "frd.md",
            "openapi.yaml",
            "openapi.yaml.new",
        ]
    );

    let original = fs::read_to_string(tmp.path().join("brd_prd.md")).unwrap();
    let corrected = fs::read_to_string(tmp.path().join("brd_prd.md.new")).unwrap();
    assert!(!original.contains("## Review Notes"));
    assert!(corrected.starts_with(original.trim_end()));
    assert!(corrected.contains("stakeholder alignment"));

    let api = fs::read_to_string(tmp.path().join("openapi.yaml.new")).unwrap();
    assert!(api.contains("# Review Notes"));
    assert!(api.contains("rate limiting"));
}

#[test]
fn correction_pass_in_overwrite_mode_replaces_in_place() {
    let tmp = tempfile::tempdir().unwrap();
    let req = request(tmp.path(), &["erd"]).overwrite(true).correct(true);

    let result = executor().run(Idea::sample(), &req).unwrap();

    assert_eq!(
        list_outputs(tmp.path()).unwrap(),
        vec!["corrections.json", "erd.mmd"]
    );
    let erd = fs::read_to_string(tmp.path().join("erd.mmd")).unwrap();
    assert!(erd.contains("%% Review Notes"));

    let log = result.corrections.unwrap();
    match &log.records[0] {
        CorrectionRecord::Corrected {
            original_length,
            corrected_length,
            persisted_to,
            ..
        } => {
            assert!(corrected_length > original_length);
            assert_eq!(persisted_to.as_deref(), Some(tmp.path().join("erd.mmd").as_path()));
        }
        other => panic!("expected a correction, got {other:?}"),
    }

    let changelog: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join(CHANGELOG_FILE)).unwrap()).unwrap();
    assert_eq!(changelog[0]["status"], "corrected");
    assert_eq!(changelog[0]["doc_type"], "erd");
}

#[test]
fn profile_orchestration_runs_the_profile_types() {
    let tmp = tempfile::tempdir().unwrap();
    let run = executor()
        .orchestrate(
            Idea::sample(),
            "lean",
            GenerationRequest::default().output_dir(tmp.path()),
        )
        .unwrap();

    assert_eq!(run.profile, "lean");
    assert_eq!(
        run.documents,
        vec!["brd_prd", "srd", "erd", "project_plan", "test_strategy"]
    );
    assert_eq!(
        run.result.produced_types(),
        vec![
            DocType::BrdPrd,
            DocType::Srd,
            DocType::Erd,
            DocType::ProjectPlan,
            DocType::TestStrategy,
        ]
    );
}

#[test]
fn unknown_profile_runs_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let err = executor()
        .orchestrate(
            Idea::sample(),
            "everything",
            GenerationRequest::default().output_dir(tmp.path()),
        )
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unknown profile: everything. Available: full, lean, tech_only, pm_only"
    );
    assert!(list_outputs(tmp.path()).unwrap().is_empty());
}
