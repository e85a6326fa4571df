use std::path::Path;
use std::sync::Arc;

use artifacts::FsArtifactWriter;
use nodes::{AskamaRenderer, PipelineExecutor};
use pipeline::Idea;
use serde_json::{json, Value};
use tools::{
    docs_registry, orchestrator_registry, SurfaceContext, ToolError, DOCS_TOOLS,
    ORCHESTRATOR_TOOLS,
};

fn context(dir: &Path) -> SurfaceContext {
    let executor = PipelineExecutor::new(
        Arc::new(AskamaRenderer::new()),
        Arc::new(FsArtifactWriter::new()),
    );
    SurfaceContext::new(Arc::new(executor), dir.join("outputs"))
        .with_archive(dir.join("docs_outputs.zip"))
}

fn idea_json() -> String {
    serde_json::to_string(&Idea::sample()).unwrap()
}

#[test]
fn docs_surface_lists_its_tools() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = docs_registry(context(tmp.path())).unwrap();

    assert_eq!(registry.names(), DOCS_TOOLS.to_vec());
    assert_eq!(registry.call("ping", Value::Null).unwrap(), json!("pong"));
    assert_eq!(
        registry.call("list_tools", Value::Null).unwrap(),
        json!(DOCS_TOOLS)
    );
}

#[test]
fn generate_then_list_show_and_zip() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = docs_registry(context(tmp.path())).unwrap();

    let out = registry
        .call(
            "generate_documents",
            json!({"idea_json": idea_json(), "docs": ["brd_prd", "erd", "unknown"]}),
        )
        .unwrap();
    assert_eq!(out["success"], json!(true));
    let stages = out["result"]["stages"].as_object().unwrap();
    assert_eq!(stages.keys().collect::<Vec<_>>(), vec!["brd_prd", "erd_api"]);

    assert_eq!(
        registry.call("list_outputs", Value::Null).unwrap(),
        json!(["brd_prd.md", "erd.mmd"])
    );

    let text = registry
        .call("show_doc", json!({"path": "brd_prd.md"}))
        .unwrap();
    assert!(text.as_str().unwrap().contains("Sample SaaS Platform"));
    assert_eq!(
        registry.call("show_doc", json!({"path": "srd.md"})).unwrap(),
        json!("Document not found: srd.md")
    );

    let archive = registry.call("zip_outputs", Value::Null).unwrap();
    let archive = Path::new(archive.as_str().unwrap()).to_path_buf();
    assert_eq!(archive, tmp.path().join("docs_outputs.zip"));
    assert!(archive.is_file());
}

#[test]
fn invalid_idea_is_a_failure_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = docs_registry(context(tmp.path())).unwrap();

    let out = registry
        .call("generate_all", json!({"idea_json": "{\"title\": \"x\"}"}))
        .unwrap();
    assert_eq!(out["success"], json!(false));
    assert!(out["error"].as_str().unwrap().starts_with("Invalid idea"));
    assert!(!tmp.path().join("outputs").exists());
}

#[test]
fn missing_arguments_are_tool_errors() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = docs_registry(context(tmp.path())).unwrap();

    let err = registry.call("show_doc", json!({})).unwrap_err();
    assert!(matches!(err, ToolError::InvalidArguments { .. }));
}

#[test]
fn orchestrator_runs_a_profile() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = orchestrator_registry(context(tmp.path())).unwrap();
    assert_eq!(registry.names(), ORCHESTRATOR_TOOLS.to_vec());

    let out = registry
        .call(
            "orchestrate_docgen",
            json!({"idea_json": idea_json(), "profile": "tech_only"}),
        )
        .unwrap();
    assert_eq!(out["success"], json!(true));
    assert_eq!(out["result"]["profile"], json!("tech_only"));
    assert_eq!(
        out["result"]["documents"],
        json!(["srd", "trd_tdd", "erd", "openapi", "cicd_env"])
    );
    assert_eq!(
        artifacts::list_outputs(&tmp.path().join("outputs")).unwrap(),
        vec!["cicd_env.md", "erd.mmd", "openapi.yaml", "srd.md", "trd_tdd.md"]
    );
}

#[test]
fn orchestrator_defaults_to_the_full_profile() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = orchestrator_registry(context(tmp.path())).unwrap();

    let out = registry
        .call("orchestrate_docgen", json!({"idea_json": idea_json()}))
        .unwrap();
    assert_eq!(out["result"]["profile"], json!("full"));
    assert_eq!(
        artifacts::list_outputs(&tmp.path().join("outputs")).unwrap().len(),
        11
    );
}

#[test]
fn unknown_profile_is_a_failure_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = orchestrator_registry(context(tmp.path())).unwrap();

    let out = registry
        .call(
            "orchestrate_docgen",
            json!({"idea_json": idea_json(), "profile": "Lean"}),
        )
        .unwrap();
    assert_eq!(
        out,
        json!({
            "success": false,
            "error": "Unknown profile: Lean. Available: full, lean, tech_only, pm_only"
        })
    );
}
