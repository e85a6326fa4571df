//! Document templates and the askama-backed [`TemplateRenderer`].
//!
//! Templates live in `crates/nodes/templates/` and are compiled into the
//! binary. Field references are checked at compile time; blank values for the
//! fields a template cannot do without are rejected at render time by the
//! `required` filter.

use askama::Template;
use pipeline::{DocGenError, DocType, Idea, TemplateRenderer};

mod filters {
    use std::fmt;

    /// The value a template could not render without was blank.
    #[derive(Debug)]
    struct MissingField(String);

    impl fmt::Display for MissingField {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "required field '{}' is empty", self.0)
        }
    }

    impl std::error::Error for MissingField {}

    /// Passes `value` through, failing the render when it is blank.
    pub fn required<T: fmt::Display>(value: T, field: &str) -> ::askama::Result<String> {
        let rendered = value.to_string();
        if rendered.trim().is_empty() {
            Err(::askama::Error::Custom(Box::new(MissingField(field.to_string()))))
        } else {
            Ok(rendered)
        }
    }

    /// Lower-case, hyphen-separated path segment (`"User API"` -> `"user-api"`).
    pub fn slug<T: fmt::Display>(value: T) -> ::askama::Result<String> {
        let words: Vec<String> = words(&value.to_string())
            .map(|w| w.to_lowercase())
            .collect();
        Ok(words.join("-"))
    }

    /// PascalCase identifier usable in diagrams and schemas (`"order item"` -> `"OrderItem"`).
    pub fn ident<T: fmt::Display>(value: T) -> ::askama::Result<String> {
        let mut out = String::new();
        for word in words(&value.to_string()) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        if out.is_empty() {
            out.push_str("Unnamed");
        }
        Ok(out)
    }

    /// Double-quoted YAML scalar. JSON string escaping is valid YAML, so
    /// quotes and line breaks in the value stay inside the scalar.
    pub fn yaml_str<T: fmt::Display>(value: T) -> ::askama::Result<String> {
        serde_json::to_string(&value.to_string()).map_err(|e| ::askama::Error::Custom(Box::new(e)))
    }

    /// Text safe inside a quoted mermaid label or a `%%` comment line.
    pub fn mermaid_label<T: fmt::Display>(value: T) -> ::askama::Result<String> {
        Ok(value
            .to_string()
            .replace('"', "#quot;")
            .replace("\r\n", "<br/>")
            .replace(['\r', '\n'], "<br/>"))
    }

    fn words(value: &str) -> impl Iterator<Item = &str> {
        value
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
    }
}

// One struct per template file; every template sees the idea and its
// creation date.

#[derive(Template)]
#[template(path = "brd_prd.md", escape = "none")]
struct BrdPrdTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "frd.md", escape = "none")]
struct FrdTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "srd.md", escape = "none")]
struct SrdTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "trd_tdd.md", escape = "none")]
struct TrdTddTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "erd.mmd", escape = "none")]
struct ErdTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "openapi.yaml", escape = "none")]
struct OpenapiTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "wireframes.mmd", escape = "none")]
struct WireframesTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "project_plan.md", escape = "none")]
struct ProjectPlanTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "test_strategy.md", escape = "none")]
struct TestStrategyTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "cicd_env.md", escape = "none")]
struct CicdEnvTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

#[derive(Template)]
#[template(path = "release_runbook.md", escape = "none")]
struct ReleaseRunbookTemplate<'a> {
    idea: &'a Idea,
    created: String,
}

/// Renders the compiled-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

impl AskamaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for AskamaRenderer {
    fn render(&self, doc_type: DocType, idea: &Idea) -> Result<String, DocGenError> {
        let created = idea.created_at.format("%Y-%m-%d").to_string();
        let rendered = match doc_type {
            DocType::BrdPrd => BrdPrdTemplate { idea, created }.render(),
            DocType::Frd => FrdTemplate { idea, created }.render(),
            DocType::Srd => SrdTemplate { idea, created }.render(),
            DocType::TrdTdd => TrdTddTemplate { idea, created }.render(),
            DocType::Erd => ErdTemplate { idea, created }.render(),
            DocType::Openapi => OpenapiTemplate { idea, created }.render(),
            DocType::Wireframes => WireframesTemplate { idea, created }.render(),
            DocType::ProjectPlan => ProjectPlanTemplate { idea, created }.render(),
            DocType::TestStrategy => TestStrategyTemplate { idea, created }.render(),
            DocType::CicdEnv => CicdEnvTemplate { idea, created }.render(),
            DocType::ReleaseRunbook => ReleaseRunbookTemplate { idea, created }.render(),
        };
        rendered.map_err(|e| DocGenError::Render {
            template: doc_type.template_name().to_string(),
            message: e.to_string(),
        })
    }
}
