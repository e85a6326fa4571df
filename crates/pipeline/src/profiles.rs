//! Named profiles: fixed, ordered sets of artifact types.
//!
//! Lookup is by exact name. There is no partial matching and no case
//! normalisation; an unknown name fails with the list of valid names.

use serde::Serialize;

use crate::{DocGenError, DocSelection};

/// A named, ordered set of artifact-type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub docs: &'static [&'static str],
}

impl Profile {
    /// The profile's tags as a [`DocSelection`].
    pub fn selection(&self) -> DocSelection {
        DocSelection::new(self.docs.iter())
    }
}

/// The four profiles, in definition order.
///
/// `full` lists `design_system`, which no stage emits; the walk ignores it.
pub const PROFILES: [Profile; 4] = [
    Profile {
        name: "full",
        docs: &[
            "brd_prd",
            "frd",
            "srd",
            "trd_tdd",
            "erd",
            "openapi",
            "wireframes",
            "design_system",
            "project_plan",
            "test_strategy",
            "cicd_env",
            "release_runbook",
        ],
    },
    Profile {
        name: "lean",
        docs: &["brd_prd", "srd", "erd", "project_plan", "test_strategy"],
    },
    Profile {
        name: "tech_only",
        docs: &["srd", "trd_tdd", "erd", "openapi", "cicd_env"],
    },
    Profile {
        name: "pm_only",
        docs: &["brd_prd", "frd", "project_plan", "test_strategy", "release_runbook"],
    },
];

/// Names of every profile, in definition order.
pub fn profile_names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.name).collect()
}

/// Resolves a profile by exact name.
pub fn resolve_profile(name: &str) -> Result<&'static Profile, DocGenError> {
    PROFILES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| DocGenError::UnknownProfile {
            name: name.to_string(),
            available: profile_names().into_iter().map(String::from).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocType;

    #[test]
    fn lean_resolves_to_its_five_types_in_order() {
        let lean = resolve_profile("lean").unwrap();
        assert_eq!(
            lean.docs,
            &["brd_prd", "srd", "erd", "project_plan", "test_strategy"]
        );
        assert_eq!(resolve_profile("lean").unwrap(), lean);
    }

    #[test]
    fn unknown_profile_lists_every_valid_name() {
        let message = resolve_profile("Lean").unwrap_err().to_string();
        assert_eq!(
            message,
            "Unknown profile: Lean. Available: full, lean, tech_only, pm_only"
        );
    }

    #[test]
    fn profiles_are_distinct() {
        for (i, a) in PROFILES.iter().enumerate() {
            for b in PROFILES.iter().skip(i + 1) {
                assert_ne!(a.docs, b.docs, "{} and {} overlap exactly", a.name, b.name);
            }
        }
    }

    #[test]
    fn full_covers_the_pipeline_vocabulary() {
        let full = resolve_profile("full").unwrap().selection();
        assert_eq!(full.known(), DocType::ALL.to_vec());
        assert_eq!(full.unknown(), vec!["design_system"]);
    }
}
