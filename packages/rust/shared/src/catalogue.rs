//! Catalogue loading: the built-in Getting Started questionnaire and
//! TOML/JSON catalogue files.

use std::path::Path;

use crate::config::CatalogueSource;
use crate::error::{Result, SignpostError};
use crate::types::{Catalogue, Outcome, Step};

/// Supported on-disk catalogue formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueFormat {
    Toml,
    Json,
}

impl CatalogueFormat {
    /// Pick the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// The Getting Started questionnaire for choosing an Irmin store.
pub fn builtin_catalogue() -> Catalogue {
    Catalogue::new()
        .with_title("Getting Started with Irmin")
        .with_question("git", "Do you need to be compatible with Git?", &["Yes", "No"])
        .with_question(
            "storage",
            "Where do you want to store data?",
            &["In memory", "On the filesystem"],
        )
        .with_question(
            "large",
            "Do you plan on storing a really large amount of data?",
            &["Yes", "No"],
        )
        .with_question(
            "server",
            "How will you interact with Irmin?",
            &["Using the OCaml API", "Using GraphQL", "Using a REST API"],
        )
        .with_outcome(
            "git-mem",
            Outcome::new(vec![
                Step::specific("git", 0),
                Step::specific("storage", 0),
                Step::wildcard("server"),
            ])
            .with_title("In-memory Git store")
            .with_message("Install `irmin-git` and create a store with `Irmin_git.Mem`."),
        )
        .with_outcome(
            "git-fs",
            Outcome::new(vec![
                Step::specific("git", 0),
                Step::specific("storage", 1),
                Step::wildcard("server"),
            ])
            .with_title("On-disk Git store")
            .with_message("Install `irmin-git` and create a store with `Irmin_git_unix.FS`."),
        )
        .with_outcome(
            "mem",
            Outcome::new(vec![
                Step::specific("git", 1),
                Step::specific("storage", 0),
                Step::wildcard("server"),
            ])
            .with_title("In-memory store")
            .with_message("Install `irmin` and create a store with `Irmin_mem`."),
        )
        .with_outcome(
            "pack",
            Outcome::new(vec![
                Step::specific("git", 1),
                Step::specific("storage", 1),
                Step::specific("large", 0),
                Step::wildcard("server"),
            ])
            .with_title("Pack store")
            .with_message("Install `irmin-pack` and create a store with `Irmin_pack_unix`."),
        )
        .with_outcome(
            "fs",
            Outcome::new(vec![
                Step::specific("git", 1),
                Step::specific("storage", 1),
                Step::specific("large", 1),
                Step::wildcard("server"),
            ])
            .with_title("Filesystem store")
            .with_message("Install `irmin-fs` and create a store with `Irmin_fs_unix`."),
        )
}

/// Parse a catalogue from a string in the given format.
pub fn parse_catalogue(content: &str, format: CatalogueFormat) -> Result<Catalogue> {
    match format {
        CatalogueFormat::Toml => {
            toml::from_str(content).map_err(|e| SignpostError::parse(e.to_string()))
        }
        CatalogueFormat::Json => {
            serde_json::from_str(content).map_err(|e| SignpostError::parse(e.to_string()))
        }
    }
}

/// Load a catalogue from a `.toml` or `.json` file.
pub fn load_catalogue_from(path: &Path) -> Result<Catalogue> {
    let content = std::fs::read_to_string(path).map_err(|e| SignpostError::io(path, e))?;

    let catalogue = parse_catalogue(&content, CatalogueFormat::from_path(path)).map_err(|e| {
        SignpostError::parse(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::info!(
        ?path,
        questions = catalogue.questions.len(),
        outcomes = catalogue.outcomes.len(),
        "loaded catalogue"
    );

    Ok(catalogue)
}

/// Load the catalogue a [`CatalogueSource`] points at.
pub fn load_catalogue(source: &CatalogueSource) -> Result<Catalogue> {
    match source {
        CatalogueSource::Builtin => {
            tracing::debug!("using built-in catalogue");
            Ok(builtin_catalogue())
        }
        CatalogueSource::File(path) => load_catalogue_from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Answer;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/catalogues")
            .join(name)
    }

    #[test]
    fn builtin_catalogue_shape() {
        let catalogue = builtin_catalogue();
        assert_eq!(catalogue.questions.len(), 4);
        assert_eq!(catalogue.outcomes.len(), 5);
        assert_eq!(
            catalogue.question("server").map(|q| q.answers.len()),
            Some(3)
        );
        for outcome in catalogue.outcomes.values() {
            assert!(outcome.title.is_some());
            for step in &outcome.path {
                assert!(catalogue.require_question(step.question()).is_ok());
            }
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            CatalogueFormat::from_path(Path::new("wizard.json")),
            CatalogueFormat::Json
        );
        assert_eq!(
            CatalogueFormat::from_path(Path::new("wizard.JSON")),
            CatalogueFormat::Json
        );
        assert_eq!(
            CatalogueFormat::from_path(Path::new("wizard.toml")),
            CatalogueFormat::Toml
        );
        assert_eq!(
            CatalogueFormat::from_path(Path::new("wizard")),
            CatalogueFormat::Toml
        );
    }

    #[test]
    fn parse_toml_with_mixed_steps() {
        let toml_str = r#"
title = "Tiny"

[questions.git]
prompt = "Git?"
answers = ["Yes", "No"]

[questions.server]
prompt = "Server?"
answers = ["OCaml", "GraphQL"]

[outcomes.plain]
title = "Plain"
path = [["git", 1], "server"]
"#;
        let catalogue = parse_catalogue(toml_str, CatalogueFormat::Toml).expect("parse");
        assert_eq!(catalogue.title.as_deref(), Some("Tiny"));

        let plain = catalogue.outcome("plain").expect("outcome exists");
        assert_eq!(
            plain.path,
            vec![Step::specific("git", 1), Step::wildcard("server")]
        );
        assert!(plain.is_compatible(&[Answer::new("git", 1), Answer::new("server", 1)]));
    }

    #[test]
    fn parse_error_is_reported() {
        let err = parse_catalogue("{ not json", CatalogueFormat::Json).expect_err("invalid");
        assert!(matches!(err, SignpostError::Parse { .. }));
    }

    #[test]
    fn toml_roundtrip() {
        let catalogue = builtin_catalogue();
        let toml_str = toml::to_string_pretty(&catalogue).expect("serialize");
        let parsed = parse_catalogue(&toml_str, CatalogueFormat::Toml).expect("deserialize");
        assert_eq!(parsed, catalogue);
    }

    #[test]
    fn getting_started_fixture_matches_builtin() {
        let path = fixture("getting-started.toml");
        let parsed = load_catalogue_from(&path).expect("load fixture");
        assert_eq!(parsed, builtin_catalogue());
    }

    #[test]
    fn json_fixture_loads() {
        let path = fixture("ambiguous.json");
        let parsed = load_catalogue_from(&path).expect("load fixture");
        assert_eq!(parsed.outcomes.len(), 2);
        assert_eq!(parsed.questions.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalogue(&CatalogueSource::File("does/not/exist.toml".into()))
            .expect_err("missing file");
        assert!(matches!(err, SignpostError::Io { .. }));
    }
}
