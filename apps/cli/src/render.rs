//! Plain-text rendering of transcripts and catalogues.

use signpost_core::{Transcript, TranscriptStep};
use signpost_shared::Catalogue;

/// Render the displayed questions, candidates, and outcome of a session.
pub(crate) fn transcript_text(transcript: &Transcript, show_candidates: bool) -> String {
    let mut lines = Vec::new();

    if let Some(title) = &transcript.catalogue {
        lines.push(title.clone());
        lines.push(String::new());
    }

    for (position, step) in transcript.steps.iter().enumerate() {
        lines.push(format!("  {}. {}  [{}]", position + 1, step.prompt, step.question));
        match &step.label {
            Some(label) => lines.push(format!("       -> {label}")),
            None => lines.push(format!("       {}", answer_choices(step))),
        }
    }

    lines.push(String::new());

    if show_candidates && transcript.outcome.is_none() {
        let ids: Vec<&str> = transcript.candidates.iter().map(|id| id.as_str()).collect();
        lines.push(format!("Candidates: {}", ids.join(", ")));
    }

    match &transcript.outcome {
        Some(outcome) => {
            lines.push(format!("Outcome: {} ({})", outcome.title, outcome.id));
            if let Some(message) = &outcome.message {
                lines.push(format!("  {message}"));
            }
        }
        None => lines.push("No outcome reached yet.".to_string()),
    }

    lines.join("\n")
}

/// `[0] Yes  [1] No` for a question's answers.
pub(crate) fn answer_choices(step: &TranscriptStep) -> String {
    step.answers
        .iter()
        .enumerate()
        .map(|(i, label)| format!("[{i}] {label}"))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render every question and outcome path in a catalogue.
pub(crate) fn catalogue_text(catalogue: &Catalogue) -> String {
    let mut lines = Vec::new();

    lines.push(catalogue.title.clone().unwrap_or_else(|| "Untitled catalogue".to_string()));
    lines.push(String::new());
    lines.push(format!("Questions ({}):", catalogue.questions.len()));
    for (id, question) in &catalogue.questions {
        lines.push(format!("  {id}: {}", question.prompt));
        for (i, label) in question.answers.iter().enumerate() {
            lines.push(format!("      {i}. {label}"));
        }
    }

    lines.push(String::new());
    lines.push(format!("Outcomes ({}):", catalogue.outcomes.len()));
    for (id, outcome) in &catalogue.outcomes {
        let path: Vec<String> = outcome.path.iter().map(ToString::to_string).collect();
        lines.push(format!("  {}: {}", catalogue.outcome_label(id), path.join(" -> ")));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use signpost_core::Session;
    use signpost_shared::builtin_catalogue;

    #[test]
    fn renders_pending_question_choices() {
        let mut session = Session::new(Arc::new(builtin_catalogue()));
        session.record_answer(0, "git", 1).expect("answer git");

        let text = transcript_text(&session.transcript().expect("transcript"), true);
        assert!(text.contains("1. Do you need to be compatible with Git?  [git]"));
        assert!(text.contains("-> No"));
        assert!(text.contains("[0] In memory  [1] On the filesystem"));
        assert!(text.contains("Candidates: fs, mem, pack"));
        assert!(text.ends_with("No outcome reached yet."));
    }

    #[test]
    fn renders_outcome_message() {
        let mut session = Session::new(Arc::new(builtin_catalogue()));
        session.record_answer(0, "git", 0).expect("answer git");
        session.record_answer(1, "storage", 1).expect("answer storage");
        session.record_answer(2, "server", 0).expect("answer server");

        let text = transcript_text(&session.transcript().expect("transcript"), true);
        assert!(text.contains("Outcome: On-disk Git store (git-fs)"));
        assert!(text.contains("Irmin_git_unix.FS"));
        assert!(!text.contains("Candidates:"));
    }

    #[test]
    fn renders_catalogue_paths() {
        let text = catalogue_text(&builtin_catalogue());
        assert!(text.starts_with("Getting Started with Irmin"));
        assert!(text.contains("Questions (4):"));
        assert!(text.contains("Pack store: git=1 -> storage=1 -> large=0 -> server=*"));
    }
}
