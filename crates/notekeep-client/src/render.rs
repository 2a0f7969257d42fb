//! Plain-text rendering of notes for the terminal.

use notekeep_core::Note;

/// Render a single note. Content is reproduced verbatim, each line indented.
pub fn note_card(note: &Note) -> String {
    let mut out = format!(
        "[{}] {}\n    Created: {}\n",
        note.id,
        note.title,
        note.created_date_label()
    );
    for line in note.content.split('\n') {
        out.push_str("    | ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Render a list newest first. The store returns insertion order; reversal is
/// a presentation choice made here only.
pub fn note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found. Create one!\n".to_string();
    }
    notes
        .iter()
        .rev()
        .map(note_card)
        .collect::<Vec<_>>()
        .join("\n")
}
