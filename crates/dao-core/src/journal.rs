use crate::achievement::check_achievements;
use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::model::{AppData, JournalAnalysis, JournalEntry};
use crate::notice::Notice;
use crate::types::MilestoneKind;

/// Write a new entry at the top of the journal. Returns its id.
pub fn write(
    data: &mut AppData,
    content: &str,
    analysis: Option<JournalAnalysis>,
    moment: &Moment,
    notices: &mut Vec<Notice>,
) -> u64 {
    let id = data.next_id(moment);
    upsert(
        data,
        JournalEntry {
            id,
            date: moment.now,
            content: content.to_string(),
            analysis,
        },
        moment,
        notices,
    );
    id
}

/// Insert or merge an entry.
///
/// A known id keeps its position and date; its analysis is only replaced when
/// the incoming entry carries one. A new entry goes to the top and is logged
/// as a milestone.
pub fn upsert(data: &mut AppData, entry: JournalEntry, moment: &Moment, notices: &mut Vec<Notice>) {
    match data.journal_entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => {
            existing.content = entry.content;
            if entry.analysis.is_some() {
                existing.analysis = entry.analysis;
            }
        }
        None => {
            data.journal_entries.insert(0, entry);
            data.record_milestone(
                MilestoneKind::JournalEntry,
                "Inner Reflection",
                "Recorded thoughts in the journal.",
                moment,
            );
        }
    }
    check_achievements(data, notices);
}

/// Attach an analysis to an existing entry.
pub fn annotate(data: &mut AppData, id: u64, analysis: JournalAnalysis) -> Result<()> {
    let entry = data
        .journal_entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(DaoError::JournalEntryNotFound(id))?;
    entry.analysis = Some(analysis);
    Ok(())
}
