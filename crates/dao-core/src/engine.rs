//! The aggregate owner. Every mutation runs against a clone of the current
//! snapshot; the clone is persisted and becomes current only when the whole
//! transition succeeds.

use crate::advisor::{self, advisor_due};
use crate::clock::Moment;
use crate::error::{DaoError, Result};
use crate::journal;
use crate::model::{AppData, Task};
use crate::nemesis::{self, NemesisDraft};
use crate::notice::Notice;
use crate::oracle::{self, Oracle, SchemeDraft};
use crate::profile;
use crate::progress::{self, reset_daily_capacity};
use crate::session::Session;
use crate::store::{self, BlobStore, LoadOrigin};
use crate::task::{self, TaskAction};
use crate::tribulation::{self, TribulationDraft, TribulationDue, TribulationOutcome};
use crate::types::{Day, Difficulty, GoalField};

pub struct Engine<S: BlobStore> {
    store: S,
    key: String,
    capacity: i64,
    data: AppData,
    origin: LoadOrigin,
}

impl<S: BlobStore> Engine<S> {
    /// Load the session's aggregate. `capacity` seeds a fresh aggregate.
    pub fn open(store: S, session: &Session, capacity: i64, moment: &Moment) -> Result<Self> {
        let key = session.storage_key();
        let (data, origin) = store::load(&store, &key, capacity, moment)?;
        tracing::debug!(%key, ?origin, "aggregate loaded");
        Ok(Self {
            store,
            key,
            capacity,
            data,
            origin,
        })
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Run `f` on a working copy. On success the copy is saved and committed;
    /// on error nothing changes, in memory or in the store.
    pub fn transact<F>(&mut self, moment: &Moment, f: F) -> Result<Vec<Notice>>
    where
        F: FnOnce(&mut AppData, &Moment, &mut Vec<Notice>) -> Result<()>,
    {
        let mut draft = self.data.clone();
        let mut notices = Vec::new();
        reset_daily_capacity(&mut draft, moment);
        f(&mut draft, moment, &mut notices)?;
        store::save(&self.store, &self.key, &draft)?;
        self.data = draft;
        Ok(notices)
    }

    // -----------------------------------------------------------------------
    // Schemes
    // -----------------------------------------------------------------------

    pub fn apply_task(&mut self, action: TaskAction, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, m, n| task::apply(d, action, m, n))
    }

    /// Add a scheme with a fresh id. `points` defaults to the difficulty's
    /// essence value.
    pub fn add_task(
        &mut self,
        day: Day,
        text: &str,
        difficulty: Difficulty,
        benefits: &str,
        points: Option<i64>,
        moment: &Moment,
    ) -> Result<(u64, Vec<Notice>)> {
        let mut id = 0;
        let notices = self.transact(moment, |d, m, n| {
            id = d.next_id(m);
            let mut task = Task::new(id, text, difficulty).with_benefits(benefits);
            if let Some(points) = points {
                task = task.with_points(points);
            }
            task::apply(d, TaskAction::Add { day, task }, m, n)
        })?;
        Ok((id, notices))
    }

    pub fn add_subtask(&mut self, task_id: u64, text: &str, moment: &Moment) -> Result<Vec<Notice>> {
        self.apply_task(
            TaskAction::AddSubtask {
                task_id,
                text: text.to_string(),
            },
            moment,
        )
    }

    /// Put a batch of drafted schemes on `day`, each with its own id.
    pub fn add_schemes(
        &mut self,
        day: Day,
        drafts: Vec<SchemeDraft>,
        moment: &Moment,
    ) -> Result<(Vec<u64>, Vec<Notice>)> {
        let mut ids = Vec::with_capacity(drafts.len());
        let notices = self.transact(moment, |d, m, n| {
            let mut next = d.next_id(m);
            let tasks = drafts
                .into_iter()
                .map(|draft| {
                    let task = draft.into_task(next);
                    ids.push(next);
                    next += 1;
                    task
                })
                .collect();
            task::apply(d, TaskAction::AddMultiple { day, tasks }, m, n)
        })?;
        Ok((ids, notices))
    }

    // -----------------------------------------------------------------------
    // Essence, reward, goals
    // -----------------------------------------------------------------------

    pub fn waste_essence(&mut self, amount: i64, reason: &str, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, m, n| progress::waste_essence(d, amount, reason, m, n))
    }

    pub fn set_reward(&mut self, text: Option<&str>, goal: Option<i64>, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, _, _| progress::set_reward(d, text, goal))
    }

    pub fn claim_reward(&mut self, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, progress::claim_reward)
    }

    pub fn set_capacity(&mut self, capacity: i64, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, _, _| progress::set_daily_capacity(d, capacity))
    }

    pub fn set_goal(&mut self, field: GoalField, text: &str, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, _, _| {
            profile::set_goal(d, field, text);
            Ok(())
        })
    }

    // -----------------------------------------------------------------------
    // Tribulation
    // -----------------------------------------------------------------------

    pub fn accept_tribulation(&mut self, draft: TribulationDraft, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, m, n| {
            tribulation::accept(d, draft, m, n);
            Ok(())
        })
    }

    pub fn resolve_tribulation(&mut self, outcome: TribulationOutcome, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, m, n| tribulation::resolve(d, outcome, m, n))
    }

    /// Ask the collaborator for a tribulation now, regardless of cadence.
    pub fn summon_tribulation(&mut self, oracle: &dyn Oracle, moment: &Moment) -> Result<Vec<Notice>> {
        let draft = oracle::generate_tribulation(oracle, &self.data)?;
        self.accept_tribulation(draft, moment)
    }

    // -----------------------------------------------------------------------
    // Rivals
    // -----------------------------------------------------------------------

    pub fn add_nemesis(&mut self, draft: NemesisDraft, moment: &Moment) -> Result<(u64, Vec<Notice>)> {
        let mut id = 0;
        let notices = self.transact(moment, |d, m, n| {
            id = nemesis::add(d, draft, m, n);
            Ok(())
        })?;
        Ok((id, notices))
    }

    pub fn update_nemesis(&mut self, id: u64, draft: NemesisDraft, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, m, _| nemesis::update(d, id, draft, m))
    }

    pub fn delete_nemesis(&mut self, id: u64, moment: &Moment) -> Result<Vec<Notice>> {
        self.transact(moment, |d, _, _| nemesis::delete(d, id))
    }

    /// Shape a rival from a free-text prompt. With `target`, the existing
    /// rival is reworked in place; otherwise a new one is added.
    pub fn customize_nemesis(
        &mut self,
        oracle: &dyn Oracle,
        prompt: &str,
        target: Option<u64>,
        moment: &Moment,
    ) -> Result<Vec<Notice>> {
        let existing = match target {
            Some(id) => Some(
                self.data
                    .nemesis
                    .iter()
                    .find(|n| n.id == id)
                    .map(NemesisDraft::from)
                    .ok_or(DaoError::NemesisNotFound(id))?,
            ),
            None => None,
        };
        let draft = oracle::customize_nemesis(oracle, &self.data, prompt, existing)?;
        match target {
            Some(id) => self.update_nemesis(id, draft, moment),
            None => self.add_nemesis(draft, moment).map(|(_, notices)| notices),
        }
    }

    /// Request a week of progress for rivals. Without `force`, only rivals
    /// past the update window are asked about. Individual failures become
    /// notices; successes are merged into the latest snapshot together.
    pub fn advance_rivals(&mut self, oracle: &dyn Oracle, force: bool, moment: &Moment) -> Result<Vec<Notice>> {
        let ids: Vec<u64> = if force {
            self.data.nemesis.iter().map(|n| n.id).collect()
        } else {
            nemesis::stale_rivals(&self.data, moment)
        };

        let mut failures = Vec::new();
        let mut updates = Vec::new();
        for rival in self.data.nemesis.iter().filter(|n| ids.contains(&n.id)) {
            match oracle::update_nemesis(oracle, &NemesisDraft::from(rival)) {
                Ok(draft) => updates.push((rival.id, draft)),
                Err(e) => failures.push(collaborator_failed(oracle::OP_UPDATE_NEMESIS, &e)),
            }
        }

        let mut notices = if updates.is_empty() {
            Vec::new()
        } else {
            self.transact(moment, |d, m, n| {
                nemesis::merge_updates(d, updates, m, n);
                Ok(())
            })?
        };
        notices.extend(failures);
        Ok(notices)
    }

    // -----------------------------------------------------------------------
    // Journal, advisor, mind palace
    // -----------------------------------------------------------------------

    /// Write a journal entry. With an oracle, the entry is analyzed first; a
    /// failed analysis still records the entry, without one.
    pub fn write_journal(
        &mut self,
        content: &str,
        oracle: Option<&dyn Oracle>,
        moment: &Moment,
    ) -> Result<(u64, Vec<Notice>)> {
        let mut failures = Vec::new();
        let analysis = match oracle.map(|o| oracle::analyze_journal(o, content)) {
            Some(Ok(analysis)) => Some(analysis),
            Some(Err(e)) => {
                failures.push(collaborator_failed(oracle::OP_JOURNAL_ANALYSIS, &e));
                None
            }
            None => None,
        };
        let mut id = 0;
        let mut notices = self.transact(moment, |d, m, n| {
            id = journal::write(d, content, analysis, m, n);
            Ok(())
        })?;
        notices.extend(failures);
        Ok((id, notices))
    }

    pub fn analyze_journal(&mut self, oracle: &dyn Oracle, id: u64, moment: &Moment) -> Result<Vec<Notice>> {
        let content = self
            .data
            .journal_entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.content.clone())
            .ok_or(DaoError::JournalEntryNotFound(id))?;
        let analysis = oracle::analyze_journal(oracle, &content)?;
        self.transact(moment, |d, _, _| journal::annotate(d, id, analysis))
    }

    pub fn consult_advisor(&mut self, oracle: &dyn Oracle, moment: &Moment) -> Result<Vec<Notice>> {
        let draft = oracle::advise(oracle, &self.data, moment)?;
        self.transact(moment, |d, m, _| {
            advisor::set_advisor(d, draft, m);
            Ok(())
        })
    }

    pub fn render_mind_palace(&mut self, oracle: &dyn Oracle, moment: &Moment) -> Result<Vec<Notice>> {
        let url = oracle::render_mind_palace(oracle, &self.data)?;
        self.transact(moment, |d, m, _| {
            profile::set_mind_palace(d, url, m);
            Ok(())
        })
    }

    /// Replace a scheme's benefits with the collaborator's rewrite.
    pub fn refine_benefits(&mut self, oracle: &dyn Oracle, task_id: u64, moment: &Moment) -> Result<Vec<Notice>> {
        let mut task = self
            .data
            .weekly_tasks
            .find(task_id)
            .cloned()
            .ok_or(DaoError::TaskNotFound(task_id))?;
        task.benefits = oracle::refine_benefits(oracle, &self.data, &task)?;
        self.apply_task(TaskAction::Update { task }, moment)
    }

    // -----------------------------------------------------------------------
    // Periodic upkeep
    // -----------------------------------------------------------------------

    /// Time-driven upkeep: fail an expired tribulation, then, with an oracle,
    /// generate whatever is due (tribulation, first rival, rival progress,
    /// advice). Collaborator failures are reported as notices and leave the
    /// aggregate as it was.
    pub fn refresh(&mut self, oracle: Option<&dyn Oracle>, moment: &Moment) -> Result<Vec<Notice>> {
        let mut notices = self.transact(moment, |d, m, n| {
            tribulation::expire(d, m, n).map(|_| ())
        })?;
        let Some(oracle) = oracle else {
            return Ok(notices);
        };

        if tribulation::due(&self.data, moment) == TribulationDue::Generate {
            match oracle::generate_tribulation(oracle, &self.data) {
                Ok(draft) => notices.extend(self.accept_tribulation(draft, moment)?),
                Err(e) => notices.push(collaborator_failed(oracle::OP_TRIBULATION, &e)),
            }
        }

        if nemesis::first_rival_due(&self.data) {
            match oracle::generate_nemesis(oracle, &self.data) {
                Ok(draft) => notices.extend(self.add_nemesis(draft, moment)?.1),
                Err(e) => notices.push(collaborator_failed(oracle::OP_NEMESIS, &e)),
            }
        }

        notices.extend(self.advance_rivals(oracle, false, moment)?);

        if advisor_due(&self.data, moment) {
            match oracle::advise(oracle, &self.data, moment) {
                Ok(draft) => {
                    self.transact(moment, |d, m, _| {
                        advisor::set_advisor(d, draft, m);
                        Ok(())
                    })?;
                }
                Err(e) => notices.push(collaborator_failed(oracle::OP_ADVISOR, &e)),
            }
        }

        Ok(notices)
    }

    // -----------------------------------------------------------------------
    // Export / import / reset
    // -----------------------------------------------------------------------

    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    /// Replace the aggregate with an exported one. Missing or unreadable
    /// parts back-fill as on load; invalid JSON is rejected and nothing
    /// changes.
    pub fn import(&mut self, blob: &str, moment: &Moment) -> Result<Vec<Notice>> {
        let imported = store::decode(blob)?;
        self.transact(moment, |d, m, _| {
            *d = imported;
            reset_daily_capacity(d, m);
            Ok(())
        })
    }

    /// Drop the stored aggregate and start over. Returns true if a stored
    /// snapshot existed.
    pub fn reset(&mut self, moment: &Moment) -> Result<bool> {
        let removed = self.store.remove(&self.key)?;
        let mut data = AppData::with_capacity(self.capacity);
        reset_daily_capacity(&mut data, moment);
        self.data = data;
        self.origin = LoadOrigin::Fresh;
        tracing::info!(key = %self.key, removed, "aggregate reset");
        Ok(removed)
    }
}

fn collaborator_failed(operation: &str, err: &DaoError) -> Notice {
    tracing::warn!(operation, error = %err, "collaborator request failed");
    Notice::CollaboratorFailed {
        operation: operation.to_string(),
        message: err.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::testing::ScriptedOracle;
    use crate::oracle::{OP_ADVISOR, OP_NEMESIS, OP_TRIBULATION, OP_UPDATE_NEMESIS};
    use crate::store::MemoryStore;
    use crate::types::MilestoneKind;
    use chrono::NaiveDate;
    use serde_json::json;

    fn monday() -> Moment {
        Moment::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    fn open<'a>(store: &'a MemoryStore, moment: &Moment) -> Engine<&'a MemoryStore> {
        Engine::open(store, &Session::anonymous(), 100, moment).unwrap()
    }

    fn tribulation_answer() -> serde_json::Value {
        json!({"title": "Trial of Flame", "description": "Finish the draft.", "reward": 150, "penalty": 60})
    }

    fn rival_answer(points: i64) -> serde_json::Value {
        json!({"name": "Lin Feng", "title": "Crimson Blade", "rank": "Rank 1 Novice", "points": points,
               "backstory": "Former colleague.", "lastAction": "Launched a startup."})
    }

    fn advisor_answer() -> serde_json::Value {
        json!({"headline": "Steady Steps", "praise": "Consistent.", "critique": "Narrow.", "suggestion": "Widen."})
    }

    #[test]
    fn committed_transitions_persist() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let (id, _) = engine
            .add_task(Day::Monday, "Temper the Body", Difficulty::Hard, "", None, &m)
            .unwrap();
        engine.apply_task(TaskAction::Toggle { id }, &m).unwrap();

        let reopened = open(&store, &m);
        assert_eq!(reopened.origin(), LoadOrigin::Stored);
        assert_eq!(reopened.data().stats.total_points, 10);
        assert!(reopened.data().weekly_tasks.find(id).unwrap().completed);
    }

    #[test]
    fn failed_transition_keeps_last_known_good() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        engine.set_goal(GoalField::Objective, "Ascend", &m).unwrap();
        let before = engine.data().clone();

        let err = engine.transact(&m, |d, _, _| {
            d.objective = "half-written".into();
            Err(DaoError::NoTribulation)
        });
        assert!(err.is_err());
        assert_eq!(engine.data(), &before);
        assert_eq!(open(&store, &m).data().objective, "Ascend");
    }

    #[test]
    fn claim_reward_below_goal_is_rejected() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        assert!(matches!(
            engine.claim_reward(&m),
            Err(DaoError::RewardNotReady { .. })
        ));
        assert!(store.get(engine.key()).unwrap().is_none());
    }

    #[test]
    fn users_are_isolated() {
        let store = MemoryStore::new();
        let m = monday();
        let mei = Session::for_user("mei").unwrap();
        let mut engine = Engine::open(&store, &mei, 100, &m).unwrap();
        engine.set_goal(GoalField::Objective, "Mei's path", &m).unwrap();

        assert_eq!(open(&store, &m).data().objective, "");
        let again = Engine::open(&store, &mei, 100, &m).unwrap();
        assert_eq!(again.data().objective, "Mei's path");
    }

    #[test]
    fn aperture_rolls_over_between_days() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let (id, _) = engine
            .add_task(Day::Monday, "Big scene", Difficulty::Scene, "", Some(150), &m)
            .unwrap();
        let notices = engine.apply_task(TaskAction::Toggle { id }, &m).unwrap();
        assert_eq!(engine.data().stats.total_points, 100);
        assert!(notices.contains(&Notice::CapacityReached {
            awarded: 100,
            requested: 150
        }));

        let (id2, _) = engine
            .add_task(Day::Monday, "Small step", Difficulty::Easy, "", None, &m)
            .unwrap();
        engine.apply_task(TaskAction::Toggle { id: id2 }, &m).unwrap();
        assert_eq!(engine.data().stats.total_points, 100);

        let tuesday = m.plus_days(1);
        engine.apply_task(TaskAction::Toggle { id: id2 }, &tuesday).unwrap();
        engine.apply_task(TaskAction::Toggle { id: id2 }, &tuesday).unwrap();
        assert_eq!(engine.data().stats.current_essence_earned_today, 1);
    }

    #[test]
    fn monday_refresh_generates_tribulation_and_advice() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let oracle = ScriptedOracle::new()
            .answer(OP_TRIBULATION, tribulation_answer())
            .answer(OP_ADVISOR, advisor_answer());

        let notices = engine.refresh(Some(&oracle), &m).unwrap();
        assert!(notices.contains(&Notice::TribulationDescends {
            title: "Trial of Flame".into()
        }));
        assert_eq!(engine.data().advisor.as_ref().unwrap().headline, "Steady Steps");
        // Still Recruit: no rival yet.
        assert_eq!(oracle.called(OP_NEMESIS), 0);

        // A second refresh the same day asks for nothing new.
        engine.refresh(Some(&oracle), &m).unwrap();
        assert_eq!(oracle.called(OP_TRIBULATION), 1);
        assert_eq!(oracle.called(OP_ADVISOR), 1);
    }

    #[test]
    fn refresh_without_oracle_only_expires() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        engine
            .accept_tribulation(
                TribulationDraft {
                    title: "Trial".into(),
                    description: "d".into(),
                    reward: 100,
                    penalty: 40,
                },
                &m,
            )
            .unwrap();
        engine.transact(&m, |d, _, _| {
            d.stats.total_points = 30;
            Ok(())
        })
        .unwrap();

        let notices = engine.refresh(None, &m.plus_days(8)).unwrap();
        assert!(engine.data().tribulation.as_ref().unwrap().failed);
        assert_eq!(engine.data().stats.total_points, 0);
        assert!(notices.contains(&Notice::TribulationFailed {
            penalty: 40,
            automatic: true
        }));
    }

    #[test]
    fn expired_tribulation_is_replaced_in_one_refresh() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let oracle = ScriptedOracle::new()
            .answer(OP_TRIBULATION, tribulation_answer())
            .answer(OP_ADVISOR, advisor_answer());
        engine.refresh(Some(&oracle), &m).unwrap();

        let later = m.plus_days(9);
        engine.refresh(Some(&oracle), &later).unwrap();
        let trib = engine.data().tribulation.as_ref().unwrap();
        assert!(trib.is_pending());
        assert_eq!(trib.generated_date, later.now);
        assert!(engine
            .data()
            .milestones
            .iter()
            .any(|ms| ms.kind == MilestoneKind::TribulationFailed));
    }

    #[test]
    fn oracle_failure_is_a_notice_and_changes_nothing() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let oracle = ScriptedOracle::new();

        let notices = engine.refresh(Some(&oracle), &m).unwrap();
        assert!(engine.data().tribulation.is_none());
        assert!(engine.data().advisor.is_none());
        let failed: Vec<&str> = notices
            .iter()
            .filter_map(|n| match n {
                Notice::CollaboratorFailed { operation, .. } => Some(operation.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec![OP_TRIBULATION, OP_ADVISOR]);
    }

    #[test]
    fn first_rival_after_promotion_then_weekly_progress() {
        let store = MemoryStore::new();
        let m = monday().plus_days(1);
        let mut engine = open(&store, &m);
        engine.transact(&m, |d, m, n| {
            d.stats.total_points = 120;
            crate::rank::check_rank(d, m, n);
            d.advisor = None;
            Ok(())
        })
        .unwrap();

        let oracle = ScriptedOracle::new()
            .answer(OP_NEMESIS, rival_answer(110))
            .answer(OP_UPDATE_NEMESIS, rival_answer(125))
            .answer(OP_ADVISOR, advisor_answer());
        let notices = engine.refresh(Some(&oracle), &m).unwrap();
        assert!(notices.contains(&Notice::RivalEmerges {
            name: "Lin Feng".into()
        }));
        assert_eq!(engine.data().nemesis[0].points, 110);
        assert_eq!(oracle.called(OP_UPDATE_NEMESIS), 0);

        engine.refresh(Some(&oracle), &m.plus_days(8)).unwrap();
        assert_eq!(engine.data().nemesis.len(), 1);
        assert_eq!(engine.data().nemesis[0].points, 125);
        assert_eq!(oracle.called(OP_NEMESIS), 1);
    }

    #[test]
    fn journal_keeps_entry_when_analysis_fails() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let oracle = ScriptedOracle::new();
        let (id, notices) = engine
            .write_journal("Struggled today.", Some(&oracle), &m)
            .unwrap();
        let entry = &engine.data().journal_entries[0];
        assert_eq!(entry.id, id);
        assert!(entry.analysis.is_none());
        assert!(notices
            .iter()
            .any(|n| matches!(n, Notice::CollaboratorFailed { .. })));
        assert!(engine.data().stats.has_achievement("first_journal"));
    }

    #[test]
    fn schemes_get_distinct_ids() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        let drafts = vec![
            SchemeDraft {
                text: "a".into(),
                benefits: String::new(),
                difficulty: Difficulty::Easy,
                actual_points: None,
            },
            SchemeDraft {
                text: "b".into(),
                benefits: String::new(),
                difficulty: Difficulty::Medium,
                actual_points: Some(7),
            },
        ];
        let (ids, _) = engine.add_schemes(Day::Thursday, drafts, &m).unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(engine.data().weekly_tasks.thursday[1].actual_points, 7);
        assert_eq!(engine.data().stats.tasks_started, 2);
    }

    #[test]
    fn export_import_reset() {
        let store = MemoryStore::new();
        let m = monday();
        let mut engine = open(&store, &m);
        engine.set_goal(GoalField::Motivation, "Family", &m).unwrap();
        let exported = engine.export().unwrap();

        assert!(engine.reset(&m).unwrap());
        assert_eq!(engine.data().motivation, "");
        assert!(store.get(engine.key()).unwrap().is_none());

        assert!(engine.import("{broken", &m).is_err());
        assert_eq!(engine.data().motivation, "");

        engine.import(&exported, &m).unwrap();
        assert_eq!(engine.data().motivation, "Family");
        assert_eq!(open(&store, &m).data().motivation, "Family");
    }
}
