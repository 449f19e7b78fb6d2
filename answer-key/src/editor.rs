//! Answer/score entry editor.
//!
//! DESIGN
//! ======
//! `answers` and `scores` are parallel to `items` and rebuilt whenever the
//! subject or layout changes. Both tabs edit the same arrays; the tab only
//! decides which array an input control writes to.
//!
//! Initialization runs once per open: `Uninitialized → Initializing → Ready`.
//! The source is, in order, the caller's snapshot, the answer key already
//! stored on the backend, or a blank sheet. `close` returns the editor to
//! `Uninitialized` so the next open starts over.
//!
//! Busy flags and the `Initializing` phase are held by drop guards across each
//! awaited call, so they are released even when the host drops the future
//! mid-request. Every backend flow leaves a user-facing status line prefixed
//! with ✅ or ❌.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use std::collections::{BTreeMap, HashMap};

use canvas::doc::Layout;
use serde::{Deserialize, Serialize};

use crate::api::AnswerKeyBackend;
use crate::cache::ElectiveCaches;
use crate::csv;
use crate::entry;
use crate::error::EditorError;
use crate::gate::{GateDecision, OverwriteConfirm, overwrite_gate};
use crate::items::{CustomCounts, QuestionItem, QuestionKind, SubjectPreset, build_question_items};
use crate::payload::{self, ActiveElective, AnswerKeyPayload, ExamMetadata, StoredQuestion};
use crate::sections::{Section, Segment, indices_in, plan_sections};
use crate::subject::{ElectiveConfig, ElectiveFamily, SubjectFamily};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPhase {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    #[default]
    Answers,
    Scores,
}

/// Where `open` took the initial slot values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSource {
    Snapshot,
    Backend { questions: usize },
    Blank,
    /// The editor was already initialized; nothing changed.
    AlreadyReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { questions: usize, storage: Option<String> },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(u64),
    NothingToDelete,
    Cancelled,
}

/// Slot values handed back to the caller and passed to the next `open`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSnapshot {
    pub answers: Vec<String>,
    pub scores: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elective: Option<String>,
}

impl AnswerSnapshot {
    /// True when no answer or score has any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.iter().chain(&self.scores).all(|v| v.trim().is_empty())
    }
}

pub struct AnswerEditor {
    metadata: ExamMetadata,
    family: SubjectFamily,
    custom: CustomCounts,
    items: Vec<QuestionItem>,
    answers: Vec<String>,
    scores: Vec<String>,
    tab: EditorTab,
    electives: BTreeMap<ElectiveFamily, String>,
    caches: ElectiveCaches,
    phase: InitPhase,
    saving: bool,
    loading_from_db: bool,
    status: Option<String>,
}

impl AnswerEditor {
    /// Editor for one exam subject. The subject preset wins over `layout`.
    #[must_use]
    pub fn new(metadata: ExamMetadata, custom: CustomCounts, layout: Option<&Layout>) -> Self {
        let mut editor = Self {
            metadata,
            family: SubjectFamily::Default,
            custom,
            items: Vec::new(),
            answers: Vec::new(),
            scores: Vec::new(),
            tab: EditorTab::Answers,
            electives: BTreeMap::new(),
            caches: ElectiveCaches::default(),
            phase: InitPhase::Uninitialized,
            saving: false,
            loading_from_db: false,
            status: None,
        };
        editor.rebuild(layout);
        editor
    }

    /// Switch to another subject or layout. Slots, caches and elective choices are discarded.
    pub fn reconfigure(&mut self, metadata: ExamMetadata, custom: CustomCounts, layout: Option<&Layout>) {
        self.metadata = metadata;
        self.custom = custom;
        self.rebuild(layout);
    }

    fn rebuild(&mut self, layout: Option<&Layout>) {
        self.family = SubjectFamily::from_subject_name(&self.metadata.subject_name);
        let preset = SubjectPreset::for_family(self.family, self.custom);
        self.items = build_question_items(preset, layout);
        self.reset_slots();
        tracing::debug!(family = ?self.family, items = self.items.len(), "question items rebuilt");
    }

    fn reset_slots(&mut self) {
        self.answers = vec![String::new(); self.items.len()];
        self.scores = vec![String::new(); self.items.len()];
        self.electives.clear();
        self.caches.clear();
    }

    // --- Lifecycle ---

    /// Initialize slot values once per open.
    ///
    /// # Errors
    ///
    /// [`EditorError::FetchInFlight`] while an initialization is still marked in progress.
/// Dropping an unfinished `open` rolls the phase back to `Uninitialized`.
    /// Backend failures are not errors here: they leave a status message and a blank sheet.
    pub async fn open(
        &mut self,
        backend: &dyn AnswerKeyBackend,
        initial: Option<&AnswerSnapshot>,
    ) -> Result<InitSource, EditorError> {
        match self.phase {
            InitPhase::Ready => return Ok(InitSource::AlreadyReady),
            InitPhase::Initializing => return Err(EditorError::FetchInFlight),
            InitPhase::Uninitialized => {}
        }
        tracing::debug!("answer editor initializing");

        let source = if let Some(snapshot) = initial.filter(|s| !s.is_empty()) {
            self.apply_snapshot(snapshot);
            InitSource::Snapshot
        } else if self.metadata.subject_code().is_some() {
            let fetched = {
                let _init = InitLatch::begin(&mut self.phase);
                let _loading = BusyFlag::raise(&mut self.loading_from_db);
                backend.fetch_answer_key(&self.metadata).await
            };
            match fetched {
                Ok(questions) if !questions.is_empty() => {
                    let applied = self.apply_stored(&questions);
                    InitSource::Backend { questions: applied }
                }
                Ok(_) => {
                    self.reset_slots();
                    InitSource::Blank
                }
                Err(e) => {
                    tracing::warn!(error = %e, "loading saved answer key failed");
                    self.status = Some(format!("❌ Could not load the saved answer key: {e}"));
                    self.reset_slots();
                    InitSource::Blank
                }
            }
        } else {
            self.reset_slots();
            InitSource::Blank
        };

        self.phase = InitPhase::Ready;
        tracing::debug!(?source, "answer editor ready");
        Ok(source)
    }

    /// Reset the one-shot initialization latch.
    pub fn close(&mut self) {
        self.phase = InitPhase::Uninitialized;
        self.saving = false;
        self.loading_from_db = false;
        self.status = None;
    }

    fn apply_snapshot(&mut self, snapshot: &AnswerSnapshot) {
        self.reset_slots();
        let n = self.items.len();
        for (slot, value) in self.answers.iter_mut().zip(&snapshot.answers).take(n) {
            slot.clone_from(value);
        }
        for (slot, value) in self.scores.iter_mut().zip(&snapshot.scores).take(n) {
            slot.clone_from(value);
        }
        if let (Some(config), Some(name)) = (self.elective_config(), snapshot.elective.as_deref()) {
            if config.option(name).is_some() {
                self.electives.insert(config.family, name.to_owned());
            }
        }
    }

    /// Fill slots from a stored answer key. Returns how many questions matched a slot.
    fn apply_stored(&mut self, questions: &[StoredQuestion]) -> usize {
        self.reset_slots();
        let by_number: HashMap<u32, usize> =
            self.items.iter().enumerate().filter_map(|(i, item)| item.number().map(|n| (n, i))).collect();

        let mut applied = 0;
        for question in questions {
            let Some(&i) = by_number.get(&question.number) else {
                continue;
            };
            self.answers[i] = question.answer_text();
            self.scores[i] = question.score_text();
            applied += 1;
        }

        // First tagged question inside the elective range; unknown names are ignored.
        if let Some(config) = self.elective_config() {
            let inferred = questions
                .iter()
                .filter(|q| config.contains(q.number))
                .find_map(StoredQuestion::elective_subject)
                .filter(|name| config.option(name).is_some());
            if let Some(name) = inferred {
                tracing::debug!(elective = name, "elective inferred from saved answer key");
                self.electives.insert(config.family, name.to_owned());
            }
        }
        applied
    }

    /// Current slot values for the caller to keep.
    #[must_use]
    pub fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot {
            answers: self.answers.clone(),
            scores: self.scores.clone(),
            elective: self.selected_elective().map(str::to_owned),
        }
    }

    // --- Editing ---

    pub fn set_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
    }

    /// Apply typed input to a control; the active tab picks answers or scores.
    pub fn edit(&mut self, segment: Segment, input: &str) {
        match (self.tab, segment) {
            (EditorTab::Answers, Segment::Group { start, len }) => self.set_group_answer(start, len, input),
            (EditorTab::Answers, Segment::Single { index }) => self.set_answer(index, input),
            (EditorTab::Scores, Segment::Group { start, len }) => self.set_group_score(start, len, input),
            (EditorTab::Scores, Segment::Single { index }) => self.set_score(index, input),
        }
    }

    /// Text the control shows on the active tab.
    #[must_use]
    pub fn segment_text(&self, segment: Segment) -> String {
        let values = match self.tab {
            EditorTab::Answers => &self.answers,
            EditorTab::Scores => &self.scores,
        };
        let range = segment.indices();
        let end = range.end.min(values.len());
        let start = range.start.min(end);
        entry::join_group(&values[start..end])
    }

    pub fn set_group_answer(&mut self, start: usize, len: usize, input: &str) {
        let values = entry::split_group_answer(input, len);
        write_slots(&mut self.answers, start, values);
    }

    pub fn set_group_score(&mut self, start: usize, len: usize, input: &str) {
        let values = entry::split_group_score(input, len);
        write_slots(&mut self.scores, start, values);
    }

    /// Single answer slot: free text is capped at the item's length, grid answers are upper-cased.
    pub fn set_answer(&mut self, index: usize, input: &str) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let value = normalize_answer(item, input);
        self.answers[index] = value;
    }

    pub fn set_score(&mut self, index: usize, input: &str) {
        if let Some(slot) = self.scores.get_mut(index) {
            *slot = entry::normalize_single_score(input);
        }
    }

    // --- Electives ---

    fn elective_config(&self) -> Option<&'static ElectiveConfig> {
        self.family.elective().map(ElectiveFamily::config)
    }

    #[must_use]
    pub fn selected_elective(&self) -> Option<&str> {
        let config = self.elective_config()?;
        self.electives.get(&config.family).map(String::as_str)
    }

    /// Switch the elective subject, swapping only the elective range through the cache.
    ///
    /// # Errors
    ///
    /// [`EditorError::UnknownElective`] when the subject has no elective selector
    /// or `subject` is not one of its options.
    pub fn select_elective(&mut self, subject: &str) -> Result<(), EditorError> {
        let Some(config) = self.elective_config().filter(|c| c.option(subject).is_some()) else {
            return Err(EditorError::UnknownElective(subject.to_owned()));
        };
        let outgoing = self.electives.get(&config.family).cloned();
        if outgoing.as_deref() == Some(subject) {
            return Ok(());
        }
        let indices = indices_in(&self.items, &config.range);
        self.caches.swap(config.family, outgoing.as_deref(), subject, &mut self.answers, &mut self.scores, &indices);
        self.electives.insert(config.family, subject.to_owned());
        tracing::debug!(from = ?outgoing, to = subject, slots = indices.len(), "elective switched");
        Ok(())
    }

    // --- CSV ---

    /// Apply a `q,answer,score` CSV onto matching slots. Returns the number of slots updated.
    ///
    /// # Errors
    ///
    /// [`EditorError::Csv`] when the file is malformed; nothing is applied.
    pub fn import_csv(&mut self, text: &str) -> Result<usize, EditorError> {
        let rows = match csv::parse_answer_csv(text) {
            Ok(rows) => rows,
            Err(e) => return Err(self.fail(e.into())),
        };
        let mut applied = 0;
        for (i, item) in self.items.iter().enumerate() {
            let Some(row) = rows.get(&item.qid) else {
                continue;
            };
            if let Some(answer) = &row.answer {
                self.answers[i] = normalize_answer(item, answer);
            }
            if let Some(score) = &row.score {
                self.scores[i] = entry::normalize_single_score(score);
            }
            applied += 1;
        }
        tracing::info!(applied, rows = rows.len(), "answer CSV imported");
        self.status = Some(format!("✅ Imported {applied} answers from CSV"));
        Ok(applied)
    }

    #[must_use]
    pub fn export_csv(&self) -> String {
        csv::write_answer_csv(&self.items, &self.answers, &self.scores)
    }

    // --- Save / delete ---

    /// Payload for the current slots, tagged with the active elective.
    ///
    /// # Errors
    ///
    /// See [`payload::build_payload`].
    pub fn build_payload(&self) -> Result<AnswerKeyPayload, EditorError> {
        let elective = self.elective_config().and_then(|config| {
            self.electives.get(&config.family).map(|subject| ActiveElective { config, subject })
        });
        payload::build_payload(&self.metadata, &self.items, &self.answers, &self.scores, elective)
    }

    /// Validate, pass the overwrite gate, and store the answer key.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any request. Backend errors are
    /// returned after the `saving` flag has been cleared.
    pub async fn save(
        &mut self,
        backend: &dyn AnswerKeyBackend,
        confirm: &dyn OverwriteConfirm,
    ) -> Result<SaveOutcome, EditorError> {
        if self.saving {
            return Err(EditorError::SaveInFlight);
        }
        if self.loading_from_db {
            return Err(EditorError::FetchInFlight);
        }
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e)),
        };

        let result = {
            let _saving = BusyFlag::raise(&mut self.saving);
            submit(backend, confirm, &payload).await
        };

        match result {
            Ok(SaveOutcome::Saved { questions, storage }) => {
                tracing::info!(
                    subject = payload.metadata.subject_code().unwrap_or_default(),
                    questions,
                    storage = storage.as_deref().unwrap_or("unknown"),
                    "answer key saved"
                );
                self.status = Some(format!("✅ Saved {questions} answers"));
                Ok(SaveOutcome::Saved { questions, storage })
            }
            Ok(SaveOutcome::Cancelled) => Ok(SaveOutcome::Cancelled),
            Err(e) => {
                tracing::warn!(error = %e, "saving answer key failed");
                Err(self.fail(e))
            }
        }
    }

    /// Delete the stored answer key after the overwrite gate.
    ///
    /// # Errors
    ///
    /// [`EditorError::MissingSubject`] without a subject code, otherwise backend errors.
    pub async fn delete_saved(
        &mut self,
        backend: &dyn AnswerKeyBackend,
        confirm: &dyn OverwriteConfirm,
    ) -> Result<DeleteOutcome, EditorError> {
        if self.saving {
            return Err(EditorError::SaveInFlight);
        }
        if self.metadata.subject_code().is_none() {
            return Err(self.fail(EditorError::MissingSubject));
        }

        let result = {
            let _saving = BusyFlag::raise(&mut self.saving);
            remove(backend, confirm, &self.metadata).await
        };

        match result {
            Ok(DeleteOutcome::Deleted(count)) => {
                tracing::info!(deleted = count, "answer key deleted");
                self.status = Some(format!("✅ Deleted {count} saved answers"));
                Ok(DeleteOutcome::Deleted(count))
            }
            Ok(other) => Ok(other),
            Err(e) => {
                tracing::warn!(error = %e, "deleting answer key failed");
                Err(self.fail(e))
            }
        }
    }

    fn fail(&mut self, err: EditorError) -> EditorError {
        self.status = Some(format!("❌ {err}"));
        err
    }

    // --- Queries ---

    #[must_use]
    pub fn metadata(&self) -> &ExamMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn family(&self) -> SubjectFamily {
        self.family
    }

    #[must_use]
    pub fn items(&self) -> &[QuestionItem] {
        &self.items
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn scores(&self) -> &[String] {
        &self.scores
    }

    #[must_use]
    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    /// Input controls grouped per subject.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        plan_sections(self.family, &self.items, self.custom)
    }

    #[must_use]
    pub fn phase(&self) -> InitPhase {
        self.phase
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn is_loading_from_db(&self) -> bool {
        self.loading_from_db
    }

    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

// =============================================================================
// GUARDS
// =============================================================================

/// Holds a busy flag raised until dropped.
struct BusyFlag<'a>(&'a mut bool);

impl<'a> BusyFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for BusyFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Marks initialization in progress; an unfinished one falls back to `Uninitialized` on drop.
///
/// `open` sets `Ready` itself once the slots are filled, with no await in between.
struct InitLatch<'a>(&'a mut InitPhase);

impl<'a> InitLatch<'a> {
    fn begin(phase: &'a mut InitPhase) -> Self {
        *phase = InitPhase::Initializing;
        Self(phase)
    }
}

impl Drop for InitLatch<'_> {
    fn drop(&mut self) {
        if *self.0 == InitPhase::Initializing {
            *self.0 = InitPhase::Uninitialized;
        }
    }
}

async fn submit(
    backend: &dyn AnswerKeyBackend,
    confirm: &dyn OverwriteConfirm,
    payload: &AnswerKeyPayload,
) -> Result<SaveOutcome, EditorError> {
    let decision = overwrite_gate(backend, confirm, &payload.metadata).await?;
    if !decision.proceeds() {
        return Ok(SaveOutcome::Cancelled);
    }
    let response = backend.save_answer_key(payload).await?;
    Ok(SaveOutcome::Saved { questions: payload.questions.len(), storage: response.storage })
}

async fn remove(
    backend: &dyn AnswerKeyBackend,
    confirm: &dyn OverwriteConfirm,
    metadata: &ExamMetadata,
) -> Result<DeleteOutcome, EditorError> {
    match overwrite_gate(backend, confirm, metadata).await? {
        GateDecision::Proceed { existing: 0 } => Ok(DeleteOutcome::NothingToDelete),
        GateDecision::Cancelled { .. } => Ok(DeleteOutcome::Cancelled),
        GateDecision::Proceed { .. } => Ok(DeleteOutcome::Deleted(backend.delete_answer_key(metadata).await?)),
    }
}

fn normalize_answer(item: &QuestionItem, input: &str) -> String {
    match item.kind {
        QuestionKind::Grid => entry::normalize_grid_answer(input),
        QuestionKind::Digits => entry::normalize_digits_answer(input, item.max_length),
    }
}

fn write_slots(slots: &mut [String], start: usize, values: Vec<String>) {
    for (slot, value) in slots.iter_mut().skip(start).zip(values) {
        *slot = value;
    }
}
