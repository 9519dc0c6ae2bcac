use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use placement_plus::workflows::placements::{
    Branch, BranchStatistics, CandidateProfile, PlacementCommit, PlacementRecord,
    PlacementRepository, RepositoryError, StudentId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct PlacementStore {
    candidates: HashMap<StudentId, CandidateProfile>,
    statistics: HashMap<Branch, BranchStatistics>,
    records: Vec<PlacementRecord>,
}

/// In-memory repository backing the service in demos and local runs.
///
/// One mutex covers candidates, statistics, and records so a
/// [`PlacementCommit`] lands atomically; version checks on the carried
/// entities keep the optimistic-concurrency contract that a database-backed
/// implementation would enforce with row versions.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPlacementRepository {
    store: Arc<Mutex<PlacementStore>>,
}

impl PlacementRepository for InMemoryPlacementRepository {
    fn register_candidate(&self, profile: CandidateProfile) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");
        if store.candidates.contains_key(&profile.student_id) {
            return Err(RepositoryError::Duplicate);
        }
        let branch = profile.branch;
        store.candidates.insert(profile.student_id.clone(), profile);
        if let Some(stats) = store.statistics.get_mut(&branch) {
            stats.total_students += 1;
        }
        Ok(())
    }

    fn candidate(&self, id: &StudentId) -> Result<Option<CandidateProfile>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.candidates.get(id).cloned())
    }

    fn branch_statistics(
        &self,
        branch: Branch,
    ) -> Result<Option<BranchStatistics>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        Ok(store.statistics.get(&branch).cloned())
    }

    fn statistics_snapshot(&self) -> Result<Vec<BranchStatistics>, RepositoryError> {
        let store = self.store.lock().expect("repository mutex poisoned");
        let mut snapshot: Vec<BranchStatistics> = store.statistics.values().cloned().collect();
        snapshot.sort_by_key(|stats| stats.branch);
        Ok(snapshot)
    }

    fn commit(&self, commit: PlacementCommit) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("repository mutex poisoned");

        let stored = store
            .candidates
            .get(&commit.candidate.student_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored.version != commit.candidate.version {
            return Err(RepositoryError::Conflict);
        }

        if let Some(statistics) = &commit.statistics {
            let stored_version = store
                .statistics
                .get(&statistics.branch)
                .map(|stats| stats.version)
                .unwrap_or(0);
            if stored_version != statistics.version {
                return Err(RepositoryError::Conflict);
            }
        }

        let mut candidate = commit.candidate;
        candidate.version += 1;
        store
            .candidates
            .insert(candidate.student_id.clone(), candidate);

        if let Some(mut statistics) = commit.statistics {
            statistics.version += 1;
            // Enrollment is owned by registration, not the aggregator; refresh
            // it from the candidate table at commit time.
            statistics.total_students = store
                .candidates
                .values()
                .filter(|candidate| candidate.branch == statistics.branch)
                .count() as u32;
            store.statistics.insert(statistics.branch, statistics);
        }

        store.records.push(commit.record);
        Ok(())
    }
}

/// Seed profiles used by the demo and stats commands.
pub(crate) fn seed_candidates() -> Vec<CandidateProfile> {
    let profile = |id: &str, name: &str, cgpa: f64, branch: Branch| CandidateProfile {
        student_id: StudentId(id.to_string()),
        name: name.to_string(),
        cgpa,
        branch,
        batch: 2026,
        internship_eligible: true,
        full_time_eligible: true,
        slab: None,
        version: 0,
    };

    vec![
        profile("2026-cse-014", "Asha Verma", 8.9, Branch::ComputerScience),
        profile("2026-cse-027", "Rahul Nair", 8.1, Branch::ComputerScience),
        profile("2026-cse-033", "Meera Joshi", 9.2, Branch::ComputerScience),
        profile("2026-ece-118", "Vikram Rao", 7.8, Branch::Electronics),
        profile("2026-me-251", "Sana Iqbal", 8.4, Branch::Mechanical),
    ]
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{value}': {err}"))
}
