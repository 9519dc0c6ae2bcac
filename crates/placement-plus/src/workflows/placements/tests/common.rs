use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::placements::domain::{
    Branch, BranchStatistics, CandidateProfile, JobPosting, OpportunityType, PlacementRecord,
    PlacementSubmission, RecordedOffer, StudentId,
};
use crate::workflows::placements::repository::{
    PlacementCommit, PlacementRepository, RepositoryError,
};
use crate::workflows::placements::PlacementRecordingService;

pub(super) fn candidate(id: &str) -> CandidateProfile {
    CandidateProfile {
        student_id: StudentId(id.to_string()),
        name: "Asha Verma".to_string(),
        cgpa: 8.2,
        branch: Branch::ComputerScience,
        batch: 2026,
        internship_eligible: true,
        full_time_eligible: true,
        slab: None,
        version: 0,
    }
}

pub(super) fn full_time_posting(ctc_lpa: f64) -> JobPosting {
    JobPosting {
        company: "Nimbus Systems".to_string(),
        opportunity: OpportunityType::FullTime,
        ctc_lpa: Some(ctc_lpa),
        monthly_stipend: None,
        cgpa_criteria: 7.0,
        eligible_branches: BTreeSet::from([Branch::ComputerScience, Branch::InformationTechnology]),
        eligible_batches: BTreeSet::from([2026]),
    }
}

pub(super) fn internship_posting() -> JobPosting {
    JobPosting {
        company: "Nimbus Systems".to_string(),
        opportunity: OpportunityType::Internship,
        ctc_lpa: None,
        monthly_stipend: Some(40_000.0),
        cgpa_criteria: 7.0,
        eligible_branches: BTreeSet::from([Branch::ComputerScience]),
        eligible_batches: BTreeSet::from([2026]),
    }
}

pub(super) fn full_time_submission(id: &str, ctc_lpa: f64, month: &str) -> PlacementSubmission {
    PlacementSubmission {
        student_id: StudentId(id.to_string()),
        company: "Nimbus Systems".to_string(),
        offer: RecordedOffer::FullTime { ctc_lpa },
        month: month.to_string(),
        recorded_on: NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"),
    }
}

pub(super) fn internship_submission(id: &str) -> PlacementSubmission {
    PlacementSubmission {
        student_id: StudentId(id.to_string()),
        company: "Nimbus Systems".to_string(),
        offer: RecordedOffer::Internship {
            monthly_stipend: 40_000.0,
        },
        month: "05".to_string(),
        recorded_on: NaiveDate::from_ymd_opt(2026, 5, 2).expect("valid date"),
    }
}

#[derive(Default)]
struct MemoryStore {
    candidates: HashMap<StudentId, CandidateProfile>,
    statistics: HashMap<Branch, BranchStatistics>,
    records: Vec<PlacementRecord>,
}

/// In-memory repository with the version-checked atomic commit the service
/// relies on. A single mutex covers all three tables so a commit is observed
/// in full or not at all.
#[derive(Default)]
pub(super) struct MemoryRepository {
    store: Mutex<MemoryStore>,
}

impl MemoryRepository {
    pub(super) fn recorded_placements(&self) -> Vec<PlacementRecord> {
        self.store.lock().expect("store mutex poisoned").records.clone()
    }

    pub(super) fn stored_statistics(&self, branch: Branch) -> Option<BranchStatistics> {
        self.store
            .lock()
            .expect("store mutex poisoned")
            .statistics
            .get(&branch)
            .cloned()
    }
}

impl PlacementRepository for MemoryRepository {
    fn register_candidate(&self, profile: CandidateProfile) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
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
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.candidates.get(id).cloned())
    }

    fn branch_statistics(
        &self,
        branch: Branch,
    ) -> Result<Option<BranchStatistics>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.statistics.get(&branch).cloned())
    }

    fn statistics_snapshot(&self) -> Result<Vec<BranchStatistics>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        let mut snapshot: Vec<BranchStatistics> = store.statistics.values().cloned().collect();
        snapshot.sort_by_key(|stats| stats.branch);
        Ok(snapshot)
    }

    fn commit(&self, commit: PlacementCommit) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");

        let stored_candidate = store
            .candidates
            .get(&commit.candidate.student_id)
            .ok_or(RepositoryError::NotFound)?;
        if stored_candidate.version != commit.candidate.version {
            return Err(RepositoryError::Conflict);
        }

        if let Some(statistics) = &commit.statistics {
            let stored_version = store
                .statistics
                .get(&statistics.branch)
                .map(|stats| stats.version);
            if stored_version.unwrap_or(0) != statistics.version {
                return Err(RepositoryError::Conflict);
            }
        }

        let mut candidate = commit.candidate;
        candidate.version += 1;
        store.candidates.insert(candidate.student_id.clone(), candidate);

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

/// Repository that loses every version race, for conflict-path tests.
pub(super) struct ConflictRepository;

impl PlacementRepository for ConflictRepository {
    fn register_candidate(&self, _profile: CandidateProfile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Duplicate)
    }

    fn candidate(&self, id: &StudentId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Ok(Some(candidate(&id.0)))
    }

    fn branch_statistics(
        &self,
        _branch: Branch,
    ) -> Result<Option<BranchStatistics>, RepositoryError> {
        Ok(None)
    }

    fn statistics_snapshot(&self) -> Result<Vec<BranchStatistics>, RepositoryError> {
        Ok(Vec::new())
    }

    fn commit(&self, _commit: PlacementCommit) -> Result<(), RepositoryError> {
        Err(RepositoryError::Conflict)
    }
}

pub(super) struct UnavailableRepository;

impl PlacementRepository for UnavailableRepository {
    fn register_candidate(&self, _profile: CandidateProfile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn candidate(&self, _id: &StudentId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn branch_statistics(
        &self,
        _branch: Branch,
    ) -> Result<Option<BranchStatistics>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn statistics_snapshot(&self) -> Result<Vec<BranchStatistics>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn commit(&self, _commit: PlacementCommit) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<PlacementRecordingService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(PlacementRecordingService::new(repository.clone()));
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
