use chrono::{TimeZone, Utc};
use rota_core::db::{open_db, open_db_in_memory};
use rota_core::{
    BiweeklyRecord, CallOutReason, CallOutRequest, CategoryKey, FixedClock, LedgerPolicy, Person,
    PersonId, RepoError, RepoResult, RotaConfig, RotationRepository, RotationService,
    RotationState, ServiceError, ShiftStatus, SqliteRotationRepository,
};
use std::sync::Arc;

fn key(value: &str) -> CategoryKey {
    CategoryKey::parse(value).unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 7, 13, 8, 0, 0).unwrap(),
    ))
}

#[test]
fn open_seeds_from_config_and_persists_state() {
    let mut conn = open_db_in_memory().unwrap();
    let config = RotaConfig::seed();

    let service =
        RotationService::open(SqliteRotationRepository::new(&mut conn), &config, clock()).unwrap();
    assert_eq!(service.session().roster().total_people(), 40);
    assert!(service.session().history().is_empty());

    let repo = service.into_repository();
    let saved = repo.load_state().unwrap().unwrap();
    assert_eq!(saved.roster, config.build_roster().unwrap());
    assert!(saved.ledger.is_empty());
}

#[test]
fn state_and_history_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rota.db");
    let config = RotaConfig::seed();

    {
        let mut conn = open_db(&path).unwrap();
        let mut service =
            RotationService::open(SqliteRotationRepository::new(&mut conn), &config, clock())
                .unwrap();
        service
            .move_status(&key("fullTimeStaff"), 0, ShiftStatus::PickedUp)
            .unwrap();
        service.archive_period().unwrap();
        service
            .move_status(&key("partTimeStaff"), 1, ShiftStatus::Called)
            .unwrap();
        service
            .record_call_out(CallOutRequest {
                person_id: PersonId::new("ft3"),
                shift: "PM".to_string(),
                notes: String::new(),
                category: key("fullTimeStaff"),
                reason: CallOutReason::MedicalAppointment,
            })
            .unwrap();
        service.rename_category(&key("category4"), "Casuals").unwrap();
    }

    let mut conn = open_db(&path).unwrap();
    let service =
        RotationService::open(SqliteRotationRepository::new(&mut conn), &config, clock()).unwrap();
    let session = service.session();

    assert_eq!(session.history().len(), 1);
    let archived = session.history().latest().unwrap();
    assert_eq!(archived.picked_up_shifts[0].person_id.as_str(), "ft1");

    let pt2 = session.roster().find_person(&PersonId::new("pt2")).unwrap().1;
    assert_eq!(pt2.shift_status, Some(ShiftStatus::Called));
    assert_eq!(session.ledger().len(), 1);
    assert_eq!(session.roster().title(&key("category4")), Some("Casuals"));
}

#[test]
fn history_lists_newest_first_from_storage() {
    let mut conn = open_db_in_memory().unwrap();
    let config = RotaConfig::seed();
    let shared_clock = clock();
    let mut service =
        RotationService::open(SqliteRotationRepository::new(&mut conn), &config, shared_clock.clone())
            .unwrap();

    let first = service.archive_period().unwrap();
    shared_clock.advance(chrono::Duration::days(14));
    let second = service.archive_period().unwrap();

    let records = service.into_repository().list_records().unwrap();
    assert_eq!(records, vec![second, first]);
}

#[test]
fn domain_errors_leave_state_unchanged() {
    let mut conn = open_db_in_memory().unwrap();
    let config = RotaConfig::seed();
    let mut service =
        RotationService::open(SqliteRotationRepository::new(&mut conn), &config, clock()).unwrap();
    let before = service.session().state().clone();

    let err = service
        .move_status(&key("category1"), 99, ShiftStatus::Called)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Roster(_)));

    let err = service
        .assign_coverage(0, PersonId::new("ft1"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Ledger(_)));

    assert_eq!(service.session().state(), &before);
}

/// Repository that refuses every write.
struct ReadOnlyRepository;

impl RotationRepository for ReadOnlyRepository {
    fn load_state(&self) -> RepoResult<Option<RotationState>> {
        Ok(Some(RotationState {
            roster: RotaConfig::seed().build_roster().unwrap(),
            ledger: Default::default(),
        }))
    }

    fn save_state(&mut self, _state: &RotationState) -> RepoResult<()> {
        Err(RepoError::InvalidData("storage is read-only".to_string()))
    }

    fn archive_period(&mut self, _record: &BiweeklyRecord, _state: &RotationState) -> RepoResult<()> {
        Err(RepoError::InvalidData("storage is read-only".to_string()))
    }

    fn list_records(&self) -> RepoResult<Vec<BiweeklyRecord>> {
        Ok(Vec::new())
    }
}

#[test]
fn persistence_failures_surface_and_keep_committed_state() {
    let config = RotaConfig {
        ledger_policy: LedgerPolicy::Strict,
        ..RotaConfig::seed()
    };
    let mut service = RotationService::open(ReadOnlyRepository, &config, clock()).unwrap();
    let before = service.session().state().clone();

    let err = service
        .move_status(&key("category2"), 0, ShiftStatus::PickedUp)
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::InvalidData(_))));

    let err = service
        .add_person(&key("category2"), Person::generate("New", "Hire", ""))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));

    let err = service.archive_period().unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));

    assert_eq!(service.session().state(), &before);
    assert!(service.session().history().is_empty());
}

#[test]
fn corrupt_state_payload_is_rejected_on_load() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO rotation_state (id, payload) VALUES (1, ?1);",
        [r#"{"roster":{"categories":[{"key":"c1","people":[
            {"id":"x","first_name":"A","last_name":"B","shift_status":"called"}
        ]}],"titles":{"c1":"One"}},"ledger":[]}"#],
    )
    .unwrap();

    let repo = SqliteRotationRepository::new(&mut conn);
    let err = repo.load_state().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains("moved_on"));
}
