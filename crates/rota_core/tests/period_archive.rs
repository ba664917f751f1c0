use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rota_core::{
    CallOutReason, CallOutRequest, CategoryKey, Clock, FixedClock, LedgerPolicy, Person, PersonId,
    PersonPatch, RotaConfig, Roster, RotationSession, ShiftLog, ShiftStatus,
};
use std::sync::Arc;

fn key(value: &str) -> CategoryKey {
    CategoryKey::parse(value).unwrap()
}

fn two_person_session() -> (RotationSession, Arc<FixedClock>) {
    let mut roster = Roster::new();
    roster
        .insert_category(
            key("c1"),
            "One",
            vec![
                Person::new(PersonId::new("A"), "Alice", "Johnson", "").unwrap(),
                Person::new(PersonId::new("B"), "Bob", "Smith", "").unwrap(),
            ],
        )
        .unwrap();
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 15, 0).unwrap(),
    ));
    (
        RotationSession::new(roster, LedgerPolicy::Strict, clock.clone()),
        clock,
    )
}

#[test]
fn move_then_archive_matches_worked_example() {
    let (mut session, clock) = two_person_session();

    session
        .move_status(&key("c1"), 0, ShiftStatus::PickedUp)
        .unwrap();
    let people = &session.roster().category(&key("c1")).unwrap().people;
    assert_eq!(people[0].id.as_str(), "B");
    assert_eq!(people[1].id.as_str(), "A");
    assert_eq!(people[1].shift_count, 1);
    let moved_on = people[1].moved_on.unwrap();

    let record = session.archive_period().clone();

    assert_eq!(session.history().len(), 1);
    assert_eq!(
        record.picked_up_shifts,
        vec![ShiftLog {
            date: moved_on,
            person_id: PersonId::new("A"),
            category: key("c1"),
        }]
    );
    assert!(record.called_shifts.is_empty());
    assert_eq!(record.start_date, clock.today());
    assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2026, 5, 18).unwrap());

    let live_a = session
        .roster()
        .find_person(&PersonId::new("A"))
        .unwrap()
        .1;
    assert_eq!(live_a.shift_count, 0);
    assert_eq!(live_a.shift_status, None);
    assert_eq!(live_a.moved_on, None);
}

#[test]
fn archive_keeps_order_and_membership() {
    let (mut session, _) = two_person_session();
    session.move_status(&key("c1"), 0, ShiftStatus::Called).unwrap();
    let order_before: Vec<PersonId> = session
        .roster()
        .category(&key("c1"))
        .unwrap()
        .people
        .iter()
        .map(|person| person.id.clone())
        .collect();

    session.archive_period();

    let order_after: Vec<PersonId> = session
        .roster()
        .category(&key("c1"))
        .unwrap()
        .people
        .iter()
        .map(|person| person.id.clone())
        .collect();
    assert_eq!(order_after, order_before);
}

#[test]
fn second_archive_has_no_shift_logs() {
    let (mut session, clock) = two_person_session();
    session.move_status(&key("c1"), 0, ShiftStatus::PickedUp).unwrap();
    session.move_status(&key("c1"), 0, ShiftStatus::Called).unwrap();

    let first = session.archive_period().clone();
    assert_eq!(first.picked_up_shifts.len(), 1);
    assert_eq!(first.called_shifts.len(), 1);

    clock.advance(Duration::days(14));
    let second = session.archive_period().clone();
    assert!(second.picked_up_shifts.is_empty());
    assert!(second.called_shifts.is_empty());

    // Newest first.
    assert_eq!(session.history().latest(), Some(&second));
    assert_eq!(session.history().get(1), Some(&first));
}

#[test]
fn archive_snapshot_preserves_total_person_count() {
    let config = RotaConfig::seed();
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 15, 0).unwrap(),
    ));
    let mut session =
        RotationSession::new(config.build_roster().unwrap(), config.ledger_policy, clock);
    session
        .move_status(&key("category4"), 2, ShiftStatus::Called)
        .unwrap();
    let live_total = session.roster().total_people();

    let record = session.archive_period();

    assert_eq!(record.total_people(), live_total);
    assert_eq!(record.categories.len(), 8);
}

#[test]
fn archive_moves_ledger_into_record_and_clears_it() {
    let (mut session, _) = two_person_session();
    session
        .record_call_out(CallOutRequest {
            person_id: PersonId::new("B"),
            shift: "AM".to_string(),
            notes: String::new(),
            category: key("c1"),
            reason: CallOutReason::SickLeave,
        })
        .unwrap();
    session.assign_coverage(0, PersonId::new("A")).unwrap();
    let ledger_before = session.ledger().entries().to_vec();

    let record = session.archive_period().clone();

    assert_eq!(record.called_out_shifts, ledger_before);
    assert!(session.ledger().is_empty());
}

#[test]
fn later_roster_edits_do_not_reach_archived_snapshot() {
    let (mut session, _) = two_person_session();
    session.move_status(&key("c1"), 1, ShiftStatus::Called).unwrap();
    let snapshot = session.archive_period().clone();

    session
        .update_person(
            &key("c1"),
            &PersonId::new("A"),
            &PersonPatch {
                first_name: Some("Changed".to_string()),
                ..PersonPatch::default()
            },
        )
        .unwrap();
    session.remove_person(&key("c1"), &PersonId::new("B")).unwrap();
    session.move_status(&key("c1"), 0, ShiftStatus::PickedUp).unwrap();

    let archived = session.history().latest().unwrap();
    assert_eq!(archived, &snapshot);
    let archived_b = archived.find_person(&PersonId::new("B")).unwrap();
    assert_eq!(archived_b.shift_status, Some(ShiftStatus::Called));
    assert_eq!(
        archived.find_person(&PersonId::new("A")).unwrap().first_name,
        "Alice"
    );
}
