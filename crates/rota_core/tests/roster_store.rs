use chrono::{TimeZone, Utc};
use rota_core::{
    CategoryKey, Person, PersonId, PersonPatch, Roster, RosterError, ShiftStatus,
};

fn key(value: &str) -> CategoryKey {
    CategoryKey::parse(value).unwrap()
}

fn person(id: &str, first: &str) -> Person {
    Person::new(PersonId::new(id), first, "Tester", "(123) 555-0000").unwrap()
}

fn roster_with(ids: &[&str]) -> Roster {
    let mut roster = Roster::new();
    roster
        .insert_category(
            key("c1"),
            "Category One",
            ids.iter().map(|id| person(id, id)).collect(),
        )
        .unwrap();
    roster
        .insert_category(key("c2"), "Category Two", vec![person("z", "Zed")])
        .unwrap();
    roster
}

fn ids(roster: &Roster, category: &str) -> Vec<String> {
    roster
        .category(&key(category))
        .unwrap()
        .people
        .iter()
        .map(|person| person.id.to_string())
        .collect()
}

#[test]
fn move_status_moves_person_to_end_and_keeps_length() {
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap();
    for index in 0..4 {
        let mut roster = roster_with(&["a", "b", "c", "d"]);
        let moved_id = ids(&roster, "c1")[index].clone();

        roster
            .move_status(&key("c1"), index, ShiftStatus::Called, at)
            .unwrap();

        let after = ids(&roster, "c1");
        assert_eq!(after.len(), 4);
        assert_eq!(after.last().unwrap(), &moved_id);
    }
}

#[test]
fn move_status_increments_count_and_stamps_moved_on() {
    let mut roster = roster_with(&["a", "b"]);
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap();

    let moved = roster
        .move_status(&key("c1"), 0, ShiftStatus::PickedUp, at)
        .unwrap()
        .clone();

    assert_eq!(moved.id.as_str(), "a");
    assert_eq!(moved.shift_count, 1);
    assert_eq!(moved.shift_status, Some(ShiftStatus::PickedUp));
    assert_eq!(moved.moved_on, Some(at));
    assert_eq!(ids(&roster, "c1"), vec!["b", "a"]);
}

#[test]
fn move_status_out_of_range_is_reported_and_changes_nothing() {
    let mut roster = roster_with(&["a", "b"]);
    let before = roster.clone();
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap();

    let err = roster
        .move_status(&key("c1"), 2, ShiftStatus::Called, at)
        .unwrap_err();

    assert_eq!(
        err,
        RosterError::IndexOutOfRange {
            category: key("c1"),
            index: 2,
            len: 2,
        }
    );
    assert_eq!(roster, before);
}

#[test]
fn move_status_unknown_category_is_reported() {
    let mut roster = roster_with(&["a"]);
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 7, 30, 0).unwrap();
    let err = roster
        .move_status(&key("missing"), 0, ShiftStatus::Called, at)
        .unwrap_err();
    assert_eq!(err, RosterError::UnknownCategory(key("missing")));
}

#[test]
fn update_notes_replaces_in_place_without_reordering() {
    let mut roster = roster_with(&["a", "b", "c"]);

    roster.update_notes(&key("c1"), 1, "prefers nights").unwrap();

    assert_eq!(ids(&roster, "c1"), vec!["a", "b", "c"]);
    let category = roster.category(&key("c1")).unwrap();
    assert_eq!(category.people[1].notes, "prefers nights");
    assert_eq!(category.people[1].shift_count, 0);

    let err = roster.update_notes(&key("c1"), 9, "x").unwrap_err();
    assert!(matches!(err, RosterError::IndexOutOfRange { index: 9, .. }));
}

#[test]
fn add_person_appends_and_rejects_ids_already_on_roster() {
    let mut roster = roster_with(&["a"]);

    roster.add_person(&key("c1"), person("n", "New")).unwrap();
    assert_eq!(ids(&roster, "c1"), vec!["a", "n"]);

    let err = roster.add_person(&key("c1"), person("z", "Clash")).unwrap_err();
    assert_eq!(err, RosterError::DuplicatePersonId(PersonId::new("z")));
    assert_eq!(ids(&roster, "c1"), vec!["a", "n"]);
}

#[test]
fn add_person_accepts_generated_ids() {
    let mut roster = roster_with(&[]);
    let generated = Person::generate("Gen", "Erated", "");
    let added = roster.add_person(&key("c1"), generated.clone()).unwrap();
    assert_eq!(added.id, generated.id);
    assert!(!added.id.as_str().is_empty());
}

#[test]
fn remove_person_removes_matching_id_only() {
    let mut roster = roster_with(&["a", "b", "c"]);

    let removed = roster.remove_person(&key("c1"), &PersonId::new("b")).unwrap();
    assert_eq!(removed.id.as_str(), "b");
    assert_eq!(ids(&roster, "c1"), vec!["a", "c"]);

    let err = roster
        .remove_person(&key("c1"), &PersonId::new("z"))
        .unwrap_err();
    assert_eq!(
        err,
        RosterError::PersonNotFound {
            category: key("c1"),
            person_id: PersonId::new("z"),
        }
    );
    assert_eq!(ids(&roster, "c2"), vec!["z"]);
}

#[test]
fn update_person_merges_partial_fields() {
    let mut roster = roster_with(&["a"]);
    let patch = PersonPatch {
        last_name: Some("Renamed".to_string()),
        notes: Some("on leave next week".to_string()),
        ..PersonPatch::default()
    };

    let updated = roster
        .update_person(&key("c1"), &PersonId::new("a"), &patch)
        .unwrap()
        .clone();

    assert_eq!(updated.first_name, "a");
    assert_eq!(updated.last_name, "Renamed");
    assert_eq!(updated.phone, "(123) 555-0000");
    assert_eq!(updated.notes, "on leave next week");

    let err = roster
        .update_person(&key("c1"), &PersonId::new("missing"), &patch)
        .unwrap_err();
    assert!(matches!(err, RosterError::PersonNotFound { .. }));
}

#[test]
fn rename_category_changes_title_only() {
    let mut roster = roster_with(&["a", "b"]);
    let members_before = ids(&roster, "c1");

    roster.rename_category(&key("c1"), "  Casual Pool ").unwrap();

    assert_eq!(roster.title(&key("c1")), Some("Casual Pool"));
    assert_eq!(ids(&roster, "c1"), members_before);
    assert_eq!(roster.categories()[0].key, key("c1"));

    assert_eq!(
        roster.rename_category(&key("c1"), "   ").unwrap_err(),
        RosterError::BlankTitle(key("c1"))
    );
    assert_eq!(
        roster.rename_category(&key("nope"), "X").unwrap_err(),
        RosterError::UnknownCategory(key("nope"))
    );
}

#[test]
fn find_person_searches_every_category() {
    let roster = roster_with(&["a"]);
    let (category, found) = roster.find_person(&PersonId::new("z")).unwrap();
    assert_eq!(category, &key("c2"));
    assert_eq!(found.first_name, "Zed");
    assert!(roster.find_person(&PersonId::new("ghost")).is_none());
    assert_eq!(roster.total_people(), 2);
}
