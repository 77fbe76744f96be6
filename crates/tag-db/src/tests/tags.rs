use super::test_db;
use crate::DbError;
use crate::tags::CODE_LEN;

#[test]
fn mint_produces_unique_well_formed_codes() {
    let db = test_db();
    let codes = db.mint_tags(50).unwrap();
    assert_eq!(codes.len(), 50);

    let unique: std::collections::HashSet<_> = codes.iter().collect();
    assert_eq!(unique.len(), 50);

    for code in &codes {
        assert_eq!(code.len(), CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}

#[test]
fn unprinted_respects_the_cap() {
    let db = test_db();
    db.mint_tags(30).unwrap();
    assert_eq!(db.unprinted_tags(10).unwrap().len(), 10);
    assert_eq!(db.unprinted_tags(100).unwrap().len(), 30);
}

#[test]
fn mark_printed_removes_tags_from_the_unprinted_pool() {
    let db = test_db();
    let codes = db.mint_tags(5).unwrap();
    db.mark_printed(&codes[..3], "job-1").unwrap();

    let left = db.unprinted_tags(100).unwrap();
    assert_eq!(left.len(), 2);

    let printed = db.tag(&codes[0]).unwrap().unwrap();
    assert!(printed.printed);
    assert!(printed.printed_at.is_some());

    let jobs = db.print_jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "job-1");
    assert_eq!(jobs[0].tag_count, 3);
}

#[test]
fn mark_printed_unknown_code_rolls_back() {
    let db = test_db();
    let mut codes = db.mint_tags(2).unwrap();
    codes.push("zzzzzzzz".to_string());

    let err = db.mark_printed(&codes, "job-1").unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));

    // Nothing from the failed job stuck.
    assert_eq!(db.unprinted_tags(100).unwrap().len(), 2);
    assert!(db.print_jobs().unwrap().is_empty());
}

#[test]
fn assigned_tags_are_excluded_from_printing() {
    let db = test_db();
    let codes = db.mint_tags(3).unwrap();
    db.assign_tag(&codes[0], "pet-42").unwrap();

    let unprinted = db.unprinted_tags(100).unwrap();
    assert_eq!(unprinted.len(), 2);
    assert!(unprinted.iter().all(|t| t.code != codes[0]));
}

#[test]
fn assign_is_first_come_first_served() {
    let db = test_db();
    let codes = db.mint_tags(1).unwrap();
    db.assign_tag(&codes[0], "pet-1").unwrap();

    let err = db.assign_tag(&codes[0], "pet-2").unwrap_err();
    assert!(matches!(err, DbError::InvalidData(_)));

    let tag = db.tag(&codes[0]).unwrap().unwrap();
    assert_eq!(tag.pet_id.as_deref(), Some("pet-1"));
}

#[test]
fn assign_unknown_code_is_not_found() {
    let db = test_db();
    let err = db.assign_tag("nope0000", "pet-1").unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[test]
fn tag_lookup_and_count() {
    let db = test_db();
    assert_eq!(db.tag_count().unwrap(), 0);
    assert!(db.tag("absent00").unwrap().is_none());

    let codes = db.mint_tags(4).unwrap();
    assert_eq!(db.tag_count().unwrap(), 4);

    let tag = db.tag(&codes[0]).unwrap().unwrap();
    assert!(!tag.printed);
    assert!(tag.pet_id.is_none());
}

#[test]
fn listing_pages_through_tags() {
    let db = test_db();
    db.mint_tags(12).unwrap();
    let first = db.list_tags(5, 0).unwrap();
    let second = db.list_tags(5, 5).unwrap();
    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 5);
    assert!(first.iter().all(|t| second.iter().all(|u| u.code != t.code)));
    assert_eq!(db.list_tags(5, 10).unwrap().len(), 2);
}
