//! End-to-end lifecycle tests against a real redb database.

use downtime::{
    ConfigRenderer, Database, ObjectType, RangeOwner, RangeSet, RangeStore, ScheduledDowntime,
};
use std::rc::Rc;
use tempfile::TempDir;

fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

#[test]
fn edit_store_reload_and_render() {
    let (db, _temp) = setup_db();
    let parent = Rc::new(ScheduledDowntime::stored(21, ObjectType::Object));

    let mut ranges = RangeSet::new(Rc::clone(&parent));
    ranges
        .set_range("tuesday", Some("20:00-22:00"))
        .set_range("monday", Some("09:00-17:00"))
        .set_range("2024-12-24", Some("00:00-24:00"));
    ranges.store(&db.ranges).expect("store");

    let mut reloaded = RangeSet::load_for_stored_object(Rc::clone(&parent), &db.ranges)
        .expect("load");
    assert!(!reloaded.has_been_modified());
    assert_eq!(
        reloaded.to_config_string().expect("render"),
        "    ranges = {\n\
         \x20       \"2024-12-24\"\t= \"00:00-24:00\"\n\
         \x20       \"monday\"\t= \"09:00-17:00\"\n\
         \x20       \"tuesday\"\t= \"20:00-22:00\"\n\
         \x20   }\n"
    );

    reloaded.set([("monday", Some("09:00-17:00"))]);
    let summary = reloaded.store(&db.ranges).expect("store again");
    assert_eq!(summary.deleted, vec!["2024-12-24", "tuesday"]);

    let rows = db
        .ranges
        .load_ranges(&parent.range_table_name(), 21)
        .expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].range_key, "monday");
}

#[test]
fn cleared_template_renders_nothing_and_deletes_rows() {
    let (db, _temp) = setup_db();
    let template = ScheduledDowntime::stored(3, ObjectType::Template);

    let mut ranges = RangeSet::new(template.clone());
    ranges.set_range("sunday", Some("00:00-06:00"));
    ranges.store(&db.ranges).expect("store");

    let mut loaded = RangeSet::load_for_stored_object(template, &db.ranges).expect("load");
    loaded.clear();
    assert_eq!(loaded.to_config_string().expect("render"), "");
    assert_eq!(loaded.to_string(), "");

    let summary = loaded.store(&db.ranges).expect("store cleared");
    assert!(summary.upserted.is_empty());
    assert_eq!(summary.deleted, vec!["sunday"]);
    assert_eq!(
        db.ranges
            .count_rows("icinga_scheduled_downtime_range")
            .expect("count"),
        0
    );
}
