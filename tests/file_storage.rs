// End-to-end persistence through FileStorage

use std::fs;
use tasklist::{ClockIds, FileStorage, SequentialIds, Storage, TaskList, DEFAULT_KEY};
use tempfile::TempDir;

#[test]
fn test_tasks_survive_reopen() {
    let temp = TempDir::new().unwrap();

    let (a, b) = {
        let mut list = TaskList::open(FileStorage::open(temp.path()).unwrap(), SequentialIds::new());
        let a = list.add_task("Buy milk").unwrap();
        let b = list.add_task("  Call mom ").unwrap();
        list.toggle_complete(a);
        list.begin_edit(b, "Call mom");
        list.update_draft("Call mom tonight ");
        list.save_edit(b);
        (a, b)
    };

    let list = TaskList::open(FileStorage::open(temp.path()).unwrap(), SequentialIds::new());
    assert_eq!(list.len(), 2);
    assert_eq!(list.tasks()[0].id, a);
    assert!(list.tasks()[0].completed);
    assert_eq!(list.tasks()[1].id, b);
    assert_eq!(list.tasks()[1].text, "Call mom tonight ");
    assert!(list.edit_session().is_none());
}

#[test]
fn test_slot_file_layout() {
    let temp = TempDir::new().unwrap();
    let mut list = TaskList::open(FileStorage::open(temp.path()).unwrap(), SequentialIds::new());
    list.add_task("Buy milk");

    let content = fs::read_to_string(temp.path().join(format!("{}.json", DEFAULT_KEY))).unwrap();
    assert_eq!(content, r#"[{"id":1,"text":"Buy milk","completed":false}]"#);
}

#[test]
fn test_corrupt_slot_starts_empty_then_recovers() {
    let temp = TempDir::new().unwrap();
    let mut storage = FileStorage::open(temp.path()).unwrap();
    storage.set(DEFAULT_KEY, "{definitely not tasks").unwrap();

    let mut list = TaskList::open(storage, ClockIds::new());
    assert!(list.is_empty());
    assert!(list.load_failed());

    // First mutation overwrites the corrupt slot
    let id = list.add_task("fresh start").unwrap();
    let reopened = TaskList::open(FileStorage::open(temp.path()).unwrap(), ClockIds::new());
    assert!(!reopened.load_failed());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.get(id).unwrap().text, "fresh start");
}

#[test]
fn test_clock_ids_do_not_collide_across_sessions() {
    let temp = TempDir::new().unwrap();

    let first = {
        let mut list = TaskList::open(FileStorage::open(temp.path()).unwrap(), ClockIds::new());
        list.add_task("one").unwrap()
    };

    let mut list = TaskList::open(FileStorage::open(temp.path()).unwrap(), ClockIds::new());
    let second = list.add_task("two").unwrap();
    assert!(second > first);
}

#[test]
fn test_separate_keys_are_independent() {
    let temp = TempDir::new().unwrap();

    let mut work = TaskList::open_with_key(FileStorage::open(temp.path()).unwrap(), SequentialIds::new(), "work");
    work.add_task("Ship release");

    let home = TaskList::open_with_key(FileStorage::open(temp.path()).unwrap(), SequentialIds::new(), "home");
    assert!(home.is_empty());
    assert!(temp.path().join("work.json").exists());
    assert!(!temp.path().join("home.json").exists());
}

#[test]
fn test_slot_path_rejects_bad_key_up_front() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::open(temp.path()).unwrap();

    assert!(storage.slot_path("a/b").is_err());
    assert_eq!(storage.slot_path("work").unwrap(), temp.path().join("work.json"));
}
