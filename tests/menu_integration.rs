use std::io::Cursor;

use taskbook::menu::run_menu;
use taskbook::storage::TaskFile;
use taskbook::store::TaskStore;
use taskbook::task::{Priority, Status};
use tempfile::TempDir;

/// Drive a full menu session against `store`, returning everything printed.
fn run_session(store: &mut TaskStore, script: &str) -> String {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    run_menu(store, &mut input, &mut output).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn add_view_complete_delete_session() {
    let mut store = TaskStore::new();
    let script = "1\nBuy milk\nhigh\n\n\
                  1\nPay bills\nbogus\n2099-01-01\n\
                  2\n\
                  3\n1\n\
                  4\n2\n\
                  9\n";
    let out = run_session(&mut store, script);

    assert!(out.contains("warning: unknown priority 'bogus', using Medium"));
    assert!(out.contains("1. Buy milk  |  Pending  |  Priority: High  |  Due: None"));
    assert!(out.contains("2. Pay bills  |  Pending  |  Priority: Medium  |  Due: 2099-01-01"));
    assert!(out.contains("Task marked as completed!"));
    assert!(out.contains("Task deleted successfully!"));

    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].title, "Buy milk");
    assert_eq!(store.tasks()[0].status, Status::Completed);
}

#[test]
fn sort_session_reorders_store() {
    let mut store = TaskStore::new();
    store.add("undated", "low", "").unwrap();
    store.add("soon", "high", "2099-01-01").unwrap();
    store.add("later", "medium", "2099-06-01").unwrap();

    let out = run_session(&mut store, "7\n2\n9\n");
    assert!(out.contains("Sorted by due date."));

    let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["soon", "later", "undated"]);
}

#[test]
fn search_session_matches_case_insensitively() {
    let mut store = TaskStore::new();
    store.add("Buy milk", "", "").unwrap();
    store.add("Pay bills", "", "").unwrap();

    let out = run_session(&mut store, "6\nBUY\n9\n");
    assert!(out.contains("- Buy milk"));
    assert!(!out.contains("- Pay bills"));
}

#[test]
fn tasks_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    // First session: add a task, then save on exit as the driver does.
    {
        let file = TaskFile::new(&path);
        let mut store = TaskStore::from_tasks(file.load().unwrap());
        run_session(&mut store, "1\nBuy milk\nhigh\n2099-01-01\n9\n");
        file.save(store.tasks()).unwrap();
    }

    // Second session: the task is there with every attribute intact.
    {
        let file = TaskFile::new(&path);
        let store = TaskStore::from_tasks(file.load().unwrap());
        assert_eq!(store.len(), 1);
        let task = &store.tasks()[0];
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::Pending);
        assert!(task.due_date.is_some());
    }
}

#[test]
fn cleared_list_persists_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let file = TaskFile::new(&path);
    let mut store = TaskStore::new();
    store.add("a", "", "").unwrap();
    file.save(store.tasks()).unwrap();

    run_session(&mut store, "8\nyes\n9\n");
    file.save(store.tasks()).unwrap();

    assert!(TaskFile::new(&path).load().unwrap().is_empty());
}

#[test]
fn declined_clear_changes_nothing_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let file = TaskFile::new(&path);
    let mut store = TaskStore::new();
    store.add("a", "", "").unwrap();

    let out = run_session(&mut store, "8\nno\n9\n");
    assert!(out.contains("Cancelled."));
    file.save(store.tasks()).unwrap();

    assert_eq!(TaskFile::new(&path).load().unwrap().len(), 1);
}
