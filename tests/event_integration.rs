use dirhook::error::DirhookError;
use dirhook::event::{ChangeEvent, ChangeKind, RawEvent, RawKind, normalize};
use dirhook::watcher::native::to_raw_events;
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[test]
fn parses_watch_tool_lines() {
    let raw: RawEvent = "CREATE,ISDIR /watch/new tenant".parse().unwrap();
    assert_eq!(raw.kinds, vec![RawKind::Create]);
    assert!(raw.is_dir);
    assert_eq!(raw.path, PathBuf::from("/watch/new tenant"));

    let raw: RawEvent = "MODIFY /watch/file.txt\n".parse().unwrap();
    assert_eq!(raw.kinds, vec![RawKind::Modify]);
    assert!(!raw.is_dir);
}

#[test]
fn rejects_malformed_lines() {
    for line in ["", "CREATE,ISDIR", " /watch/a"] {
        let result = line.parse::<RawEvent>();
        assert!(
            matches!(result, Err(DirhookError::MalformedEvent(_))),
            "{line:?} should not parse"
        );
    }
}

#[test]
fn directory_creation_and_move_in_are_additions() {
    for line in ["CREATE,ISDIR /watch/a", "MOVED_TO,ISDIR /watch/a"] {
        let raw: RawEvent = line.parse().unwrap();
        assert_eq!(
            normalize(&raw, None),
            Some(ChangeEvent::added(PathBuf::from("/watch/a")))
        );
    }
}

#[test]
fn directory_deletion_and_move_out_are_removals() {
    for line in ["DELETE,ISDIR /watch/a", "MOVED_FROM,ISDIR /watch/a"] {
        let raw: RawEvent = line.parse().unwrap();
        let event = normalize(&raw, None).unwrap();
        assert_eq!(event.kind, ChangeKind::Removed);
        assert_eq!(event.name, "a");
    }
}

#[test]
fn file_and_modify_events_are_dropped() {
    for line in [
        "CREATE /watch/file",
        "DELETE /watch/file",
        "MOVED_TO /watch/file",
        "MODIFY,ISDIR /watch/a",
        "ATTRIB,ISDIR /watch/a",
    ] {
        let raw: RawEvent = line.parse().unwrap();
        assert_eq!(normalize(&raw, None), None, "{line}");
    }
}

#[test]
fn excluded_names_are_dropped_for_every_kind() {
    let exclusion = Regex::new(r"^\.").unwrap();
    for line in [
        "CREATE,ISDIR /watch/.cache",
        "DELETE,ISDIR /watch/.cache",
        "MOVED_TO,ISDIR /watch/.cache",
        "MOVED_FROM,ISDIR /watch/.cache",
    ] {
        let raw: RawEvent = line.parse().unwrap();
        assert_eq!(normalize(&raw, Some(&exclusion)), None, "{line}");
    }

    let raw: RawEvent = "CREATE,ISDIR /watch/tenant".parse().unwrap();
    assert!(normalize(&raw, Some(&exclusion)).is_some());
}

#[test]
fn notify_folder_kinds_carry_the_directory_flag() {
    let root = Path::new("/watch");
    let known = BTreeSet::new();

    let created = Event::new(EventKind::Create(CreateKind::Folder)).add_path(root.join("a"));
    assert_eq!(
        to_raw_events(created, root, &known),
        vec![RawEvent::new(RawKind::Create, true, root.join("a"))]
    );

    let removed = Event::new(EventKind::Remove(RemoveKind::Folder)).add_path(root.join("a"));
    assert_eq!(
        to_raw_events(removed, root, &known),
        vec![RawEvent::new(RawKind::Delete, true, root.join("a"))]
    );

    let file = Event::new(EventKind::Remove(RemoveKind::File)).add_path(root.join("f"));
    assert_eq!(
        to_raw_events(file, root, &known),
        vec![RawEvent::new(RawKind::Delete, false, root.join("f"))]
    );
}

#[test]
fn vanished_paths_use_known_directories() {
    let root = Path::new("/watch");
    let known: BTreeSet<PathBuf> = [root.join("tenant")].into_iter().collect();

    let removed = Event::new(EventKind::Remove(RemoveKind::Any))
        .add_path(root.join("tenant"))
        .add_path(root.join("stranger"));
    assert_eq!(
        to_raw_events(removed, root, &known),
        vec![
            RawEvent::new(RawKind::Delete, true, root.join("tenant")),
            RawEvent::new(RawKind::Delete, false, root.join("stranger")),
        ]
    );

    let moved_out = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
        .add_path(root.join("tenant"));
    assert_eq!(
        to_raw_events(moved_out, root, &known),
        vec![RawEvent::new(RawKind::MovedFrom, true, root.join("tenant"))]
    );
}

#[test]
fn rename_within_root_splits_into_from_then_to() {
    let root = Path::new("/watch");
    let known: BTreeSet<PathBuf> = [root.join("old")].into_iter().collect();

    let renamed = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
        .add_path(root.join("old"))
        .add_path(root.join("new"));
    let raws = to_raw_events(renamed, root, &known);

    assert_eq!(raws.len(), 2);
    assert_eq!(raws[0], RawEvent::new(RawKind::MovedFrom, true, root.join("old")));
    assert_eq!(raws[1].kinds, vec![RawKind::MovedTo]);
    assert_eq!(raws[1].path, root.join("new"));
}

#[test]
fn nested_paths_are_ignored() {
    let root = Path::new("/watch");
    let nested = Event::new(EventKind::Create(CreateKind::Folder))
        .add_path(root.join("tenant/inner"));
    assert!(to_raw_events(nested, root, &BTreeSet::new()).is_empty());
}
