use cyclekit_core::error::ErrorKind;
use cyclekit_core::lifecycle::{
    closest_of, path_involves_destruction, path_table, resolve_path, LifecycleState,
    ORDERED_STATES,
};

use LifecycleState::*;

#[test]
fn documented_paths_resolve_exactly() {
    let cases = [
        (Create, Resume, false, vec![Start, Resume]),
        (Start, Stop, false, vec![Stop]),
        (Pause, Resume, false, vec![Resume]),
        (Stop, Start, false, vec![Restart, Start]),
        (Resume, Create, false, vec![Pause, Stop, Destroy, Create]),
        (Stop, Resume, true, vec![Restart, Start]),
    ];

    for (start, finish, exclude_last, expected) in cases {
        let path = resolve_path(start, finish, exclude_last).expect("valid request");
        assert_eq!(path, expected, "{start} -> {finish} (exclude_last={exclude_last})");
    }
}

#[test]
fn restart_and_destroy_only_appear_in_their_branches() {
    let table = path_table().expect("path table should build");

    for entry in &table.paths {
        let (start, finish) = (entry.start.id(), entry.finish.id());
        let backward = finish < start && !(entry.start == Pause && entry.finish == Resume);
        let restart_branch = backward && start <= Stop.id() && finish >= Start.id();
        let relaunch_branch = backward && !restart_branch;

        assert_eq!(
            entry.hops.contains(&Restart),
            restart_branch,
            "{} -> {}: {:?}",
            entry.start,
            entry.finish,
            entry.hops
        );
        // A forward path may end in Destroy; only a relaunch from a live
        // entity passes through it.
        let passes_through_destroy = entry.hops.contains(&Destroy) && entry.finish != Destroy;
        assert_eq!(
            passes_through_destroy,
            relaunch_branch && entry.start != Destroy,
            "{} -> {}: {:?}",
            entry.start,
            entry.finish,
            entry.hops
        );
    }
}

#[test]
fn resolution_is_a_pure_function_of_its_arguments() {
    for start in ORDERED_STATES {
        for finish in ORDERED_STATES {
            for exclude_last in [false, true] {
                let first = resolve_path(start, finish, exclude_last);
                let second = resolve_path(start, finish, exclude_last);
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn exclude_last_drops_exactly_one_hop() {
    let table = path_table().unwrap();

    for entry in table.paths.iter().filter(|e| !e.hops.is_empty()) {
        let excluded = resolve_path(entry.start, entry.finish, true).unwrap();
        assert_eq!(excluded.as_slice(), &entry.hops[..entry.hops.len() - 1]);
    }
}

#[test]
fn invalid_requests_are_rejected() {
    let cases = [
        (Undefined, Start),
        (Start, Undefined),
        (Restart, Start),
        (Start, Restart),
        (Resume, PreCreate),
    ];

    for (start, finish) in cases {
        let err = resolve_path(start, finish, false).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidPathRequest, "{start} -> {finish}");
    }
    assert!(resolve_path(PreCreate, PreCreate, false).unwrap().is_empty());
}

#[test]
fn closest_prefers_short_non_destructive_paths() {
    assert_eq!(closest_of(Some(Start), &[Start, Pause]).unwrap(), Start);
    assert_eq!(closest_of(Some(Destroy), &[Start, Pause]).unwrap(), Start);

    let to_create = resolve_path(Resume, Create, false).unwrap();
    assert!(path_involves_destruction(&to_create));
    assert_eq!(closest_of(Some(Resume), &[Create, Destroy]).unwrap(), Destroy);
}
