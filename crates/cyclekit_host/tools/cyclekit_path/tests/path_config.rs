use std::env;
use std::sync::{Mutex, OnceLock};

use cyclekit_core::error::ErrorKind;
use cyclekit_core::lifecycle::LifecycleState;
use cyclekit_path::config::{Config, Mode, ENV_FROM, ENV_TO};
use cyclekit_path::render;

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("lock")
}

fn clear_env() {
    env::remove_var(ENV_FROM);
    env::remove_var(ENV_TO);
}

#[test]
fn path_flags_parse() {
    let _guard = env_lock();
    clear_env();

    let config = Config::from_args_iter(["bin", "--from", "stop", "--to=resume", "--exclude-last"])
        .unwrap();
    assert_eq!(
        config.mode,
        Mode::Path {
            from: LifecycleState::Stop,
            to: LifecycleState::Resume,
            exclude_last: true
        }
    );
    assert_eq!(render(&config.mode).unwrap(), vec!["STOP -> RESUME: RESTART, START"]);
}

#[test]
fn env_supplies_endpoints() {
    let _guard = env_lock();
    env::set_var(ENV_FROM, "start");
    env::set_var(ENV_TO, "stop");

    let config = Config::from_args_iter(["bin"]).unwrap();
    assert_eq!(render(&config.mode).unwrap(), vec!["START -> STOP: STOP"]);

    clear_env();
}

#[test]
fn closest_list_parses() {
    let _guard = env_lock();
    clear_env();

    let config =
        Config::from_args_iter(["bin", "--from=start", "--closest", "start,pause"]).unwrap();
    assert_eq!(
        config.mode,
        Mode::Closest {
            from: LifecycleState::Start,
            candidates: vec![LifecycleState::Start, LifecycleState::Pause]
        }
    );
    assert_eq!(
        render(&config.mode).unwrap(),
        vec!["closest to START of [START, PAUSE]: START"]
    );
}

#[test]
fn missing_or_bad_arguments_are_errors() {
    let _guard = env_lock();
    clear_env();

    let err = Config::from_args_iter(["bin", "--to", "resume"]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = Config::from_args_iter(["bin", "--from", "sleeping", "--to", "resume"])
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);

    let err = Config::from_args_iter(["bin", "--from", "resume"]).err().unwrap();
    assert_eq!(err.kind, ErrorKind::InvalidArgument);
}

#[test]
fn table_and_help_need_no_endpoints() {
    let _guard = env_lock();
    clear_env();

    let table = Config::from_args_iter(["bin", "--table"]).unwrap();
    let lines = render(&table.mode).unwrap();
    assert!(lines.contains(&"RESUME -> CREATE: PAUSE, STOP, DESTROY, CREATE".to_string()));

    let help = Config::from_args_iter(["bin", "-h"]).unwrap();
    assert_eq!(help.mode, Mode::Help);
    assert!(render(&help.mode).unwrap().is_empty());
}
