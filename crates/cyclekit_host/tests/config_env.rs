use std::env;
use std::sync::{Mutex, OnceLock};

use cyclekit_host::config::{ClientConfig, DEFAULT_EVENT_CAPACITY, ENV_EVENT_CAPACITY, ENV_TRACE};

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().expect("lock")
}

#[test]
fn defaults_without_env() {
    let _guard = env_lock();
    env::remove_var(ENV_EVENT_CAPACITY);
    env::remove_var(ENV_TRACE);

    let config = ClientConfig::from_env();
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    assert!(!config.trace_transactions);
}

#[test]
fn env_overrides_apply() {
    let _guard = env_lock();
    env::set_var(ENV_EVENT_CAPACITY, "128");
    env::set_var(ENV_TRACE, "yes");

    let config = ClientConfig::from_env();
    assert_eq!(config.event_capacity, 128);
    assert!(config.trace_transactions);

    env::remove_var(ENV_EVENT_CAPACITY);
    env::remove_var(ENV_TRACE);
}

#[test]
fn bad_or_zero_values_are_tolerated() {
    let _guard = env_lock();
    env::set_var(ENV_EVENT_CAPACITY, "0");
    env::set_var(ENV_TRACE, "maybe");

    let config = ClientConfig::from_env();
    assert_eq!(config.event_capacity, 1);
    assert!(!config.trace_transactions);

    env::set_var(ENV_EVENT_CAPACITY, "lots");
    assert_eq!(ClientConfig::from_env().event_capacity, DEFAULT_EVENT_CAPACITY);

    env::remove_var(ENV_EVENT_CAPACITY);
    env::remove_var(ENV_TRACE);
}
