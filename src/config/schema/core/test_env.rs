use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Every variable `apply_env_overrides` reads.
const OVERRIDE_KEYS: [&str; 10] = [
    "WEEKPAGE_NOTION_TOKEN",
    "NOTION_TOKEN",
    "WEEKPAGE_PARENT_PAGE",
    "PARENT_PAGE_ID",
    "PARENT_PAGE_URL",
    "WEEKPAGE_TEMPLATE_PAGE",
    "TEMPLATE_PAGE_ID",
    "WEEKPAGE_MONTH_INDEX_PAGE",
    "MONTH_INDEX_PAGE_ID",
    "WEEKPAGE_NOTION_BASE_URL",
];

fn write_var(key: &str, value: Option<&str>) {
    // SAFETY: only called while an `OverrideEnv` holds ENV_LOCK, so no other
    // test touches the environment concurrently.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

/// Exclusive, initially empty view of the override variables. The previous
/// values come back when it drops.
pub(super) struct OverrideEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl OverrideEnv {
    pub(super) fn cleared() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_KEYS
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_KEYS {
            write_var(key, None);
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn set(&self, key: &'static str, value: &str) {
        assert!(OVERRIDE_KEYS.contains(&key), "{key} is not an override variable");
        write_var(key, Some(value));
    }
}

impl Drop for OverrideEnv {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            write_var(key, value.as_deref());
        }
    }
}
