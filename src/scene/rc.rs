//! Process-wide default style parameters and scoped overrides.
//!
//! New figures and axes read their defaults from this registry. A document's
//! `set_rc` section overrides entries for the duration of one director run via
//! [`TempRc`], which restores the previous values when dropped.

use crate::dispatch::ConfigMap;
use crate::error::{DispatchError, DispatchResult};
use serde_json::{Value, json};
use std::sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

static RC_PARAMS: LazyLock<RwLock<ConfigMap>> = LazyLock::new(|| RwLock::new(defaults()));

/// Built-in parameter defaults. Only these keys may be set.
pub fn defaults() -> ConfigMap {
    let defaults = json!({
        "figure.figsize": [6.4, 4.8],
        "figure.dpi": 100.0,
        "figure.facecolor": "white",
        "figure.edgecolor": "white",
        "figure.frameon": true,
        "axes.facecolor": "white",
        "axes.edgecolor": "black",
        "axes.labelcolor": "black",
        "axes.titlecolor": "auto",
        "axes.titlelocation": "center",
        "axes.grid": false,
        "xtick.color": "black",
        "ytick.color": "black",
        "lines.linewidth": 1.5,
        "lines.color": "C0",
        "image.cmap": "viridis",
        "legend.loc": "best",
        "font.size": 10.0,
    });
    match defaults {
        Value::Object(map) => map,
        _ => ConfigMap::new(),
    }
}

fn read() -> RwLockReadGuard<'static, ConfigMap> {
    RC_PARAMS.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write() -> RwLockWriteGuard<'static, ConfigMap> {
    RC_PARAMS.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Current value of a parameter.
pub fn rc_get(key: &str) -> Option<Value> {
    read().get(key).cloned()
}

pub fn rc_str(key: &str, fallback: &str) -> String {
    rc_get(key)
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_else(|| fallback.to_string())
}

pub fn rc_f64(key: &str, fallback: f64) -> f64 {
    rc_get(key).and_then(|v| v.as_f64()).unwrap_or(fallback)
}

pub fn rc_bool(key: &str, fallback: bool) -> bool {
    rc_get(key).and_then(|v| v.as_bool()).unwrap_or(fallback)
}

/// Sorted list of settable keys.
pub fn rc_keys() -> Vec<String> {
    let mut keys: Vec<String> = read().keys().cloned().collect();
    keys.sort();
    keys
}

/// Scoped override of rc parameters.
///
/// Holds the values that were replaced; dropping the guard writes them back,
/// whichever way the scope is left.
#[derive(Debug)]
#[must_use = "rc overrides are reverted as soon as the guard is dropped"]
pub struct TempRc {
    saved: ConfigMap,
}

impl TempRc {
    /// Validate every key, then apply all overrides.
    pub fn apply(overrides: ConfigMap) -> DispatchResult<Self> {
        let mut params = write();

        for key in overrides.keys() {
            if !params.contains_key(key) {
                let mut allowed: Vec<&str> = params.keys().map(String::as_str).collect();
                allowed.sort_unstable();
                return Err(DispatchError::unknown_operation("rc", key, &allowed));
            }
        }

        let mut saved = ConfigMap::new();
        for (key, value) in overrides {
            debug!(key = %key, value = %value, "rc override");
            if let Some(previous) = params.insert(key.clone(), value) {
                saved.insert(key, previous);
            }
        }

        Ok(Self { saved })
    }

    /// Keys this guard will restore.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.saved.keys().map(String::as_str)
    }
}

impl Drop for TempRc {
    fn drop(&mut self) {
        let mut params = write();
        for (key, value) in std::mem::take(&mut self.saved) {
            debug!(key = %key, "rc revert");
            params.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn overrides(value: Value) -> ConfigMap {
        value.as_object().cloned().unwrap()
    }

    // Each test touches its own key: the registry is shared across test threads.

    #[test]
    fn test_override_is_scoped() {
        assert_eq!(rc_str("legend.loc", "?"), "best");
        {
            let guard = TempRc::apply(overrides(json!({"legend.loc": "upper right"}))).unwrap();
            assert_eq!(rc_str("legend.loc", "?"), "upper right");
            assert_eq!(guard.keys().collect::<Vec<_>>(), vec!["legend.loc"]);
        }
        assert_eq!(rc_str("legend.loc", "?"), "best");
    }

    #[test]
    fn test_unknown_key_applies_nothing() {
        let err = TempRc::apply(overrides(json!({"font.size": 20.0, "font.sise": 12}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownOperation);
        assert_eq!(err.key.as_deref(), Some("font.sise"));
        assert_eq!(rc_f64("font.size", 0.0), 10.0);
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let outer = TempRc::apply(overrides(json!({"image.cmap": "jet"}))).unwrap();
        let inner = TempRc::apply(overrides(json!({"image.cmap": "gray"}))).unwrap();
        assert_eq!(rc_str("image.cmap", "?"), "gray");
        drop(inner);
        assert_eq!(rc_str("image.cmap", "?"), "jet");
        drop(outer);
        assert_eq!(rc_str("image.cmap", "?"), "viridis");
    }

    #[test]
    fn test_keys_are_sorted() {
        let keys = rc_keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"figure.dpi".to_string()));
    }
}
