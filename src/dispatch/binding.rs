//! Binding tables: the operations a configurer exposes, keyed by name.

use super::params::{CallArgs, ConfigMap};
use crate::error::{DispatchError, DispatchResult};

/// Operation applied to the target with resolved arguments.
pub type DirectFn<T> = fn(&mut T, CallArgs) -> DispatchResult<()>;

/// Delegation of a configuration sub-tree to a child of the target.
pub type BranchFn<T> = fn(&mut T, ConfigMap) -> DispatchResult<()>;

/// One entry of a binding table.
pub enum Binding<T> {
    Direct(DirectFn<T>),
    Branch(BranchFn<T>),
}

// Manual impls: fn pointers are Copy for any T, derives would require T: Copy.
impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Binding<T> {}

impl<T> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Direct(_) => write!(f, "Direct"),
            Binding::Branch(_) => write!(f, "Branch"),
        }
    }
}

/// Ordered map from operation key to binding.
///
/// Tables are built once per configurer and stored in a `LazyLock`; the target
/// is passed to every call, so a table never captures instance state.
#[derive(Debug)]
pub struct BindingTable<T> {
    target: &'static str,
    entries: Vec<(&'static str, Binding<T>)>,
}

impl<T> BindingTable<T> {
    pub fn new(target: &'static str) -> Self {
        Self {
            target,
            entries: Vec::new(),
        }
    }

    pub fn direct(mut self, key: &'static str, op: DirectFn<T>) -> Self {
        self.insert(key, Binding::Direct(op));
        self
    }

    pub fn branch(mut self, key: &'static str, delegate: BranchFn<T>) -> Self {
        self.insert(key, Binding::Branch(delegate));
        self
    }

    fn insert(&mut self, key: &'static str, binding: Binding<T>) {
        debug_assert!(
            self.get(key).is_none(),
            "duplicate binding {:?} in {}",
            key,
            self.target
        );
        self.entries.push((key, binding));
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn get(&self, key: &str) -> Option<Binding<T>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, binding)| *binding)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    /// Check every key of `config` before anything is invoked.
    pub fn validate(&self, config: &ConfigMap) -> DispatchResult<()> {
        for key in config.keys() {
            if self.get(key).is_none() {
                return Err(DispatchError::unknown_operation(
                    self.target,
                    key,
                    &self.keys(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    struct Counter(u32);

    fn bump(counter: &mut Counter, _call: CallArgs) -> DispatchResult<()> {
        counter.0 += 1;
        Ok(())
    }

    fn table() -> BindingTable<Counter> {
        BindingTable::new("counter")
            .direct("bump", bump)
            .branch("child", |_, _| Ok(()))
    }

    #[test]
    fn test_lookup_and_kind() {
        let table = table();
        assert!(matches!(table.get("bump"), Some(Binding::Direct(_))));
        assert!(matches!(table.get("child"), Some(Binding::Branch(_))));
        assert!(table.get("missing").is_none());
        assert_eq!(table.keys(), vec!["bump", "child"]);
    }

    #[test]
    fn test_direct_binding_calls_through() {
        let mut counter = Counter(0);
        if let Some(Binding::Direct(op)) = table().get("bump") {
            op(&mut counter, CallArgs::default()).unwrap();
        }
        assert_eq!(counter.0, 1);
    }

    #[test]
    fn test_validate_reports_unknown_key() {
        let config = json!({"bump": 1, "bmup": 2}).as_object().cloned().unwrap();
        let err = table().validate(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownOperation);
        assert_eq!(err.key.as_deref(), Some("bmup"));
        assert!(err.details.unwrap().contains("bump, child"));
    }
}
