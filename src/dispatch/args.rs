//! Binding call arguments to an operation's parameter list.
//!
//! Operations declare their parameters by name, in positional order, much like
//! a function signature. Positionals fill the names left to right; named
//! arguments fill the rest. Typed extraction goes through serde.

use super::params::{CallArgs, ConfigMap};
use crate::error::{DispatchError, DispatchResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Arguments of one call, bound to parameter names.
#[derive(Debug, Clone)]
pub struct BoundArgs {
    op: &'static str,
    values: ConfigMap,
}

impl CallArgs {
    /// Bind positionals to `params` in order and merge in the named arguments.
    pub fn bind(self, op: &'static str, params: &[&str]) -> DispatchResult<BoundArgs> {
        if self.positional.len() > params.len() {
            return Err(DispatchError::invalid_argument(
                op,
                format!(
                    "{} takes at most {} positional argument(s) but {} were given",
                    op,
                    params.len(),
                    self.positional.len()
                ),
            ));
        }

        let mut values = ConfigMap::new();
        for (name, value) in params.iter().zip(self.positional) {
            values.insert((*name).to_string(), value);
        }
        for (name, value) in self.named {
            if values.contains_key(&name) {
                return Err(DispatchError::invalid_argument(
                    op,
                    format!("{} got multiple values for argument {:?}", op, name),
                ));
            }
            values.insert(name, value);
        }

        Ok(BoundArgs { op, values })
    }
}

impl BoundArgs {
    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn contains(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(v) if !v.is_null())
    }

    /// Remove a raw value; null counts as absent.
    pub fn take_value(&mut self, name: &str) -> Option<Value> {
        match self.values.shift_remove(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> DispatchResult<T> {
        let value = self.take_value(name).ok_or_else(|| {
            DispatchError::invalid_argument(
                self.op,
                format!("{} missing required argument {:?}", self.op, name),
            )
        })?;
        self.convert(name, value)
    }

    pub fn optional<T: DeserializeOwned>(&mut self, name: &str) -> DispatchResult<Option<T>> {
        match self.take_value(name) {
            Some(value) => self.convert(name, value).map(Some),
            None => Ok(None),
        }
    }

    pub fn or<T: DeserializeOwned>(&mut self, name: &str, default: T) -> DispatchResult<T> {
        Ok(self.optional(name)?.unwrap_or(default))
    }

    /// First present name among aliases, e.g. `color` / `c`.
    pub fn optional_alias<T: DeserializeOwned>(&mut self, names: &[&str]) -> DispatchResult<Option<T>> {
        let mut found = None;
        for name in names {
            if let Some(value) = self.optional(name)? {
                if found.is_some() {
                    return Err(DispatchError::invalid_argument(
                        self.op,
                        format!("{} got aliases {:?} more than once", self.op, names),
                    ));
                }
                found = Some(value);
            }
        }
        Ok(found)
    }

    /// Remaining named arguments, passed through as style properties.
    pub fn rest(self) -> ConfigMap {
        self.values.into_iter().filter(|(_, v)| !v.is_null()).collect()
    }

    /// Fail if any argument was not consumed.
    pub fn finish(self) -> DispatchResult<()> {
        let op = self.op;
        let leftover: Vec<String> = self.rest().into_iter().map(|(k, _)| k).collect();
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::invalid_argument(
                op,
                format!("{} got unexpected argument(s): {}", op, leftover.join(", ")),
            ))
        }
    }

    fn convert<T: DeserializeOwned>(&self, name: &str, value: Value) -> DispatchResult<T> {
        serde_json::from_value(value).map_err(|e| {
            DispatchError::invalid_argument(self.op, format!("{} argument {:?}: {}", self.op, name, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::dispatch::params::ParamSpec;
    use serde_json::json;

    fn call(value: Value) -> CallArgs {
        match ParamSpec::from(value) {
            ParamSpec::Call(call) => call,
            ParamSpec::Scalar(value) => CallArgs::scalar(value),
            ParamSpec::Repeated(_) => panic!("repeated spec"),
        }
    }

    #[test]
    fn test_positionals_fill_names_in_order() {
        let mut bound = call(json!({"args": ["title", "left"], "pad": 4}))
            .bind("title", &["label", "loc"])
            .unwrap();
        assert_eq!(bound.required::<String>("label").unwrap(), "title");
        assert_eq!(bound.required::<String>("loc").unwrap(), "left");
        assert_eq!(bound.optional::<f64>("pad").unwrap(), Some(4.0));
        bound.finish().unwrap();
    }

    #[test]
    fn test_too_many_positionals() {
        let err = call(json!({"args": [1, 2, 3]})).bind("xlim", &["left", "right"]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_duplicate_argument() {
        let err = call(json!({"args": ["a"], "label": "b"})).bind("xlabel", &["label"]).unwrap_err();
        assert!(err.message.contains("multiple values"));
    }

    #[test]
    fn test_missing_and_mistyped() {
        let mut bound = call(json!({"x": "zero"})).bind("axvline", &["x"]).unwrap();
        let err = bound.required::<f64>("x").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        let err = bound.required::<f64>("x").unwrap_err();
        assert!(err.message.contains("missing required"));
    }

    #[test]
    fn test_null_is_absent() {
        let mut bound = call(json!(null)).bind("legend", &["labels"]).unwrap();
        assert!(!bound.contains("labels"));
        assert_eq!(bound.optional::<Vec<String>>("labels").unwrap(), None);
    }

    #[test]
    fn test_aliases_and_rest() {
        let mut bound = call(json!({"c": "k", "ls": "--"})).bind("axhline", &["y"]).unwrap();
        assert_eq!(bound.optional_alias::<String>(&["color", "c"]).unwrap().as_deref(), Some("k"));
        assert_eq!(bound.rest().get("ls"), Some(&json!("--")));

        let mut bound = call(json!({"c": "k", "color": "r"})).bind("axhline", &["y"]).unwrap();
        assert!(bound.optional_alias::<String>(&["color", "c"]).is_err());
    }

    #[test]
    fn test_finish_reports_leftovers() {
        let bound = call(json!({"bogus": 1})).bind("grid", &["visible"]).unwrap();
        let err = bound.finish().unwrap_err();
        assert!(err.message.contains("bogus"));
    }
}
