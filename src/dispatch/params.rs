//! Parameter specs and the uniform calling convention.
//!
//! Every operation in a document, direct or branch, is invoked through
//! [`resolve`]. The shape of the value decides how the call is made:
//!
//! | Value    | Spec                | Calls                                        |
//! |----------|---------------------|----------------------------------------------|
//! | mapping  | [`ParamSpec::Call`] | once, `args` as positionals, rest as named   |
//! | sequence | `Repeated`          | once per element, results discarded          |
//! | other    | `Scalar`            | once, with the value as the only positional  |

use crate::config::names::ARGS;
use crate::error::{DispatchError, DispatchResult};
use serde_json::{Map, Value};

/// A configuration mapping.
pub type ConfigMap = Map<String, Value>;

/// Positional and named arguments of a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub named: ConfigMap,
}

impl CallArgs {
    /// A call with one positional argument.
    pub fn scalar(value: Value) -> Self {
        Self {
            positional: vec![value],
            named: Map::new(),
        }
    }

    /// Split a parameter mapping into positionals and named arguments.
    ///
    /// A sequence under `args` is spliced; any other value is a single positional.
    pub fn from_mapping(mut mapping: ConfigMap) -> Self {
        let positional = match mapping.shift_remove(ARGS) {
            Some(Value::Array(items)) => items,
            Some(value) => vec![value],
            None => Vec::new(),
        };
        Self {
            positional,
            named: mapping,
        }
    }

    /// Convert into a configuration mapping for a delegate pass.
    ///
    /// Delegates only take named configuration; positionals mean the document
    /// used the wrong shape for `key`.
    pub fn into_config(self, key: &str) -> DispatchResult<ConfigMap> {
        if let Some(first) = self.positional.first() {
            return Err(DispatchError::type_mismatch(
                key,
                "a configuration mapping without positional arguments",
                first,
            ));
        }
        Ok(self.named)
    }
}

/// Tagged form of a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpec {
    Call(CallArgs),
    Repeated(Vec<ParamSpec>),
    Scalar(Value),
}

impl From<Value> for ParamSpec {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mapping) => ParamSpec::Call(CallArgs::from_mapping(mapping)),
            Value::Array(items) => ParamSpec::Repeated(items.into_iter().map(ParamSpec::from).collect()),
            scalar => ParamSpec::Scalar(scalar),
        }
    }
}

/// Invoke `op` according to `spec`.
///
/// Returns the operation's result for a single call and `None` for a repeated
/// spec: repetition is fire-and-forget, one call per element in order.
pub fn resolve<R, F>(spec: ParamSpec, op: &mut F) -> DispatchResult<Option<R>>
where
    F: FnMut(CallArgs) -> DispatchResult<R>,
{
    match spec {
        ParamSpec::Call(call) => op(call).map(Some),
        ParamSpec::Repeated(items) => {
            for item in items {
                resolve(item, op)?;
            }
            Ok(None)
        }
        ParamSpec::Scalar(value) => op(CallArgs::scalar(value)).map(Some),
    }
}

/// Shorthand for resolving a raw JSON value.
pub fn resolve_value<R, F>(value: Value, mut op: F) -> DispatchResult<Option<R>>
where
    F: FnMut(CallArgs) -> DispatchResult<R>,
{
    resolve(ParamSpec::from(value), &mut op)
}
