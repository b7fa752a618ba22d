//! The configurer contract and the configuration pass.

use super::binding::{Binding, BindingTable};
use super::params::{CallArgs, ConfigMap, ParamSpec, resolve};
use crate::config::names::{BRANCH, INIT};
use crate::error::{DispatchError, DispatchResult, ErrorCode};
use serde_json::Value;
use tracing::debug;

/// A configurable view of some target type.
///
/// Configurers are zero-sized markers; several may exist for one target type
/// (the axes are configured both as a plotting area and as a pair of axis lines).
pub trait Configurer {
    type Target: 'static;

    /// Label used in logs and errors.
    const KIND: &'static str;

    fn direct_bindings() -> &'static BindingTable<Self::Target>;

    fn branch_bindings() -> Option<&'static BindingTable<Self::Target>> {
        None
    }

    /// Construct the working target from an `init` call, replacing `target`.
    fn init(_target: &mut Self::Target, _call: CallArgs) -> DispatchResult<()> {
        Err(DispatchError::new(
            ErrorCode::TypeMismatch,
            format!("{} has no construction step; {:?} is not accepted", Self::KIND, INIT),
        )
        .with_key(INIT))
    }
}

/// Run every key of `config` against `table`.
///
/// All keys are validated before the first operation runs. Keys are then
/// applied in document order.
pub fn dispatch<T>(target: &mut T, table: &BindingTable<T>, config: ConfigMap) -> DispatchResult<()> {
    table.validate(&config)?;

    for (key, value) in config {
        let Some(binding) = table.get(&key) else {
            return Err(DispatchError::unknown_operation(table.target(), &key, &table.keys()));
        };
        debug!(target_kind = table.target(), key = %key, kind = ?binding, "dispatch");

        match binding {
            Binding::Direct(op) => {
                resolve(ParamSpec::from(value), &mut |call: CallArgs| op(target, call))?;
            }
            Binding::Branch(delegate) => {
                if !matches!(value, Value::Object(_) | Value::Array(_)) {
                    return Err(DispatchError::type_mismatch(&key, "a configuration mapping", &value));
                }
                resolve(ParamSpec::from(value), &mut |call: CallArgs| {
                    delegate(target, call.into_config(&key)?)
                })?;
            }
        }
    }

    Ok(())
}

/// Configure `target` through the configurer `C`.
///
/// Lifecycle: validate all keys of this level, resolve `init` (which may
/// replace the target), dispatch the `branch` mapping, then the direct keys.
pub fn configure<C: Configurer>(target: &mut C::Target, mut config: ConfigMap) -> DispatchResult<()> {
    let init = config.shift_remove(INIT);
    let branch = match config.shift_remove(BRANCH) {
        None => None,
        Some(Value::Object(branch)) => Some(branch),
        Some(other) => return Err(DispatchError::type_mismatch(BRANCH, "a mapping", &other)),
    };

    if let Some(ref branch) = branch {
        match C::branch_bindings() {
            Some(table) => table.validate(branch)?,
            None => {
                if let Some(key) = branch.keys().next() {
                    return Err(DispatchError::unknown_operation(C::KIND, key, &[])
                        .with_details(format!("{} has no branch operations", C::KIND)));
                }
            }
        }
    }
    C::direct_bindings().validate(&config)?;

    if let Some(init) = init {
        construct::<C>(target, init)?;
    }

    if let Some(branch) = branch {
        if let Some(table) = C::branch_bindings() {
            dispatch(target, table, branch)?;
        }
    }

    dispatch(target, C::direct_bindings(), config)
}

/// Resolve `init` against the configurer's construction step.
fn construct<C: Configurer>(target: &mut C::Target, init: Value) -> DispatchResult<()> {
    if !matches!(init, Value::Object(_) | Value::Array(_)) {
        return Err(DispatchError::type_mismatch(INIT, "a mapping or a sequence", &init));
    }
    debug!(target_kind = C::KIND, "init");
    resolve(ParamSpec::from(init), &mut |call: CallArgs| C::init(target, call))?;
    Ok(())
}
