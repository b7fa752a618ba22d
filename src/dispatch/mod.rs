//! Configuration dispatch engine.
//!
//! A document is applied to a target by a [`Configurer`]: each key of the
//! document is looked up in the configurer's [`BindingTable`] and either called
//! directly with resolved arguments or delegated, as a nested document, to a
//! child object's own configurer.
//!
//! ## Reserved keys
//! - `init` - construct the working target before anything else
//! - `branch` - delegations, dispatched before direct operations
//! - `args` - positional arguments inside a parameter mapping

mod args;
mod binding;
mod configure;
mod params;

pub use args::BoundArgs;
pub use binding::{Binding, BindingTable, BranchFn, DirectFn};
pub use configure::{Configurer, configure, dispatch};
pub use params::{CallArgs, ConfigMap, ParamSpec, resolve, resolve_value};
