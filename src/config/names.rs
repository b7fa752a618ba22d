//! Reserved structural keys of a configuration document.
//!
//! These keys shape the tree and are never resolved as operations.

/// Positional arguments of a parameter mapping.
pub const ARGS: &str = "args";
/// Construction step of a configurer; resolved before anything else.
pub const INIT: &str = "init";
/// Delegation sub-mapping; dispatched before direct operations.
pub const BRANCH: &str = "branch";
/// Per-region configuration list of a region builder.
pub const AXES: &str = "axes";

// Top-level director keys
pub const SET_RC: &str = "set_rc";
pub const SET_FIG: &str = "set_fig";
pub const SUBPLOT: &str = "subplot";
pub const SUBPLOT2GRID: &str = "subplot2grid";
pub const ADD_AXES: &str = "add_axes";

/// Every key the director accepts at the top of a document.
pub const DIRECTOR_KEYS: &[&str] = &[SET_RC, AXES, SUBPLOT, SUBPLOT2GRID, ADD_AXES, SET_FIG];
