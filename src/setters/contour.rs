//! Filled contours, their colour bars and colour maps.
//!
//! A `contourf` branch entry is a small document of its own:
//!
//! ```yaml
//! contourf:
//!   init:
//!     args: [X, Y, Z]
//!     levels: 20
//!     cmap: {init: {name: chaos, colors: [black, red]}, set_over: r}
//!   cbar:
//!     init: {shrink: 0.8, orientation: horizontal}
//!     ax: {xlabel: depth}
//! ```
//!
//! The contour set is built into a [`ContourDraft`] first; the draft is
//! committed to the host axes only after the whole entry succeeded.

use super::AxesSetter;
use super::{color_op, color_value, non_negative};
use crate::config::names::INIT;
use crate::dispatch::{BindingTable, CallArgs, ConfigMap, Configurer, configure};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::colormap::DEFAULT_LUT_SIZE;
use crate::scene::rc::rc_str;
use crate::scene::{Artist, Axes, Colorbar, Colormap, ContourSet, Field, Placement};
use serde_json::Value;
use std::sync::LazyLock;

/// Number of level intervals when none are given.
const DEFAULT_LEVELS: usize = 7;

/// Upper bound on a level count.
const MAX_LEVELS: u64 = 1024;

const EXTEND_MODES: &[&str] = &["neither", "both", "min", "max"];

/// Work-in-progress contour plot for one axes.
#[derive(Debug, Default)]
pub struct ContourDraft {
    pub set: Option<ContourSet>,
    pub colorbars: Vec<Colorbar>,
}

impl ContourDraft {
    /// Move the contour set and its colour bars onto `axes`.
    pub fn commit(self, axes: &mut Axes) -> DispatchResult<()> {
        let Some(set) = self.set else {
            return Ok(());
        };
        axes.artists.push(Artist::Contour(set));
        axes
            .artists
            .extend(self.colorbars.into_iter().map(|cb| Artist::Colorbar(Box::new(cb))));
        Ok(())
    }
}

/// `contourf` as a nested builder: `init` draws, `cbar` adds colour bars.
pub struct ContourPlot;

impl Configurer for ContourPlot {
    type Target = ContourDraft;
    const KIND: &'static str = "contourf";

    fn direct_bindings() -> &'static BindingTable<ContourDraft> {
        static TABLE: LazyLock<BindingTable<ContourDraft>> =
            LazyLock::new(|| BindingTable::new("contourf").branch("cbar", add_colorbar));
        &TABLE
    }

    fn init(draft: &mut ContourDraft, call: CallArgs) -> DispatchResult<()> {
        draft.set = Some(contour_set("contourf", call)?);
        Ok(())
    }
}

fn add_colorbar(draft: &mut ContourDraft, config: ConfigMap) -> DispatchResult<()> {
    let Some(set) = &draft.set else {
        return Err(DispatchError::invalid_argument(
            "cbar",
            "cbar needs a contour set; give contourf an init entry",
        ));
    };
    let mut colorbar = Colorbar {
        levels: set.levels.clone(),
        cmap: set.cmap.clone(),
        orientation: "vertical".to_string(),
        shrink: 1.0,
        ticks: None,
        label: None,
        ax: Axes::new(Placement::Inset),
    };
    configure::<ColorbarSetter>(&mut colorbar, config)?;
    draft.colorbars.push(colorbar);
    Ok(())
}

/// Build a filled contour set from `(Z)`, `(Z, levels)`, `(X, Y, Z)` or
/// `(X, Y, Z, levels)` plus `levels`, `extend`, `cmap` and style arguments.
pub(crate) fn contour_set(op: &'static str, call: CallArgs) -> DispatchResult<ContourSet> {
    let params: &[&str] = if call.positional.len() <= 2 {
        &["z", "levels"]
    } else {
        &["x", "y", "z", "levels"]
    };
    let mut args = call.bind(op, params)?;

    let x: Option<Field> = args.optional("x")?;
    let y: Option<Field> = args.optional("y")?;
    let z: Field = args.required("z")?;
    let (rows, cols) = z.shape();
    if !z.is_rectangular() || rows == 0 || cols == 0 {
        return Err(DispatchError::invalid_argument(op, format!("{} needs a non-empty rectangular z grid", op)));
    }
    for (name, coords, expected) in [("x", &x, cols), ("y", &y, rows)] {
        if let Some(field) = coords {
            let fits = match field {
                Field::Row(values) => values.len() == expected,
                Field::Grid(_) => field.shape() == (rows, cols),
            };
            if !fits {
                return Err(DispatchError::invalid_argument(
                    op,
                    format!("{}: {} shape {:?} does not match z shape {:?}", op, name, field.shape(), (rows, cols)),
                ));
            }
        }
    }

    let levels = levels(op, args.take_value("levels"), &z)?;
    let extend: String = args.or("extend", "neither".to_string())?;
    if !EXTEND_MODES.contains(&extend.as_str()) {
        return Err(DispatchError::invalid_argument(
            op,
            format!("extend must be one of {}, got {:?}", EXTEND_MODES.join(", "), extend),
        ));
    }
    let cmap = match args.take_value("cmap") {
        Some(spec) => build_colormap(spec)?,
        None => Colormap::named(rc_str("image.cmap", "viridis")),
    };

    Ok(ContourSet { x, y, z, levels, extend, cmap, style: args.rest() })
}

/// Explicit increasing levels, or `n` intervals spread over the data range.
fn levels(op: &'static str, spec: Option<Value>, z: &Field) -> DispatchResult<Vec<f64>> {
    let intervals = match spec {
        Some(Value::Array(items)) => {
            let levels: Vec<f64> = serde_json::from_value(Value::Array(items))
                .map_err(|e| DispatchError::invalid_argument(op, format!("{} levels: {}", op, e)))?;
            if levels.windows(2).any(|w| w[0] >= w[1]) {
                return Err(DispatchError::invalid_argument(op, "contour levels must be increasing"));
            }
            return Ok(levels);
        }
        Some(Value::Number(n)) => match n.as_u64() {
            Some(n) if (1..=MAX_LEVELS).contains(&n) => n as usize,
            _ => {
                return Err(DispatchError::invalid_argument(
                    op,
                    format!("levels must be a count between 1 and {}, got {}", MAX_LEVELS, n),
                ));
            }
        },
        Some(other) => {
            return Err(DispatchError::invalid_argument(
                op,
                format!("levels must be a count or a sequence, got {}", crate::error::value_kind(&other)),
            ));
        }
        None => DEFAULT_LEVELS,
    };

    let (lo, hi) = z
        .range()
        .ok_or_else(|| DispatchError::invalid_argument(op, format!("{}: z has no finite values", op)))?;
    if lo == hi {
        return Ok(vec![lo]);
    }
    let step = (hi - lo) / intervals as f64;
    Ok((0..=intervals).map(|i| lo + step * i as f64).collect())
}

/// Colour bar of a contour set.
pub struct ColorbarSetter;

impl Configurer for ColorbarSetter {
    type Target = Colorbar;
    const KIND: &'static str = "colorbar";

    fn direct_bindings() -> &'static BindingTable<Colorbar> {
        static TABLE: LazyLock<BindingTable<Colorbar>> = LazyLock::new(|| {
            BindingTable::<Colorbar>::new("colorbar")
                .branch("ax", |cb, config| configure::<AxesSetter>(&mut cb.ax, config))
                .direct("set_label", set_label)
                .direct("set_ticks", set_ticks)
        });
        &TABLE
    }

    fn init(cb: &mut Colorbar, call: CallArgs) -> DispatchResult<()> {
        let mut args = call.bind("colorbar", &[])?;
        let shrink: f64 = args.or("shrink", cb.shrink)?;
        cb.shrink = non_negative(&args, "shrink", shrink)?;
        if let Some(ticks) = args.optional("ticks")? {
            cb.ticks = Some(ticks);
        }
        let orientation: String = args.or("orientation", cb.orientation.clone())?;
        if !matches!(orientation.as_str(), "vertical" | "horizontal") {
            return Err(DispatchError::invalid_argument(
                "colorbar",
                format!("orientation must be vertical or horizontal, got {:?}", orientation),
            ));
        }
        cb.orientation = orientation;
        if let Some(label) = args.optional("label")? {
            cb.label = Some(label);
        }
        args.finish()
    }
}

fn set_label(cb: &mut Colorbar, call: CallArgs) -> DispatchResult<()> {
    cb.label = Some(super::text_op("set_label", call)?.text);
    Ok(())
}

fn set_ticks(cb: &mut Colorbar, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_ticks", &["ticks"])?;
    cb.ticks = Some(args.required("ticks")?);
    args.finish()
}

/// Colour map from a name or a colour map document.
pub fn build_colormap(spec: Value) -> DispatchResult<Colormap> {
    match spec {
        Value::String(name) => {
            if Colormap::is_known_name(&name) {
                Ok(Colormap::named(name))
            } else {
                Err(DispatchError::invalid_argument("cmap", format!("unknown colour map {:?}", name)))
            }
        }
        Value::Object(document) => {
            match document.get(INIT) {
                Some(Value::Object(_)) => {}
                Some(other) => return Err(DispatchError::type_mismatch(INIT, "a mapping", other)),
                None => return Err(DispatchError::type_mismatch(INIT, "a mapping", &Value::Null)),
            }
            let mut cmap = Colormap::default();
            configure::<ColormapSetter>(&mut cmap, document)?;
            Ok(cmap)
        }
        other => Err(DispatchError::type_mismatch("cmap", "a colour map name or mapping", &other)),
    }
}

/// A linear segmented colour map.
pub struct ColormapSetter;

impl Configurer for ColormapSetter {
    type Target = Colormap;
    const KIND: &'static str = "colormap";

    fn direct_bindings() -> &'static BindingTable<Colormap> {
        static TABLE: LazyLock<BindingTable<Colormap>> = LazyLock::new(|| {
            BindingTable::new("colormap")
                .direct("set_under", set_under)
                .direct("under", set_under)
                .direct("set_over", set_over)
                .direct("over", set_over)
        });
        &TABLE
    }

    fn init(cmap: &mut Colormap, call: CallArgs) -> DispatchResult<()> {
        let mut args = call.bind("colormap", &["name", "colors", "N"])?;
        let method: String = args.or("method", "linear".to_string())?;
        if method != "linear" {
            return Err(DispatchError::invalid_argument(
                "colormap",
                format!("unsupported colour map method {:?}", method),
            ));
        }
        let name: String = args.required("name")?;
        let colors = args.take_value("colors").ok_or_else(|| {
            DispatchError::invalid_argument("colormap", "colormap missing required argument \"colors\"")
        })?;
        let colors: Vec<String> = match colors {
            Value::Array(items) if items.len() >= 2 => items
                .into_iter()
                .map(|c| color_value("colormap", c))
                .collect::<DispatchResult<_>>()?,
            other => {
                return Err(DispatchError::invalid_argument(
                    "colormap",
                    format!("colors must list at least two colours, got {}", other),
                ));
            }
        };
        let n: usize = args.or("N", DEFAULT_LUT_SIZE)?;
        if n < 2 {
            return Err(DispatchError::invalid_argument("colormap", format!("N must be at least 2, got {}", n)));
        }
        args.finish()?;
        *cmap = Colormap::from_list(name, colors, n);
        Ok(())
    }
}

fn set_under(cmap: &mut Colormap, call: CallArgs) -> DispatchResult<()> {
    cmap.under = Some(color_op("set_under", call)?);
    Ok(())
}

fn set_over(cmap: &mut Colormap, call: CallArgs) -> DispatchResult<()> {
    cmap.over = Some(color_op("set_over", call)?);
    Ok(())
}
