//! Configurers for scene objects.
//!
//! Each configurer is a marker type implementing [`Configurer`]: its binding
//! tables name the operations a document may use on that object.
//!
//! | Configurer          | Target      | Reached from                        |
//! |---------------------|-------------|-------------------------------------|
//! | [`FigureSetter`]    | `Figure`    | director `set_fig`                  |
//! | [`AxesSetter`]      | `Axes`      | region builders, colour bar `ax`    |
//! | [`AxisSetter`]      | `Axes`      | axes `branch.axis`                  |
//! | [`SpinesSetter`]    | `Spines`    | axis `spines`                       |
//! | [`SpineSetter`]     | `Spine`     | spines `top`/`bottom`/`left`/`right`|
//! | [`XyAxisSetter`]    | `AxisLine`  | axis `xaxis`/`yaxis`                |
//! | [`PatchSetter`]     | `Axes`      | axes `branch.patches`               |
//! | [`ContourPlot`]     | draft       | axes `branch.contourf`              |
//! | [`ColorbarSetter`]  | `Colorbar`  | contour `cbar`                      |
//! | [`ColormapSetter`]  | `Colormap`  | contour `init.cmap`                 |

mod axes;
mod axis;
mod contour;
mod figure;
mod patches;

pub use axes::AxesSetter;
pub use axis::{AxisSetter, SpineSetter, SpinesSetter, XyAxisSetter};
pub use contour::{ColorbarSetter, ColormapSetter, ContourDraft, ContourPlot, build_colormap};
pub use figure::FigureSetter;
pub use patches::PatchSetter;

use crate::dispatch::{BindingTable, BoundArgs, CallArgs, Configurer};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::{Legend, Text};
use serde_json::Value;

/// Keys of every configurer, for introspection.
pub fn catalog() -> Vec<(&'static str, Vec<&'static str>, Vec<&'static str>)> {
    fn entry<C: Configurer>() -> (&'static str, Vec<&'static str>, Vec<&'static str>) {
        (
            C::KIND,
            C::direct_bindings().keys(),
            C::branch_bindings().map(BindingTable::keys).unwrap_or_default(),
        )
    }

    vec![
        entry::<FigureSetter>(),
        entry::<AxesSetter>(),
        entry::<AxisSetter>(),
        entry::<SpinesSetter>(),
        entry::<SpineSetter>(),
        entry::<XyAxisSetter>(),
        entry::<PatchSetter>(),
        entry::<ContourPlot>(),
        entry::<ColorbarSetter>(),
        entry::<ColormapSetter>(),
    ]
}

/// Render a label-like value as text. Numbers and booleans are accepted.
pub(crate) fn text_value(op: &'static str, value: Value) -> DispatchResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(DispatchError::invalid_argument(
            op,
            format!("{} expects text, got {}", op, crate::error::value_kind(&other)),
        )),
    }
}

/// Colours are names, hex strings or RGB(A) tuples.
pub(crate) fn color_value(op: &'static str, value: Value) -> DispatchResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Array(items) if (3..=4).contains(&items.len()) && items.iter().all(Value::is_number) => {
            let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
            Ok(format!("({})", parts.join(", ")))
        }
        other => Err(DispatchError::invalid_argument(
            op,
            format!("{} expects a colour, got {}", op, other),
        )),
    }
}

/// `op(label, **style)`: a text element.
pub(crate) fn text_op(op: &'static str, call: CallArgs) -> DispatchResult<Text> {
    let mut args = call.bind(op, &["label"])?;
    let label = args.take_value("label").ok_or_else(|| {
        DispatchError::invalid_argument(op, format!("{} missing required argument \"label\"", op))
    })?;
    let text = text_value(op, label)?;
    Ok(Text::new(text, args.rest()))
}

/// `op(value)`: a single colour argument.
pub(crate) fn color_op(op: &'static str, call: CallArgs) -> DispatchResult<String> {
    let mut args = call.bind(op, &["color"])?;
    let color = args.take_value("color").ok_or_else(|| {
        DispatchError::invalid_argument(op, format!("{} missing required argument \"color\"", op))
    })?;
    let color = color_value(op, color)?;
    args.finish()?;
    Ok(color)
}

/// `legend(labels=None, loc=..., **style)`.
pub(crate) fn legend_op(call: CallArgs, default_loc: String) -> DispatchResult<Legend> {
    let mut args = call.bind("legend", &["labels", "loc"])?;
    let labels: Option<Vec<String>> = args.optional("labels")?;
    let loc = args.or("loc", default_loc)?;
    Ok(Legend {
        loc,
        labels,
        style: args.rest(),
    })
}

/// Non-negative finite number.
pub(crate) fn non_negative(args: &BoundArgs, name: &str, value: f64) -> DispatchResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DispatchError::invalid_argument(
            args.op(),
            format!("{} argument {:?} must be a non-negative number, got {}", args.op(), name, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_value_accepts_numbers() {
        assert_eq!(text_value("xlabel", json!(123)).unwrap(), "123");
        assert!(text_value("xlabel", json!([1])).is_err());
    }

    #[test]
    fn test_color_value_forms() {
        assert_eq!(color_value("c", json!("k")).unwrap(), "k");
        assert_eq!(color_value("c", json!([1, 0, 0])).unwrap(), "(1, 0, 0)");
        assert!(color_value("c", json!([1, 0])).is_err());
    }

    #[test]
    fn test_text_op_keeps_style() {
        let call = CallArgs::from_mapping(json!({"args": "SIN(X)", "loc": "left"}).as_object().cloned().unwrap());
        let text = text_op("title", call).unwrap();
        assert_eq!(text.text, "SIN(X)");
        assert_eq!(text.style.get("loc"), Some(&json!("left")));
    }

    #[test]
    fn test_catalog_covers_every_configurer() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 10);
        let axes = catalog.iter().find(|(kind, _, _)| *kind == "axes").unwrap();
        assert!(axes.1.contains(&"title"));
        assert_eq!(axes.2, vec!["contourf", "patches", "axis"]);
    }
}
