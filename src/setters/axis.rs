//! Axis lines and spines.
//!
//! Reached from an axes' `branch.axis` entry:
//!
//! ```yaml
//! branch:
//!   axis:
//!     spines:
//!       top: {set_visible: false}
//!     xaxis:
//!       set_ticks_position: bottom
//! ```

use super::color_value;
use crate::dispatch::{BindingTable, CallArgs, Configurer, configure};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::{AxisLine, Axes, Spine, Spines};
use serde_json::Value;
use std::sync::LazyLock;

/// The axes seen as its spines and axis lines.
pub struct AxisSetter;

impl Configurer for AxisSetter {
    type Target = Axes;
    const KIND: &'static str = "axis";

    fn direct_bindings() -> &'static BindingTable<Axes> {
        static TABLE: LazyLock<BindingTable<Axes>> = LazyLock::new(|| {
            BindingTable::<Axes>::new("axis")
                .branch("spines", |axes, config| configure::<SpinesSetter>(&mut axes.spines, config))
                .branch("xaxis", |axes, config| configure::<XyAxisSetter>(&mut axes.xaxis, config))
                .branch("yaxis", |axes, config| configure::<XyAxisSetter>(&mut axes.yaxis, config))
        });
        &TABLE
    }
}

pub struct SpinesSetter;

impl Configurer for SpinesSetter {
    type Target = Spines;
    const KIND: &'static str = "spines";

    fn direct_bindings() -> &'static BindingTable<Spines> {
        static TABLE: LazyLock<BindingTable<Spines>> = LazyLock::new(|| {
            BindingTable::<Spines>::new("spines")
                .branch("top", |spines, config| configure::<SpineSetter>(&mut spines.top, config))
                .branch("bottom", |spines, config| configure::<SpineSetter>(&mut spines.bottom, config))
                .branch("left", |spines, config| configure::<SpineSetter>(&mut spines.left, config))
                .branch("right", |spines, config| configure::<SpineSetter>(&mut spines.right, config))
        });
        &TABLE
    }
}

pub struct SpineSetter;

impl Configurer for SpineSetter {
    type Target = Spine;
    const KIND: &'static str = "spine";

    fn direct_bindings() -> &'static BindingTable<Spine> {
        static TABLE: LazyLock<BindingTable<Spine>> = LazyLock::new(|| {
            BindingTable::new("spine")
                .direct("set_visible", spine_visible)
                .direct("set_position", spine_position)
                .direct("set_color", spine_color)
                .direct("set_linestyle", spine_linestyle)
        });
        &TABLE
    }
}

fn spine_visible(spine: &mut Spine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_visible", &["b"])?;
    spine.visible = args.required("b")?;
    args.finish()
}

/// `center`, `zero`, or a `(type, amount)` pair with type outward/axes/data.
fn spine_position(spine: &mut Spine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_position", &["position"])?;
    let position = args.take_value("position").ok_or_else(|| {
        DispatchError::invalid_argument("set_position", "set_position missing required argument \"position\"")
    })?;
    let valid = match &position {
        Value::String(s) => matches!(s.as_str(), "center" | "zero"),
        Value::Array(pair) => {
            pair.len() == 2
                && matches!(pair[0].as_str(), Some("outward" | "axes" | "data"))
                && pair[1].is_number()
        }
        _ => false,
    };
    if !valid {
        return Err(DispatchError::invalid_argument(
            "set_position",
            format!("unrecognised spine position {}", position),
        ));
    }
    spine.position = Some(position);
    args.finish()
}

fn spine_color(spine: &mut Spine, call: CallArgs) -> DispatchResult<()> {
    spine.color = super::color_op("set_color", call)?;
    Ok(())
}

fn spine_linestyle(spine: &mut Spine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_linestyle", &["ls"])?;
    let style: String = args.required("ls")?;
    spine.linestyle = match style.as_str() {
        "-" => "solid".to_string(),
        "--" => "dashed".to_string(),
        "-." => "dashdot".to_string(),
        ":" => "dotted".to_string(),
        "solid" | "dashed" | "dashdot" | "dotted" | "none" => style,
        other => {
            return Err(DispatchError::invalid_argument(
                "set_linestyle",
                format!("unknown line style {:?}", other),
            ));
        }
    };
    args.finish()
}

/// One axis line (`xaxis` or `yaxis`).
pub struct XyAxisSetter;

impl Configurer for XyAxisSetter {
    type Target = AxisLine;
    const KIND: &'static str = "xyaxis";

    fn direct_bindings() -> &'static BindingTable<AxisLine> {
        static TABLE: LazyLock<BindingTable<AxisLine>> = LazyLock::new(|| {
            BindingTable::new("xyaxis")
                .direct("set_inverted", set_inverted)
                .direct("set_ticks_position", set_ticks_position)
                .direct("set_label_position", set_label_position)
                .direct("set_label_coords", set_label_coords)
                .direct("set_label_text", set_label_text)
                .direct("set_tick_params", set_tick_params)
        });
        &TABLE
    }
}

const TICK_POSITIONS: &[&str] = &["top", "bottom", "left", "right", "both", "default", "none"];

fn set_inverted(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_inverted", &["inverted"])?;
    line.inverted = args.required("inverted")?;
    args.finish()
}

fn position(op: &'static str, call: CallArgs) -> DispatchResult<String> {
    let mut args = call.bind(op, &["position"])?;
    let position: String = args.required("position")?;
    args.finish()?;
    if TICK_POSITIONS.contains(&position.as_str()) {
        Ok(position)
    } else {
        Err(DispatchError::invalid_argument(
            op,
            format!("{} must be one of {}, got {:?}", op, TICK_POSITIONS.join(", "), position),
        ))
    }
}

fn set_ticks_position(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    line.ticks_position = position("set_ticks_position", call)?;
    Ok(())
}

fn set_label_position(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    line.label_position = position("set_label_position", call)?;
    Ok(())
}

fn set_label_coords(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_label_coords", &["x", "y"])?;
    let x: f64 = args.required("x")?;
    let y: f64 = args.required("y")?;
    line.label_coords = Some((x, y));
    args.finish()
}

fn set_label_text(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    let text = super::text_op("set_label_text", call)?;
    line.label_text = Some(text.text);
    Ok(())
}

fn set_tick_params(line: &mut AxisLine, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_tick_params", &[])?;
    if let Some(color) = args.take_value("color") {
        line.tick_color = color_value("set_tick_params", color)?;
    }
    line.tick_params.extend(args.rest());
    Ok(())
}
