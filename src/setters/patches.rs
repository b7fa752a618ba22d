//! Geometric patches added through an axes' `branch.patches`.

use super::non_negative;
use crate::dispatch::{BindingTable, BoundArgs, CallArgs, Configurer};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::{Artist, Axes, Patch};
use std::sync::LazyLock;

pub struct PatchSetter;

impl Configurer for PatchSetter {
    type Target = Axes;
    const KIND: &'static str = "patches";

    fn direct_bindings() -> &'static BindingTable<Axes> {
        static TABLE: LazyLock<BindingTable<Axes>> = LazyLock::new(|| {
            BindingTable::new("patches")
                .direct("circle", circle)
                .direct("ellipse", ellipse)
                .direct("rectangle", rectangle)
                .direct("arc", arc)
                .direct("wedge", wedge)
        });
        &TABLE
    }
}

/// Centre given as `xy` or `center`.
fn center(args: &mut BoundArgs) -> DispatchResult<(f64, f64)> {
    args.optional_alias(&["xy", "center"])?.ok_or_else(|| {
        DispatchError::invalid_argument(args.op(), format!("{} missing required argument \"xy\"", args.op()))
    })
}

fn length(args: &mut BoundArgs, name: &str) -> DispatchResult<f64> {
    let value: f64 = args.required(name)?;
    non_negative(args, name, value)
}

fn circle(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("circle", &["xy", "radius"])?;
    let center = center(&mut args)?;
    let radius: f64 = args.or("radius", 5.0)?;
    let radius = non_negative(&args, "radius", radius)?;
    axes.artists.push(Artist::Patch(Patch::Circle { center, radius, style: args.rest() }));
    Ok(())
}

fn ellipse(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("ellipse", &["xy", "width", "height", "angle"])?;
    let center = center(&mut args)?;
    let width = length(&mut args, "width")?;
    let height = length(&mut args, "height")?;
    let angle: f64 = args.or("angle", 0.0)?;
    axes.artists.push(Artist::Patch(Patch::Ellipse { center, width, height, angle, style: args.rest() }));
    Ok(())
}

fn rectangle(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("rectangle", &["xy", "width", "height", "angle"])?;
    let xy: (f64, f64) = args.required("xy")?;
    let width = length(&mut args, "width")?;
    let height = length(&mut args, "height")?;
    let angle: f64 = args.or("angle", 0.0)?;
    axes.artists.push(Artist::Patch(Patch::Rectangle { xy, width, height, angle, style: args.rest() }));
    Ok(())
}

fn arc(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("arc", &["xy", "width", "height", "angle", "theta1", "theta2"])?;
    let center = center(&mut args)?;
    let width = length(&mut args, "width")?;
    let height = length(&mut args, "height")?;
    let angle: f64 = args.or("angle", 0.0)?;
    let theta1: f64 = args.or("theta1", 0.0)?;
    let theta2: f64 = args.or("theta2", 360.0)?;
    axes.artists.push(Artist::Patch(Patch::Arc {
        center,
        width,
        height,
        angle,
        theta1,
        theta2,
        style: args.rest(),
    }));
    Ok(())
}

fn wedge(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("wedge", &["center", "r", "theta1", "theta2", "width"])?;
    let center = center(&mut args)?;
    let r = length(&mut args, "r")?;
    let theta1: f64 = args.required("theta1")?;
    let theta2: f64 = args.required("theta2")?;
    let width: Option<f64> = args.optional("width")?;
    if let Some(w) = width {
        if !(0.0..=r).contains(&w) {
            return Err(DispatchError::invalid_argument(
                "wedge",
                format!("wedge width must be within 0-{}, got {}", r, w),
            ));
        }
    }
    axes.artists.push(Artist::Patch(Patch::Wedge { center, r, theta1, theta2, width, style: args.rest() }));
    Ok(())
}
