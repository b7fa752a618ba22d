//! Figure-level operations (`set_fig`).

use super::{color_op, legend_op, non_negative, text_op};
use crate::dispatch::{BindingTable, CallArgs, Configurer};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::Figure;
use crate::scene::rc::rc_str;
use std::sync::LazyLock;

pub struct FigureSetter;

impl Configurer for FigureSetter {
    type Target = Figure;
    const KIND: &'static str = "figure";

    fn direct_bindings() -> &'static BindingTable<Figure> {
        static TABLE: LazyLock<BindingTable<Figure>> = LazyLock::new(|| {
            BindingTable::new("figure")
                .direct("height", set_height)
                .direct("width", set_width)
                .direct("edgecolor", set_edgecolor)
                .direct("frameon", set_frameon)
                .direct("facecolor", set_facecolor)
                .direct("dpi", set_dpi)
                .direct("alpha", set_alpha)
                .direct("legend", legend)
                .direct("title", suptitle)
        });
        &TABLE
    }
}

fn size(op: &'static str, call: CallArgs) -> DispatchResult<f64> {
    let mut args = call.bind(op, &["val", "forward"])?;
    let value: f64 = args.required("val")?;
    let _forward: Option<bool> = args.optional("forward")?;
    args.finish()?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DispatchError::invalid_argument(
            op,
            format!("{} must be a positive number of inches, got {}", op, value),
        ))
    }
}

fn set_height(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.height = size("height", call)?;
    Ok(())
}

fn set_width(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.width = size("width", call)?;
    Ok(())
}

fn set_edgecolor(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.edgecolor = color_op("edgecolor", call)?;
    Ok(())
}

fn set_facecolor(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.facecolor = color_op("facecolor", call)?;
    Ok(())
}

fn set_frameon(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("frameon", &["b"])?;
    figure.frameon = args.required("b")?;
    args.finish()
}

fn set_dpi(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("dpi", &["val"])?;
    let dpi: f64 = args.required("val")?;
    figure.dpi = non_negative(&args, "val", dpi)?;
    args.finish()
}

fn set_alpha(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("alpha", &["alpha"])?;
    let alpha: Option<f64> = args.optional("alpha")?;
    if let Some(a) = alpha {
        if !(0.0..=1.0).contains(&a) {
            return Err(DispatchError::invalid_argument("alpha", format!("alpha must be within 0-1, got {}", a)));
        }
    }
    figure.alpha = alpha;
    args.finish()
}

fn legend(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.legend = Some(legend_op(call, rc_str("legend.loc", "best"))?);
    Ok(())
}

fn suptitle(figure: &mut Figure, call: CallArgs) -> DispatchResult<()> {
    figure.suptitle = Some(text_op("title", call)?);
    Ok(())
}
