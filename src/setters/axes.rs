//! Operations on a plotting region.

use super::axis::AxisSetter;
use super::contour::{ContourDraft, ContourPlot, contour_set};
use super::patches::PatchSetter;
use super::{color_op, color_value, legend_op, text_op};
use crate::dispatch::{BindingTable, CallArgs, ConfigMap, Configurer, configure};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::rc::rc_str;
use crate::scene::{Artist, Aspect, Axes, Field, Grid, Limits};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

/// Configures an [`Axes`]: drawing calls, labels, limits and decorations.
pub struct AxesSetter;

impl Configurer for AxesSetter {
    type Target = Axes;
    const KIND: &'static str = "axes";

    fn direct_bindings() -> &'static BindingTable<Axes> {
        static TABLE: LazyLock<BindingTable<Axes>> = LazyLock::new(|| {
            BindingTable::new("axes")
                // Drawing
                .direct("contourf", contourf)
                .direct("streamplot", streamplot)
                .direct("plot", plot)
                .direct("scatter", scatter)
                .direct("fill", fill)
                // Labels and decorations
                .direct("title", title)
                .direct("xlabel", xlabel)
                .direct("ylabel", ylabel)
                .direct("xlim", xlim)
                .direct("ylim", ylim)
                .direct("legend", legend)
                .direct("text", text)
                .direct("annotate", annotate)
                .direct("grid", grid)
                // Reference lines and spans
                .direct("axhspan", axhspan)
                .direct("axvspan", axvspan)
                .direct("axhline", axhline)
                .direct("axvline", axvline)
                // Layout
                .direct("set_aspect", set_aspect)
                .direct("tick_params", tick_params)
                .direct("facecolor", facecolor)
        });
        &TABLE
    }

    fn branch_bindings() -> Option<&'static BindingTable<Axes>> {
        static TABLE: LazyLock<BindingTable<Axes>> = LazyLock::new(|| {
            BindingTable::new("axes.branch")
                .branch("contourf", draw_contourf)
                .branch("patches", |axes, config| configure::<PatchSetter>(axes, config))
                .branch("axis", |axes, config| configure::<AxisSetter>(axes, config))
        });
        Some(&TABLE)
    }
}

fn draw_contourf(axes: &mut Axes, config: ConfigMap) -> DispatchResult<()> {
    let mut draft = ContourDraft::default();
    configure::<ContourPlot>(&mut draft, config)?;
    draft.commit(axes)
}

fn contourf(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let set = contour_set("contourf", call)?;
    axes.artists.push(Artist::Contour(set));
    Ok(())
}

/// Split plot-style positionals: `(y)`, `(x, y)` or `(x, y, fmt)`.
fn xy_positionals(op: &'static str, mut positional: Vec<Value>) -> DispatchResult<(Vec<f64>, Vec<f64>, Option<String>)> {
    let fmt = match positional.last() {
        Some(Value::String(_)) if positional.len() > 1 => positional.pop().and_then(|v| v.as_str().map(String::from)),
        _ => None,
    };

    let series = |value: Value| -> DispatchResult<Vec<f64>> {
        serde_json::from_value(value)
            .map_err(|e| DispatchError::invalid_argument(op, format!("{} data must be a sequence of numbers: {}", op, e)))
    };

    let mut values = positional.into_iter();
    let (xs, ys) = match (values.next(), values.next(), values.next()) {
        (Some(y), None, None) => {
            let ys = series(y)?;
            ((0..ys.len()).map(|i| i as f64).collect(), ys)
        }
        (Some(x), Some(y), None) => (series(x)?, series(y)?),
        (None, _, _) => {
            return Err(DispatchError::invalid_argument(op, format!("{} needs data arguments", op)));
        }
        _ => {
            return Err(DispatchError::invalid_argument(op, format!("{} takes (y), (x, y) or (x, y, fmt)", op)));
        }
    };

    if xs.len() != ys.len() {
        return Err(DispatchError::invalid_argument(
            op,
            format!("{}: x and y must have same length, got {} and {}", op, xs.len(), ys.len()),
        ));
    }
    Ok((xs, ys, fmt))
}

fn plot(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let CallArgs { positional, mut named } = call;
    let (xs, ys, fmt) = xy_positionals("plot", positional)?;
    if !named.contains_key("linewidth") && !named.contains_key("lw") {
        if let Some(lw) = crate::scene::rc::rc_get("lines.linewidth") {
            named.insert("linewidth".to_string(), lw);
        }
    }
    axes.artists.push(Artist::Line { xs, ys, fmt, style: named });
    Ok(())
}

fn scatter(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let CallArgs { positional, named } = call;
    let (xs, ys, fmt) = xy_positionals("scatter", positional)?;
    if fmt.is_some() {
        return Err(DispatchError::invalid_argument("scatter", "scatter does not take a format string"));
    }
    axes.artists.push(Artist::Scatter { xs, ys, style: named });
    Ok(())
}

fn fill(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let CallArgs { positional, named } = call;
    let (xs, ys, _) = xy_positionals("fill", positional)?;
    axes.artists.push(Artist::Fill { xs, ys, style: named });
    Ok(())
}

fn streamplot(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("streamplot", &["x", "y", "u", "v"])?;
    let x: Field = args.required("x")?;
    let y: Field = args.required("y")?;
    let u: Field = args.required("u")?;
    let v: Field = args.required("v")?;
    if !u.is_rectangular() || u.shape() != v.shape() {
        return Err(DispatchError::invalid_argument(
            "streamplot",
            format!("u and v must be grids of equal shape, got {:?} and {:?}", u.shape(), v.shape()),
        ));
    }
    axes.artists.push(Artist::Stream { x, y, u, v, style: args.rest() });
    Ok(())
}

fn title(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut text = text_op("title", call)?;
    if !text.style.contains_key("loc") {
        text.style.insert("loc".to_string(), Value::String(rc_str("axes.titlelocation", "center")));
    }
    axes.title = Some(text);
    Ok(())
}

fn xlabel(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    axes.xlabel = Some(text_op("xlabel", call)?);
    Ok(())
}

fn ylabel(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    axes.ylabel = Some(text_op("ylabel", call)?);
    Ok(())
}

/// `xlim(left, right)`, `xlim((left, right))` or named bounds.
fn limits(op: &'static str, names: [&'static str; 2], current: &Limits, call: CallArgs) -> DispatchResult<Limits> {
    let mut args = call.bind(op, &names)?;
    let (lo, hi) = match args.take_value(names[0]) {
        Some(Value::Array(pair)) => {
            if args.contains(names[1]) {
                return Err(DispatchError::invalid_argument(
                    op,
                    format!("{} got a ({}, {}) pair and {:?}", op, names[0], names[1], names[1]),
                ));
            }
            let (lo, hi): (Option<f64>, Option<f64>) = serde_json::from_value(Value::Array(pair))
                .map_err(|e| DispatchError::invalid_argument(op, format!("{} pair: {}", op, e)))?;
            (lo, hi)
        }
        Some(value) => {
            let lo: f64 = serde_json::from_value(value)
                .map_err(|e| DispatchError::invalid_argument(op, format!("{} argument {:?}: {}", op, names[0], e)))?;
            (Some(lo), args.optional(names[1])?)
        }
        None => (None, args.optional(names[1])?),
    };
    args.finish()?;

    let result = Limits {
        min: lo.or(current.min),
        max: hi.or(current.max),
    };
    if let (Some(lo), Some(hi)) = (result.min, result.max) {
        if lo == hi {
            warn!(op, lo, "identical low and high limits");
        }
    }
    Ok(result)
}

fn xlim(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    axes.xlim = limits("xlim", ["left", "right"], &axes.xlim, call)?;
    Ok(())
}

fn ylim(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    axes.ylim = limits("ylim", ["bottom", "top"], &axes.ylim, call)?;
    Ok(())
}

fn legend(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let legend = legend_op(call, rc_str("legend.loc", "best"))?;
    if legend.labels.is_none() && axes.handles().is_empty() {
        warn!("legend requested but no artists carry a label");
    }
    axes.legend = Some(legend);
    Ok(())
}

fn text(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("text", &["x", "y", "s"])?;
    let x: f64 = args.required("x")?;
    let y: f64 = args.required("y")?;
    let s = args.take_value("s").ok_or_else(|| DispatchError::invalid_argument("text", "text missing required argument \"s\""))?;
    let text = super::text_value("text", s)?;
    axes.artists.push(Artist::Text { x, y, text, style: args.rest() });
    Ok(())
}

fn annotate(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("annotate", &["text", "xy", "xytext"])?;
    let text: String = args.required("text")?;
    let xy: (f64, f64) = args.required("xy")?;
    let xytext: Option<(f64, f64)> = args.optional("xytext")?;
    axes.artists.push(Artist::Annotation { text, xy, xytext, style: args.rest() });
    Ok(())
}

fn grid(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("grid", &["visible", "which", "axis"])?;
    let visible: Option<bool> = args.optional("visible")?;
    let which: String = args.or("which", "major".to_string())?;
    let axis: String = args.or("axis", "both".to_string())?;
    if !matches!(which.as_str(), "major" | "minor" | "both") {
        return Err(DispatchError::invalid_argument("grid", format!("grid which must be major, minor or both, got {:?}", which)));
    }
    if !matches!(axis.as_str(), "x" | "y" | "both") {
        return Err(DispatchError::invalid_argument("grid", format!("grid axis must be x, y or both, got {:?}", axis)));
    }
    let style = args.rest();
    // Style arguments imply a visible grid.
    let visible = visible.unwrap_or(true);
    axes.grid = Some(Grid { visible, which, axis, style });
    Ok(())
}

fn axhspan(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("axhspan", &["ymin", "ymax", "xmin", "xmax"])?;
    let ymin: f64 = args.required("ymin")?;
    let ymax: f64 = args.required("ymax")?;
    let xmin: f64 = args.or("xmin", 0.0)?;
    let xmax: f64 = args.or("xmax", 1.0)?;
    axes.artists.push(Artist::HSpan { ymin, ymax, xmin, xmax, style: args.rest() });
    Ok(())
}

fn axvspan(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("axvspan", &["xmin", "xmax", "ymin", "ymax"])?;
    let xmin: f64 = args.required("xmin")?;
    let xmax: f64 = args.required("xmax")?;
    let ymin: f64 = args.or("ymin", 0.0)?;
    let ymax: f64 = args.or("ymax", 1.0)?;
    axes.artists.push(Artist::VSpan { xmin, xmax, ymin, ymax, style: args.rest() });
    Ok(())
}

fn axhline(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("axhline", &["y", "xmin", "xmax"])?;
    let y: f64 = args.or("y", 0.0)?;
    let xmin: f64 = args.or("xmin", 0.0)?;
    let xmax: f64 = args.or("xmax", 1.0)?;
    axes.artists.push(Artist::HLine { y, xmin, xmax, style: args.rest() });
    Ok(())
}

fn axvline(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("axvline", &["x", "ymin", "ymax"])?;
    let x: f64 = args.or("x", 0.0)?;
    let ymin: f64 = args.or("ymin", 0.0)?;
    let ymax: f64 = args.or("ymax", 1.0)?;
    axes.artists.push(Artist::VLine { x, ymin, ymax, style: args.rest() });
    Ok(())
}

fn set_aspect(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("set_aspect", &["aspect"])?;
    let aspect = match args.take_value("aspect") {
        Some(Value::String(s)) if s == "auto" => Aspect::Auto,
        Some(Value::String(s)) if s == "equal" => Aspect::Equal,
        Some(Value::Bool(true)) => Aspect::Ratio(1.0),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(r) if r.is_finite() && r > 0.0 => Aspect::Ratio(r),
            _ => {
                return Err(DispatchError::invalid_argument("set_aspect", format!("aspect ratio must be positive, got {}", n)));
            }
        },
        other => {
            return Err(DispatchError::invalid_argument(
                "set_aspect",
                format!("aspect must be 'auto', 'equal' or a positive number, got {:?}", other),
            ));
        }
    };
    axes.aspect = aspect;
    args.finish()
}

fn tick_params(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("tick_params", &["axis"])?;
    let axis: String = args.or("axis", "both".to_string())?;
    let color = match args.take_value("color") {
        Some(value) => Some(color_value("tick_params", value)?),
        None => None,
    };
    let params = args.rest();

    let lines = match axis.as_str() {
        "x" => vec![&mut axes.xaxis],
        "y" => vec![&mut axes.yaxis],
        "both" => vec![&mut axes.xaxis, &mut axes.yaxis],
        other => {
            return Err(DispatchError::invalid_argument("tick_params", format!("axis must be x, y or both, got {:?}", other)));
        }
    };
    for line in lines {
        if let Some(color) = &color {
            line.tick_color = color.clone();
        }
        for (key, value) in &params {
            line.tick_params.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

fn facecolor(axes: &mut Axes, call: CallArgs) -> DispatchResult<()> {
    axes.facecolor = color_op("facecolor", call)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::scene::Placement;
    use serde_json::json;

    fn apply(axes: &mut Axes, config: Value) -> DispatchResult<()> {
        configure::<AxesSetter>(axes, config.as_object().cloned().unwrap())
    }

    fn axes() -> Axes {
        Axes::new(Placement::Grid { rows: 1, cols: 1, index: 1 })
    }

    #[test]
    fn test_labels_and_limits() {
        let mut ax = axes();
        apply(
            &mut ax,
            json!({
                "title": {"args": "SIN(X)", "loc": "left"},
                "xlabel": {"args": "x label", "c": "k"},
                "ylabel": "y",
                "xlim": {"args": [-3.0, 3.0]},
                "ylim": {"args": [[-1, 1]]}
            }),
        )
        .unwrap();

        let title = ax.title.unwrap();
        assert_eq!(title.text, "SIN(X)");
        assert_eq!(title.style["loc"], "left");
        assert_eq!(ax.xlabel.unwrap().style["c"], "k");
        assert_eq!(ax.ylabel.unwrap().text, "y");
        assert_eq!(ax.xlim, Limits { min: Some(-3.0), max: Some(3.0) });
        assert_eq!(ax.ylim, Limits { min: Some(-1.0), max: Some(1.0) });
    }

    #[test]
    fn test_partial_limits_keep_other_bound() {
        let mut ax = axes();
        apply(&mut ax, json!({"xlim": {"args": [0, 10]}})).unwrap();
        apply(&mut ax, json!({"xlim": {"right": 5}})).unwrap();
        assert_eq!(ax.xlim, Limits { min: Some(0.0), max: Some(5.0) });
    }

    #[test]
    fn test_plot_forms() {
        let mut ax = axes();
        apply(
            &mut ax,
            json!({"plot": [
                {"args": [[0, 1, 2], [0, 1, 4]], "label": "square"},
                {"args": [[3, 2, 1], "r--"]},
                {"args": [[1, 2, 3]]}
            ]}),
        )
        .unwrap();

        assert_eq!(ax.artists.len(), 3);
        match &ax.artists[1] {
            Artist::Line { xs, ys, fmt, .. } => {
                assert_eq!(xs, &vec![0.0, 1.0, 2.0]);
                assert_eq!(ys, &vec![3.0, 2.0, 1.0]);
                assert_eq!(fmt.as_deref(), Some("r--"));
            }
            other => panic!("unexpected artist {:?}", other),
        }
        match &ax.artists[2] {
            Artist::Line { xs, .. } => assert_eq!(xs, &vec![0.0, 1.0, 2.0]),
            other => panic!("unexpected artist {:?}", other),
        }
        assert_eq!(ax.handles(), vec!["square"]);
    }

    #[test]
    fn test_plot_length_mismatch() {
        let mut ax = axes();
        let err = apply(&mut ax, json!({"plot": {"args": [[0, 1], [0]]}})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(ax.artists.is_empty());
    }

    #[test]
    fn test_text_repeated() {
        let mut ax = axes();
        apply(
            &mut ax,
            json!({"text": [
                {"args": [-3.0, 0.0, "TEXT"], "weight": "bold", "color": "r"},
                {"args": [0.5, 0.0, "text"], "color": "g"}
            ]}),
        )
        .unwrap();
        assert_eq!(ax.artists.len(), 2);
        assert!(matches!(&ax.artists[0], Artist::Text { text, .. } if text == "TEXT"));
    }

    #[test]
    fn test_reference_lines_defaults() {
        let mut ax = axes();
        apply(
            &mut ax,
            json!({
                "axhline": {"y": 0, "c": "g", "ls": "--"},
                "axvspan": {"xmin": 1.0, "xmax": 2.0, "facecolor": "y", "alpha": 0.1}
            }),
        )
        .unwrap();
        assert!(matches!(ax.artists[0], Artist::HLine { y, xmin, xmax, .. } if y == 0.0 && xmin == 0.0 && xmax == 1.0));
        assert!(matches!(ax.artists[1], Artist::VSpan { ymin, ymax, .. } if ymin == 0.0 && ymax == 1.0));
    }

    #[test]
    fn test_aspect_and_grid() {
        let mut ax = axes();
        apply(&mut ax, json!({"set_aspect": true, "grid": {"linestyle": ":", "color": "r"}})).unwrap();
        assert_eq!(ax.aspect, Aspect::Ratio(1.0));
        let grid = ax.grid.unwrap();
        assert!(grid.visible);
        assert_eq!(grid.style["linestyle"], ":");

        let mut ax = axes();
        apply(&mut ax, json!({"set_aspect": "equal"})).unwrap();
        assert_eq!(ax.aspect, Aspect::Equal);
        assert!(apply(&mut ax, json!({"set_aspect": -2})).is_err());
    }

    #[test]
    fn test_tick_params_per_axis() {
        let mut ax = axes();
        apply(&mut ax, json!({"tick_params": {"axis": "x", "labelrotation": 45, "color": "b"}})).unwrap();
        assert_eq!(ax.xaxis.tick_params["labelrotation"], 45);
        assert_eq!(ax.xaxis.tick_color, "b");
        assert!(ax.yaxis.tick_params.is_empty());
    }

    #[test]
    fn test_streamplot_shapes() {
        let mut ax = axes();
        let grid = json!([[0.0, 1.0], [1.0, 0.0]]);
        apply(
            &mut ax,
            json!({"streamplot": {"args": [[0, 1], [0, 1], grid.clone(), grid], "density": 1.5}}),
        )
        .unwrap();
        assert!(matches!(&ax.artists[0], Artist::Stream { style, .. } if style["density"] == 1.5));

        let err = apply(
            &mut ax,
            json!({"streamplot": {"args": [[0, 1], [0, 1], [[0.0, 1.0]], [[0.0], [1.0]]]}}),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_annotate() {
        let mut ax = axes();
        apply(
            &mut ax,
            json!({"annotate": {"text": "Hello", "xy": [0.3, 0.3], "xytext": [0.5, 0.5],
                "arrowprops": {"arrowstyle": "->"}}}),
        )
        .unwrap();
        match &ax.artists[0] {
            Artist::Annotation { xy, xytext, style, .. } => {
                assert_eq!(*xy, (0.3, 0.3));
                assert_eq!(*xytext, Some((0.5, 0.5)));
                assert_eq!(style["arrowprops"]["arrowstyle"], "->");
            }
            other => panic!("unexpected artist {:?}", other),
        }
    }
}
