//! Region builders: create axes from `init` specs, then configure each one.
//!
//! A builder section of a document looks like
//!
//! ```yaml
//! subplot:
//!   init: [{args: [1, 2, 1]}, 122]
//!   axes:
//!     - {title: left}
//!     - {title: right}
//! ```
//!
//! Every init spec creates exactly one region, and every region receives
//! exactly one configuration. The three strategies differ only in how a single
//! init spec is turned into a placement.

use crate::config::names::{AXES, INIT};
use crate::dispatch::{CallArgs, ConfigMap, ParamSpec, configure, resolve};
use crate::error::{DispatchError, DispatchResult};
use crate::scene::{Axes, AxesId, Figure, Placement};
use crate::setters::AxesSetter;
use serde_json::Value;
use tracing::debug;

/// Strategy for turning init specs into axes of a figure.
pub trait RegionBuilder {
    /// Document key this builder is reached from.
    const NAME: &'static str;

    /// Create one region from a single resolved init call.
    fn create_region(&self, figure: &mut Figure, call: CallArgs) -> DispatchResult<AxesId>;

    /// Create one region per init spec, in order.
    fn create_regions(&self, figure: &mut Figure, specs: Vec<Value>) -> DispatchResult<Vec<AxesId>> {
        let mut regions = Vec::with_capacity(specs.len());
        for (position, spec) in specs.into_iter().enumerate() {
            let created = resolve(ParamSpec::from(spec), &mut |call: CallArgs| self.create_region(figure, call))?;
            let Some(id) = created else {
                return Err(DispatchError::contract_violation(
                    Self::NAME,
                    format!("init spec {} produced no region", position),
                ));
            };
            regions.push(id);
        }

        for (position, id) in regions.iter().enumerate() {
            if *id >= figure.axes.len() {
                return Err(DispatchError::contract_violation(
                    Self::NAME,
                    format!("region id {} is not an axes of the figure", id),
                ));
            }
            if let Some(first) = regions[..position].iter().position(|r| r == id) {
                return Err(DispatchError::contract_violation(
                    Self::NAME,
                    format!("init specs {} and {} created the same region", first, position),
                ));
            }
        }
        Ok(regions)
    }

    /// Run the whole builder section: create regions, then configure each.
    ///
    /// The pass works on a copy of the figure, so on error `figure` is left
    /// as it was.
    fn build(&self, figure: &mut Figure, mut config: ConfigMap) -> DispatchResult<Vec<AxesId>> {
        let init = config.shift_remove(INIT);
        let axes = config.shift_remove(AXES);
        let shorthand = init.is_none() && axes.is_none();

        if !shorthand {
            if let Some(key) = config.keys().next() {
                return Err(DispatchError::unknown_operation(Self::NAME, key, &[INIT, AXES]));
            }
        }

        let specs = match init {
            None => vec![Value::Object(ConfigMap::new())],
            Some(spec) => spec_list(INIT, spec)?,
        };
        let configs = match axes {
            Some(configs) => spec_list(AXES, configs)?,
            None if shorthand => vec![Value::Object(config)],
            None => Vec::new(),
        };

        let mut staged = figure.clone();
        let regions = self.create_regions(&mut staged, specs)?;
        debug!(strategy = Self::NAME, regions = regions.len(), configs = configs.len(), "regions created");
        if regions.len() != configs.len() {
            return Err(DispatchError::count_mismatch(regions.len(), configs.len()));
        }

        for (&id, region_config) in regions.iter().zip(configs) {
            let axes = &mut staged.axes[id];
            resolve(ParamSpec::from(region_config), &mut |call: CallArgs| {
                configure::<AxesSetter>(axes, call.into_config(AXES)?)
            })?;
        }
        *figure = staged;
        Ok(regions)
    }
}

/// Absent is handled by the caller; a mapping is a one-element list.
fn spec_list(key: &str, value: Value) -> DispatchResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        mapping @ Value::Object(_) => Ok(vec![mapping]),
        other => Err(DispatchError::type_mismatch(key, "a mapping or a sequence", &other)),
    }
}

/// Select the axes at `placement`, creating it if the figure has none there,
/// and apply any extra named arguments to it.
fn place(figure: &mut Figure, placement: Placement, extra: ConfigMap) -> DispatchResult<AxesId> {
    if let Some(id) = figure.find(&placement) {
        if let Some(axes) = figure.axes_mut(id) {
            if !extra.is_empty() {
                configure::<AxesSetter>(axes, extra)?;
            }
        }
        debug!(id, "axes reselected");
        return Ok(id);
    }

    let mut axes = Axes::new(placement);
    if !extra.is_empty() {
        configure::<AxesSetter>(&mut axes, extra)?;
    }
    let id = figure.add_axes(axes);
    debug!(id, "axes placed");
    Ok(id)
}

/// Grid cell: `(rows, cols, index)` or a three-digit code such as `122`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubplotBuilder;

impl RegionBuilder for SubplotBuilder {
    const NAME: &'static str = "subplot";

    fn create_region(&self, figure: &mut Figure, call: CallArgs) -> DispatchResult<AxesId> {
        let mut args = call.bind("subplot", &["rows", "cols", "index"])?;
        let (rows, cols, index) = if !args.contains("cols") && !args.contains("index") {
            match args.optional::<u32>("rows")? {
                None => (1, 1, 1),
                Some(code) if (111..=999).contains(&code) => (code / 100, (code / 10) % 10, code % 10),
                Some(code) => {
                    return Err(DispatchError::invalid_argument(
                        "subplot",
                        format!("single subplot argument must be a three-digit integer, got {}", code),
                    ));
                }
            }
        } else {
            (args.required("rows")?, args.required("cols")?, args.required("index")?)
        };

        let in_range = rows.checked_mul(cols).is_some_and(|cells| index >= 1 && index <= cells);
        if !in_range {
            return Err(DispatchError::invalid_argument(
                "subplot",
                format!("index {} is out of range for a {}x{} grid", index, rows, cols),
            ));
        }
        place(figure, Placement::Grid { rows, cols, index }, args.rest())
    }
}

/// Grid span: `shape=(rows, cols)`, `loc=(row, col)`, `rowspan`, `colspan`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Subplot2gridBuilder;

impl RegionBuilder for Subplot2gridBuilder {
    const NAME: &'static str = "subplot2grid";

    fn create_region(&self, figure: &mut Figure, call: CallArgs) -> DispatchResult<AxesId> {
        let mut args = call.bind("subplot2grid", &["shape", "loc", "rowspan", "colspan"])?;
        let (rows, cols): (u32, u32) = args.required("shape")?;
        let (row, col): (u32, u32) = args.required("loc")?;
        let rowspan: u32 = args.or("rowspan", 1)?;
        let colspan: u32 = args.or("colspan", 1)?;

        let fits = |start: u32, span: u32, total: u32| start.checked_add(span).is_some_and(|end| end <= total);
        if rowspan == 0 || colspan == 0 || !fits(row, rowspan, rows) || !fits(col, colspan, cols) {
            return Err(DispatchError::invalid_argument(
                "subplot2grid",
                format!(
                    "span at ({}, {}) of {}x{} cells does not fit a {}x{} grid",
                    row, col, rowspan, colspan, rows, cols
                ),
            ));
        }
        let placement = Placement::Span { rows, cols, row, col, rowspan, colspan };
        place(figure, placement, args.rest())
    }
}

/// Absolute rectangle in figure coordinates: `rect=[left, bottom, width, height]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddAxesBuilder;

impl RegionBuilder for AddAxesBuilder {
    const NAME: &'static str = "add_axes";

    fn create_region(&self, figure: &mut Figure, call: CallArgs) -> DispatchResult<AxesId> {
        let mut args = call.bind("add_axes", &["rect"])?;
        let [left, bottom, width, height]: [f64; 4] = args.required("rect")?;
        if !(width >= 0.0 && height >= 0.0) {
            return Err(DispatchError::invalid_argument(
                "add_axes",
                format!("rect width and height must be non-negative, got {} and {}", width, height),
            ));
        }
        place(figure, Placement::Rect { left, bottom, width, height }, args.rest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn config(value: Value) -> ConfigMap {
        value.as_object().cloned().unwrap()
    }

    fn titles(figure: &Figure) -> Vec<Option<String>> {
        figure.axes.iter().map(|a| a.title.as_ref().map(|t| t.text.clone())).collect()
    }

    #[test]
    fn test_three_specs_three_configs_in_order() {
        let mut figure = Figure::new();
        let regions = SubplotBuilder
            .build(
                &mut figure,
                config(json!({
                    "init": [131, {"args": [1, 3, 2]}, {"rows": 1, "cols": 3, "index": 3}],
                    "axes": [{"title": "a"}, {"title": "b"}, {"title": "c"}]
                })),
            )
            .unwrap();

        assert_eq!(regions, vec![0, 1, 2]);
        assert_eq!(titles(&figure), vec![Some("a".into()), Some("b".into()), Some("c".into())]);
        assert_eq!(figure.axes[1].placement, Placement::Grid { rows: 1, cols: 3, index: 2 });
    }

    #[test]
    fn test_count_mismatch_before_configuring() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(
                &mut figure,
                config(json!({
                    "init": [131, 132, 133],
                    "axes": [{"title": "a"}, {"title": "b"}]
                })),
            )
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::CountMismatch);
        assert!(err.message.contains('3') && err.message.contains('2'));
        assert!(titles(&figure).iter().all(Option::is_none));
    }

    #[test]
    fn test_single_region_shorthand() {
        let mut figure = Figure::new();
        SubplotBuilder
            .build(&mut figure, config(json!({"title": "only", "xlabel": "x"})))
            .unwrap();
        assert_eq!(figure.axes.len(), 1);
        assert_eq!(figure.axes[0].placement, Placement::Grid { rows: 1, cols: 1, index: 1 });
        assert_eq!(titles(&figure), vec![Some("only".into())]);
    }

    #[test]
    fn test_init_without_axes_is_count_mismatch() {
        let mut figure = Figure::new();
        let err = SubplotBuilder.build(&mut figure, config(json!({"init": {"args": [2, 2, 1]}}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::CountMismatch);
    }

    #[test]
    fn test_stray_keys_next_to_init() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(&mut figure, config(json!({"init": 111, "axes": {}, "title": "x"})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownOperation);
        assert_eq!(err.key.as_deref(), Some("title"));
    }

    #[test]
    fn test_scalar_init_is_type_mismatch() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(&mut figure, config(json!({"init": 111, "axes": {}})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TypeMismatch);
        assert_eq!(err.key.as_deref(), Some("init"));
    }

    #[test]
    fn test_nested_sequence_spec_is_contract_violation() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(&mut figure, config(json!({"init": [[121, 122]], "axes": [{}]})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ContractViolation);
    }

    #[test]
    fn test_duplicate_region_is_contract_violation() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(&mut figure, config(json!({"init": [121, 122, 121], "axes": [{}, {}, {}]})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ContractViolation);
        assert!(figure.axes.is_empty());
    }

    #[test]
    fn test_reselecting_a_cell_keeps_its_contents() {
        let mut figure = Figure::new();
        SubplotBuilder.build(&mut figure, config(json!({"title": "kept"}))).unwrap();
        let regions = SubplotBuilder
            .build(&mut figure, config(json!({"init": [{"args": [111], "facecolor": "k"}], "axes": {"xlabel": "x"}})))
            .unwrap();

        assert_eq!(regions, vec![0]);
        assert_eq!(figure.axes.len(), 1);
        let axes = &figure.axes[0];
        assert_eq!(axes.title.as_ref().unwrap().text, "kept");
        assert_eq!(axes.xlabel.as_ref().unwrap().text, "x");
        assert_eq!(axes.facecolor, "k");
    }

    #[test]
    fn test_failed_pass_leaves_figure_untouched() {
        let mut figure = Figure::new();
        SubplotBuilder.build(&mut figure, config(json!({"init": [121], "axes": {"title": "a"}}))).unwrap();
        let before = figure.clone();

        let err = SubplotBuilder
            .build(
                &mut figure,
                config(json!({"init": [121, 122], "axes": [{"xlabel": "changed"}, {"xlim": {"args": [1, 2, 3]}}]})),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert_eq!(figure, before);
    }

    #[test]
    fn test_sequence_config_applies_several_passes() {
        let mut figure = Figure::new();
        SubplotBuilder
            .build(
                &mut figure,
                config(json!({"init": [111], "axes": [[{"title": "first"}, {"xlabel": "second"}]]})),
            )
            .unwrap();
        assert_eq!(figure.axes[0].title.as_ref().unwrap().text, "first");
        assert_eq!(figure.axes[0].xlabel.as_ref().unwrap().text, "second");
    }

    #[test]
    fn test_subplot_bad_code() {
        let mut figure = Figure::new();
        let err = SubplotBuilder.build(&mut figure, config(json!({"init": [12], "axes": [{}]}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        let err = SubplotBuilder.build(&mut figure, config(json!({"init": [225], "axes": [{}]}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_subplot2grid_span() {
        let mut figure = Figure::new();
        Subplot2gridBuilder
            .build(
                &mut figure,
                config(json!({
                    "init": [
                        {"shape": [3, 3], "loc": [0, 0], "colspan": 3},
                        {"shape": [3, 3], "loc": [1, 0], "rowspan": 2, "facecolor": "k"}
                    ],
                    "axes": [{}, {"title": "tall"}]
                })),
            )
            .unwrap();
        assert_eq!(
            figure.axes[0].placement,
            Placement::Span { rows: 3, cols: 3, row: 0, col: 0, rowspan: 1, colspan: 3 }
        );
        assert_eq!(figure.axes[1].facecolor, "k");

        let err = Subplot2gridBuilder
            .build(&mut figure, config(json!({"init": {"shape": [2, 2], "loc": [1, 1], "rowspan": 2}, "axes": {}})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn test_huge_grid_values_are_rejected() {
        let mut figure = Figure::new();
        let err = SubplotBuilder
            .build(&mut figure, config(json!({"init": {"args": [70000, 70000, 1]}, "axes": {}})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = Subplot2gridBuilder
            .build(&mut figure, config(json!({"init": {"shape": [2, 2], "loc": [4294967295u32, 0]}, "axes": {}})))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = Subplot2gridBuilder
            .build(
                &mut figure,
                config(json!({"init": {"shape": [2, 2], "loc": [0, 1], "colspan": 4294967295u32}, "axes": {}})),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(figure.axes.is_empty());
    }

    #[test]
    fn test_add_axes_rect() {
        let mut figure = Figure::new();
        AddAxesBuilder
            .build(
                &mut figure,
                config(json!({"init": {"args": [[0.1, 0.1, 0.4, 0.4]]}, "axes": [{"title": "inset"}]})),
            )
            .unwrap();
        assert_eq!(
            figure.axes[0].placement,
            Placement::Rect { left: 0.1, bottom: 0.1, width: 0.4, height: 0.4 }
        );

        let err = AddAxesBuilder.build(&mut figure, config(json!({}))).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }
}
