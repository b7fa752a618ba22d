//! Integration tests for the dispatch engine.
//!
//! Uses a small stand-alone target type so that the engine is exercised
//! without any of the plotting configurers.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::LazyLock;
use xyplot::dispatch::{BindingTable, CallArgs, ConfigMap, Configurer, configure, resolve_value};
use xyplot::error::{DispatchResult, ErrorCode};

#[derive(Debug, Default)]
struct Canvas {
    events: Vec<String>,
    shape: Shape,
}

#[derive(Debug, Default)]
struct Shape {
    radius: f64,
}

struct CanvasSetter;
struct ShapeSetter;

fn set_color(canvas: &mut Canvas, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("color", &["color"])?;
    let color: String = args.required("color")?;
    canvas.events.push(format!("color({})", color));
    args.finish()
}

fn shape(canvas: &mut Canvas, config: ConfigMap) -> DispatchResult<()> {
    canvas.events.push("shape".to_string());
    configure::<ShapeSetter>(&mut canvas.shape, config)
}

fn set_radius(shape: &mut Shape, call: CallArgs) -> DispatchResult<()> {
    let mut args = call.bind("radius", &["r"])?;
    shape.radius = args.required("r")?;
    args.finish()
}

impl Configurer for CanvasSetter {
    type Target = Canvas;
    const KIND: &'static str = "canvas";

    fn direct_bindings() -> &'static BindingTable<Canvas> {
        static TABLE: LazyLock<BindingTable<Canvas>> =
            LazyLock::new(|| BindingTable::new("canvas").direct("color", set_color));
        &TABLE
    }

    fn branch_bindings() -> Option<&'static BindingTable<Canvas>> {
        static TABLE: LazyLock<BindingTable<Canvas>> =
            LazyLock::new(|| BindingTable::new("canvas.branch").branch("shape", shape));
        Some(&TABLE)
    }
}

impl Configurer for ShapeSetter {
    type Target = Shape;
    const KIND: &'static str = "shape";

    fn direct_bindings() -> &'static BindingTable<Shape> {
        static TABLE: LazyLock<BindingTable<Shape>> =
            LazyLock::new(|| BindingTable::new("shape").direct("radius", set_radius));
        &TABLE
    }
}

fn config(value: Value) -> ConfigMap {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_branch_then_direct_order() {
    let mut canvas = Canvas::default();
    configure::<CanvasSetter>(
        &mut canvas,
        config(json!({"color": "k", "branch": {"shape": {"radius": 5}}})),
    )
    .unwrap();

    assert_eq!(canvas.events, vec!["shape", "color(k)"]);
    assert_eq!(canvas.shape.radius, 5.0);
}

#[test]
fn test_unknown_key_invokes_nothing() {
    let mut canvas = Canvas::default();
    let err = configure::<CanvasSetter>(
        &mut canvas,
        config(json!({"branch": {"shape": {"radius": 5}}, "color": "k", "colour": "r"})),
    )
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::UnknownOperation);
    assert_eq!(err.key.as_deref(), Some("colour"));
    assert!(err.details.as_deref().unwrap_or_default().contains("color"));
    assert!(canvas.events.is_empty());
    assert_eq!(canvas.shape.radius, 0.0);
}

#[test]
fn test_resolver_calling_convention() {
    let mut calls = Vec::new();
    resolve_value(json!({"args": [1, 2], "x": 3}), |call: CallArgs| {
        calls.push(call);
        Ok(())
    })
    .unwrap();
    assert_eq!(calls[0].positional, vec![json!(1), json!(2)]);
    assert_eq!(calls[0].named, config(json!({"x": 3})));

    let scalar = resolve_value(json!(5), |call: CallArgs| Ok(call.positional)).unwrap();
    assert_eq!(scalar, Some(vec![json!(5)]));

    let mut count = 0;
    let repeated = resolve_value(json!([{"x": 1}, {"x": 2}]), |_call: CallArgs| {
        count += 1;
        Ok(count)
    })
    .unwrap();
    assert_eq!(count, 2);
    assert_eq!(repeated, None);
}

#[test]
fn test_repeated_direct_operation() {
    let mut canvas = Canvas::default();
    configure::<CanvasSetter>(&mut canvas, config(json!({"color": ["r", {"args": "g"}, {"color": "b"}]}))).unwrap();
    assert_eq!(canvas.events, vec!["color(r)", "color(g)", "color(b)"]);
}

#[test]
fn test_branch_must_be_mapping() {
    let mut canvas = Canvas::default();
    let err = configure::<CanvasSetter>(&mut canvas, config(json!({"branch": ["shape"]}))).unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeMismatch);
    assert_eq!(err.key.as_deref(), Some("branch"));
}

#[test]
fn test_init_rejected_without_construction_step() {
    let mut canvas = Canvas::default();
    let err = configure::<CanvasSetter>(&mut canvas, config(json!({"init": {}}))).unwrap_err();
    assert_eq!(err.code, ErrorCode::TypeMismatch);
    assert_eq!(err.key.as_deref(), Some("init"));
}

#[test]
fn test_argument_errors_surface() {
    let mut canvas = Canvas::default();
    let err = configure::<CanvasSetter>(&mut canvas, config(json!({"color": {"args": ["k", "w"]}}))).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidArgument);
    assert_eq!(err.key.as_deref(), Some("color"));
}
