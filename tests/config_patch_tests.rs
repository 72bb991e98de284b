use std::cell::RefCell;
use std::rc::Rc;

use chart_base::charts::BarChart;
use chart_base::{
    Chart, ChartConfig, ChartConfigPatch, ChartError, Document, DrawingHost, Margin,
    TooltipRegistry,
};

fn bar_chart(config: ChartConfigPatch) -> BarChart {
    let host = Rc::new(RefCell::new(Document::new()));
    let tooltips = Rc::new(TooltipRegistry::new(host.clone()));
    let root = host.borrow().root();
    let container = host.borrow_mut().append(root, "div").expect("container");
    BarChart::new(tooltips, container, config)
}

#[test]
fn margin_patch_replaces_all_sides() {
    let mut chart = bar_chart(ChartConfigPatch::new());
    let patch = ChartConfigPatch::from_json_str(
        r#"{ "margin": { "top": 5, "right": 0, "bottom": 0, "left": 0 } }"#,
    )
    .expect("parse patch");

    chart.update_config(patch).expect("update");

    assert_eq!(chart.config().margin, Margin::new(5.0, 0.0, 0.0, 0.0));
    assert_eq!(chart.inner_width(), 400.0);
    assert_eq!(chart.inner_height(), 295.0);
}

#[test]
fn partial_margin_json_is_rejected_instead_of_deep_merged() {
    let result = ChartConfigPatch::from_json_str(r#"{ "margin": { "top": 5 } }"#);
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn width_only_update_keeps_other_fields() {
    let mut chart = bar_chart(ChartConfigPatch::new().with_height(250.0));

    chart
        .update_config(ChartConfigPatch::new().with_width(800.0))
        .expect("update");

    assert_eq!(chart.config().width, 800.0);
    assert_eq!(chart.config().height, 250.0);
    assert_eq!(chart.config().margin, Margin::default());
    assert_eq!(chart.inner_width(), 720.0);
}

#[test]
fn inner_size_is_recomputed_on_every_read() {
    let mut chart = bar_chart(ChartConfigPatch::new());
    assert_eq!(chart.inner_width(), 320.0);

    chart
        .update_config(ChartConfigPatch::new().with_width(1_000.0))
        .expect("update");
    assert_eq!(chart.inner_width(), 920.0);
}

#[test]
fn garbage_dimensions_propagate_unchanged() {
    let mut chart = bar_chart(ChartConfigPatch::new());

    chart
        .update_config(ChartConfigPatch::new().with_size(-10.0, 30.0))
        .expect("update");

    assert_eq!(chart.config().width, -10.0);
    assert_eq!(chart.inner_width(), -90.0);
    assert_eq!(chart.inner_height(), -30.0);
    assert!(!chart.config().has_plot_area());
}

#[test]
fn theme_tokens_are_carried_opaquely() {
    let patch = ChartConfigPatch::from_json_str(
        r##"{ "theme": { "bar-fill": "#ff0000", "grid": { "dash": [2, 2] } } }"##,
    )
    .expect("parse patch");
    let config = ChartConfig::from_patch(patch);

    assert_eq!(config.theme.get_str("bar-fill"), Some("#ff0000"));
    assert_eq!(
        config.theme.get("grid"),
        Some(&serde_json::json!({ "dash": [2, 2] }))
    );
    let names: Vec<&str> = config.theme.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["bar-fill", "grid"]);
}

#[test]
fn empty_json_patch_yields_defaults() {
    let patch = ChartConfigPatch::from_json_str("{}").expect("parse");
    assert!(patch.is_empty());
    assert_eq!(ChartConfig::from_patch(patch), ChartConfig::default());
}

#[test]
fn animation_json_uses_duration_and_easing_keys() {
    let patch = ChartConfigPatch::from_json_str(
        r#"{ "animation": { "duration": 750, "easing": "linear" } }"#,
    )
    .expect("parse");
    let config = ChartConfig::from_patch(patch);

    assert_eq!(config.animation.duration, 750.0);
    assert_eq!(config.animation.easing.as_str(), "linear");
}

#[test]
fn effective_config_round_trips_through_json() {
    let config = ChartConfig::from_patch(
        ChartConfigPatch::new()
            .with_size(640.0, 360.0)
            .with_margin(Margin::new(10.0, 12.0, 30.0, 48.0)),
    );

    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(ChartConfig::from_json_str(&json).expect("parse"), config);
}
