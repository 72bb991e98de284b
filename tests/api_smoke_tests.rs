use std::cell::RefCell;
use std::rc::Rc;

use chart_base::charts::{BarChart, CategoryValue};
use chart_base::{
    AnimationConfig, Chart, ChartConfig, ChartConfigPatch, ChartLifecycle, Document, DrawingHost,
    Margin, Theme, TooltipRegistry,
};

#[test]
fn chart_smoke_flow() {
    let host = Rc::new(RefCell::new(Document::new()));
    let tooltips = Rc::new(TooltipRegistry::new(host.clone()));
    let root = host.borrow().root();
    let container = host.borrow_mut().append(root, "div").expect("container");

    let mut chart = BarChart::new(tooltips, container, ChartConfigPatch::new());
    assert_eq!(chart.core().lifecycle(), ChartLifecycle::Uninitialized);

    chart
        .set_data(vec![CategoryValue::new("a", 1.0), CategoryValue::new("b", 3.0)])
        .update_config(ChartConfigPatch::new().with_width(500.0))
        .expect("update config")
        .render()
        .expect("render");

    assert_eq!(chart.core().lifecycle(), ChartLifecycle::Rendered);
    assert_eq!(chart.config().width, 500.0);
    assert_eq!(chart.data().len(), 2);

    let group = chart.core().content_group().expect("content group");
    assert_eq!(host.borrow().children(group).expect("bars").len(), 2);

    chart.destroy();
    assert_eq!(host.borrow().select_first(container, "svg").expect("select"), None);
}

#[test]
fn empty_config_yields_documented_defaults() {
    let host = Rc::new(RefCell::new(Document::new()));
    let tooltips = Rc::new(TooltipRegistry::new(host.clone()));
    let root = host.borrow().root();

    let chart = BarChart::new(tooltips, root, ChartConfigPatch::new());

    assert_eq!(
        chart.config(),
        &ChartConfig {
            width: 400.0,
            height: 300.0,
            margin: Margin::new(20.0, 20.0, 40.0, 60.0),
            theme: Theme::new(),
            animation: AnimationConfig::new(300.0, "ease-out"),
        }
    );
    assert_eq!(chart.inner_width(), 320.0);
    assert_eq!(chart.inner_height(), 240.0);
}
