use std::cell::RefCell;
use std::rc::Rc;

use chart_base::charts::LineChart;
use chart_base::{
    AnimationConfig, Chart, ChartConfigPatch, Document, DrawingHost, Margin, Theme,
    TooltipRegistry,
};
use proptest::prelude::*;

fn margin_strategy() -> impl Strategy<Value = Margin> {
    (0.0f64..200.0, 0.0f64..200.0, 0.0f64..200.0, 0.0f64..200.0)
        .prop_map(|(top, right, bottom, left)| Margin::new(top, right, bottom, left))
}

fn patch_strategy() -> impl Strategy<Value = ChartConfigPatch> {
    (
        proptest::option::of(-100.0f64..2_000.0),
        proptest::option::of(-100.0f64..2_000.0),
        proptest::option::of(margin_strategy()),
        proptest::option::of("[a-z]{1,8}".prop_map(|token| Theme::new().with_token(token, "x"))),
        proptest::option::of(
            (0.0f64..5_000.0, "[a-z-]{1,10}")
                .prop_map(|(duration, easing)| AnimationConfig::new(duration, easing.as_str())),
        ),
    )
        .prop_map(|(width, height, margin, theme, animation)| ChartConfigPatch {
            width,
            height,
            margin,
            theme,
            animation,
        })
}

fn line_chart() -> (Rc<RefCell<Document>>, LineChart) {
    let host = Rc::new(RefCell::new(Document::new()));
    let tooltips = Rc::new(TooltipRegistry::new(host.clone()));
    let root = host.borrow().root();
    let container = host.borrow_mut().append(root, "div").expect("container");
    let chart = LineChart::new(tooltips, container, ChartConfigPatch::new());
    (host, chart)
}

proptest! {
    #[test]
    fn update_config_is_a_shallow_top_level_override(
        first in patch_strategy(),
        second in patch_strategy()
    ) {
        let (_host, mut chart) = line_chart();
        chart.update_config(first).expect("first update");
        let before = chart.config().clone();

        chart.update_config(second.clone()).expect("second update");
        let after = chart.config();

        prop_assert_eq!(after.width, second.width.unwrap_or(before.width));
        prop_assert_eq!(after.height, second.height.unwrap_or(before.height));
        prop_assert_eq!(after.margin, second.margin.unwrap_or(before.margin));
        prop_assert_eq!(&after.theme, second.theme.as_ref().unwrap_or(&before.theme));
        prop_assert_eq!(
            &after.animation,
            second.animation.as_ref().unwrap_or(&before.animation)
        );
    }

    #[test]
    fn inner_size_tracks_current_config_without_clamping(
        width in -500.0f64..3_000.0,
        height in -500.0f64..3_000.0,
        margin in margin_strategy()
    ) {
        let (_host, mut chart) = line_chart();
        chart
            .update_config(ChartConfigPatch::new().with_size(width, height).with_margin(margin))
            .expect("update");

        prop_assert_eq!(chart.inner_width(), width - margin.left - margin.right);
        prop_assert_eq!(chart.inner_height(), height - margin.top - margin.bottom);
    }

    #[test]
    fn config_updates_never_leave_two_surfaces(widths in proptest::collection::vec(1.0f64..2_000.0, 1..6)) {
        let (host, mut chart) = line_chart();
        let container = chart.core().container();
        for width in widths {
            chart
                .update_config(ChartConfigPatch::new().with_width(width))
                .expect("update");
            let surfaces = host.borrow().select_all(container, "svg").expect("select").len();
            prop_assert_eq!(surfaces, 1);
        }
    }
}
