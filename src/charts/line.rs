use std::fmt::Write as _;
use std::rc::Rc;

use crate::chart::{Chart, ChartCore};
use crate::config::ChartConfigPatch;
use crate::error::{ChartError, ChartResult};
use crate::surface::{Document, DrawingHost, NodeId};
use crate::tooltip::TooltipRegistry;

use super::{DEFAULT_MARK_COLOR, LinearScale, XyPoint, theme_color, transition_style};

const LINE_TAG: &str = "path";
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Single polyline through the samples in data order.
#[derive(Debug)]
pub struct LineChart<H: DrawingHost = Document> {
    core: ChartCore<XyPoint, H>,
}

impl<H: DrawingHost> LineChart<H> {
    pub fn new(
        tooltips: Rc<TooltipRegistry<H>>,
        container: NodeId,
        config: ChartConfigPatch,
    ) -> Self {
        Self {
            core: ChartCore::new(tooltips, container, config),
        }
    }

    /// SVG path data, or `None` without samples.
    fn path_data(&self) -> ChartResult<Option<String>> {
        let data = self.core.data();
        if data.is_empty() {
            return Ok(None);
        }

        let inner_width = self.core.inner_width();
        let inner_height = self.core.inner_height();
        let x_scale = LinearScale::from_values(data.iter().map(|p| p.x))?;
        let y_scale = LinearScale::from_values(data.iter().map(|p| p.y))?;

        let mut path = String::new();
        for (index, point) in data.iter().enumerate() {
            let x = x_scale.domain_to_pixel(point.x, inner_width)?;
            let y = y_scale.domain_to_pixel_flipped(point.y, inner_height)?;
            let command = if index == 0 { 'M' } else { 'L' };
            let _ = write!(path, "{command}{x},{y}");
        }
        Ok(Some(path))
    }

    /// Shows the shared tooltip for sample `index` at page position `(x, y)`.
    pub fn hover_point(&mut self, index: usize, x: f64, y: f64) -> ChartResult<()> {
        let point = self.core.data().get(index).copied().ok_or_else(|| {
            ChartError::InvalidData(format!("point index {index} is out of range"))
        })?;
        let text = format!("{}, {}", point.x, point.y);
        self.core.hover_point(index, &text, x, y)
    }
}

impl<H: DrawingHost> Chart for LineChart<H> {
    type Datum = XyPoint;
    type Host = H;

    fn core(&self) -> &ChartCore<XyPoint, H> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore<XyPoint, H> {
        &mut self.core
    }

    fn render(&mut self) -> ChartResult<&mut Self> {
        let group = self.core.content_group()?;
        let path = self.path_data()?;
        let stroke = theme_color(self.core.config(), "line-stroke", DEFAULT_MARK_COLOR);
        {
            let mut host = self.core.host().borrow_mut();
            host.clear_children(group)?;
            if let Some(path) = path {
                host.append_node(group, LINE_TAG)?
                    .class("line")?
                    .attr("d", path)?
                    .attr("fill", "none")?
                    .attr("stroke", stroke)?
                    .attr("stroke-width", DEFAULT_STROKE_WIDTH)?;
            }
        }
        self.core.mark_rendered();
        Ok(self)
    }

    fn update(&mut self) -> ChartResult<&mut Self> {
        let group = self.core.content_group()?;
        let existing = self.core.host().borrow().select_first(group, LINE_TAG)?;
        let path = self.path_data()?;
        let (node, path) = match (existing, path) {
            (Some(node), Some(path)) => (node, path),
            _ => return self.render(),
        };

        let transition = transition_style(self.core.config());
        {
            let mut host = self.core.host().borrow_mut();
            let mark = host.edit(node).attr("d", path)?;
            if let Some(transition) = &transition {
                mark.style("transition", transition)?;
            }
        }
        self.core.mark_updated();
        Ok(self)
    }
}
