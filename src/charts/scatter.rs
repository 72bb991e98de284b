use std::rc::Rc;

use crate::chart::{Chart, ChartCore};
use crate::config::ChartConfigPatch;
use crate::error::{ChartError, ChartResult};
use crate::surface::{Document, DrawingHost, NodeId};
use crate::tooltip::TooltipRegistry;

use super::{DEFAULT_MARK_COLOR, LinearScale, XyPoint, theme_color, transition_style};

const POINT_TAG: &str = "circle";
const DEFAULT_POINT_RADIUS: f64 = 4.0;

#[derive(Debug)]
pub struct ScatterChart<H: DrawingHost = Document> {
    core: ChartCore<XyPoint, H>,
}

impl<H: DrawingHost> ScatterChart<H> {
    pub fn new(
        tooltips: Rc<TooltipRegistry<H>>,
        container: NodeId,
        config: ChartConfigPatch,
    ) -> Self {
        Self {
            core: ChartCore::new(tooltips, container, config),
        }
    }

    fn positions(&self) -> ChartResult<Vec<(f64, f64)>> {
        let data = self.core.data();
        let inner_width = self.core.inner_width();
        let inner_height = self.core.inner_height();
        let x_scale = LinearScale::from_values(data.iter().map(|p| p.x))?;
        let y_scale = LinearScale::from_values(data.iter().map(|p| p.y))?;

        data.iter()
            .map(|point| -> ChartResult<(f64, f64)> {
                Ok((
                    x_scale.domain_to_pixel(point.x, inner_width)?,
                    y_scale.domain_to_pixel_flipped(point.y, inner_height)?,
                ))
            })
            .collect()
    }

    fn point_radius(&self) -> f64 {
        self.core
            .config()
            .theme
            .get("point-radius")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(DEFAULT_POINT_RADIUS)
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

impl<H: DrawingHost> Chart for ScatterChart<H> {
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
        let positions = self.positions()?;
        let radius = self.point_radius();
        let fill = theme_color(self.core.config(), "point-fill", DEFAULT_MARK_COLOR);
        {
            let mut host = self.core.host().borrow_mut();
            host.clear_children(group)?;
            for (index, (cx, cy)) in positions.into_iter().enumerate() {
                host.append_node(group, POINT_TAG)?
                    .class("point")?
                    .attr("data-index", index)?
                    .attr("cx", cx)?
                    .attr("cy", cy)?
                    .attr("r", radius)?
                    .attr("fill", fill)?;
            }
        }
        self.core.mark_rendered();
        Ok(self)
    }

    fn update(&mut self) -> ChartResult<&mut Self> {
        let group = self.core.content_group()?;
        let marks = self.core.host().borrow().select_all(group, POINT_TAG)?;
        if marks.len() != self.core.data().len() {
            return self.render();
        }

        let positions = self.positions()?;
        let transition = transition_style(self.core.config());
        {
            let mut host = self.core.host().borrow_mut();
            for (node, (cx, cy)) in marks.into_iter().zip(positions) {
                let mark = host.edit(node).attr("cx", cx)?.attr("cy", cy)?;
                if let Some(transition) = &transition {
                    mark.style("transition", transition)?;
                }
            }
        }
        self.core.mark_updated();
        Ok(self)
    }
}
