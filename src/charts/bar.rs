use std::rc::Rc;

use crate::chart::{Chart, ChartCore};
use crate::config::ChartConfigPatch;
use crate::error::{ChartError, ChartResult};
use crate::surface::{Document, DrawingHost, NodeId};
use crate::tooltip::TooltipRegistry;

use super::{CategoryValue, DEFAULT_MARK_COLOR, LinearScale, theme_color, transition_style};

const BAR_TAG: &str = "rect";
const DEFAULT_BAND_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BarGeometry {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Vertical bars, one band per category, values measured from zero.
#[derive(Debug)]
pub struct BarChart<H: DrawingHost = Document> {
    core: ChartCore<CategoryValue, H>,
    band_padding: f64,
}

impl<H: DrawingHost> BarChart<H> {
    pub fn new(
        tooltips: Rc<TooltipRegistry<H>>,
        container: NodeId,
        config: ChartConfigPatch,
    ) -> Self {
        Self {
            core: ChartCore::new(tooltips, container, config),
            band_padding: DEFAULT_BAND_PADDING,
        }
    }

    /// Fraction of each band left empty between bars, clamped to `[0, 1)`.
    #[must_use]
    pub fn with_band_padding(mut self, band_padding: f64) -> Self {
        self.band_padding = if band_padding.is_finite() {
            band_padding.clamp(0.0, 0.99)
        } else {
            DEFAULT_BAND_PADDING
        };
        self
    }

    #[must_use]
    pub fn band_padding(&self) -> f64 {
        self.band_padding
    }

    fn layout(&self) -> ChartResult<Vec<BarGeometry>> {
        let data = self.core.data();
        if data.is_empty() {
            return Ok(Vec::new());
        }

        let inner_width = self.core.inner_width();
        let inner_height = self.core.inner_height();
        let scale = LinearScale::zero_based(data.iter().map(|d| d.value))?;
        let band = inner_width / data.len() as f64;
        let gap = band * self.band_padding;

        data.iter()
            .enumerate()
            .map(|(index, datum)| -> ChartResult<BarGeometry> {
                let y = scale.domain_to_pixel_flipped(datum.value, inner_height)?;
                Ok(BarGeometry {
                    x: index as f64 * band + gap / 2.0,
                    y,
                    width: band - gap,
                    height: (inner_height - y).max(0.0),
                })
            })
            .collect()
    }

    /// Shows the shared tooltip for bar `index` at page position `(x, y)`.
    pub fn hover_bar(&mut self, index: usize, x: f64, y: f64) -> ChartResult<()> {
        let text = match self.core.data().get(index) {
            Some(datum) => format!("{}: {}", datum.label, datum.value),
            None => {
                return Err(ChartError::InvalidData(format!(
                    "bar index {index} is out of range"
                )));
            }
        };
        self.core.hover_point(index, &text, x, y)
    }
}

impl<H: DrawingHost> Chart for BarChart<H> {
    type Datum = CategoryValue;
    type Host = H;

    fn core(&self) -> &ChartCore<CategoryValue, H> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore<CategoryValue, H> {
        &mut self.core
    }

    fn render(&mut self) -> ChartResult<&mut Self> {
        let group = self.core.content_group()?;
        let bars = self.layout()?;
        let fill = theme_color(self.core.config(), "bar-fill", DEFAULT_MARK_COLOR);
        {
            let mut host = self.core.host().borrow_mut();
            host.clear_children(group)?;
            for (index, bar) in bars.iter().enumerate() {
                host.append_node(group, BAR_TAG)?
                    .class("bar")?
                    .attr("data-index", index)?
                    .attr("x", bar.x)?
                    .attr("y", bar.y)?
                    .attr("width", bar.width)?
                    .attr("height", bar.height)?
                    .attr("fill", fill)?;
            }
        }
        self.core.mark_rendered();
        Ok(self)
    }

    fn update(&mut self) -> ChartResult<&mut Self> {
        let group = self.core.content_group()?;
        let marks = self.core.host().borrow().select_all(group, BAR_TAG)?;
        if marks.len() != self.core.data().len() {
            return self.render();
        }

        let bars = self.layout()?;
        let transition = transition_style(self.core.config());
        {
            let mut host = self.core.host().borrow_mut();
            for (&node, bar) in marks.iter().zip(&bars) {
                let mark = host
                    .edit(node)
                    .attr("x", bar.x)?
                    .attr("y", bar.y)?
                    .attr("width", bar.width)?
                    .attr("height", bar.height)?;
                if let Some(transition) = &transition {
                    mark.style("transition", transition)?;
                }
            }
        }
        self.core.mark_updated();
        Ok(self)
    }
}
