use crate::error::{ChartError, ChartResult};

/// Maps a data domain linearly onto a pixel span starting at zero.
///
/// Spans are taken as-is: a zero or negative plotting extent yields
/// collapsed or mirrored coordinates rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Domain covering `values`, widened by half a unit on each side when
    /// every value is equal. Empty input yields `[0, 1]`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let mut bounds: Option<(f64, f64)> = None;
        for value in values {
            if !value.is_finite() {
                return Err(ChartError::InvalidData("value must be finite".to_owned()));
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }

        match bounds {
            None => Self::new(0.0, 1.0),
            Some((min, max)) if min == max => Self::new(min - 0.5, max + 0.5),
            Some((min, max)) => Self::new(min, max),
        }
    }

    /// Domain from zero to the largest value, for bar-like marks.
    pub fn zero_based(values: impl IntoIterator<Item = f64>) -> ChartResult<Self> {
        let mut max = 0.0_f64;
        for value in values {
            if !value.is_finite() {
                return Err(ChartError::InvalidData("value must be finite".to_owned()));
            }
            max = max.max(value);
        }
        Self::new(0.0, if max > 0.0 { max } else { 1.0 })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span_px: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * span_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, span_px: f64) -> ChartResult<f64> {
        if !pixel.is_finite() || !span_px.is_finite() || span_px == 0.0 {
            return Err(ChartError::InvalidData(
                "pixel and span must be finite and span non-zero".to_owned(),
            ));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / span_px;
        Ok(self.domain_start + normalized * span)
    }

    /// Vertical mapping with the domain start at the bottom of the span.
    pub fn domain_to_pixel_flipped(self, value: f64, span_px: f64) -> ChartResult<f64> {
        Ok(span_px - self.domain_to_pixel(value, span_px)?)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::LinearScale;

    #[test]
    fn round_trip_within_tolerance() {
        let scale = LinearScale::new(10.0, 110.0).expect("valid scale");
        let px = scale.domain_to_pixel(42.5, 320.0).expect("to pixel");
        let back = scale.pixel_to_domain(px, 320.0).expect("from pixel");
        assert_relative_eq!(back, 42.5, epsilon = 1e-9);
    }

    #[test]
    fn constant_values_get_a_unit_domain() {
        let scale = LinearScale::from_values([3.0, 3.0]).expect("scale");
        assert_eq!(scale.domain(), (2.5, 3.5));
    }

    #[test]
    fn zero_based_ignores_negative_maximum() {
        let scale = LinearScale::zero_based([-4.0, -1.0]).expect("scale");
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(LinearScale::from_values([1.0, f64::NAN]).is_err());
        assert!(LinearScale::new(1.0, 1.0).is_err());
    }

    #[test]
    fn flipped_mapping_puts_domain_start_at_bottom() {
        let scale = LinearScale::new(0.0, 10.0).expect("scale");
        assert_relative_eq!(scale.domain_to_pixel_flipped(0.0, 240.0).expect("y"), 240.0);
        assert_relative_eq!(scale.domain_to_pixel_flipped(10.0, 240.0).expect("y"), 0.0);
    }
}
