//! Plot rendering configuration
//!
//! The CLI deliberately exposes no styling flags, so these are compiled-in
//! defaults shared by all nine plots. Keeping them in one struct means the
//! render functions stay free of magic numbers and the tests can shrink the
//! canvas for speed.

/// Render settings shared by every diagnostic plot
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Outer margin in pixels
    pub margin: i32,
    /// Space reserved for the x-axis labels
    pub x_label_area: i32,
    /// Space reserved for the y-axis labels
    pub y_label_area: i32,
    /// Title font size
    pub caption_size: u32,
    /// Axis and legend font size
    pub label_size: u32,
    /// Stroke width for line series
    pub line_width: u32,
    /// Radius of the markers that make up a dotted series
    pub dot_size: i32,
    /// Size of the origin marker on the trajectory plot
    pub marker_size: i32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            width: 800,
            height: 600,
            margin: 20,
            x_label_area: 45,
            y_label_area: 55,
            caption_size: 28,
            label_size: 18,
            line_width: 2,
            dot_size: 2,
            marker_size: 6,
        }
    }
}

impl PlotConfig {
    /// Font descriptor for plot titles
    pub fn caption_font(&self) -> (&'static str, u32) {
        ("sans-serif", self.caption_size)
    }

    /// Font descriptor for axis and legend text
    pub fn label_font(&self) -> (&'static str, u32) {
        ("sans-serif", self.label_size)
    }

    /// Smaller canvas for tests, where render time matters more than looks
    #[cfg(test)]
    pub fn small() -> Self {
        PlotConfig {
            width: 320,
            height: 240,
            ..PlotConfig::default()
        }
    }
}
