use crate::graph::Position;
use crate::options::MaterializeOptions;

/// Offset of the `index`-th of `count` siblings, in sibling slots, relative to the
/// parent. The group is centered: three siblings get `-1, 0, 1`, two get `-0.5, 0.5`.
pub fn sibling_sequence(index: usize, count: usize) -> f64 {
    index as f64 - (count as f64 - 1.0) / 2.0
}

/// Level/sequence to pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub root_level: usize,
}

impl Layout {
    pub fn root_position(&self) -> Position {
        self.position(self.root_level, 0.0)
    }

    pub fn position(&self, level: usize, x: f64) -> Position {
        Position::new(x, level as f64 * self.vertical_spacing)
    }

    /// Horizontal pixel position of a sibling centered under a parent at `parent_x`.
    pub fn child_x(&self, parent_x: f64, index: usize, count: usize) -> f64 {
        parent_x + sibling_sequence(index, count) * self.horizontal_spacing
    }
}

impl From<&MaterializeOptions> for Layout {
    fn from(options: &MaterializeOptions) -> Self {
        Self {
            horizontal_spacing: options.horizontal_spacing,
            vertical_spacing: options.vertical_spacing,
            root_level: options.root_level,
        }
    }
}
