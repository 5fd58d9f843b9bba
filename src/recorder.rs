//! Ordered record of visited points for a secondary rendering pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Flat, ordered list of turtle positions.
///
/// No deduplication and no parent/child linkage; reconstructing branch topology is left
/// to the consumer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRecorder {
    points: Vec<Vec2>,
}

impl PointRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, point: Vec2) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn all(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
