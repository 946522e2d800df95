//! Obstacle registry: every wall in the arena, in creation order

use glam::Vec2;

use super::geometry::Rect;
use super::wall::Wall;
use crate::error::SpawnError;

/// Append-only list of walls
#[derive(Debug, Clone, Default)]
pub struct ObstacleRegistry {
    walls: Vec<Wall>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self { walls: Vec::new() }
    }

    /// Add a wall whose endpoints both lie inside `boundary`
    ///
    /// A wall with only one valid endpoint is rejected outright, never clamped.
    /// Returns the index of the new wall.
    pub fn add_wall(
        &mut self,
        boundary: &Rect,
        start: Vec2,
        end: Vec2,
    ) -> Result<usize, SpawnError> {
        let wall = Wall::new(start, end)?;
        if !boundary.contains(start) || !boundary.contains(end) {
            return Err(SpawnError::OutOfArena);
        }
        self.walls.push(wall);
        Ok(self.walls.len() - 1)
    }

    #[inline]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wall> {
        self.walls.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}
