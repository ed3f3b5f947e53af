//! The narrow transform contract the orbital core writes through.
//!
//! The core never touches a concrete engine type. Anything that can take a
//! position and a spin angle can be animated: the Bevy adapter uses
//! [`SceneTransform`] as a staging value and copies it onto entities.

use std::collections::BTreeMap;

use bevy::math::DVec3;

/// Per-body transform handle written by the update driver.
pub trait OrbitTransform {
    /// Current world position.
    fn position(&self) -> DVec3;

    fn set_position(&mut self, position: DVec3);

    /// Spin about the body's vertical axis, in radians.
    fn set_rotation_y(&mut self, angle: f64);

    /// Named sub-object (rings, cloud layer, ...) attached to this body.
    fn child_mut(&mut self, _name: &str) -> Option<&mut dyn OrbitTransform> {
        None
    }
}

/// Plain-data transform with optional named children.
///
/// Children are positioned relative to their parent, so only their spin is
/// driven by the core.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneTransform {
    pub translation: DVec3,
    pub rotation_y: f64,
    pub children: BTreeMap<String, SceneTransform>,
}

impl SceneTransform {
    /// Attach an empty named child.
    pub fn with_child(mut self, name: impl Into<String>) -> Self {
        self.children.insert(name.into(), SceneTransform::default());
        self
    }

    pub fn child(&self, name: &str) -> Option<&SceneTransform> {
        self.children.get(name)
    }
}

impl OrbitTransform for SceneTransform {
    fn position(&self) -> DVec3 {
        self.translation
    }

    fn set_position(&mut self, position: DVec3) {
        self.translation = position;
    }

    fn set_rotation_y(&mut self, angle: f64) {
        self.rotation_y = angle;
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut dyn OrbitTransform> {
        self.children
            .get_mut(name)
            .map(|child| child as &mut dyn OrbitTransform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_lookup() {
        let mut transform = SceneTransform::default().with_child("rings");
        assert!(transform.child_mut("rings").is_some());
        assert!(transform.child_mut("clouds").is_none());

        if let Some(rings) = transform.child_mut("rings") {
            rings.set_rotation_y(1.5);
        }
        assert_eq!(transform.child("rings").map(|c| c.rotation_y), Some(1.5));
    }
}
