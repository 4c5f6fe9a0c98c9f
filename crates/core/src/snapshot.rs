use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::registry::SceneRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: Option<EntityId>,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub depth: i32,
    pub priority: i32,
    pub active_frame: Option<usize>,
    pub width: u16,
    pub height: u16,
}

impl From<&Entity> for EntitySnapshot {
    fn from(e: &Entity) -> Self {
        Self {
            id: e.id(),
            name: e.name().to_string(),
            x: e.x,
            y: e.y,
            depth: e.depth(),
            priority: e.priority,
            active_frame: e.animation().active_index(),
            width: e.width(),
            height: e.height(),
        }
    }
}

/// Frame number plus every entity in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub frame: u64,
    pub entities: Vec<EntitySnapshot>,
}

impl SceneSnapshot {
    pub fn capture(frame: u64, registry: &SceneRegistry) -> Self {
        Self {
            frame,
            entities: registry.all().iter().map(EntitySnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn entity(&self, name: &str) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelBuffer;

    #[test]
    fn test_capture_lists_entities_in_render_order() {
        let mut reg = SceneRegistry::new();
        reg.add(Entity::new("top").with_depth(1).with_position(3, 4));
        reg.add(
            Entity::new("bottom")
                .with_depth(-1)
                .with_frames(vec![PixelBuffer::new(2, 2)]),
        );
        let snap = SceneSnapshot::capture(7, &reg);
        assert_eq!(snap.frame, 7);
        assert_eq!(snap.entities[0].name, "bottom");
        let top = snap.entity("top").unwrap();
        assert_eq!((top.x, top.y), (3, 4));
        assert_eq!(top.active_frame, None);

        let json = snap.to_json().unwrap();
        let back: SceneSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
