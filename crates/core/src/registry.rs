//! Scene registry: entities in render order, with a priority view for update
//! dispatch.
//!
//! Render order is non-decreasing depth; equal depths keep registration
//! order. Update order is non-decreasing priority; equal priorities also keep
//! registration order (not depth order).

use crate::entity::{Entity, EntityId};

#[derive(Debug, Default)]
pub struct SceneRegistry {
    entities: Vec<Entity>,
    next_id: u64,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping render order. Returns the entity's registration id.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.assign_id(id);
        self.insert_sorted(entity);
        id
    }

    fn insert_sorted(&mut self, entity: Entity) {
        let key = (entity.depth(), entity.id());
        let at = self
            .entities
            .partition_point(|e| (e.depth(), e.id()) <= key);
        self.entities.insert(at, entity);
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let at = self.position(id)?;
        Some(self.entities.remove(at))
    }

    /// Move an entity to a new depth, keeping the ordering invariant.
    pub fn set_depth(&mut self, id: EntityId, depth: i32) -> bool {
        match self.remove(id) {
            Some(mut entity) => {
                entity.set_depth(depth);
                self.insert_sorted(entity);
                true
            }
            None => false,
        }
    }

    /// Render-order view.
    pub fn all(&self) -> &[Entity] {
        &self.entities
    }

    pub fn all_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == Some(id))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.position(id).map(|i| &self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.position(id).map(move |i| &mut self.entities[i])
    }

    /// Entity at a render-order index.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Entities whose name is in `names`, in render order. An empty query
    /// returns every entity.
    pub fn lookup(&self, names: &[&str]) -> Vec<&Entity> {
        if names.is_empty() {
            return self.entities.iter().collect();
        }
        self.entities
            .iter()
            .filter(|e| names.contains(&e.name()))
            .collect()
    }

    /// Render-order indices sorted by (priority, registration).
    ///
    /// Reuses `out` so the scheduler can dispatch without allocating per tick.
    pub fn priority_order_into(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(0..self.entities.len());
        out.sort_by_key(|&i| {
            let e = &self.entities[i];
            (e.priority, e.id())
        });
    }

    /// Update-order view.
    pub fn by_priority(&self) -> Vec<&Entity> {
        let mut order = Vec::with_capacity(self.entities.len());
        self.priority_order_into(&mut order);
        order.into_iter().map(|i| &self.entities[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entities: &[&Entity]) -> Vec<String> {
        entities.iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_add_sorts_by_depth() {
        let mut reg = SceneRegistry::new();
        for (name, depth) in [("d1", 1), ("d2", 2), ("d0", 0), ("dn1", -1)] {
            reg.add(Entity::new(name).with_depth(depth));
        }
        let order: Vec<&Entity> = reg.all().iter().collect();
        assert_eq!(names(&order), vec!["dn1", "d0", "d1", "d2"]);
    }

    #[test]
    fn test_equal_depths_keep_insertion_order() {
        let mut reg = SceneRegistry::new();
        reg.add(Entity::new("a").with_depth(1));
        reg.add(Entity::new("b").with_depth(0));
        reg.add(Entity::new("c").with_depth(1));
        reg.add(Entity::new("d").with_depth(0));
        let order: Vec<&Entity> = reg.all().iter().collect();
        assert_eq!(names(&order), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_priority_ties_use_registration_order() {
        let mut reg = SceneRegistry::new();
        reg.add(Entity::new("front").with_depth(5).with_priority(0));
        reg.add(Entity::new("back").with_depth(-5).with_priority(0));
        reg.add(Entity::new("first").with_depth(0).with_priority(-1));
        assert_eq!(names(&reg.by_priority()), vec!["first", "front", "back"]);
    }

    #[test]
    fn test_set_depth_reorders() {
        let mut reg = SceneRegistry::new();
        let a = reg.add(Entity::new("a").with_depth(0));
        reg.add(Entity::new("b").with_depth(1));
        assert!(reg.set_depth(a, 2));
        let order: Vec<&Entity> = reg.all().iter().collect();
        assert_eq!(names(&order), vec!["b", "a"]);
        assert_eq!(reg.get(a).unwrap().depth(), 2);
    }

    #[test]
    fn test_set_depth_ties_fall_back_to_registration_order() {
        let mut reg = SceneRegistry::new();
        let a = reg.add(Entity::new("a").with_depth(0));
        reg.add(Entity::new("b").with_depth(1));
        reg.set_depth(a, 1);
        let order: Vec<&Entity> = reg.all().iter().collect();
        assert_eq!(names(&order), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_returns_entity() {
        let mut reg = SceneRegistry::new();
        let a = reg.add(Entity::new("a"));
        assert_eq!(reg.remove(a).unwrap().name(), "a");
        assert!(reg.remove(a).is_none());
        assert!(reg.is_empty());
        assert!(!reg.set_depth(a, 3));
    }
}
