//! Active enemies and bullets
//!
//! Both lists keep insertion order. Removal shifts later entries down by one
//! so the relative order of survivors never changes.

use super::body::{Body, BodyKind};
use super::collision::overlaps;

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    enemies: Vec<Body>,
    bullets: Vec<Body>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_enemy(&mut self, enemy: Body) {
        debug_assert_eq!(enemy.kind, BodyKind::Enemy);
        self.enemies.push(enemy);
    }

    pub fn add_bullet(&mut self, bullet: Body) {
        debug_assert_eq!(bullet.kind, BodyKind::Bullet);
        self.bullets.push(bullet);
    }

    /// Remove the enemy at `index`; out-of-range is a no-op
    pub fn remove_enemy_at(&mut self, index: usize) -> Option<Body> {
        (index < self.enemies.len()).then(|| self.enemies.remove(index))
    }

    /// Remove the bullet at `index`; out-of-range is a no-op
    pub fn remove_bullet_at(&mut self, index: usize) -> Option<Body> {
        (index < self.bullets.len()).then(|| self.bullets.remove(index))
    }

    pub fn enemies(&self) -> &[Body] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Body] {
        &self.bullets
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Body] {
        &mut self.enemies
    }

    pub(crate) fn bullet_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bullets.get_mut(index)
    }

    /// Index of the first enemy (in registry order) the bullet at `bullet` hits
    pub fn first_enemy_hit_by(&self, bullet: usize) -> Option<usize> {
        let bullet = self.bullets.get(bullet)?;
        self.enemies.iter().position(|enemy| overlaps(bullet, enemy))
    }

    /// Drop every entity for which `keep` returns false. Returns how many went.
    pub fn retain(&mut self, mut keep: impl FnMut(&Body) -> bool) -> usize {
        let before = self.len();
        self.enemies.retain(|b| keep(b));
        self.bullets.retain(|b| keep(b));
        before - self.len()
    }

    pub fn len(&self) -> usize {
        self.enemies.len() + self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.bullets.is_empty()
    }
}
