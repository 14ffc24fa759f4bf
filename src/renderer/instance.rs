//! Per-box instance data for drawing a round

use bytemuck::{Pod, Zeroable};

use crate::sim::{Body, Round};

/// One cuboid to draw: center, full extents, and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn from_body(body: &Body) -> Self {
        Self {
            center: body.position().to_array(),
            size: body.size().to_array(),
            color: colors::for_kind(body.kind),
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::sim::BodyKind;

    pub const PLAYER: [f32; 4] = [0.0, 1.0, 0.0, 1.0]; // #00ff00
    pub const GROUND: [f32; 4] = [0.012, 0.412, 0.631, 1.0]; // #0369a1
    pub const ENEMY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 1.0, 0.0, 1.0]; // #ffff00

    pub const fn for_kind(kind: BodyKind) -> [f32; 4] {
        match kind {
            BodyKind::Player => PLAYER,
            BodyKind::Ground => GROUND,
            BodyKind::Enemy => ENEMY,
            BodyKind::Bullet => BULLET,
        }
    }
}

/// Every box in the round, in draw order: ground, player, enemies, bullets
pub fn collect_instances(round: &Round) -> Vec<BoxInstance> {
    let registry = &round.registry;
    let mut instances = Vec::with_capacity(2 + registry.len());
    instances.push(BoxInstance::from_body(&round.ground));
    instances.push(BoxInstance::from_body(&round.player));
    instances.extend(registry.enemies().iter().map(BoxInstance::from_body));
    instances.extend(registry.bullets().iter().map(BoxInstance::from_body));
    instances
}

/// Instance data as raw bytes, ready for a vertex buffer upload
pub fn instance_bytes(instances: &[BoxInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
