//! Collision layers
//!
//! Colliders carry an interaction group describing what they are; overlap
//! probes filter on those bits to decide what counts as ground.

use rapier3d::prelude::{Group, InteractionGroups};

/// Bit for level geometry the character can stand on
pub const GROUND_BIT: u32 = 1 << 0;
/// Bit for the player character's own colliders
pub const PLAYER_BIT: u32 = 1 << 1;

/// Interaction group for level geometry: member of GROUND, collides with everything
pub fn ground_collider_groups() -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(GROUND_BIT), Group::ALL)
}

/// Interaction group for the player's colliders: member of PLAYER, collides with everything
pub fn player_collider_groups() -> InteractionGroups {
    InteractionGroups::new(Group::from_bits_truncate(PLAYER_BIT), Group::ALL)
}

/// Build a probe filter that only matches colliders in the given layer bits
pub fn probe_filter(layer_bits: u32) -> InteractionGroups {
    InteractionGroups::new(Group::ALL, Group::from_bits_truncate(layer_bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_filter_matches_ground() {
        let probe = probe_filter(GROUND_BIT);
        assert!(probe.test(ground_collider_groups()));
        assert!(!probe.test(player_collider_groups()));
    }
}
