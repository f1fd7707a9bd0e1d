use super::context::TickContext;
use super::helpers::member_positions;
use super::system::{SimSystem, TickFrequency};
use crate::model::position::centroid;
use crate::model::{InfluenceZone, World};

const PALETTE: &[&str] = &[
    "#e4572e", "#17bebb", "#ffc914", "#76b041", "#2e86ab", "#a23b72", "#f18f01", "#5d576b",
];

const ZONE_MARGIN: f64 = 20.0;
const MIN_RADIUS: f64 = 30.0;

/// Recomputes one influence zone per coalition from its members' layout.
pub struct TerritorySystem;

impl SimSystem for TerritorySystem {
    fn name(&self) -> &str {
        "territory"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        ctx.world.zones = compute_zones(ctx.world);
    }
}

pub fn compute_zones(world: &World) -> Vec<InfluenceZone> {
    world
        .coalitions
        .values()
        .filter_map(|c| {
            let positions = member_positions(world, c);
            let center = centroid(positions.iter().copied())?;
            let reach = positions
                .iter()
                .map(|p| p.distance(center))
                .fold(0.0, f64::max);
            let size_factor = (0.5 + 0.1 * c.size() as f64).min(1.0);
            Some(InfluenceZone {
                coalition: c.id,
                center,
                radius: (reach + ZONE_MARGIN).max(MIN_RADIUS),
                strength: (c.cohesion() * size_factor).clamp(0.0, 100.0),
                color: PALETTE[c.id.0 as usize % PALETTE.len()].to_string(),
            })
        })
        .collect()
}
