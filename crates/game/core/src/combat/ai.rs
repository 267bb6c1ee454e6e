//! Monster decision policy.

use crate::entity::{Monster, Player};

use super::state::ResourcePool;

/// What a monster does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonsterAction {
    /// Hit the player with an ATK-based strike.
    Attack,
    /// Skip the turn.
    Rest,
}

/// Read-only view handed to a policy for one decision.
#[derive(Clone, Copy, Debug)]
pub struct MonsterContext<'a> {
    pub monster: &'a Monster,
    pub pool: ResourcePool,
    pub player: &'a Player,
    /// AP an attack would cost.
    pub attack_cost: i32,
}

pub trait MonsterPolicy {
    fn decide(&self, ctx: &MonsterContext<'_>) -> MonsterAction;
}

/// The single fixed policy: attack whenever the pool covers the cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TiredOrStrike;

impl MonsterPolicy for TiredOrStrike {
    fn decide(&self, ctx: &MonsterContext<'_>) -> MonsterAction {
        if ctx.pool.ap >= ctx.attack_cost {
            MonsterAction::Attack
        } else {
            MonsterAction::Rest
        }
    }
}
