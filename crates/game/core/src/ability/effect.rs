//! Effect definitions - the atomic steps an ability applies.
//!
//! Effects are pure data; the combat resolver interprets them. The set is
//! closed and dispatched with a single `match`.

/// One rule-resolution step within an ability.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Effect {
    /// Deal `amount` raw damage to the monster on the target tile.
    Damage { amount: i32 },

    /// Knock the target up to `distance` tiles away from the caster.
    Push { distance: u32 },

    /// Add `amount` AP to the caster's pool for this turn.
    ///
    /// `duration` is recorded on the combat state but never expires.
    BuffAp { amount: i32, duration: u32 },

    /// Dash next to the target, then hit it for `amount` raw damage.
    Charge { amount: i32 },
}

impl Effect {
    pub const fn damage(amount: i32) -> Self {
        Self::Damage { amount }
    }

    pub const fn push(distance: u32) -> Self {
        Self::Push { distance }
    }

    pub const fn buff_ap(amount: i32, duration: u32) -> Self {
        Self::BuffAp { amount, duration }
    }

    pub const fn charge(amount: i32) -> Self {
        Self::Charge { amount }
    }

    /// Stable snake_case name, matching the content record `kind` field.
    pub fn name(&self) -> &'static str {
        self.into()
    }
}
