//! Stat pools and the only mutation paths for current HP and MP.
//!
//! Maximum values are plain data. Current HP/MP are private so that every
//! change goes through [`Stats::heal`], [`Stats::restore_mana`] or
//! [`Stats::take_damage`], which clamp to `0..=max` and report the delta
//! that was actually applied.

/// HP/AP/MP/ATK/RES pools plus flat armor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    pub hp: i32,
    pub ap: i32,
    pub mp: i32,
    pub atk: i32,
    pub res: i32,
    /// Flat reduction applied after resistance. Never nullifies a hit.
    pub armor: i32,
    current_hp: i32,
    current_mp: i32,
}

impl Stats {
    /// Creates stats with current pools at maximum and no armor.
    pub fn new(hp: i32, ap: i32, mp: i32, atk: i32, res: i32) -> Self {
        Self {
            hp,
            ap,
            mp,
            atk,
            res,
            armor: 0,
            current_hp: hp.max(0),
            current_mp: mp.max(0),
        }
    }

    /// Builder: set flat armor.
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    /// Builder: start below full health. Clamped to `0..=hp`.
    pub fn with_current_hp(mut self, current_hp: i32) -> Self {
        self.current_hp = current_hp.clamp(0, self.hp.max(0));
        self
    }

    /// Builder: start below full mana. Clamped to `0..=mp`.
    pub fn with_current_mp(mut self, current_mp: i32) -> Self {
        self.current_mp = current_mp.clamp(0, self.mp.max(0));
        self
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn current_mp(&self) -> i32 {
        self.current_mp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Restores HP up to the maximum. Returns the HP actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount.max(0)).min(self.hp);
        self.current_hp - before
    }

    /// Restores MP up to the maximum. Returns the MP actually gained.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let before = self.current_mp;
        self.current_mp = self.current_mp.saturating_add(amount.max(0)).min(self.mp);
        self.current_mp - before
    }

    /// Applies `max(1, damage - armor)` and returns that amount.
    ///
    /// HP never drops below zero, but the returned value is the mitigated
    /// hit even when it exceeds the remaining HP.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        self.absorb(damage, self.armor)
    }

    pub(crate) fn absorb(&mut self, damage: i32, armor: i32) -> i32 {
        let actual = damage.saturating_sub(armor).max(1);
        self.current_hp = self.current_hp.saturating_sub(actual).max(0);
        actual
    }

    /// Returns a copy with the equipment bonus added to every non-HP stat.
    pub fn with_bonus(&self, bonus: &EquipmentBonus) -> Self {
        Self {
            ap: self.ap + bonus.ap,
            mp: self.mp + bonus.mp,
            atk: self.atk + bonus.atk,
            res: self.res + bonus.res,
            armor: self.armor + bonus.armor,
            ..self.clone()
        }
    }
}

/// Flat stat bonuses granted by equipped items.
///
/// Computing the bonus from an inventory is the equipment system's job; the
/// combat engine only sees the sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentBonus {
    pub ap: i32,
    pub mp: i32,
    pub atk: i32,
    pub res: i32,
    pub armor: i32,
}
