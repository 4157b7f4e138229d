//! Combatant state.

use crate::skill::SkillEffects;

use super::common::{ActorId, Side};
use super::stats::{
    ActionRates, ActionResources, BarrierCharges, BaseAttributes, CombatSnapshot,
    InnateResistances, SpellBook, StatModifiers,
};
use super::status::StatusSet;

/// Per-actor bookkeeping counters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActorCounters {
    /// Rescues performed this turn; reset at turn start.
    pub rescue_uses_this_turn: u32,
    /// Extra actions taken this turn; reset at turn start.
    pub extra_actions_this_turn: u32,
    /// Trigger count per auto-revive active, parallel to
    /// `effects.resurrection.auto_revive`.
    pub resurrection_triggers: Vec<u32>,
    pub forced_revives_used: u32,
    /// Equipment wear in percent, lowers physical defense.
    pub degradation_percent: f64,
    /// May be chosen as a sacrifice by an ally.
    pub sacrifice_eligible: bool,
}

/// A combatant.
///
/// Invariant: `hp <= snapshot.max_hp`. HP only changes through
/// [`take_damage`](Self::take_damage), [`heal`](Self::heal) and
/// [`revive`](Self::revive), which clamp.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub side: Side,
    pub formation_slot: u8,
    pub level: u32,
    pub attributes: BaseAttributes,
    pub snapshot: CombatSnapshot,
    hp: u32,
    pub action_rates: ActionRates,
    pub spells: SpellBook,
    pub resources: ActionResources,
    pub effects: SkillEffects,
    pub resistances: InnateResistances,
    pub statuses: StatusSet,
    pub counters: ActorCounters,
    /// Modifiers written by in-battle triggers (timed buffs).
    pub live_modifiers: StatModifiers,
    pub barriers: BarrierCharges,
    pub guard_barriers: BarrierCharges,
    pub guarding: bool,
    pub fled: bool,
    /// Unarmed actors receive the martial multiplier.
    pub armed: bool,
}

impl Actor {
    /// Creates an actor at full HP with a neutral skill bundle.
    pub fn new(
        id: ActorId,
        name: impl Into<String>,
        side: Side,
        formation_slot: u8,
        level: u32,
        attributes: BaseAttributes,
        snapshot: CombatSnapshot,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            side,
            formation_slot,
            level,
            attributes,
            hp: snapshot.max_hp,
            snapshot,
            action_rates: ActionRates::attack_only(),
            spells: SpellBook::default(),
            resources: ActionResources::default(),
            effects: SkillEffects::neutral(),
            resistances: InnateResistances::neutral(),
            statuses: StatusSet::empty(),
            counters: ActorCounters::default(),
            live_modifiers: StatModifiers::NEUTRAL,
            barriers: BarrierCharges::default(),
            guard_barriers: BarrierCharges::default(),
            guarding: false,
            fled: false,
            armed: true,
        }
    }

    pub fn with_effects(mut self, effects: SkillEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_action_rates(mut self, rates: ActionRates) -> Self {
        self.action_rates = rates;
        self
    }

    pub fn with_spells(mut self, spells: SpellBook) -> Self {
        self.spells = spells;
        self
    }

    pub fn with_resources(mut self, resources: ActionResources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_resistances(mut self, resistances: InnateResistances) -> Self {
        self.resistances = resistances;
        self
    }

    /// Sets current HP, clamped to `[0, max_hp]`.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.snapshot.max_hp);
        self
    }

    pub fn with_armed(mut self, armed: bool) -> Self {
        self.armed = armed;
        self
    }

    pub fn with_degradation(mut self, percent: f64) -> Self {
        self.counters.degradation_percent = percent.clamp(0.0, 100.0);
        self
    }

    pub fn with_sacrifice_eligible(mut self, eligible: bool) -> Self {
        self.counters.sacrifice_eligible = eligible;
        self
    }

    /// Seeds live state from the compiled bundle. Called once when a battle
    /// starts.
    pub fn prepare_for_battle(&mut self) {
        let combat = &self.effects.combat;
        self.barriers = self.barriers.merged(&combat.barrier);
        self.guard_barriers = self.guard_barriers.merged(&combat.guard_barrier);

        let spell = &self.effects.spell;
        self.resources.priest_charges += spell.extra_priest_charges;
        self.resources.mage_charges += spell.extra_mage_charges;

        self.counters.resurrection_triggers = vec![0; self.effects.resurrection.auto_revive.len()];
        self.guarding = false;
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.snapshot.max_hp
    }

    /// Current HP as a fraction of maximum.
    pub fn hp_ratio(&self) -> f64 {
        if self.snapshot.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.snapshot.max_hp as f64
    }

    /// Alive and still on the field.
    pub fn is_alive(&self) -> bool {
        self.hp > 0 && !self.fled
    }

    /// Dead but on the field; a resurrection candidate.
    pub fn is_fallen(&self) -> bool {
        self.hp == 0 && !self.fled
    }

    /// Applies damage and returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP on a living actor and returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let gained = amount.min(self.snapshot.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Brings a fallen actor back with `hp` (at least 1). Returns the HP set,
    /// or 0 when the actor was not fallen.
    pub fn revive(&mut self, hp: u32) -> u32 {
        if !self.is_fallen() {
            return 0;
        }
        self.hp = hp.clamp(1, self.snapshot.max_hp.max(1));
        self.statuses.clear();
        self.guarding = false;
        self.hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(max_hp: u32) -> Actor {
        let snapshot = CombatSnapshot {
            max_hp,
            ..CombatSnapshot::default()
        };
        Actor::new(
            ActorId::player(1),
            "Tester",
            Side::Player,
            1,
            1,
            BaseAttributes::default(),
            snapshot,
        )
    }

    #[test]
    fn hp_is_clamped_both_ways() {
        let mut a = actor(50);
        assert_eq!(a.take_damage(80), 50);
        assert_eq!(a.hp(), 0);
        assert!(a.is_fallen());
        assert_eq!(a.heal(10), 0);
        assert_eq!(a.revive(500), 50);
        assert_eq!(a.take_damage(5), 5);
        assert_eq!(a.heal(100), 5);
        assert_eq!(a.hp(), 50);
    }

    #[test]
    fn fled_actors_are_neither_alive_nor_fallen() {
        let mut a = actor(10);
        a.fled = true;
        assert!(!a.is_alive());
        assert!(!a.is_fallen());
        assert_eq!(a.revive(5), 0);
    }

    #[test]
    fn prepare_for_battle_seeds_live_state() {
        let mut effects = SkillEffects::neutral();
        effects.combat.barrier.physical = 2;
        effects.spell.extra_mage_charges = 3;
        let mut a = actor(10).with_effects(effects);
        a.prepare_for_battle();
        assert_eq!(a.barriers.physical, 2);
        assert_eq!(a.resources.mage_charges, 3);
    }
}
