//! Upgrade ledger tracking purchased levels and applying their effects.

use monkey_tribe_core::{
    config::{AllyTuning, PlayerTuning, UpgradeTuning},
    PurchaseError, UpgradeKind,
};

use crate::{
    entities::{Entity, Player},
    structures::StructureRegistry,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct UpgradeState {
    level: u32,
    cost: u32,
    effect: f32,
}

impl UpgradeState {
    /// Total effect contributed by every purchased level.
    fn magnitude(&self) -> f32 {
        self.level as f32 * self.effect
    }
}

/// Outcome of a successful purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PurchaseReceipt {
    pub(crate) level: u32,
    pub(crate) next_cost: u32,
    pub(crate) remaining: u32,
}

/// Next price of an upgrade after one purchase at `cost`.
pub(crate) fn escalate(cost: u32) -> u32 {
    cost.saturating_mul(3) / 2
}

/// Purchased upgrade levels and their escalating prices.
#[derive(Debug)]
pub(crate) struct UpgradeLedger {
    upgrades: [UpgradeState; 4],
    compounding: bool,
}

impl UpgradeLedger {
    pub(crate) fn new(tuning: &UpgradeTuning) -> Self {
        let upgrades = UpgradeKind::ALL.map(|kind| {
            let spec = tuning.spec(kind);
            UpgradeState {
                level: 0,
                cost: spec.base_cost,
                effect: spec.effect,
            }
        });
        Self {
            upgrades,
            compounding: tuning.compounding,
        }
    }

    fn state(&self, kind: UpgradeKind) -> UpgradeState {
        self.upgrades[slot(kind)]
    }

    pub(crate) fn level(&self, kind: UpgradeKind) -> u32 {
        self.state(kind).level
    }

    pub(crate) fn cost(&self, kind: UpgradeKind) -> u32 {
        self.state(kind).cost
    }

    /// Buys the next level when `currency` covers the current cost.
    pub(crate) fn try_purchase(
        &mut self,
        kind: UpgradeKind,
        currency: u32,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let state = &mut self.upgrades[slot(kind)];
        if currency < state.cost {
            return Err(PurchaseError::InsufficientCurrency {
                upgrade: kind,
                required: state.cost,
                available: currency,
            });
        }

        let remaining = currency - state.cost;
        state.level = state.level.saturating_add(1);
        state.cost = escalate(state.cost);
        Ok(PurchaseReceipt {
            level: state.level,
            next_cost: state.cost,
            remaining,
        })
    }

    /// Resolves a snake_case upgrade name and buys its next level.
    pub(crate) fn try_purchase_by_name(
        &mut self,
        name: &str,
        currency: u32,
    ) -> Result<(UpgradeKind, PurchaseReceipt), PurchaseError> {
        let kind = name.parse::<UpgradeKind>()?;
        self.try_purchase(kind, currency).map(|receipt| (kind, receipt))
    }

    /// Buys the next level, reporting success and the currency left over.
    #[cfg(test)]
    pub(crate) fn purchase(&mut self, kind: UpgradeKind, currency: u32) -> (bool, u32) {
        match self.try_purchase(kind, currency) {
            Ok(receipt) => (true, receipt.remaining),
            Err(_) => (false, currency),
        }
    }

    /// Name-keyed variant of [`UpgradeLedger::purchase`]; unknown names are a no-op.
    #[cfg(test)]
    pub(crate) fn purchase_by_name(&mut self, name: &str, currency: u32) -> (bool, u32) {
        match self.try_purchase_by_name(name, currency) {
            Ok((_, receipt)) => (true, receipt.remaining),
            Err(_) => (false, currency),
        }
    }

    /// Writes the effect of every purchased level onto its target population.
    ///
    /// By default stats are recomputed from their base values so repeated
    /// calls are idempotent. In compounding mode each call layers the effect
    /// on top of the current stats again.
    pub(crate) fn apply_all(
        &self,
        player: &mut Player,
        allies: &mut [Entity],
        structures: &mut StructureRegistry,
        player_tuning: &PlayerTuning,
        ally_tuning: &AllyTuning,
    ) {
        if self.compounding {
            self.compound(player, allies, structures);
            return;
        }

        let speed = self.state(UpgradeKind::PlayerSpeed);
        player.body.speed = player_tuning.speed + speed.magnitude();

        let efficiency = self.state(UpgradeKind::ResourceEfficiency);
        player.gather_speed = player_tuning.gather_speed * multiplier(efficiency);

        let strength = self.state(UpgradeKind::AiCombatStrength);
        for ally in allies.iter_mut() {
            ally.attack_strength = ally_tuning.attack_strength * multiplier(strength);
        }

        let target_bonus = self.state(UpgradeKind::StructureHealth).magnitude().round() as u32;
        for structure in structures.iter_mut() {
            if target_bonus > structure.health_bonus {
                structure.health = structure
                    .health
                    .saturating_add(target_bonus - structure.health_bonus);
                structure.health_bonus = target_bonus;
            }
        }
    }

    fn compound(
        &self,
        player: &mut Player,
        allies: &mut [Entity],
        structures: &mut StructureRegistry,
    ) {
        let speed = self.state(UpgradeKind::PlayerSpeed);
        if speed.level > 0 {
            player.body.speed += speed.magnitude();
        }

        let strength = self.state(UpgradeKind::AiCombatStrength);
        if strength.level > 0 {
            for ally in allies.iter_mut() {
                ally.attack_strength *= strength.magnitude();
            }
        }

        let health = self.state(UpgradeKind::StructureHealth);
        if health.level > 0 {
            let bonus = health.magnitude().round() as u32;
            for structure in structures.iter_mut() {
                structure.health = structure.health.saturating_add(bonus);
                structure.health_bonus = structure.health_bonus.saturating_add(bonus);
            }
        }

        let efficiency = self.state(UpgradeKind::ResourceEfficiency);
        if efficiency.level > 0 {
            player.gather_speed *= efficiency.magnitude();
        }
    }
}

fn slot(kind: UpgradeKind) -> usize {
    match kind {
        UpgradeKind::PlayerSpeed => 0,
        UpgradeKind::AiCombatStrength => 1,
        UpgradeKind::StructureHealth => 2,
        UpgradeKind::ResourceEfficiency => 3,
    }
}

fn multiplier(state: UpgradeState) -> f32 {
    if state.level == 0 {
        1.0
    } else {
        state.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monkey_tribe_core::{
        config::StructureTuning, CellCoord, EntityId, Inventory, ResourceKind, StructureKind,
        Team,
    };
    use proptest::prelude::*;

    fn ledger() -> UpgradeLedger {
        UpgradeLedger::new(&UpgradeTuning::default())
    }

    fn fixtures() -> (Player, Vec<Entity>, StructureRegistry) {
        let player = Player::new(CellCoord::new(0, 0), 100, 1.0, 1.0);
        let mut ally = Entity::new(EntityId::new(7), Team::Ally, CellCoord::new(0, 0), 100);
        ally.attack_strength = 1.0;
        let mut structures = StructureRegistry::new();
        let mut inventory = Inventory::with_amounts([(ResourceKind::Wood, 10)]);
        let _ = structures
            .place(
                StructureKind::Hut,
                CellCoord::new(1, 1),
                Team::Player,
                &mut inventory,
                &StructureTuning::default(),
            )
            .expect("hut is affordable");
        (player, vec![ally], structures)
    }

    #[test]
    fn purchase_escalates_cost_and_spends_currency() {
        let mut ledger = ledger();

        assert_eq!(ledger.purchase(UpgradeKind::PlayerSpeed, 25), (true, 15));
        assert_eq!(ledger.level(UpgradeKind::PlayerSpeed), 1);
        assert_eq!(ledger.cost(UpgradeKind::PlayerSpeed), 15);
        assert_eq!(ledger.purchase(UpgradeKind::PlayerSpeed, 15), (true, 0));
        assert_eq!(ledger.cost(UpgradeKind::PlayerSpeed), 22);
    }

    #[test]
    fn insufficient_currency_leaves_state_untouched() {
        let mut ledger = ledger();

        assert_eq!(
            ledger.try_purchase(UpgradeKind::StructureHealth, 29),
            Err(PurchaseError::InsufficientCurrency {
                upgrade: UpgradeKind::StructureHealth,
                required: 30,
                available: 29,
            })
        );
        assert_eq!(ledger.level(UpgradeKind::StructureHealth), 0);
        assert_eq!(ledger.cost(UpgradeKind::StructureHealth), 30);
    }

    #[test]
    fn unknown_names_are_a_no_op() {
        let mut ledger = ledger();

        assert_eq!(ledger.purchase_by_name("jetpack", 500), (false, 500));
        assert_eq!(
            ledger.try_purchase_by_name("jetpack", 500),
            Err(PurchaseError::UnknownUpgrade {
                name: "jetpack".to_owned(),
            })
        );
        assert_eq!(ledger.purchase_by_name("resource_efficiency", 15), (true, 0));
        assert_eq!(ledger.level(UpgradeKind::ResourceEfficiency), 1);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut ledger = ledger();
        let (mut player, mut allies, mut structures) = fixtures();
        let _ = ledger.purchase(UpgradeKind::PlayerSpeed, 10);
        let _ = ledger.purchase(UpgradeKind::AiCombatStrength, 20);
        let _ = ledger.purchase(UpgradeKind::StructureHealth, 30);
        let _ = ledger.purchase(UpgradeKind::ResourceEfficiency, 15);

        for _ in 0..5 {
            ledger.apply_all(
                &mut player,
                &mut allies,
                &mut structures,
                &PlayerTuning::default(),
                &AllyTuning::default(),
            );
        }

        assert!((player.body.speed - 1.2).abs() < 1e-6);
        assert!((player.gather_speed - 1.2).abs() < 1e-6);
        assert!((allies[0].attack_strength - 1.1).abs() < 1e-6);
        assert_eq!(structures.snapshots()[0].health, 150);
    }

    #[test]
    fn level_zero_leaves_stats_at_base() {
        let ledger = ledger();
        let (mut player, mut allies, mut structures) = fixtures();

        ledger.apply_all(
            &mut player,
            &mut allies,
            &mut structures,
            &PlayerTuning::default(),
            &AllyTuning::default(),
        );

        assert!((player.body.speed - 1.0).abs() < 1e-6);
        assert!((allies[0].attack_strength - 1.0).abs() < 1e-6);
        assert_eq!(structures.snapshots()[0].health, 100);
    }

    #[test]
    fn compounding_mode_reaccumulates_every_call() {
        let tuning = UpgradeTuning {
            compounding: true,
            ..UpgradeTuning::default()
        };
        let mut ledger = UpgradeLedger::new(&tuning);
        let (mut player, mut allies, mut structures) = fixtures();
        let _ = ledger.purchase(UpgradeKind::PlayerSpeed, 10);
        let _ = ledger.purchase(UpgradeKind::StructureHealth, 30);

        for _ in 0..3 {
            ledger.apply_all(
                &mut player,
                &mut allies,
                &mut structures,
                &PlayerTuning::default(),
                &AllyTuning::default(),
            );
        }

        assert!((player.body.speed - 1.6).abs() < 1e-5);
        assert_eq!(structures.snapshots()[0].health, 250);
    }

    proptest! {
        #[test]
        fn cost_follows_repeated_floor_of_one_and_a_half(purchases in 0u32..24) {
            let mut ledger = ledger();
            let mut expected = 20u32;
            for _ in 0..purchases {
                let (bought, _) = ledger.purchase(UpgradeKind::AiCombatStrength, u32::MAX);
                prop_assert!(bought);
                expected = expected * 3 / 2;
            }
            prop_assert_eq!(ledger.cost(UpgradeKind::AiCombatStrength), expected);
            prop_assert_eq!(ledger.level(UpgradeKind::AiCombatStrength), purchases);
        }
    }
}
