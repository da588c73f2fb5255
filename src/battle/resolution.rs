//! Battle resolution pipeline
//!
//! One pass, no retries:
//! 1. Class shares and raw power
//! 2. Modifier pipeline (overstack, wall, environment, morale, luck)
//! 3. Ratio, outcome and casualties
//! 4. Siege damage from surviving rams and catapults
//! 5. Plunder (attacker win only)
//! 6. Conquest (when conquest units were sent)
//! 7. Result, per-side reports and metrics
//!
//! The resolver only borrows the catalog and world config, so any number of
//! battles can resolve at once against the same data.

use std::time::Instant;

use crate::battle::metrics::BattleMetrics;
use crate::battle::report::BattleReport;
use crate::battle::request::{AttackKind, BattleRequest};
use crate::battle::result::BattleResult;
use crate::combat::{
    apply_modifiers, battle_ratio, calculate_casualties, class_shares, defensive_power,
    determine_winner, offensive_power, population, LuckSource, ModifierContext,
};
use crate::conquest::{resolve_conquest, OwnershipTransfer};
use crate::core::config::WorldConfig;
use crate::core::error::Result;
use crate::core::types::{Army, BattleId};
use crate::plunder::{resolve_plunder, PriorityOrder, VillageStores};
use crate::siege::resolve_siege;
use crate::units::{UnitCatalog, UnitRole};

/// A resolved battle with its reports and metrics
#[derive(Debug, Clone, PartialEq)]
pub struct BattleResolution {
    pub result: BattleResult,
    pub attacker_report: BattleReport,
    pub defender_report: BattleReport,
    pub metrics: BattleMetrics,
}

/// Head count of units with the given role
pub fn count_role(army: &Army, catalog: &UnitCatalog, role: UnitRole) -> u64 {
    army.iter()
        .filter(|(id, _)| catalog.role_of(id.as_str()) == Some(role))
        .map(|(_, count)| count)
        .sum()
}

/// Stateless battle resolver bound to one world's data
#[derive(Debug, Clone, Copy)]
pub struct BattleResolver<'a> {
    catalog: &'a UnitCatalog,
    config: &'a WorldConfig,
    priority: PriorityOrder,
}

impl<'a> BattleResolver<'a> {
    pub fn new(catalog: &'a UnitCatalog, config: &'a WorldConfig) -> Self {
        Self {
            catalog,
            config,
            priority: PriorityOrder::default(),
        }
    }

    /// Override the resource order used for loot remainders
    pub fn with_priority(mut self, priority: PriorityOrder) -> Self {
        self.priority = priority;
        self
    }

    pub fn catalog(&self) -> &'a UnitCatalog {
        self.catalog
    }

    pub fn config(&self) -> &'a WorldConfig {
        self.config
    }

    /// Resolve one battle
    ///
    /// Fails only on an internal accounting bug; every game-level outcome,
    /// including blocked conquest, is part of the returned result.
    pub fn resolve<L: LuckSource + ?Sized>(
        &self,
        request: &BattleRequest,
        luck: &mut L,
    ) -> Result<BattleResolution> {
        let started = Instant::now();
        let battle_id = BattleId::new();
        let catalog = self.catalog;
        let config = self.config;

        self.warn_unknown_units(battle_id, request);

        // Raw power
        let defender_shares = class_shares(&request.defender, catalog);
        let raw_offense = offensive_power(&request.attacker, &defender_shares, catalog);
        let raw_defense = defensive_power(&request.defender, &request.attacker, catalog);
        tracing::debug!(%battle_id, raw_offense, raw_defense, "Raw power computed");

        // Modifiers
        let context = ModifierContext {
            defending_population: population(&request.defender, catalog),
            wall_level: request.wall_level,
            battle_hour: request.battle_hour(),
            attacker_points: request.attacker_points,
            defender_points: request.defender_points,
        };
        let modified = apply_modifiers(raw_offense, raw_defense, &context, config, luck);

        // Outcome and casualties
        let ratio = battle_ratio(modified.offense, modified.defense);
        let outcome = determine_winner(ratio);
        let attacker_won = outcome.attacker_won();
        let casualties = calculate_casualties(ratio, &request.attacker, &request.defender)?;
        tracing::debug!(%battle_id, ratio, ?outcome, "Casualties computed");

        // Siege
        let survivors = &casualties.attacker.survivors;
        let siege = resolve_siege(
            request.wall_level,
            request.siege_target.as_ref(),
            count_role(survivors, catalog, UnitRole::Ram),
            count_role(survivors, catalog, UnitRole::Catapult),
            config.speed,
            attacker_won,
        );

        // Plunder
        let plunder = attacker_won.then(|| {
            let carry_multiplier = match request.kind {
                AttackKind::Raid => config.carry_multiplier * config.raid_bonus,
                AttackKind::Attack | AttackKind::Siege => config.carry_multiplier,
            };
            let village = VillageStores {
                stored: request.resources,
                hidden: request.hidden_resources,
            };
            resolve_plunder(&village, survivors, catalog, config, carry_multiplier, &self.priority)
        });

        // Conquest
        let allegiance = (count_role(&request.attacker, catalog, UnitRole::Conquest) > 0).then(|| {
            resolve_conquest(
                request.allegiance,
                count_role(survivors, catalog, UnitRole::Conquest),
                attacker_won,
                request.conquest_cooldown_active,
                config,
            )
        });
        let transfer = allegiance.filter(|a| a.captured).map(|_| OwnershipTransfer {
            village_id: request.defender_village_id,
            new_owner_id: request.attacker_player_id,
        });

        let result = BattleResult {
            battle_id,
            timestamp: request.timestamp,
            kind: request.kind,
            outcome,
            ratio,
            offense: modified.offense,
            defense: modified.defense,
            modifiers: modified.trace,
            attacker: casualties.attacker,
            defender: casualties.defender.into(),
            siege,
            plunder: plunder.map(|p| p.loot).unwrap_or_default(),
            plunder_details: plunder.map(|p| p.details),
            vault_protection: plunder.map(|p| p.vault_protection),
            allegiance,
            transfer,
        };

        let attacker_report = BattleReport::for_attacker(&result, &request.resources, catalog);
        let defender_report = BattleReport::for_defender(&result, catalog);
        let metrics = BattleMetrics::from_result(&result, started.elapsed());

        tracing::info!(
            %battle_id,
            outcome = ?metrics.outcome,
            ratio,
            siege = metrics.siege_occurred,
            conquest = metrics.conquest_occurred,
            captured = metrics.captured,
            latency_micros = metrics.latency_micros,
            "Battle resolved"
        );

        Ok(BattleResolution {
            result,
            attacker_report,
            defender_report,
            metrics,
        })
    }

    fn warn_unknown_units(&self, battle_id: BattleId, request: &BattleRequest) {
        let unknown = request
            .attacker
            .iter()
            .chain(request.defender.iter())
            .filter(|(id, count)| *count > 0 && !self.catalog.contains(id.as_str()));
        for (id, count) in unknown {
            tracing::warn!(%battle_id, unit = %id, count, "Unknown unit id contributes no power");
        }
    }
}
