//! Battle resolution integration tests
//!
//! End-to-end runs of the resolver against the standard unit catalog,
//! covering the documented worked examples and the siege, plunder,
//! conquest and report stages.

use bastion::battle::{
    AttackKind, BattleReport, BattleRequest, BattleResolver, BattleResult, ReconIntel,
};
use bastion::combat::{BattleOutcome, FixedLuck};
use bastion::conquest::BlockReason;
use bastion::core::{Army, PlayerId, Resources, Side, VillageId, WorldConfig};
use bastion::siege::SiegeTarget;
use bastion::units::UnitCatalog;

/// Points giving a morale of exactly 1.0
fn neutral_points(request: &mut BattleRequest) {
    request.attacker_points = 1000;
    request.defender_points = 700;
}

fn raid_of(attacker: Army) -> BattleRequest {
    let mut request = BattleRequest::new(attacker, Army::new());
    neutral_points(&mut request);
    request
}

#[test]
fn test_ratio_two_attacker_keeps_most_defender_wiped() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    // 25 axes = 1000 offense, 10 swords = 500 defense against infantry
    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    let result = &resolution.result;

    assert_eq!(result.outcome, BattleOutcome::AttackerWin);
    assert!((result.ratio - 2.0).abs() < 1e-9);
    // 25 * 2^-1.5 = 8.84, rounded up
    assert_eq!(result.attacker.lost.count("axe"), 9);
    assert_eq!(result.attacker.survivors.count("axe"), 16);
    assert_eq!(result.defender.lost.count("sword"), 10);
    assert_eq!(result.defender.survivors.count("sword"), 0);
}

#[test]
fn test_wall_raises_defense() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);
    request.wall_level = 15;

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    let wall = 1.037f64.powi(10) * 1.05f64.powi(5);
    assert!((result.modifiers.wall_multiplier() - wall).abs() < 1e-9);
    assert!((result.defense - 500.0 * wall).abs() < 1e-6);
    assert!((result.ratio - 1000.0 / (500.0 * wall)).abs() < 1e-9);
}

#[test]
fn test_vault_plunder_example() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig {
        vault_percent: 10.0,
        ..WorldConfig::default()
    };
    let resolver = BattleResolver::new(&catalog, &config);

    // 24 spears carry exactly 600
    let mut request = raid_of(Army::new().with("spear", 24));
    request.resources = Resources::uniform(1000);

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    assert_eq!(result.plunder, Resources::uniform(200));
    assert_eq!(result.vault_protection, Some(Resources::uniform(100)));

    let details = result.plunder_details.unwrap();
    assert_eq!(details.lootable, Resources::uniform(900));
    assert_eq!(details.carry_capacity, 600);
    assert_eq!(details.carry_used, 600);
    assert_eq!(details.carry_unused, 0);
    assert!(!details.cap_applied);
}

#[test]
fn test_three_nobles_lower_allegiance() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let request = raid_of(Army::new().with("axe", 100).with("snob", 3));
    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;

    let allegiance = result.allegiance.unwrap();
    assert_eq!(allegiance.start, 100);
    assert_eq!(allegiance.dropped, 75);
    assert_eq!(allegiance.end, 25);
    assert!(!allegiance.captured);
    assert!(result.transfer.is_none());
}

#[test]
fn test_capture_transfers_ownership() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = raid_of(Army::new().with("axe", 100).with("snob", 4));
    request.attacker_player_id = PlayerId(7);
    request.defender_village_id = VillageId(42);

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    let result = &resolution.result;
    let allegiance = result.allegiance.unwrap();

    assert!(allegiance.captured);
    assert_eq!(allegiance.end, config.post_capture_allegiance);
    let transfer = result.transfer.unwrap();
    assert_eq!(transfer.village_id, VillageId(42));
    assert_eq!(transfer.new_owner_id, PlayerId(7));
    assert!(resolution.metrics.captured);
}

#[test]
fn test_conquest_cooldown_blocks() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = raid_of(Army::new().with("axe", 100).with("snob", 4));
    request.conquest_cooldown_active = true;

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    let allegiance = result.allegiance.unwrap();
    assert!(allegiance.blocked);
    assert_eq!(allegiance.reason, Some(BlockReason::ConquestCooldown));
    assert_eq!(allegiance.end, 100);
    assert!(!result.captured());
}

#[test]
fn test_lost_battle_blocks_conquest() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(
        Army::new().with("snob", 1),
        Army::new().with("sword", 1000),
    );
    neutral_points(&mut request);

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    assert_eq!(result.outcome, BattleOutcome::DefenderHold);
    let allegiance = result.allegiance.unwrap();
    assert_eq!(allegiance.reason, Some(BlockReason::NoWin));
    assert_eq!(allegiance.end, 100);
}

#[test]
fn test_siege_damages_wall_and_building() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = raid_of(Army::new().with("axe", 50).with("ram", 10).with("catapult", 28));
    request.kind = AttackKind::Siege;
    request.wall_level = 5;
    request.siege_target = Some(SiegeTarget {
        building: "barracks".to_string(),
        level: 10,
    });

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    let siege = &resolution.result.siege;

    // Level 5 needs ceil(2 + 2.5) = 5 rams per level
    assert_eq!(siege.wall.start, 5);
    assert_eq!(siege.wall.end, 3);
    // Level 10 needs ceil(8 + 20) = 28 catapults per level
    let building = siege.building.as_ref().unwrap();
    assert_eq!(building.target, "barracks");
    assert_eq!(building.end, 9);
    assert!(resolution.metrics.siege_occurred);
}

#[test]
fn test_unknown_units_are_conserved() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(
        Army::new().with("axe", 25).with("dragon", 7),
        Army::new().with("sword", 10),
    );
    neutral_points(&mut request);

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    // Unknown units add no power: same ratio as without them
    assert!((result.ratio - 2.0).abs() < 1e-9);
    assert_eq!(result.attacker.sent.count("dragon"), 7);
    assert_eq!(
        result.attacker.lost.count("dragon") + result.attacker.survivors.count("dragon"),
        7
    );
}

#[test]
fn test_raid_bonus_extends_carry() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig {
        raid_bonus: 1.5,
        ..WorldConfig::default()
    };
    let resolver = BattleResolver::new(&catalog, &config);

    let mut attack = raid_of(Army::new().with("light", 10));
    attack.resources = Resources::uniform(1000);
    let mut raid = attack.clone();
    raid.kind = AttackKind::Raid;

    let attack_result = resolver.resolve(&attack, &mut FixedLuck::neutral()).unwrap().result;
    let raid_result = resolver.resolve(&raid, &mut FixedLuck::neutral()).unwrap().result;

    // 800 split 266/266/266 plus 2 leftover by priority
    assert_eq!(attack_result.plunder, Resources::new(267, 267, 266));
    assert_eq!(raid_result.plunder, Resources::uniform(400));
    assert_eq!(raid_result.plunder_details.unwrap().carry_capacity, 1200);
}

#[test]
fn test_attacker_scouts_see_village() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = raid_of(Army::new().with("axe", 25).with("spy", 5));
    request.resources = Resources::uniform(1000);
    request.wall_level = 3;

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    let report = &resolution.attacker_report;
    assert_eq!(report.perspective, Side::Attacker);

    // Carry 250: 83 each plus one wood
    assert_eq!(resolution.result.plunder, Resources::new(84, 83, 83));
    match report.intel.as_ref().unwrap() {
        ReconIntel::Village { resources, wall_level } => {
            assert_eq!(*resources, Resources::new(916, 917, 917));
            assert_eq!(*wall_level, 3);
        }
        other => panic!("unexpected intel: {:?}", other),
    }
    assert!(resolution.defender_report.intel.is_none());
}

#[test]
fn test_defender_scouts_see_attackers() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(
        Army::new().with("axe", 1),
        Army::new().with("sword", 100).with("spy", 100),
    );
    neutral_points(&mut request);

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    assert_eq!(resolution.result.outcome, BattleOutcome::DefenderHold);
    assert_eq!(resolution.result.defender.survivors.count("spy"), 99);

    let report = &resolution.defender_report;
    assert_eq!(report.perspective, Side::Defender);
    match report.intel.as_ref().unwrap() {
        ReconIntel::Army { survivors } => assert_eq!(survivors.count("axe"), 0),
        other => panic!("unexpected intel: {:?}", other),
    }
    assert!(resolution.attacker_report.intel.is_none());
}

#[test]
fn test_night_bonus_recorded_in_trace() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig {
        night_bonus_enabled: true,
        ..WorldConfig::default()
    };
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);
    // 23:00 UTC
    request.timestamp = 23 * 3600;

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    assert_eq!(result.modifiers.night_bonus(), Some(1.5));
    assert!((result.defense - 750.0).abs() < 1e-9);
}

#[test]
fn test_result_serializes_to_json() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);

    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    let json = serde_json::to_value(&resolution.attacker_report).unwrap();
    assert_eq!(json["perspective"], "attacker");
    assert_eq!(json["outcome"], serde_json::json!(resolution.result.outcome));
    assert!(json.get("intel").is_none());
}

#[test]
fn test_undefended_result_reloads_from_json() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let request = BattleRequest::new(Army::new().with("axe", 10), Army::new());
    let resolution = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap();
    assert_eq!(resolution.result.ratio, f64::INFINITY);

    let json = serde_json::to_string(&resolution.result).unwrap();
    assert!(json.contains(r#""ratio":null"#));
    let back: BattleResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, resolution.result);

    let json = serde_json::to_string(&resolution.attacker_report).unwrap();
    let back: BattleReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, resolution.attacker_report);
}

#[test]
fn test_finite_ratio_reloads_from_json() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["ratio"], serde_json::json!(2.0));
    let back: BattleResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_defender_block_reports_present_troops() {
    let catalog = UnitCatalog::standard();
    let config = WorldConfig::default();
    let resolver = BattleResolver::new(&catalog, &config);

    let mut request = BattleRequest::new(Army::new().with("axe", 25), Army::new().with("sword", 10));
    neutral_points(&mut request);

    let result = resolver.resolve(&request, &mut FixedLuck::neutral()).unwrap().result;
    assert_eq!(result.defender.present.count("sword"), 10);

    let json = serde_json::to_value(&result).unwrap();
    let keys: Vec<&str> = json["defender"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["lost", "present", "survivors"]);
    assert_eq!(json["defender"]["present"]["sword"], 10);
    assert!(json["attacker"].get("sent").is_some());
}

#[test]
fn test_request_from_json_defaults() {
    let request: BattleRequest = serde_json::from_str(r#"{"attacker": {"axe": 10}}"#).unwrap();
    assert_eq!(request.attacker.count("axe"), 10);
    assert!(request.defender.is_empty());
    assert_eq!(request.allegiance, 100);
    assert_eq!(request.kind, AttackKind::Attack);
}
