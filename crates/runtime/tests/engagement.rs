mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use agent_core::{Location, OperationMode};
use runtime::{
    CombatAction, CombatEvent, Event, HeuristicOracle, Processor, ThreatEvent, Topic,
};

use common::{ScriptedScanner, StubOracle, engagement_only, hostile};

fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

/// Missile Elimination Scenario
///
/// A severity 8 threat well beyond engagement distance is reported; an
/// oracle that always answers "attack with missile" (40 per hit) must bring
/// it from 100 to 0 in exactly three engagement ticks, and the processor
/// must return to Normal on the third tick.
#[tokio::test(start_paused = true)]
async fn missile_attacks_eliminate_threat_in_three_ticks() {
    let oracle = Arc::new(StubOracle::attacking("missile"));
    let processor = Processor::builder()
        .config(engagement_only())
        .shared_oracle(oracle.clone())
        .scanner(ScriptedScanner::empty())
        .build()
        .expect("processor should build");

    let mut threat_rx = processor.subscribe_events(Topic::Threat);
    let mut combat_rx = processor.subscribe_events(Topic::Combat);
    let mut status_rx = processor.subscribe_events(Topic::Status);

    processor.start().unwrap();

    // ================================================================
    // PHASE 1: Acquisition
    // ================================================================
    let threat = hostile("THREAT-001", Location::new(100.0, 100.0, 0.0), 8);
    assert!(Location::ORIGIN.distance(threat.location) > processor.config().engagement_distance);

    processor.report_threat(threat).unwrap();
    assert_eq!(processor.status().mode, OperationMode::Combat);

    // ================================================================
    // PHASE 2: Two ticks in (t = 250ms)
    // ================================================================
    sleep(Duration::from_millis(250)).await;

    assert_eq!(oracle.combat_calls(), 2);
    assert_eq!(processor.active_threat().map(|t| t.health), Some(20.0));
    assert_eq!(processor.status().mode, OperationMode::Combat);

    // ================================================================
    // PHASE 3: Third tick eliminates (t = 350ms)
    // ================================================================
    sleep(Duration::from_millis(100)).await;

    assert_eq!(oracle.combat_calls(), 3);
    assert!(processor.active_threat().is_none());
    assert_eq!(processor.status().mode, OperationMode::Normal);

    // Idle ticks do not consult the oracle.
    sleep(Duration::from_millis(500)).await;
    assert_eq!(oracle.combat_calls(), 3);

    processor.stop().await.unwrap();

    // ================================================================
    // PHASE 4: Event trail
    // ================================================================
    let remaining: Vec<f64> = drain(&mut combat_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Combat(CombatEvent::Hit { remaining, weapon, .. }) => {
                assert_eq!(weapon, "missile");
                Some(remaining)
            }
            _ => None,
        })
        .collect();
    assert_eq!(remaining, [60.0, 20.0, 0.0]);

    let threat_events = drain(&mut threat_rx);
    assert!(matches!(
        threat_events.as_slice(),
        [
            Event::Threat(ThreatEvent::Acquired { .. }),
            Event::Threat(ThreatEvent::Eliminated { threat_id }),
        ] if threat_id == "THREAT-001"
    ));

    assert_eq!(drain(&mut status_rx).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn move_decisions_close_distance_without_overshoot() {
    let processor = Processor::builder()
        .config(engagement_only())
        .oracle(StubOracle::acting(CombatAction::Move))
        .scanner(ScriptedScanner::empty())
        .build()
        .unwrap();
    let mut movement_rx = processor.subscribe_events(Topic::Movement);

    processor.start().unwrap();
    let target = Location::new(30.0, 40.0, 0.0);
    processor.report_threat(hostile("T-1", target, 5)).unwrap();

    // Ten ticks at 5 m/s with a 100ms step.
    sleep(Duration::from_millis(1050)).await;
    let distance = processor.location().distance(target);
    assert!((distance - 45.0).abs() < 1e-6, "distance was {distance}");
    assert_eq!(drain(&mut movement_rx).len(), 10);

    // Keep going well past the target: it must stop on it.
    sleep(Duration::from_secs(20)).await;
    assert_eq!(processor.location(), target);

    processor.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn retreat_decisions_open_distance() {
    let processor = Processor::builder()
        .config(engagement_only())
        .oracle(StubOracle::acting(CombatAction::Retreat))
        .scanner(ScriptedScanner::empty())
        .build()
        .unwrap();

    processor.start().unwrap();
    let target = Location::new(30.0, 40.0, 0.0);
    processor.report_threat(hostile("T-1", target, 5)).unwrap();

    sleep(Duration::from_millis(1050)).await;
    let distance = processor.location().distance(target);
    assert!((distance - 55.0).abs() < 1e-6, "distance was {distance}");
    assert_eq!(processor.status().mode, OperationMode::Combat);

    processor.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn defend_runs_critical_part_strategies() {
    let processor = Processor::builder()
        .config(engagement_only())
        .oracle(StubOracle::acting(CombatAction::Defend))
        .scanner(ScriptedScanner::empty())
        .build()
        .unwrap();
    let mut combat_rx = processor.subscribe_events(Topic::Combat);

    processor.start().unwrap();
    processor
        .report_threat(hostile("T-1", Location::new(10.0, 0.0, 0.0), 7))
        .unwrap();

    sleep(Duration::from_millis(150)).await;
    processor.stop().await.unwrap();

    // Two strategies each for head, body and both legs.
    assert_eq!(
        drain(&mut combat_rx),
        [Event::Combat(CombatEvent::Defended {
            threat_id: "T-1".to_string(),
            strategies: 8,
        })]
    );
    assert_eq!(processor.active_threat().map(|t| t.health), Some(100.0));
}

#[tokio::test(start_paused = true)]
async fn unrecognized_actions_and_unknown_weapons_are_no_ops() {
    for oracle in [
        StubOracle::acting(CombatAction::Unrecognized),
        StubOracle::attacking("railgun"),
    ] {
        let processor = Processor::builder()
            .config(engagement_only())
            .oracle(oracle)
            .scanner(ScriptedScanner::empty())
            .build()
            .unwrap();

        processor.start().unwrap();
        processor
            .report_threat(hostile("T-1", Location::new(10.0, 0.0, 0.0), 7))
            .unwrap();

        sleep(Duration::from_millis(550)).await;

        assert_eq!(processor.location(), Location::ORIGIN);
        assert_eq!(processor.active_threat().map(|t| t.health), Some(100.0));
        assert_eq!(processor.status().mode, OperationMode::Combat);
        assert_eq!(processor.metrics().decisions, 5);

        processor.stop().await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn oracle_failures_do_not_stop_the_loops() {
    let oracle = Arc::new(StubOracle::failing());
    let mut config = engagement_only();
    config.scan_interval = Duration::from_millis(100);

    let threat = hostile("T-1", Location::new(10.0, 0.0, 0.0), 7);
    let processor = Processor::builder()
        .config(config)
        .shared_oracle(oracle.clone())
        .scanner(ScriptedScanner::always(vec![threat.clone()]))
        .build()
        .unwrap();

    processor.start().unwrap();
    processor.report_threat(threat).unwrap();

    sleep(Duration::from_millis(1050)).await;

    assert_eq!(oracle.combat_calls(), 10);
    assert_eq!(oracle.engage_calls(), 10);
    assert_eq!(processor.metrics().oracle_failures, 20);
    assert!(processor.status().active);
    assert_eq!(processor.status().mode, OperationMode::Combat);
    assert_eq!(processor.active_threat().map(|t| t.health), Some(100.0));

    processor.stop().await.unwrap();
}

/// Rule-based oracle against a close, dangerous threat: the plasma cannon
/// (25 per hit) is the highest priority weapon in range.
#[tokio::test(start_paused = true)]
async fn heuristic_oracle_eliminates_close_threat() {
    let processor = Processor::builder()
        .config(engagement_only())
        .oracle(HeuristicOracle::default())
        .scanner(ScriptedScanner::empty())
        .build()
        .unwrap();

    processor.start().unwrap();
    processor
        .report_threat(hostile("T-1", Location::new(15.0, 0.0, 0.0), 8))
        .unwrap();

    sleep(Duration::from_millis(350)).await;
    assert_eq!(processor.active_threat().map(|t| t.health), Some(25.0));

    sleep(Duration::from_millis(100)).await;
    assert!(processor.active_threat().is_none());
    assert_eq!(processor.status().mode, OperationMode::Normal);
    assert_eq!(processor.metrics().hits, 4);

    processor.stop().await.unwrap();
}
