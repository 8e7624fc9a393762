mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use agent_core::{Location, OperationMode};
use runtime::{Event, HeuristicOracle, Processor, SweepScanner, ThreatEvent, Topic};

use common::{ScriptedScanner, StubOracle, hostile, scanning_only};

/// Scan Acquisition and Loss Scenario
///
/// The first sweep reports three candidates: an already destroyed threat,
/// a low severity one far away, and a severe one. The rule-based oracle
/// must skip the first, decline the second and engage the third. The next
/// sweep comes back empty, so the target is dropped.
#[tokio::test(start_paused = true)]
async fn scan_acquires_first_approved_threat_then_loses_it() {
    let destroyed = hostile("T-dead", Location::new(5.0, 0.0, 0.0), 9).with_health(0.0);
    let distant = hostile("T-low", Location::new(50.0, 0.0, 0.0), 2);
    let severe = hostile("T-high", Location::new(0.0, 80.0, 0.0), 8);

    let scanner = ScriptedScanner::new(vec![vec![destroyed, distant, severe.clone()]], Vec::new());
    let processor = Processor::builder()
        .config(scanning_only())
        .oracle(HeuristicOracle::default())
        .scanner(scanner)
        .build()
        .unwrap();
    let mut threat_rx = processor.subscribe_events(Topic::Threat);

    processor.start().unwrap();
    assert!(processor.status().last_scan.is_none());

    // ================================================================
    // PHASE 1: First sweep (t = 100ms)
    // ================================================================
    sleep(Duration::from_millis(150)).await;

    assert_eq!(processor.active_threat(), Some(severe));
    let status = processor.status();
    assert_eq!(status.mode, OperationMode::Combat);
    assert!(status.last_scan.is_some());

    // ================================================================
    // PHASE 2: Empty sweep (t = 200ms)
    // ================================================================
    sleep(Duration::from_millis(100)).await;

    assert!(processor.active_threat().is_none());
    assert_eq!(processor.status().mode, OperationMode::Normal);
    assert_eq!(processor.metrics().scans, 2);
    assert_eq!(processor.metrics().contacts, 3);

    processor.stop().await.unwrap();

    let events: Vec<_> = std::iter::from_fn(|| threat_rx.try_recv().ok()).collect();
    assert!(matches!(
        events.as_slice(),
        [
            Event::Threat(ThreatEvent::Acquired { threat }),
            Event::Threat(ThreatEvent::Lost { threat_id }),
        ] if threat.id == "T-high" && threat_id == "T-high"
    ));
}

#[tokio::test(start_paused = true)]
async fn declined_threats_leave_processor_idle() {
    let oracle = Arc::new(StubOracle::new(Some(false), None));
    let contacts = vec![
        hostile("T-1", Location::new(10.0, 0.0, 0.0), 9),
        hostile("T-2", Location::new(20.0, 0.0, 0.0), 6),
    ];
    let processor = Processor::builder()
        .config(scanning_only())
        .shared_oracle(oracle.clone())
        .scanner(ScriptedScanner::always(contacts))
        .build()
        .unwrap();

    processor.start().unwrap();
    sleep(Duration::from_millis(350)).await;

    assert_eq!(oracle.engage_calls(), 6);
    assert!(processor.active_threat().is_none());
    assert_eq!(processor.status().mode, OperationMode::Normal);

    processor.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn later_approval_replaces_active_target() {
    let first = hostile("T-1", Location::new(10.0, 0.0, 0.0), 9);
    let second = hostile("T-2", Location::new(0.0, 40.0, 0.0), 3);
    let scanner = ScriptedScanner::new(vec![vec![first]], vec![second.clone()]);

    let processor = Processor::builder()
        .config(scanning_only())
        .oracle(StubOracle::new(Some(true), None))
        .scanner(scanner)
        .build()
        .unwrap();

    processor.start().unwrap();
    sleep(Duration::from_millis(250)).await;

    assert_eq!(processor.active_threat(), Some(second));
    assert_eq!(processor.status().mode, OperationMode::Combat);

    processor.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn sweep_scanner_feeds_the_processor() {
    let processor = Processor::builder()
        .config(scanning_only())
        .oracle(StubOracle::new(Some(true), None))
        .scanner(SweepScanner::with_seed(11))
        .build()
        .unwrap();

    processor.start().unwrap();
    // Stop between ticks so the fiftieth sweep is not raced by shutdown.
    sleep(Duration::from_millis(5050)).await;
    processor.stop().await.unwrap();

    let metrics = processor.metrics();
    assert_eq!(metrics.scans, 50);
    assert!(metrics.contacts > 0);
    // Every non-empty sweep was approved on its first candidate.
    assert!(metrics.decisions > 0);
    assert!(metrics.decisions <= metrics.scans);
}
