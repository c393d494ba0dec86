//! End-to-end tests over the public crate surface
//!
//! These drive the full pipeline the way the daemon does: wire lines into
//! the ingest, snapshots out of the store, frames out of the render machine.
//! Tests cover:
//! - The happy-path match lifecycle from start through postgame reset
//! - Arrival-order seat placement
//! - The no-stock sentinel latch against late percent updates
//! - Fault isolation for malformed and impossible input
//! - TCP delivery through the line server

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use stockboard_core::config::TimingConfig;
use stockboard_core::layout::layout_for;
use stockboard_core::state::{DamageDisplay, MatchPhase};
use stockboard_core::{
    Config, Ingest, MatchStore, MemoryDisplay, NoIcons, RenderMachine, RenderPhase, Resolver, Rgb,
};

fn player_json(index: u8, name: &str, variant: &str) -> String {
    format!(
        r#"{{"playerIndex":{index},"nametag":"","displayName":"{name}","CharacterColorName":"{variant}","characterInfo":{{"name":"{name}"}}}}"#
    )
}

fn game_start_json(players: &[(u8, &str, &str)], stage: &str, is_teams: bool) -> String {
    let entries: Vec<String> = players
        .iter()
        .map(|&(index, name, variant)| player_json(index, name, variant))
        .collect();
    format!(
        r#"{{"messageType":"gameStart","players":[{}],"stageInfo":{{"name":"{stage}"}},"isTeams":{is_teams}}}"#,
        entries.join(",")
    )
}

fn ingest_pair() -> (MatchStore, Ingest) {
    let config = Config::default();
    let store = MatchStore::new(config.display.grid_view_4p);
    let ingest = Ingest::new(store.clone(), Resolver::new(config.colors));
    (store, ingest)
}

fn machine(store: MatchStore) -> RenderMachine<MemoryDisplay> {
    let timing = TimingConfig {
        postgame_hold_ms: 30,
        ..TimingConfig::default()
    };
    RenderMachine::new(
        store,
        MemoryDisplay::new(),
        Box::new(NoIcons),
        Config::default().colors,
        timing,
    )
}

// =============================================================================
// Test 1: Full Match Lifecycle
// =============================================================================

/// A complete match: start, damage, stock loss, end, postgame hold, reset.
#[test]
fn full_match_lifecycle() {
    let (store, ingest) = ingest_pair();
    let mut machine = machine(store.clone());
    let start = Instant::now();

    // Boot straight into the match: a start event beats the splash.
    ingest
        .apply_json(&game_start_json(
            &[(0, "Fox", "Default"), (1, "Marth", "Red")],
            "Final Destination",
            false,
        ))
        .unwrap();
    assert_eq!(store.snapshot().phase, MatchPhase::Starting);

    machine.tick(start).unwrap();
    assert_eq!(machine.phase(), RenderPhase::Starting);
    machine.tick(start).unwrap();
    assert_eq!(machine.phase(), RenderPhase::Active);
    assert_eq!(store.snapshot().phase, MatchPhase::Live);

    // Damage and a stock loss flow through to the snapshot.
    ingest
        .apply_json(r#"{"messageType":"playerPercent","playerIndex":1,"percent":87.6}"#)
        .unwrap();
    ingest
        .apply_json(r#"{"messageType":"countChange","playerIndex":1,"stocksRemaining":3}"#)
        .unwrap();
    let snapshot = store.snapshot();
    let slot = snapshot.slot(1).unwrap();
    assert_eq!(slot.damage, DamageDisplay::Percent(87));
    assert_eq!(slot.stocks, 3);

    // Game end moves the machine to postgame on the next tick.
    ingest
        .apply_json(r#"{"messageType":"gameEnd","gameEndMethod":2,"winnerPlayerIndex":0}"#)
        .unwrap();
    machine.tick(start).unwrap();
    assert_eq!(machine.phase(), RenderPhase::Postgame);
    assert_eq!(store.snapshot().winner, Some(0));

    // After the hold the store resets and the board goes back to waiting.
    machine.tick(start + Duration::from_millis(40)).unwrap();
    assert_eq!(store.snapshot().player_count(), 0);
    machine.tick(start + Duration::from_millis(40)).unwrap();
    assert_eq!(machine.phase(), RenderPhase::Waiting);
}

// =============================================================================
// Test 2: Arrival Order Drives Placement
// =============================================================================

/// Seats render in the order the start event listed them, not seat order.
#[test]
fn arrival_order_places_seats() {
    let (store, ingest) = ingest_pair();
    ingest
        .apply_json(&game_start_json(
            &[(2, "Fox", "Red"), (0, "Marth", "Blue"), (1, "Kirby", "Green")],
            "Battlefield",
            false,
        ))
        .unwrap();

    let snapshot = store.snapshot();
    let order: Vec<u8> = snapshot.seats_in_arrival_order().map(|(i, _)| i).collect();
    assert_eq!(order, vec![2, 0, 1]);

    let mut machine = machine(store);
    let now = Instant::now();
    machine.tick(now).unwrap();
    machine.tick(now).unwrap();

    // Band 0 carries seat 2's red background.
    let layout = layout_for(3, false).unwrap();
    let fill = layout.seats[0].fill;
    let display = machine.into_display();
    assert_eq!(display.visible().pixel(fill.x + 1, fill.y + 1), Rgb(102, 0, 0));
}

// =============================================================================
// Test 3: No-Stock Sentinel Latch
// =============================================================================

/// A zero-stock seat shows the sentinel and ignores percent updates that
/// arrive after the final stock was lost.
#[test]
fn no_stock_sentinel_latches() {
    let (store, ingest) = ingest_pair();
    ingest
        .apply_json(&game_start_json(
            &[(0, "Fox", "Default"), (1, "Marth", "Red")],
            "Yoshi's Story",
            false,
        ))
        .unwrap();
    store.mark_live(store.snapshot().generation);

    ingest
        .apply_json(r#"{"messageType":"countChange","playerIndex":0,"stocksRemaining":0}"#)
        .unwrap();
    ingest
        .apply_json(r#"{"messageType":"playerPercent","playerIndex":0,"percent":55.0}"#)
        .unwrap();

    let snapshot = store.snapshot();
    assert_eq!(snapshot.slot(0).unwrap().damage, DamageDisplay::NoStock);
    assert_eq!(snapshot.slot(0).unwrap().damage.to_string(), "-");
}

// =============================================================================
// Test 4: Fault Isolation
// =============================================================================

/// Garbage lines and impossible seats never disturb the running match.
#[test]
fn bad_input_cannot_disturb_a_match() {
    let (store, ingest) = ingest_pair();
    ingest
        .apply_json(&game_start_json(
            &[(0, "Fox", "Default"), (1, "Marth", "Red")],
            "Battlefield",
            false,
        ))
        .unwrap();
    store.mark_live(store.snapshot().generation);
    let before = store.snapshot();

    assert!(ingest.apply_json("not json at all").is_err());
    assert!(ingest.apply_json(r#"{"messageType":"unheardOf"}"#).is_err());
    ingest
        .apply_json(r#"{"messageType":"playerPercent","playerIndex":9,"percent":10.0}"#)
        .unwrap();
    // A start event with a duplicate seat is dropped whole.
    ingest
        .apply_json(&game_start_json(
            &[(0, "Fox", "Default"), (0, "Marth", "Red")],
            "Battlefield",
            false,
        ))
        .unwrap();

    let after = store.snapshot();
    assert_eq!(after.phase, before.phase);
    assert_eq!(after.player_count(), before.player_count());
    assert_eq!(after.slot(0).unwrap().damage, before.slot(0).unwrap().damage);
}

// =============================================================================
// Test 5: TCP Delivery
// =============================================================================

async fn wait_for<F: Fn() -> bool>(predicate: F) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

/// Lines written over TCP land in the store, and a reconnect is accepted.
#[tokio::test]
async fn tcp_lines_reach_the_store() {
    let (store, ingest) = ingest_pair();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(stockboard_core::ingest::serve(listener, ingest));

    {
        let mut producer = TcpStream::connect(addr).await.unwrap();
        let line = format!(
            "{}\n",
            game_start_json(&[(0, "Fox", "Default"), (1, "Marth", "Red")], "Battlefield", false)
        );
        producer.write_all(line.as_bytes()).await.unwrap();
        producer.flush().await.unwrap();
        let store = store.clone();
        wait_for(move || store.snapshot().player_count() == 2).await;
    }

    // The producer dropped; a new connection keeps feeding the same match.
    let mut producer = TcpStream::connect(addr).await.unwrap();
    producer
        .write_all(b"{\"messageType\":\"countChange\",\"playerIndex\":1,\"stocksRemaining\":2}\n")
        .await
        .unwrap();
    producer.flush().await.unwrap();
    let watcher = store.clone();
    wait_for(move || watcher.snapshot().slot(1).map(|s| s.stocks) == Some(2)).await;
}
