use super::*;

use chrono::TimeZone;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn temp_file(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "chess_terminal_stats_{tag}_{}.json",
        std::process::id()
    ))
}

const WHITE_WINS: GameOutcome = GameOutcome {
    winner: Some(Color::White),
    loser: Some(Color::Black),
    draw: false,
};

const DRAWN: GameOutcome = GameOutcome {
    winner: None,
    loser: None,
    draw: true,
};

#[test]
fn test_record_win_and_draw() {
    let mut ledger = StatsLedger::new();
    ledger.record_game("alice", "bob", WHITE_WINS, at(1_000));
    ledger.record_game("bob", "alice", DRAWN, at(2_000));

    let alice = ledger.get("alice").unwrap();
    assert_eq!((alice.wins, alice.losses, alice.draws), (1, 0, 1));
    assert_eq!(alice.updated_at, at(2_000));
    let bob = ledger.get("bob").unwrap();
    assert_eq!((bob.wins, bob.losses, bob.draws), (0, 1, 1));
    assert_eq!(bob.games(), 2);
    assert!(ledger.get("carol").is_none());
}

#[test]
fn test_black_win_credits_black() {
    let mut ledger = StatsLedger::new();
    let outcome = GameOutcome {
        winner: Some(Color::Black),
        loser: Some(Color::White),
        draw: false,
    };
    ledger.record_game("alice", "bob", outcome, at(0));
    assert_eq!(ledger.get("bob").unwrap().wins, 1);
    assert_eq!(ledger.get("alice").unwrap().losses, 1);
}

#[test]
fn test_standings_order() {
    let mut ledger = StatsLedger::new();
    ledger.record_game("carol", "dave", WHITE_WINS, at(0));
    ledger.record_game("bob", "alice", WHITE_WINS, at(0));
    ledger.record_game("bob", "erin", WHITE_WINS, at(0));

    let names: Vec<&str> = ledger.standings().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["bob", "carol", "alice", "dave", "erin"]);

    let table = ledger.render_table();
    assert!(table.starts_with("Player"));
    assert_eq!(table.lines().count(), 2 + 5);
    assert!(table.lines().nth(2).unwrap().starts_with("bob"));
}

#[test]
fn test_missing_file_is_empty() {
    let path = temp_file("missing");
    let _ = std::fs::remove_file(&path);
    assert!(StatsLedger::load(&path).unwrap().is_empty());
}

#[test]
fn test_save_and_load() {
    let path = temp_file("persist");
    let mut ledger = StatsLedger::new();
    ledger.record_game("alice", "bob", DRAWN, at(1_700_000_000));
    ledger.save(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["alice"]["draws"], 1);
    assert!(json["bob"]["updated_at"].is_string());

    assert_eq!(StatsLedger::load(&path).unwrap(), ledger);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_corrupt_file_is_an_error() {
    let path = temp_file("corrupt");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        StatsLedger::load(&path),
        Err(StatsError::Parse { .. })
    ));
    std::fs::remove_file(&path).unwrap();
}
