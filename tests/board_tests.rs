//! Turn engine integration tests.
//!
//! Scripted seats play against prepared walls so every draw and claim is
//! known in advance.

use std::cell::RefCell;
use std::rc::Rc;

use rust_mahjong::{
    Action, ActionKind, AutoPlayer, Board, DecisionPoint, EngineError, Hand, HandEnd, HandEnded, HandOutcome,
    Player, Relative, RoundState, Seat, TableConfig, TableObserver, TableView, Tile, Wall, SEATS,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn t(notation: &str) -> Tile {
    notation.parse::<Hand>().unwrap().tiles()[0]
}

type Script = Box<dyn FnMut(Relative, Tile) -> Option<Action>>;

/// Everything a scripted seat was told.
#[derive(Default)]
struct SeatLog {
    decisions: Vec<(Relative, Tile)>,
    failed: u32,
    ended: Vec<HandEnded>,
}

struct ScriptedPlayer {
    name: String,
    script: Script,
    log: Rc<RefCell<SeatLog>>,
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn init_hand(&mut self, _tiles: &[Tile]) {}

    fn decide(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        self.log.borrow_mut().decisions.push((from, tile));
        (self.script)(from, tile)
    }

    fn on_claim_failed(&mut self) {
        self.log.borrow_mut().failed += 1;
    }

    fn on_hand_ended(&mut self, ended: &HandEnded) {
        self.log.borrow_mut().ended.push(*ended);
    }

    fn score(&self) -> i32 {
        25_000
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Throw whatever is drawn, never claim.
fn passive() -> Script {
    Box::new(|from, tile| (from == Relative::Own).then(|| Action::draw(tile)))
}

/// Observer that keeps every active-seat change and the latest view.
#[derive(Default)]
struct Watch {
    active: Vec<Option<Seat>>,
    last: Option<TableView>,
    views: usize,
    ended: Vec<HandOutcome>,
}

struct Watcher(Rc<RefCell<Watch>>);

impl TableObserver for Watcher {
    fn on_view(&mut self, view: &TableView) {
        let mut watch = self.0.borrow_mut();
        watch.views += 1;
        watch.last = Some(view.clone());
    }

    fn on_active(&mut self, seat: Option<Seat>) {
        self.0.borrow_mut().active.push(seat);
    }

    fn on_hand_ended(&mut self, outcome: &HandOutcome) {
        self.0.borrow_mut().ended.push(outcome.clone());
    }
}

fn table(scripts: [Script; SEATS]) -> (Board, [Rc<RefCell<SeatLog>>; SEATS], Rc<RefCell<Watch>>) {
    let logs: [Rc<RefCell<SeatLog>>; SEATS] = Default::default();
    let mut next = 0;
    let players = scripts.map(|script| {
        let player = ScriptedPlayer {
            name: format!("seat {}", next),
            script,
            log: Rc::clone(&logs[next]),
        };
        next += 1;
        Box::new(player) as Box<dyn Player>
    });

    let mut board = Board::new(TableConfig::new(), players);
    let watch = Rc::new(RefCell::new(Watch::default()));
    board.add_observer(Box::new(Watcher(Rc::clone(&watch))));
    (board, logs, watch)
}

/// A wall that deals filler, then serves `draws`, then the `reserve` tiles.
fn wall(draws: &[Tile], reserve: &[Tile]) -> Wall {
    let mut tiles: Vec<Tile> = (0..52)
        .map(|i| Tile::from_index(i % Tile::FACES).unwrap())
        .collect();
    tiles.extend_from_slice(draws);
    tiles.extend_from_slice(reserve);
    Wall::from_tiles(tiles, reserve.len())
}

fn play(board: &mut Board, wall: Wall) -> Result<HandOutcome, EngineError> {
    let round = RoundState::new(board.config());
    board.play_hand_with_wall(&round, wall)
}

// =============================================================================
// Claim Arbitration
// =============================================================================

/// Test that a triplet claim beats a run claim and play moves to the
/// claimant.
#[test]
fn test_pong_beats_chow() {
    let five = t("5m");
    let scripts: [Script; SEATS] = [
        Box::new(move |from, _| (from == Relative::Own).then(|| Action::draw(five))),
        Box::new(move |from, tile| {
            (from == Relative::Previous && tile == five)
                .then(|| Action::chow(t("1z"), [t("4m"), five, t("6m")]))
        }),
        passive(),
        Box::new(move |from, tile| (from != Relative::Own && tile == five).then(|| Action::pong(t("9p"), five))),
    ];
    let (mut board, logs, watch) = table(scripts);

    let outcome = play(&mut board, wall(&[t("2s")], &[])).unwrap();

    assert_eq!(outcome.end, HandEnd::Exhausted);
    assert_eq!(outcome.turns, 1);
    assert_eq!(logs[1].borrow().failed, 1);
    assert_eq!(logs[3].borrow().failed, 0);

    let watch = watch.borrow();
    assert_eq!(
        watch.active,
        vec![Some(Seat::new(0)), Some(Seat::new(3)), None]
    );

    let view = watch.last.as_ref().unwrap();
    assert_eq!(view.melds[Seat::new(3)].len(), 1);
    assert_eq!(view.melds[Seat::new(3)][0].kind, ActionKind::Pong);
    assert_eq!(view.concealed[Seat::new(3)], 10);
    assert_eq!(view.concealed[Seat::new(1)], 13);
    assert_eq!(view.discards.iter().copied().collect::<Vec<_>>(), vec![t("9p")]);
    assert_eq!(view.history.len(), 2);
}

/// Test that the claimant's discard is offered to the three other seats.
#[test]
fn test_claim_discard_is_offered_on() {
    let five = t("5m");
    let scripts: [Script; SEATS] = [
        Box::new(move |from, _| (from == Relative::Own).then(|| Action::draw(five))),
        passive(),
        Box::new(move |from, tile| (from != Relative::Own && tile == five).then(|| Action::pong(t("9p"), five))),
        passive(),
    ];
    let (mut board, logs, _) = table(scripts);

    play(&mut board, wall(&[t("2s")], &[])).unwrap();

    let offers_of_nine = |seat: usize| {
        logs[seat]
            .borrow()
            .decisions
            .iter()
            .filter(|(from, tile)| *from != Relative::Own && *tile == t("9p"))
            .count()
    };
    assert_eq!(offers_of_nine(0), 1);
    assert_eq!(offers_of_nine(1), 1);
    assert_eq!(offers_of_nine(2), 0);
    assert_eq!(offers_of_nine(3), 1);
}

/// Test that a win on a discard beats a triplet claim and ends the hand.
#[test]
fn test_ron_beats_pong() {
    let five = t("5m");
    let revealed: Vec<Tile> = "12355m456p789s11z".parse::<Hand>().unwrap().tiles();
    let winning_hand = revealed.clone();
    let scripts: [Script; SEATS] = [
        Box::new(move |from, _| (from == Relative::Own).then(|| Action::draw(five))),
        Box::new(move |from, tile| (from != Relative::Own && tile == five).then(|| Action::pong(t("9p"), five))),
        Box::new(move |from, tile| {
            (from != Relative::Own && tile == five).then(|| Action::ron(five, &winning_hand))
        }),
        passive(),
    ];
    let (mut board, logs, _) = table(scripts);

    let outcome = play(&mut board, wall(&[t("2s"), t("3s")], &[])).unwrap();

    assert_eq!(
        outcome.end,
        HandEnd::Win {
            winner: Seat::new(2),
            kind: ActionKind::Ron,
        }
    );
    assert_eq!(outcome.winning_tile, Some(five));
    assert_eq!(outcome.revealed, revealed);
    assert_eq!(logs[1].borrow().failed, 1);

    let notices: Vec<_> = logs.iter().map(|log| log.borrow().ended[0].winner).collect();
    assert_eq!(
        notices,
        vec![
            Some(Relative::Opposite),
            Some(Relative::Next),
            Some(Relative::Own),
            Some(Relative::Previous),
        ]
    );
    assert!(logs.iter().all(|log| log.borrow().ended[0].kind == Some(ActionKind::Ron)));
}

/// Automated seat that records its ready flag after each lost claim.
struct ReadyTracker {
    inner: AutoPlayer,
    after_failed: Rc<RefCell<Vec<bool>>>,
}

impl Player for ReadyTracker {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn init_hand(&mut self, tiles: &[Tile]) {
        self.inner.init_hand(tiles);
    }

    fn decide(&mut self, from: Relative, tile: Tile) -> Option<Action> {
        self.inner.decide(from, tile)
    }

    fn on_claim_failed(&mut self) {
        self.inner.on_claim_failed();
        self.after_failed.borrow_mut().push(self.inner.is_ready());
    }

    fn on_hand_ended(&mut self, ended: &HandEnded) {
        self.inner.on_hand_ended(ended);
    }

    fn score(&self) -> i32 {
        self.inner.score()
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }
}

/// Test that a ready seat losing a tied win on a discard stays ready.
#[test]
fn test_lost_ron_keeps_ready_seat_locked() {
    let east_discards = [t("9p"), t("1z")];
    let mut east_turn = 0;
    let east: Script = Box::new(move |from, _| {
        (from == Relative::Own).then(|| {
            let discard = east_discards[east_turn.min(1)];
            east_turn += 1;
            Action::draw(discard)
        })
    });
    let south: Script = Box::new(|from, tile| match from {
        Relative::Own => Some(Action::draw(tile)),
        _ if tile == t("1z") => Some(Action::ron(tile, &[tile, tile])),
        _ => None,
    });

    let after_failed = Rc::new(RefCell::new(Vec::new()));
    let west = ReadyTracker {
        inner: AutoPlayer::new("West", 25_000),
        after_failed: Rc::clone(&after_failed),
    };
    let south_log = Rc::new(RefCell::new(SeatLog::default()));
    let players: [Box<dyn Player>; SEATS] = [
        Box::new(ScriptedPlayer {
            name: "East".into(),
            script: east,
            log: Rc::new(RefCell::new(SeatLog::default())),
        }),
        Box::new(ScriptedPlayer {
            name: "South".into(),
            script: south,
            log: Rc::clone(&south_log),
        }),
        Box::new(west),
        Box::new(ScriptedPlayer {
            name: "North".into(),
            script: passive(),
            log: Rc::new(RefCell::new(SeatLog::default())),
        }),
    ];
    let mut board = Board::new(TableConfig::new(), players);
    let ready_views = Rc::new(RefCell::new(Watch::default()));
    board.add_observer(Box::new(Watcher(Rc::clone(&ready_views))));

    // West waits on 1z/5z after declaring on the drawn 5z.
    let mut tiles: Vec<Tile> = Vec::new();
    for notation in ["1112223334445m", "1112223334445p", "123m456p789s11z57z", "1112223334445s"] {
        tiles.extend(notation.parse::<Hand>().unwrap().tiles());
    }
    // East, South, West, North, East.
    tiles.extend([t("9m"), t("3z"), t("5z"), t("2z"), t("9m")]);

    let outcome = play(&mut board, Wall::from_tiles(tiles, 0)).unwrap();

    assert_eq!(
        outcome.end,
        HandEnd::Win {
            winner: Seat::new(1),
            kind: ActionKind::Ron,
        }
    );
    assert_eq!(outcome.turns, 5);
    assert_eq!(*after_failed.borrow(), vec![true]);
    assert_eq!(south_log.borrow().failed, 0);

    let watch = ready_views.borrow();
    let west_riichi = watch
        .last
        .as_ref()
        .unwrap()
        .history
        .iter()
        .any(|record| record.seat == Seat::new(2) && record.action.kind() == ActionKind::Riichi);
    assert!(west_riichi);
}

// =============================================================================
// Quads and Exhaustion
// =============================================================================

/// Test that a concealed quad earns a replacement draw from the reserve for
/// the same seat.
#[test]
fn test_concealed_kong_replacement() {
    let mut calls = 0;
    let scripts: [Script; SEATS] = [
        Box::new(move |from, tile| {
            if from != Relative::Own {
                return None;
            }
            calls += 1;
            if calls == 1 {
                Some(Action::kong(ActionKind::ConcealedKong, t("7p")))
            } else {
                Some(Action::hu(tile, &[tile]))
            }
        }),
        passive(),
        passive(),
        passive(),
    ];
    let (mut board, logs, watch) = table(scripts);

    let draws = [t("1s"), t("2s"), t("3s"), t("4s"), t("5s")];
    let outcome = play(&mut board, wall(&draws, &[t("7z"), t("6z")])).unwrap();

    assert_eq!(outcome.winner(), Some(Seat::new(0)));
    assert_eq!(outcome.winning_tile, Some(t("7z")));
    assert_eq!(outcome.turns, 2);

    let own: Vec<Tile> = logs[0].borrow().decisions.iter().map(|(_, tile)| *tile).collect();
    assert_eq!(own, vec![t("1s"), t("7z")]);

    let watch = watch.borrow();
    let view = watch.last.as_ref().unwrap();
    assert_eq!(view.melds[Seat::new(0)][0].kind, ActionKind::ConcealedKong);
    assert_eq!(view.concealed[Seat::new(0)], 10);
    assert_eq!(view.wall_remaining, 3);
}

/// Test that an exhausted wall notifies every seat and draws nothing more.
#[test]
fn test_wall_exhaustion() {
    let (mut board, logs, watch) = table([passive(), passive(), passive(), passive()]);
    let draws: Vec<Tile> = ["1m", "2m", "3m", "4m", "5m", "6m"].iter().map(|n| t(n)).collect();

    let outcome = play(&mut board, wall(&draws, &[])).unwrap();

    assert_eq!(outcome.end, HandEnd::Exhausted);
    assert_eq!(outcome.turns, 6);
    assert!(outcome.dealer_repeats());

    let own_draws: Vec<usize> = logs
        .iter()
        .map(|log| {
            log.borrow()
                .decisions
                .iter()
                .filter(|(from, _)| *from == Relative::Own)
                .count()
        })
        .collect();
    assert_eq!(own_draws, vec![2, 2, 1, 1]);

    for log in &logs {
        let log = log.borrow();
        assert_eq!(log.ended, vec![HandEnded { kind: None, winner: None }]);
        assert_eq!(log.failed, 0);
    }

    let watch = watch.borrow();
    let view = watch.last.as_ref().unwrap();
    assert_eq!(view.wall_remaining, 0);
    assert_eq!(view.discards.len(), 6);
    assert_eq!(view.active, None);
    assert!(watch.views > 6);
    assert_eq!(watch.ended.len(), 1);
}

// =============================================================================
// Contract Violations
// =============================================================================

/// Test that a claim kind returned on an own draw stops the hand.
#[test]
fn test_claim_kind_on_own_draw_is_fatal() {
    let scripts: [Script; SEATS] = [
        Box::new(|_, tile| Some(Action::chow(tile, [t("1m"), t("2m"), t("3m")]))),
        passive(),
        passive(),
        passive(),
    ];
    let (mut board, logs, _) = table(scripts);

    let err = play(&mut board, wall(&[t("2s")], &[])).unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidActionKind {
            seat: Some(Seat::new(0)),
            value: ActionKind::Chow.value(),
            point: DecisionPoint::OwnDraw,
        }
    );
    assert!(logs.iter().all(|log| log.borrow().ended.is_empty()));
}

/// Test that a seat returning nothing after its draw stops the hand.
#[test]
fn test_missing_own_decision_is_fatal() {
    let scripts: [Script; SEATS] = [Box::new(|_, _| None), passive(), passive(), passive()];
    let (mut board, _, _) = table(scripts);

    let err = play(&mut board, wall(&[t("2s")], &[])).unwrap_err();
    assert_eq!(err, EngineError::MissingDecision { seat: Seat::new(0) });
}

/// Test that a run claim from across the table stops the hand.
#[test]
fn test_chow_from_opposite_is_fatal() {
    let scripts: [Script; SEATS] = [
        passive(),
        passive(),
        Box::new(|from, tile| match from {
            Relative::Own => Some(Action::draw(tile)),
            _ => Some(Action::chow(t("1z"), [tile, t("1s"), t("2s")])),
        }),
        passive(),
    ];
    let (mut board, _, _) = table(scripts);

    let err = play(&mut board, wall(&[t("3s")], &[])).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidActionKind {
            seat: Some(Seat::new(2)),
            value: ActionKind::Chow.value(),
            point: DecisionPoint::Claim,
        }
    );
}

// =============================================================================
// Full Matches
// =============================================================================

/// Observer checking table invariants on every snapshot.
struct InvariantCheck {
    last: Option<TableView>,
    hands: Rc<RefCell<usize>>,
}

impl TableObserver for InvariantCheck {
    fn on_view(&mut self, view: &TableView) {
        for seat in Seat::all() {
            assert_eq!(
                view.concealed[seat] + 3 * view.melds[seat].len(),
                13,
                "{} tile count",
                seat
            );
        }
        self.last = Some(view.clone());
    }

    fn on_hand_ended(&mut self, outcome: &HandOutcome) {
        *self.hands.borrow_mut() += 1;
        if let (Some(winner), Some(view)) = (outcome.winner(), &self.last) {
            assert_eq!(outcome.revealed.len() + 3 * view.melds[winner].len(), 14);
        }
    }
}

/// Test that four automated seats play a seeded match to the end.
#[test]
fn test_auto_match_completes() {
    let config = TableConfig::new().with_seed(2024);
    let hands = Rc::new(RefCell::new(0));
    let mut board = Board::with_auto_players(config.clone());
    board.add_observer(Box::new(InvariantCheck {
        last: None,
        hands: Rc::clone(&hands),
    }));

    let (round, outcomes) = board.play_match().unwrap();

    assert!(round.is_match_over(&config));
    assert_eq!(round.hands_played as usize, outcomes.len());
    assert_eq!(*hands.borrow(), outcomes.len());
    for outcome in &outcomes {
        assert!(outcome.turns > 0);
        if outcome.winner().is_some() {
            assert!(outcome.winning_tile.is_some());
        }
    }
}

/// Test that replaying a match from the same seed gives the same outcomes.
#[test]
fn test_auto_match_replays() {
    let config = TableConfig::new().with_seed(99);
    let (_, first) = Board::with_auto_players(config.clone()).play_match().unwrap();
    let (_, second) = Board::with_auto_players(config).play_match().unwrap();
    assert_eq!(first, second);
}
