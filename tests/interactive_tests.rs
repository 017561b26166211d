//! Interactive seat integration tests.
//!
//! A front-end thread answers prompts over the seat's channels.

use std::thread;

use rust_mahjong::{
    Action, ActionKind, AutoPlayer, Board, Choice, Hand, HandEnd, HandEnded, InteractiveHandle,
    InteractivePlayer, Player, Prompt, Relative, RoundState, SequenceMask, TableConfig, Tile,
};

fn t(notation: &str) -> Tile {
    notation.parse::<Hand>().unwrap().tiles()[0]
}

fn seat(notation: &str) -> (InteractivePlayer, InteractiveHandle) {
    let (mut player, handle) = InteractivePlayer::new("human", 25_000);
    player.init_hand(&notation.parse::<Hand>().unwrap().tiles());
    (player, handle)
}

/// Answer prompts in order with `answers`, returning everything received.
fn front_end(handle: InteractiveHandle, answers: Vec<Choice>) -> thread::JoinHandle<(InteractiveHandle, Vec<Prompt>)> {
    thread::spawn(move || {
        let mut seen = Vec::new();
        for answer in answers {
            let Ok(prompt) = handle.recv() else { break };
            seen.push(prompt);
            if handle.send(answer).is_err() {
                break;
            }
        }
        (handle, seen)
    })
}

// =============================================================================
// Claims
// =============================================================================

/// Test that a triplet claim asks for the follow-up discard.
#[test]
fn test_pong_then_discard() {
    let (mut player, handle) = seat("55p19m19s1234567z");
    let front = front_end(handle, vec![Choice::Pong, Choice::Discard(t("1z"))]);

    let action = player.decide(Relative::Opposite, t("5p"));
    let (_handle, prompts) = front.join().unwrap();

    assert_eq!(action, Some(Action::pong(t("1z"), t("5p"))));
    assert!(matches!(
        &prompts[0],
        Prompt::Decide { from: Relative::Opposite, options, .. } if options.pong && options.chow.is_empty()
    ));
    assert!(matches!(&prompts[1], Prompt::Discard { hand } if hand.len() == 11));
    assert_eq!(player.core().hand().len(), 10);
    assert_eq!(player.core().melds().len(), 1);

    player.on_claim_failed();
    assert_eq!(player.core().hand().len(), 13);
    assert!(player.core().melds().is_empty());
}

/// Test that an illegal choice is asked again.
#[test]
fn test_illegal_choice_reprompts() {
    let (mut player, handle) = seat("55p19m19s1234567z");
    let front = front_end(handle, vec![Choice::Chow(SequenceMask::MIDDLE), Choice::Pass]);

    let action = player.decide(Relative::Next, t("5p"));
    let (_handle, prompts) = front.join().unwrap();

    assert_eq!(action, None);
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
    assert_eq!(player.core().hand().len(), 13);
}

/// Test that a run claim follows the chosen mask bit.
#[test]
fn test_chow_by_mask_bit() {
    let (mut player, handle) = seat("3467m19p19s12345z");
    let front = front_end(handle, vec![Choice::Chow(SequenceMask::LOW), Choice::Discard(t("5z"))]);

    let action = player.decide(Relative::Previous, t("5m")).unwrap();
    front.join().unwrap();

    assert_eq!(action.kind(), ActionKind::Chow);
    assert_eq!(action.meld(), &[t("5m"), t("6m"), t("7m")]);
    assert!(player.core().hand().contains(t("3m")));
}

// =============================================================================
// Own Draws
// =============================================================================

/// Test that a ready declaration locks the hand until the win.
#[test]
fn test_riichi_then_win() {
    let (mut player, handle) = seat("123m456p789s111z4z");

    let front = front_end(handle, vec![Choice::Riichi(t("4z"))]);
    let action = player.decide(Relative::Own, t("7z"));
    let (handle, prompts) = front.join().unwrap();

    assert_eq!(action, Some(Action::riichi(t("4z"))));
    assert!(player.is_ready());
    assert!(matches!(
        &prompts[0],
        Prompt::Decide { from: Relative::Own, options, .. } if options.riichi.contains(&t("4z"))
    ));

    // No winning option: the drawn tile goes straight out.
    assert_eq!(player.decide(Relative::Own, t("2z")), Some(Action::draw(t("2z"))));
    assert_eq!(player.decide(Relative::Previous, t("3m")), None);

    let front = front_end(handle, vec![Choice::Win]);
    let action = player.decide(Relative::Own, t("7z")).unwrap();
    front.join().unwrap();

    assert_eq!(action.kind(), ActionKind::Hu);
    assert_eq!(action.subject(), Some(t("7z")));
}

// =============================================================================
// At the Table
// =============================================================================

/// Test that an interactive seat plays a full hand next to automated ones.
#[test]
fn test_mixed_table_hand() {
    let config = TableConfig::new().with_seed(8);
    let (human, handle) = InteractivePlayer::new("human", config.initial_score);

    let front = thread::spawn(move || {
        let mut ended: Vec<HandEnded> = Vec::new();
        while let Ok(prompt) = handle.recv() {
            let answer = match prompt {
                Prompt::Decide { options, .. } if options.win => Choice::Win,
                Prompt::Decide { .. } => Choice::Pass,
                Prompt::Discard { hand } => Choice::Discard(hand.tiles()[0]),
                Prompt::HandEnded(notice) => {
                    ended.push(notice);
                    continue;
                }
            };
            if handle.send(answer).is_err() {
                break;
            }
        }
        ended
    });

    let players: [Box<dyn Player>; 4] = [
        Box::new(human),
        Box::new(AutoPlayer::new("South", config.initial_score)),
        Box::new(AutoPlayer::new("West", config.initial_score)),
        Box::new(AutoPlayer::new("North", config.initial_score)),
    ];
    let mut board = Board::new(config.clone(), players);
    let round = RoundState::new(&config);
    let (next, outcome) = board.play_hand(&round).unwrap();
    drop(board);

    let ended = front.join().unwrap();
    assert_eq!(ended.len(), 1);
    let expected = match outcome.end {
        HandEnd::Win { kind, .. } => Some(kind),
        HandEnd::Exhausted => None,
    };
    assert_eq!(ended[0].kind, expected);
    assert_eq!(next.hands_played, 1);
}
