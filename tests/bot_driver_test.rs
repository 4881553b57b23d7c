//! Bot turns through the shared submission path.

mod common;

use common::{ScriptedOracle, instant_bot, vs_bot};
use std::sync::Arc;
use std::time::Duration;
use strictly_chain::Slot;
use strictly_words::{BotDriver, BotTurn, Difficulty, fallback_word};

#[tokio::test]
async fn test_bot_plays_oracle_suggestion() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple", "eagle"]).suggesting(&["eagle"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    match instant_bot(true).take_turn(&handle).await {
        BotTurn::Played(action) => {
            assert_eq!(action.word.as_str(), "eagle");
            assert_eq!(action.slot, Slot::Second);
        }
        other => panic!("Expected a move, got {:?}", other),
    }
    assert_eq!(handle.snapshot().await.to_move, Slot::First);
}

#[tokio::test]
async fn test_wrong_letter_suggestion_uses_fallback() {
    let oracle =
        Arc::new(ScriptedOracle::with_words(&["apple", "energy"]).suggesting(&["banana"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    let turn = instant_bot(true).take_turn(&handle).await;
    assert!(matches!(turn, BotTurn::Played(ref m) if m.word.as_str() == "energy"));
    // One validation for the human, one for the bot.
    assert_eq!(oracle.validate_calls(), 2);
}

#[tokio::test]
async fn test_rejected_suggestion_retries_with_fallback() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple", "energy"]).suggesting(&["eerie"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    let turn = instant_bot(true).take_turn(&handle).await;
    assert!(matches!(turn, BotTurn::Played(ref m) if m.word.as_str() == "energy"));
    assert_eq!(oracle.validate_calls(), 3);
}

#[tokio::test]
async fn test_bot_stalls_after_max_attempts() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]).suggesting(&["eerie", "eel"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    let turn = instant_bot(true).take_turn(&handle).await;
    assert_eq!(turn, BotTurn::Stalled { attempts: 3 });
    assert_eq!(oracle.validate_calls(), 4);
    assert_eq!(oracle.suggest_calls(), 2);

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.moves.len(), 1);
    assert_eq!(snapshot.to_move, Slot::Second);
}

#[tokio::test]
async fn test_fallback_covers_every_letter() {
    for letter in 'a'..='z' {
        let opener = format!("q{letter}");
        let fallback = fallback_word(letter);
        let oracle = Arc::new(ScriptedOracle::with_words(&[opener.as_str(), fallback]));
        let handle = vs_bot(&oracle, 180);
        handle.submit_move(&opener, false).await.unwrap();

        match instant_bot(true).take_turn(&handle).await {
            BotTurn::Played(action) => assert!(
                action.word.as_str().starts_with(letter),
                "{opener} -> {}",
                action.word
            ),
            other => panic!("{opener}: expected a move, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_not_bot_turn() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));
    let handle = vs_bot(&oracle, 180);
    assert_eq!(instant_bot(true).take_turn(&handle).await, BotTurn::NotBotTurn);
    assert_eq!(oracle.suggest_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_bot_abandons_when_game_ends_while_thinking() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple", "energy"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    let driver = BotDriver::new(
        Duration::from_secs(2)..=Duration::from_secs(2),
        Difficulty::Hard,
        3,
        true,
    );
    let task = driver.spawn_turn(handle.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    handle.resign(Slot::First).await.unwrap();

    assert_eq!(task.join().await, Some(BotTurn::Abandoned));
    assert_eq!(oracle.suggest_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_task_cancels_turn() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple", "energy"]));
    let handle = vs_bot(&oracle, 180);
    handle.submit_move("apple", false).await.unwrap();

    let driver = BotDriver::new(
        Duration::from_secs(2)..=Duration::from_secs(2),
        Difficulty::Hard,
        3,
        true,
    );
    let task = driver.spawn_turn(handle.clone());
    tokio::time::sleep(Duration::from_millis(500)).await;
    drop(task);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(handle.snapshot().await.moves.len(), 1);
    assert_eq!(oracle.suggest_calls(), 0);
}

#[tokio::test]
async fn test_bot_answers_draw_offer() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));

    let handle = vs_bot(&oracle, 180);
    handle.offer_draw(Slot::First).await.unwrap();
    let declined = instant_bot(false)
        .answer_draw(&handle, Slot::Second)
        .await
        .unwrap();
    assert_eq!(declined, None);
    assert_eq!(handle.snapshot().await.draw_offer, None);

    handle.offer_draw(Slot::First).await.unwrap();
    let accepted = instant_bot(true)
        .answer_draw(&handle, Slot::Second)
        .await
        .unwrap();
    assert!(accepted.is_some_and(|o| o.is_draw()));
}
