//! Real-time scheduling of clocks and bot turns, and the post-game summary.

mod common;

use common::{ScriptedOracle, instant_bot, pvp, vs_bot};
use std::sync::Arc;
use std::time::Duration;
use strictly_chain::{FinishReason, Outcome, Slot};
use strictly_words::{
    GAME_NOT_STARTED, GameEvent, SessionError, SessionRunner, SessionSummary,
};

#[tokio::test(start_paused = true)]
async fn test_idle_human_loses_on_time() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));
    let handle = vs_bot(&oracle, 5);

    let mut runner = SessionRunner::new(handle.clone(), instant_bot(true), Duration::from_secs(1));
    let mut events = runner.subscribe();
    let outcome = runner.run().await;

    assert_eq!(
        outcome,
        Outcome::Winner {
            slot: Slot::Second,
            reason: FinishReason::Timeout
        }
    );
    assert_eq!(handle.snapshot().await.clocks, [0, 5]);

    let mut ticks = 0;
    let mut finished = None;
    while let Ok(event) = events.try_recv() {
        match event {
            GameEvent::Tick { slot, .. } => {
                assert_eq!(slot, Slot::First);
                ticks += 1;
            }
            GameEvent::Finished(outcome) => finished = Some(outcome),
            other => panic!("Unexpected event {:?}", other),
        }
    }
    assert_eq!(ticks, 4);
    assert_eq!(finished, Some(outcome));
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_runner_still_ticks() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));
    let handle = vs_bot(&oracle, 3);

    let outcome = SessionRunner::new(handle.clone(), instant_bot(true), Duration::ZERO)
        .run()
        .await;

    assert_eq!(outcome.winner(), Some(Slot::Second));
    assert_eq!(handle.snapshot().await.clocks, [0, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_runner_schedules_bot_replies() {
    let oracle = Arc::new(
        ScriptedOracle::with_words(&["apple", "energy", "yak"]).suggesting(&["energy"]),
    );
    let handle = vs_bot(&oracle, 60);
    let mut runner = SessionRunner::new(handle.clone(), instant_bot(true), Duration::from_secs(1));
    let mut events = runner.subscribe();
    let running = tokio::spawn(runner.run());

    handle.submit_move("apple", false).await.unwrap();

    loop {
        match events.recv().await {
            Some(GameEvent::BotMoved(action)) => {
                assert_eq!(action.word.as_str(), "energy");
                break;
            }
            Some(GameEvent::Finished(outcome)) => panic!("Game ended early: {}", outcome),
            Some(_) => {}
            None => panic!("Runner stopped"),
        }
    }

    handle.submit_move("yak", false).await.unwrap();
    handle.resign(Slot::Second).await.unwrap();

    let outcome = running.await.unwrap();
    assert_eq!(outcome.winner(), Some(Slot::First));
    assert_eq!(handle.snapshot().await.scores, [75 + 45, 90]);
}

#[tokio::test(start_paused = true)]
async fn test_bot_takes_draw_offer() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));
    let handle = vs_bot(&oracle, 60);
    let running = tokio::spawn(
        SessionRunner::new(handle.clone(), instant_bot(true), Duration::from_secs(1)).run(),
    );

    handle.offer_draw(Slot::First).await.unwrap();
    assert_eq!(running.await.unwrap(), Outcome::Draw);
}

#[tokio::test(start_paused = true)]
async fn test_bot_turns_down_draw_offer() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple"]));
    let handle = vs_bot(&oracle, 60);
    let mut runner = SessionRunner::new(handle.clone(), instant_bot(false), Duration::from_secs(1));
    let mut events = runner.subscribe();
    let running = tokio::spawn(runner.run());

    handle.offer_draw(Slot::First).await.unwrap();
    loop {
        match events.recv().await {
            Some(GameEvent::DrawDeclined) => break,
            Some(_) => {}
            None => panic!("Runner stopped"),
        }
    }
    assert_eq!(handle.snapshot().await.draw_offer, None);

    handle.resign(Slot::First).await.unwrap();
    assert_eq!(running.await.unwrap().winner(), Some(Slot::Second));
}

#[tokio::test]
async fn test_summary_requires_finished_session() {
    let oracle = Arc::new(ScriptedOracle::with_words(&["apple", "egg"]));
    let handle = pvp(&oracle, 180);
    assert_eq!(
        SessionSummary::build(&handle).await,
        Err(SessionError::InvalidState)
    );

    handle.submit_move("apple", false).await.unwrap();
    handle.submit_move("egg", false).await.unwrap();
    handle.resign(Slot::First).await.unwrap();

    let summary = SessionSummary::build(&handle).await.unwrap();
    assert_eq!(summary.scores, [75, 45]);
    assert_eq!(summary.moves.len(), 2);
    assert_eq!(summary.analysis, "recap of apple egg");
    assert_eq!(summary.winner().map(|p| p.name().as_str()), Some("Grace"));
    assert!(summary.to_string().contains("Ada 75 - 45 Grace"));
}

#[tokio::test]
async fn test_summary_of_empty_game() {
    let oracle = Arc::new(ScriptedOracle::with_words(&[]));
    let handle = pvp(&oracle, 180);
    handle.offer_draw(Slot::First).await.unwrap();
    handle.accept_draw(Slot::Second).await.unwrap();

    let summary = SessionSummary::build(&handle).await.unwrap();
    assert!(summary.outcome.is_draw());
    assert_eq!(summary.analysis, GAME_NOT_STARTED);
}
