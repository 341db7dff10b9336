use cache_dash::adapters::{ManualScheduler, RecordingSink};
use cache_dash::domain::model::FeedbackKind;
use cache_dash::{DataItem, GameConfig, GameController, OutboundSignal, Phase, RoundId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type Game = GameController<ChaCha8Rng, ManualScheduler, RecordingSink>;

fn scenario_config() -> GameConfig {
    GameConfig {
        duration_seconds: 30,
        forced_miss_interval_seconds: 5,
        hit_points: 10,
        miss_penalty: -5,
        ..GameConfig::default()
    }
}

fn new_game(seed: u64) -> (Game, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let game = GameController::new(
        scenario_config(),
        ChaCha8Rng::seed_from_u64(seed),
        scheduler.clone(),
        RecordingSink::new(),
    )
    .unwrap();
    (game, scheduler)
}

fn tick(game: &mut Game, times: u32) {
    for _ in 0..times {
        let round = game.round_id();
        game.on_tick(round).unwrap();
    }
}

fn some_other_item(game: &Game) -> DataItem {
    let requested = game.requested_item().unwrap();
    game.memory()
        .unwrap()
        .all_items()
        .iter()
        .copied()
        .find(|&item| item != requested)
        .unwrap()
}

fn last_feedback(game: &Game) -> Option<FeedbackKind> {
    game.sink()
        .signals()
        .iter()
        .rev()
        .find_map(|signal| match signal {
            OutboundSignal::FeedbackEmitted { kind, .. } if *kind != FeedbackKind::Prompt => {
                Some(*kind)
            }
            _ => None,
        })
}

#[test]
fn test_immediate_hit_scores_and_advances_without_tick() {
    let (mut game, _) = new_game(1);
    game.start_round().unwrap();
    let requests_before = request_count(&game);

    let requested = game.requested_item().unwrap();
    game.handle_selection(requested).unwrap();

    assert_eq!(game.score(), 10);
    assert_eq!(game.time_remaining(), 30);
    assert_eq!(request_count(&game), requests_before + 1);
    assert_eq!(last_feedback(&game), Some(FeedbackKind::Hit));
}

#[test]
fn test_five_idle_ticks_trigger_exactly_one_forced_miss() {
    let (mut game, _) = new_game(2);
    game.start_round().unwrap();
    let first_request_count = request_count(&game);

    tick(&mut game, 4);
    assert_eq!(game.score(), 0);
    assert_eq!(game.time_remaining(), 26);

    tick(&mut game, 1);
    assert_eq!(game.time_remaining(), 25);
    assert_eq!(game.score(), -5);
    assert_eq!(game.state().tally.timeout_misses, 1);
    assert_eq!(request_count(&game), first_request_count + 1);
    assert_eq!(last_feedback(&game), Some(FeedbackKind::TimeoutMiss));
}

#[test]
fn test_forced_miss_applies_even_after_a_recent_hit() {
    let (mut game, _) = new_game(3);
    game.start_round().unwrap();

    tick(&mut game, 4);
    let requested = game.requested_item().unwrap();
    game.handle_selection(requested).unwrap();
    assert_eq!(game.score(), 10);

    tick(&mut game, 1);
    assert_eq!(game.score(), 5);
}

#[test]
fn test_wrong_pick_keeps_request_and_costs_penalty() {
    let (mut game, _) = new_game(4);
    game.start_round().unwrap();
    let requested = game.requested_item();

    let wrong = some_other_item(&game);
    game.handle_selection(wrong).unwrap();

    assert_eq!(game.score(), -5);
    assert_eq!(game.requested_item(), requested);
    assert_eq!(last_feedback(&game), Some(FeedbackKind::WrongMiss));

    // 可以重試
    game.handle_selection(requested.unwrap()).unwrap();
    assert_eq!(game.score(), 5);
}

#[test]
fn test_round_ends_at_zero_and_ignores_selections() {
    let (mut game, scheduler) = new_game(5);
    game.start_round().unwrap();

    tick(&mut game, 30);
    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.time_remaining(), 0);
    assert_eq!(game.score(), -25);
    assert_eq!(game.requested_item(), None);
    assert_eq!(scheduler.live_handles(), 0);
    assert_eq!(
        game.sink().signals().last(),
        Some(&OutboundSignal::RoundEnded { final_score: -25 })
    );

    let score = game.score();
    let any = game.memory().unwrap().fast_tier()[0];
    game.handle_selection(any).unwrap();
    tick(&mut game, 3);
    assert_eq!(game.score(), score);
    assert_eq!(game.time_remaining(), 0);
}

#[test]
fn test_new_round_resets_score_and_time() {
    let (mut game, _) = new_game(6);
    game.start_round().unwrap();
    let requested = game.requested_item().unwrap();
    game.handle_selection(requested).unwrap();
    tick(&mut game, 30);
    assert_eq!(game.phase(), Phase::Ended);
    assert_ne!(game.score(), 0);

    game.start_round().unwrap();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(game.score(), 0);
    assert_eq!(game.time_remaining(), 30);
    assert_eq!(game.state().tally, Default::default());
    assert!(game.requested_item().is_some());
}

#[test]
fn test_restart_leaves_exactly_one_tick_stream() {
    let (mut game, scheduler) = new_game(7);
    game.start_round().unwrap();
    tick(&mut game, 3);
    game.abandon_round();
    game.start_round().unwrap();

    assert_eq!(scheduler.live_handles(), 1);
    assert_eq!(scheduler.scheduled_rounds(), vec![RoundId(1), RoundId(2)]);

    // 舊回合的 tick 不能影響新回合
    game.on_tick(RoundId(1)).unwrap();
    assert_eq!(game.time_remaining(), 30);

    tick(&mut game, 1);
    assert_eq!(game.time_remaining(), 29);
}

#[test]
fn test_partition_invariants_hold_every_round() {
    let (mut game, _) = new_game(8);
    let config = scenario_config();

    for _ in 0..20 {
        game.start_round().unwrap();
        let memory = game.memory().unwrap();
        assert_eq!(memory.fast_tier().len(), config.fast_tier_size);
        assert_eq!(
            memory.fast_tier().len() + memory.slow_only().len(),
            config.total_items
        );
        assert!(memory
            .fast_tier()
            .iter()
            .all(|item| !memory.slow_only().contains(item)));
        game.abandon_round();
    }
}

fn request_count(game: &Game) -> usize {
    game.sink()
        .signals()
        .iter()
        .filter(|s| matches!(s, OutboundSignal::RequestChanged { .. }))
        .count()
}
