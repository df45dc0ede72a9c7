use door_core::model::GameMode;
use door_core::time::fixed_clock;
use services::{FlowError, GameFlow, ResultDetail, Screen};

#[test]
fn experience_walk_reaches_the_result_screen() {
    let mut flow = GameFlow::seeded(fixed_clock(), 7);
    assert_eq!(flow.screen(), Screen::Title);

    flow.start().unwrap();
    assert_eq!(flow.screen(), Screen::ModeSelect);

    flow.choose_experience().unwrap();
    assert_eq!(flow.screen(), Screen::RateSetting);
    assert_eq!(flow.state().mode(), GameMode::Experience);

    flow.commit_rate(1).unwrap();
    assert_eq!(flow.screen(), Screen::Play);

    let mut tries = 0_u32;
    while flow.screen() == Screen::Play {
        let outcome = flow.open_door().unwrap();
        tries += 1;
        assert!(tries <= 10_000, "a 1% rate should fail well within 10k tries");
        assert_eq!(outcome.run_over, !outcome.success);
    }

    assert_eq!(flow.screen(), Screen::Result);
    let view = flow.result_view().unwrap();
    assert!(!view.success);
    assert_eq!(view.mode, GameMode::Experience);
    assert_eq!(view.total_tries, tries);
    assert!(matches!(
        view.detail,
        ResultDetail::Experience { configured } if configured.value() == 1
    ));

    flow.back_to_mode_select().unwrap();
    assert_eq!(flow.screen(), Screen::ModeSelect);
}

#[test]
fn guess_walk_reveals_once_and_redraws_on_retry() {
    let mut flow = GameFlow::seeded(fixed_clock(), 99);
    flow.start().unwrap();
    flow.choose_guess().unwrap();
    assert_eq!(flow.screen(), Screen::Play);
    assert_eq!(flow.state().mode(), GameMode::Guess);

    let drawn = flow.state().actual_rate();
    assert!((1..=100).contains(&drawn.value()));

    let mut tries = 0_u32;
    while flow.screen() == Screen::Play {
        flow.open_door().unwrap();
        tries += 1;
        if tries > 20_000 {
            // Only a drawn rate of exactly 100 can survive this long.
            assert_eq!(drawn.value(), 100);
            return;
        }
    }

    // The hidden rate did not move during the run.
    assert_eq!(flow.state().actual_rate(), drawn);

    flow.set_guess(55).unwrap();
    let reveal = flow.confirm_guess().unwrap();
    assert_eq!(reveal.actual, drawn);
    assert_eq!(reveal.guess.value(), 55);
    assert_eq!(reveal.miss, 55_u8.abs_diff(drawn.value()));

    assert!(matches!(
        flow.confirm_guess(),
        Err(FlowError::AlreadyRevealed)
    ));
    assert!(matches!(flow.set_guess(10), Err(FlowError::AlreadyRevealed)));

    flow.retry().unwrap();
    assert_eq!(flow.screen(), Screen::Play);
    assert_eq!(flow.state().streak(), 0);
}

#[test]
fn wrong_screen_calls_are_refused_and_change_nothing() {
    let mut flow = GameFlow::seeded(fixed_clock(), 1);

    assert!(matches!(
        flow.open_door(),
        Err(FlowError::WrongScreen { .. })
    ));
    assert!(matches!(flow.retry(), Err(FlowError::WrongScreen { .. })));
    assert!(matches!(
        flow.result_view(),
        Err(FlowError::WrongScreen { .. })
    ));

    flow.start().unwrap();
    assert!(matches!(flow.start(), Err(FlowError::WrongScreen { .. })));
    assert!(matches!(
        flow.commit_rate(50),
        Err(FlowError::WrongScreen { .. })
    ));
    assert!(matches!(flow.set_guess(30), Err(FlowError::NotGuessMode)));

    assert_eq!(flow.screen(), Screen::ModeSelect);
    assert_eq!(flow.state().total_tries(), 0);
}
