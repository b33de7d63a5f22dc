use super::*;
use crate::engine::fake::FakeEngine;
use crate::session::{self, SessionStatus};

const BAR: BarGeometry = BarGeometry {
    x: 100.0,
    width: 400.0,
};

fn controller(elapsed: u64, duration: u64) -> (Arc<FakeEngine>, SessionHandle, SeekController) {
    let engine = Arc::new(FakeEngine::new());
    let session = session::new_session();
    session.lock().unwrap().progress = Progress::from_parts(elapsed, duration);
    let ctl = SeekController::new(session.clone(), engine.clone(), Duration::from_millis(100));
    (engine, session, ctl)
}

#[test]
fn mapping_clamps_left_of_bar_to_zero() {
    assert_eq!(position_to_time(100.0, BAR, 180), 0);
    assert_eq!(position_to_time(-50.0, BAR, 180), 0);
}

#[test]
fn mapping_clamps_right_of_bar_to_duration() {
    assert_eq!(position_to_time(500.0, BAR, 180), 180);
    assert_eq!(position_to_time(900.0, BAR, 180), 180);
}

#[test]
fn mapping_floors_interior_positions() {
    // Halfway across a 400px bar over 181 seconds: floor(0.5 * 181) = 90.
    assert_eq!(position_to_time(300.0, BAR, 181), 90);
}

#[test]
fn mapping_is_monotonic_non_decreasing() {
    let mut last = 0;
    let mut x = 50.0;
    while x <= 550.0 {
        let t = position_to_time(x, BAR, 180);
        assert!(t >= last, "mapping decreased at x={x}");
        last = t;
        x += 1.0;
    }
    assert_eq!(last, 180);
}

#[test]
fn mapping_with_zero_duration_is_zero_everywhere() {
    assert_eq!(position_to_time(300.0, BAR, 0), 0);
    assert_eq!(position_to_time(900.0, BAR, 0), 0);
}

#[test]
fn mapping_with_degenerate_bar_width_is_zero() {
    let bar = BarGeometry { x: 100.0, width: 0.0 };
    assert_eq!(position_to_time(300.0, bar, 180), 0);
}

#[test]
fn drag_start_sets_flag_and_overrides_progress() {
    let (_engine, session, ctl) = controller(10, 200);

    ctl.drag_start(300.0, BAR);

    let s = session.lock().unwrap();
    assert!(s.is_dragging());
    assert_eq!(s.drag.unwrap().candidate, 100);
    assert_eq!(s.progress.elapsed, 100);
    assert_eq!(s.progress.percent, 50.0);
}

#[test]
fn drag_move_updates_candidate_only_while_dragging() {
    let (_engine, session, ctl) = controller(10, 200);

    // No gesture active: a stray move must not touch progress.
    ctl.drag_move(300.0, BAR);
    assert_eq!(session.lock().unwrap().progress.elapsed, 10);

    ctl.drag_start(200.0, BAR);
    ctl.drag_move(400.0, BAR);
    let s = session.lock().unwrap();
    assert_eq!(s.drag.unwrap().candidate, 150);
    assert_eq!(s.progress.elapsed, 150);
}

#[test]
fn drag_end_seeks_arms_cooldown_and_clears_flag() {
    let (engine, session, ctl) = controller(10, 200);

    ctl.drag_start(200.0, BAR);
    ctl.drag_end(300.0, BAR);

    assert_eq!(engine.seeks(), vec![100]);
    let s = session.lock().unwrap();
    assert!(!s.is_dragging());
    assert_eq!(s.progress.elapsed, 100);
    assert!(s.cooldown_until.is_some());
}

#[test]
fn drag_end_without_gesture_is_noop() {
    let (engine, session, ctl) = controller(10, 200);

    ctl.drag_end(300.0, BAR);

    assert!(engine.seeks().is_empty());
    let s = session.lock().unwrap();
    assert_eq!(s.progress.elapsed, 10);
    assert!(s.cooldown_until.is_none());
}

#[test]
fn drag_end_resumes_after_end_of_track() {
    let (engine, session, ctl) = controller(200, 200);
    {
        let mut s = session.lock().unwrap();
        s.end_of_track = true;
        s.status = SessionStatus::Paused;
    }

    ctl.drag_start(300.0, BAR);
    ctl.drag_end(300.0, BAR);

    let (_, resumes, _) = engine.counts();
    assert_eq!(resumes, 1);
    assert_eq!(session.lock().unwrap().status, SessionStatus::Running);
}

#[test]
fn drag_end_does_not_resume_while_running() {
    let (engine, session, ctl) = controller(50, 200);
    session.lock().unwrap().status = SessionStatus::Running;

    ctl.drag_start(300.0, BAR);
    ctl.drag_end(300.0, BAR);

    let (_, resumes, _) = engine.counts();
    assert_eq!(resumes, 0);
}

#[test]
fn drag_with_zero_duration_never_divides() {
    let (engine, session, ctl) = controller(0, 0);

    ctl.drag_start(300.0, BAR);
    ctl.drag_move(400.0, BAR);
    ctl.drag_end(500.0, BAR);

    let s = session.lock().unwrap();
    assert_eq!(s.progress.percent, 0.0);
    assert_eq!(s.progress.elapsed, 0);
    assert_eq!(engine.seeks(), vec![0]);
}
