//! Integration tests for the grid model and the selection engine.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;
use schedule_builder_core::{
    compute_grid, GestureState, GridConfig, PaintAction, ScheduleCollection, SelectionEngine,
    SelectionMode, TimeSlot,
};

#[test]
fn test_grid_fallback_window() {
    let grid = compute_grid(&GridConfig {
        start_hour: 9,
        end_hour: 9,
        ..GridConfig::default()
    });
    assert!(!grid.rows.is_empty());
    assert_eq!(grid.start_minutes, 9 * 60);
    assert_eq!(grid.end_minutes, 17 * 60);
}

#[test]
fn test_weekday_filtering() {
    let grid = compute_grid(&GridConfig {
        include_saturday: false,
        include_sunday: false,
        ..GridConfig::default()
    });
    assert_eq!(grid.days, vec![1, 2, 3, 4, 5]);
    let labels: Vec<_> = grid.days.iter().map(|d| schedule_builder_core::day_label(*d)).collect();
    assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri"]);
}

#[test]
fn test_toggle_symmetry() {
    let mut engine = SelectionEngine::new(SelectionMode::Available);
    engine.pointer_down(0, 480);
    engine.pointer_up();
    assert_eq!(
        engine.schedule().to_vec(),
        vec![TimeSlot::new(0, 480, SelectionMode::Available)]
    );

    engine.pointer_down(0, 480);
    engine.pointer_up();
    assert!(engine.schedule().is_empty());
}

#[test]
fn test_mode_overwrite_keeps_count() {
    let start: ScheduleCollection = vec![TimeSlot::new(1, 540, SelectionMode::Cannot)].into();
    let mut engine = SelectionEngine::with_schedule(SelectionMode::Preferred, start);
    engine.pointer_down(1, 540);
    assert_eq!(engine.gesture(), GestureState::painting(PaintAction::Apply));
    assert_eq!(
        engine.schedule().to_vec(),
        vec![TimeSlot::new(1, 540, SelectionMode::Preferred)]
    );
}

#[test]
fn test_drag_paints_three_cells_and_notifies_each() {
    let mut engine = SelectionEngine::new(SelectionMode::Available);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.on_schedule_changed(move |slots| sink.borrow_mut().push(slots.len()));

    engine.pointer_down(0, 480);
    engine.pointer_enter(0, 540);
    engine.pointer_enter(0, 600);
    engine.pointer_up();

    let times: Vec<_> = engine.schedule().iter().map(|s| s.time).collect();
    assert_eq!(times, vec![480, 540, 600]);
    assert_eq!(engine.schedule().count_mode(SelectionMode::Available), 3);
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_mid_drag_mode_change() {
    let mut engine = SelectionEngine::new(SelectionMode::Available);
    engine.pointer_down(0, 480);
    engine.set_mode(SelectionMode::Preferred);
    engine.pointer_enter(0, 540);
    assert_eq!(engine.schedule().get(0, 480), Some(SelectionMode::Available));
    assert_eq!(engine.schedule().get(0, 540), Some(SelectionMode::Preferred));
}

#[test]
fn test_disable_halts_painting() {
    let mut engine = SelectionEngine::new(SelectionMode::Available);
    engine.pointer_down(0, 480);
    engine.set_disabled(true);
    engine.pointer_enter(0, 540);
    assert!(!engine.schedule().contains(0, 540));
}

#[test]
fn test_slots_outside_grid_are_retained() {
    let start: ScheduleCollection = vec![TimeSlot::new(0, 60, SelectionMode::Cannot)].into();
    let mut engine = SelectionEngine::with_schedule(SelectionMode::Available, start);
    let grid = compute_grid(&GridConfig::default());
    assert!(!grid.contains(0, 60));

    engine.pointer_down(1, 480);
    engine.pointer_up();
    assert_eq!(engine.schedule().get(0, 60), Some(SelectionMode::Cannot));
    assert_eq!(engine.schedule().len(), 2);
}

#[derive(Debug, Clone)]
enum Op {
    Down(u8, u32),
    Enter(u8, u32),
    Up,
    Leave,
    Mode(SelectionMode),
    Disable(bool),
}

fn mode_strategy() -> impl Strategy<Value = SelectionMode> {
    prop::sample::select(SelectionMode::ALL.to_vec())
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let cell = (0u8..7, (0u32..6).prop_map(|i| 480 + i * 30));
    prop_oneof![
        cell.clone().prop_map(|(d, t)| Op::Down(d, t)),
        cell.prop_map(|(d, t)| Op::Enter(d, t)),
        Just(Op::Up),
        Just(Op::Leave),
        mode_strategy().prop_map(Op::Mode),
        any::<bool>().prop_map(Op::Disable),
    ]
}

proptest! {
    #[test]
    fn prop_published_collections_never_repeat_a_key(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut engine = SelectionEngine::new(SelectionMode::Available);
        let published = Rc::new(RefCell::new(Vec::<Vec<TimeSlot>>::new()));
        let sink = Rc::clone(&published);
        engine.on_schedule_changed(move |slots| sink.borrow_mut().push(slots.to_vec()));

        for op in ops {
            match op {
                Op::Down(d, t) => { engine.pointer_down(d, t); }
                Op::Enter(d, t) => { engine.pointer_enter(d, t); }
                Op::Up => engine.pointer_up(),
                Op::Leave => engine.pointer_leave(),
                Op::Mode(m) => engine.set_mode(m),
                Op::Disable(b) => engine.set_disabled(b),
            }
            if engine.is_disabled() {
                prop_assert!(!engine.gesture().is_painting());
            }
        }

        for slots in published.borrow().iter().chain(std::iter::once(&engine.schedule().to_vec())) {
            let keys: HashSet<_> = slots.iter().map(|s| (s.day, s.time)).collect();
            prop_assert_eq!(keys.len(), slots.len());
        }
    }

    #[test]
    fn prop_grid_is_never_empty(
        start in -30i32..40,
        end in -30i32..40,
        block in 1u32..240,
        sat in any::<bool>(),
        sun in any::<bool>(),
    ) {
        let grid = compute_grid(&GridConfig {
            start_hour: start,
            end_hour: end,
            block_size_minutes: block,
            include_saturday: sat,
            include_sunday: sun,
        });
        prop_assert!(grid.end_minutes > grid.start_minutes);
        prop_assert!(!grid.rows.is_empty());
        prop_assert!(grid.rows.windows(2).all(|w| w[1] - w[0] == block));
        prop_assert!(*grid.rows.last().unwrap() < grid.end_minutes);
        prop_assert_eq!(grid.days.len(), 5 + sat as usize + sun as usize);
    }
}
