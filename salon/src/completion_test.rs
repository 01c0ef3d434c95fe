use super::*;
use crate::catalog::NailName;
use crate::catalog::test_helpers::{simple_task, sticker, target};

fn correct_star() -> BTreeMap<StickerId, Placement> {
    let mut p = Placement::new(Some(NailName::Index), 0.5, 0.5, 0.0, 1.0);
    p.is_correct = true;
    BTreeMap::from([("a-star".to_owned(), p)])
}

fn painted_index() -> NailColors {
    let mut colors = NailColors::default();
    colors.set(NailName::Index, "#f06292");
    colors
}

// =============================================================
// is_complete
// =============================================================

#[test]
fn no_task_is_never_complete() {
    assert!(!is_complete(None, &correct_star(), &painted_index()));
}

#[test]
fn complete_when_stickers_and_paint_match() {
    let task = simple_task("a");
    assert!(is_complete(Some(&task), &correct_star(), &painted_index()));
}

#[test]
fn correct_sticker_alone_is_not_complete() {
    let task = simple_task("a");
    assert!(!is_complete(Some(&task), &correct_star(), &NailColors::default()));
}

#[test]
fn correct_paint_alone_is_not_complete() {
    let task = simple_task("a");
    assert!(!is_complete(Some(&task), &BTreeMap::new(), &painted_index()));
}

#[test]
fn placed_but_unverified_sticker_does_not_count() {
    let task = simple_task("a");
    let placements =
        BTreeMap::from([("a-star".to_owned(), Placement::new(Some(NailName::Index), 0.5, 0.5, 0.0, 1.0))]);
    assert!(!is_complete(Some(&task), &placements, &painted_index()));
}

#[test]
fn paint_comparison_is_exact_string_match() {
    let task = simple_task("a");
    let mut colors = NailColors::default();
    colors.set(NailName::Index, "#F06292");
    assert!(!is_complete(Some(&task), &correct_star(), &colors));
}

#[test]
fn extra_paint_on_unrequired_nails_is_ignored() {
    let task = simple_task("a");
    let mut colors = painted_index();
    colors.set(NailName::Pinky, "#7ad6ff");
    assert!(is_complete(Some(&task), &correct_star(), &colors));
}

#[test]
fn task_without_sticker_targets_needs_only_paint() {
    let mut task = simple_task("a");
    task.targets.clear();
    assert!(is_complete(Some(&task), &BTreeMap::new(), &painted_index()));
}

#[test]
fn decorative_stickers_do_not_block_completion() {
    let mut task = simple_task("a");
    task.stickers.push(sticker("sparkle"));
    assert!(is_complete(Some(&task), &correct_star(), &painted_index()));
}

#[test]
fn every_target_must_be_correct() {
    let mut task = simple_task("a");
    task.stickers.push(sticker("heart"));
    task.targets.push(target("heart", NailName::Thumb, 0.2, 0.6));
    assert!(!is_complete(Some(&task), &correct_star(), &painted_index()));
}

// =============================================================
// Progress
// =============================================================

#[test]
fn progress_without_task_is_zero() {
    assert_eq!(Progress::of(None, &correct_star(), &painted_index()), Progress::default());
}

#[test]
fn progress_counts_partial_work() {
    let mut task = simple_task("a");
    task.stickers.push(sticker("heart"));
    task.targets.push(target("heart", NailName::Thumb, 0.2, 0.6));
    let progress = Progress::of(Some(&task), &correct_star(), &NailColors::default());
    assert_eq!(
        progress,
        Progress { stickers_correct: 1, stickers_total: 2, nails_correct: 0, nails_total: 1 }
    );
}

#[test]
fn progress_full_when_complete() {
    let task = simple_task("a");
    let progress = Progress::of(Some(&task), &correct_star(), &painted_index());
    assert_eq!(progress.stickers_correct, progress.stickers_total);
    assert_eq!(progress.nails_correct, progress.nails_total);
}
