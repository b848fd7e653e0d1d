use super::*;
use crate::{foundation::core::Canvas, scene::memory::MemorySceneHost};

fn ids(n: u64) -> Vec<SceneId> {
    (1..=n).map(SceneId).collect()
}

#[test]
fn capacity_truncates_in_candidate_order() {
    let picked = filter_candidates(&ids(20), |_| None, 8);
    assert_eq!(picked, ids(8));
}

#[test]
fn flag_disabled_candidates_are_skipped() {
    let picked = filter_candidates(&ids(10), |s| (s == SceneId(2)).then_some(false), 4);
    assert_eq!(picked, vec![SceneId(1), SceneId(3), SceneId(4), SceneId(5)]);

    let picked = filter_candidates(&ids(5), |s| Some(s.0 % 2 == 1), 10);
    assert_eq!(picked, vec![SceneId(1), SceneId(3), SceneId(5)]);
}

#[test]
fn short_candidate_list_is_exhausted() {
    assert_eq!(filter_candidates(&ids(3), |_| Some(true), 25), ids(3));
    assert!(filter_candidates(&[], |_| None, 4).is_empty());
    assert!(filter_candidates(&ids(3), |_| None, 0).is_empty());
}

#[test]
fn guards_pair_increments_with_decrements() {
    let mem = Arc::new(MemorySceneHost::with_scenes(
        Canvas::new(1920, 1080).unwrap(),
        6,
    ));
    let host: Arc<dyn SceneHost> = mem.clone();

    let guards = select_visible(&host, 4);
    assert_eq!(guards.len(), 4);
    assert_eq!(mem.total_showing(), 4);
    assert_eq!(mem.showing_count(guards[0].scene().id()), 1);

    drop(guards);
    assert_eq!(mem.total_showing(), 0);
}

#[test]
fn destroyed_scene_is_not_decremented() {
    let mem = Arc::new(MemorySceneHost::with_scenes(
        Canvas::new(1920, 1080).unwrap(),
        2,
    ));
    let host: Arc<dyn SceneHost> = mem.clone();
    let guards = select_visible(&host, 2);
    let gone = guards[0].scene().id();
    mem.remove_scene(gone);
    assert!(guards[0].scene().upgrade(host.as_ref()).is_none());

    drop(guards);
    assert_eq!(mem.total_showing(), 0);
}
