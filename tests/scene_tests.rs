// Host-side tests for scene lifecycle and live parameter updates.

use wavescope_core::constants::*;
use wavescope_core::{
    BarColor, ParamError, Scene, SceneHost, SceneKind, ScriptedFeed, SilentFeed,
};

fn loud_feed() -> ScriptedFeed {
    let time: Vec<u8> = (0..RIBBON_SLOT_WIDTH).map(|j| (j * 4 % 256) as u8).collect();
    ScriptedFeed::constant(vec![200; FREQUENCY_BIN_COUNT], time)
}

#[test]
fn tick_without_scene_is_a_no_op() {
    let mut host = SceneHost::default();
    assert_eq!(host.active_kind(), None);
    assert!(!host.tick(&mut loud_feed()));
    let mut lines = Vec::new();
    host.build_lines(&mut lines);
    assert!(lines.is_empty());
}

#[test]
fn every_scene_ticks_and_draws() {
    let mut host = SceneHost::default();
    let mut feed = loud_feed();
    let mut lines = Vec::new();
    for kind in SceneKind::ALL {
        host.switch_to(kind).unwrap();
        assert_eq!(host.active_kind(), Some(kind));
        for _ in 0..4 {
            assert!(host.tick(&mut feed));
        }
        host.build_lines(&mut lines);
        assert!(!lines.is_empty(), "{kind} drew nothing");
        assert_eq!(lines.len() % 2, 0);
    }
}

#[test]
fn destroy_stops_ticking() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Fluid).unwrap();
    assert_eq!(host.destroy(), Some(SceneKind::Fluid));
    assert_eq!(host.destroy(), None);
    assert!(!host.tick(&mut loud_feed()));
}

#[test]
fn switching_back_starts_clean() {
    let mut host = SceneHost::default();
    let mut feed = loud_feed();
    host.create(SceneKind::Fluid).unwrap();
    for _ in 0..10 {
        host.tick(&mut feed);
    }
    match host.scene() {
        Some(Scene::Fluid(s)) => assert!(s.field.total_speed() > 0.0),
        other => panic!("unexpected scene {other:?}"),
    }

    host.switch_to(SceneKind::Bars).unwrap();
    host.switch_to(SceneKind::Fluid).unwrap();
    match host.scene() {
        Some(Scene::Fluid(s)) => {
            assert_eq!(s.field.total_speed(), 0.0);
            assert!(s.field.heights().iter().all(|&h| h == 0.0));
        }
        other => panic!("unexpected scene {other:?}"),
    }
}

#[test]
fn slider_changes_reach_the_live_scene() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Fluid).unwrap();
    host.set_damping(1.2).unwrap();
    host.set_impulse_strength(3.0).unwrap();
    host.set_emissive_intensity(0.9).unwrap();
    match host.scene() {
        Some(Scene::Fluid(s)) => {
            assert_eq!(s.params().damping(), 1.2);
            assert_eq!(s.params().impulse_strength(), 3.0);
            assert_eq!(s.params().emissive_intensity(), 0.9);
        }
        other => panic!("unexpected scene {other:?}"),
    }
}

#[test]
fn rejected_slider_value_changes_nothing() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Fluid).unwrap();
    assert!(matches!(
        host.set_damping(0.0),
        Err(ParamError::OutOfRange { .. })
    ));
    assert_eq!(host.settings().fluid.damping(), DEFAULT_DAMPING);
}

#[test]
fn live_fluid_stays_finite_after_rejected_damping() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Fluid).unwrap();
    assert!(host.set_damping(0.0).is_err());
    assert!(host.set_damping(-1.0).is_err());
    assert!(host.set_damping(f32::NAN).is_err());

    let mut feed = ScriptedFeed::constant(vec![255; FREQUENCY_BIN_COUNT], vec![128; FFT_SIZE]);
    for _ in 0..10 {
        host.tick(&mut feed);
    }
    match host.scene() {
        Some(Scene::Fluid(s)) => {
            assert_eq!(s.params().damping(), DEFAULT_DAMPING);
            assert!(s.field.velocities().iter().all(|v| v.is_finite()));
            assert!(s.field.heights().iter().all(|h| h.is_finite()));
        }
        other => panic!("unexpected scene {other:?}"),
    }
}

#[test]
fn settings_survive_scene_switches() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Ribbons).unwrap();
    host.set_impulse_strength(4.0).unwrap();
    host.set_bar_color(BarColor::new(10, 20, 30));
    assert!(host.toggle_psychedelic());

    host.switch_to(SceneKind::Fluid).unwrap();
    match host.scene() {
        Some(Scene::Fluid(s)) => assert_eq!(s.params().impulse_strength(), 4.0),
        other => panic!("unexpected scene {other:?}"),
    }
    host.switch_to(SceneKind::Bars).unwrap();
    match host.scene() {
        Some(Scene::Bars(s)) => {
            assert_eq!(s.ring.color(), BarColor::new(10, 20, 30));
            assert!(s.ring.is_psychedelic());
        }
        other => panic!("unexpected scene {other:?}"),
    }
}

#[test]
fn ribbons_scroll_on_cadence() {
    let mut host = SceneHost::default();
    host.set_ribbon_cadence(3);
    host.create(SceneKind::Ribbons).unwrap();
    let mut feed = loud_feed();
    let front = |host: &SceneHost| match host.scene() {
        Some(Scene::Ribbons(s)) => s.history.front_index(),
        other => panic!("unexpected scene {other:?}"),
    };
    host.tick(&mut feed);
    host.tick(&mut feed);
    assert_eq!(front(&host), 0);
    host.tick(&mut feed);
    assert_eq!(front(&host), RIBBON_LINE_COUNT - 1);
}

#[test]
fn ribbons_freeze_without_audio() {
    let mut host = SceneHost::default();
    host.set_ribbon_cadence(1);
    host.create(SceneKind::Ribbons).unwrap();
    let mut feed = loud_feed();
    for _ in 0..3 {
        host.tick(&mut feed);
    }
    let snapshot = |host: &SceneHost| match host.scene() {
        Some(Scene::Ribbons(s)) => (
            s.history.front_index(),
            s.history.iter_newest_first().map(<[f32]>::to_vec).collect::<Vec<_>>(),
        ),
        other => panic!("unexpected scene {other:?}"),
    };
    let before = snapshot(&host);
    for _ in 0..10 {
        assert!(host.tick(&mut SilentFeed));
    }
    assert_eq!(snapshot(&host), before);
}

#[test]
fn bars_follow_spectrum_and_keep_shape_when_silent() {
    let mut host = SceneHost::default();
    host.create(SceneKind::Bars).unwrap();
    host.tick(&mut loud_feed());
    host.tick(&mut SilentFeed);
    match host.scene() {
        Some(Scene::Bars(s)) => {
            assert_eq!(s.ring.count(), BAR_COUNT);
            assert!(s.ring.scales().iter().all(|&v| (v - 200.0 / 255.0).abs() < 1e-6));
            assert!((s.ring.time() - (1.0 + 2.0 * PSYCHEDELIC_TIME_STEP)).abs() < 1e-6);
        }
        other => panic!("unexpected scene {other:?}"),
    }
}

#[test]
fn camera_follows_scene_and_keeps_aspect() {
    let mut host = SceneHost::default();
    host.set_viewport(800, 400);
    host.create(SceneKind::Fluid).unwrap();
    assert_eq!(host.camera().eye.to_array(), FLUID_CAMERA_EYE);
    assert_eq!(host.camera().aspect, 2.0);
    host.switch_to(SceneKind::Ribbons).unwrap();
    assert_eq!(host.camera().eye.to_array(), RIBBON_CAMERA_EYE);
    assert_eq!(host.camera().aspect, 2.0);
}
