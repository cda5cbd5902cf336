//! Behavioural tests for map and location transitions.
//!
//! These tests drive a [`MapsHandler`] over the shared sample world and
//! check what each transition leaves behind: the bound area, a fresh
//! descriptor container, mirrored screen attributes and the order in which
//! area commands reach their interpreters.

use std::cell::RefCell;
use std::rc::Rc;

use maps_handler::{
    AttributeRegistry, Bounds, CommandKind, Direction, MapsError, MapsHandler, ScreenAttributes,
};
use mockall::{mock, predicate::eq, Sequence};
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use test_utils::{sample_library, Recorder};

mock! {
    Screen {}
    impl AttributeRegistry for Screen {
        fn set_attribute(&mut self, name: &str, value: Value);
        fn attribute(&self, name: &str) -> Option<Value>;
    }
}

// -- Fixtures --

#[fixture]
fn recorder() -> Recorder {
    Recorder::new()
}

#[fixture]
fn handler(recorder: Recorder) -> (MapsHandler, Recorder) {
    let handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(ScreenAttributes::new())
        .on_spawn(recorder.things("spawn"))
        .on_unspawn(recorder.things("unspawn"))
        .stretch_add(recorder.commands("stretch"))
        .after_add(recorder.commands("after"))
        .build()
        .expect("valid configuration");
    (handler, recorder)
}

fn everything() -> Bounds {
    Bounds::new(-1000.0, 10_000.0, 1000.0, -1000.0)
}

// -- Test helpers --

fn overworld_in_current_map(handler: &MapsHandler) -> Option<Bounds> {
    handler
        .map(None)
        .and_then(|map| map.area("Overworld"))
        .map(|area| area.boundaries)
}

// -- Tests --

#[rstest]
fn entering_a_location_binds_its_area(handler: (MapsHandler, Recorder)) {
    let (mut handler, _) = handler;
    handler.set_map("1-1", Some("start")).expect("known map");
    assert_eq!(handler.map(None).map(|map| map.name.as_str()), Some("1-1"));
    assert_eq!(handler.map_name(), Some("1-1"));
    assert_eq!(handler.area_name(), Some("Overworld"));
    assert_eq!(
        handler.location_entered().map(|l| l.name.as_str()),
        Some("start")
    );
    assert_eq!(handler.pre_things().len(), 6);
    assert_eq!(handler.pre_things().spawned().count(), 0);
}

#[rstest]
fn commands_reach_interpreters_stretches_first(handler: (MapsHandler, Recorder)) {
    let (mut handler, recorder) = handler;
    handler.set_map("1-1", Some("start")).expect("known map");
    assert_eq!(
        recorder.events(),
        vec!["stretch Floor 0/1", "after Castle 0/1"]
    );
    assert_eq!(handler.stretches().len(), 1);
    assert_eq!(handler.afters().len(), 1);
}

#[rstest]
fn entry_zeroes_the_area_boundaries(handler: (MapsHandler, Recorder)) {
    let (mut handler, _) = handler;
    handler.set_map("1-1", Some("start")).expect("known map");
    assert_eq!(handler.area().map(|a| a.boundaries), Some(Bounds::ZERO));
    assert_eq!(overworld_in_current_map(&handler), Some(Bounds::ZERO));

    if let Some(area) = handler.area_mut() {
        area.boundaries = Bounds::new(0.0, 512.0, 480.0, 0.0);
    }
    assert_eq!(
        overworld_in_current_map(&handler),
        Some(Bounds::new(0.0, 512.0, 480.0, 0.0))
    );
    handler.set_location("start").expect("known location");
    assert_eq!(handler.area().map(|a| a.boundaries), Some(Bounds::ZERO));
    assert_eq!(overworld_in_current_map(&handler), Some(Bounds::ZERO));
}

#[rstest]
fn spawn_state_does_not_survive_a_transition(handler: (MapsHandler, Recorder)) {
    let (mut handler, recorder) = handler;
    handler.set_map("1-1", Some("start")).expect("known map");
    assert_eq!(handler.spawn_area(Direction::XInc, everything()), 6);

    handler.set_location("pipe").expect("known location");
    assert_eq!(handler.area_name(), Some("Underworld"));
    assert_eq!(handler.pre_things().spawned().count(), 0);

    handler.set_location("start").expect("known location");
    assert_eq!(handler.pre_things().spawned().count(), 0);
    recorder.clear();
    assert_eq!(handler.spawn_area(Direction::XInc, everything()), 6);
    assert_eq!(recorder.events().len(), 6);
}

#[rstest]
fn unknown_map_leaves_everything_in_place(handler: (MapsHandler, Recorder)) {
    let (mut handler, _) = handler;
    handler.set_map("1-1", Some("start")).expect("known map");

    let err = handler.set_map("8-4", None).expect_err("unknown map");
    assert!(matches!(err, MapsError::MapNotFound { ref name } if name == "8-4"));
    assert_eq!(handler.map_name(), Some("1-1"));
    assert_eq!(handler.area_name(), Some("Overworld"));
    assert_eq!(
        handler.location_entered().map(|l| l.name.as_str()),
        Some("start")
    );
}

#[rstest]
#[case::unknown_location("warp")]
#[case::dangling_area("lost")]
fn bad_locations_are_not_found(handler: (MapsHandler, Recorder), #[case] name: &str) {
    let (mut handler, _) = handler;
    handler.set_map("1-1", None).expect("known map");
    let err = handler.set_location(name).expect_err("bad location");
    assert!(matches!(err, MapsError::LocationNotFound { name: ref n } if n == name));
    assert!(handler.area().is_none());
}

#[test]
fn location_without_a_map_is_not_found() {
    let mut handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(ScreenAttributes::new())
        .build()
        .expect("valid configuration");
    let err = handler.set_location("start").expect_err("no map set");
    assert!(matches!(err, MapsError::LocationNotFound { .. }));
}

#[test]
fn commands_without_an_interpreter_fail_after_binding() {
    let mut handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(ScreenAttributes::new())
        .build()
        .expect("valid configuration");

    let err = handler
        .set_map("1-1", Some("start"))
        .expect_err("stretch interpreter missing");
    assert!(matches!(
        err,
        MapsError::MissingCommandInterpreter {
            kind: CommandKind::Stretch
        }
    ));
    assert_eq!(handler.area_name(), Some("Overworld"));
    assert_eq!(handler.pre_things().len(), 6);

    handler
        .set_location("pipe")
        .expect("the underworld declares no commands");
    assert!(handler.stretches().is_empty());
}

#[test]
fn missing_after_interpreter_is_reported_by_kind() {
    let recorder = Recorder::new();
    let mut handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(ScreenAttributes::new())
        .stretch_add(recorder.commands("stretch"))
        .build()
        .expect("valid configuration");

    let err = handler
        .set_map("1-1", Some("start"))
        .expect_err("after interpreter missing");
    assert!(matches!(
        err,
        MapsError::MissingCommandInterpreter {
            kind: CommandKind::After
        }
    ));
    assert_eq!(recorder.events(), vec!["stretch Floor 0/1"]);
}

#[test]
fn settings_are_mirrored_on_every_transition() {
    let mut screen = MockScreen::new();
    let mut seq = Sequence::new();
    screen
        .expect_set_attribute()
        .with(eq("setting"), eq(json!("Underworld")))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    screen
        .expect_set_attribute()
        .with(eq("setting"), eq(json!("Overworld")))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    let recorder = Recorder::new();
    let mut handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(screen)
        .stretch_add(recorder.commands("stretch"))
        .after_add(recorder.commands("after"))
        .build()
        .expect("valid configuration");
    handler.set_map("1-1", Some("pipe")).expect("known map");
    handler.set_location("start").expect("known location");
}

#[test]
fn injected_registry_stays_readable() {
    let screen = Rc::new(RefCell::new(ScreenAttributes::new()));
    let recorder = Recorder::new();
    let mut handler = MapsHandler::builder()
        .repository(sample_library())
        .screen(Rc::clone(&screen))
        .stretch_add(recorder.commands("stretch"))
        .after_add(recorder.commands("after"))
        .build()
        .expect("valid configuration");

    handler.set_map("1-1", Some("start")).expect("known map");
    assert_eq!(screen.borrow().get("setting"), Some(&json!("Overworld")));
    assert_eq!(
        handler.screen_attributes().attribute("setting"),
        Some(json!("Overworld"))
    );

    handler.set_location("pipe").expect("known location");
    assert_eq!(screen.borrow().get("setting"), Some(&json!("Underworld")));
}
