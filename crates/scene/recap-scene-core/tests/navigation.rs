use recap_scene_core::{
    ChangeCause, HistoryMode, MemoryFragmentStore, NextRule, SceneConfig, SceneDescriptor,
    SceneId, SceneNavigator, SceneRegistry, SceneView, UnknownFragmentPolicy,
};
use recap_test_fixtures::scenes;

fn fixture_registry(name: &str) -> SceneRegistry<String> {
    SceneRegistry::from_json(&scenes::json(name).expect("fixture")).expect("registry")
}

fn navigator(
    name: &str,
    fragment: &str,
) -> SceneNavigator<String, MemoryFragmentStore> {
    SceneNavigator::new(
        fixture_registry(name),
        MemoryFragmentStore::with_fragment(fragment),
        SceneConfig::default(),
    )
}

#[test]
fn end_to_end_branching_reaches_tech_result() {
    let mut nav = navigator("minimal-branch", "");
    assert_eq!(nav.initialize(), "loading");

    let change = nav.navigate(None).expect("loading -> index");
    assert_eq!(change.to, SceneId::from("index"));

    let change = nav.navigate(Some("tech")).expect("index -> techResult");
    assert_eq!(change.from, SceneId::from("index"));
    assert_eq!(
        change.cause,
        ChangeCause::Navigate {
            choice: Some("tech".into())
        }
    );
    assert_eq!(nav.current(), "techResult");
    assert_eq!(nav.store().current(), Some("techResult"));
    assert_eq!(
        nav.store().writes().last().map(|w| w.fragment.as_str()),
        Some("#techResult")
    );
}

#[test]
fn initialize_adopts_known_fragment_without_writing() {
    let mut nav = navigator("minimal-branch", "#index");
    assert_eq!(nav.initialize(), "index");
    assert!(nav.store().writes().is_empty());
}

#[test]
fn initialize_recovers_from_unknown_fragment() {
    let mut nav = navigator("minimal-branch", "#nonexistent-scene-id");
    assert_eq!(nav.initialize(), "loading");
    assert!(!nav.is_end_of_content());
    let writes = nav.store().writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].mode, HistoryMode::Replace);
    assert_eq!(writes[0].fragment, "#loading");
}

#[test]
fn branch_resolution_with_host_function() {
    let mut registry = SceneRegistry::builder("x")
        .scene("x", SceneDescriptor::new("X".to_string(), NextRule::End))
        .scene("y", SceneDescriptor::new("Y".to_string(), NextRule::End))
        .scene("n", SceneDescriptor::new("N".to_string(), NextRule::End))
        .build()
        .unwrap();
    registry
        .set_branch(
            "x",
            Box::new(|choice: Option<&str>| {
                SceneId::from(if choice == Some("yes") { "y" } else { "n" })
            }),
        )
        .unwrap();
    let mut nav = SceneNavigator::new(registry, MemoryFragmentStore::new(), SceneConfig::default());

    for (choice, expected) in [(Some("yes"), "y"), (Some("no"), "n"), (None, "n")] {
        nav.store_mut().set_external("#x");
        nav.on_external_fragment_change();
        assert_eq!(nav.current(), "x");
        nav.navigate(choice);
        assert_eq!(nav.current(), expected, "choice {choice:?}");
    }
}

#[test]
fn unknown_target_renders_end_of_content_and_can_recover() {
    let mut nav = navigator("minimal-branch", "#index");
    nav.initialize();
    nav.navigate(Some("anything")).expect("index -> other");
    assert_eq!(nav.current(), "other");
    assert!(!nav.is_end_of_content());

    let registry = SceneRegistry::builder("a")
        .scene("a", SceneDescriptor::new("A".to_string(), "ghost"))
        .build()
        .unwrap();
    let mut nav = SceneNavigator::new(registry, MemoryFragmentStore::new(), SceneConfig::default());
    nav.initialize();
    nav.navigate(None).expect("a -> ghost");
    assert!(nav.render().is_end_of_content());
    assert_eq!(nav.render().id(), "ghost");

    nav.navigate(None).expect("ghost -> a");
    nav.navigate(None).expect("a -> ghost again");
    nav.store_mut().set_external("#a");
    nav.on_external_fragment_change().expect("recovers via fragment");
    assert!(matches!(nav.render(), SceneView::Scene { .. }));
}

#[test]
fn navigate_from_end_of_content_returns_to_initial() {
    let registry = SceneRegistry::builder("a")
        .scene("a", SceneDescriptor::new("A".to_string(), "ghost"))
        .build()
        .unwrap();
    let mut nav = SceneNavigator::new(registry, MemoryFragmentStore::new(), SceneConfig::default());
    nav.initialize();
    nav.navigate(None).expect("a -> ghost");
    assert!(nav.is_end_of_content());
    let key = nav.mount_key();

    let change = nav.navigate(Some("whatever")).expect("ghost -> a");
    assert_eq!(change.from, SceneId::from("ghost"));
    assert_eq!(change.to, SceneId::from("a"));
    assert_eq!(change.cause, ChangeCause::Fallback);
    assert_eq!(nav.mount_key(), key.wrapping_add(1));
    assert!(!nav.is_end_of_content());

    let last = nav.store().writes().last().unwrap();
    assert_eq!(last.fragment, "#a");
    assert_eq!(last.mode, HistoryMode::Push);
}

#[test]
fn unknown_fragment_fallback_is_idempotent() {
    let mut nav = navigator("minimal-branch", "#index");
    nav.initialize();

    nav.store_mut().set_external("#bogus");
    let first = nav.on_external_fragment_change();
    assert_eq!(first.map(|c| c.cause), Some(ChangeCause::Fallback));
    let state_once = (nav.current().clone(), nav.mount_key());

    nav.store_mut().set_external("#bogus");
    assert_eq!(nav.on_external_fragment_change(), None);
    assert_eq!((nav.current().clone(), nav.mount_key()), state_once);
    assert_eq!(nav.current(), "loading");
}

#[test]
fn ignore_policy_keeps_current_scene() {
    let cfg = SceneConfig {
        unknown_fragment: UnknownFragmentPolicy::Ignore,
        ..SceneConfig::default()
    };
    let mut nav = SceneNavigator::new(
        fixture_registry("minimal-branch"),
        MemoryFragmentStore::with_fragment("#index"),
        cfg,
    );
    nav.initialize();
    nav.store_mut().set_external("#bogus");
    assert_eq!(nav.on_external_fragment_change(), None);
    assert_eq!(nav.current(), "index");
}

#[test]
fn empty_fragment_falls_back_to_initial_with_replace() {
    let mut nav = navigator("minimal-branch", "#index");
    nav.initialize();
    nav.store_mut().set_external("");
    let change = nav.on_external_fragment_change().expect("index -> loading");
    assert_eq!(change.to, SceneId::from("loading"));
    let last = nav.store().writes().last().unwrap();
    assert_eq!(last.mode, HistoryMode::Replace);
    assert_eq!(last.fragment, "#loading");
}

#[test]
fn history_gets_one_entry_per_navigation() {
    let mut nav = navigator("annual-report", "");
    nav.initialize();
    nav.navigate(None);
    nav.navigate(None);
    nav.navigate(None);
    assert_eq!(nav.current(), "pickTrack");
    assert_eq!(nav.store().history_len(), 3);

    // back button: fragment already reflects the target; nothing is written
    let writes = nav.store().writes().len();
    nav.store_mut().back();
    let change = nav.on_external_fragment_change().expect("back");
    assert_eq!(change.cause, ChangeCause::External);
    assert_eq!(nav.current(), "yearInNumbers");
    assert_eq!(nav.store().writes().len(), writes);
}

#[test]
fn replace_only_config_never_pushes() {
    let cfg = SceneConfig {
        push_on_navigate: false,
        ..SceneConfig::default()
    };
    let mut nav = SceneNavigator::new(
        fixture_registry("annual-report"),
        MemoryFragmentStore::new(),
        cfg,
    );
    nav.initialize();
    nav.navigate(None);
    nav.navigate(None);
    assert_eq!(nav.store().history_len(), 0);
    assert_eq!(nav.store().current(), Some("yearInNumbers"));
}

#[test]
fn annual_report_walkthrough_ends_at_summary() {
    let mut nav = navigator("annual-report", "");
    nav.initialize();
    let path = [
        (None, "index"),
        (None, "yearInNumbers"),
        (None, "pickTrack"),
        (Some("design"), "designResult"),
        (None, "guess"),
        (Some("right"), "guessRight"),
        (None, "tasks"),
        (None, "summary"),
    ];
    for (choice, expected) in path {
        nav.navigate(choice);
        assert_eq!(nav.current(), expected);
    }
    assert_eq!(nav.navigate(None), None);

    match nav.render() {
        SceneView::Scene { view, props, .. } => {
            assert_eq!(view, "SummaryScene");
            assert!(props.is_none());
        }
        SceneView::EndOfContent { .. } => panic!("summary is registered"),
    }
}

#[test]
fn render_exposes_props_and_default_transition() {
    let mut nav = navigator("annual-report", "#pickTrack");
    nav.initialize();
    let SceneView::Scene {
        view,
        props,
        transition,
        ..
    } = nav.render()
    else {
        panic!("pickTrack is registered");
    };
    assert_eq!(view, "VoteScene");
    assert_eq!(
        props.and_then(|p| p.get("options")).map(|o| o.as_array().map(Vec::len)),
        Some(Some(3))
    );
    approx::assert_abs_diff_eq!(transition.duration_s, 0.5);
    approx::assert_abs_diff_eq!(transition.enter_offset_y, 50.0);
    approx::assert_abs_diff_eq!(transition.exit_offset_y, -50.0);
}
