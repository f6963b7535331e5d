use super::*;
use tokio::sync::broadcast::error::TryRecvError;

const BASE_URL: &str = "https://example.org/guiareforma/";

fn sections() -> Vec<Section> {
    [
        ("hero", "Inicio"),
        ("que-cambia", "Qué cambia"),
        ("formulario", "Tus datos"),
        ("indemnizacion", "Indemnización"),
        ("resumen", "Resumen"),
    ]
    .into_iter()
    .enumerate()
    .map(|(order, (id, title))| Section::new(id, order, title))
    .collect()
}

fn navigator(url: &str) -> StepNavigator<InMemoryHost> {
    StepNavigator::new(sections(), InMemoryHost::new(url).expect("url")).expect("navigator")
}

fn started(url: &str) -> StepNavigator<InMemoryHost> {
    let mut nav = navigator(url);
    nav.start();
    nav
}

fn drain(rx: &mut broadcast::Receiver<GuideEvent>) -> Vec<GuideEvent> {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return events,
            Err(TryRecvError::Lagged(_)) => continue,
        }
    }
}

#[test]
fn rejects_empty_and_duplicate_sections() {
    let host = InMemoryHost::new(BASE_URL).expect("url");
    assert_eq!(
        StepNavigator::new(Vec::new(), host.clone()).err(),
        Some(NavigationError::NoSections)
    );

    let mut dup = sections();
    dup.push(Section::new("hero", 5, "Otra vez"));
    assert_eq!(
        StepNavigator::new(dup, host).err(),
        Some(NavigationError::DuplicateSection(SectionId::new("hero")))
    );
}

#[test]
fn start_defaults_to_first_step_and_replaces_entry() {
    let mut nav = navigator(BASE_URL);
    let mut rx = nav.subscribe_events();

    assert_eq!(nav.start(), 0);
    assert_eq!(nav.host().push_count(), 0);
    assert_eq!(nav.host().len(), 1);
    assert_eq!(nav.host().current_state(), &serde_json::json!({ "step": 0 }));
    assert_eq!(nav.host().current_url().fragment(), Some("paso-1"));

    let events = drain(&mut rx);
    assert_eq!(
        events,
        vec![GuideEvent::StepChanged {
            current_index: 0,
            previous_index: 0,
            section_id: SectionId::new("hero"),
        }]
    );
}

#[test]
fn start_reads_step_from_fragment() {
    let nav = started(&format!("{BASE_URL}#paso-4"));
    assert_eq!(nav.current_index(), 3);
    assert_eq!(nav.host().push_count(), 0);

    for bad in ["#paso-0", "#paso-6", "#paso-abc", "#resumen"] {
        let nav = started(&format!("{BASE_URL}{bad}"));
        assert_eq!(nav.current_index(), 0, "fragment {bad}");
    }
}

#[test]
fn out_of_range_go_to_is_ignored() {
    let mut nav = started(BASE_URL);
    nav.go_to(2);
    let mut rx = nav.subscribe_events();
    let pushes = nav.host().push_count();

    for index in [5, 6, 100, usize::MAX] {
        assert!(!nav.go_to(index));
        assert_eq!(nav.current_index(), 2);
    }
    assert_eq!(nav.host().push_count(), pushes);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn next_and_prev_stay_in_bounds() {
    let mut nav = started(BASE_URL);

    assert!(!nav.prev());
    assert_eq!(nav.current_index(), 0);

    for expected in 1..5 {
        assert!(nav.next());
        assert_eq!(nav.current_index(), expected);
    }
    assert!(!nav.next());
    assert_eq!(nav.current_index(), 4);

    for _ in 0..10 {
        nav.prev();
        assert!(nav.current_index() < nav.total());
    }
    assert_eq!(nav.current_index(), 0);
}

#[test]
fn user_moves_push_history_only_on_change() {
    let mut nav = started(BASE_URL);

    nav.next();
    nav.next();
    assert_eq!(nav.host().push_count(), 2);
    assert_eq!(nav.host().current_url().fragment(), Some("paso-3"));
    assert_eq!(nav.host().current_state(), &serde_json::json!({ "step": 2 }));

    let mut rx = nav.subscribe_events();
    assert!(nav.go_to(2));
    assert_eq!(nav.host().push_count(), 2);
    assert_eq!(drain(&mut rx).len(), 1);
}

#[test]
fn history_replay_never_pushes() {
    let mut nav = started(BASE_URL);
    nav.next();
    nav.next();
    nav.next();
    assert_eq!(nav.host().push_count(), 3);
    let mut rx = nav.subscribe_events();

    let state = nav.host_mut().back();
    assert!(nav.handle_pop_state(state.as_ref()));
    assert_eq!(nav.current_index(), 2);

    let state = nav.host_mut().back();
    assert!(nav.handle_pop_state(state.as_ref()));
    assert_eq!(nav.current_index(), 1);

    let state = nav.host_mut().forward();
    assert!(nav.handle_pop_state(state.as_ref()));
    assert_eq!(nav.current_index(), 2);

    assert_eq!(nav.host().push_count(), 3);
    assert_eq!(nav.host().len(), 4);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0],
        GuideEvent::StepChanged {
            current_index: 2,
            previous_index: 3,
            section_id: SectionId::new("formulario"),
        }
    );
}

#[test]
fn pop_state_without_step_is_ignored() {
    let mut nav = started(BASE_URL);
    nav.go_to(3);

    assert!(!nav.handle_pop_state(None));
    assert!(!nav.handle_pop_state(Some(&serde_json::json!({ "foo": 1 }))));
    assert!(!nav.handle_pop_state(Some(&serde_json::json!({ "step": 42 }))));
    assert_eq!(nav.current_index(), 3);
}

#[test]
fn user_move_after_back_truncates_forward_entries() {
    let mut nav = started(BASE_URL);
    nav.go_to(3);
    nav.go_to(4);
    let state = nav.host_mut().back();
    nav.handle_pop_state(state.as_ref());

    nav.go_to(1);
    assert_eq!(nav.host().len(), 3);
    assert!(nav.host_mut().forward().is_none());
}

#[test]
fn derived_view_state_follows_current_step() {
    let mut nav = started(BASE_URL);
    nav.go_to(2);

    assert_eq!(
        nav.positions(),
        vec![
            SectionPosition::Before,
            SectionPosition::Before,
            SectionPosition::Current,
            SectionPosition::After,
            SectionPosition::After,
        ]
    );
    let dots = nav.progress_dots();
    assert!(dots[0].completed && !dots[0].active);
    assert!(dots[2].active && !dots[2].completed);
    assert!(!dots[3].active && !dots[3].completed);
    assert!((nav.progress() - 0.6).abs() < 1e-12);
    assert_eq!(
        nav.host().scrolled_to().last(),
        Some(&SectionId::new("formulario"))
    );
}

#[test]
fn section_controls() {
    let nav = started(BASE_URL);

    let first = nav.controls_for(0).expect("first");
    assert!(!first.prev);
    assert_eq!(first.forward, ForwardControl::Next);
    assert_eq!(first.label, "1 / 5");

    assert_eq!(
        nav.controls_for(2).expect("form").forward,
        ForwardControl::None
    );
    assert_eq!(
        nav.controls_for(4).expect("last").forward,
        ForwardControl::Restart
    );
    assert!(nav.controls_for(5).is_none());
}

#[test]
fn keyboard_navigation() {
    let mut nav = started(BASE_URL);

    assert!(nav.handle_key("ArrowRight", Focus::Page));
    assert_eq!(nav.current_index(), 1);
    assert!(nav.handle_key("ArrowLeft", Focus::Page));
    assert_eq!(nav.current_index(), 0);
    assert!(nav.handle_key("End", Focus::Page));
    assert_eq!(nav.current_index(), 4);
    assert!(nav.handle_key("Home", Focus::Page));
    assert_eq!(nav.current_index(), 0);

    assert!(!nav.handle_key("Enter", Focus::Page));
    assert!(!nav.handle_key("ArrowDown", Focus::from_tag_name("input")));
    assert_eq!(nav.current_index(), 0);
}

#[test]
fn form_section_blocks_keyboard_and_swipe() {
    let mut nav = started(BASE_URL);
    nav.go_to(2);

    assert!(!nav.handle_key("ArrowRight", Focus::Page));
    assert!(!nav.handle_swipe(Swipe::new((300.0, 100.0), (100.0, 110.0))));
    assert_eq!(nav.current_index(), 2);

    assert!(nav.next());
    assert_eq!(nav.current_index(), 3);
}

#[test]
fn swipe_navigation() {
    let mut nav = started(BASE_URL);

    assert!(nav.handle_swipe(Swipe::new((300.0, 100.0), (200.0, 120.0))));
    assert_eq!(nav.current_index(), 1);
    assert!(nav.handle_swipe(Swipe::new((100.0, 100.0), (220.0, 90.0))));
    assert_eq!(nav.current_index(), 0);

    // too short, then mostly vertical
    assert!(!nav.handle_swipe(Swipe::new((100.0, 100.0), (60.0, 100.0))));
    assert!(!nav.handle_swipe(Swipe::new((300.0, 0.0), (200.0, 300.0))));
    assert_eq!(nav.current_index(), 0);
}
