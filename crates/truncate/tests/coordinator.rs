use std::cell::{Cell, RefCell};
use std::rc::Rc;

use core_types::{EventKind, Size};
use markup::Fragment;
use truncate::{
    Content, Ellipsis, EllipsisOptions, MORE_CLASS, Phase, ResizeDetector, ResizeStrategy,
    Substring, Surface, Trigger,
};
use truncate_test_support::{TestSurface, lorem, surface, surface_with_id};

const TEXT: &str = "Lorem ipsum dolor sit amet";

fn shown(e: &Ellipsis<TestSurface>) -> String {
    e.surface().content().text_content()
}

fn record_changes(e: &mut Ellipsis<TestSurface>) -> Rc<RefCell<Vec<Option<usize>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    e.on_change(move |v| sink.borrow_mut().push(*v));
    seen
}

#[test]
fn mount_applies_and_starts_watching() {
    let detector = ResizeDetector::shared();
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default())
        .with_detector(Rc::clone(&detector));
    assert_eq!(e.phase(), Phase::Idle);

    let report = e.mount().expect("applied on mount");
    assert_eq!(report.truncated_at, Some(7));
    assert_eq!(shown(&e), "Lorem i...");
    assert_eq!(e.phase(), Phase::Watching);
    assert!(detector.borrow().is_listening(e.surface().id()));
    assert_eq!(e.mount(), None);
}

#[test]
fn manual_strategy_waits_for_apply() {
    let options = EllipsisOptions::default().with_resize_detection("manual");
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, options);
    assert_eq!(e.mount(), None);
    assert_eq!(shown(&e), TEXT);

    e.surface_mut().resize(Size::new(40.0, 20.0));
    assert_eq!(e.handle(Trigger::ElementResized(Size::new(40.0, 20.0))), None);
    assert_eq!(e.handle(Trigger::WindowResized), None);

    let report = e.apply_ellipsis();
    assert_eq!(report.truncated_at, Some(2));
    assert_eq!(shown(&e), "Lo...");
}

#[test]
fn element_resize_reapplies_once_per_real_change() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let changes = record_changes(&mut e);
    e.mount();

    // The detector fires right after attaching, reporting the current size.
    assert_eq!(e.handle(Trigger::ElementResized(Size::new(80.0, 20.0))), None);

    let wider = Size::new(160.0, 20.0);
    e.surface_mut().resize(wider);
    let report = e.handle(Trigger::ElementResized(wider)).expect("resize applies");
    assert_eq!(report.truncated_at, Some(17));
    assert_eq!(shown(&e), "Lorem ipsum dolor...");

    // Re-registration after the pass is silent too.
    assert_eq!(e.handle(Trigger::ElementResized(wider)), None);
    assert_eq!(*changes.borrow(), vec![Some(7), Some(17)]);
}

#[test]
fn window_strategy_ignores_element_signals() {
    let options = EllipsisOptions::default().with_resize_detection("window");
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, options);
    assert!(e.mount().is_some());
    assert_eq!(e.strategy(), ResizeStrategy::Window);

    e.surface_mut().resize(Size::new(400.0, 20.0));
    assert_eq!(e.handle(Trigger::ElementResized(Size::new(400.0, 20.0))), None);
    assert_eq!(shown(&e), "Lorem i...");

    let report = e.handle(Trigger::WindowResized).expect("window resize applies");
    assert_eq!(report.truncated_at, None);
    assert_eq!(shown(&e), TEXT);
}

#[test]
fn unknown_strategy_falls_back_to_element_observer() {
    let options = EllipsisOptions::default().with_resize_detection("element-resize-detector-objekt");
    let e = Ellipsis::new(surface(80.0, 20.0), TEXT, options);
    assert_eq!(e.strategy(), ResizeStrategy::ElementObserver);
}

#[test]
fn content_changes_apply_only_on_difference() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let changes = record_changes(&mut e);
    e.mount();

    assert_eq!(e.set_content(TEXT), None);
    assert_eq!(e.handle(Trigger::ContentChanged), None);

    let report = e.set_content("Dolor sit amet, consetetur").expect("new content applies");
    assert_eq!(report.truncated_at, Some(7));
    assert_eq!(shown(&e), "Dolor s...");
    assert_eq!(*changes.borrow(), vec![Some(7), Some(7)]);
}

#[test]
fn null_after_text_renders_empty() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let changes = record_changes(&mut e);
    e.mount();

    let report = e.set_content(None::<&str>).expect("change applies");
    assert_eq!(report.truncated_at, None);
    assert_eq!(shown(&e), "");
    assert!(e.surface().content().is_empty());
    assert_eq!(changes.borrow().last(), Some(&None));
}

#[test]
fn number_content_is_normalized() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), 0i32, EllipsisOptions::default());
    assert_eq!(e.mount().map(|r| r.truncated_at), Some(None));
    assert_eq!(shown(&e), "0");
}

#[test]
fn template_drift_is_picked_up_on_check() {
    let words = Rc::new(Cell::new(1usize));
    let source = Rc::clone(&words);
    let content = Content::template(move || Fragment::from_text(lorem(source.get())));
    let mut e = Ellipsis::new(surface(80.0, 20.0), content, EllipsisOptions::default());
    let report = e.mount().expect("applied");
    assert_eq!(report.truncated_at, None);

    assert_eq!(e.checked(), None);

    words.set(5);
    let report = e.checked().expect("drift applies");
    assert_eq!(report.truncated_at, Some(7));
    assert_eq!(e.checked(), None);
}

#[test]
fn triggers_during_a_pass_coalesce_into_one_follow_up() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let queue = e.queue();
    let passes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&passes);
    e.on_change(move |_| {
        counter.set(counter.get() + 1);
        // Every pass asks for yet another pass.
        queue.post(Trigger::Manual);
        queue.post(Trigger::Manual);
    });

    e.mount();
    assert_eq!(passes.get(), 2);
    assert_eq!(e.queue().len(), 2);

    assert!(e.process_queued().is_some());
    assert_eq!(passes.get(), 3);
}

#[test]
fn self_inflicted_resize_signals_are_ignored() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let queue = e.queue();
    let passes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&passes);
    e.on_change(move |_| {
        counter.set(counter.get() + 1);
        queue.post(Trigger::ElementResized(Size::new(80.0, 20.0)));
    });

    e.mount();
    assert_eq!(passes.get(), 1);
    assert!(e.queue().is_empty());
}

#[test]
fn shared_detector_keeps_instances_apart() {
    let detector = ResizeDetector::shared();
    let mut a = Ellipsis::new(surface_with_id(1, 80.0, 20.0), TEXT, EllipsisOptions::default())
        .with_detector(Rc::clone(&detector));
    let mut b = Ellipsis::new(surface_with_id(2, 80.0, 20.0), TEXT, EllipsisOptions::default())
        .with_detector(Rc::clone(&detector));
    a.mount();
    b.mount();
    assert_eq!(detector.borrow().listener_count(), 2);

    a.surface_mut().resize(Size::new(160.0, 20.0));
    assert!(a.handle(Trigger::ElementResized(Size::new(160.0, 20.0))).is_some());
    assert_eq!(b.handle(Trigger::ElementResized(Size::new(80.0, 20.0))), None);
    assert_eq!(shown(&b), "Lorem i...");

    a.destroy();
    assert!(!detector.borrow().is_listening(a.surface().id()));
    assert!(detector.borrow().is_listening(b.surface().id()));
}

#[test]
fn destroy_detaches_everything() {
    let detector = ResizeDetector::shared();
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default())
        .with_detector(Rc::clone(&detector));
    e.on_more_click(|_| {});
    e.mount();
    assert_eq!(e.surface().listener_count(EventKind::Click), 1);

    e.destroy();
    assert_eq!(e.phase(), Phase::Destroyed);
    assert_eq!(e.surface().listener_count(EventKind::Click), 0);
    assert_eq!(detector.borrow().listener_count(), 0);

    let renders = e.surface().render_count();
    e.surface_mut().resize(Size::new(10.0, 10.0));
    assert_eq!(e.handle(Trigger::ElementResized(Size::new(10.0, 10.0))), None);
    assert_eq!(e.set_content("other"), None);
    assert_eq!(e.apply_ellipsis().renders, 0);
    assert_eq!(e.surface().render_count(), renders);
}

#[test]
fn dropping_an_instance_releases_its_listener() {
    let detector = ResizeDetector::shared();
    {
        let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default())
            .with_detector(Rc::clone(&detector));
        e.mount();
        assert_eq!(detector.borrow().listener_count(), 1);
    }
    assert_eq!(detector.borrow().listener_count(), 0);
}

#[test]
fn more_click_wraps_indicator_and_emits() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    e.on_more_click(move |ev| {
        assert!(ev.default_prevented);
        counter.set(counter.get() + 1);
    });

    let report = e.mount().expect("applied");
    assert_eq!(report.truncated_at, Some(7));
    assert_eq!(
        e.surface().content().to_markup(),
        format!(r##"Lorem i<a href="#" class="{MORE_CLASS}">...</a>"##)
    );

    let mut on_indicator = e.surface_mut().click_at(60.0, 10.0).expect("listener attached");
    assert!(e.handle_click(&mut on_indicator));
    assert!(on_indicator.default_prevented);

    let mut on_text = e.surface_mut().click_at(10.0, 10.0).expect("listener attached");
    assert!(!e.handle_click(&mut on_text));
    assert!(!on_text.default_prevented);
    assert_eq!(clicks.get(), 1);
}

#[test]
fn no_click_listener_when_content_fits() {
    let mut e = Ellipsis::new(surface(400.0, 20.0), TEXT, EllipsisOptions::default());
    e.on_more_click(|_| {});
    e.mount();
    assert_eq!(e.truncated_at(), None);
    assert_eq!(e.surface().listener_count(EventKind::Click), 0);
    assert_eq!(e.surface_mut().click_at(10.0, 10.0), None);
}

#[test]
fn click_listener_follows_each_pass() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    e.on_more_click(|_| {});
    e.mount();
    e.apply_ellipsis();
    e.apply_ellipsis();
    assert_eq!(e.surface().listener_count(EventKind::Click), 1);

    e.surface_mut().resize(Size::new(400.0, 20.0));
    e.handle(Trigger::ElementResized(Size::new(400.0, 20.0)));
    assert_eq!(e.surface().listener_count(EventKind::Click), 0);
}

#[test]
fn disabled_renders_unmodified_and_reports_overflow() {
    let options = EllipsisOptions::default().with_enabled(false);
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, options);
    let changes = record_changes(&mut e);

    let report = e.mount().expect("pass runs");
    assert!(report.overflowing);
    assert_eq!(report.truncated_at, None);
    assert!(report.renders > 2);
    assert_eq!(shown(&e), TEXT);
    assert_eq!(*changes.borrow(), vec![None]);
}

#[test]
fn changed_options_reapply() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    e.mount();
    assert_eq!(e.set_options(EllipsisOptions::default()), None);

    let report = e
        .set_options(EllipsisOptions::default().with_indicator("+"))
        .expect("new indicator applies");
    assert_eq!(report.truncated_at, Some(9));
    assert_eq!(shown(&e), "Lorem ips+");

    let report = e
        .set_options(EllipsisOptions::default().with_indicator(""))
        .expect("back to default");
    assert_eq!(shown(&e), "Lorem i...");
    assert_eq!(report.truncated_at, Some(7));
}

#[test]
fn strategy_change_reregisters() {
    let detector = ResizeDetector::shared();
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default())
        .with_detector(Rc::clone(&detector));
    e.mount();
    assert_eq!(detector.borrow().listener_count(), 1);

    e.set_options(EllipsisOptions::default().with_resize_detection("window"));
    assert_eq!(detector.borrow().listener_count(), 0);
    e.surface_mut().resize(Size::new(400.0, 20.0));
    assert!(e.handle(Trigger::WindowResized).is_some());
    assert_eq!(shown(&e), TEXT);
}

#[test]
fn custom_substring_function() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    e.mount();
    let report = e
        .set_substring(Substring::Custom(Rc::new(|text: &str, start: usize, len: usize| {
            text.chars().skip(start).take(len).collect::<String>().to_uppercase()
        })))
        .expect("applies");
    assert_eq!(report.truncated_at, Some(7));
    assert_eq!(shown(&e), "LOREM I...");
}

#[test]
fn degenerate_box_still_gets_an_indicator() {
    let mut e = Ellipsis::new(surface(0.0, 0.0), TEXT, EllipsisOptions::default());
    let report = e.mount().expect("applied");
    assert_eq!(report.truncated_at, Some(0));
    assert_eq!(shown(&e), "...");
}

#[test]
fn change_events_need_an_observer() {
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, EllipsisOptions::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = e.on_change(move |v| sink.borrow_mut().push(*v));
    e.mount();
    assert!(e.off_change(sub));
    e.apply_ellipsis();
    assert_eq!(*seen.borrow(), vec![Some(7)]);
}

#[test]
fn rich_indicator_reports_more_clicks_from_inner_elements() {
    let options = EllipsisOptions::default().with_indicator_markup("<b><i>more</i></b>");
    let mut e = Ellipsis::new(surface(80.0, 20.0), TEXT, options);
    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    e.on_more_click(move |_| counter.set(counter.get() + 1));

    let report = e.mount().expect("applied");
    assert_eq!(report.truncated_at, Some(6));
    assert_eq!(
        e.surface().content().to_markup(),
        format!(r#"Lorem <b class="{MORE_CLASS}"><i>more</i></b>"#)
    );

    // "more" spans x 48..80; the innermost target is the <i>.
    let mut inner = e.surface_mut().click_at(60.0, 10.0).expect("listener attached");
    assert_eq!(inner.target_tag.as_deref(), Some("i"));
    assert!(e.handle_click(&mut inner));
    assert_eq!(clicks.get(), 1);
}
