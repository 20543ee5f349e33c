use std::cell::RefCell;
use std::rc::Rc;

use thumbnav_ui::Bounds;

use super::*;
use crate::surface::RecordingSurface;

fn images(n: usize) -> Vec<GalleryImage> {
    (0..n)
        .map(|i| GalleryImage::new(100 + i as u64, i))
        .collect()
}

fn navigator(n: usize) -> GalleryNavigator<RecordingSurface> {
    GalleryNavigator::new(images(n), Vec::new(), RecordingSurface::new(n))
}

/// Subscribe a recorder and return the shared log of notifications.
fn record(nav: &mut GalleryNavigator<RecordingSurface>) -> Rc<RefCell<Vec<ImageChanged>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    nav.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn test_construction_syncs_surface() {
    let nav = navigator(4);
    assert_eq!(nav.current_index(), 0);
    assert_eq!(nav.image_count(), 4);
    assert_eq!(nav.surface().active_indices(), vec![0]);
    assert!(nav.verify().is_ok());
}

#[test]
fn test_construction_adopts_host_active_image() {
    let mut imgs = images(4);
    imgs[3].initially_active = true;
    let nav = GalleryNavigator::new(imgs, Vec::new(), RecordingSurface::new(4));

    assert_eq!(nav.current_index(), 3);
    assert_eq!(nav.surface().active_indices(), vec![3]);
}

#[test]
fn test_switch_to_every_valid_index() {
    for start in 0..4 {
        for target in 0..4 {
            let mut nav = navigator(4);
            nav.switch_to(start);
            let log = record(&mut nav);

            let event = nav.switch_to(target);

            assert_eq!(nav.current_index(), target);
            if start == target {
                assert_eq!(event, None);
                assert!(log.borrow().is_empty());
            } else {
                let expected = ImageChanged {
                    previous_index: start,
                    current_index: target,
                    current_image: MediaId::from(100 + target as u64),
                };
                assert_eq!(event, Some(expected.clone()));
                assert_eq!(*log.borrow(), vec![expected]);
            }
            assert!(nav.verify().is_ok());
        }
    }
}

#[test]
fn test_switch_to_out_of_range_is_noop() {
    let mut nav = navigator(4);
    let log = record(&mut nav);
    nav.surface_mut().activations.clear();

    assert_eq!(nav.switch_to(4), None);
    assert_eq!(nav.switch_to(usize::MAX), None);

    assert_eq!(nav.current_index(), 0);
    assert!(log.borrow().is_empty());
    assert!(nav.surface().activations.is_empty());
}

#[test]
fn test_negative_and_past_end_host_indices_are_noops() {
    use crate::input::{InputAction, InputAdapter};

    let mut nav = navigator(4);
    let mut adapter = InputAdapter::default();
    let log = record(&mut nav);

    for raw in [-1_i64, 4] {
        if let Some(InputAction::Navigate(command)) = adapter.thumbnail_clicked(raw) {
            assert_eq!(nav.execute(command), None);
        }
    }

    assert_eq!(nav.current_index(), 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_next_sequence_wraps() {
    let mut nav = navigator(4);

    let seen: Vec<usize> = (0..3)
        .filter_map(|_| nav.next())
        .map(|event| event.current_index)
        .collect();
    assert_eq!(seen, vec![1, 2, 3]);

    let wrapped = nav.next().unwrap();
    assert_eq!(wrapped.previous_index, 3);
    assert_eq!(wrapped.current_index, 0);
}

#[test]
fn test_next_len_times_is_identity() {
    for len in 1..6 {
        for start in 0..len {
            let mut nav = navigator(len);
            nav.switch_to(start);
            for _ in 0..len {
                nav.next();
            }
            assert_eq!(nav.current_index(), start, "len {len}, start {start}");
        }
    }
}

#[test]
fn test_prev_undoes_next() {
    for start in 0..5 {
        let mut nav = navigator(5);
        nav.switch_to(start);
        nav.next();
        nav.prev();
        assert_eq!(nav.current_index(), start);
    }
}

#[test]
fn test_prev_wraps_from_first() {
    let mut nav = navigator(3);
    let event = nav.prev().unwrap();
    assert_eq!((event.previous_index, event.current_index), (0, 2));
}

#[test]
fn test_single_image_navigation_never_fires() {
    let mut nav = navigator(1);
    let log = record(&mut nav);

    assert_eq!(nav.next(), None);
    assert_eq!(nav.prev(), None);
    assert_eq!(nav.go_to_last(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_first_and_last() {
    let mut nav = navigator(4);
    assert_eq!(nav.go_to_last().unwrap().current_index, 3);
    assert_eq!(nav.go_to_last(), None);
    assert_eq!(nav.go_to_first().unwrap().current_index, 0);
}

#[test]
fn test_empty_gallery() {
    let mut nav = GalleryNavigator::new(Vec::new(), Vec::new(), RecordingSurface::new(0));

    assert_eq!(nav.image_count(), 0);
    assert_eq!(nav.current_index(), 0);
    assert_eq!(nav.next(), None);
    assert_eq!(nav.prev(), None);
    assert_eq!(nav.go_to_first(), None);
    assert_eq!(nav.go_to_last(), None);
    assert_eq!(nav.switch_to(0), None);
    assert!(nav.verify().is_ok());
}

#[test]
fn test_execute_commands() {
    let mut nav = navigator(4);

    nav.execute(GalleryCommand::Last);
    assert_eq!(nav.current_index(), 3);
    nav.execute(GalleryCommand::Next);
    assert_eq!(nav.current_index(), 0);
    nav.execute(GalleryCommand::Prev);
    assert_eq!(nav.current_index(), 3);
    nav.execute(GalleryCommand::SwitchTo(1));
    assert_eq!(nav.current_index(), 1);
    nav.execute(GalleryCommand::First);
    assert_eq!(nav.current_index(), 0);
}

#[test]
fn test_surface_pairs_toggle() {
    let mut nav = navigator(3);
    nav.surface_mut().activations.clear();

    nav.switch_to(2);

    assert_eq!(nav.surface().activations, vec![(0, false), (2, true)]);
    assert_eq!(nav.surface().active_indices(), vec![2]);
}

#[test]
fn test_verify_detects_drift() {
    let mut nav = navigator(3);
    nav.surface_mut().force_active(1, true);

    assert_eq!(
        nav.verify(),
        Err(GalleryError::StateMismatch {
            expected: 0,
            active: vec![0, 1],
        })
    );

    nav.sync_surface();
    assert!(nav.verify().is_ok());
}

#[test]
fn test_observers_in_order_and_unsubscribe() {
    let mut nav = navigator(3);
    let calls = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let calls = Rc::clone(&calls);
        nav.subscribe(move |_| calls.borrow_mut().push("first"))
    };
    {
        let calls = Rc::clone(&calls);
        nav.subscribe(move |_| calls.borrow_mut().push("second"));
    }

    nav.next();
    assert_eq!(*calls.borrow(), vec!["first", "second"]);

    assert!(nav.unsubscribe(first));
    assert!(!nav.unsubscribe(first));
    nav.next();
    assert_eq!(*calls.borrow(), vec!["first", "second", "second"]);
}

#[test]
fn test_independent_galleries() {
    let mut a = navigator(3);
    let b = navigator(3);

    a.next();

    assert_eq!(a.current_index(), 1);
    assert_eq!(b.current_index(), 0);
}

#[test]
fn test_scrolls_hidden_thumbnail_into_view() {
    let surface = RecordingSurface::new(10)
        .with_thumbnail_strip(75.0, 8.0)
        .with_viewport(Bounds::new(0.0, 0.0, 75.0, 300.0));
    let mut nav = GalleryNavigator::new(images(10), Vec::new(), surface);

    // Visible already
    nav.switch_to(2);
    assert!(nav.surface().scroll_requests.is_empty());

    nav.switch_to(8);
    assert_eq!(nav.surface().scroll_requests, vec![8]);

    // Neighbour of the revealed thumbnail is now visible too
    nav.switch_to(7);
    assert_eq!(nav.surface().scroll_requests, vec![8]);

    nav.go_to_first();
    assert_eq!(nav.surface().scroll_requests, vec![8, 0]);
}

#[test]
fn test_missing_scroll_container_does_not_block() {
    let surface = RecordingSurface::new(10).with_thumbnail_strip(75.0, 8.0);
    let mut nav = GalleryNavigator::new(images(10), Vec::new(), surface);

    assert!(nav.switch_to(9).is_some());
    assert_eq!(nav.current_index(), 9);
    assert!(nav.surface().scroll_requests.is_empty());
}

fn color_navigator() -> GalleryNavigator<RecordingSurface> {
    let variants = vec![
        Variant::new([("color", "red")]).with_image(102_u64),
        Variant::new([("color", "blue")]).with_image(100_u64),
    ];
    GalleryNavigator::new(images(4), variants, RecordingSurface::new(4))
}

fn selected(pairs: &[(&str, &str)]) -> SelectedOptions {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_selected_options_switch() {
    let mut nav = color_navigator();
    let log = record(&mut nav);

    let outcome = nav.apply_selected_options(&selected(&[("color", "red")]));
    assert!(matches!(outcome, VariantOutcome::Switched(ref e) if e.current_index == 2));

    assert_eq!(
        nav.apply_selected_options(&selected(&[("color", "red")])),
        VariantOutcome::AlreadyShown(2)
    );

    let outcome = nav.apply_selected_options(&selected(&[("color", "blue")]));
    assert!(matches!(outcome, VariantOutcome::Switched(ref e) if e.current_index == 0));
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_no_matching_variant_leaves_gallery_unchanged() {
    let mut nav = color_navigator();
    nav.switch_to(3);
    let log = record(&mut nav);

    assert_eq!(
        nav.apply_selected_options(&selected(&[("color", "green")])),
        VariantOutcome::NoMatch
    );
    assert_eq!(nav.current_index(), 3);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_apply_host_variant_payload() {
    use crate::model::HostVariantEvent;

    let mut nav = color_navigator();

    let change = HostVariantEvent::from_json(r#"{ "variant": { "featured_image": { "id": 103 } } }"#)
        .and_then(HostVariantEvent::into_change)
        .unwrap();
    let outcome = nav.apply_change(&change);
    assert!(matches!(outcome, VariantOutcome::Switched(ref e) if e.current_index == 3));

    let change = HostVariantEvent::from_json(r#"{ "selectedOptions": { "color": "blue" } }"#)
        .and_then(HostVariantEvent::into_change)
        .unwrap();
    let outcome = nav.apply_change(&change);
    assert!(matches!(outcome, VariantOutcome::Switched(ref e) if e.current_index == 0));
}

#[test]
fn test_image_availability_derived_from_variants() {
    let variants = vec![
        Variant::new([("color", "red")]).with_image(101_u64).unavailable(),
        Variant::new([("color", "blue")]).with_image(102_u64),
    ];
    let nav = GalleryNavigator::new(images(3), variants, RecordingSurface::new(3));

    let flags: Vec<bool> = nav.state().images().iter().map(|i| i.available).collect();
    assert_eq!(flags, vec![true, false, true]);

    let options = nav.option_availability();
    assert!(options.is_available("blue"));
    assert!(!options.is_available("red"));
}

#[test]
fn test_out_of_order_positions_share_one_index_space() {
    use crate::state::{apply_order, display_order};

    // Markup order: a (position 2, rendered active), b (position 0), c (position 1)
    let host = vec![
        GalleryImage::new("a", 2).active(),
        GalleryImage::new("b", 0),
        GalleryImage::new("c", 1),
    ];
    let order = display_order(&host);
    // The surface holds its elements in the same display order
    let elements = apply_order(vec!["a", "b", "c"], &order);
    let mut surface = RecordingSurface::new(3);
    let rendered_active = elements.iter().position(|label| *label == "a").unwrap();
    surface.force_active(rendered_active, true);

    let mut nav = GalleryNavigator::new(host, Vec::new(), surface);

    assert_eq!(nav.current_image().unwrap().media_id, MediaId::from("a"));
    assert_eq!(nav.surface().active_indices(), vec![nav.current_index()]);
    assert_eq!(elements[nav.current_index()], "a");

    let event = nav.switch_to(0).unwrap();
    assert_eq!(event.current_image, MediaId::from("b"));
    let shown: Vec<&str> = nav
        .surface()
        .active_indices()
        .into_iter()
        .map(|i| elements[i])
        .collect();
    assert_eq!(shown, vec!["b"]);
}
