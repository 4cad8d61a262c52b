use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::color::Rgba;
use backdrop_core::theme::ThemeStore;
use backdrop_core::transition::{Celestial, TransitionFrame, TransitionSequencer, PANELS};

#[test]
fn test_idle_sequencer_is_hidden() {
    let seq = TransitionSequencer::default();
    assert!(!seq.is_active());
    assert!(seq.frame(0.0).is_hidden());
}

#[test]
fn test_dark_reveal_timeline() {
    let mut seq = TransitionSequencer::default();
    seq.observe(true, true, 1000.0);

    let f = seq.frame(1000.0);
    assert_eq!(f.overlay, Some(Rgba::rgba(0, 0, 0, 0.8)));
    assert_eq!(f.panels, [false; 4]);
    assert_eq!(f.celestial, None);

    assert_eq!(seq.frame(1099.0).panels, [false; 4]);
    assert_eq!(seq.frame(1100.0).panels, [true, false, false, false]);
    assert_eq!(seq.frame(1199.0).celestial, None);
    assert_eq!(seq.frame(1200.0).celestial, Some(Celestial::Moon));
    assert_eq!(seq.frame(1500.0).panels, [true, true, true, false]);
    assert_eq!(seq.frame(1700.0).panels, [true; 4]);
}

#[test]
fn test_light_switch_shows_sun_without_panels() {
    let mut seq = TransitionSequencer::default();
    seq.observe(true, false, 0.0);
    let f = seq.frame(1000.0);
    assert_eq!(f.overlay, Some(Rgba::rgba(255, 255, 255, 0.8)));
    assert_eq!(f.panels, [false; 4]);
    assert_eq!(f.celestial, Some(Celestial::Sun));
}

#[test]
fn test_only_edges_move_the_clock() {
    let mut seq = TransitionSequencer::default();
    seq.observe(true, true, 0.0);
    seq.observe(true, true, 650.0);
    assert_eq!(seq.frame(700.0).panels, [true; 4], "clock must not restart");

    seq.observe(false, true, 800.0);
    assert!(!seq.is_active());
    assert_eq!(seq.frame(900.0), TransitionFrame::HIDDEN);
}

#[test]
fn test_panel_content() {
    let titles: Vec<_> = PANELS.iter().map(|p| p.title).collect();
    assert_eq!(
        titles,
        ["theme-toggle.js", "styles.js", "settings.json", "terminal"]
    );
    assert!(PANELS.iter().all(|p| !p.lines.is_empty()));
}

#[test]
fn test_follows_theme_store() {
    let store = ThemeStore::in_memory();
    let seq = Rc::new(RefCell::new(TransitionSequencer::default()));
    let clock = Rc::new(RefCell::new(0.0));
    {
        let seq = seq.clone();
        let clock = clock.clone();
        store.subscribe(move |s| {
            seq.borrow_mut()
                .observe(s.is_animating, s.is_dark, *clock.borrow())
        });
    }

    // dark -> light
    store.toggle(0.0);
    assert_eq!(seq.borrow().frame(300.0).celestial, Some(Celestial::Sun));
    assert_eq!(seq.borrow().frame(300.0).panels, [false; 4]);

    *clock.borrow_mut() = 1500.0;
    store.tick(1500.0);
    assert!(seq.borrow().frame(1500.0).is_hidden());

    // light -> dark, panels appear
    *clock.borrow_mut() = 2000.0;
    store.toggle(2000.0);
    assert_eq!(seq.borrow().frame(2700.0).panels, [true; 4]);
    assert_eq!(seq.borrow().frame(2700.0).celestial, Some(Celestial::Moon));

    *clock.borrow_mut() = 3500.0;
    store.tick(3500.0);
    assert!(!seq.borrow().is_active());
}
