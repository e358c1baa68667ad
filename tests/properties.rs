use proptest::prelude::*;
use spark_page::animation::AnimationClock;
use spark_page::config::{FlipConfig, PageConfig, RevealConfig, ScrollConfig};
use spark_page::layout::wrap_text;
use spark_page::primitives::FlipLink;
use spark_page::state::{DocumentRoot, MenuController, ScrollTracker, ViewportRevealTracker};
use spark_page::{PageShell, Rect, string_width};

#[derive(Debug, Clone, Copy)]
enum MenuOp {
    Toggle,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
enum PointerOp {
    Enter,
    Leave,
    Press,
    Release,
}

fn menu_op() -> impl Strategy<Value = MenuOp> {
    prop_oneof![Just(MenuOp::Toggle), Just(MenuOp::Open), Just(MenuOp::Close)]
}

fn pointer_op() -> impl Strategy<Value = PointerOp> {
    prop_oneof![
        Just(PointerOp::Enter),
        Just(PointerOp::Leave),
        Just(PointerOp::Press),
        Just(PointerOp::Release),
    ]
}

proptest! {
    #[test]
    fn scrolled_follows_threshold(positions in prop::collection::vec(0.0f64..5000.0, 1..40)) {
        let tracker = ScrollTracker::new(ScrollConfig::default());
        for position in positions {
            tracker.update(position);
            prop_assert_eq!(tracker.scrolled(), position > 20.0);
            prop_assert_eq!(tracker.position(), position);
        }
    }

    #[test]
    fn header_follows_last_large_move(positions in prop::collection::vec(0.0f64..3000.0, 1..40)) {
        let tracker = ScrollTracker::new(ScrollConfig::default());
        let mut last = 0.0;
        let mut visible = true;

        for position in positions {
            tracker.update(position);
            if (position - last).abs() > 50.0 {
                visible = position < last;
                last = position;
            }
            prop_assert_eq!(tracker.header_visible(), visible);
            prop_assert_eq!(tracker.last_recorded(), last);
            prop_assert!((position - tracker.last_recorded()).abs() <= 50.0
                || tracker.last_recorded() == position);
        }
    }

    #[test]
    fn reveal_latch_never_resets(offsets in prop::collection::vec(-2000.0f32..4000.0, 1..30)) {
        let tracker = ViewportRevealTracker::new("cards", &RevealConfig::default());
        tracker.observe();
        let element = Rect::new(0.0, 1000.0, 800.0, 400.0);
        let mut seen = false;

        for offset in offsets {
            let viewport = Rect::new(0.0, offset, 1280.0, 800.0);
            tracker.check(&element, &viewport);
            if seen {
                prop_assert!(tracker.is_triggered());
            }
            seen = tracker.is_triggered();
        }
    }

    #[test]
    fn menu_lock_matches_open_state(ops in prop::collection::vec(menu_op(), 0..30)) {
        let root = DocumentRoot::new();
        {
            let menu = MenuController::new(root.clone());
            for op in ops {
                match op {
                    MenuOp::Toggle => menu.toggle_open(),
                    MenuOp::Open => menu.open(),
                    MenuOp::Close => menu.close(),
                }
                prop_assert_eq!(root.is_scroll_locked(), menu.is_open());
                prop_assert!(root.lock_count() <= 1);
            }
        }
        prop_assert!(!root.is_scroll_locked());
    }

    #[test]
    fn flip_link_settles_to_rest(
        ops in prop::collection::vec((pointer_op(), 0.0f64..0.5), 0..20)
    ) {
        let clock = AnimationClock::new();
        let link = FlipLink::new("Services", "#services", FlipConfig::default(), clock.clone());
        let rest = link.resting_visual();
        let mut now = 0.0;

        for (op, dt) in ops {
            now += dt;
            clock.set_time(now);
            match op {
                PointerOp::Enter => link.hover_start(),
                PointerOp::Leave => link.hover_end(),
                PointerOp::Press => link.press(),
                PointerOp::Release => link.release(),
            }
        }
        link.release();
        link.hover_end();
        clock.set_time(now + 10.0);

        let visual = link.visual();
        prop_assert!(!link.is_animating());
        prop_assert!((visual.link.rotate_x - rest.link.rotate_x).abs() < 1e-3);
        prop_assert!((visual.link.scale - rest.link.scale).abs() < 1e-3);
        prop_assert!((visual.front_opacity - rest.front_opacity).abs() < 1e-3);
        prop_assert_eq!(visual.bold, rest.bold);
        prop_assert_eq!(visual.pressed, rest.pressed);
    }

    #[test]
    fn shell_scroll_stays_in_range(deltas in prop::collection::vec(-5000.0f64..5000.0, 1..30)) {
        let shell = PageShell::new(PageConfig::default(), DocumentRoot::new(), AnimationClock::new())
            .expect("shell");
        let max = shell.layout().max_scroll();

        for delta in deltas {
            shell.scroll_by(delta);
            let position = shell.scroll_position();
            prop_assert!((0.0..=max).contains(&position));
        }
    }

    #[test]
    fn wrapped_lines_fit(words in prop::collection::vec("[a-z]{1,12}", 0..30), width in 1u16..40) {
        let text = words.join(" ");
        for line in wrap_text(&text, width) {
            prop_assert!(string_width(&line) <= width);
        }
    }
}
