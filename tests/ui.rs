use crawlview::geometry::Rect;
use crawlview::ui::click::ClickRouter;
use crawlview::ui::{ELLIPSIS, PageSet, UiState, paginate};

fn lines(pages: &[crawlview::ui::Page]) -> Vec<Vec<&str>> {
    pages.iter().map(|p| p.lines.iter().map(String::as_str).collect()).collect()
}

// ── paginate ─────────────────────────────────────────────────────────────────

#[test]
fn empty_text_has_no_pages() {
    assert!(paginate("", 10, 2).is_empty());
    assert!(paginate("   \n\t ", 10, 2).is_empty());
}

#[test]
fn short_text_is_one_page_without_marker() {
    let pages = paginate("hello world", 33, 2);
    assert_eq!(lines(&pages), vec![vec!["hello world"]]);
    assert!(!pages[0].ends_with_ellipsis());
}

#[test]
fn pangram_splits_into_three_pages() {
    let pages = paginate("the quick brown fox jumps over the lazy dog", 10, 2);
    assert_eq!(
        lines(&pages),
        vec![
            vec!["the quick", "brown .."],
            vec!["fox jumps", "over .."],
            vec!["the lazy", "dog"],
        ]
    );
}

#[test]
fn every_page_but_the_last_ends_with_marker() {
    let text = "You enter a cold chamber. The walls are slick with moss and somewhere \
                ahead water drips steadily onto stone. A goblin eyes you from the corner.";
    let pages = paginate(text, 33, 2);
    assert!(pages.len() > 1);
    for page in &pages[..pages.len() - 1] {
        assert!(page.ends_with_ellipsis(), "page {:?} lacks marker", page.lines);
    }
    assert!(!pages.last().unwrap().ends_with_ellipsis());
}

#[test]
fn no_line_exceeds_width() {
    let text = "a bb ccc dddd eeeee ffffff ggggggg hhhhhhhh iiiiiiiii jjjjjjjjjj";
    for width in 4..20 {
        for page in paginate(text, width, 2) {
            for line in &page.lines {
                assert!(line.chars().count() <= width, "width {width}: '{line}'");
            }
        }
    }
}

#[test]
fn no_words_are_lost() {
    let text = "the quick brown fox jumps over the lazy dog and then naps in the sun";
    for width in [8, 10, 14, 33] {
        for per_page in [1, 2, 3] {
            let words: Vec<String> = paginate(text, width, per_page)
                .iter()
                .flat_map(|p| p.lines.clone())
                .flat_map(|l| l.split_whitespace().map(str::to_owned).collect::<Vec<_>>())
                .filter(|w| w != ELLIPSIS)
                .collect();
            assert_eq!(words.join(" "), text, "width {width}, per_page {per_page}");
        }
    }
}

#[test]
fn long_word_is_hard_split() {
    let pages = paginate("abcdefghij", 6, 1);
    assert_eq!(lines(&pages), vec![vec!["abc .."], vec!["def .."], vec!["ghi .."], vec!["j"]]);
}

#[test]
fn tiny_width_is_raised() {
    let pages = paginate("a b c", 1, 1);
    assert_eq!(lines(&pages), vec![vec!["a .."], vec!["b c"]]);
}

#[test]
fn zero_lines_per_page_is_raised() {
    assert_eq!(paginate("one two", 33, 0).len(), 1);
}

#[test]
fn paginate_is_deterministic() {
    let text = "same input same output every single time";
    assert_eq!(paginate(text, 12, 2), paginate(text, 12, 2));
}

// ── PageSet ──────────────────────────────────────────────────────────────────

#[test]
fn page_set_navigation_clamps() {
    let mut set = PageSet::from_text("the quick brown fox jumps over the lazy dog", 10, 2);
    assert_eq!(set.len(), 3);
    assert!(!set.has_prev() && set.has_next());

    set.prev();
    assert_eq!(set.cursor(), 0);
    set.goto(99);
    assert_eq!(set.cursor(), 2);
    assert!(set.has_prev() && !set.has_next());
    set.next();
    assert_eq!(set.cursor(), 2);
    assert_eq!(set.current().unwrap().lines, vec!["the lazy", "dog"]);
}

#[test]
fn empty_page_set() {
    let mut set = PageSet::from_text("", 10, 2);
    set.next();
    assert!(set.is_empty());
    assert!(set.current().is_none());
    assert!(!set.has_prev() && !set.has_next());
}

#[test]
fn new_message_resets_cursor() {
    let mut ui = UiState::new(10, 2);
    assert!(ui.set_message("the quick brown fox jumps over the lazy dog"));
    ui.pages.next();
    assert!(!ui.set_message("the quick brown fox jumps over the lazy dog"));
    assert_eq!(ui.pages.cursor(), 1);
    assert!(ui.set_message("something else entirely, also long enough"));
    assert_eq!(ui.pages.cursor(), 0);
}

// ── ClickRouter ──────────────────────────────────────────────────────────────

#[test]
fn overlapping_regions_fire_in_registration_order() {
    let mut router: ClickRouter<Vec<u32>> = ClickRouter::new();
    router.register(Rect::new(0.0, 0.0, 2.0, 2.0), |log| log.push(1));
    router.register(Rect::new(1.0, 1.0, 3.0, 3.0), |log| log.push(2));
    router.register(Rect::new(5.0, 5.0, 6.0, 6.0), |log| log.push(3));

    let mut log = Vec::new();
    router.dispatch([1.5, 1.5], &mut log);
    assert_eq!(log, vec![1, 2]);
}

#[test]
fn edges_are_inclusive() {
    let mut router: ClickRouter<u32> = ClickRouter::new();
    router.register(Rect::new(0.0, 0.0, 1.0, 1.0), |n| *n += 1);
    let mut n = 0;
    router.dispatch([1.0, 0.0], &mut n);
    router.dispatch([1.01, 0.0], &mut n);
    assert_eq!(n, 1);
}

#[test]
fn closed_gate_skips_region() {
    let mut router: ClickRouter<(bool, u32)> = ClickRouter::new();
    router.register_gated(Rect::new(0.0, 0.0, 1.0, 1.0), |s: &(bool, u32)| s.0, |s| s.1 += 1);
    let mut state = (false, 0);
    router.dispatch([0.5, 0.5], &mut state);
    assert_eq!(state.1, 0);
    state.0 = true;
    router.dispatch([0.5, 0.5], &mut state);
    assert_eq!(state.1, 1);
}

/// Gates see the state from before the click, not what earlier actions did.
#[test]
fn gates_are_evaluated_before_any_action() {
    let mut router: ClickRouter<(bool, u32)> = ClickRouter::new();
    let r = Rect::new(0.0, 0.0, 1.0, 1.0);
    router.register(r, |s| s.0 = false);
    router.register_gated(r, |s: &(bool, u32)| s.0, |s| s.1 += 1);

    let mut state = (true, 0);
    router.dispatch([0.5, 0.5], &mut state);
    assert_eq!(state, (false, 1));
    router.dispatch([0.5, 0.5], &mut state);
    assert_eq!(state, (false, 1));
}

#[test]
fn hits_reports_live_regions() {
    let mut router: ClickRouter<bool> = ClickRouter::new();
    router.register(Rect::new(0.0, 0.0, 4.0, 4.0), |_| {});
    router.register_gated(Rect::new(0.0, 0.0, 4.0, 4.0), |open: &bool| *open, |_| {});
    assert_eq!(router.len(), 2);
    assert_eq!(router.hits([2.0, 2.0], &false), vec![0]);
    assert_eq!(router.hits([2.0, 2.0], &true), vec![0, 1]);
    assert!(router.hits([9.0, 9.0], &true).is_empty());
}
