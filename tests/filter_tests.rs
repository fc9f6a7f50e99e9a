/// End-to-end tests for the live-filter engine: bind a controller to an
/// in-memory page, drive it with simulated keystrokes, and check what a
/// user would see.
use goldpan::dom::{Document, MemoryDocument, NodeId, Selector, Visibility};
use goldpan::{FilterOptions, SearchController};

const PAGE: &str = "\
<input id=\"search\" value=\"\">\
<ul>\
  <li class=\"item\">Gold panning kit</li>\
  <li class=\"item\">Silver spoon</li>\
  <li class=\"item\">Golden <b>retriever</b></li>\
</ul>";

struct Fixture {
    doc: MemoryDocument,
    controller: SearchController,
    input: NodeId,
    items: Vec<NodeId>,
}

fn bind(page: &str, options: FilterOptions) -> Fixture {
    let mut doc = MemoryDocument::parse(page);
    let root = doc.root();
    let input = doc.find(&Selector::parse("#search").unwrap()).unwrap();
    let items = doc.query(root, &Selector::parse(".item").unwrap());
    let controller = SearchController::bind(&mut doc, root, options);
    assert!(controller.is_active());
    Fixture {
        doc,
        controller,
        input,
        items,
    }
}

impl Fixture {
    fn type_query(&mut self, query: &str) {
        self.doc.set_input_value(self.input, query);
        self.controller.on_key_event(&mut self.doc);
    }

    fn showing(&self) -> Vec<bool> {
        self.items
            .iter()
            .map(|&item| self.doc.visibility(item).is_showing())
            .collect()
    }

    fn markup(&self, index: usize) -> &str {
        self.doc.markup(self.items[index])
    }
}

#[test]
fn query_at_threshold_filters_and_highlights() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("gol");

    assert_eq!(fx.showing(), vec![true, false, true]);
    assert_eq!(fx.markup(0), "<mark>Gol</mark>d panning kit");
    assert_eq!(fx.markup(1), "Silver spoon");
    assert_eq!(fx.markup(2), "<mark>Gol</mark>den <b>retriever</b>");

    fx.doc.settle();
    assert_eq!(fx.doc.visibility(fx.items[1]), Visibility::Hidden);
}

#[test]
fn query_below_threshold_shows_everything_unmarked() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("gol");
    fx.doc.settle();
    fx.type_query("go");

    assert_eq!(fx.showing(), vec![true, true, true]);
    for i in 0..3 {
        assert!(!fx.markup(i).contains("<mark>"), "marker left in {:?}", fx.markup(i));
    }
}

#[test]
fn malformed_query_keeps_previous_states() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("gol");
    fx.doc.settle();
    assert_eq!(fx.showing(), vec![true, false, true]);

    fx.type_query("a(");

    // no crash, no reclassification; the filter keeps working afterwards
    assert_eq!(fx.showing(), vec![true, false, true]);

    fx.type_query("silver");
    fx.doc.settle();
    assert_eq!(fx.showing(), vec![false, true, false]);
}

#[test]
fn clearing_the_query_restores_original_markup() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    let before: Vec<String> = (0..3).map(|i| fx.markup(i).to_string()).collect();
    fx.type_query("golden ret");
    assert_ne!(fx.markup(2), before[2]);

    fx.type_query("");

    let after: Vec<String> = (0..3).map(|i| fx.markup(i).to_string()).collect();
    assert_eq!(before, after);
    assert_eq!(fx.showing(), vec![true, true, true]);
}

#[test]
fn multi_word_query_highlights_across_inline_markup() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("golden ret");

    assert_eq!(fx.showing(), vec![false, false, true]);
    assert_eq!(
        fx.markup(2),
        "<mark>Golden </mark><b><mark>ret</mark>riever</b>"
    );
}

#[test]
fn markers_never_straddle_tag_boundaries() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("golden retriever");

    let marked = fx.markup(2);
    let mut rest = marked;
    while let Some(start) = rest.find("<mark>") {
        let inner_start = start + "<mark>".len();
        let end = rest[inner_start..]
            .find("</mark>")
            .expect("unbalanced marker");
        let inner = &rest[inner_start..inner_start + end];
        assert!(!inner.contains('<'), "marker wraps a tag in {marked:?}");
        rest = &rest[inner_start + end + "</mark>".len()..];
    }
}

#[test]
fn zero_threshold_empty_query_shows_all() {
    let mut fx = bind(
        PAGE,
        FilterOptions::new("#search", ".item").with_threshold(0),
    );

    fx.type_query("");

    // the empty pattern matches every candidate, and no markers are emitted
    assert_eq!(fx.showing(), vec![true, true, true]);
    for i in 0..3 {
        assert!(!fx.markup(i).contains("<mark>"));
    }
}

#[test]
fn query_is_literal_regex_not_escaped_text() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("gold|silver");
    assert_eq!(fx.showing(), vec![true, true, true]);

    fx.type_query("^silver");
    assert_eq!(fx.showing(), vec![false, true, false]);
}

#[test]
fn custom_transitions_replace_default_fades() {
    let options = FilterOptions::new("#search", ".item")
        .with_fade_in(|doc: &mut dyn Document, node| {
            doc.set_visibility(node, Visibility::Visible);
        })
        .with_fade_out(|doc: &mut dyn Document, node| {
            doc.set_visibility(node, Visibility::Hidden);
        });
    let mut fx = bind(PAGE, options);

    fx.type_query("silver");

    // transitions completed instantly, nothing left in flight
    assert_eq!(fx.doc.visibility(fx.items[0]), Visibility::Hidden);
    assert_eq!(fx.doc.visibility(fx.items[1]), Visibility::Visible);
    for &item in &fx.items {
        assert_eq!(fx.doc.pending_fade(item), None);
    }
}

#[test]
fn rapid_typing_supersedes_in_flight_fades() {
    let mut fx = bind(PAGE, FilterOptions::new("#search", ".item"));

    fx.type_query("silver");
    assert_eq!(fx.doc.visibility(fx.items[0]), Visibility::FadingOut);

    // next keystroke lands before the fade completes
    fx.type_query("gold");
    assert_eq!(fx.doc.visibility(fx.items[0]), Visibility::FadingIn);

    fx.doc.settle();
    assert_eq!(fx.doc.visibility(fx.items[0]), Visibility::Visible);
}

#[test]
fn configured_fade_speed_reaches_the_document() {
    let mut fx = bind(
        PAGE,
        FilterOptions::new("#search", ".item").with_fade_speed(450),
    );

    fx.type_query("silver");

    let (_, duration) = fx.doc.pending_fade(fx.items[0]).expect("fade scheduled");
    assert_eq!(duration, 450);
}
