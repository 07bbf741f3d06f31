//! End-to-end tour behavior against the headless document surface.

use std::cell::RefCell;
use std::rc::Rc;

use smartour::{
    ClickHandler, ClickTarget, ConfigOverride, Document, Error, PanelPosition, Phase, RegionKind,
    ScrollOffset, Step, Tour,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Tour fixture</title></head>
<body>
    <header id="target" style="top: 100px; left: 50px; width: 200px; height: 40px">Search</header>
    <section id="second" style="top: 400px; left: 300px; width: 100px; height: 60px">
        <a class="link" style="top: 10px; left: 10px; width: 50px; height: 20px">More</a>
    </section>
    <footer id="third" style="top: 900px; left: 0px; width: 800px; height: 80px"></footer>
</body>
</html>"#;

const PANEL: &str = r#"<div class="tip" style="width: 120px; height: 30px">
    <button class="next">Next</button><button class="prev">Back</button>
</div>"#;

fn tour() -> Tour<Document> {
    Tour::new(ConfigOverride::new().with_padding(5.0), Document::parse(PAGE))
}

fn style_of(tour: &Tour<Document>, selector: &str, property: &str) -> Option<String> {
    let doc = tour.surface();
    let id = doc.query_selector(selector).unwrap()?;
    doc.style_of(id).get(property).map(str::to_string)
}

fn navigable(target: &str) -> Step {
    Step::new(target)
        .with_panel(PANEL)
        .with_key_binding(".next", ClickHandler::advance())
        .with_key_binding(".prev", ClickHandler::retreat())
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_mask_and_top_panel_layout() {
    let mut tour = tour();
    tour.focus_single(&Step::new("#target").with_panel(PANEL)).unwrap();

    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("95px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "left").as_deref(), Some("45px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "width").as_deref(), Some("210px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "height").as_deref(), Some("50px"));

    assert_eq!(style_of(&tour, ".smartour-slot_top", "top").as_deref(), Some("65px"));
    assert_eq!(style_of(&tour, ".smartour-slot_top", "left").as_deref(), Some("90px"));
}

#[test]
fn test_bottom_panel_layout() {
    let mut tour = tour();
    let step = Step::new("#target")
        .with_panel(PANEL)
        .with_config(ConfigOverride::new().with_panel_position(PanelPosition::Bottom));
    tour.focus_single(&step).unwrap();

    assert_eq!(style_of(&tour, ".smartour-slot_bottom", "top").as_deref(), Some("145px"));
    assert_eq!(style_of(&tour, ".smartour-slot_bottom", "left").as_deref(), Some("90px"));
}

#[test]
fn test_side_panels_center_vertically() {
    for (position, left) in [(PanelPosition::Left, "-75px"), (PanelPosition::Right, "255px")] {
        let mut tour = tour();
        let step = Step::new("#target")
            .with_panel(PANEL)
            .with_config(ConfigOverride::new().with_panel_position(position));
        tour.focus_single(&step).unwrap();

        let slot = format!(".smartour-slot_{position}");
        assert_eq!(style_of(&tour, &slot, "top").as_deref(), Some("105px"), "{position}");
        assert_eq!(style_of(&tour, &slot, "left").as_deref(), Some(left), "{position}");
    }
}

#[test]
fn test_scroll_offset_is_added() {
    let mut page = Document::parse(PAGE);
    page.set_root_scroll(ScrollOffset::new(30.0, 0.0));
    page.set_body_scroll(ScrollOffset::new(999.0, 7.0));

    let mut tour = Tour::new(ConfigOverride::new(), page);
    tour.focus_single(&Step::new("#target")).unwrap();

    // Measured 70px below the viewport top, written back in document space.
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("95px"));
    // Horizontal falls back to the body's offset.
    assert_eq!(style_of(&tour, ".smartour-mask", "left").as_deref(), Some("45px"));
}

#[test]
fn test_region_classes_and_styles() {
    let mut tour = Tour::new(
        ConfigOverride::new()
            .with_prefix("guide")
            .with_mask_color("rgba(255, 0, 0, .3)")
            .with_animate(false),
        Document::parse(PAGE),
    );
    tour.focus_single(&Step::new("#target").with_panel(PANEL)).unwrap();

    assert_eq!(
        style_of(&tour, ".guide-mask", "box-shadow").as_deref(),
        Some("0 0 0 9999px rgba(255, 0, 0, .3)")
    );
    assert_eq!(style_of(&tour, ".guide-mask", "transition"), None);
    assert_eq!(style_of(&tour, ".guide-slot", "transition"), None);
    assert_eq!(style_of(&tour, ".guide-layer", "position").as_deref(), Some("fixed"));
}

// ============================================================================
// Sequencing
// ============================================================================

#[test]
fn test_advance_walks_steps_then_terminates() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target"), Step::new("#second")]);
    assert_eq!(tour.phase(), Phase::Idle);

    tour.advance().unwrap();
    assert_eq!(tour.current_index(), Some(0));
    tour.advance().unwrap();
    assert_eq!(tour.current_index(), Some(1));
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("395px"));

    tour.advance().unwrap();
    assert_eq!(tour.phase(), Phase::Done);
    assert_eq!(tour.current_index(), None);
    assert!(tour.surface().query_selector(".smartour-mask").unwrap().is_none());
    assert!(tour.surface().query_selector(".smartour-layer").unwrap().is_none());
    assert_eq!(tour.surface().listener_count(), 0);
}

#[test]
fn test_retreat_stays_on_first_step() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target"), Step::new("#second")]);
    tour.advance().unwrap();

    tour.retreat().unwrap();
    assert_eq!(tour.current_index(), Some(0));
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("95px"));

    tour.advance().unwrap();
    tour.prev().unwrap();
    assert_eq!(tour.current_index(), Some(0));
}

#[test]
fn test_retreat_before_start_is_rejected() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target")]);
    assert!(matches!(tour.retreat(), Err(Error::InvalidStateTransition(_))));
    assert_eq!(tour.phase(), Phase::Idle);
}

#[test]
fn test_terminate_is_idempotent() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target")]);
    tour.terminate();
    assert_eq!(tour.phase(), Phase::Done);

    tour.advance().unwrap();
    tour.terminate();
    let html = tour.surface().to_html();
    tour.terminate();
    assert_eq!(tour.surface().to_html(), html);
    assert!(tour.handles().is_empty());
}

#[test]
fn test_step_overrides_apply_mid_queue() {
    let mut tour = tour();
    tour.enqueue(vec![
        Step::new("#target").with_panel(PANEL),
        Step::new("#second").with_panel(PANEL).with_config(
            ConfigOverride::new()
                .with_padding(10.0)
                .with_panel_position(PanelPosition::Bottom),
        ),
    ])
    .advance()
    .unwrap();
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("95px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "height").as_deref(), Some("50px"));
    assert_eq!(style_of(&tour, ".smartour-slot_top", "top").as_deref(), Some("65px"));

    tour.advance().unwrap();
    // overlay (390, 290, 120, 80); panel sits right under it
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("390px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "left").as_deref(), Some("290px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "width").as_deref(), Some("120px"));
    assert_eq!(style_of(&tour, ".smartour-mask", "height").as_deref(), Some("80px"));
    assert_eq!(style_of(&tour, ".smartour-slot_bottom", "top").as_deref(), Some("470px"));
    assert_eq!(style_of(&tour, ".smartour-slot_bottom", "left").as_deref(), Some("290px"));
    assert_eq!(tour.effective_config().map(|c| c.padding), Some(10.0));

    tour.advance().unwrap();
    assert_eq!(tour.phase(), Phase::Done);
    assert_eq!(tour.current_index(), None);
}

#[test]
fn test_enqueue_restarts() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target"), Step::new("#second")]);
    tour.advance().unwrap();
    tour.advance().unwrap();

    tour.enqueue(vec![Step::new("#third")]).next().unwrap();
    assert_eq!(tour.current_index(), Some(0));
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("895px"));
}

#[test]
fn test_empty_panel_removes_previous_panel() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target").with_panel(PANEL), Step::new("#second")]);
    tour.advance().unwrap();
    assert!(tour.handles().panel.is_some());

    tour.advance().unwrap();
    assert!(tour.handles().panel.is_none());
    assert!(tour.surface().query_selector(".smartour-slot").unwrap().is_none());
    assert!(tour.surface().region(RegionKind::Mask).is_some());
}

#[test]
fn test_missing_target_creates_nothing() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#nowhere")]);

    assert_eq!(tour.advance(), Err(Error::TargetNotFound("#nowhere".to_string())));
    assert_eq!(tour.current_index(), None);
    assert_eq!(tour.surface().to_html(), Document::parse(PAGE).to_html());
}

#[test]
fn test_failed_render_restores_reused_regions() {
    let mut tour = tour();
    tour.enqueue(vec![
        navigable("#target"),
        Step::new("#second")
            .with_panel(r#"<p style="width: 50px; height: 10px">B</p>"#)
            .with_key_binding(".absent", ClickHandler::advance())
            .with_config(ConfigOverride::new().with_prefix("other").with_animate(false)),
    ]);
    tour.advance().unwrap();
    let before = tour.surface().to_html();
    let handles = *tour.handles();

    assert_eq!(tour.advance(), Err(Error::TargetNotFound(".absent".to_string())));
    assert_eq!(tour.current_index(), Some(0));
    assert_eq!(*tour.handles(), handles);
    assert_eq!(tour.surface().to_html(), before);
    assert!(tour.surface().query_selector(".other-mask").unwrap().is_none());

    // The first step's buttons still work.
    assert_eq!(tour.click(&ClickTarget::selector(".prev")).unwrap(), 1);
    assert_eq!(tour.current_index(), Some(0));
    assert_eq!(tour.surface().to_html(), before);
}

#[test]
fn test_failed_render_keeps_panel_of_previous_step() {
    let mut tour = tour();
    tour.enqueue(vec![
        navigable("#target"),
        Step::new("#second").with_key_binding(".absent", ClickHandler::advance()),
    ]);
    tour.advance().unwrap();
    let before = tour.surface().to_html();

    assert!(tour.advance().is_err());
    assert!(tour.handles().panel.is_some());
    assert_eq!(tour.surface().to_html(), before);
    assert_eq!(tour.click(&ClickTarget::selector(".prev")).unwrap(), 1);
}

#[test]
fn test_bindings_do_not_reach_the_panel_being_removed() {
    let mut tour = tour();
    tour.enqueue(vec![
        navigable("#target"),
        Step::new("#second").with_key_binding(".next", ClickHandler::advance()),
    ]);
    tour.advance().unwrap();

    assert_eq!(tour.advance(), Err(Error::TargetNotFound(".next".to_string())));
    assert!(tour.handles().panel.is_some());
}

#[test]
fn test_invalid_selector_is_reported() {
    let mut tour = tour();
    let result = tour.focus_single(&Step::new("div["));
    assert!(matches!(result, Err(Error::InvalidSelector { .. })));
}

// ============================================================================
// Clicks
// ============================================================================

#[test]
fn test_panel_buttons_navigate() {
    let mut tour = tour();
    tour.enqueue(vec![navigable("#target"), navigable("#second"), navigable("#third")]);
    tour.advance().unwrap();

    assert_eq!(tour.click(&ClickTarget::selector(".next")).unwrap(), 1);
    assert_eq!(tour.current_index(), Some(1));
    tour.click(&ClickTarget::selector(".next")).unwrap();
    assert_eq!(tour.current_index(), Some(2));
    tour.click(&ClickTarget::selector(".prev")).unwrap();
    assert_eq!(tour.current_index(), Some(1));

    tour.click(&ClickTarget::selector(".next")).unwrap();
    tour.click(&ClickTarget::selector(".next")).unwrap();
    assert_eq!(tour.phase(), Phase::Done);
}

#[test]
fn test_layer_click_dismisses_by_default() {
    let mut tour = tour();
    tour.enqueue(vec![Step::new("#target"), Step::new("#second")]);
    tour.advance().unwrap();

    assert_eq!(tour.click_region(RegionKind::Layer).unwrap(), 1);
    assert_eq!(tour.phase(), Phase::Done);
    assert_eq!(tour.click_region(RegionKind::Layer), Err(Error::StaleRegion));
}

#[test]
fn test_custom_dismiss_handler() {
    let mut tour = Tour::new(
        ConfigOverride::new().with_on_dismiss(ClickHandler::advance()),
        Document::parse(PAGE),
    );
    tour.enqueue(vec![Step::new("#target"), Step::new("#second")]);
    tour.advance().unwrap();

    tour.click_region(RegionKind::Layer).unwrap();
    assert_eq!(tour.current_index(), Some(1));
    assert_eq!(tour.phase(), Phase::Active);
}

#[test]
fn test_key_binding_only_lives_for_its_step() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let record = |name: &'static str| {
        let log = Rc::clone(&log);
        ClickHandler::new(move |_| {
            log.borrow_mut().push(name);
            Ok(())
        })
    };

    let mut tour = tour();
    tour.enqueue(vec![
        Step::new("#target").with_key_binding(".link", record("first")),
        Step::new("#second"),
    ]);
    tour.advance().unwrap();
    tour.click(&ClickTarget::selector(".link")).unwrap();
    tour.advance().unwrap();
    tour.click(&ClickTarget::selector(".link")).unwrap();

    assert_eq!(*log.borrow(), vec!["first"]);
}

#[test]
fn test_click_bubbles_to_ancestor_bindings() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let record = |name: &'static str| {
        let log = Rc::clone(&log);
        ClickHandler::new(move |_| {
            log.borrow_mut().push(name);
            Ok(())
        })
    };

    let mut tour = tour();
    tour.focus_single(
        &Step::new("#target")
            .with_key_binding("#second", record("section"))
            .with_key_binding(".link", record("link")),
    )
    .unwrap();

    assert_eq!(tour.click(&ClickTarget::selector(".link")).unwrap(), 2);
    assert_eq!(*log.borrow(), vec!["link", "section"]);
}

#[test]
fn test_key_binding_to_missing_element_fails_render() {
    let mut tour = tour();
    let result = tour.focus_single(
        &Step::new("#target").with_key_binding(".absent", ClickHandler::advance()),
    );

    assert_eq!(result, Err(Error::TargetNotFound(".absent".to_string())));
    assert!(tour.handles().is_empty());
    assert_eq!(tour.surface().listener_count(), 0);
    assert!(tour.surface().query_selector(".smartour-mask").unwrap().is_none());
}

#[test]
fn test_focus_single_from_handler() {
    let mut tour = tour();
    let jump = ClickHandler::new(|tour| tour.focus_single(&Step::new("#third")));
    tour.focus_single(&Step::new("#target").with_key_binding(".link", jump))
        .unwrap();

    tour.click(&ClickTarget::selector(".link")).unwrap();
    assert_eq!(style_of(&tour, ".smartour-mask", "top").as_deref(), Some("895px"));
}
