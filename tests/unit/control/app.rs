use super::*;
use crate::data::loader::from_json_str;
use crate::data::model::Continent;
use crate::foundation::core::FIRST_YEAR;

/// Three years; country "A" is present every year, "B" only from 1801, "C" (asia) in 1802.
const FIXTURE: &str = r#"[
    { "countries": [
        { "country": "A", "continent": "europe", "income": 1000, "life_exp": 50, "population": 1000000 },
        { "country": "B", "continent": "africa", "income": 500, "life_exp": null, "population": 2000000 }
    ] },
    { "countries": [
        { "country": "A", "continent": "europe", "income": 1100, "life_exp": 51, "population": 1000000 },
        { "country": "B", "continent": "africa", "income": 520, "life_exp": 35, "population": 2000000 }
    ] },
    { "countries": [
        { "country": "A", "continent": "europe", "income": 1200, "life_exp": 52, "population": 1000000 },
        { "country": "C", "continent": "asia", "income": 700, "life_exp": 40, "population": 3000000 }
    ] }
]"#;

fn app() -> App {
    let ds = Arc::new(from_json_str(FIXTURE, FIRST_YEAR).unwrap());
    App::new(ds, ChartConfig::default(), Millis(0)).unwrap()
}

#[test]
fn starts_on_first_year_with_all_continents() {
    let app = app();
    assert_eq!(app.year_index(), YearIndex(0));
    assert_eq!(app.continent(), ContinentFilter::All);
    assert_eq!(app.ui().play_label, PlayLabel::Play);
    assert_eq!(app.ui().time_label, "1800");
    assert_eq!(app.ui().slider_year, 1800);
    assert_eq!(app.scene().len(), 1);
    assert!(!app.is_playing());
    assert_eq!(app.renders(), 1);
}

#[test]
fn play_steps_every_tick_and_wraps() {
    let mut app = app();
    app.toggle_play(Millis(0));
    assert_eq!(app.ui().play_label, PlayLabel::Pause);

    assert_eq!(app.advance_to(Millis(99)), 0);
    assert_eq!(app.advance_to(Millis(100)), 1);
    assert_eq!(app.year_index(), YearIndex(1));
    assert_eq!(app.ui().time_label, "1801");
    assert_eq!(app.scene().len(), 2);

    assert_eq!(app.advance_to(Millis(300)), 2);
    assert_eq!(app.year_index(), YearIndex(0));
    assert_eq!(app.ui().slider_year, 1800);
    assert_eq!(app.steps(), 3);
}

#[test]
fn pause_right_after_play_stops_automatic_steps() {
    let mut app = app();
    app.toggle_play(Millis(0));
    app.toggle_play(Millis(10));
    assert_eq!(app.ui().play_label, PlayLabel::Play);
    assert!(!app.is_playing());

    app.advance_to(Millis(10_000));
    assert_eq!(app.steps(), 0);
    assert_eq!(app.year_index(), YearIndex(0));
}

#[test]
fn replaying_never_runs_two_timers() {
    let mut app = app();
    app.toggle_play(Millis(0));
    app.toggle_play(Millis(50));
    app.toggle_play(Millis(60));
    app.play(Millis(70));
    assert_eq!(app.advance_to(Millis(160)), 1);
    assert_eq!(app.steps(), 1);
}

#[test]
fn reset_returns_to_first_year_and_keeps_playing() {
    let mut app = app();
    app.toggle_play(Millis(0));
    app.advance_to(Millis(200));
    assert_eq!(app.year_index(), YearIndex(2));

    app.reset(Millis(250));
    assert_eq!(app.year_index(), YearIndex(0));
    assert_eq!(app.ui().slider_year, 1800);
    assert_eq!(app.ui().time_label, "1800");
    assert!(app.is_playing());

    app.advance_to(Millis(300));
    assert_eq!(app.year_index(), YearIndex(1));
}

#[test]
fn continent_change_keeps_year() {
    let mut app = app();
    app.seek(1802, Millis(0));
    assert_eq!(app.scene().len(), 2);

    app.select_continent(ContinentFilter::Only(Continent::Asia), Millis(10));
    assert_eq!(app.year_index(), YearIndex(2));
    let keys: Vec<&str> = app.scene().marks().iter().map(|m| m.key()).collect();
    assert_eq!(keys, vec!["C"]);
    assert_eq!(app.last_reconcile().exited, 1);
}

#[test]
fn seek_clamps_and_renders_immediately() {
    let mut app = app();
    let before = app.renders();
    app.seek(2014, Millis(5));
    assert_eq!(app.year_index(), YearIndex(2));
    assert_eq!(app.ui().slider_year, 1802);
    assert_eq!(app.renders(), before + 1);
}

#[test]
fn events_dispatch_through_handle() {
    let mut app = app();
    app.handle(&ControlEvent::Play, Millis(0));
    app.handle(&ControlEvent::Play, Millis(1));
    assert!(app.is_playing());
    app.handle(
        &ControlEvent::SelectContinent {
            continent: ContinentFilter::Only(Continent::Africa),
        },
        Millis(100),
    );
    // The tick at 100 fires before the selector changes.
    assert_eq!(app.year_index(), YearIndex(1));
    assert_eq!(app.scene().len(), 1);
    app.handle(&ControlEvent::Pause, Millis(150));
    app.handle(&ControlEvent::Pause, Millis(160));
    assert!(!app.is_playing());
    app.handle(&ControlEvent::Seek { year: 1802 }, Millis(170));
    assert!(app.scene().is_empty());
    app.handle(&ControlEvent::Reset, Millis(180));
    assert_eq!(app.year_index(), YearIndex(0));
}

#[test]
fn time_does_not_run_backwards() {
    let mut app = app();
    app.toggle_play(Millis(500));
    app.advance_to(Millis(100));
    assert_eq!(app.now(), Millis(500));
    assert_eq!(app.steps(), 0);
}

#[test]
fn playback_near_the_end_of_the_clock_terminates() {
    let mut app = app();
    app.toggle_play(Millis(u64::MAX - 50));
    assert_eq!(app.advance_to(Millis(u64::MAX)), 1);
    assert_eq!(app.advance_to(Millis(u64::MAX)), 0);
    assert_eq!(app.steps(), 1);
    assert_eq!(app.year_index(), YearIndex(1));
}

#[test]
fn frame_document_reflects_settled_scene() {
    let mut app = app();
    app.seek(1801, Millis(0));
    let doc = app.frame_document(app.settled_at());
    assert_eq!(doc.matches("<circle").count(), 2);
    assert!(doc.contains(">1801</text>"));
}

#[test]
fn hover_reports_tooltip_in_canvas_coordinates() {
    let app = app();
    let settled = app.settled_at();
    let a = app.scene().get("A").unwrap().target();
    let m = app.config().margins;
    let pointer = Point::new(a.cx + f64::from(m.left), a.cy + f64::from(m.top));

    let text = app.hover(pointer, settled).unwrap();
    assert!(text.starts_with("Country: A\nContinent: Europe\n"));
    assert!(app.hover(Point::new(0.0, 0.0), settled).is_none());
}
