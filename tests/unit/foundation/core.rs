use super::*;

#[test]
fn year_index_maps_to_calendar_year() {
    assert_eq!(YearIndex(0).calendar_year(FIRST_YEAR), 1800);
    assert_eq!(YearIndex(214).calendar_year(FIRST_YEAR), 2014);
    assert_eq!(YearIndex::from_calendar_year(1950, FIRST_YEAR), YearIndex(150));
    assert_eq!(YearIndex::from_calendar_year(1700, FIRST_YEAR), YearIndex(0));
}

#[test]
fn default_canvas_and_margins_leave_800_by_490_plot() {
    let plot = Canvas::default().plot_area(Margins::default()).unwrap();
    assert_eq!(plot.width, 800.0);
    assert_eq!(plot.height, 490.0);
}

#[test]
fn oversized_margins_are_rejected() {
    let canvas = Canvas {
        width: 100,
        height: 100,
    };
    let margins = Margins {
        top: 10,
        bottom: 10,
        left: 60,
        right: 40,
    };
    assert!(canvas.plot_area(margins).is_err());
}

#[test]
fn fps_frame_times_are_whole_milliseconds() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frame_to_millis(0), Millis(0));
    assert_eq!(fps.frame_to_millis(3), Millis(300));
    assert_eq!(fps.frames_for_millis(1000), 10);
    assert_eq!(fps.frames_for_millis(1001), 11);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert_eq!(ntsc.frame_to_millis(30), Millis(1001));
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn hex_colours_parse_and_serialize() {
    let c = Rgba8::from_hex("#FBB4AE").unwrap();
    assert_eq!(c, Rgba8::rgb(0xfb, 0xb4, 0xae));
    assert_eq!(c.to_hex_rgb(), "#fbb4ae");

    let c: Rgba8 = serde_json::from_str("\"00000080\"").unwrap();
    assert_eq!(c.a, 0x80);
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#00000080\"");

    assert!(Rgba8::from_hex("#abc").is_err());
    assert!(Rgba8::from_hex("#gg0000").is_err());
}

#[test]
fn millis_since_saturates() {
    assert_eq!(Millis(250).since(Millis(100)), 150);
    assert_eq!(Millis(100).since(Millis(250)), 0);
    assert_eq!(Millis(u64::MAX).saturating_add(5), Millis(u64::MAX));
}
