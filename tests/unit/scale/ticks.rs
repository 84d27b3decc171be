use super::*;

#[test]
fn life_expectancy_axis_uses_steps_of_twenty() {
    assert_eq!(ticks(0.0, 90.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
}

#[test]
fn default_count_on_unit_interval() {
    let t = ticks(0.0, 1.0, 10);
    assert_eq!(t.len(), 11);
    assert_eq!(t[0], 0.0);
    assert_eq!(t[3], 0.3);
    assert_eq!(t[10], 1.0);
}

#[test]
fn reversed_domain_yields_reversed_ticks() {
    assert_eq!(ticks(90.0, 0.0, 5), vec![80.0, 60.0, 40.0, 20.0, 0.0]);
}

#[test]
fn degenerate_inputs() {
    assert!(ticks(0.0, 10.0, 0).is_empty());
    assert_eq!(ticks(3.0, 3.0, 5), vec![3.0]);
    assert!(ticks(f64::NAN, 1.0, 5).is_empty());
}

#[test]
fn plain_format_drops_trailing_zeros() {
    assert_eq!(format_plain(400.0), "400");
    assert_eq!(format_plain(40_000.0), "40000");
    assert_eq!(format_plain(2.5), "2.5");
}
