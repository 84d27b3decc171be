use super::*;
use crate::scale::linear::LinearScale;
use crate::scale::ordinal::OrdinalScale;

#[test]
fn log_scale_maps_decades_evenly() {
    let s = LogScale::new(10.0, [10.0, 1000.0], [0.0, 200.0]).unwrap();
    assert!((s.map(100.0) - 100.0).abs() < 1e-9);
    assert!((s.map(1000.0) - 200.0).abs() < 1e-9);
    assert!(s.map(0.0).is_nan());
    assert!(s.map(-5.0).is_nan());
    assert!((s.map(10_000.0) - 300.0).abs() < 1e-9);
}

#[test]
fn log_scale_rejects_non_positive_domain() {
    assert!(LogScale::new(10.0, [0.0, 10.0], [0.0, 1.0]).is_err());
    assert!(LogScale::new(10.0, [5.0, 5.0], [0.0, 1.0]).is_err());
    assert!(LogScale::new(1.0, [1.0, 10.0], [0.0, 1.0]).is_err());
}

#[test]
fn log_scale_places_chart_ticks_between_domain_ends() {
    let s = LogScale::new(10.0, [142.0, 150_000.0], [0.0, 800.0]).unwrap();
    let xs: Vec<f64> = [400.0, 4000.0, 40_000.0].map(|v| s.map(v)).to_vec();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert!((xs[1] - xs[0] - (xs[2] - xs[1])).abs() < 1e-9);
    assert!(xs[0] > 0.0 && xs[2] < 800.0);
}

#[test]
fn linear_scale_maps_and_extrapolates() {
    let s = LinearScale::new([0.0, 90.0], [490.0, 0.0]).unwrap();
    assert_eq!(s.map(0.0), 490.0);
    assert_eq!(s.map(90.0), 0.0);
    assert!(s.map(100.0) < 0.0);
    assert_eq!(s.map(45.0), 245.0);
    assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    assert!(LinearScale::new([1.0, 1.0], [0.0, 1.0]).is_err());
}

#[test]
fn ordinal_scale_assigns_in_order_and_cycles() {
    let s = OrdinalScale::new(vec!['a', 'b'])
        .unwrap()
        .with_domain(["x", "y", "x", "z"]);
    assert_eq!(s.domain(), &["x", "y", "z"]);
    assert_eq!(s.get(&"y"), Some('b'));
    assert_eq!(s.get(&"z"), Some('a'));
    assert_eq!(s.get(&"w"), None);
    assert!(OrdinalScale::<&str, char>::new(vec![]).is_err());
}
