use super::*;
use crate::config::ChartConfig;

const OPTS: TransitionOpts = TransitionOpts {
    duration_ms: 100,
    ease: Ease::Linear,
};

fn rec(country: &str, continent: Continent, income: f64, life_exp: f64) -> CountryRecord {
    CountryRecord {
        country: country.to_owned(),
        continent,
        income,
        life_exp,
        population: 1_000_000,
    }
}

fn enc() -> Encodings {
    Encodings::from_config(&ChartConfig::default()).unwrap()
}

fn keys(scene: &Scene) -> Vec<&str> {
    scene.marks().iter().map(|m| m.key()).collect()
}

#[test]
fn enter_update_exit() {
    let enc = enc();
    let mut scene = Scene::new();
    let a = rec("A", Continent::Europe, 1000.0, 50.0);
    let b = rec("B", Continent::Asia, 2000.0, 60.0);
    let c = rec("C", Continent::Africa, 500.0, 40.0);

    let stats = scene.reconcile(&[&a, &b], &enc, Millis(0), OPTS);
    assert_eq!(
        stats,
        ReconcileStats {
            entered: 2,
            updated: 0,
            exited: 0
        }
    );
    assert_eq!(keys(&scene), vec!["A", "B"]);

    let stats = scene.reconcile(&[&c, &b], &enc, Millis(100), OPTS);
    assert_eq!(
        stats,
        ReconcileStats {
            entered: 1,
            updated: 1,
            exited: 1
        }
    );
    // Survivors keep their paint position; entering marks are appended.
    assert_eq!(keys(&scene), vec!["B", "C"]);
}

#[test]
fn entering_marks_grow_from_origin_with_fixed_fill() {
    let enc = enc();
    let mut scene = Scene::new();
    let a = rec("A", Continent::Americas, 1000.0, 50.0);
    scene.reconcile(&[&a], &enc, Millis(0), OPTS);

    let mark = scene.get("A").unwrap();
    assert_eq!(mark.attrs_at(Millis(0)), MarkAttrs::default());
    assert_eq!(mark.fill(), enc.color(Continent::Americas));
    assert!(mark.tooltip().contains("Country: A"));

    let end = mark.attrs_at(Millis(100));
    assert_eq!(end.cx, enc.x().map(1000.0));
    assert_eq!(end.cy, enc.y().map(50.0));
    assert_eq!(end.r, enc.radius(1_000_000));
    assert!(scene.is_animating(Millis(50)));
    assert!(!scene.is_animating(Millis(100)));
}

#[test]
fn interrupted_transition_restarts_from_current_position() {
    let enc = enc();
    let mut scene = Scene::new();
    let first = rec("A", Continent::Europe, 1000.0, 50.0);
    scene.reconcile(&[&first], &enc, Millis(0), OPTS);
    let midway = scene.get("A").unwrap().attrs_at(Millis(50));

    let moved = rec("A", Continent::Europe, 4000.0, 70.0);
    scene.reconcile(&[&moved], &enc, Millis(50), OPTS);
    let mark = scene.get("A").unwrap();

    assert_eq!(mark.attrs_at(Millis(50)), midway);
    assert_eq!(mark.target().cx, enc.x().map(4000.0));
    assert_eq!(mark.attrs_at(Millis(150)), mark.target());
}

#[test]
fn tooltip_follows_latest_datum() {
    let enc = enc();
    let mut scene = Scene::new();
    scene.reconcile(
        &[&rec("A", Continent::Europe, 1000.0, 50.0)],
        &enc,
        Millis(0),
        OPTS,
    );
    scene.reconcile(
        &[&rec("A", Continent::Europe, 1000.0, 61.0)],
        &enc,
        Millis(100),
        OPTS,
    );
    assert!(scene.get("A").unwrap().tooltip().contains("61.00"));
}

#[test]
fn empty_join_clears_scene() {
    let enc = enc();
    let mut scene = Scene::new();
    scene.reconcile(
        &[&rec("A", Continent::Europe, 1000.0, 50.0)],
        &enc,
        Millis(0),
        OPTS,
    );
    let stats = scene.reconcile(&[], &enc, Millis(10), OPTS);
    assert_eq!(stats.exited, 1);
    assert!(scene.is_empty());
    assert!(scene.sample(Millis(10)).is_empty());
}

#[test]
fn hit_test_prefers_topmost_settled_mark() {
    let enc = enc();
    let mut scene = Scene::new();
    let a = rec("A", Continent::Europe, 1000.0, 50.0);
    let b = rec("B", Continent::Asia, 1000.0, 50.0);
    scene.reconcile(&[&a, &b], &enc, Millis(0), OPTS);

    let target = scene.get("A").unwrap().target();
    let centre = Point::new(target.cx, target.cy);
    assert_eq!(scene.hit_test(centre, Millis(100)).unwrap().key(), "B");

    let far = Point::new(target.cx + target.r + 1.0, target.cy);
    assert!(scene.hit_test(far, Millis(100)).is_none());
    // Entering marks start with zero radius.
    assert!(scene.hit_test(centre, Millis(0)).is_none());
}
