use super::*;
use crate::foundation::core::FIRST_YEAR;

fn load(json: &str) -> Dataset {
    from_json_str(json, FIRST_YEAR).unwrap()
}

#[test]
fn keeps_only_records_with_income_and_life_expectancy() {
    let ds = load(
        r#"[
            { "countries": [
                { "country": "A", "continent": "europe", "income": 1000, "life_exp": 50, "population": 1000000 },
                { "country": "B", "continent": "asia", "income": 800, "population": 5 },
                { "country": "C", "continent": "asia", "income": null, "life_exp": 40, "population": 5 },
                { "country": "D", "continent": "africa", "income": 0, "life_exp": 40, "population": 5 },
                { "country": "E", "continent": "africa", "income": "", "life_exp": 40, "population": 5 },
                { "country": "F", "continent": "americas", "income": "900.5", "life_exp": "61.25", "population": "7" }
            ] }
        ]"#,
    );

    let snap = ds.snapshot(YearIndex(0)).unwrap();
    let keys: Vec<&str> = snap.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(keys, vec!["A", "F"]);

    let f = snap.get("F").unwrap();
    assert_eq!(f.income, 900.5);
    assert_eq!(f.life_exp, 61.25);
    assert_eq!(f.population, 7);
    assert_eq!(f.continent, Continent::Americas);

    let stats = ds.stats();
    assert_eq!(stats.retained, 2);
    assert_eq!(stats.dropped_incomplete, 4);
}

#[test]
fn presence_is_decided_per_year() {
    let ds = load(
        r#"[
            { "countries": [ { "country": "A", "continent": "europe", "income": 1, "life_exp": null } ] },
            { "countries": [ { "country": "A", "continent": "europe", "income": 1, "life_exp": 30 } ] }
        ]"#,
    );
    assert_eq!(ds.len(), 2);
    assert!(ds.snapshot(YearIndex(0)).unwrap().is_empty());
    assert_eq!(ds.snapshot(YearIndex(1)).unwrap().len(), 1);
    assert_eq!(ds.last_index(), YearIndex(1));
    assert_eq!(ds.calendar_year(YearIndex(1)), 1801);
}

#[test]
fn non_numeric_strings_are_treated_as_missing() {
    let ds = load(
        r#"[ { "countries": [
            { "country": "A", "continent": "asia", "income": "n/a", "life_exp": 30 }
        ] } ]"#,
    );
    assert!(ds.snapshot(YearIndex(0)).unwrap().is_empty());
}

#[test]
fn missing_population_is_kept_as_zero() {
    let ds = load(
        r#"[ { "countries": [
            { "country": "A", "continent": "asia", "income": 400, "life_exp": 30, "population": null },
            { "country": "B", "continent": "asia", "income": 400, "life_exp": 30, "population": 1234.6 }
        ] } ]"#,
    );
    let snap = ds.snapshot(YearIndex(0)).unwrap();
    assert_eq!(snap.get("A").unwrap().population, 0);
    assert_eq!(snap.get("B").unwrap().population, 1235);
}

#[test]
fn extra_fields_are_ignored_and_duplicates_dropped() {
    let ds = load(
        r#"[ { "year": "1800", "countries": [
            { "country": "A", "continent": "Asia", "income": 400, "life_exp": 30, "country_code": "AAA" },
            { "country": "A", "continent": "asia", "income": 500, "life_exp": 31 }
        ] } ]"#,
    );
    let snap = ds.snapshot(YearIndex(0)).unwrap();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap.get("A").unwrap().income, 400.0);
    assert_eq!(ds.stats().dropped_duplicate, 1);
}

#[test]
fn malformed_documents_fail_to_load() {
    for bad in [
        "",
        "{}",
        "[]",
        r#"[ { "nations": [] } ]"#,
        r#"[ { "countries": [ { "country": "A", "continent": "atlantis", "income": 1, "life_exp": 1 } ] } ]"#,
        r#"[ { "countries": [ { "country": "A", "income": 1, "life_exp": 1 } ] } ]"#,
    ] {
        let err = from_json_str(bad, FIRST_YEAR).unwrap_err();
        assert!(
            matches!(err, GapminderError::Load(_)),
            "expected load error for {bad:?}, got {err:?}"
        );
    }
}

#[test]
fn unknown_continent_on_dropped_record_is_ignored() {
    let ds = load(
        r#"[ { "countries": [
            { "country": "A", "continent": "atlantis", "income": null, "life_exp": 1 }
        ] } ]"#,
    );
    assert!(ds.snapshot(YearIndex(0)).unwrap().is_empty());
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_path(Path::new("does/not/exist.json"), FIRST_YEAR).unwrap_err();
    assert!(err.to_string().contains("load error:"));
}
