use super::*;
use crate::render::transition::MarkAttrs;

fn sample(key: &str, cx: f64) -> MarkSample {
    MarkSample {
        key: key.to_owned(),
        attrs: MarkAttrs {
            cx,
            cy: 20.0,
            r: 5.5,
        },
        fill: Rgba8::rgb(0xfb, 0xb4, 0xae),
        tooltip: format!("Country: {key}"),
    }
}

fn document(marks: &[MarkSample]) -> String {
    let cfg = ChartConfig::default();
    let enc = Encodings::from_config(&cfg).unwrap();
    build_document(&FrameView {
        config: &cfg,
        encodings: &enc,
        time_label: "1800",
        marks,
    })
}

#[test]
fn document_has_canvas_labels_axes_and_legend() {
    let doc = document(&[]);
    assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1000\" height=\"600\""));
    assert!(doc.contains("translate(100, 10)"));
    assert!(doc.contains(">GDP Per Capita ($)</text>"));
    assert!(doc.contains(">Life Expectancy (Years)</text>"));
    assert!(doc.contains(">1800</text>"));
    for label in [">400<", ">4000<", ">40000<", ">0<", ">80<"] {
        assert!(doc.contains(label), "missing tick {label}");
    }
    for name in ["Europe", "Asia", "Americas", "Africa"] {
        assert!(doc.contains(&format!(">{name}</text>")));
    }
    assert!(!doc.contains("<circle"));
    assert!(doc.ends_with("</svg>"));
}

#[test]
fn one_circle_per_mark_in_paint_order() {
    let doc = document(&[sample("B", 10.0), sample("A", 30.25)]);
    assert_eq!(doc.matches("<circle").count(), 2);
    let b = doc.find("Country: B").unwrap();
    let a = doc.find("Country: A").unwrap();
    assert!(b < a);
    assert!(doc.contains("cx=\"30.25\" cy=\"20\" r=\"5.5\" fill=\"#fbb4ae\""));
}

#[test]
fn non_finite_marks_are_skipped_and_text_is_escaped() {
    let mut bad = sample("Nowhere", f64::NAN);
    bad.tooltip = "x".to_owned();
    let mut amp = sample("Trinidad & Tobago", 1.0);
    amp.tooltip = "Country: Trinidad & Tobago <T&T>".to_owned();
    let doc = document(&[bad, amp]);
    assert_eq!(doc.matches("<circle").count(), 1);
    assert!(doc.contains("Trinidad &amp; Tobago &lt;T&amp;T&gt;"));
}

#[test]
fn escape_covers_quotes() {
    assert_eq!(escape_xml(r#"Côte d'Ivoire "CI""#), "Côte d&apos;Ivoire &quot;CI&quot;");
}
