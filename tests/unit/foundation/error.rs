use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GapminderError::load("x")
            .to_string()
            .contains("load error:")
    );
    assert!(
        GapminderError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GapminderError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        GapminderError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        GapminderError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = GapminderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
