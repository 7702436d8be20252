use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StrataError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(StrataError::text("x").to_string().contains("text error:"));
    assert!(StrataError::render("x").to_string().contains("render error:"));
    assert!(
        StrataError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StrataError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: StrataError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, StrataError::Serde(_)));
}
