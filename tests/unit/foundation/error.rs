use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TickdownError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(
        TickdownError::render(Profile::Still, "boom").to_string(),
        "render error (still): boom"
    );
    assert_eq!(
        TickdownError::encode(Profile::Animated, "bad").to_string(),
        "encode error (animated): bad"
    );
}

#[test]
fn collaborator_errors_carry_profile() {
    assert_eq!(
        TickdownError::render(Profile::Animated, "x").profile(),
        Some(Profile::Animated)
    );
    assert_eq!(
        TickdownError::encode(Profile::Still, "x").profile(),
        Some(Profile::Still)
    );
    assert_eq!(TickdownError::validation("x").profile(), None);
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TickdownError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
