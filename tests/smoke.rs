//! Basic smoke test to verify the public API surface.

#[test]
fn crate_compiles() {
    // If this test runs, the crate skeleton is valid.
    let _ = std::any::type_name::<itchwarden::ItchConfig>();
    let _ = std::any::type_name::<itchwarden::ItchError>();
    let _ = std::any::type_name::<itchwarden::ItchClient>();
}

#[test]
fn default_config_targets_itch_io() {
    let config = itchwarden::ItchConfig::default();
    assert_eq!(config.api_base, "https://itch.io/api/1");
    assert!(config.validate().is_ok());
}
