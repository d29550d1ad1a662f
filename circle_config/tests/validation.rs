use circle_config::load_toml;
use rstest::rstest;

const VALID: &str = r#"
[session]
min_radius = 25.0
position_change_delay_ms = 40
tick_interval_ms = 5
not_circle_band = [0.95, 1.05]
quadrant_boundary = "half-open"

[surface]
center_x = 400.0
center_y = 300.0
scale = 1.0

[logging]
level = "debug"
rotation = "daily"
"#;

#[test]
fn accepts_full_valid_config() {
    let cfg = load_toml(VALID).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.surface.center_x, 400.0);
    assert_eq!(cfg.session.not_circle_band, (0.95, 1.05));
    assert_eq!(cfg.logging.rotation.as_deref(), Some("daily"));
}

#[rstest]
#[case("[session]\nmin_radius = 0.0\n", "min_radius must be > 0")]
#[case("[session]\nmin_radius = -3.0\n", "min_radius must be > 0")]
#[case("[session]\nposition_change_delay_ms = 0\n", "position_change_delay_ms must be >= 1")]
#[case(
    "[session]\nposition_change_delay_ms = 120000\n",
    "position_change_delay_ms is unreasonably large"
)]
#[case("[session]\ntick_interval_ms = 0\n", "tick_interval_ms must be >= 1")]
#[case(
    "[session]\ntick_interval_ms = 50\nposition_change_delay_ms = 40\n",
    "must not exceed position_change_delay_ms"
)]
#[case("[session]\nnot_circle_band = [1.05, 0.95]\n", "not_circle_band")]
#[case("[session]\nnot_circle_band = [-0.1, 1.0]\n", "not_circle_band")]
#[case("[surface]\nscale = 0.0\n", "surface.scale must be > 0")]
#[case("[logging]\nrotation = \"weekly\"\n", "logging.rotation")]
fn rejects_invalid_fields(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    let msg = format!("{err}");
    assert!(msg.contains(needle), "expected {needle:?} in {msg:?}");
}

#[test]
fn unknown_boundary_is_a_parse_error() {
    let err = load_toml("[session]\nquadrant_boundary = \"diagonal\"\n").expect_err("bad enum");
    assert!(err.to_string().contains("quadrant_boundary") || err.to_string().contains("variant"));
}
