#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not. A config that
    // validates must also build a session.
    if let Ok(cfg) = circle_config::load_toml(data)
        && cfg.validate().is_ok()
    {
        let session = circle_core::SessionCfg::from(&cfg.session);
        let center = circle_core::conversions::surface_center(&cfg.surface);
        let built = circle_core::CircleSession::builder()
            .with_config(session)
            .with_center(center)
            .build();
        assert!(built.is_ok(), "validated config failed to build: {built:?}");
    }
});
