use kgrav::{ScenarioConfig, Scenario, HaltReason, ConfigError, Rgba, ColorConfig, Palette, NVec2};
use kgrav::{StepModeConfig, MeetingPullConfig};

/// Defaults with a smaller population
pub fn small_config(n: usize) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.particle_count = n;
    cfg
}

pub fn build(cfg: &ScenarioConfig) -> Scenario {
    Scenario::build_scenario(cfg).expect("valid scenario")
}

// ==================================================================================
// Config tests
// ==================================================================================

#[test]
fn empty_document_gives_reference_defaults() {
    let cfg: ScenarioConfig = serde_yaml::from_str("{}").unwrap();

    assert_eq!(cfg.parameters.particle_count, 50);
    assert_eq!(cfg.parameters.k, 5);
    assert_eq!(cfg.parameters.g, 0.3);
    assert_eq!(cfg.engine.max_iterations, 2000);
    assert_eq!(cfg.engine.stop_distance, None);
    assert_eq!(cfg.engine.step_mode, StepModeConfig::Sequential);
    assert_eq!(cfg.export.every, 100);
    assert_eq!(cfg.designated.len(), 2);
    assert_eq!(cfg.render.palette.len(), 8);
}

#[test]
fn partial_document_overrides_only_what_it_names() {
    let yaml = r##"
engine:
  step_mode: "phased"
  meeting_pull: "every_iteration"
  stop_distance: 20.0
parameters:
  G: 0.5
  particle_count: 12
render:
  palette: ["#102030", [1, 2, 3, 4]]
"##;
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.engine.step_mode, StepModeConfig::Phased);
    assert_eq!(cfg.engine.meeting_pull, MeetingPullConfig::EveryIteration);
    assert_eq!(cfg.engine.stop_distance, Some(20.0));
    assert_eq!(cfg.parameters.g, 0.5);
    assert_eq!(cfg.parameters.particle_count, 12);
    assert_eq!(cfg.parameters.k, 5);
    assert_eq!(cfg.render.palette, vec![ColorConfig::hex("#102030"), ColorConfig::Components(vec![1, 2, 3, 4])]);
}

#[test]
fn shipped_scenarios_parse_and_build() {
    for name in ["default.yaml", "rendezvous.yaml"] {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name);
        let text = std::fs::read_to_string(&path).unwrap();
        let cfg: ScenarioConfig = serde_yaml::from_str(&text).unwrap();
        assert!(Scenario::build_scenario(&cfg).is_ok(), "{name} did not build");
    }
}

#[test]
fn hex_and_component_colors_normalize_to_rgba() {
    assert_eq!(Rgba::from_hex("#44AF69"), Ok(Rgba::new(68, 175, 105, 255)));
    assert_eq!(Rgba::from_hex("#fff"), Ok(Rgba::WHITE));
    assert_eq!(Rgba::from_hex("00000080"), Ok(Rgba::new(0, 0, 0, 128)));
    assert!(Rgba::from_hex("#12").is_err());
    assert!(Rgba::from_hex("#zzzzzz").is_err());
    assert!(Rgba::from_hex("#+f+f+f").is_err());
    assert!(Rgba::from_hex("+ff").is_err());

    assert_eq!(Rgba::try_from(&ColorConfig::Components(vec![68, 175, 105, 90])), Ok(Rgba::new(68, 175, 105, 90)));
    assert_eq!(Rgba::try_from(&ColorConfig::Components(vec![1, 2, 3])), Ok(Rgba::opaque(1, 2, 3)));
    assert!(Rgba::try_from(&ColorConfig::Components(vec![1, 2])).is_err());
}

#[test]
fn empty_palette_is_rejected() {
    assert_eq!(Palette::new(Vec::new()).unwrap_err(), ConfigError::EmptyPalette);
}

#[test]
fn invalid_configs_are_rejected() {
    let mut cfg = small_config(1);
    assert_eq!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::PopulationTooSmall(1)));

    cfg = small_config(10);
    cfg.parameters.k = 0;
    assert_eq!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::ZeroNeighbors));

    cfg = small_config(10);
    cfg.designated.pop();
    assert_eq!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::DesignatedCount(1)));

    cfg = small_config(10);
    cfg.parameters.mass_bounds = [0.0, 3.0];
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::MassBounds { .. })));

    cfg = small_config(10);
    cfg.parameters.min_distance = 30.0;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::DistanceClamp { .. })));

    cfg = small_config(10);
    cfg.designated[0].mass = 9.0;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::MassOutOfBounds { .. })));

    cfg = small_config(10);
    cfg.render.palette.push(ColorConfig::hex("not a color"));
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::InvalidColor(_))));

    cfg = small_config(10);
    cfg.export.every = 0;
    assert_eq!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::ExportInterval));
}

#[test]
fn non_finite_ranges_are_rejected() {
    let mut cfg = small_config(10);
    cfg.parameters.mass_drift = f64::INFINITY;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::MassDrift(_))));

    cfg = small_config(10);
    cfg.parameters.mass_drift = -0.1;
    assert_eq!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::MassDrift(-0.1)));

    cfg = small_config(10);
    cfg.parameters.mass_drift = f64::MAX;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::MassDrift(_))));

    cfg = small_config(10);
    cfg.world.dpi = 1e308;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::WorldSize { .. })));

    cfg = small_config(10);
    cfg.world.dpi = f64::NAN;
    assert!(matches!(Scenario::build_scenario(&cfg).err(), Some(ConfigError::WorldSize { .. })));

    cfg = small_config(10);
    cfg.parameters.initial_speed = [1.0, f64::INFINITY];
    assert!(matches!(
        Scenario::build_scenario(&cfg).err(),
        Some(ConfigError::NonFiniteRange { field: "initial_speed", .. })
    ));

    cfg = small_config(10);
    cfg.parameters.initial_speed = [-f64::MAX, f64::MAX];
    assert!(matches!(
        Scenario::build_scenario(&cfg).err(),
        Some(ConfigError::NonFiniteRange { field: "initial_speed", .. })
    ));

    cfg = small_config(10);
    cfg.parameters.initial_mass = [f64::NAN, 1.0];
    assert!(matches!(
        Scenario::build_scenario(&cfg).err(),
        Some(ConfigError::NonFiniteRange { field: "initial_mass", .. })
    ));

    // zero drift is a valid way to switch the noise off
    cfg = small_config(10);
    cfg.parameters.mass_drift = 0.0;
    let mut s = build(&cfg);
    assert!(s.advance());
}

// ==================================================================================
// Build tests
// ==================================================================================

#[test]
fn designated_particles_get_their_fixed_start_state() {
    let s = build(&small_config(20));
    let (w, h) = (s.system.bounds.x, s.system.bounds.y);
    let a = &s.system.particles[0];
    let b = &s.system.particles[1];

    assert_eq!(a.x, NVec2::new(0.0, h / 8.0));
    assert_eq!(a.v, NVec2::new(3.0, 5.0));
    assert_eq!(a.m, 3.0);
    assert_eq!(a.color, Rgba::BLACK);
    assert_eq!(b.x, NVec2::new(w, h * 7.0 / 8.0));
    assert_eq!(b.v, NVec2::new(-3.0, -5.0));
    assert_eq!(b.color, Rgba::WHITE);
    assert_eq!((a.mass_bounds.low, a.mass_bounds.high), (2.0, 5.0));
}

#[test]
fn regular_particles_are_randomized_within_ranges() {
    let s = build(&small_config(60));
    let palette = Palette::from_config(&ScenarioConfig::default().render.palette).unwrap();

    for p in &s.system.particles[2..] {
        assert!(0.0 <= p.x.x && p.x.x < s.system.bounds.x);
        assert!(0.0 <= p.x.y && p.x.y < s.system.bounds.y);
        assert!((1.0..=2.0).contains(&p.v.x.abs()) && (1.0..=2.0).contains(&p.v.y.abs()));
        assert!((0.5..=2.0).contains(&p.m));
        assert!(palette.colors().contains(&p.color));
    }
}

#[test]
fn world_is_the_page_at_the_configured_dpi() {
    let s = build(&small_config(5));
    assert!((s.system.bounds.x - 3510.0).abs() < 1e-6);
    assert!((s.system.bounds.y - 2490.0).abs() < 1e-6);
    assert_eq!(s.system.meeting_point.x, NVec2::new(s.system.bounds.x * 0.75, s.system.bounds.y * 0.5));
}

#[test]
fn zero_steps_change_nothing() {
    let cfg = small_config(30);
    let s = build(&cfg);
    let fresh = build(&cfg);

    assert_eq!(s.system.frame, 0);
    assert_eq!(s.system.particles, fresh.system.particles);
    assert_eq!(s.snapshot(), fresh.snapshot());
}

#[test]
fn same_seed_same_run() {
    for mode in [StepModeConfig::Sequential, StepModeConfig::Phased] {
        let mut cfg = small_config(40);
        cfg.engine.step_mode = mode;
        let mut a = build(&cfg);
        let mut b = build(&cfg);
        for _ in 0..50 {
            a.advance();
            b.advance();
        }
        assert_eq!(a.system.particles, b.system.particles);
    }
}

#[test]
fn different_seeds_differ() {
    let mut cfg = small_config(20);
    let a = build(&cfg);
    cfg.parameters.seed += 1;
    let b = build(&cfg);
    assert_ne!(a.system.particles[5].x, b.system.particles[5].x);
}

#[test]
fn long_run_respects_mass_bounds_and_walls() {
    let mut s = build(&small_config(25));
    for _ in 0..200 {
        s.advance();
    }
    assert_eq!(s.system.frame, 200);
    for p in &s.system.particles {
        assert!(p.mass_bounds.contains(p.m));
        assert!(0.0 <= p.x.x && p.x.x <= s.system.bounds.x);
        assert!(0.0 <= p.x.y && p.x.y <= s.system.bounds.y);
    }
}

// ==================================================================================
// Stop rule tests
// ==================================================================================

#[test]
fn runs_past_max_iterations_unless_enforced() {
    let mut cfg = small_config(8);
    cfg.engine.max_iterations = 3;
    let mut s = build(&cfg);
    for _ in 0..10 {
        assert!(s.advance());
    }
    assert_eq!(s.system.frame, 10);

    cfg.engine.enforce_max_iterations = true;
    let mut s = build(&cfg);
    for _ in 0..10 {
        s.advance();
    }
    assert_eq!(s.system.frame, 3);
    assert_eq!(s.halted, Some(HaltReason::IterationBudget { frames: 3 }));
}

#[test]
fn zero_budget_never_steps() {
    let mut cfg = small_config(8);
    cfg.engine.max_iterations = 0;
    cfg.engine.enforce_max_iterations = true;
    let mut s = build(&cfg);
    let before = s.snapshot();

    assert!(!s.advance());
    assert_eq!(s.system.frame, 0);
    assert_eq!(s.halted, Some(HaltReason::IterationBudget { frames: 0 }));
    assert_eq!(s.snapshot(), before);
    assert!(!s.advance());
}

#[test]
fn proximity_stop_halts_and_freezes() {
    let mut cfg = small_config(8);
    cfg.engine.stop_distance = Some(1.0e12);
    let mut s = build(&cfg);

    assert!(s.advance());
    assert!(matches!(s.halted, Some(HaltReason::Proximity { .. })));

    let before = s.system.particles.clone();
    assert!(!s.advance());
    assert_eq!(s.system.frame, 1);
    assert_eq!(s.system.particles, before);
}

#[test]
fn proximity_stop_is_off_by_default() {
    let mut s = build(&small_config(8));
    for _ in 0..20 {
        s.advance();
    }
    assert!(!s.is_halted());
}

// ==================================================================================
// Snapshot tests
// ==================================================================================

#[test]
fn snapshot_mirrors_particles_in_order() {
    let mut s = build(&small_config(10));
    s.advance();
    let snap = s.snapshot();

    assert_eq!(snap.frame, 1);
    assert_eq!(snap.particles.len(), 10);
    for (view, p) in snap.particles.iter().zip(&s.system.particles) {
        assert_eq!(view.position, p.x);
        assert_eq!(view.color, p.color);
        assert!((view.visual_radius - p.m * 10.0).abs() < 1e-12);
    }
}
