use kgrav::{Canvas, FrameExporter, FrameRecorder, FrameSnapshot, ParticleView, Rgba, NVec2};
use kgrav::{ScenarioConfig, Scenario, ExportConfig, run_headless};

use tempfile::TempDir;

const BG: Rgba = Rgba::opaque(219, 213, 181);

pub fn snapshot_with(frame: u64, dots: &[(f64, f64, f64, Rgba)]) -> FrameSnapshot {
    FrameSnapshot {
        frame,
        bounds: NVec2::new(100.0, 100.0),
        particles: dots
            .iter()
            .map(|&(x, y, r, color)| ParticleView { position: NVec2::new(x, y), visual_radius: r, color })
            .collect(),
    }
}

pub fn exporter_into(dir: &TempDir, every: u64) -> FrameExporter {
    FrameExporter::from_config(&ExportConfig {
        enabled: true,
        every,
        output_dir: dir.path().to_string_lossy().into_owned(),
        prefix: "image".to_string(),
    })
}

// ==================================================================================
// Canvas tests
// ==================================================================================

#[test]
fn new_canvas_is_background() {
    let canvas = Canvas::new(10, 5, BG);
    assert_eq!((canvas.width(), canvas.height()), (10, 5));
    assert_eq!(canvas.pixel(9, 4), BG);
}

#[test]
fn opaque_circle_fills_inside_only() {
    let mut canvas = Canvas::new(100, 100, BG);
    canvas.fill_circle(NVec2::new(50.0, 50.0), 10.0, Rgba::BLACK);

    assert_eq!(canvas.pixel(50, 50), Rgba::BLACK);
    assert_eq!(canvas.pixel(50, 41), Rgba::BLACK);
    assert_eq!(canvas.pixel(50, 38), BG);
    assert_eq!(canvas.pixel(0, 0), BG);
}

#[test]
fn translucent_circle_blends_over_background() {
    let mut canvas = Canvas::new(20, 20, Rgba::WHITE);
    canvas.fill_circle(NVec2::new(10.0, 10.0), 5.0, Rgba::new(255, 0, 0, 128));

    let px = canvas.pixel(10, 10);
    assert_eq!(px.r, 255);
    assert!((126..=128).contains(&px.g), "got {:?}", px);
    assert_eq!(px.a, 255);
}

#[test]
fn circles_off_canvas_are_clipped() {
    let mut canvas = Canvas::new(20, 20, BG);
    canvas.fill_circle(NVec2::new(-3.0, 10.0), 5.0, Rgba::BLACK);
    canvas.fill_circle(NVec2::new(500.0, 500.0), 5.0, Rgba::BLACK);
    canvas.fill_circle(NVec2::new(f64::NAN, 1.0), 5.0, Rgba::BLACK);

    assert_eq!(canvas.pixel(0, 10), Rgba::BLACK);
    assert_eq!(canvas.pixel(5, 10), BG);
}

#[test]
fn frames_accumulate() {
    let mut canvas = Canvas::new(100, 100, BG);
    canvas.paint(&snapshot_with(1, &[(20.0, 20.0, 5.0, Rgba::BLACK)]));
    canvas.paint(&snapshot_with(2, &[(80.0, 80.0, 5.0, Rgba::WHITE)]));

    assert_eq!(canvas.pixel(20, 20), Rgba::BLACK);
    assert_eq!(canvas.pixel(80, 80), Rgba::WHITE);
    assert_eq!(canvas.pixel(50, 50), BG);
}

// ==================================================================================
// Export tests
// ==================================================================================

#[test]
fn export_is_due_every_interval() {
    let dir = TempDir::new().unwrap();
    let exporter = exporter_into(&dir, 100);

    assert!(!exporter.is_due(0));
    assert!(!exporter.is_due(99));
    assert!(exporter.is_due(100));
    assert!(!exporter.is_due(150));
    assert!(exporter.is_due(200));
}

#[test]
fn export_writes_a_png_of_the_canvas() {
    let dir = TempDir::new().unwrap();
    let exporter = exporter_into(&dir, 1);
    let mut canvas = Canvas::new(32, 16, BG);
    canvas.fill_circle(NVec2::new(8.0, 8.0), 4.0, Rgba::BLACK);

    let path = exporter.export(7, &canvas).unwrap();
    assert_eq!(path, dir.path().join("image_000007.png"));

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (32, 16));
    assert_eq!(back.get_pixel(8, 8).0, [0, 0, 0, 255]);
}

#[test]
fn export_failure_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();
    let exporter = exporter_into(&dir, 1).with_output_dir(blocker.join("frames"));
    let canvas = Canvas::new(4, 4, BG);

    assert!(exporter.export(1, &canvas).is_err());
    assert_eq!(exporter.maybe_export(1, &canvas), None);
}

#[test]
fn recorder_exports_only_due_frames() {
    let dir = TempDir::new().unwrap();
    let mut recorder = FrameRecorder::new(Canvas::new(100, 100, BG), exporter_into(&dir, 2));

    assert_eq!(recorder.record(&snapshot_with(1, &[(10.0, 10.0, 3.0, Rgba::BLACK)])), None);
    assert!(recorder.record(&snapshot_with(2, &[(90.0, 90.0, 3.0, Rgba::BLACK)])).is_some());
    assert_eq!(recorder.exported.len(), 1);
    assert!(dir.path().join("image_000002.png").exists());
}

// ==================================================================================
// Headless run tests
// ==================================================================================

#[test]
fn headless_run_steps_and_exports() {
    let dir = TempDir::new().unwrap();
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.particle_count = 10;
    cfg.world.dpi = 10.0;
    cfg.export.every = 2;
    cfg.export.output_dir = dir.path().to_string_lossy().into_owned();

    let mut scenario = Scenario::build_scenario(&cfg).unwrap();
    let mut recorder = FrameRecorder::from_config(&cfg).unwrap();
    assert_eq!((recorder.canvas.width(), recorder.canvas.height()), (117, 83));

    let summary = run_headless(&mut scenario, &mut recorder, 5);
    assert_eq!(summary.frames, 5);
    assert_eq!(summary.exported, 2);
    assert_eq!(summary.halted, None);
    assert!(dir.path().join("image_000004.png").exists());
}

#[test]
fn headless_run_stops_at_halt() {
    let dir = TempDir::new().unwrap();
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.particle_count = 6;
    cfg.world.dpi = 10.0;
    cfg.engine.stop_distance = Some(1.0e12);
    cfg.export.output_dir = dir.path().to_string_lossy().into_owned();

    let mut scenario = Scenario::build_scenario(&cfg).unwrap();
    let mut recorder = FrameRecorder::from_config(&cfg).unwrap();

    let summary = run_headless(&mut scenario, &mut recorder, 50);
    assert_eq!(summary.frames, 1);
    assert!(summary.halted.is_some());
}
