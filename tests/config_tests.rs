use image::Rgba;
use loteria_display::config::Configuration;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn empty_document_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.cards_dir, PathBuf::from("cards"));
    assert_eq!((cfg.window.width, cfg.window.height), (900, 600));
    assert_eq!(cfg.window.title, "Lotería Display");
    assert!(!cfg.window.start_fullscreen);
    assert_eq!(cfg.frame_rate, 60);
    assert_eq!(cfg.padding, 40);
    assert_eq!(cfg.shuffle_seed, None);
    assert_eq!(cfg.colors.background_rgba().unwrap(), Rgba([18, 18, 18, 255]));
    assert_eq!(cfg.colors.text_rgba().unwrap(), Rgba([230, 230, 230, 255]));
    assert_eq!(cfg.font.family, "Arial");
    assert!((cfg.font.size - 20.0).abs() < f32::EPSILON);
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r##"
cards-dir: "/srv/loteria/cards"
window:
  width: 1280
  height: 720
  start-fullscreen: true
frame-rate: 30
padding: 16
shuffle-seed: 7
colors:
  background: "#000000"
  text: "#ffcc00"
font:
  family: "DejaVu Sans"
  size: 28
"##;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.cards_dir, PathBuf::from("/srv/loteria/cards"));
    assert_eq!((cfg.window.width, cfg.window.height), (1280, 720));
    assert_eq!(cfg.window.title, "Lotería Display");
    assert!(cfg.window.start_fullscreen);
    assert_eq!(cfg.frame_rate, 30);
    assert_eq!(cfg.padding, 16);
    assert_eq!(cfg.shuffle_seed, Some(7));
    assert_eq!(cfg.colors.text_rgba().unwrap(), Rgba([255, 204, 0, 255]));
    assert_eq!(cfg.font.family, "DejaVu Sans");
}

#[test]
fn unknown_keys_are_rejected() {
    let yaml = r#"
cards-folder: "cards"
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());

    let nested = r#"
window:
  depth: 3
"#;
    assert!(serde_yaml::from_str::<Configuration>(nested).is_err());
}

#[test]
fn validation_rejects_bad_values() {
    for yaml in [
        "frame-rate: 0",
        "frame-rate: 1000",
        "window: { width: 0 }",
        "font: { size: 0 }",
        "colors: { background: \"not-a-colour\" }",
        "colors: { text: \"#12\" }",
    ] {
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.validated().is_err(), "accepted invalid config: {yaml}");
    }
}

#[test]
fn loads_from_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("loteria.yaml");
    fs::write(&path, "padding: 0\nshuffle-seed: 99\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap().validated().unwrap();
    assert_eq!(cfg.padding, 0);
    assert_eq!(cfg.shuffle_seed, Some(99));
}

#[test]
fn missing_file_is_an_error() {
    let tmp = tempdir().unwrap();
    assert!(Configuration::from_yaml_file(tmp.path().join("absent.yaml")).is_err());
}
