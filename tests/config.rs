use pinecone_lib::model::config::AutomataConfig;
use pinecone_lib::model::state::{Boundary, ResetPattern};
use pinecone_lib::model::AutomataError;

const SAMPLE: &str = r#"
[margolus]
grid_size = 64
num_scales = 144
reverse_mode = true

[quad_core]
grid_size = 40
fault_injection_rate = 0.05
seed = 42
boundary = "Toroidal"
initial_pattern = "Glider"
"#;

#[test]
fn test_full_file_builds_engines() {
    let config = AutomataConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.quad_core.boundary, Boundary::Toroidal);
    assert_eq!(config.quad_core.initial_pattern, ResetPattern::Glider);

    let margolus = config.build_margolus().unwrap();
    assert_eq!(margolus.size(), 64);
    assert_eq!(margolus.num_scales(), 144);
    assert!(margolus.reverse_mode());

    let quad = config.build_quad_core().unwrap();
    assert_eq!(quad.size(), 40);
    assert_eq!(quad.boundary(), Boundary::Toroidal);
    assert!((quad.stats().fault_injection_rate_pct - 5.0).abs() < 1e-9);
    assert_eq!(quad.core(0).unwrap().population(), 5);
}

#[test]
fn test_empty_file_is_default() {
    assert_eq!(
        AutomataConfig::from_toml_str("").unwrap(),
        AutomataConfig::default()
    );
}

#[test]
fn test_unknown_pattern_is_parse_error() {
    let err = AutomataConfig::from_toml_str("[quad_core]\ninitial_pattern = \"Spaceship\"\n")
        .unwrap_err();
    assert!(matches!(err, AutomataError::ConfigParse(_)));
    assert!(err.is_configuration());
}

#[test]
fn test_load_from_disk() {
    let path = std::env::temp_dir().join(format!("pinecone-config-{}.toml", std::process::id()));
    std::fs::write(&path, SAMPLE).unwrap();
    let loaded = AutomataConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap().margolus.grid_size, 64);
}
