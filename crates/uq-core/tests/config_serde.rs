//! Config and quantity (de)serialization. The dev-dependency on this crate
//! turns the `serde` feature on for every test build.

use uq_core::{PropagationConfig, Propagator, UncertainQuantity, UqError, ZeroValuePolicy};

#[test]
fn config_from_yaml_fills_defaults() {
    let yaml = "zero_value: reject\nrequire_finite: true\n";
    let cfg: PropagationConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(cfg.zero_value, ZeroValuePolicy::Reject);
    assert!(cfg.require_finite);
    assert!(cfg.allow_negative_uncertainty);

    let p = Propagator::new(cfg);
    let err = p.div(UncertainQuantity::new(1.0, 0.1), 0.0).unwrap_err();
    assert_eq!(err, UqError::DivisionByZero { what: "divisor" });
}

#[test]
fn empty_config_is_permissive() {
    let cfg: PropagationConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, PropagationConfig::permissive());
}

#[test]
fn quantity_json_roundtrip() {
    let q = UncertainQuantity::new(44.8, 0.2);
    let json = serde_json::to_string(&q).unwrap();
    assert!(json.contains("\"absolute_uncertainty\""));

    let back: UncertainQuantity = serde_json::from_str(&json).unwrap();
    assert_eq!(back, q);
}
