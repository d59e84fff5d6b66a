use super::{ConfigError, SampleConfig, Target};
use crate::ffi::bindings as b;

#[test]
fn construction_is_deterministic() {
    let lhs = SampleConfig::new(0x3c, 0x0f, 1000).unwrap();
    let rhs = SampleConfig::new(0x3c, 0x0f, 1000).unwrap();
    assert_eq!(lhs, rhs);
    assert_eq!(lhs.as_attr(), rhs.as_attr());
}

#[test]
fn attr_encodes_event_and_unit_mask() {
    let cfg = SampleConfig::new(0xd1, 0x20, 4000).unwrap();
    let attr = cfg.as_attr();

    assert_eq!(attr.kind, b::PERF_TYPE_RAW);
    assert_eq!(attr.config, 0x20d1);
    assert_eq!(attr.sample_period_or_freq, 4000);
    assert_eq!(attr.sample_type, b::PERF_SAMPLE_TID | b::PERF_SAMPLE_READ);

    assert_ne!(attr.flags & b::PERF_ATTR_FLAG_FREQ, 0);
    assert_ne!(attr.flags & b::PERF_ATTR_FLAG_EXCLUDE_HV, 0);
    // Kernel and user samples stay included.
    assert_eq!(attr.flags & b::PERF_ATTR_FLAG_EXCLUDE_KERNEL, 0);
    assert_eq!(attr.flags & b::PERF_ATTR_FLAG_EXCLUDE_USER, 0);
}

#[test]
fn boundary_values_accepted() {
    assert!(SampleConfig::new(0xFFF, 0xFF, 1).is_ok());
    assert!(SampleConfig::new(0, 0, 1_000_000_000).is_ok());
}

#[test]
fn out_of_range_rejected() {
    assert!(matches!(
        SampleConfig::new(0x1000, 0, 1000),
        Err(ConfigError::EventCode(0x1000))
    ));
    assert!(matches!(
        SampleConfig::new(0, 0x100, 1000),
        Err(ConfigError::UnitMask(0x100))
    ));
    assert!(matches!(
        SampleConfig::new(0, 0, 0),
        Err(ConfigError::Frequency(0))
    ));
    assert!(matches!(
        SampleConfig::new(0, 0, 1_000_000_001),
        Err(ConfigError::Frequency(_))
    ));
}

#[test]
fn attach_keeps_pid() {
    assert_eq!(Target::attach(42).pid(), 42);
}

#[test]
fn spawn_reports_child_pid() {
    let target = Target::spawn("true", &[] as &[&str]).unwrap();
    assert!(target.pid() > 0);
}

#[test]
fn spawn_missing_program_fails() {
    assert!(Target::spawn("event-count-no-such-program", &[] as &[&str]).is_err());
}
