use pretty_assertions::assert_eq;
use rstest::rstest;
use crate::config::{AccessPatternConfig, ReplacementPolicyConfig, SimulationConfig};
use crate::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = SimulationConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!((config.loop_size, config.hot_data_percentage), (32, 20));
    assert_eq!((config.total_steps, config.snapshot_interval), (100, 10));
    assert_eq!((config.hit_latency, config.miss_latency), (1, 100));
}

#[rstest]
#[case(SimulationConfig { num_sets: 0, ..SimulationConfig::default() }, ConfigError::ZeroSets)]
#[case(SimulationConfig { associativity: 0, ..SimulationConfig::default() }, ConfigError::ZeroAssociativity)]
#[case(SimulationConfig { total_steps: 0, ..SimulationConfig::default() }, ConfigError::ZeroTotalSteps)]
#[case(SimulationConfig { snapshot_interval: 0, ..SimulationConfig::default() }, ConfigError::ZeroSnapshotInterval)]
#[case(SimulationConfig { loop_size: 0, ..SimulationConfig::default() }, ConfigError::ZeroLoopSize)]
#[case(SimulationConfig { hot_data_percentage: 101, ..SimulationConfig::default() }, ConfigError::HotPercentageOutOfRange(101))]
fn invalid_configs_are_rejected(#[case] config: SimulationConfig, #[case] expected: ConfigError) {
    assert_eq!(config.validate(), Err(expected));
}

#[test]
fn hot_percentage_bounds_are_inclusive() {
    for hot_data_percentage in [0, 100] {
        let config = SimulationConfig { hot_data_percentage, ..SimulationConfig::default() };
        assert_eq!(config.validate(), Ok(()));
    }
}

#[test]
fn parses_short_names() {
    let config: SimulationConfig = serde_json::from_str(
        r#"{
            "num_sets": 64,
            "associativity": 8,
            "replacement_policy": "mru",
            "access_pattern": "hotCold",
            "hot_data_percentage": 70,
            "seed": 9
        }"#,
    )
    .unwrap();
    assert_eq!(
        config,
        SimulationConfig {
            num_sets: 64,
            associativity: 8,
            replacement_policy: ReplacementPolicyConfig::MostRecentlyUsed,
            access_pattern: AccessPatternConfig::HotCold,
            hot_data_percentage: 70,
            seed: 9,
            ..SimulationConfig::default()
        }
    );
}

#[rstest]
#[case("lru", ReplacementPolicyConfig::LeastRecentlyUsed)]
#[case("fifo", ReplacementPolicyConfig::FirstInFirstOut)]
#[case("random", ReplacementPolicyConfig::Random)]
#[case("lfu", ReplacementPolicyConfig::LeastFrequentlyUsed)]
#[case("mru", ReplacementPolicyConfig::MostRecentlyUsed)]
#[case("LeastFrequentlyUsed", ReplacementPolicyConfig::LeastFrequentlyUsed)]
fn parses_every_policy(#[case] name: &str, #[case] expected: ReplacementPolicyConfig) {
    let policy: ReplacementPolicyConfig = serde_json::from_str(&format!("\"{name}\"")).unwrap();
    assert_eq!(policy, expected);
}

#[rstest]
#[case("sequential", AccessPatternConfig::Sequential)]
#[case("random", AccessPatternConfig::Random)]
#[case("loop", AccessPatternConfig::Loop)]
#[case("hotCold", AccessPatternConfig::HotCold)]
#[case("hot_cold", AccessPatternConfig::HotCold)]
fn parses_every_pattern(#[case] name: &str, #[case] expected: AccessPatternConfig) {
    let pattern: AccessPatternConfig = serde_json::from_str(&format!("\"{name}\"")).unwrap();
    assert_eq!(pattern, expected);
}

#[test]
fn negative_values_do_not_parse() {
    let result = serde_json::from_str::<SimulationConfig>(r#"{ "num_sets": -4 }"#);
    assert!(result.is_err());
}

#[test]
fn unknown_policy_does_not_parse() {
    let result = serde_json::from_str::<SimulationConfig>(r#"{ "replacement_policy": "plru" }"#);
    assert!(result.is_err());
}
