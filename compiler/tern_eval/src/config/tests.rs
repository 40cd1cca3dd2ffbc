use super::*;

#[test]
fn test_defaults() {
    let config = EvalConfig::new();
    assert!(!config.is_boolean_mode());
    assert!(!config.is_return_decimal());
    assert_eq!(config.rounding_mode(), RoundingMode::HalfDown);
    assert_eq!(config.cache(), CacheMode::Local(DEFAULT_CACHE_CAPACITY));
}

#[test]
fn test_builder_chain() {
    let config = EvalConfig::new()
        .boolean_mode(true)
        .return_decimal(true)
        .rounding(RoundingMode::Floor)
        .cache_mode(CacheMode::Shared);
    assert!(config.is_boolean_mode());
    assert!(config.is_return_decimal());
    assert_eq!(config.rounding_mode(), RoundingMode::Floor);
    assert_eq!(config.cache(), CacheMode::Shared);
}

#[test]
fn test_rounding_names() {
    assert_eq!(rounding_from_name("half-down"), Some(RoundingMode::HalfDown));
    assert_eq!(rounding_from_name("HALF_EVEN"), Some(RoundingMode::HalfEven));
    assert_eq!(rounding_from_name("ceiling"), Some(RoundingMode::Ceiling));
    assert_eq!(rounding_from_name("sideways"), None);
}
