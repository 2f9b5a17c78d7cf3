//! Unit tests for the symbol resolution cache

use marketlens::services::symbol_cache::SymbolCache;
use std::time::Duration;

#[test]
fn test_miss_then_hit() {
    let cache = SymbolCache::new(8, Duration::from_secs(60));
    assert!(cache.is_empty());
    assert_eq!(cache.get("AAPL"), None);

    cache.insert("AAPL".to_string(), "AAPL".to_string());
    assert_eq!(cache.get("AAPL"), Some("AAPL".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_reinsert_overwrites() {
    let cache = SymbolCache::new(8, Duration::from_secs(60));
    cache.insert("gold".to_string(), "GLD".to_string());
    cache.insert("gold".to_string(), "XAU/USD".to_string());
    assert_eq!(cache.get("gold"), Some("XAU/USD".to_string()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_expired_entry_is_a_miss() {
    let cache = SymbolCache::new(8, Duration::ZERO);
    cache.insert("AAPL".to_string(), "AAPL".to_string());
    assert_eq!(cache.get("AAPL"), None);
}

#[test]
fn test_capacity_is_bounded() {
    let cache = SymbolCache::new(2, Duration::from_secs(60));
    cache.insert("a".to_string(), "A".to_string());
    cache.insert("b".to_string(), "B".to_string());
    cache.insert("c".to_string(), "C".to_string());
    assert_eq!(cache.len(), 2);
    // the newest entry always survives
    assert_eq!(cache.get("c"), Some("C".to_string()));
}

#[test]
fn test_eviction_prefers_expired_entries() {
    let cache = SymbolCache::new(1, Duration::ZERO);
    cache.insert("a".to_string(), "A".to_string());
    cache.insert("b".to_string(), "B".to_string());
    assert_eq!(cache.len(), 1);
}
