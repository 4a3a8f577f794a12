use pretty_assertions::assert_eq;
use rstest::rstest;
use crate::cache::{Cache, CacheWay, Lookup};
use crate::error::InvariantViolation;

#[rstest]
#[case(16, 0, (0, 0))]
#[case(16, 15, (15, 0))]
#[case(16, 16, (0, 1))]
#[case(16, 37, (5, 2))]
#[case(3, 10, (1, 3))]
#[case(1, 42, (0, 42))]
fn decompose_splits_set_and_tag(#[case] num_sets: u64, #[case] address: u64, #[case] expected: (usize, u64)) {
    let cache = Cache::new(num_sets, 2);
    assert_eq!(cache.decompose(address), expected);
}

#[test]
fn new_cache_is_all_invalid() {
    let cache = Cache::new(8, 4);
    assert_eq!(cache.sets().len(), 8);
    for (index, set) in cache.sets().iter().enumerate() {
        assert_eq!(set.set_id(), index);
        assert_eq!(set.ways(), &[CacheWay::default(); 4]);
    }
    assert_eq!(cache.valid_line_count(), 0);
    assert_eq!(cache.invalid_line_count(), 32);
}

#[test]
fn install_then_lookup_hits_the_same_way() {
    let mut cache = Cache::new(4, 4);
    let (set, tag) = cache.decompose(22);
    cache.install(set, 2, tag, 7);
    assert_eq!(cache.lookup(set, tag), Lookup::Hit(2));
    assert_eq!(
        cache.set(set).ways()[2],
        CacheWay {
            tag,
            valid: true,
            dirty: false,
            last_accessed: 7,
            access_count: 1,
            frequency: 1,
        }
    );
}

#[test]
fn lookup_ignores_invalid_ways_with_matching_tag() {
    // Every way starts tagged 0, but none are valid
    let cache = Cache::new(2, 2);
    assert_eq!(cache.lookup(0, 0), Lookup::Miss);
}

#[test]
fn lookup_returns_first_match_in_way_order() {
    let mut cache = Cache::new(1, 4);
    cache.install(0, 3, 9, 0);
    cache.install(0, 1, 9, 1);
    assert_eq!(cache.lookup(0, 9), Lookup::Hit(1));
}

#[test]
fn record_hit_updates_metadata() {
    let mut cache = Cache::new(1, 2);
    cache.install(0, 0, 5, 1);
    cache.record_hit(0, 0, 4);
    cache.record_hit(0, 0, 9);
    let way = cache.set(0).ways()[0];
    assert_eq!(way.last_accessed, 9);
    assert_eq!(way.access_count, 3);
    assert_eq!(way.frequency, 3);
    assert_eq!(way.tag, 5);
}

#[test]
fn install_resets_counters_of_previous_line() {
    let mut cache = Cache::new(1, 1);
    cache.install(0, 0, 5, 0);
    cache.record_hit(0, 0, 1);
    cache.install(0, 0, 6, 2);
    let way = cache.set(0).ways()[0];
    assert_eq!((way.tag, way.access_count, way.frequency, way.last_accessed), (6, 1, 1, 2));
}

#[test]
fn first_free_way_scans_in_order() {
    let mut cache = Cache::new(1, 3);
    assert_eq!(cache.first_free_way(0), Some(0));
    cache.install(0, 0, 1, 0);
    assert_eq!(cache.first_free_way(0), Some(1));
    cache.install(0, 2, 2, 1);
    assert_eq!(cache.first_free_way(0), Some(1));
    cache.install(0, 1, 3, 2);
    assert_eq!(cache.first_free_way(0), None);
    assert_eq!(cache.valid_line_count(), 3);
}

#[test]
fn duplicate_valid_tags_violate_the_invariant() {
    let mut cache = Cache::new(2, 4);
    cache.install(1, 0, 3, 0);
    cache.install(1, 2, 4, 1);
    assert_eq!(cache.check_invariant(), Ok(()));

    cache.install(1, 3, 3, 2);
    assert_eq!(
        cache.check_set_invariant(1),
        Err(InvariantViolation {
            set: 1,
            tag: 3,
            first_way: 0,
            second_way: 3,
        })
    );
    assert!(cache.check_invariant().is_err());
    assert_eq!(cache.check_set_invariant(0), Ok(()));
}
