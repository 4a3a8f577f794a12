use serde::Serialize;
use crate::cache::CacheWay;

/// Why a lookup missed
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissClassification {
    Compulsory,
    Conflict,
    Capacity,
}

/// Classifies a miss on `tag` against the ways of its set.
///
/// Must be called before the miss is installed, as installing overwrites the tags this relies
/// on. The rules are evaluated in order and the first match wins:
///
/// 1. Compulsory: no way, valid or not, stores `tag`. Evicted tags linger in their way until the
///    next install there, so this approximates "never seen by this set". Every way starts out
///    tagged 0, so a first access with tag 0 is not compulsory.
/// 2. Conflict: some valid way holds a different tag.
/// 3. Capacity: everything else, which only happens when the set holds no valid ways.
pub fn classify(ways: &[CacheWay], tag: u64) -> MissClassification {
    if !ways.iter().any(|way| way.tag == tag) {
        MissClassification::Compulsory
    } else if ways.iter().any(|way| way.valid && way.tag != tag) {
        MissClassification::Conflict
    } else {
        MissClassification::Capacity
    }
}
