//! Multi-column sort specification and the header-click transition
//!
//! A `SortSpec` is a bounded, ordered list of (field, ascending) pairs kept
//! as two parallel vectors. Index 0 is the primary key; later indices break
//! ties in order. Every operation returns a new value; callers own storage.

use serde::{Deserialize, Serialize};

/// Upper bound on simultaneously active sort fields.
pub const MAX_SORTS: usize = 3;

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Ordered multi-column sort state: `fields[i]` sorts with `orders[i]`
/// (`true` = ascending). Lengths always match and never exceed `MAX_SORTS`;
/// fields are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub fields: Vec<String>,
    pub orders: Vec<bool>,
}

/// One (field, direction) entry used for explicit construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub field: String,
    pub direction: SortDirection,
}

/// A sort entry together with its 1-based rank in the spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntryRanked {
    pub field: String,
    pub direction: SortDirection,
    pub priority: usize,
}

/// Per-field lookup result for rendering header indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortInfo {
    pub active: bool,
    pub direction: Option<SortDirection>,
    /// 1-based rank within the spec, 0 when inactive.
    pub priority: usize,
}

impl SortSpec {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty_sort(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn is_multi_field_sort(&self) -> bool {
        self.fields.len() > 1
    }
}

/// Compute the next spec after a click on `field` (e.g. a column header).
///
/// Four cases, checked against where `field` currently sits:
/// 1. absent: prepend ascending, truncate to `MAX_SORTS` (oldest key drops)
/// 2. secondary: move to front, direction unchanged
/// 3. primary ascending: toggle to descending
/// 4. primary descending: remove; the next field (if any) becomes primary
pub fn handle_field_click(current: &SortSpec, field: &str) -> SortSpec {
    match current.fields.iter().position(|f| f == field) {
        None => {
            let mut fields = Vec::with_capacity(MAX_SORTS);
            let mut orders = Vec::with_capacity(MAX_SORTS);
            fields.push(field.to_string());
            orders.push(true);
            for (f, o) in current.fields.iter().zip(&current.orders) {
                if fields.len() == MAX_SORTS {
                    break;
                }
                fields.push(f.clone());
                orders.push(*o);
            }
            SortSpec { fields, orders }
        }
        Some(0) if current.orders[0] => {
            let mut next = current.clone();
            next.orders[0] = false;
            next
        }
        Some(0) => {
            let mut next = current.clone();
            next.fields.remove(0);
            next.orders.remove(0);
            next
        }
        Some(idx) => {
            let mut next = current.clone();
            let f = next.fields.remove(idx);
            let o = next.orders.remove(idx);
            next.fields.insert(0, f);
            next.orders.insert(0, o);
            next
        }
    }
}

/// Look up how `field` participates in `spec`. Absent fields yield the
/// inactive triple; no error conditions.
pub fn sort_info(spec: &SortSpec, field: &str) -> SortInfo {
    match spec.fields.iter().position(|f| f == field) {
        Some(idx) => SortInfo {
            active: true,
            direction: Some(SortDirection::from_ascending(spec.orders[idx])),
            priority: idx + 1,
        },
        None => SortInfo {
            active: false,
            direction: None,
            priority: 0,
        },
    }
}

/// Project the spec into ranked entries, primary first.
pub fn all_sort_fields(spec: &SortSpec) -> Vec<SortEntryRanked> {
    spec.fields
        .iter()
        .zip(&spec.orders)
        .enumerate()
        .map(|(idx, (field, &asc))| SortEntryRanked {
            field: field.clone(),
            direction: SortDirection::from_ascending(asc),
            priority: idx + 1,
        })
        .collect()
}

/// Build a spec directly from entries. No de-duplication or length
/// enforcement happens here; the click transition is the normalizing path.
pub fn multi_field(entries: &[SortEntry]) -> SortSpec {
    SortSpec {
        fields: entries.iter().map(|e| e.field.clone()).collect(),
        orders: entries.iter().map(|e| e.direction.is_ascending()).collect(),
    }
}

pub fn single_field(field: &str, direction: SortDirection) -> SortSpec {
    multi_field(&[SortEntry {
        field: field.to_string(),
        direction,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(fields: &[&str], orders: &[bool]) -> SortSpec {
        SortSpec {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            orders: orders.to_vec(),
        }
    }

    fn assert_well_formed(s: &SortSpec) {
        assert_eq!(s.fields.len(), s.orders.len());
        assert!(s.fields.len() <= MAX_SORTS);
        for (i, f) in s.fields.iter().enumerate() {
            assert!(!s.fields[i + 1..].contains(f), "duplicate field {f}");
        }
    }

    #[test]
    fn test_new_field_on_empty() {
        let next = handle_field_click(&SortSpec::empty(), "number");
        assert_eq!(next, spec(&["number"], &[true]));
    }

    #[test]
    fn test_new_field_truncates_at_max() {
        let cur = spec(&["a", "b", "c"], &[true, false, true]);
        let next = handle_field_click(&cur, "d");
        assert_eq!(next, spec(&["d", "a", "b"], &[true, true, false]));
        assert_well_formed(&next);
    }

    #[test]
    fn test_promotion_preserves_direction() {
        let cur = spec(&["a", "b", "c"], &[true, false, true]);
        let next = handle_field_click(&cur, "b");
        assert_eq!(next, spec(&["b", "a", "c"], &[false, true, true]));
    }

    #[test]
    fn test_promote_last_field() {
        let cur = spec(&["a", "b", "c"], &[true, false, true]);
        let next = handle_field_click(&cur, "c");
        assert_eq!(next, spec(&["c", "a", "b"], &[true, true, false]));
    }

    #[test]
    fn test_primary_toggle() {
        let cur = spec(&["a"], &[true]);
        let next = handle_field_click(&cur, "a");
        assert_eq!(next, spec(&["a"], &[false]));
    }

    #[test]
    fn test_primary_toggle_keeps_secondaries() {
        let cur = spec(&["a", "b"], &[true, false]);
        let next = handle_field_click(&cur, "a");
        assert_eq!(next, spec(&["a", "b"], &[false, false]));
    }

    #[test]
    fn test_primary_removal() {
        let cur = spec(&["a", "b"], &[false, true]);
        let next = handle_field_click(&cur, "a");
        assert_eq!(next, spec(&["b"], &[true]));
    }

    #[test]
    fn test_primary_removal_to_empty() {
        let cur = spec(&["a"], &[false]);
        let next = handle_field_click(&cur, "a");
        assert!(next.is_empty_sort());
    }

    #[test]
    fn test_full_cycle_on_one_field() {
        // ascending -> descending -> removed -> re-added ascending
        let s1 = handle_field_click(&SortSpec::empty(), "gas");
        assert_eq!(s1.orders, vec![true]);
        let s2 = handle_field_click(&s1, "gas");
        assert_eq!(s2.orders, vec![false]);
        let s3 = handle_field_click(&s2, "gas");
        assert!(s3.is_empty_sort());
        let s4 = handle_field_click(&s3, "gas");
        assert_eq!(s4, s1);
    }

    #[test]
    fn test_invariants_under_random_click_sequences() {
        let fields = ["a", "b", "c", "d", "e"];
        let mut cur = SortSpec::empty();
        // deterministic pseudo-random walk over 200 clicks
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..200 {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let pick = (state >> 33) as usize % fields.len();
            cur = handle_field_click(&cur, fields[pick]);
            assert!(cur.fields.len() == cur.orders.len());
            assert!(cur.fields.len() <= MAX_SORTS);
            for (i, f) in cur.fields.iter().enumerate() {
                assert!(!cur.fields[i + 1..].contains(f));
            }
        }
    }

    #[test]
    fn test_sort_info_active_and_inactive() {
        let s = spec(&["a", "b"], &[true, false]);
        assert_eq!(
            sort_info(&s, "a"),
            SortInfo {
                active: true,
                direction: Some(SortDirection::Asc),
                priority: 1
            }
        );
        assert_eq!(
            sort_info(&s, "b"),
            SortInfo {
                active: true,
                direction: Some(SortDirection::Desc),
                priority: 2
            }
        );
        assert_eq!(
            sort_info(&s, "z"),
            SortInfo {
                active: false,
                direction: None,
                priority: 0
            }
        );
    }

    #[test]
    fn test_all_sort_fields_projection() {
        let s = spec(&["a", "b"], &[false, true]);
        assert_eq!(
            all_sort_fields(&s),
            vec![
                SortEntryRanked {
                    field: "a".to_string(),
                    direction: SortDirection::Desc,
                    priority: 1,
                },
                SortEntryRanked {
                    field: "b".to_string(),
                    direction: SortDirection::Asc,
                    priority: 2,
                },
            ]
        );
        assert!(all_sort_fields(&SortSpec::empty()).is_empty());
    }

    #[test]
    fn test_round_trip_through_entries() {
        let s = handle_field_click(&spec(&["a", "b", "c"], &[true, false, true]), "d");
        let entries: Vec<SortEntry> = all_sort_fields(&s)
            .into_iter()
            .map(|ranked| SortEntry {
                field: ranked.field,
                direction: ranked.direction,
            })
            .collect();
        assert_eq!(multi_field(&entries), s);
    }

    #[test]
    fn test_multi_field_does_not_normalize() {
        // caller contract: no dedup, no truncation
        let entries: Vec<SortEntry> = ["a", "b", "c", "d"]
            .iter()
            .map(|f| SortEntry {
                field: f.to_string(),
                direction: SortDirection::Asc,
            })
            .collect();
        let s = multi_field(&entries);
        assert_eq!(s.fields.len(), 4);
    }

    #[test]
    fn test_single_field_helper() {
        assert_eq!(
            single_field("value", SortDirection::Desc),
            spec(&["value"], &[false])
        );
    }

    #[test]
    fn test_empty_predicates() {
        let empty = SortSpec::empty();
        assert!(empty.is_empty_sort());
        assert!(!empty.is_multi_field_sort());
        let one = single_field("a", SortDirection::Asc);
        assert!(!one.is_empty_sort());
        assert!(!one.is_multi_field_sort());
        let two = spec(&["a", "b"], &[true, true]);
        assert!(two.is_multi_field_sort());
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let s = spec(&["value", "number"], &[false, true]);
        let json = serde_json::to_string(&s).unwrap();
        let back: SortSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
