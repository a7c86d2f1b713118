use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::services::calendar::SLOT_MINUTES;

const KEY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A resolved (start, end) pair for one selected slot.
///
/// Serialized as the canonical "startISO|endISO" key for set membership,
/// but equality is defined on the instants themselves so that formatting
/// drift can never split one slot into two distinct keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SelectionEntry {
    pub fn for_slot(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + Duration::minutes(SLOT_MINUTES),
        }
    }

    pub fn key(&self) -> String {
        format!(
            "{}|{}",
            self.start.format(KEY_FORMAT),
            self.end.format(KEY_FORMAT)
        )
    }

    pub fn parse_key(key: &str) -> anyhow::Result<Self> {
        let (start, end) = key
            .split_once('|')
            .ok_or_else(|| anyhow::anyhow!("selection key missing '|' separator: {key}"))?;
        let start = NaiveDateTime::parse_from_str(start, KEY_FORMAT)
            .map_err(|e| anyhow::anyhow!("invalid start in selection key {key}: {e}"))?;
        let end = NaiveDateTime::parse_from_str(end, KEY_FORMAT)
            .map_err(|e| anyhow::anyhow!("invalid end in selection key {key}: {e}"))?;
        if end <= start {
            return Err(anyhow::anyhow!("selection key end not after start: {key}"));
        }
        Ok(Self { start, end })
    }
}

impl PartialEq for SelectionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl Eq for SelectionEntry {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_key_round_trip() {
        let entry = SelectionEntry::for_slot(dt("2025-06-16 09:30"));
        let key = entry.key();
        assert_eq!(key, "2025-06-16T09:30:00|2025-06-16T10:00:00");
        assert_eq!(SelectionEntry::parse_key(&key).unwrap(), entry);
    }

    #[test]
    fn test_parse_key_missing_separator() {
        assert!(SelectionEntry::parse_key("2025-06-16T09:30:00").is_err());
    }

    #[test]
    fn test_parse_key_end_before_start() {
        assert!(
            SelectionEntry::parse_key("2025-06-16T10:00:00|2025-06-16T09:30:00").is_err()
        );
    }

    #[test]
    fn test_equality_on_instants() {
        let a = SelectionEntry::for_slot(dt("2025-06-16 09:00"));
        let b = SelectionEntry::for_slot(dt("2025-06-16 09:00"));
        let c = SelectionEntry::for_slot(dt("2025-06-16 09:30"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
