//! The JSON document served to dashboards.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_visits: u64,
    pub monthly_visits: u64,
    #[serde(default)]
    pub top_pages: Vec<TopPage>,
    #[serde(default)]
    pub devices: CountMap,
    #[serde(default)]
    pub browsers: CountMap,
    #[serde(default)]
    pub daily_visits: Vec<DailyVisits>,
    #[serde(default)]
    pub monthly_trend: Vec<PeriodVisits>,
    #[serde(with = "iso_millis")]
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPage {
    pub path: String,
    pub title: String,
    pub visits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVisits {
    /// `YYYY-MM-DD`
    pub date: String,
    pub visits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodVisits {
    /// Localized "Mon YYYY" label
    pub period: String,
    pub visits: u64,
}

/// Name → count mapping that serializes as a JSON object in insertion
/// order, so upstream ranking survives the trip to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountMap(IndexMap<String, u64>);

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserting an existing key overwrites its count in place.
    pub fn insert(&mut self, key: impl Into<String>, count: u64) {
        self.0.insert(key.into(), count);
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.values().copied()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// RFC 3339 in UTC with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use super::*;

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn count_map_keeps_insertion_order_in_json() {
        let map: CountMap = [("Chrome", 50), ("Safari", 30), ("Edge", 40)]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"Chrome":50,"Safari":30,"Edge":40}"#
        );

        let back: CountMap = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn count_map_overwrites_duplicate_keys_in_place() {
        let mut map = CountMap::new();
        map.insert("mobile", 1);
        map.insert("desktop", 2);
        map.insert("mobile", 7);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("mobile"), Some(7));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["mobile", "desktop"]);
    }

    #[test]
    fn report_uses_camel_case_and_millisecond_timestamps() {
        let report = AnalyticsReport {
            total_visits: 10,
            monthly_visits: 2,
            top_pages: vec![],
            devices: CountMap::new(),
            browsers: CountMap::new(),
            daily_visits: vec![],
            monthly_trend: vec![],
            last_update: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "totalVisits": 10,
                "monthlyVisits": 2,
                "topPages": [],
                "devices": {},
                "browsers": {},
                "dailyVisits": [],
                "monthlyTrend": [],
                "lastUpdate": "2025-01-02T03:04:05.000Z"
            })
        );

        let parsed: AnalyticsReport = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, report);
    }
}
