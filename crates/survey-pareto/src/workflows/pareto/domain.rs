use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One spreadsheet row: column label to raw answer, in column order.
///
/// Inserting a label that is already present overwrites the answer but keeps
/// the original column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyRecord {
    entries: Vec<(String, String)>,
}

impl SurveyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, answer: impl Into<String>) {
        let label = label.into();
        let answer = answer.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, value)) => *value = answer,
            None => self.entries.push((label, answer)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, answer)| answer.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, answer)| (label.as_str(), answer.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SurveyRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = SurveyRecord::new();
        for (label, answer) in iter {
            record.insert(label, answer);
        }
        record
    }
}

impl Serialize for SurveyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, answer) in &self.entries {
            map.serialize_entry(label, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SurveyRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SurveyRecordVisitor)
    }
}

struct SurveyRecordVisitor;

impl<'de> Visitor<'de> for SurveyRecordVisitor {
    type Value = SurveyRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of column labels to answer strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = SurveyRecord::new();
        while let Some((label, answer)) = access.next_entry::<String, String>()? {
            record.insert(label, answer);
        }
        Ok(record)
    }
}

/// Pareto bucket assigned to a driver within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverClassification {
    Vital,
    Review,
    Maintain,
}

impl DriverClassification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vital => "Vital",
            Self::Review => "Review",
            Self::Maintain => "Maintain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A single question/answer pair's contribution to its row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParetoDriver {
    pub question: String,
    pub answer: String,
    pub impact: f64,
    pub share: f64,
    pub cumulative_share: f64,
    pub classification: DriverClassification,
}
