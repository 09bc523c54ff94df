use serde::{Deserialize, Deserializer, Serialize};

/// A worker assignable to an op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub ops_completed: u32,
    #[serde(default)]
    pub reliability: f64,
    #[serde(default)]
    pub endorsements: Vec<String>,
}

impl Operator {
    /// `"First Last"`, the form searched by the projection.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `"Last First"`, the form sorted by name.
    pub fn sort_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    /// Reliability as a rounded percentage.
    pub fn reliability_percent(&self) -> u32 {
        (self.reliability * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// A scheduled shift as delivered by the remote source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Op {
    #[serde(deserialize_with = "string_or_number")]
    pub op_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub public_id: String,
    pub op_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_expiration_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_expiration_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filled_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub est_total_hours: Option<f64>,
    #[serde(default)]
    pub operators_needed: u32,
    #[serde(default)]
    pub operators: Vec<Operator>,
}

impl Op {
    pub fn operator(&self, operator_id: &str) -> Option<&Operator> {
        self.operators.iter().find(|o| o.id == operator_id)
    }
}

/// Ids arrive as JSON strings or numbers depending on the feed.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
