//! The upstream envelope and records, as the portal sends them.

use serde::de::{self, Deserializer};
use serde_derive::{Serialize, Deserialize};
use serde_json::Value;

use crate::deser::*;

/// Result code the portal uses for a successful query.
pub const RESULT_OK: &str = "00";
/// Result code for bad query parameters.
pub const RESULT_INVALID_PARAMS: &str = "11";
/// Result code for a service key the portal doesn't know about.
pub const RESULT_KEY_NOT_REGISTERED: &str = "30";

/// User-facing explanation of a non-success result code.
pub fn result_code_message(code: &str) -> &'static str {
    match code {
        RESULT_INVALID_PARAMS => "The request parameters are invalid.",
        RESULT_KEY_NOT_REGISTERED => "The service key is not registered.",
        _ => "Data is currently unavailable."
    }
}

/// Top-level response wrapper.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    pub response: EnvelopeResponse
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnvelopeResponse {
    pub header: Header,
    #[serde(default)]
    pub body: Option<Body>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(deserialize_with = "lenient_required")]
    pub result_code: String,
    #[serde(default, deserialize_with = "lenient_required")]
    pub result_msg: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    #[serde(default)]
    pub items: Option<Items>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub num_of_rows: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page_no: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_count: Option<i64>
}

/// The `items` field, which is a list most of the time, but a bare object when
/// the query only matched one record. An empty result sometimes shows up as `""`.
///
/// Entries of a list that aren't objects (nulls, mostly) are dropped while decoding.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Items {
    Many(Vec<RawRecord>),
    Single(RawRecord),
    Blank(String)
}
impl<'de> de::Deserialize<'de> for Items {
    fn deserialize<D>(d: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        use serde::de::Error;

        let v: Value = de::Deserialize::deserialize(d)?;
        Ok(match v {
            Value::Array(v) => {
                let recs = v.into_iter()
                    .filter(|x| x.is_object())
                    .map(serde_json::from_value)
                    .collect::<Result<Vec<RawRecord>, _>>()
                    .map_err(D::Error::custom)?;
                Items::Many(recs)
            },
            obj @ Value::Object(_) => Items::Single(serde_json::from_value(obj).map_err(D::Error::custom)?),
            Value::String(s) => Items::Blank(s),
            other => Items::Blank(other.to_string())
        })
    }
}
impl Items {
    /// Flattens into a plain list.
    pub fn into_records(self) -> Vec<RawRecord> {
        match self {
            Items::Many(v) => v,
            Items::Single(r) => vec![r],
            Items::Blank(_) => vec![]
        }
    }
}

impl Envelope {
    pub fn result_code(&self) -> &str {
        &self.response.header.result_code
    }
    pub fn result_msg(&self) -> &str {
        &self.response.header.result_msg
    }
    pub fn is_ok(&self) -> bool {
        self.result_code() == RESULT_OK
    }
    /// Takes the records out of the envelope, whatever shape `items` had.
    pub fn into_records(self) -> Vec<RawRecord> {
        self.response.body
            .and_then(|b| b.items)
            .map(Items::into_records)
            .unwrap_or_default()
    }
}

/// One hourly time slot, as sent by the portal.
///
/// Field names follow the portal: `t1`/`t2` is the terminal, `eg` the entry
/// (arrivals) side, `dg` the departure side, then the gate number. The `sum`
/// fields are the portal's own totals. Note that the T2 departure total really is
/// called `t2dgsum2`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Display date.
    #[serde(default, deserialize_with = "lenient_required")]
    pub adate: String,
    /// Time slot, `HH_HH`.
    #[serde(default, deserialize_with = "lenient_required")]
    pub atime: String,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1eg1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1eg2: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1eg3: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1eg4: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1egsum1: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg2: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg3: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg4: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg5: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dg6: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t1dgsum1: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2eg1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2eg2: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2egsum1: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2dg1: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2dg2: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub t2dgsum2: Option<String>,
}
