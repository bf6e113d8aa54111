//! Wire rows of the generated search index.
//!
//! Items and paths are written as positional JSON arrays rather than objects,
//! so they get hand-written (de)serializers. Everything here is untyped: kind
//! codes are plain integers and parent references plain positions until the
//! loader validates them.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Top level mapping: crate name to crate record
pub type RawSearchIndex = BTreeMap<String, RawCrate>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCrate {
    pub doc: String,
    pub items: Vec<RawItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<RawPath>>,
}

/// `[kind, name, path, summary, parent_index, signature]`
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub kind: u64,
    pub name: String,
    pub path: String,
    pub summary: Option<String>,
    pub parent: Option<usize>,
    pub signature: Option<RawSignature>,
}

/// `[kind, name]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPath(pub u64, pub String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignature {
    pub inputs: Vec<RawType>,
    #[serde(default)]
    pub output: Option<RawType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawType {
    pub name: String,
}

impl Serialize for RawItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(6))?;
        seq.serialize_element(&self.kind)?;
        seq.serialize_element(&self.name)?;
        seq.serialize_element(&self.path)?;
        seq.serialize_element(&self.summary)?;
        seq.serialize_element(&self.parent)?;
        seq.serialize_element(&self.signature)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawItemVisitor)
    }
}

struct RawItemVisitor;

impl<'de> Visitor<'de> for RawItemVisitor {
    type Value = RawItem;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an item row [kind, name, path, summary, parent_index?, signature?]")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawItem, A::Error> {
        let kind = seq
            .next_element()?
            .ok_or_else(|| de::Error::missing_field("kind"))?;
        let name = seq
            .next_element()?
            .ok_or_else(|| de::Error::missing_field("name"))?;
        let path = seq
            .next_element()?
            .ok_or_else(|| de::Error::missing_field("path"))?;
        let summary: Option<String> = seq
            .next_element::<Option<String>>()?
            .ok_or_else(|| de::Error::missing_field("summary"))?;
        // Trailing columns are optional: older generators stop after the parent.
        let parent = seq.next_element::<Option<usize>>()?.flatten();
        let signature = seq.next_element::<Option<RawSignature>>()?.flatten();

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(7, &self));
        }

        Ok(RawItem {
            kind,
            name,
            path,
            summary,
            parent,
            signature,
        })
    }
}
