use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A structured record: string keys to scalar or nested values.
pub type Record = Map<String, Value>;

/// One record as it travels through a pipeline.
///
/// `tag` routes the event downstream and `time` is carried opaquely; the
/// lookup stage never inspects either beyond tag rewriting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub tag: String,
    #[serde(default)]
    pub time: Value,
    pub record: Record,
}

impl Event {
    pub fn new(tag: impl Into<String>, time: Value, record: Record) -> Self {
        Self {
            tag: tag.into(),
            time,
            record,
        }
    }
}
