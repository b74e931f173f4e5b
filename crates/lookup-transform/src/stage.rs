use lookup_model::{Event, LookupConfig, Record, Result};

use crate::tag::TagRewriter;
use crate::transformer::FieldTransformer;

/// The lookup step as a pipeline sees it: rewrite the tag, enrich the
/// record, forward the event. `time` passes through untouched.
#[derive(Debug, Clone)]
pub struct LookupStage {
    transformer: FieldTransformer,
    tags: TagRewriter,
}

impl LookupStage {
    pub fn new(transformer: FieldTransformer, tags: TagRewriter) -> Self {
        Self { transformer, tags }
    }

    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let transformer = FieldTransformer::from_config(config)?;
        Ok(Self::new(
            transformer,
            TagRewriter::new(config.tag_options()),
        ))
    }

    pub fn transformer(&self) -> &FieldTransformer {
        &self.transformer
    }

    pub fn tags(&self) -> &TagRewriter {
        &self.tags
    }

    pub fn process(&self, mut event: Event) -> Event {
        if !self.tags.is_identity() {
            event.tag = self.tags.rewrite(&event.tag);
        }
        self.transformer.transform(&mut event.record);
        event
    }

    /// Enrich a bare record when no tag is involved.
    pub fn process_record<'a>(&self, record: &'a mut Record) -> &'a mut Record {
        self.transformer.transform(record)
    }
}
