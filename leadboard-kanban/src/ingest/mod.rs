//! Webhook ingestion: turn a third-party form post into a lead.
//!
//! Landing-page builders post whatever field names their forms use, in
//! whatever encoding they like. [`RawPayload::decode`] gets the body into a
//! flat key/value map, a [`LeadNormalizer`] maps those keys onto lead fields,
//! and [`IngestLead`] files the result into the organization's inbox column.

mod lead;
mod normalize;
mod payload;

pub use lead::IngestLead;
pub use normalize::{LeadNormalizer, NormalizedLead, RuleBasedNormalizer, UNNAMED_LEAD};
pub use payload::RawPayload;
