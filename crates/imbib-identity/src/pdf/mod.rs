//! PDF candidate derivation and URL resolution

mod candidates;
mod resolver;

pub use candidates::{
    candidates_for_record, candidates_for_result, candidates_from_identifiers, classify_url,
    is_gateway_url,
};
pub use resolver::{
    available_sources, bucket_order, resolve, resolve_with_sources, AvailableSource,
    PdfResolution,
};
