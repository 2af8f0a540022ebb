// Pipeline processing: field normalization, row enrichment, grouping,
// and quality assessment

pub mod enrich;
pub mod grouping;
pub mod normalize;
pub mod quality;
