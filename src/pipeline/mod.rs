// Analysis pipeline: load → classify + train → per-selection trend views.
//
// Training happens once per `Analysis`. Everything after that is read-only,
// and each user selection builds a fresh `TrendView` from the shared state.

pub mod analysis;
pub mod view;
