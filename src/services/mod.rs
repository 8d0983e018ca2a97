pub mod presenter;
pub mod scheme_builder;
pub mod text_override;

pub use presenter::{BreakdownRow, BreakdownStatus, DisplayResult, ResultPresenter, VerdictTier};
pub use scheme_builder::MarkingSchemeBuilder;
pub use text_override::TextOverrideStore;
