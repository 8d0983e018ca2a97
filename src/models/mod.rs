pub mod artifact;
pub mod evaluation;
pub mod ocr;
pub mod scheme;

pub use artifact::{Artifact, FileBatch, Role};
pub use evaluation::{
    BreakdownItem, EvaluationKind, EvaluationOutcome, EvaluationReport,
};
pub use ocr::{ClassifiedText, OcrFileResult, OcrOutcome};
pub use scheme::{GeneratedScheme, MarkingScheme, SchemePoint};
