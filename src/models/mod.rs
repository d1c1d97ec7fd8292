pub mod job;
pub mod job_state;
pub mod layout;
pub mod outcome;

pub use job::{derive_output_path, ConversionJob};
pub use job_state::JobState;
pub use layout::{Margins, PaperSize, PdfLayoutOptions};
pub use outcome::{BatchReport, JobOutcome};
