// Staff-facing evaluation: transcript + interview answers → strengths, risks, verdict.

pub mod handlers;
pub mod signals;
pub mod summarizer;
