pub mod analytics;
pub mod applicant;
pub mod chat;
pub mod prospect;
pub mod reporting;
pub mod vaga;
pub mod workbook;
