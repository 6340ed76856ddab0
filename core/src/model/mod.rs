pub mod symptom;
pub mod symptom_log;
