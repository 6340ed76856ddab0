pub mod symptom_store;
pub mod time_series;
