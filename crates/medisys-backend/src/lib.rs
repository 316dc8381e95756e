//! Network side of MediSys
//!
//! - `http`: the backend JSON API over reqwest
//! - `symptoms`: the text-completion symptom checker

pub mod http;
pub mod symptoms;

pub use http::{decode_object, decode_response, http_error, HttpBackend};
pub use symptoms::{
    check_symptoms, GeminiSymptomChecker, SymptomCheckError, SymptomChecker, GENERIC_FAILURE,
};
