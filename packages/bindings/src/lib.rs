use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Goodness of fit
// ---------------------------------------------------------------------------

#[napi]
pub fn hosmer_lemeshow(input_json: String) -> NapiResult<String> {
    let input: model_validation_core::goodness_of_fit::hosmer_lemeshow::HosmerLemeshowInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        model_validation_core::goodness_of_fit::hosmer_lemeshow::calculate_hosmer_lemeshow(&input)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[napi]
pub fn classification_report(input_json: String) -> NapiResult<String> {
    let input: model_validation_core::classification::confusion::ClassificationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = model_validation_core::classification::confusion::calculate_classification_report(
        &input,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn roc_curve(input_json: String) -> NapiResult<String> {
    let input: model_validation_core::classification::roc::RocInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = model_validation_core::classification::roc::calculate_roc(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
