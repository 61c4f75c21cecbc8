use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Html,
    Form,
};

use crate::{
    api::{
        error::ApiError,
        form::{self, RawForm},
    },
    state::AppState,
};

/// GET / - Model selection page
pub async fn index(State(st): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(st.views.render_home()?))
}

/// GET /form/{model_type} - Empty prediction form for a loaded model
pub async fn prediction_form(
    State(st): State<AppState>,
    Path(model_type): Path<String>,
) -> Result<Html<String>, ApiError> {
    let kind = st
        .registry
        .resolve(&model_type)
        .ok_or(ApiError::ModelNotFound)?;

    Ok(Html(st.views.render_form(kind, None, None)?))
}

/// POST /submit_form - Predict and render the result
///
/// The model is checked before the fields, so an unknown model is a 404 even
/// when the inputs are also invalid. A body that is not a urlencoded form is
/// read as an empty form and lands on the same 404.
pub async fn submit_form(
    State(st): State<AppState>,
    form: Result<Form<RawForm>, FormRejection>,
) -> Result<Html<String>, ApiError> {
    let raw = match form {
        Ok(Form(raw)) => raw,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable form body");
            RawForm::new()
        }
    };

    let kind = raw
        .get("model_type")
        .and_then(|name| st.registry.resolve(name))
        .ok_or(ApiError::ModelNotFound)?;

    let features = form::parse(&raw)?;
    let power_generated = st.registry.predict(kind, &features)?;

    tracing::info!(model = %kind, power_generated, "prediction served");

    Ok(Html(st.views.render_form(
        kind,
        Some(power_generated),
        Some(&features),
    )?))
}
