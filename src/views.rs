//! HTML views
//!
//! Templates are compiled into the binary and registered once at startup.
//! `.html` templates are auto-escaped by minijinja.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::ml::{FeatureVector, ModelKind, FEATURE_NAMES};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const FORM_TEMPLATE: &str = include_str!("../templates/form.html");

/// One input of the prediction form
#[derive(Debug, Serialize)]
struct FieldView {
    name: &'static str,
    value: Option<f64>,
}

pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("form.html", FORM_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_home(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {})
    }

    /// Render the submission form. With `power_generated` set, the prediction
    /// is shown and the inputs are pre-filled with the submitted values.
    pub fn render_form(
        &self,
        model_type: ModelKind,
        power_generated: Option<f64>,
        submitted: Option<&FeatureVector>,
    ) -> Result<String, minijinja::Error> {
        let fields: Vec<FieldView> = FEATURE_NAMES
            .iter()
            .map(|&name| FieldView {
                name,
                value: submitted.and_then(|fv| fv.get(name)),
            })
            .collect();

        self.env.get_template("form.html")?.render(context! {
            model_type => model_type.name(),
            power_generated => power_generated,
            fields => fields,
        })
    }
}
