//! Prediction form ingestion
//!
//! Reads the nine weather fields from a urlencoded form body. Values are
//! trimmed and parsed like Python's `float()`, so `1e3`, `inf` and `nan` are
//! accepted while empty strings are not.

use std::collections::HashMap;
use thiserror::Error;

use crate::ml::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Raw submitted form: field name to value
pub type RawForm = HashMap<String, String>;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("field `{0}` is missing")]
    Missing(&'static str),

    #[error("field `{field}` is not a number: {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

pub fn parse(form: &RawForm) -> Result<FeatureVector, FormError> {
    let mut values = [0.0; FEATURE_COUNT];
    for (slot, &field) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
        let raw = form.get(field).ok_or(FormError::Missing(field))?;
        *slot = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::NotNumeric {
                field,
                value: raw.clone(),
            })?;
    }
    Ok(FeatureVector::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_form() -> RawForm {
        [
            ("model_type", "Random Forest"),
            ("distance_to_solar_noon", "0.1"),
            ("temperature", "70"),
            ("wind_direction", "180"),
            ("wind_speed", "5"),
            ("sky_cover", "2"),
            ("visibility", "10"),
            ("humidity", "40"),
            ("average_wind_speed", "4.5"),
            ("average_pressure", "30.0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parse_in_model_order() {
        let fv = parse(&valid_form()).unwrap();
        assert_eq!(
            fv.values(),
            [0.1, 70.0, 180.0, 5.0, 2.0, 10.0, 40.0, 4.5, 30.0]
        );
    }

    #[rstest]
    #[case("distance_to_solar_noon")]
    #[case("temperature")]
    #[case("humidity")]
    #[case("average_pressure")]
    fn test_missing_field(#[case] field: &'static str) {
        let mut form = valid_form();
        form.remove(field);
        assert_eq!(parse(&form), Err(FormError::Missing(field)));
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("   ")]
    #[case("7O")]
    #[case("1,5")]
    fn test_non_numeric_field(#[case] value: &str) {
        let mut form = valid_form();
        form.insert("temperature".to_string(), value.to_string());
        assert_eq!(
            parse(&form),
            Err(FormError::NotNumeric {
                field: "temperature",
                value: value.to_string()
            })
        );
    }

    #[rstest]
    #[case(" 70 ", 70.0)]
    #[case("7e1", 70.0)]
    #[case("-3.5", -3.5)]
    #[case("+2", 2.0)]
    fn test_lenient_float_syntax(#[case] value: &str, #[case] expected: f64) {
        let mut form = valid_form();
        form.insert("temperature".to_string(), value.to_string());
        assert_eq!(parse(&form).unwrap().get("temperature"), Some(expected));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut form = valid_form();
        form.insert("cloud_ceiling".to_string(), "lots".to_string());
        assert!(parse(&form).is_ok());
    }
}
