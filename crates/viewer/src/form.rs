use recordstore::{FormField, Record, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },
}

/// The add-record form: one text input per `FormField`, all required and
/// numeric.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordForm {
    inputs: [String; 8],
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(field: FormField) -> usize {
        FormField::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.inputs[Self::slot(field)] = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.inputs[Self::slot(field)]
    }

    pub fn is_blank(&self) -> bool {
        self.inputs.iter().all(|s| s.is_empty())
    }

    pub fn clear(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
    }

    /// Checks every input and builds the submission record keyed by form
    /// name. Stops at the first bad field, in form order.
    pub fn validate(&self) -> Result<Record, FormError> {
        let mut rec = Record::new();
        for field in FormField::ALL {
            let raw = self.get(field).trim();
            if raw.is_empty() {
                return Err(FormError::Missing(field.label()));
            }
            let n = raw
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| FormError::NotNumeric {
                    field: field.label(),
                    value: raw.to_string(),
                })?;
            rec.insert(field.form_name(), Value::Number(n));
        }
        Ok(rec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RecordForm {
        let mut form = RecordForm::new();
        for (field, v) in FormField::ALL.into_iter().zip(["45", "2", "120", "80", "0", "28.4", "20", "0.5"]) {
            form.set(field, v);
        }
        form
    }

    #[test]
    fn test_valid_form_builds_record() {
        let rec = filled().validate().unwrap();
        assert_eq!(rec.len(), 8);
        assert_eq!(rec.get("age"), Some(&Value::Number(45.0)));
        assert_eq!(rec.get("bmi"), Some(&Value::Number(28.4)));
        assert_eq!(rec.get("dpf"), Some(&Value::Number(0.5)));
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut form = filled();
        form.set(FormField::Insulin, "  ");
        assert_eq!(form.validate(), Err(FormError::Missing("Insulin")));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut form = filled();
        form.set(FormField::Glucose, "high");
        assert_eq!(
            form.validate(),
            Err(FormError::NotNumeric { field: "Glucose", value: "high".into() })
        );

        form.set(FormField::Glucose, "NaN");
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_clear_empties_every_input() {
        let mut form = filled();
        assert!(!form.is_blank());
        form.clear();
        assert!(form.is_blank());
        assert_eq!(form, RecordForm::new());
    }
}
