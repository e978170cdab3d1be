use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::Value;

/// One row of the dataset: field name -> value, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Replaces the value if the field already exists, keeping its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from a JSON object, keeping the values as sent.
    pub fn from_json(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut rec = Record::new();
        for (k, v) in obj {
            rec.insert(k, Value::from(v));
        }
        rec
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The eight fields collected by the entry form. `Outcome` is present in the
/// data but never submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Age,
    Pregnancies,
    Glucose,
    BloodPressure,
    Insulin,
    Bmi,
    SkinThickness,
    Dpf,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Age,
        FormField::Pregnancies,
        FormField::Glucose,
        FormField::BloodPressure,
        FormField::Insulin,
        FormField::Bmi,
        FormField::SkinThickness,
        FormField::Dpf,
    ];

    /// Name used in the JSON submission.
    pub fn form_name(self) -> &'static str {
        match self {
            FormField::Age => "age",
            FormField::Pregnancies => "pregnancies",
            FormField::Glucose => "glucose",
            FormField::BloodPressure => "bloodPressure",
            FormField::Insulin => "insulin",
            FormField::Bmi => "bmi",
            FormField::SkinThickness => "skinThickness",
            FormField::Dpf => "dpf",
        }
    }

    /// Column name in the canonical dataset header.
    pub fn column_name(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Pregnancies => "Pregnancies",
            FormField::Glucose => "Glucose",
            FormField::BloodPressure => "BloodPressure",
            FormField::Insulin => "Insulin",
            FormField::Bmi => "BMI",
            FormField::SkinThickness => "SkinThickness",
            FormField::Dpf => "DiabetesPedigreeFunction",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Age => "Age",
            FormField::Pregnancies => "Pregnancies",
            FormField::Glucose => "Glucose",
            FormField::BloodPressure => "Blood Pressure",
            FormField::Insulin => "Insulin",
            FormField::Bmi => "BMI",
            FormField::SkinThickness => "Skin Thickness",
            FormField::Dpf => "DPF",
        }
    }

    pub fn from_form_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.form_name() == name)
    }
}
