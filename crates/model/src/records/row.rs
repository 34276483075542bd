use crate::core::value::{FieldValue, Value};

/// One row of an extracted row set. Field order is the projection order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.field_values.iter().map(|f| &f.value)
    }
}
