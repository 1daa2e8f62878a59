use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// SupplierEntity is a vendor books are bought from.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct SupplierEntity {
    pub supplier_id: String,
    pub version: i64,
    pub branch_id: String,
    pub supplier_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl SupplierEntity {
    pub fn new(branch_id: &str, supplier_name: &str) -> Self {
        Self {
            supplier_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            supplier_name: supplier_name.trim().to_string(),
            contact: None,
            location: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // value of a searchable field, None for unknown fields
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" | "supplier_name" => Some(self.supplier_name.to_string()),
            "contact" => Some(self.contact.clone().unwrap_or_default()),
            "location" => Some(self.location.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

impl Identifiable for SupplierEntity {
    fn id(&self) -> String {
        self.supplier_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::suppliers::domain::model::SupplierEntity;

    #[tokio::test]
    async fn test_should_build_supplier() {
        let mut supplier = SupplierEntity::new("main", " Acme Books ");
        supplier.location = Some("Leeds".to_string());
        assert_eq!(Some("Acme Books".to_string()), supplier.field("name"));
        assert_eq!(Some("".to_string()), supplier.field("contact"));
        assert_eq!(Some("Leeds".to_string()), supplier.field("location"));
        assert_eq!(None, supplier.field("price"));
    }
}
