use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::suppliers::domain::model::SupplierEntity;
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct SupplierDto {
    pub supplier_id: String,
    pub version: i64,
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

impl SupplierDto {
    pub fn new(supplier_name: &str, contact: Option<String>, location: Option<String>) -> Self {
        Self {
            supplier_id: Uuid::new_v4().to_string(),
            version: 0,
            supplier_name: supplier_name.to_string(),
            contact,
            location,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for SupplierDto {
    fn id(&self) -> String {
        self.supplier_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl From<&SupplierEntity> for SupplierDto {
    fn from(other: &SupplierEntity) -> Self {
        Self {
            supplier_id: other.supplier_id.to_string(),
            version: other.version,
            supplier_name: other.supplier_name.to_string(),
            contact: other.contact.clone(),
            location: other.location.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl SupplierEntity {
    pub(crate) fn from_dto(branch_id: &str, other: &SupplierDto) -> Self {
        let trimmed = |v: &Option<String>| v.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            supplier_id: other.supplier_id.to_string(),
            version: other.version,
            branch_id: branch_id.to_string(),
            supplier_name: other.supplier_name.trim().to_string(),
            contact: trimmed(&other.contact),
            location: trimmed(&other.location),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
