use std::cmp::Ordering;
use std::collections::HashMap;
use std::marker::PhantomData;
use async_trait::async_trait;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{versioned_document, Repository};

lazy_static! {
    // table name -> id -> stored document
    static ref TABLES: RwLock<HashMap<String, HashMap<String, Value>>> = RwLock::new(HashMap::new());
}

// MemRepository keeps entities as JSON documents in process-wide tables and answers
// queries the way the DynamoDB index does: the hash key must match (or falls back to
// a default), results are ordered by the sort key.
pub(crate) struct MemRepository<Entity> {
    table_name: String,
    pk: String,
    hash_key: String,
    sort_key: String,
    default_hash: Option<String>,
    _entity: PhantomData<fn() -> Entity>,
}

impl<Entity> MemRepository<Entity> {
    pub(crate) fn new(table_name: &str, pk: &str, hash_key: &str, sort_key: &str, default_hash: Option<String>) -> Self {
        Self {
            table_name: table_name.to_string(),
            pk: pk.to_string(),
            hash_key: hash_key.to_string(),
            sort_key: sort_key.to_string(),
            default_hash,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<Entity> Repository<Entity> for MemRepository<Entity>
    where Entity: Identifiable + Serialize + DeserializeOwned {
    async fn create(&self, entity: &Entity) -> LibraryResult<usize> {
        let doc = serde_json::to_value(entity)?;
        let mut tables = TABLES.write();
        let table = tables.entry(self.table_name.to_string()).or_default();
        if table.contains_key(entity.id().as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("{} already has an item with id {}", self.table_name, entity.id()).as_str()));
        }
        table.insert(entity.id(), doc);
        Ok(1)
    }

    async fn update(&self, entity: &Entity) -> LibraryResult<usize> {
        let doc = versioned_document(entity, entity.version())?;
        let mut tables = TABLES.write();
        let table = tables.entry(self.table_name.to_string()).or_default();
        let stored_version = table.get(entity.id().as_str())
            .and_then(|old| old.get("version"))
            .and_then(Value::as_i64);
        if stored_version != Some(entity.version()) {
            return Err(LibraryError::stale_version(
                format!("{} {} was changed or removed by another request", self.table_name, entity.id()).as_str()));
        }
        table.insert(entity.id(), doc);
        Ok(1)
    }

    async fn get(&self, id: &str) -> LibraryResult<Entity> {
        let doc = TABLES.read().get(self.table_name.as_str()).and_then(|table| table.get(id).cloned());
        match doc {
            Some(doc) => Ok(serde_json::from_value(doc)?),
            None => Err(LibraryError::not_found(format!("{} not found for {}", self.table_name, id).as_str())),
        }
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let mut tables = TABLES.write();
        Ok(tables.get_mut(self.table_name.as_str())
            .and_then(|table| table.remove(id))
            .map(|_| 1).unwrap_or(0))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>> {
        let mut predicate = predicate.clone();
        if !predicate.contains_key(self.hash_key.as_str()) {
            match &self.default_hash {
                Some(hash) => { predicate.insert(self.hash_key.to_string(), hash.to_string()); }
                None => {
                    return Err(LibraryError::validation(
                        format!("query on {} requires {}", self.table_name, self.hash_key).as_str(), None));
                }
            }
        }
        let mut matched: Vec<Value> = TABLES.read().get(self.table_name.as_str())
            .map(|table| table.values().filter(|doc| matches(doc, &predicate)).cloned().collect())
            .unwrap_or_default();
        matched.sort_by(|a, b| {
            attr_string(a, self.sort_key.as_str()).cmp(&attr_string(b, self.sort_key.as_str()))
                .then_with(|| attr_string(a, self.pk.as_str()).cmp(&attr_string(b, self.pk.as_str())))
        });
        let start = match page {
            Some(last) => matched.iter().position(|doc| attr_string(doc, self.pk.as_str()) == last).map(|pos| pos + 1).unwrap_or(0),
            None => 0,
        };
        let page_size = page_size.max(1);
        let selected: Vec<Value> = matched.iter().skip(start).take(page_size).cloned().collect();
        let next_page = if start + selected.len() < matched.len() {
            selected.last().map(|doc| attr_string(doc, self.pk.as_str()))
        } else {
            None
        };
        let records = selected.into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(LibraryError::from))
            .collect::<LibraryResult<Vec<Entity>>>()?;
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

fn attr_string(doc: &Value, name: &str) -> String {
    doc.get(name).map(value_string).unwrap_or_default()
}

fn value_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn matches(doc: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, expected)| {
        let (name, op) = match k.split_once(':') {
            Some((name, op)) => (name, op),
            None => (k.as_str(), "="),
        };
        let actual = match doc.get(name) {
            Some(Value::Null) | None => return false,
            Some(actual) => actual,
        };
        match op {
            "contains" => value_string(actual).contains(expected.as_str()),
            "begins_with" => value_string(actual).starts_with(expected.as_str()),
            _ => {
                let ord = compare(actual, expected);
                match op {
                    "=" => ord == Ordering::Equal,
                    "<>" => ord != Ordering::Equal,
                    "<" => ord == Ordering::Less,
                    "<=" => ord != Ordering::Greater,
                    ">" => ord == Ordering::Greater,
                    ">=" => ord != Ordering::Less,
                    _ => false,
                }
            }
        }
    })
}

fn compare(actual: &Value, expected: &str) -> Ordering {
    if let (Some(a), Ok(e)) = (actual.as_i64(), expected.parse::<i64>()) {
        return a.cmp(&e);
    }
    value_string(actual).as_str().cmp(expected)
}
