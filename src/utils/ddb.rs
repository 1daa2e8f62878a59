use std::cmp;
use std::collections::HashMap;
use std::time::Duration;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value};
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::{versioned_document, RepositoryStore};

pub(crate) const LOCAL_ENDPOINT: &str = "http://localhost:8000";

// create_table creates a table keyed by `pk` with a `<table>_ndx` index on (gsi_pk, gsi_sk)
pub(crate) async fn create_table(client: &Client,
                                 table_name: &str, pk: &str,
                                 gsi_pk: &str, gsi_sk: &str) -> LibraryResult<()> {
    let gsi = GlobalSecondaryIndex::builder()
        .index_name(format!("{}_ndx", table_name))
        .key_schema(KeySchemaElement::builder()
            .attribute_name(gsi_pk)
            .key_type(KeyType::Hash).build())
        .key_schema(KeySchemaElement::builder()
            .attribute_name(gsi_sk)
            .key_type(KeyType::Range).build())
        .projection(Projection::builder().projection_type(ProjectionType::All).build())
        .provisioned_throughput(
            ProvisionedThroughput::builder().read_capacity_units(10).write_capacity_units(10).build())
        .build();

    let mut request = client
        .create_table()
        .table_name(table_name)
        .global_secondary_indexes(gsi)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(pk)
                .key_type(KeyType::Hash)
                .build(),
        )
        .provisioned_throughput(
            ProvisionedThroughput::builder()
                .read_capacity_units(10)
                .write_capacity_units(10)
                .build(),
        );
    let mut defined: Vec<&str> = vec![];
    for attr in [pk, gsi_pk, gsi_sk] {
        if defined.contains(&attr) {
            continue;
        }
        defined.push(attr);
        request = request.attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(attr)
                .attribute_type(ScalarAttributeType::S)
                .build());
    }

    match request.send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Creating).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to create {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) async fn delete_table(client: &Client, table_name: &str) -> LibraryResult<()> {
    match client.delete_table().table_name(table_name).send().await {
        Ok(_k) => {
            wait_until_table_status_is_not(client, table_name, TableStatus::Deleting).await;
            Ok(())
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to delete {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

async fn wait_until_table_status_is_not(client: &Client, table_name: &str, other_status: TableStatus) {
    for _i in 0..30 {
        if let Ok(status) = describe_table(client, table_name).await {
            if status != other_status {
                return;
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn describe_table(client: &Client, table_name: &str) -> LibraryResult<TableStatus> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(status.clone());
                }
            }
            Err(LibraryError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(err) => {
            Err(LibraryError::database_or_unavailable(format!("failed to describe {} table due to {}",
                                                              table_name, err).as_str(), None, false))
        }
    }
}

pub(crate) fn parse_item(value: Value) -> Result<HashMap<String, AttributeValue>, String> {
    match value_to_item(value) {
        AttributeValue::M(map) => Ok(map),
        other => Err(format!("failed to parse{:?}", other)),
    }
}

// parse_entity maps a stored item back through serde, the inverse of parse_item
pub(crate) fn parse_entity<T: DeserializeOwned>(item: &HashMap<String, AttributeValue>) -> LibraryResult<T> {
    let map = item.iter()
        .map(|(k, v)| (k.to_string(), item_to_value(v)))
        .collect::<serde_json::Map<String, Value>>();
    Ok(serde_json::from_value(Value::Object(map))?)
}

fn value_to_item(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(a) => AttributeValue::L(a.into_iter().map(value_to_item).collect()),
        Value::Object(o) => {
            AttributeValue::M(o.into_iter().map(|(k, v)| (k, value_to_item(v))).collect())
        }
    }
}

fn item_to_value(attr: &AttributeValue) -> Value {
    match attr {
        AttributeValue::S(s) => Value::String(s.to_string()),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => {
            if let Ok(i) = n.parse::<i64>() {
                Value::from(i)
            } else {
                n.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null)
            }
        }
        AttributeValue::L(list) => Value::Array(list.iter().map(item_to_value).collect()),
        AttributeValue::M(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.to_string(), item_to_value(v))).collect())
        }
        AttributeValue::Ss(list) => Value::Array(list.iter().map(|s| Value::String(s.to_string())).collect()),
        _ => Value::Null,
    }
}

// add_filter_expr appends `#name op :name` (or `op(#name, :name)` for functions) and
// returns the attribute name, e.g. for `due_at:<=` or `title:contains`.
pub(crate) fn add_filter_expr(k: &str, filter_expr: &mut String) -> String {
    let mut op = "=";
    let mut ks = k;
    let parts = k.split(':').collect::<Vec<&str>>();
    if parts.len() > 1 {
        ks = parts[0];
        op = parts[1];
    }
    let cond = match op {
        "contains" | "begins_with" => format!("{}(#{}, :{})", op, ks, ks),
        _ => format!("#{} {} :{}", ks, op, ks),
    };
    if !filter_expr.is_empty() {
        filter_expr.push_str(" AND ");
    }
    filter_expr.push_str(cond.as_str());
    ks.to_string()
}

// the page token is the JSON form of the last evaluated key
pub(crate) fn to_ddb_page(page: Option<&str>) -> Option<HashMap<String, AttributeValue>> {
    if let Some(page) = page {
        if let Ok(str_map) = serde_json::from_str::<HashMap<String, String>>(page) {
            let mut attr_map = HashMap::new();
            for (k, v) in str_map {
                attr_map.insert(k, AttributeValue::S(v));
            }
            return Some(attr_map);
        }
    }
    None
}

pub(crate) fn from_ddb<T>(page: Option<&str>, page_size: usize,
                          last_evaluated_key: Option<&HashMap<String, AttributeValue>>,
                          records: Vec<T>) -> PaginatedResult<T> {
    let mut next_page: Option<String> = None;
    if let Some(attr_map) = last_evaluated_key {
        let mut str_map = HashMap::new();
        for (k, v) in attr_map {
            if let AttributeValue::S(val) = v {
                str_map.insert(k.clone(), val.to_string());
            }
        }
        if let Ok(j) = serde_json::to_string(&str_map) {
            next_page = Some(j);
        }
    }
    PaginatedResult::new(page, page_size, next_page, records)
}

// put_new_item writes an item that must not exist yet
pub(crate) async fn put_new_item<T: Serialize>(client: &Client, table_name: &str, pk: &str, entity: &T) -> LibraryResult<usize> {
    let val = serde_json::to_value(entity)?;
    client
        .put_item()
        .table_name(table_name)
        .condition_expression("attribute_not_exists(#pk)")
        .expression_attribute_names("#pk", pk)
        .set_item(Some(parse_item(val)?))
        .send()
        .await.map(|_| 1).map_err(|err| {
        if is_conditional_put_failure(&err) {
            LibraryError::duplicate_key(format!("{} already has an item with the same {}", table_name, pk).as_str())
        } else {
            LibraryError::from(err)
        }
    })
}

// put_versioned_item replaces an item if its stored version still equals `version`
pub(crate) async fn put_versioned_item<T: Serialize>(client: &Client, table_name: &str, id: &str, entity: &T, version: i64) -> LibraryResult<usize> {
    let val = versioned_document(entity, version)?;
    client
        .put_item()
        .table_name(table_name)
        .condition_expression("attribute_exists(#version) AND #version = :old_version")
        .expression_attribute_names("#version", "version")
        .expression_attribute_values(":old_version", AttributeValue::N(version.to_string()))
        .set_item(Some(parse_item(val)?))
        .send()
        .await.map(|_| 1).map_err(|err| {
        if is_conditional_put_failure(&err) {
            LibraryError::stale_version(format!("{} {} was changed or removed by another request", table_name, id).as_str())
        } else {
            LibraryError::from(err)
        }
    })
}

pub(crate) async fn get_item<T: DeserializeOwned>(client: &Client, table_name: &str, pk: &str, id: &str) -> LibraryResult<T> {
    let out = client
        .get_item()
        .table_name(table_name)
        .key(pk, AttributeValue::S(id.to_string()))
        .consistent_read(true)
        .send()
        .await?;
    match out.item() {
        Some(item) => parse_entity(item),
        None => Err(LibraryError::not_found(format!("{} not found for {}", table_name, id).as_str())),
    }
}

pub(crate) async fn delete_item(client: &Client, table_name: &str, pk: &str, id: &str) -> LibraryResult<usize> {
    client.delete_item()
        .table_name(table_name)
        .key(pk, AttributeValue::S(id.to_string()))
        .send()
        .await.map(|_| 1).map_err(LibraryError::from)
}

// IndexQuery describes the (hash, range) key names of an index and the default hash value
// used when the predicate does not name one.
pub(crate) struct IndexQuery<'a> {
    pub table_name: &'a str,
    pub index_name: &'a str,
    pub hash_key: &'a str,
    pub range_key: &'a str,
    pub default_hash: Option<String>,
}

// query_index puts the hash key and any range key comparison in the key condition, everything
// else in the filter.
// Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
// so all attribute names go through expression attribute names.
pub(crate) async fn query_index<T: DeserializeOwned>(client: &Client, index: &IndexQuery<'_>,
                                                     predicate: &HashMap<String, String>,
                                                     page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<T>> {
    let hash_value = predicate.get(index.hash_key).cloned().or_else(|| index.default_hash.clone())
        .ok_or_else(|| LibraryError::validation(
            format!("query on {} requires {}", index.table_name, index.hash_key).as_str(), None))?;
    let mut request = client
        .query()
        .table_name(index.table_name)
        .index_name(index.index_name)
        .limit(cmp::min(page_size, 500) as i32)
        .consistent_read(false)
        .set_exclusive_start_key(to_ddb_page(page))
        .expression_attribute_names("#hk", index.hash_key)
        .expression_attribute_values(":hk", AttributeValue::S(hash_value));
    // handle GSI keys first, range comparisons belong to the key condition
    let mut key_cond = String::from("#hk = :hk");
    let mut filter_expr = String::new();
    for (k, v) in predicate {
        if k == index.hash_key {
            continue;
        }
        let (name, op) = k.split_once(':').unwrap_or((k.as_str(), "="));
        if name == index.range_key && op != "contains" && op != "<>" {
            let cond = if op == "begins_with" { "begins_with(#rk, :rk)".to_string() } else { format!("#rk {} :rk", op) };
            key_cond.push_str(" AND ");
            key_cond.push_str(cond.as_str());
            request = request
                .expression_attribute_names("#rk", index.range_key)
                .expression_attribute_values(":rk", AttributeValue::S(v.to_string()));
        } else {
            // then handle other filters
            let ks = add_filter_expr(k.as_str(), &mut filter_expr);
            request = request
                .expression_attribute_names(format!("#{}", ks), ks.as_str())
                .expression_attribute_values(format!(":{}", ks), AttributeValue::S(v.to_string()));
        }
    }
    request = request.key_condition_expression(key_cond);
    if !filter_expr.is_empty() {
        request = request.filter_expression(filter_expr);
    }
    let out = request.send().await?;
    let records = out.items().unwrap_or_default().iter()
        .map(parse_entity)
        .collect::<LibraryResult<Vec<T>>>()?;
    Ok(from_ddb(page, page_size, out.last_evaluated_key(), records))
}

// helper method to build db-client with tracing enabled
pub(crate) async fn build_db_client(store: RepositoryStore) -> Client {
    match store {
        RepositoryStore::DynamoDB => {
            //Get config from environment.
            let config = aws_config::load_from_env().await;
            //Create the DynamoDB client.
            Client::new(&config)
        }
        RepositoryStore::LocalDynamoDB | RepositoryStore::InMemory => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let endpoint = std::env::var("BOOKHIVE_DDB_ENDPOINT").unwrap_or_else(|_| LOCAL_ENDPOINT.to_string());
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new("local"))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(endpoint)
                .build();
            Client::from_conf(dynamodb_local_config)
        }
    }
}

// helper method to build sns-client
pub(crate) async fn build_sns_client() -> aws_sdk_sns::Client {
    //Get config from environment.
    let config = aws_config::load_from_env().await;
    aws_sdk_sns::Client::new(&config)
}

fn is_conditional_put_failure(err: &SdkError<PutItemError>) -> bool {
    match err {
        SdkError::ServiceError(ctx) => Some(ctx.err()),
        _ => None,
    }
        .map(|e| e.is_conditional_check_failed_exception())
        .unwrap_or(false)
}

impl From<SdkError<PutItemError>> for LibraryError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<GetItemError>> for LibraryError {
    fn from(err: SdkError<GetItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteItemError>> for LibraryError {
    fn from(err: SdkError<DeleteItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for LibraryError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        LibraryError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

pub(crate) fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// throttling responses mention "ProvisionedThroughputExceeded" or "LimitExceeded"
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    opts.map(|b| b.windows(6).any(|w| w == b"ceeded")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use aws_sdk_dynamodb::types::AttributeValue;
    use serde::{Deserialize, Serialize};
    use crate::utils::ddb::{add_filter_expr, from_ddb, has_exceeded_limit, parse_entity, parse_item, to_ddb_page};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        shelf_id: String,
        copies: i64,
        restricted: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    #[tokio::test]
    async fn test_should_convert_entity_to_item_and_back() {
        let shelf = Shelf { shelf_id: "A-1".to_string(), copies: 3, restricted: true, note: None };
        let item = parse_item(serde_json::to_value(&shelf).unwrap()).expect("should build item");
        assert_eq!(Some(&AttributeValue::N("3".to_string())), item.get("copies"));
        assert!(item.get("note").is_none());
        let back: Shelf = parse_entity(&item).expect("should parse item");
        assert_eq!(shelf, back);
    }

    #[tokio::test]
    async fn test_should_build_filter_expressions() {
        let mut filter = String::new();
        assert_eq!("book_id", add_filter_expr("book_id", &mut filter).as_str());
        assert_eq!("due_at", add_filter_expr("due_at:<=", &mut filter).as_str());
        assert_eq!("title", add_filter_expr("title:contains", &mut filter).as_str());
        assert_eq!("#book_id = :book_id AND #due_at <= :due_at AND contains(#title, :title)", filter.as_str());
    }

    #[tokio::test]
    async fn test_should_round_trip_page_token() {
        let key = HashMap::from([("borrow_id".to_string(), AttributeValue::S("b1".to_string()))]);
        let res = from_ddb::<String>(None, 10, Some(&key), vec![]);
        let token = res.next_page.expect("should have next page");
        assert_eq!(Some(key), to_ddb_page(Some(token.as_str())));
        assert_eq!(None, to_ddb_page(Some("not json")));
    }

    #[tokio::test]
    async fn test_should_detect_throttling() {
        assert!(has_exceeded_limit(Some(b"ProvisionedThroughputExceededException".as_slice())));
        assert!(!has_exceeded_limit(Some(b"abc".as_slice())));
        assert!(!has_exceeded_limit(None));
    }
}
