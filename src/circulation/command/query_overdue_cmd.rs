use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

const DEFAULT_PAGE_SIZE: usize = 50;

pub(crate) struct QueryOverdueCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl QueryOverdueCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryOverdueCommandRequest {
    pub student_id: Option<String>,
    pub book_id: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<usize>,
}

impl QueryOverdueCommandRequest {
    fn predicate(&self) -> HashMap<String, String> {
        let mut predicate = HashMap::new();
        if let Some(student_id) = &self.student_id {
            predicate.insert("student_id".to_string(), student_id.to_string());
        }
        if let Some(book_id) = &self.book_id {
            predicate.insert("book_id".to_string(), book_id.to_string());
        }
        predicate
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryOverdueCommandResponse {
    pub borrows: Vec<BorrowDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

#[async_trait]
impl Command<QueryOverdueCommandRequest, QueryOverdueCommandResponse> for QueryOverdueCommand {
    async fn execute(&self, req: QueryOverdueCommandRequest) -> Result<QueryOverdueCommandResponse, CommandError> {
        let page_size = req.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        self.circulation_service.query_overdue(&req.predicate(), req.page.as_deref(), page_size)
            .await.map_err(CommandError::from)
            .map(|res| QueryOverdueCommandResponse { borrows: res.records, next_page: res.next_page })
    }
}
