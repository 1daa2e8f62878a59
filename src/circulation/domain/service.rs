use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use crate::accounts::domain::{AccountService, Member};
use crate::books::domain::Book;
use crate::catalog::domain::CatalogService;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::model::BorrowEntity;
use crate::circulation::domain::penalty::{late_return, lost_book, Penalty};
use crate::circulation::dto::BorrowDto;
use crate::circulation::repository::BorrowRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BorrowStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::fines::domain::FineService;
use crate::gateway::events::EventPublisher;
use crate::utils::date::format_date;

pub(crate) struct CirculationServiceImpl {
    config: Configuration,
    borrow_repository: Box<dyn BorrowRepository>,
    account_service: Box<dyn AccountService>,
    catalog_service: Box<dyn CatalogService>,
    fine_service: Box<dyn FineService>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CirculationServiceImpl {
    pub(crate) fn new(config: &Configuration, borrow_repository: Box<dyn BorrowRepository>,
                      account_service: Box<dyn AccountService>, catalog_service: Box<dyn CatalogService>,
                      fine_service: Box<dyn FineService>, events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            borrow_repository,
            account_service,
            catalog_service,
            fine_service,
            events_publisher,
        }
    }

    async fn find_active(&self, borrow_id: &str) -> LibraryResult<BorrowEntity> {
        let borrow = self.borrow_repository.get(borrow_id).await?;
        if !borrow.is_active() {
            return Err(LibraryError::validation(
                format!("borrow {} is already {}", borrow_id, borrow.borrow_status).as_str(), Some("400".to_string())));
        }
        Ok(borrow)
    }

    // close stores the outcome of a borrow; the fine is assessed once the copy has moved
    async fn close(&self, borrow: &mut BorrowEntity, status: BorrowStatus, penalty: &Penalty) -> LibraryResult<BorrowEntity> {
        borrow.borrow_status = status;
        borrow.fine_cents = penalty.amount_cents;
        borrow.fine_reason = Some(penalty.reason.to_string());
        self.borrow_repository.update(borrow).await?;
        self.borrow_repository.get(borrow.borrow_id.as_str()).await
    }

    // reopen puts a closed borrow back on loan when the catalog could not move its copy
    async fn reopen(&self, borrow_id: &str, err: LibraryError) -> LibraryError {
        warn!("reopening borrow {} after catalog failure: {}", borrow_id, err);
        let reopened = match self.borrow_repository.get(borrow_id).await {
            Ok(mut borrow) => {
                borrow.borrow_status = BorrowStatus::Borrowed;
                borrow.returned_at = None;
                borrow.fine_cents = 0;
                borrow.fine_reason = None;
                self.borrow_repository.update(&borrow).await.map(|_| ())
            }
            Err(get_err) => Err(get_err),
        };
        if let Err(reopen_err) = reopened {
            warn!("could not reopen borrow {}: {}", borrow_id, reopen_err);
        }
        err
    }

    async fn assess(&self, borrow: &BorrowEntity, penalty: &Penalty) -> LibraryResult<()> {
        if penalty.amount_cents > 0 {
            let _ = self.fine_service.assess_fine(borrow.student_id.as_str(), borrow.borrow_id.as_str(),
                                                  penalty.amount_cents, penalty.reason.as_str()).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl CirculationService for CirculationServiceImpl {
    async fn borrow(&self, student_id: &str, book_id: &str) -> LibraryResult<BorrowDto> {
        let student = self.account_service.find_member_by_id(student_id).await?;
        if !student.is_student() {
            return Err(LibraryError::validation(
                format!("only students can borrow, {} is a {}", student.username, student.member_role).as_str(),
                Some("400".to_string())));
        }
        let book = self.catalog_service.find_book_by_id(book_id).await?;
        let active = self.borrow_repository.find_by_status(BorrowStatus::Borrowed, Some(student_id), Some(book_id)).await?;
        if !active.is_empty() {
            return Err(LibraryError::duplicate_key(
                format!("{} already borrowed {}", student.username, book.title()).as_str()));
        }
        if book.available_copies() < 1 {
            let outstanding = self.borrow_repository.find_by_status(BorrowStatus::Borrowed, None, Some(book_id)).await?;
            let message = match outstanding.iter().map(|b| b.due_at).min() {
                Some(due_at) => format!("no copy of {} is available, the next one is due on {}", book.title(), due_at.date()),
                None => format!("no copy of {} is available", book.title()),
            };
            return Err(LibraryError::validation(message.as_str(), Some("400".to_string())));
        }

        let _ = self.catalog_service.check_out_copy(book_id).await?;
        let borrow = BorrowEntity::new(self.config.branch_id.as_str(), student_id, book_id,
                                       book.title.as_str(), self.config.book_loan_days);
        if let Err(err) = self.borrow_repository.create(&borrow).await {
            warn!("restoring copy of {} after failing to record borrow: {}", book_id, err);
            let _ = self.catalog_service.check_in_copy(book_id).await?;
            return Err(err);
        }
        let dto = BorrowDto::from(&borrow);
        info!("{} borrowed {} until {}", student.username, book.title, format_date(dto.due_at));
        let event = DomainEvent::added("book_borrowed", "circulation", dto.borrow_id.as_str(), &dto)?
            .with_metadata("student_id", student_id)
            .with_metadata("book_id", book_id);
        let _ = self.events_publisher.publish(&event).await?;
        Ok(dto)
    }

    async fn return_book(&self, borrow_id: &str) -> LibraryResult<BorrowDto> {
        let mut borrow = self.find_active(borrow_id).await?;
        let now = Utc::now().naive_utc();
        let penalty = late_return(&self.config, borrow.due_at, now);
        borrow.returned_at = Some(now);
        let closed = self.close(&mut borrow, BorrowStatus::Returned, &penalty).await?;
        match self.catalog_service.check_in_copy(closed.book_id.as_str()).await {
            Ok(_) => {}
            Err(LibraryError::NotFound { .. }) => {
                warn!("returned {} is no longer in the catalog", closed.book_title);
            }
            Err(err) => return Err(self.reopen(borrow_id, err).await),
        }
        self.assess(&closed, &penalty).await?;
        let dto = BorrowDto::from(&closed);
        info!("{} returned {} with fine {}", dto.student_id, dto.book_title, dto.fine_cents);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_returned", "circulation", borrow_id, &dto)?).await?;
        Ok(dto)
    }

    async fn report_lost(&self, borrow_id: &str) -> LibraryResult<BorrowDto> {
        let mut borrow = self.find_active(borrow_id).await?;
        let book = self.catalog_service.find_book_by_id(borrow.book_id.as_str()).await?;
        let penalty = lost_book(book.price_cents());
        let closed = self.close(&mut borrow, BorrowStatus::Lost, &penalty).await?;
        match self.catalog_service.write_off_copy(closed.book_id.as_str()).await {
            Ok(Some(_)) => {}
            Ok(None) => info!("last copy of {} was lost", closed.book_title),
            Err(err) => return Err(self.reopen(borrow_id, err).await),
        }
        self.assess(&closed, &penalty).await?;
        let dto = BorrowDto::from(&closed);
        info!("{} lost {}, charged {}", dto.student_id, dto.book_title, dto.fine_cents);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_lost", "circulation", borrow_id, &dto)?).await?;
        Ok(dto)
    }

    async fn list_borrowed(&self, student_id: Option<&str>) -> LibraryResult<Vec<BorrowDto>> {
        let borrows = self.borrow_repository.find_by_status(BorrowStatus::Borrowed, student_id, None).await?;
        Ok(borrows.iter().map(BorrowDto::from).collect())
    }

    async fn book_history(&self, book_id: &str) -> LibraryResult<Vec<BorrowDto>> {
        let mut borrows = vec![];
        for status in BorrowStatus::all() {
            borrows.extend(self.borrow_repository.find_by_status(status, None, Some(book_id)).await?);
        }
        borrows.sort_by(|a, b| b.borrowed_at.cmp(&a.borrowed_at));
        debug!("found {} borrows of {}", borrows.len(), book_id);
        Ok(borrows.iter().map(BorrowDto::from).collect())
    }

    async fn query_overdue(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowDto>> {
        let res = self.borrow_repository.find_overdue(predicate, Utc::now().naive_utc(), page, page_size).await?;
        let records = res.records.iter().map(BorrowDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}
