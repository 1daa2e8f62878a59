use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, PaymentStatus};
use crate::fines::domain::FineService;
use crate::fines::domain::model::FineEntity;
use crate::fines::dto::FineDto;
use crate::fines::repository::FineRepository;
use crate::gateway::events::EventPublisher;

pub(crate) struct FineServiceImpl {
    fine_repository: Box<dyn FineRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl FineServiceImpl {
    pub(crate) fn new(fine_repository: Box<dyn FineRepository>, events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            fine_repository,
            events_publisher,
        }
    }
}

#[async_trait]
impl FineService for FineServiceImpl {
    async fn assess_fine(&self, student_id: &str, borrow_id: &str, amount_cents: i64, reason: &str) -> LibraryResult<FineDto> {
        if amount_cents <= 0 {
            return Err(LibraryError::validation(
                format!("fine amount must be positive, got {}", amount_cents).as_str(), Some("400".to_string())));
        }
        let fine = FineEntity::new(student_id, borrow_id, amount_cents, reason);
        self.fine_repository.create(&fine).await?;
        let dto = FineDto::from(&fine);
        info!("assessed fine of {} cents for {}: {}", amount_cents, student_id, reason);
        let event = DomainEvent::added("fine_assessed", "fines", dto.fine_id.as_str(), &dto)?
            .with_metadata("student_id", student_id)
            .with_metadata("borrow_id", borrow_id);
        let _ = self.events_publisher.publish(&event).await?;
        Ok(dto)
    }

    async fn list_unpaid(&self, student_id: &str) -> LibraryResult<Vec<FineDto>> {
        let mut fines = self.fine_repository.find_by_student(student_id, Some(PaymentStatus::Unpaid)).await?;
        fines.sort_by(|a, b| b.assessed_at.cmp(&a.assessed_at));
        Ok(fines.iter().map(FineDto::from).collect())
    }

    async fn list_fines(&self, student_id: &str) -> LibraryResult<Vec<FineDto>> {
        let mut fines = self.fine_repository.find_by_student(student_id, None).await?;
        fines.sort_by(|a, b| b.assessed_at.cmp(&a.assessed_at));
        debug!("found {} fines for {}", fines.len(), student_id);
        Ok(fines.iter().map(FineDto::from).collect())
    }

    async fn outstanding_balance(&self, student_id: &str) -> LibraryResult<i64> {
        let fines = self.fine_repository.find_by_student(student_id, Some(PaymentStatus::Unpaid)).await?;
        Ok(fines.iter().map(|f| f.amount_cents).sum())
    }

    async fn pay(&self, student_id: &str, fine_id: &str) -> LibraryResult<FineDto> {
        let mut fine = self.fine_repository.get(fine_id).await?;
        if fine.student_id != student_id {
            return Err(LibraryError::not_granted(
                format!("fine {} does not belong to {}", fine_id, student_id).as_str(), Some("403".to_string())));
        }
        if fine.is_paid() {
            return Err(LibraryError::validation(
                format!("fine {} is already paid", fine_id).as_str(), Some("400".to_string())));
        }
        fine.payment_status = PaymentStatus::Paid;
        fine.paid_at = Some(Utc::now().naive_utc());
        self.fine_repository.update(&fine).await?;
        let dto = FineDto::from(&self.fine_repository.get(fine_id).await?);
        info!("{} paid fine {} of {} cents", student_id, fine_id, dto.amount_cents);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "fine_paid", "fines", fine_id, &dto)?).await?;
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, PaymentStatus};
    use crate::core::repository::RepositoryStore;
    use crate::fines::domain::FineService;
    use crate::fines::factory;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn FineService>> = AsyncOnce::new(async {
                factory::create_fine_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    #[tokio::test]
    async fn test_should_assess_and_pay_fines() {
        let fine_svc = SUT_SVC.get().await;
        let student = Uuid::new_v4().to_string();
        let late = fine_svc.assess_fine(student.as_str(), "borrow-1", 3000, "Overdue by 3 days")
            .await.expect("should assess fine");
        let lost = fine_svc.assess_fine(student.as_str(), "borrow-2", 1999, "Book lost - charged full price")
            .await.expect("should assess fine");
        assert_eq!(4999, fine_svc.outstanding_balance(student.as_str()).await.expect("should sum"));

        let paid = fine_svc.pay(student.as_str(), late.fine_id.as_str()).await.expect("should pay");
        assert_eq!(PaymentStatus::Paid, paid.payment_status);
        assert!(paid.paid_at.is_some());
        assert_eq!(1999, fine_svc.outstanding_balance(student.as_str()).await.expect("should sum"));
        let unpaid = fine_svc.list_unpaid(student.as_str()).await.expect("should list");
        assert_eq!(vec![lost.fine_id.to_string()], unpaid.iter().map(|f| f.fine_id.to_string()).collect::<Vec<String>>());
        assert_eq!(2, fine_svc.list_fines(student.as_str()).await.expect("should list").len());

        let res = fine_svc.pay(student.as_str(), late.fine_id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_not_pay_fine_of_other_student() {
        let fine_svc = SUT_SVC.get().await;
        let fine = fine_svc.assess_fine(Uuid::new_v4().to_string().as_str(), "borrow", 1000, "Overdue by 1 days")
            .await.expect("should assess fine");
        let res = fine_svc.pay("someone-else", fine.fine_id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotGranted { .. })));
        let res = fine_svc.pay("someone-else", "missing").await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_empty_fine() {
        let fine_svc = SUT_SVC.get().await;
        let res = fine_svc.assess_fine("student", "borrow", 0, "Returned on time").await;
        assert!(matches!(res, Err(LibraryError::Validation { .. })));
        assert_eq!(0, fine_svc.outstanding_balance(Uuid::new_v4().to_string().as_str()).await.expect("should sum"));
    }
}
