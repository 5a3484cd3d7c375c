//! 选课准入
//!
//! 检查顺序固定：班级存在 -> 班级开放 -> 容量 -> 学生存在 -> 重复选课 -> 写入。
//! 任何一步失败立即返回，后续存储调用不会发生。

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::errors::CampusError;
use crate::models::enrollments::entities::EnrollmentInsert;
use crate::storage::RosterStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("class does not exist")]
    InvalidClass,
    #[error("class is not open for enrollment")]
    ClassNotOpen,
    #[error("class is full (capacity {capacity})")]
    CapacityExceeded { capacity: i32 },
    #[error("student does not exist")]
    InvalidStudent,
    #[error("student is already enrolled in this class")]
    DuplicateEnrollment,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<CampusError> for AdmissionError {
    fn from(err: CampusError) -> Self {
        AdmissionError::StorageUnavailable(err.to_string())
    }
}

pub struct EnrollmentAdmission<S: RosterStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RosterStore + ?Sized> EnrollmentAdmission<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 将学生加入班级，成功时返回新选课记录的 ID
    pub async fn admit(&self, student_id: &str, class_id: i64) -> Result<i64, AdmissionError> {
        let class = self
            .store
            .get_class_by_id(class_id)
            .await?
            .ok_or(AdmissionError::InvalidClass)?;

        if !class.status.is_open() {
            return Err(AdmissionError::ClassNotOpen);
        }

        let enrolled = self.store.count_enrollments(class_id).await?;
        if enrolled >= i64::from(class.capacity) {
            return Err(AdmissionError::CapacityExceeded {
                capacity: class.capacity,
            });
        }

        if self.store.get_user_by_id(student_id).await?.is_none() {
            return Err(AdmissionError::InvalidStudent);
        }

        if self
            .store
            .find_enrollment(student_id, class_id)
            .await?
            .is_some()
        {
            return Err(AdmissionError::DuplicateEnrollment);
        }

        // 写入时存储层会重新核对容量与唯一性
        match self.store.insert_enrollment(student_id, class_id).await? {
            EnrollmentInsert::Created(id) => {
                info!(
                    "Student {} enrolled in class {} (enrollment {})",
                    student_id, class_id, id
                );
                Ok(id)
            }
            EnrollmentInsert::ClassFull => {
                debug!("Class {} filled up before insert", class_id);
                Err(AdmissionError::CapacityExceeded {
                    capacity: class.capacity,
                })
            }
            EnrollmentInsert::ClassMissing => Err(AdmissionError::InvalidClass),
            EnrollmentInsert::AlreadyEnrolled => Err(AdmissionError::DuplicateEnrollment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::entities::ClassStatus;
    use crate::storage::memory::MemoryRoster;

    fn admission(store: &Arc<MemoryRoster>) -> EnrollmentAdmission<MemoryRoster> {
        EnrollmentAdmission::new(store.clone())
    }

    #[tokio::test]
    async fn test_admit_then_find() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(7, 30, ClassStatus::Active)
                .with_student("s1"),
        );

        let id = admission(&store).admit("s1", 7).await.unwrap();

        let found = store.find_enrollment("s1", 7).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.class_id, 7);
        assert_eq!(found.student_id, "s1");
    }

    #[tokio::test]
    async fn test_second_admit_is_duplicate() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(7, 30, ClassStatus::Active)
                .with_student("s1"),
        );
        let admission = admission(&store);

        assert!(admission.admit("s1", 7).await.is_ok());
        assert_eq!(
            admission.admit("s1", 7).await,
            Err(AdmissionError::DuplicateEnrollment)
        );
        assert_eq!(store.enrolled(7), 1);
    }

    #[tokio::test]
    async fn test_unknown_class_skips_other_lookups() {
        let store = Arc::new(MemoryRoster::new().with_student("s1"));

        assert_eq!(
            admission(&store).admit("s1", 999).await,
            Err(AdmissionError::InvalidClass)
        );
        assert_eq!(store.calls(), vec!["get_class_by_id"]);
    }

    #[tokio::test]
    async fn test_closed_class_checked_before_capacity() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(3, 1, ClassStatus::Inactive)
                .with_student("s1")
                .with_student("s2")
                .with_enrollment("s2", 3),
        );

        assert_eq!(
            admission(&store).admit("s1", 3).await,
            Err(AdmissionError::ClassNotOpen)
        );
        assert!(!store.calls().contains(&"count_enrollments"));
    }

    #[tokio::test]
    async fn test_archived_class_not_open() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(4, 10, ClassStatus::Archived)
                .with_student("s1"),
        );

        assert_eq!(
            admission(&store).admit("s1", 4).await,
            Err(AdmissionError::ClassNotOpen)
        );
    }

    #[tokio::test]
    async fn test_full_class_reports_capacity() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(5, 2, ClassStatus::Active)
                .with_student("a")
                .with_student("b")
                .with_student("c")
                .with_enrollment("a", 5)
                .with_enrollment("b", 5),
        );

        let err = admission(&store).admit("c", 5).await.unwrap_err();
        assert_eq!(err, AdmissionError::CapacityExceeded { capacity: 2 });
        assert!(err.to_string().contains('2'));
        assert!(!store.calls().contains(&"get_user_by_id"));
    }

    #[tokio::test]
    async fn test_unknown_student() {
        let store = Arc::new(MemoryRoster::new().with_class(7, 30, ClassStatus::Active));

        assert_eq!(
            admission(&store).admit("ghost", 7).await,
            Err(AdmissionError::InvalidStudent)
        );
        assert!(!store.calls().contains(&"insert_enrollment"));
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(7, 30, ClassStatus::Active)
                .with_student("s1"),
        );
        store.set_failing(true);

        assert!(matches!(
            admission(&store).admit("s1", 7).await,
            Err(AdmissionError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_check_order_on_success() {
        let store = Arc::new(
            MemoryRoster::new()
                .with_class(7, 30, ClassStatus::Active)
                .with_student("s1"),
        );

        admission(&store).admit("s1", 7).await.unwrap();
        assert_eq!(
            store.calls(),
            vec![
                "get_class_by_id",
                "count_enrollments",
                "get_user_by_id",
                "find_enrollment",
                "insert_enrollment",
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_admissions_never_exceed_capacity() {
        let mut store = MemoryRoster::new().with_class(9, 3, ClassStatus::Active);
        for i in 0..20 {
            store = store.with_student(&format!("s{i}"));
        }
        let store = Arc::new(store);
        let admission = Arc::new(EnrollmentAdmission::new(store.clone()));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let admission = admission.clone();
                tokio::spawn(async move { admission.admit(&format!("s{i}"), 9).await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(err) => assert_eq!(err, AdmissionError::CapacityExceeded { capacity: 3 }),
            }
        }

        assert_eq!(admitted, 3);
        assert_eq!(store.enrolled(9), 3);
    }
}
