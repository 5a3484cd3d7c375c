//! SeaORM 存储层与领域核心的集成测试（SQLite 内存库与文件库）

use std::sync::Arc;

use rust_campus_next::config::{ClassConfig, DatabaseConfig};
use rust_campus_next::domain::{
    AdmissionError, AllocationError, CodeGenerator, EnrollmentAdmission, InviteCodeAllocator,
};
use rust_campus_next::errors::CampusError;
use rust_campus_next::models::{
    classes::{
        entities::{Class, ClassStatus},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
    },
    departments::requests::CreateDepartmentRequest,
    enrollments::{entities::EnrollmentInsert, requests::EnrollmentListQuery},
    stats::{entities::OccupancyLevel, responses::OccupancyReport},
    subjects::requests::CreateSubjectRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use rust_campus_next::storage::{RosterStore, Storage, sea_orm_storage::SeaOrmStorage};

async fn storage() -> Arc<SeaOrmStorage> {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(SeaOrmStorage::connect(&config).await.unwrap())
}

/// 文件库（WAL，多连接），返回的目录需在测试期间保持存活
async fn file_storage(pool_size: u32) -> (tempfile::TempDir, Arc<SeaOrmStorage>) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig {
        url: dir.path().join("campus.db").to_string_lossy().into_owned(),
        pool_size,
        timeout: 10,
    };
    let storage = Arc::new(SeaOrmStorage::connect(&config).await.unwrap());
    (dir, storage)
}

async fn add_user(storage: &SeaOrmStorage, id: &str, role: UserRole) {
    storage
        .create_user(CreateUserRequest {
            id: Some(id.to_string()),
            name: id.to_string(),
            email: format!("{id}@school.test"),
            role,
            image: None,
        })
        .await
        .unwrap();
}

/// 建立院系、科目与教师，返回科目 ID
async fn seed_subject(storage: &SeaOrmStorage) -> i64 {
    let department = storage
        .create_department(CreateDepartmentRequest {
            code: "CS".to_string(),
            name: "Computer Science".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let subject = storage
        .create_subject(CreateSubjectRequest {
            department_id: department.id,
            code: "CS101".to_string(),
            name: "Intro to Programming".to_string(),
            description: None,
        })
        .await
        .unwrap();
    add_user(storage, "t1", UserRole::Teacher).await;
    subject.id
}

async fn add_class(
    storage: &SeaOrmStorage,
    subject_id: i64,
    name: &str,
    capacity: i32,
    code: &str,
) -> Class {
    storage
        .create_class(
            CreateClassRequest {
                subject_id,
                teacher_id: "t1".to_string(),
                name: name.to_string(),
                description: None,
                capacity,
                status: None,
            },
            code.to_string(),
        )
        .await
        .unwrap()
}

struct FixedCodes(Vec<&'static str>, std::sync::atomic::AtomicUsize);

impl CodeGenerator for FixedCodes {
    fn generate(&self) -> String {
        let i = self.1.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.0[i.min(self.0.len() - 1)].to_string()
    }
}

#[tokio::test]
async fn class_defaults_to_active_with_given_code() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;

    let class = add_class(&storage, subject_id, "Section A", 30, "ABC123").await;
    assert_eq!(class.status, ClassStatus::Active);
    assert_eq!(class.invite_code, "ABC123");

    let by_code = storage.get_class_by_code("ABC123").await.unwrap().unwrap();
    assert_eq!(by_code.id, class.id);
    assert!(storage.class_with_invite_code_exists("ABC123").await.unwrap());
    assert!(!storage.class_with_invite_code_exists("ZZZ999").await.unwrap());
}

#[tokio::test]
async fn duplicate_invite_code_is_a_conflict() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    add_class(&storage, subject_id, "Section A", 30, "SAME01").await;

    let err = storage
        .create_class(
            CreateClassRequest {
                subject_id,
                teacher_id: "t1".to_string(),
                name: "Section B".to_string(),
                description: None,
                capacity: 30,
                status: None,
            },
            "SAME01".to_string(),
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "{err}");
}

#[tokio::test]
async fn allocator_skips_codes_held_in_database() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    add_class(&storage, subject_id, "Section A", 30, "TAKEN1").await;

    let allocator = InviteCodeAllocator::with_generator(
        storage.clone(),
        Box::new(FixedCodes(vec!["TAKEN1", "FRESH1"], Default::default())),
        5,
    );
    assert_eq!(allocator.allocate_unique().await.unwrap(), "FRESH1");

    let stuck = InviteCodeAllocator::with_generator(
        storage.clone(),
        Box::new(FixedCodes(vec!["TAKEN1"], Default::default())),
        3,
    );
    assert_eq!(
        stuck.allocate_unique().await.unwrap_err(),
        AllocationError::Exhausted { attempts: 3 }
    );

    let random = InviteCodeAllocator::new(storage.clone(), &ClassConfig::default());
    let code = random.allocate_unique().await.unwrap();
    assert_eq!(code.len(), 6);
}

#[tokio::test]
async fn conditional_insert_outcomes() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Tiny", 1, "TINY01").await;
    add_user(&storage, "s1", UserRole::Student).await;
    add_user(&storage, "s2", UserRole::Student).await;

    assert_eq!(
        storage.insert_enrollment("s1", 999).await.unwrap(),
        EnrollmentInsert::ClassMissing
    );

    let EnrollmentInsert::Created(id) = storage.insert_enrollment("s1", class.id).await.unwrap()
    else {
        panic!("expected enrollment to be created");
    };
    let found = storage.find_enrollment("s1", class.id).await.unwrap().unwrap();
    assert_eq!(found.id, id);

    assert_eq!(
        storage.insert_enrollment("s2", class.id).await.unwrap(),
        EnrollmentInsert::ClassFull
    );

    // 扩容后重复写入由唯一索引拦截
    storage
        .update_class(
            class.id,
            UpdateClassRequest {
                subject_id: None,
                teacher_id: None,
                name: None,
                description: None,
                capacity: Some(5),
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(
        storage.insert_enrollment("s1", class.id).await.unwrap(),
        EnrollmentInsert::AlreadyEnrolled
    );
    assert_eq!(storage.count_enrollments(class.id).await.unwrap(), 1);
}

#[tokio::test]
async fn admission_against_database() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Pair", 2, "PAIR01").await;
    for id in ["a", "b", "c"] {
        add_user(&storage, id, UserRole::Student).await;
    }
    let admission = EnrollmentAdmission::new(storage.clone());

    let first = admission.admit("a", class.id).await.unwrap();
    assert!(first > 0);
    assert_eq!(
        admission.admit("a", class.id).await,
        Err(AdmissionError::DuplicateEnrollment)
    );
    admission.admit("b", class.id).await.unwrap();

    let err = admission.admit("c", class.id).await.unwrap_err();
    assert_eq!(err, AdmissionError::CapacityExceeded { capacity: 2 });
    assert!(err.to_string().contains('2'));

    assert_eq!(
        admission.admit("c", 999).await,
        Err(AdmissionError::InvalidClass)
    );
}

#[tokio::test]
async fn inactive_class_rejects_admission() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = storage
        .create_class(
            CreateClassRequest {
                subject_id,
                teacher_id: "t1".to_string(),
                name: "Closed".to_string(),
                description: None,
                capacity: 10,
                status: Some(ClassStatus::Inactive),
            },
            "CLOSED".to_string(),
        )
        .await
        .unwrap();
    add_user(&storage, "s1", UserRole::Student).await;

    let admission = EnrollmentAdmission::new(storage.clone());
    assert_eq!(
        admission.admit("s1", class.id).await,
        Err(AdmissionError::ClassNotOpen)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_admissions_respect_capacity() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Popular", 3, "POP001").await;
    for i in 0..10 {
        add_user(&storage, &format!("s{i}"), UserRole::Student).await;
    }
    let admission = Arc::new(EnrollmentAdmission::new(storage.clone()));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let admission = admission.clone();
            let class_id = class.id;
            tokio::spawn(async move { admission.admit(&format!("s{i}"), class_id).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            admitted += 1;
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(storage.count_enrollments(class.id).await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_admissions_on_pooled_file_database() {
    let (_dir, storage) = file_storage(8).await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Last Seats", 3, "LAST01").await;
    for i in 0..30 {
        add_user(&storage, &format!("s{i}"), UserRole::Student).await;
    }
    let admission = Arc::new(EnrollmentAdmission::new(storage.clone()));

    let handles: Vec<_> = (0..30)
        .map(|i| {
            let admission = admission.clone();
            let class_id = class.id;
            tokio::spawn(async move { admission.admit(&format!("s{i}"), class_id).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(AdmissionError::CapacityExceeded { capacity }) => assert_eq!(capacity, 3),
            Err(other) => panic!("unexpected admission error: {other}"),
        }
    }

    assert_eq!(admitted, 3);
    assert_eq!(storage.count_enrollments(class.id).await.unwrap(), 3);
}

#[tokio::test]
async fn class_with_enrollments_cannot_be_deleted() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Section A", 30, "SECA01").await;
    add_user(&storage, "s1", UserRole::Student).await;
    storage.insert_enrollment("s1", class.id).await.unwrap();

    // 绕过服务层的计数检查，外键约束仍然拒绝删除
    let err = storage.delete_class(class.id).await.unwrap_err();
    assert!(matches!(err, CampusError::Validation(_)), "{err}");
    assert!(storage.get_class_by_id(class.id).await.unwrap().is_some());
    assert_eq!(storage.count_enrollments(class.id).await.unwrap(), 1);
}

#[tokio::test]
async fn class_search_matches_name_or_invite_code() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    add_class(&storage, subject_id, "Morning Lab", 30, "MRN001").await;
    add_class(&storage, subject_id, "Evening Lab", 30, "EVN002").await;
    add_class(&storage, subject_id, "Seminar", 30, "SEM003").await;

    let by_name = storage
        .list_classes_with_pagination(ClassListQuery {
            search: Some("Lab".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.pagination.total, 2);

    let by_code = storage
        .list_classes_with_pagination(ClassListQuery {
            search: Some("SEM".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_code.items.len(), 1);
    assert_eq!(by_code.items[0].name, "Seminar");

    let paged = storage
        .list_classes_with_pagination(ClassListQuery {
            page: Some(2),
            size: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(paged.items.len(), 1);
    assert_eq!(paged.pagination.total_pages, 2);

    // LIKE 通配符按字面量匹配
    let wildcard = storage
        .list_classes_with_pagination(ClassListQuery {
            search: Some("%".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(wildcard.pagination.total, 0);
}

#[tokio::test]
async fn enrollment_listing_and_deletion() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let class = add_class(&storage, subject_id, "Section A", 30, "SECA01").await;
    add_user(&storage, "s1", UserRole::Student).await;
    add_user(&storage, "s2", UserRole::Student).await;
    storage.insert_enrollment("s1", class.id).await.unwrap();
    storage.insert_enrollment("s2", class.id).await.unwrap();

    let for_s1 = storage
        .list_enrollments_with_pagination(EnrollmentListQuery {
            student_id: Some("s1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(for_s1.items.len(), 1);

    let id = for_s1.items[0].id;
    assert!(storage.delete_enrollment(id).await.unwrap());
    assert!(!storage.delete_enrollment(id).await.unwrap());
    assert!(storage.get_enrollment_by_id(id).await.unwrap().is_none());
    assert_eq!(storage.count_enrollments(class.id).await.unwrap(), 1);
}

#[tokio::test]
async fn statistics_reflect_enrollments() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    let full = add_class(&storage, subject_id, "Full", 1, "FULL01").await;
    add_class(&storage, subject_id, "Empty", 10, "EMPT01").await;
    add_user(&storage, "s1", UserRole::Student).await;
    storage.insert_enrollment("s1", full.id).await.unwrap();

    let overview = storage.stats_overview().await.unwrap();
    assert_eq!(overview.total_users, 2);
    assert_eq!(overview.classes, 2);
    assert_eq!(overview.active_classes, 2);
    assert_eq!(overview.enrollments, 1);
    let teachers = overview
        .users_by_role
        .iter()
        .find(|r| r.role == UserRole::Teacher)
        .unwrap();
    assert_eq!(teachers.count, 1);

    let report = OccupancyReport::from_rows(storage.list_class_occupancy().await.unwrap());
    assert_eq!(report.summary.full, 1);
    assert_eq!(report.summary.empty, 1);
    assert_eq!(report.items[0].level, OccupancyLevel::Full);

    let departments = storage.list_department_stats().await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].subject_count, 1);
    assert_eq!(departments[0].class_count, 2);
    assert_eq!(departments[0].enrollment_count, 1);
}

#[tokio::test]
async fn unique_email_and_dependent_counts() {
    let storage = storage().await;
    let subject_id = seed_subject(&storage).await;
    add_class(&storage, subject_id, "Section A", 30, "SECA01").await;

    let err = storage
        .create_user(CreateUserRequest {
            id: None,
            name: "Copy".to_string(),
            email: "t1@school.test".to_string(),
            role: UserRole::Student,
            image: None,
        })
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    assert_eq!(storage.count_classes_taught("t1").await.unwrap(), 1);
    assert_eq!(storage.count_classes_for_subject(subject_id).await.unwrap(), 1);

    let subject = storage.get_subject_by_id(subject_id).await.unwrap().unwrap();
    assert_eq!(
        storage
            .count_subjects_in_department(subject.department_id)
            .await
            .unwrap(),
        1
    );
}
