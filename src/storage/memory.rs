//! 测试用内存 RosterStore

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::RosterStore;
use crate::errors::{CampusError, Result};
use crate::models::{
    classes::entities::{Class, ClassStatus},
    enrollments::entities::{Enrollment, EnrollmentInsert},
    users::entities::{User, UserRole},
};

#[derive(Default)]
struct State {
    classes: HashMap<i64, Class>,
    users: HashMap<String, User>,
    enrollments: Vec<Enrollment>,
    taken_codes: HashSet<String>,
    next_enrollment_id: i64,
}

/// 内存实现，记录每次调用的方法名，可切换为持续失败
#[derive(Default)]
pub(crate) struct MemoryRoster {
    state: Mutex<State>,
    calls: Mutex<Vec<&'static str>>,
    failing: AtomicBool,
}

impl MemoryRoster {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_class(self, id: i64, capacity: i32, status: ClassStatus) -> Self {
        let now = chrono::Utc::now();
        let class = Class {
            id,
            subject_id: 1,
            teacher_id: "teacher".to_string(),
            name: format!("class-{id}"),
            description: None,
            capacity,
            status,
            invite_code: format!("CODE{id:02}"),
            created_at: now,
            updated_at: now,
        };
        {
            let mut state = self.state.lock().unwrap();
            state.taken_codes.insert(class.invite_code.clone());
            state.classes.insert(id, class);
        }
        self
    }

    pub(crate) fn with_student(self, id: &str) -> Self {
        let now = chrono::Utc::now();
        let user = User {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@school.test"),
            role: UserRole::Student,
            image: None,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .users
            .insert(id.to_string(), user);
        self
    }

    pub(crate) fn with_enrollment(self, student_id: &str, class_id: i64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_enrollment_id += 1;
            let id = state.next_enrollment_id;
            state.enrollments.push(Enrollment {
                id,
                class_id,
                student_id: student_id.to_string(),
                created_at: chrono::Utc::now(),
            });
        }
        self
    }

    pub(crate) fn with_taken_code(self, code: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .taken_codes
            .insert(code.to_string());
        self
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn enrolled(&self, class_id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .enrollments
            .iter()
            .filter(|e| e.class_id == class_id)
            .count()
    }

    fn record(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CampusError::database_connection("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl RosterStore for MemoryRoster {
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.record("get_class_by_id")?;
        Ok(self.state.lock().unwrap().classes.get(&class_id).cloned())
    }

    async fn count_enrollments(&self, class_id: i64) -> Result<i64> {
        self.record("count_enrollments")?;
        let count = self.enrolled(class_id) as i64;
        // 让出执行权，使并发选课在检查与写入之间交错
        tokio::task::yield_now().await;
        Ok(count)
    }

    async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.record("get_user_by_id")?;
        Ok(self.state.lock().unwrap().users.get(user_id).cloned())
    }

    async fn find_enrollment(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.record("find_enrollment")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.class_id == class_id)
            .cloned())
    }

    async fn insert_enrollment(
        &self,
        student_id: &str,
        class_id: i64,
    ) -> Result<EnrollmentInsert> {
        self.record("insert_enrollment")?;
        let mut state = self.state.lock().unwrap();

        let Some(capacity) = state.classes.get(&class_id).map(|c| c.capacity) else {
            return Ok(EnrollmentInsert::ClassMissing);
        };

        let in_class: Vec<&Enrollment> = state
            .enrollments
            .iter()
            .filter(|e| e.class_id == class_id)
            .collect();
        if in_class.len() as i64 >= i64::from(capacity) {
            return Ok(EnrollmentInsert::ClassFull);
        }
        if in_class.iter().any(|e| e.student_id == student_id) {
            return Ok(EnrollmentInsert::AlreadyEnrolled);
        }

        state.next_enrollment_id += 1;
        let id = state.next_enrollment_id;
        state.enrollments.push(Enrollment {
            id,
            class_id,
            student_id: student_id.to_string(),
            created_at: chrono::Utc::now(),
        });
        Ok(EnrollmentInsert::Created(id))
    }

    async fn class_with_invite_code_exists(&self, invite_code: &str) -> Result<bool> {
        self.record("class_with_invite_code_exists")?;
        Ok(self.state.lock().unwrap().taken_codes.contains(invite_code))
    }
}
