//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod class_sections;
mod courses;
mod enrollments;
mod files;
mod grades;
mod internship_documents;
mod internships;
mod subjects;
mod system_settings;
mod teacher_assignments;
mod users;

#[cfg(test)]
mod tests;

use super::Storage;
use crate::config::AppConfig;
use crate::errors::{CeepSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

use crate::models::{
    class_sections::{
        entities::ClassSection,
        requests::{ClassSectionListQuery, NewClassSection},
    },
    courses::entities::Course,
    dashboard::responses::{PendingDocument, StatusCount},
    enrollments::{
        entities::{Enrollment, EnrollmentDetail},
        requests::SetEnrollment,
    },
    files::entities::StoredFile,
    grades::entities::Grade,
    internships::{
        entities::{DocumentStatus, DocumentType, Internship, InternshipDocument},
        requests::{CreateInternshipRequest, InternshipListQuery, UpdateInternshipRequest},
        responses::InternshipListResponse,
    },
    subjects::{entities::Subject, requests::UpdateSubjectRequest},
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
    teacher_assignments::{
        entities::{TeacherAssignment, TeacherAssignmentDetail},
        requests::AssignmentInput,
    },
    users::{
        entities::{Eixo, User, UserRole},
        requests::{NewUser, UserListQuery, UserUpdate},
        responses::UserListResponse,
    },
};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接创建存储，并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| CeepSystemError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CeepSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CeepSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CeepSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CeepSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误分类：唯一约束冲突为 Conflict，外键不存在为 Validation
pub(crate) fn db_error(context: &str, err: DbErr) -> CeepSystemError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            CeepSystemError::conflict(format!("{context}: 数据已存在 ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            CeepSystemError::validation(format!("{context}: 关联数据不存在 ({detail})"))
        }
        _ => CeepSystemError::database_operation(format!("{context}: {err}")),
    }
}

/// 分页参数规范化，返回 (page, size)
pub(crate) fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(10).clamp(1, 100) as u64;
    (page, size)
}

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn find_user_for_login(&self, identifier: &str) -> Result<Option<User>> {
        self.find_user_for_login_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_user_password(
        &self,
        id: i64,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool> {
        self.update_user_password_impl(id, password_hash, must_change_password).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<u64> {
        self.count_users_by_role_impl(role).await
    }

    // 课程模块
    async fn create_course(&self, name: &str, eixo: Eixo) -> Result<Course> {
        self.create_course_impl(name, eixo).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.list_courses_impl().await
    }

    async fn upsert_course(&self, name: &str, eixo: Eixo) -> Result<Course> {
        self.upsert_course_impl(name, eixo).await
    }

    async fn count_courses(&self) -> Result<u64> {
        self.count_courses_impl().await
    }

    // 班级模块
    async fn create_class_section(&self, section: NewClassSection) -> Result<ClassSection> {
        self.create_class_section_impl(section).await
    }

    async fn get_class_section_by_id(&self, id: i64) -> Result<Option<ClassSection>> {
        self.get_class_section_by_id_impl(id).await
    }

    async fn list_class_sections(&self, query: ClassSectionListQuery) -> Result<Vec<ClassSection>> {
        self.list_class_sections_impl(query).await
    }

    async fn upsert_class_section(&self, section: NewClassSection) -> Result<ClassSection> {
        self.upsert_class_section_impl(section).await
    }

    async fn count_class_sections(&self) -> Result<u64> {
        self.count_class_sections_impl().await
    }

    // 科目模块
    async fn create_subject(
        &self,
        name: &str,
        workload_hours: i32,
        class_section_ids: &[i64],
    ) -> Result<Subject> {
        self.create_subject_impl(name, workload_hours, class_section_ids).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_or_create_subject(&self, name: &str) -> Result<Subject> {
        self.get_or_create_subject_impl(name).await
    }

    async fn list_subject_section_ids(&self, subject_id: i64) -> Result<Vec<i64>> {
        self.list_subject_section_ids_impl(subject_id).await
    }

    async fn list_subjects_for_sections(&self, section_ids: &[i64]) -> Result<Vec<(i64, Subject)>> {
        self.list_subjects_for_sections_impl(section_ids).await
    }

    // 任课模块
    async fn create_teacher_assignment(
        &self,
        teacher_id: i64,
        input: AssignmentInput,
    ) -> Result<TeacherAssignment> {
        self.create_teacher_assignment_impl(teacher_id, input).await
    }

    async fn delete_teacher_assignments(&self, teacher_id: i64, ids: &[i64]) -> Result<u64> {
        self.delete_teacher_assignments_impl(teacher_id, ids).await
    }

    async fn list_teacher_assignments(
        &self,
        teacher_id: i64,
    ) -> Result<Vec<TeacherAssignmentDetail>> {
        self.list_teacher_assignments_impl(teacher_id).await
    }

    async fn list_assignments_by_subject(
        &self,
        subject_id: i64,
    ) -> Result<Vec<TeacherAssignmentDetail>> {
        self.list_assignments_by_subject_impl(subject_id).await
    }

    async fn get_teacher_assignment(&self, id: i64) -> Result<Option<TeacherAssignmentDetail>> {
        self.get_teacher_assignment_impl(id).await
    }

    async fn teacher_teaches_section(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section: &ClassSection,
    ) -> Result<bool> {
        self.teacher_teaches_section_impl(teacher_id, subject_id, section).await
    }

    // 注册模块
    async fn set_student_enrollment(&self, enrollment: SetEnrollment) -> Result<Enrollment> {
        self.set_student_enrollment_impl(enrollment).await
    }

    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentDetail>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn get_current_sections(&self, student_ids: &[i64]) -> Result<Vec<(i64, ClassSection)>> {
        self.get_current_sections_impl(student_ids).await
    }

    async fn list_section_students(&self, class_section_id: i64) -> Result<Vec<User>> {
        self.list_section_students_impl(class_section_id).await
    }

    async fn is_student_enrolled(&self, student_id: i64, class_section_id: i64) -> Result<bool> {
        self.is_student_enrolled_impl(student_id, class_section_id).await
    }

    async fn list_student_ids_by_eixo(&self, eixo: Eixo) -> Result<Vec<i64>> {
        self.list_student_ids_by_eixo_impl(eixo).await
    }

    async fn get_student_eixo(&self, student_id: i64) -> Result<Option<Eixo>> {
        self.get_student_eixo_impl(student_id).await
    }

    // 成绩模块
    async fn get_grade(
        &self,
        student_id: i64,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Option<Grade>> {
        self.get_grade_impl(student_id, subject_id, class_section_id).await
    }

    async fn save_grade(&self, grade: Grade) -> Result<Grade> {
        self.save_grade_impl(grade).await
    }

    async fn list_grades_for_section_subject(
        &self,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Vec<Grade>> {
        self.list_grades_for_section_subject_impl(subject_id, class_section_id).await
    }

    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>> {
        self.list_student_grades_impl(student_id).await
    }

    // 实习模块
    async fn create_internship(&self, req: CreateInternshipRequest) -> Result<Internship> {
        self.create_internship_impl(req).await
    }

    async fn update_internship(
        &self,
        id: i64,
        req: UpdateInternshipRequest,
    ) -> Result<Option<Internship>> {
        self.update_internship_impl(id, req).await
    }

    async fn get_internship_by_id(&self, id: i64) -> Result<Option<Internship>> {
        self.get_internship_by_id_impl(id).await
    }

    async fn get_internship_by_student(&self, student_id: i64) -> Result<Option<Internship>> {
        self.get_internship_by_student_impl(student_id).await
    }

    async fn list_internships(&self, query: InternshipListQuery) -> Result<InternshipListResponse> {
        self.list_internships_impl(query).await
    }

    async fn count_internships(&self) -> Result<u64> {
        self.count_internships_impl().await
    }

    // 实习文档模块
    async fn create_internship_document(
        &self,
        internship_id: i64,
        document_type: DocumentType,
        form_data: serde_json::Value,
        is_shared: bool,
    ) -> Result<InternshipDocument> {
        self.create_internship_document_impl(internship_id, document_type, form_data, is_shared).await
    }

    async fn get_internship_document(&self, id: i64) -> Result<Option<InternshipDocument>> {
        self.get_internship_document_impl(id).await
    }

    async fn list_internship_documents(
        &self,
        internship_id: i64,
    ) -> Result<Vec<InternshipDocument>> {
        self.list_internship_documents_impl(internship_id).await
    }

    async fn update_document_if_unchanged(
        &self,
        document: &InternshipDocument,
    ) -> Result<Option<InternshipDocument>> {
        self.update_document_if_unchanged_impl(document).await
    }

    async fn list_documents_by_status(
        &self,
        status: DocumentStatus,
        student_ids: Option<Vec<i64>>,
    ) -> Result<Vec<PendingDocument>> {
        self.list_documents_by_status_impl(status, student_ids).await
    }

    async fn count_documents_by_status(&self) -> Result<Vec<StatusCount>> {
        self.count_documents_by_status_impl().await
    }

    // 文件模块
    async fn create_file(&self, file: StoredFile) -> Result<StoredFile> {
        self.create_file_impl(file).await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<StoredFile>> {
        self.get_file_by_token_impl(token).await
    }

    // 系统设置模块
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }

    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>> {
        self.get_setting_by_key_impl(key).await
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        self.update_setting_impl(key, value, user_id, ip_address).await
    }

    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse> {
        self.list_setting_audits_impl(query).await
    }
}
