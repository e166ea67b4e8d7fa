use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 登录查找：学号/用户名，管理员还可以用名或姓（均不区分大小写）
    async fn find_user_for_login(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UserUpdate) -> Result<Option<User>>;
    // 更新密码
    async fn update_user_password(
        &self,
        id: i64,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 按角色统计用户数量
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(&self, name: &str, eixo: Eixo) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    // 按名称创建或更新（初始化数据用）
    async fn upsert_course(&self, name: &str, eixo: Eixo) -> Result<Course>;
    async fn count_courses(&self) -> Result<u64>;

    /// 班级管理方法
    async fn create_class_section(&self, section: NewClassSection) -> Result<ClassSection>;
    async fn get_class_section_by_id(&self, id: i64) -> Result<Option<ClassSection>>;
    async fn list_class_sections(&self, query: ClassSectionListQuery)
    -> Result<Vec<ClassSection>>;
    // 按唯一键创建或更新教室信息（初始化数据用）
    async fn upsert_class_section(&self, section: NewClassSection) -> Result<ClassSection>;
    async fn count_class_sections(&self) -> Result<u64>;

    /// 科目管理方法
    async fn create_subject(
        &self,
        name: &str,
        workload_hours: i32,
        class_section_ids: &[i64],
    ) -> Result<Subject>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 按名称获取，不存在则创建（初始化数据用）
    async fn get_or_create_subject(&self, name: &str) -> Result<Subject>;
    // 开设某科目的班级
    async fn list_subject_section_ids(&self, subject_id: i64) -> Result<Vec<i64>>;
    // 一组班级开设的科目，返回 (班级ID, 科目)
    async fn list_subjects_for_sections(&self, section_ids: &[i64])
    -> Result<Vec<(i64, Subject)>>;

    /// 任课管理方法
    async fn create_teacher_assignment(
        &self,
        teacher_id: i64,
        input: AssignmentInput,
    ) -> Result<TeacherAssignment>;
    // 删除教师的指定任课，返回删除数量
    async fn delete_teacher_assignments(&self, teacher_id: i64, ids: &[i64]) -> Result<u64>;
    async fn list_teacher_assignments(&self, teacher_id: i64)
    -> Result<Vec<TeacherAssignmentDetail>>;
    async fn list_assignments_by_subject(
        &self,
        subject_id: i64,
    ) -> Result<Vec<TeacherAssignmentDetail>>;
    async fn get_teacher_assignment(&self, id: i64) -> Result<Option<TeacherAssignmentDetail>>;
    // 教师是否在某班级教授某科目
    async fn teacher_teaches_section(
        &self,
        teacher_id: i64,
        subject_id: i64,
        section: &ClassSection,
    ) -> Result<bool>;

    /// 学生注册方法
    // 设置学生班级（替换已有注册）
    async fn set_student_enrollment(&self, enrollment: SetEnrollment) -> Result<Enrollment>;
    async fn list_student_enrollments(&self, student_id: i64) -> Result<Vec<EnrollmentDetail>>;
    // 一组学生的当前班级，返回 (学生ID, 班级)
    async fn get_current_sections(&self, student_ids: &[i64])
    -> Result<Vec<(i64, ClassSection)>>;
    async fn list_section_students(&self, class_section_id: i64) -> Result<Vec<User>>;
    async fn is_student_enrolled(&self, student_id: i64, class_section_id: i64) -> Result<bool>;
    // 课程属于某方向的学生
    async fn list_student_ids_by_eixo(&self, eixo: Eixo) -> Result<Vec<i64>>;
    // 学生当前课程的方向
    async fn get_student_eixo(&self, student_id: i64) -> Result<Option<Eixo>>;

    /// 成绩管理方法
    async fn get_grade(
        &self,
        student_id: i64,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Option<Grade>>;
    // 按 (学生, 科目, 班级) 插入或更新
    async fn save_grade(&self, grade: Grade) -> Result<Grade>;
    async fn list_grades_for_section_subject(
        &self,
        subject_id: i64,
        class_section_id: i64,
    ) -> Result<Vec<Grade>>;
    async fn list_student_grades(&self, student_id: i64) -> Result<Vec<Grade>>;

    /// 实习档案方法
    async fn create_internship(&self, req: CreateInternshipRequest) -> Result<Internship>;
    async fn update_internship(
        &self,
        id: i64,
        req: UpdateInternshipRequest,
    ) -> Result<Option<Internship>>;
    async fn get_internship_by_id(&self, id: i64) -> Result<Option<Internship>>;
    async fn get_internship_by_student(&self, student_id: i64) -> Result<Option<Internship>>;
    async fn list_internships(&self, query: InternshipListQuery) -> Result<InternshipListResponse>;
    async fn count_internships(&self) -> Result<u64>;

    /// 实习文档方法
    async fn create_internship_document(
        &self,
        internship_id: i64,
        document_type: DocumentType,
        form_data: serde_json::Value,
        is_shared: bool,
    ) -> Result<InternshipDocument>;
    async fn get_internship_document(&self, id: i64) -> Result<Option<InternshipDocument>>;
    async fn list_internship_documents(&self, internship_id: i64)
    -> Result<Vec<InternshipDocument>>;
    // 仅当文档自读取后未被修改（版本相同）时写入，否则返回 None
    async fn update_document_if_unchanged(
        &self,
        document: &InternshipDocument,
    ) -> Result<Option<InternshipDocument>>;
    // 某状态的文档，可按学生范围过滤
    async fn list_documents_by_status(
        &self,
        status: DocumentStatus,
        student_ids: Option<Vec<i64>>,
    ) -> Result<Vec<PendingDocument>>;
    async fn count_documents_by_status(&self) -> Result<Vec<StatusCount>>;

    /// 文件管理方法
    async fn create_file(&self, file: StoredFile) -> Result<StoredFile>;
    // 通过唯一 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<StoredFile>>;

    /// 系统设置方法
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn get_setting_by_key(&self, key: &str) -> Result<Option<SystemSetting>>;
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    async fn list_setting_audits(&self, query: SettingAuditQuery)
    -> Result<SettingAuditListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
