use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use super::DashboardService;
use crate::models::{
    ApiResponse,
    dashboard::responses::{
        AdminDashboard, DashboardResponse, LeadershipDashboard, StaffDashboard,
        StudentDashboard, StudentGradeItem, TeacherDashboard,
    },
    internships::{entities::DocumentStatus, requests::InternshipListQuery},
    users::entities::{User, UserRole},
};
use crate::services::{current_user, storage_error};
use crate::storage::Storage;

/// 教师首页最多展示的指导实习数
const ADVISED_LIMIT: i64 = 100;

pub async fn get_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_user(request)?;

    let dashboard = match user.role {
        UserRole::Admin => admin(&storage).await?,
        UserRole::Teacher => teacher(&storage, &user).await?,
        UserRole::Student => student(&storage, &user).await?,
        UserRole::Staff => staff(&storage, &user).await?,
        UserRole::Leadership => leadership(&storage).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dashboard,
        "Dashboard retrieved successfully",
    )))
}

async fn admin(storage: &Arc<dyn Storage>) -> ActixResult<DashboardResponse> {
    let mut users = HashMap::new();
    for role in [
        UserRole::Student,
        UserRole::Teacher,
        UserRole::Staff,
        UserRole::Leadership,
    ] {
        let total = storage
            .count_users_by_role(role)
            .await
            .map_err(storage_error("统计用户数量失败"))?;
        users.insert(role, total);
    }
    let total_of = |role: UserRole| users.get(&role).copied().unwrap_or_default();

    Ok(DashboardResponse::Admin(AdminDashboard {
        total_students: total_of(UserRole::Student),
        total_teachers: total_of(UserRole::Teacher),
        total_staff: total_of(UserRole::Staff),
        total_leadership: total_of(UserRole::Leadership),
        total_courses: storage
            .count_courses()
            .await
            .map_err(storage_error("统计课程数量失败"))?,
        total_class_sections: storage
            .count_class_sections()
            .await
            .map_err(storage_error("统计班级数量失败"))?,
        total_internships: storage
            .count_internships()
            .await
            .map_err(storage_error("统计实习数量失败"))?,
    }))
}

async fn teacher(storage: &Arc<dyn Storage>, user: &User) -> ActixResult<DashboardResponse> {
    let assignments = storage
        .list_teacher_assignments(user.id)
        .await
        .map_err(storage_error("获取任课失败"))?;

    let advised = storage
        .list_internships(InternshipListQuery {
            page: Some(1),
            size: Some(ADVISED_LIMIT),
            advisor_id: Some(user.id),
            ..Default::default()
        })
        .await
        .map_err(storage_error("获取指导实习失败"))?;

    Ok(DashboardResponse::Teacher(TeacherDashboard {
        assignments,
        advised_internships: advised.items,
    }))
}

async fn student(storage: &Arc<dyn Storage>, user: &User) -> ActixResult<DashboardResponse> {
    let enrollments = storage
        .list_student_enrollments(user.id)
        .await
        .map_err(storage_error("获取注册信息失败"))?;

    let subject_names: HashMap<i64, String> = storage
        .list_subjects()
        .await
        .map_err(storage_error("获取科目失败"))?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();

    let grades = storage
        .list_student_grades(user.id)
        .await
        .map_err(storage_error("获取成绩失败"))?
        .into_iter()
        .map(|grade| StudentGradeItem {
            subject_name: subject_names
                .get(&grade.subject_id)
                .cloned()
                .unwrap_or_default(),
            display_average: grade.display_average(),
            grade,
        })
        .collect();

    let internship = storage
        .get_internship_by_student(user.id)
        .await
        .map_err(storage_error("获取实习档案失败"))?;

    Ok(DashboardResponse::Student(StudentDashboard {
        enrollments,
        grades,
        internship,
    }))
}

/// 行政人员只看自己方向学生的待审核文档
async fn staff(storage: &Arc<dyn Storage>, user: &User) -> ActixResult<DashboardResponse> {
    let documents_under_review = match user.eixo {
        Some(eixo) => {
            let student_ids = storage
                .list_student_ids_by_eixo(eixo)
                .await
                .map_err(storage_error("获取方向学生失败"))?;
            storage
                .list_documents_by_status(DocumentStatus::UnderReview, Some(student_ids))
                .await
                .map_err(storage_error("获取待审核文档失败"))?
        }
        None => Vec::new(),
    };

    Ok(DashboardResponse::Staff(StaffDashboard {
        eixo: user.eixo,
        documents_under_review,
    }))
}

async fn leadership(storage: &Arc<dyn Storage>) -> ActixResult<DashboardResponse> {
    let documents_under_review = storage
        .list_documents_by_status(DocumentStatus::UnderReview, None)
        .await
        .map_err(storage_error("获取待签署文档失败"))?;
    let counts_by_status = storage
        .count_documents_by_status()
        .await
        .map_err(storage_error("统计文档状态失败"))?;

    Ok(DashboardResponse::Leadership(LeadershipDashboard {
        documents_under_review,
        counts_by_status,
    }))
}
