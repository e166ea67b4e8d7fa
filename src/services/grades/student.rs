use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::{
    ApiResponse,
    users::{entities::UserRole, responses::StudentDetailResponse},
};
use crate::services::storage_error;
use crate::services::users::common::find_with_role;

/// 教师查看学生资料及所在班级，只读
pub async fn get_student_details(
    service: &GradeService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = find_with_role(&storage, student_id, &[UserRole::Student]).await?;

    let enrollments = storage
        .list_student_enrollments(user.id)
        .await
        .map_err(storage_error("获取注册信息失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentDetailResponse { user, enrollments },
        "Student details retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        class_sections::{
            entities::{Modality, Shift, YearModule},
            requests::NewClassSection,
        },
        enrollments::requests::SetEnrollment,
        users::{
            entities::{Eixo, PersonalData},
            requests::NewUser,
        },
    };
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::{App, http::StatusCode, test, web};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;

    static SERVICE: once_cell::sync::Lazy<GradeService> =
        once_cell::sync::Lazy::new(GradeService::new_lazy);

    async fn details(request: HttpRequest, id: web::Path<i64>) -> ActixResult<HttpResponse> {
        get_student_details(&SERVICE, id.into_inner(), &request).await
    }

    async fn add_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> i64 {
        storage
            .create_user(NewUser {
                username: username.into(),
                enrollment_number: username.into(),
                password_hash: "hash".into(),
                role,
                eixo: None,
                personal: PersonalData {
                    first_name: "Ana".into(),
                    last_name: "Souza".into(),
                    ..Default::default()
                },
                must_change_password: false,
            })
            .await
            .unwrap()
            .id
    }

    #[actix_web::test]
    async fn test_teacher_sees_student_with_sections() {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let storage = SeaOrmStorage::from_connection(Database::connect(opt).await.unwrap())
            .await
            .unwrap();

        let course = storage.create_course("Informática", Eixo::Gestao).await.unwrap();
        let section = storage
            .create_class_section(NewClassSection {
                course_id: course.id,
                year_module: YearModule::Year1,
                shift: Shift::Morning,
                label: "M1".into(),
                modality: Modality::Epi,
                room: None,
            })
            .await
            .unwrap();
        let student = add_user(&storage, "20250001", UserRole::Student).await;
        let teacher = add_user(&storage, "20250002", UserRole::Teacher).await;
        storage
            .set_student_enrollment(SetEnrollment {
                student_id: student,
                class_section_id: section.id,
                enrolled_on: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            })
            .await
            .unwrap();

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .route("/students/{id}", web::get().to(details)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/students/{student}"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user"]["id"], student);
        assert_eq!(body["data"]["enrollments"].as_array().map(Vec::len), Some(1));

        // 非学生账号按不存在处理
        let req = test::TestRequest::get()
            .uri(&format!("/students/{teacher}"))
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
