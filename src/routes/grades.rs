use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::requests::{GradeSheetQuery, SaveGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeIDI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn save_grade(
    req: HttpRequest,
    data: web::Json<SaveGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.save_grade(data.into_inner(), &req).await
}

pub async fn list_own_assignments(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_own_assignments(&req).await
}

pub async fn list_assignment_sections(
    req: HttpRequest,
    assignment_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .list_assignment_sections(assignment_id.0, &req)
        .await
}

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_sheet(query.into_inner(), &req).await
}

pub async fn get_student_details(
    req: HttpRequest,
    student_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_student_details(student_id.0, &req).await
}

pub async fn get_report_card(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_report_card(&req).await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/report-card")
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
                    .route(web::get().to(get_report_card)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(save_grade))
                    .route("/assignments", web::get().to(list_own_assignments))
                    .route(
                        "/assignments/{id}/sections",
                        web::get().to(list_assignment_sections),
                    )
                    .route("/sheet", web::get().to(get_sheet))
                    .route("/students/{id}", web::get().to(get_student_details)),
            ),
    );
}
