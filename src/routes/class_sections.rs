use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::class_sections::requests::{
    ClassOptionsQuery, ClassSectionListQuery, CreateClassSectionRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ClassSectionService;
use crate::utils::SafeIDI64;

static CLASS_SECTION_SERVICE: Lazy<ClassSectionService> =
    Lazy::new(ClassSectionService::new_lazy);

pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<ClassSectionListQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE
        .list_sections(query.into_inner(), &req)
        .await
}

pub async fn get_options(
    req: HttpRequest,
    query: web::Query<ClassOptionsQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE.get_options(query.into_inner(), &req).await
}

pub async fn get_section(req: HttpRequest, section_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE.get_section(section_id.0, &req).await
}

pub async fn create_section(
    req: HttpRequest,
    data: web::Json<CreateClassSectionRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SECTION_SERVICE
        .create_section(data.into_inner(), &req)
        .await
}

// 配置路由，/options 需在 /{id} 之前注册
pub fn configure_class_section_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/class-sections")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_sections))
            .route("/options", web::get().to(get_options))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::post().to(create_section))
                    .route("/{id}", web::get().to(get_section)),
            ),
    );
}
