use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::internships::requests::{
    CreateDocumentRequest, CreateInternshipRequest, InternshipListParams, ReturnDocumentRequest,
    UpdateDocumentRequest, UpdateInternshipRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InternshipService;
use crate::utils::SafeIDI64;

// 懒加载的全局 InternshipService 实例
static INTERNSHIP_SERVICE: Lazy<InternshipService> = Lazy::new(InternshipService::new_lazy);

pub async fn list_internships(
    req: HttpRequest,
    query: web::Query<InternshipListParams>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .list_internships(&req, query.into_inner())
        .await
}

pub async fn get_internship(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.get_internship(&req, id.0).await
}

pub async fn create_internship(
    req: HttpRequest,
    data: web::Json<CreateInternshipRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .create_internship(&req, data.into_inner())
        .await
}

pub async fn update_internship(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateInternshipRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .update_internship(&req, id.0, data.into_inner())
        .await
}

pub async fn list_documents(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.list_documents(&req, id.0).await
}

pub async fn create_document(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<CreateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .create_document(&req, id.0, data.into_inner())
        .await
}

pub async fn get_document(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.get_document(&req, id.0).await
}

pub async fn update_document(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .update_document(&req, id.0, data.into_inner())
        .await
}

pub async fn sign_document(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.sign_document(&req, id.0).await
}

// 退回原因可省略，请求体也可以为空
pub async fn return_document(
    req: HttpRequest,
    id: SafeIDI64,
    data: Option<web::Json<ReturnDocumentRequest>>,
) -> ActixResult<HttpResponse> {
    let data = data.map(web::Json::into_inner).unwrap_or_default();
    INTERNSHIP_SERVICE.return_document(&req, id.0, data).await
}

pub async fn upload_attachment(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .upload_attachment(&req, id.0, payload)
        .await
}

pub async fn download_attachment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.download_attachment(&req, id.0).await
}

pub async fn upload_supervisor_pdf(
    req: HttpRequest,
    id: SafeIDI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE
        .upload_supervisor_pdf(&req, id.0, payload)
        .await
}

pub async fn download_supervisor_pdf(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    INTERNSHIP_SERVICE.download_supervisor_pdf(&req, id.0).await
}

// 配置路由：档案的增改限管理角色，查看和文档操作的权限由流程规则判断
pub fn configure_internship_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/internships")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_internships))
            .route("/{id}", web::get().to(get_internship))
            .route("/{id}/documents", web::get().to(list_documents))
            .route("/{id}/documents", web::post().to(create_document))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(
                        UserRole::internship_manager_roles(),
                    ))
                    .route("", web::post().to(create_internship))
                    .route("/{id}", web::put().to(update_internship)),
            ),
    );

    // 上传接口在下载路由之后注册，限流只作用于上传
    cfg.service(
        web::scope("/api/v1/documents")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::get().to(get_document))
            .route("/{id}", web::put().to(update_document))
            .route("/{id}/sign", web::post().to(sign_document))
            .route("/{id}/return", web::post().to(return_document))
            .route("/{id}/attachment", web::get().to(download_attachment))
            .route(
                "/{id}/supervisor-pdf",
                web::get().to(download_supervisor_pdf),
            )
            .service(
                web::resource("/{id}/attachment")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload_attachment)),
            )
            .service(
                web::resource("/{id}/supervisor-pdf")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload_supervisor_pdf)),
            ),
    );
}
