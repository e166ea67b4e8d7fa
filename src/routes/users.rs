use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{
    CreateStaffRequest, CreateStudentRequest, CreateTeacherRequest, UpdateStaffRequest,
    UpdateStudentRequest, UpdateTeacherRequest, UserListParams,
};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// teachers
pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    data: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_teacher(data.into_inner(), &req).await
}

pub async fn get_teacher(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_teacher(user_id.0, &req).await
}

pub async fn update_teacher(
    req: HttpRequest,
    user_id: SafeIDI64,
    data: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_teacher(user_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_teacher(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_teacher(user_id.0, &req).await
}

// students
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_student(data.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_student(user_id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    user_id: SafeIDI64,
    data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_student(user_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_student(user_id.0, &req).await
}

// staff
pub async fn list_staff(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_staff(query.into_inner(), &req).await
}

pub async fn create_staff(
    req: HttpRequest,
    data: web::Json<CreateStaffRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_staff(data.into_inner(), &req).await
}

pub async fn get_staff(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_staff(user_id.0, &req).await
}

pub async fn update_staff(
    req: HttpRequest,
    user_id: SafeIDI64,
    data: web::Json<UpdateStaffRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_staff(user_id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_staff(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_staff(user_id.0, &req).await
}

// 配置路由，三类账号都只允许管理员维护
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_teachers))
                    .route("", web::post().to(create_teacher))
                    .route("/{id}", web::get().to(get_teacher))
                    .route("/{id}", web::put().to(update_teacher))
                    .route("/{id}", web::delete().to(delete_teacher)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_students))
                    .route("", web::post().to(create_student))
                    .route("/{id}", web::get().to(get_student))
                    .route("/{id}", web::put().to(update_student))
                    .route("/{id}", web::delete().to(delete_student)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/staff")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_staff))
                    .route("", web::post().to(create_staff))
                    .route("/{id}", web::get().to(get_staff))
                    .route("/{id}", web::put().to(update_staff))
                    .route("/{id}", web::delete().to(delete_staff)),
            ),
    );
}
