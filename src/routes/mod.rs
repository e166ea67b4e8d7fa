pub mod auth;

pub mod dashboard;

pub mod users;

pub mod courses;

pub mod class_sections;

pub mod subjects;

pub mod grades;

pub mod internships;

pub mod system;

pub use auth::configure_auth_routes;
pub use class_sections::configure_class_section_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use grades::configure_grade_routes;
pub use internships::configure_internship_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
