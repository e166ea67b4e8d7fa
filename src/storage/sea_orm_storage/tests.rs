use super::SeaOrmStorage;
use crate::errors::CeepSystemError;
use crate::models::{
    class_sections::{
        entities::{ClassSection, Modality, Shift, YearModule},
        requests::{ClassSectionListQuery, NewClassSection},
    },
    enrollments::requests::SetEnrollment,
    grades::entities::{Grade, GradePolicy, GradeStatus},
    internships::{
        entities::{DocumentStatus, DocumentType},
        requests::{CreateInternshipRequest, InternshipListQuery},
    },
    teacher_assignments::requests::AssignmentInput,
    users::{
        entities::{Eixo, PersonalData, UserRole},
        requests::{NewUser, UserListQuery},
    },
};
use crate::storage::Storage;
use chrono::NaiveDate;
use sea_orm::{ConnectOptions, Database};

async fn memory_storage() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    SeaOrmStorage::from_connection(db).await.unwrap()
}

fn person(first: &str, last: &str) -> PersonalData {
    PersonalData {
        first_name: first.into(),
        last_name: last.into(),
        ..Default::default()
    }
}

async fn add_user(storage: &SeaOrmStorage, username: &str, role: UserRole, first: &str) -> i64 {
    storage
        .create_user(NewUser {
            username: username.into(),
            enrollment_number: username.into(),
            password_hash: "hash".into(),
            role,
            eixo: None,
            personal: person(first, "Souza"),
            must_change_password: true,
        })
        .await
        .unwrap()
        .id
}

async fn add_section(storage: &SeaOrmStorage, course_id: i64, label: &str) -> i64 {
    add_section_as(storage, course_id, label, YearModule::Year1, Modality::Epi)
        .await
        .id
}

async fn add_section_as(
    storage: &SeaOrmStorage,
    course_id: i64,
    label: &str,
    year_module: YearModule,
    modality: Modality,
) -> ClassSection {
    storage
        .create_class_section(NewClassSection {
            course_id,
            year_module,
            shift: Shift::Morning,
            label: label.into(),
            modality,
            room: None,
        })
        .await
        .unwrap()
}

fn internship_request(student_id: i64, advisor_id: Option<i64>) -> CreateInternshipRequest {
    CreateInternshipRequest {
        student_id,
        advisor_id,
        supervisor_name: "Maria".into(),
        supervisor_company: "Hospital".into(),
        supervisor_position: "Enfermeira".into(),
        supervisor_email: None,
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    }
}

#[tokio::test]
async fn test_login_lookup_is_case_insensitive() {
    let storage = memory_storage().await;
    add_user(&storage, "Admin", UserRole::Admin, "Carlos").await;
    add_user(&storage, "20250001", UserRole::Student, "Ana").await;

    let by_username = storage.find_user_for_login("ADMIN").await.unwrap();
    assert_eq!(by_username.unwrap().role, UserRole::Admin);

    let by_enrollment = storage.find_user_for_login(" 20250001 ").await.unwrap();
    assert_eq!(by_enrollment.unwrap().role, UserRole::Student);

    // 管理员可用名字登录，学生不可以
    let by_name = storage.find_user_for_login("carlos").await.unwrap();
    assert_eq!(by_name.unwrap().role, UserRole::Admin);
    assert!(storage.find_user_for_login("ana").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_cpf_is_conflict() {
    let storage = memory_storage().await;
    let mut personal = person("Ana", "Lima");
    personal.cpf = Some("52998224725".into());

    let new_user = |username: &str| NewUser {
        username: username.into(),
        enrollment_number: username.into(),
        password_hash: "hash".into(),
        role: UserRole::Teacher,
        eixo: None,
        personal: personal.clone(),
        must_change_password: true,
    };

    storage.create_user(new_user("20250010")).await.unwrap();
    let err = storage.create_user(new_user("20250011")).await.unwrap_err();
    assert!(matches!(err, CeepSystemError::Conflict(_)));
}

#[tokio::test]
async fn test_list_users_filters_by_role_and_search() {
    let storage = memory_storage().await;
    add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    add_user(&storage, "20250002", UserRole::Student, "Bruno").await;
    add_user(&storage, "20250003", UserRole::Teacher, "Ana").await;

    let result = storage
        .list_users_with_pagination(UserListQuery {
            roles: vec![UserRole::Student],
            search: Some("an".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(result.pagination.total, 1);
    assert_eq!(result.items[0].personal.first_name, "Ana");
}

#[tokio::test]
async fn test_enrollment_is_replaced_not_duplicated() {
    let storage = memory_storage().await;
    let course = storage.create_course("Enfermagem", Eixo::Saude).await.unwrap();
    let first = add_section(&storage, course.id, "M1").await;
    let second = add_section(&storage, course.id, "M2").await;
    let student = add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    let on = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

    storage
        .set_student_enrollment(SetEnrollment {
            student_id: student,
            class_section_id: first,
            enrolled_on: on,
        })
        .await
        .unwrap();
    let moved = storage
        .set_student_enrollment(SetEnrollment {
            student_id: student,
            class_section_id: second,
            enrolled_on: on,
        })
        .await
        .unwrap();

    assert_eq!(moved.academic_term, "2025.2");
    let enrollments = storage.list_student_enrollments(student).await.unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].class_section.id, second);
    assert!(!storage.is_student_enrolled(student, first).await.unwrap());
    assert_eq!(
        storage.get_student_eixo(student).await.unwrap(),
        Some(Eixo::Saude)
    );
    assert_eq!(
        storage.list_student_ids_by_eixo(Eixo::Saude).await.unwrap(),
        vec![student]
    );
    assert!(
        storage
            .list_student_ids_by_eixo(Eixo::Gestao)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_class_sections_sorted_and_named() {
    let storage = memory_storage().await;
    let course = storage.create_course("Informática", Eixo::Gestao).await.unwrap();
    add_section(&storage, course.id, "M2").await;
    add_section(&storage, course.id, "M1").await;

    let sections = storage
        .list_class_sections(ClassSectionListQuery {
            course_id: Some(course.id),
            ..Default::default()
        })
        .await
        .unwrap();

    let labels: Vec<&str> = sections.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["M1", "M2"]);
    assert_eq!(sections[0].course_name.as_deref(), Some("Informática"));
}

#[tokio::test]
async fn test_save_grade_upserts_by_student_subject_section() {
    let storage = memory_storage().await;
    let course = storage.create_course("Informática", Eixo::Gestao).await.unwrap();
    let section = add_section(&storage, course.id, "M1").await;
    let subject = storage
        .create_subject("Matemática", 40, &[section])
        .await
        .unwrap();
    let student = add_user(&storage, "20250001", UserRole::Student, "Ana").await;

    let mut grade = Grade::blank(student, subject.id, section);
    grade.mark_1 = Some(4.0);
    grade.recompute(&GradePolicy::default());
    let saved = storage.save_grade(grade).await.unwrap();
    assert_eq!(saved.final_status, GradeStatus::Failed);

    let mut again = saved.clone();
    again.mark_2 = Some(8.0);
    again.recompute(&GradePolicy::default());
    let updated = storage.save_grade(again).await.unwrap();

    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.final_status, GradeStatus::Approved);
    assert_eq!(
        storage
            .list_grades_for_section_subject(subject.id, section)
            .await
            .unwrap()
            .len(),
        1
    );

    let offered = storage.list_subjects_for_sections(&[section]).await.unwrap();
    assert_eq!(offered.len(), 1);
    assert_eq!(offered[0].1.name, "Matemática");
}

#[tokio::test]
async fn test_one_internship_per_student() {
    let storage = memory_storage().await;
    let student = add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    let teacher = add_user(&storage, "20250002", UserRole::Teacher, "Paulo").await;

    storage
        .create_internship(internship_request(student, Some(teacher)))
        .await
        .unwrap();
    let err = storage
        .create_internship(internship_request(student, None))
        .await
        .unwrap_err();
    assert!(matches!(err, CeepSystemError::Conflict(_)));

    let listed = storage
        .list_internships(InternshipListQuery {
            advisor_id: Some(teacher),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].student_name, "Ana Souza");
    assert_eq!(listed.items[0].advisor_name.as_deref(), Some("Paulo Souza"));

    let scoped = storage
        .list_internships(InternshipListQuery {
            student_ids: Some(Vec::new()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(scoped.items.is_empty());
}

#[tokio::test]
async fn test_document_update_requires_unchanged_version() {
    let storage = memory_storage().await;
    let student = add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    let internship = storage
        .create_internship(internship_request(student, None))
        .await
        .unwrap();
    let document = storage
        .create_internship_document(
            internship.id,
            DocumentType::CommitmentTerm,
            serde_json::json!({"campo": "valor"}),
            false,
        )
        .await
        .unwrap();

    let mut signed = document.clone();
    signed.status = DocumentStatus::AwaitingSignatures;
    signed.student_signed_at = Some(chrono::Utc::now());

    let first = storage
        .update_document_if_unchanged(&signed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.status, DocumentStatus::AwaitingSignatures);
    assert_eq!(first.version, document.version + 1);

    // 版本已前进，基于旧副本的第二次写入失败
    let second = storage
        .update_document_if_unchanged(&signed)
        .await
        .unwrap();
    assert!(second.is_none());

    let pending = storage
        .list_documents_by_status(DocumentStatus::AwaitingSignatures, None)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].student_id, student);

    let counts = storage.count_documents_by_status().await.unwrap();
    let awaiting = counts
        .iter()
        .find(|c| c.status == DocumentStatus::AwaitingSignatures)
        .unwrap();
    assert_eq!(awaiting.count, 1);

    let duplicate = storage
        .create_internship_document(
            internship.id,
            DocumentType::CommitmentTerm,
            serde_json::json!({}),
            false,
        )
        .await
        .unwrap_err();
    assert!(matches!(duplicate, CeepSystemError::Conflict(_)));
}

#[tokio::test]
async fn test_stale_transition_cannot_overwrite_upload() {
    let storage = memory_storage().await;
    let student = add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    let internship = storage
        .create_internship(internship_request(student, None))
        .await
        .unwrap();
    let draft = storage
        .create_internship_document(
            internship.id,
            DocumentType::CommitmentTerm,
            serde_json::json!({}),
            false,
        )
        .await
        .unwrap();
    let mut submitted = draft.clone();
    submitted.status = DocumentStatus::AwaitingSignatures;
    let awaiting = storage
        .update_document_if_unchanged(&submitted)
        .await
        .unwrap()
        .unwrap();

    // 指导教师读取的副本，随后有人上传了督导签字 PDF
    let advisor_copy = awaiting.clone();
    let mut uploaded = awaiting.clone();
    uploaded.supervisor_pdf_token = Some("tok-123".into());
    storage
        .update_document_if_unchanged(&uploaded)
        .await
        .unwrap()
        .unwrap();

    let mut returned = advisor_copy;
    returned.status = DocumentStatus::Draft;
    returned.return_reason = Some("faltou assinatura".into());
    let stale = storage
        .update_document_if_unchanged(&returned)
        .await
        .unwrap();
    assert!(stale.is_none());

    let stored = storage
        .get_internship_document(draft.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, DocumentStatus::AwaitingSignatures);
    assert_eq!(stored.supervisor_pdf_token.as_deref(), Some("tok-123"));
    assert_eq!(stored.return_reason, None);
}

#[tokio::test]
async fn test_teacher_assignment_must_match_section() {
    let storage = memory_storage().await;
    let course = storage.create_course("Informática", Eixo::Gestao).await.unwrap();
    let other_course = storage.create_course("Enfermagem", Eixo::Saude).await.unwrap();
    let year1_epi = add_section_as(&storage, course.id, "M1", YearModule::Year1, Modality::Epi).await;
    let year2_epi = add_section_as(&storage, course.id, "M2", YearModule::Year2, Modality::Epi).await;
    let year1_proeja =
        add_section_as(&storage, course.id, "N1", YearModule::Year1, Modality::Proeja).await;
    let elsewhere =
        add_section_as(&storage, other_course.id, "M1", YearModule::Year1, Modality::Epi).await;
    let subject = storage
        .create_subject("Matemática", 40, &[year1_epi.id, year2_epi.id])
        .await
        .unwrap();
    let teacher = add_user(&storage, "20250002", UserRole::Teacher, "Paulo").await;
    let colleague = add_user(&storage, "20250003", UserRole::Teacher, "Rita").await;

    storage
        .create_teacher_assignment(
            teacher,
            AssignmentInput {
                subject_id: subject.id,
                course_id: course.id,
                year_module: YearModule::Year1,
                modality: Modality::Epi,
            },
        )
        .await
        .unwrap();

    assert!(teaches(&storage, teacher, subject.id, &year1_epi).await);
    assert!(!teaches(&storage, teacher, subject.id, &year2_epi).await);
    assert!(!teaches(&storage, teacher, subject.id, &year1_proeja).await);
    assert!(!teaches(&storage, teacher, subject.id, &elsewhere).await);
    assert!(!teaches(&storage, colleague, subject.id, &year1_epi).await);

    // 其他科目同样不算
    let other_subject = storage
        .create_subject("Física", 40, &[year1_epi.id])
        .await
        .unwrap();
    assert!(!teaches(&storage, teacher, other_subject.id, &year1_epi).await);
}

async fn teaches(
    storage: &SeaOrmStorage,
    teacher_id: i64,
    subject_id: i64,
    section: &ClassSection,
) -> bool {
    storage
        .teacher_teaches_section(teacher_id, subject_id, section)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_grade_entry_requires_enrolled_student() {
    let storage = memory_storage().await;
    let course = storage.create_course("Informática", Eixo::Gestao).await.unwrap();
    let section = add_section(&storage, course.id, "M1").await;
    let other = add_section(&storage, course.id, "M2").await;
    let enrolled = add_user(&storage, "20250001", UserRole::Student, "Ana").await;
    let outsider = add_user(&storage, "20250002", UserRole::Student, "Bruno").await;
    let on = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    for (student_id, class_section_id) in [(enrolled, section), (outsider, other)] {
        storage
            .set_student_enrollment(SetEnrollment {
                student_id,
                class_section_id,
                enrolled_on: on,
            })
            .await
            .unwrap();
    }

    assert!(storage.is_student_enrolled(enrolled, section).await.unwrap());
    assert!(!storage.is_student_enrolled(outsider, section).await.unwrap());
    let never = add_user(&storage, "20250003", UserRole::Student, "Caio").await;
    assert!(!storage.is_student_enrolled(never, section).await.unwrap());
}

#[tokio::test]
async fn test_setting_update_writes_audit() {
    let storage = memory_storage().await;
    let admin = add_user(&storage, "admin", UserRole::Admin, "Carlos").await;

    let updated = storage
        .update_setting("grades.passing_average", "6", admin, None)
        .await
        .unwrap();
    assert_eq!(updated.value, "6");

    let audits = storage
        .list_setting_audits(Default::default())
        .await
        .unwrap();
    assert_eq!(audits.audits.len(), 1);
    assert_eq!(audits.audits[0].old_value.as_deref(), Some("5"));
}
