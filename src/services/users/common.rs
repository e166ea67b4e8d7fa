//! 三类账号共用的资料校验与账号生成

use actix_web::{HttpRequest, Result as ActixResult, http::StatusCode};
use chrono::Datelike;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::teacher_assignments::requests::AssignmentInput;
use crate::models::users::{
    entities::{Eixo, PersonalData, User, UserRole},
    requests::NewUser,
};
use crate::services::{reject, storage_error};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::{generate_enrollment_number, generate_random_password};
use crate::utils::validate::{
    normalize_document, validate_cpf, validate_email, validate_person_name, validate_rg,
    validate_zip_code,
};

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 规范化个人资料：去除首尾空白，证件号与邮编只保留数字
pub fn normalize_personal(mut personal: PersonalData) -> Result<PersonalData, (ErrorCode, String)> {
    personal.first_name = personal.first_name.trim().to_string();
    personal.last_name = personal.last_name.trim().to_string();
    validate_person_name(&personal.first_name)
        .map_err(|m| (ErrorCode::BadRequest, format!("first_name: {m}")))?;
    validate_person_name(&personal.last_name)
        .map_err(|m| (ErrorCode::BadRequest, format!("last_name: {m}")))?;

    personal.email = clean_optional(personal.email);
    if let Some(email) = &personal.email {
        validate_email(email).map_err(|m| (ErrorCode::UserEmailInvalid, m.to_string()))?;
    }

    personal.cpf = normalize_document(personal.cpf.as_deref());
    if let Some(cpf) = &personal.cpf {
        validate_cpf(cpf).map_err(|m| (ErrorCode::UserDocumentInvalid, m.to_string()))?;
    }
    personal.rg = normalize_document(personal.rg.as_deref());
    if let Some(rg) = &personal.rg {
        validate_rg(rg).map_err(|m| (ErrorCode::UserDocumentInvalid, m.to_string()))?;
    }

    personal.address.zip_code = normalize_document(personal.address.zip_code.as_deref());
    if let Some(zip) = &personal.address.zip_code {
        validate_zip_code(zip).map_err(|m| (ErrorCode::BadRequest, m.to_string()))?;
    }

    personal.birth_city = clean_optional(personal.birth_city);
    personal.rg_issuer = clean_optional(personal.rg_issuer);
    personal.father_name = clean_optional(personal.father_name);
    personal.mother_name = clean_optional(personal.mother_name);
    personal.guardian_name = clean_optional(personal.guardian_name);
    personal.phone = clean_optional(personal.phone);
    personal.address.street = clean_optional(personal.address.street);
    personal.address.number = clean_optional(personal.address.number);
    personal.address.district = clean_optional(personal.address.district);
    personal.address.city = clean_optional(personal.address.city);

    Ok(personal)
}

pub(crate) fn validated_personal(personal: PersonalData) -> ActixResult<PersonalData> {
    normalize_personal(personal).map_err(|(code, msg)| reject(StatusCode::BAD_REQUEST, code, &msg))
}

/// 新账号的临时密码，未配置时随机生成
pub(crate) fn temporary_password() -> String {
    let configured = &AppConfig::get().school.default_password;
    if configured.is_empty() {
        generate_random_password(12)
    } else {
        configured.clone()
    }
}

/// 生成新账号：学号即用户名，首次登录需修改密码
pub(crate) fn new_account(
    role: UserRole,
    eixo: Option<Eixo>,
    personal: PersonalData,
) -> ActixResult<(NewUser, String)> {
    let password = temporary_password();
    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        reject(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::UserCreationFailed,
            "Password hashing failed",
        )
    })?;

    let enrollment_number = generate_enrollment_number(chrono::Utc::now().year());
    let account = NewUser {
        username: enrollment_number.clone(),
        enrollment_number,
        password_hash,
        role,
        eixo,
        personal,
        must_change_password: true,
    };
    Ok((account, password))
}

/// 按 ID 获取指定角色的用户，角色不符同样视为不存在
pub(crate) async fn find_with_role(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    roles: &[UserRole],
) -> ActixResult<User> {
    storage
        .get_user_by_id(user_id)
        .await
        .map_err(storage_error("获取用户失败"))?
        .filter(|user| roles.contains(&user.role))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ErrorCode::UserNotFound, "User not found"))
}

/// 去掉重复的任课输入
pub(crate) fn dedup_assignments(inputs: Vec<AssignmentInput>) -> Vec<AssignmentInput> {
    let mut seen = HashSet::new();
    inputs
        .into_iter()
        .filter(|a| seen.insert((a.subject_id, a.course_id, a.year_module, a.modality)))
        .collect()
}

/// 依次写入任课
pub(crate) async fn add_assignments(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    inputs: Vec<AssignmentInput>,
) -> ActixResult<()> {
    for input in dedup_assignments(inputs) {
        storage
            .create_teacher_assignment(teacher_id, input)
            .await
            .map_err(storage_error("创建任课失败"))?;
    }
    Ok(())
}

/// 请求来源 IP，仅用于日志
pub(crate) fn client_ip(request: &HttpRequest) -> String {
    request
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_sections::entities::{Modality, YearModule};

    fn personal() -> PersonalData {
        PersonalData {
            first_name: "  Ana ".into(),
            last_name: "Lima".into(),
            cpf: Some("529.982.247-25".into()),
            rg: Some("12.345.678".into()),
            email: Some("   ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_documents_are_reduced_to_digits() {
        let personal = normalize_personal(personal()).unwrap();
        assert_eq!(personal.first_name, "Ana");
        assert_eq!(personal.cpf.as_deref(), Some("52998224725"));
        assert_eq!(personal.rg.as_deref(), Some("12345678"));
        assert_eq!(personal.email, None);
    }

    #[test]
    fn test_invalid_cpf_is_rejected() {
        let mut data = personal();
        data.cpf = Some("123".into());
        let (code, _) = normalize_personal(data).unwrap_err();
        assert_eq!(code, ErrorCode::UserDocumentInvalid);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut data = personal();
        data.last_name = "   ".into();
        assert!(normalize_personal(data).is_err());
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let mut data = personal();
        data.email = Some("ana@".into());
        let (code, _) = normalize_personal(data).unwrap_err();
        assert_eq!(code, ErrorCode::UserEmailInvalid);
    }

    #[test]
    fn test_dedup_assignments() {
        let input = AssignmentInput {
            subject_id: 1,
            course_id: 2,
            year_module: YearModule::Year1,
            modality: Modality::Epi,
        };
        let mut other = input.clone();
        other.year_module = YearModule::Year2;
        let deduped = dedup_assignments(vec![input.clone(), input, other]);
        assert_eq!(deduped.len(), 2);
    }
}
