use super::entities::{DocumentType, InternshipStatus};
use crate::models::common::PaginationQuery;
use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 创建实习档案
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct CreateInternshipRequest {
    pub student_id: i64,
    pub advisor_id: Option<i64>,
    pub supervisor_name: String,
    pub supervisor_company: String,
    pub supervisor_position: String,
    pub supervisor_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// 更新实习档案
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct UpdateInternshipRequest {
    pub advisor_id: Option<i64>,
    pub supervisor_name: String,
    pub supervisor_company: String,
    pub supervisor_position: String,
    pub supervisor_email: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub overall_status: Option<InternshipStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct InternshipListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<InternshipStatus>,
}

// 实习列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct InternshipListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub advisor_id: Option<i64>,
    /// 限定学生范围（行政人员按方向过滤）
    pub student_ids: Option<Vec<i64>>,
    pub status: Option<InternshipStatus>,
}

// 学生新建文档
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct CreateDocumentRequest {
    pub document_type: DocumentType,
    #[serde(default)]
    pub form_data: Option<serde_json::Value>,
    #[serde(default)]
    pub is_shared: bool,
}

// 学生编辑草稿
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct UpdateDocumentRequest {
    pub form_data: Option<serde_json::Value>,
    pub is_shared: Option<bool>,
}

// 退回文档
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/internship.ts")]
pub struct ReturnDocumentRequest {
    pub reason: Option<String>,
}

/// 校验实习日期：结束日期不得早于开始日期
pub fn validate_period(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        return Err("End date must not be before start date");
    }
    Ok(())
}

/// 表单内容必须是 JSON 对象
pub fn validate_form_data(value: &serde_json::Value) -> Result<(), &'static str> {
    if !value.is_object() {
        return Err("Form data must be a JSON object");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_end_before_start() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(validate_period(start, end).is_err());
        assert!(validate_period(start, start).is_ok());
    }

    #[test]
    fn test_form_data_must_be_object() {
        assert!(validate_form_data(&serde_json::json!({"a": 1})).is_ok());
        assert!(validate_form_data(&serde_json::json!([1, 2])).is_err());
    }
}
