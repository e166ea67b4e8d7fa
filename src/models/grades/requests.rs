use serde::Deserialize;
use ts_rs::TS;

/// 分数输入：数字或字符串（允许逗号作为小数点）
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum MarkInput {
    Number(f64),
    Text(String),
}

impl MarkInput {
    /// 解析分数
    ///
    /// 空字符串为 None；超过最高分时取最高分；负数或非数字报错。
    pub fn parse(&self, max_mark: f64) -> Result<Option<f64>, String> {
        let value = match self {
            MarkInput::Number(n) => *n,
            MarkInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .replace(',', ".")
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid mark: '{trimmed}'"))?
            }
        };
        if !value.is_finite() || value < 0.0 {
            return Err(format!("Invalid mark: {value}"));
        }
        Ok(Some(value.min(max_mark)))
    }
}

/// 解析可选分数，字段缺失视为清空
pub fn parse_optional_mark(input: Option<&MarkInput>, max_mark: f64) -> Result<Option<f64>, String> {
    match input {
        Some(mark) => mark.parse(max_mark),
        None => Ok(None),
    }
}

// 保存成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SaveGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_section_id: i64,
    pub mark_1: Option<MarkInput>,
    pub mark_2: Option<MarkInput>,
    pub mark_3: Option<MarkInput>,
    pub remedial_mark: Option<MarkInput>,
}

// 成绩单查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetQuery {
    pub subject_id: i64,
    pub class_section_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_decimal() {
        let mark = MarkInput::Text("7,5".into());
        assert_eq!(mark.parse(10.0), Ok(Some(7.5)));
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert_eq!(MarkInput::Text("  ".into()).parse(10.0), Ok(None));
        assert_eq!(parse_optional_mark(None, 10.0), Ok(None));
    }

    #[test]
    fn test_parse_clamps_to_max() {
        assert_eq!(MarkInput::Number(12.0).parse(10.0), Ok(Some(10.0)));
    }

    #[test]
    fn test_parse_rejects_negative_and_text() {
        assert!(MarkInput::Number(-1.0).parse(10.0).is_err());
        assert!(MarkInput::Text("abc".into()).parse(10.0).is_err());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let req: SaveGradeRequest = serde_json::from_str(
            r#"{"student_id":1,"subject_id":2,"class_section_id":3,"mark_1":8,"mark_2":"6,5"}"#,
        )
        .unwrap();
        assert_eq!(req.mark_1, Some(MarkInput::Number(8.0)));
        assert_eq!(req.mark_2, Some(MarkInput::Text("6,5".into())));
        assert!(req.mark_3.is_none());
    }
}
