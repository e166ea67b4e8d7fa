use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
    pub enum GradeStatus ("成绩状态") {
        Pending => ("pending", "Pendente"),
        Approved => ("approved", "Aprovado"),
        FailedFinal => ("failed_final", "Reprovado na Final"),
        Failed => ("failed", "Reprovado"),
    }
}

/// 成绩规则，由系统设置提供
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradePolicy {
    pub passing_average: f64,
    pub max_mark: f64,
}

impl Default for GradePolicy {
    fn default() -> Self {
        Self {
            passing_average: 5.0,
            max_mark: 10.0,
        }
    }
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_section_id: i64,
    pub mark_1: Option<f64>,
    pub mark_2: Option<f64>,
    pub mark_3: Option<f64>,
    pub remedial_mark: Option<f64>,
    pub final_average: Option<f64>,
    pub final_status: GradeStatus,
    pub updated_by: Option<i64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Grade {
    /// 尚未录入任何分数的成绩
    pub fn blank(student_id: i64, subject_id: i64, class_section_id: i64) -> Self {
        Self {
            id: 0,
            student_id,
            subject_id,
            class_section_id,
            mark_1: None,
            mark_2: None,
            mark_3: None,
            remedial_mark: None,
            final_average: None,
            final_status: GradeStatus::Pending,
            updated_by: None,
            updated_at: chrono::Utc::now(),
        }
    }

    /// 重新计算平均分和最终状态，每次保存前调用
    pub fn recompute(&mut self, policy: &GradePolicy) {
        self.final_average = compute_average(&[self.mark_1, self.mark_2, self.mark_3]);
        self.final_status =
            compute_status(self.final_average, self.remedial_mark, policy.passing_average);
    }

    pub fn display_average(&self) -> String {
        format_average(self.final_average)
    }
}

/// 已录入分数的算术平均，没有分数时为 None
pub fn compute_average(marks: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = marks.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

pub fn compute_status(average: Option<f64>, remedial: Option<f64>, passing: f64) -> GradeStatus {
    let Some(average) = average else {
        return GradeStatus::Pending;
    };
    if average >= passing {
        return GradeStatus::Approved;
    }
    match remedial {
        Some(remedial) if (average + remedial) / 2.0 >= passing => GradeStatus::Approved,
        Some(_) => GradeStatus::FailedFinal,
        None => GradeStatus::Failed,
    }
}

pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("{avg:.1}"),
        None => "---".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(marks: [Option<f64>; 3], remedial: Option<f64>) -> Grade {
        let mut grade = Grade {
            id: 1,
            student_id: 1,
            subject_id: 1,
            class_section_id: 1,
            mark_1: marks[0],
            mark_2: marks[1],
            mark_3: marks[2],
            remedial_mark: remedial,
            final_average: None,
            final_status: GradeStatus::Pending,
            updated_by: None,
            updated_at: chrono::Utc::now(),
        };
        grade.recompute(&GradePolicy::default());
        grade
    }

    #[test]
    fn test_average_ignores_missing_marks() {
        assert_eq!(compute_average(&[Some(6.0), None, Some(8.0)]), Some(7.0));
        assert_eq!(compute_average(&[None, None, None]), None);
    }

    #[test]
    fn test_no_marks_is_pending() {
        let g = grade([None, None, None], Some(9.0));
        assert_eq!(g.final_status, GradeStatus::Pending);
        assert_eq!(g.display_average(), "---");
    }

    #[test]
    fn test_average_at_passing_is_approved() {
        let g = grade([Some(5.0), Some(5.0), Some(5.0)], None);
        assert_eq!(g.final_status, GradeStatus::Approved);
        assert_eq!(g.display_average(), "5.0");
    }

    #[test]
    fn test_remedial_can_rescue() {
        let g = grade([Some(4.0), Some(4.0), Some(4.0)], Some(6.0));
        assert_eq!(g.final_status, GradeStatus::Approved);
    }

    #[test]
    fn test_remedial_not_enough_is_failed_final() {
        let g = grade([Some(3.0), Some(3.0), Some(3.0)], Some(6.0));
        assert_eq!(g.final_status, GradeStatus::FailedFinal);
    }

    #[test]
    fn test_low_average_without_remedial_fails() {
        let g = grade([Some(2.0), None, Some(4.0)], None);
        assert_eq!(g.final_average, Some(3.0));
        assert_eq!(g.final_status, GradeStatus::Failed);
    }

    #[test]
    fn test_format_average_one_decimal() {
        assert_eq!(format_average(Some(6.666_666)), "6.7");
    }
}
