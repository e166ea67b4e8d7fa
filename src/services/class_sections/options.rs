//! 班级级联选择
//!
//! 前端依次选择课程、年级/模块、班次、班级，每一步用已选条件过滤班级，
//! 再按 `target` 返回下一步的选项。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeSet;

use super::ClassSectionService;
use crate::models::{
    ApiResponse, ErrorCode,
    class_sections::{
        entities::{ClassSection, Modality, Shift},
        requests::ClassOptionsQuery,
        responses::{ClassOptions, ClassOptionsResponse, SectionOption, ShiftOption, YearModuleOption},
    },
};
use crate::services::storage_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTarget {
    YearModule,
    Shift,
    Section,
}

impl OptionTarget {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw? {
            "year_module" => Some(OptionTarget::YearModule),
            "shift" => Some(OptionTarget::Shift),
            "section" => Some(OptionTarget::Section),
            _ => None,
        }
    }
}

/// 根据已过滤的班级生成选项
pub fn build_options(target: OptionTarget, sections: &[ClassSection]) -> ClassOptions {
    match target {
        OptionTarget::YearModule => {
            let distinct: BTreeSet<(usize, &str, &str)> = sections
                .iter()
                .map(|s| {
                    (
                        s.year_module.ordinal(),
                        s.year_module.as_str(),
                        s.year_module.label(),
                    )
                })
                .collect();
            ClassOptions::YearModules(
                distinct
                    .into_iter()
                    .map(|(_, id, label)| YearModuleOption {
                        id: id.to_string(),
                        year_module: label.to_string(),
                    })
                    .collect(),
            )
        }
        OptionTarget::Shift => {
            // 夜间班次只在存在 PROEJA / Subsequente 班级时出现
            let distinct: BTreeSet<(usize, &str, &str)> = sections
                .iter()
                .filter(|s| {
                    s.shift != Shift::Night
                        || matches!(s.modality, Modality::Proeja | Modality::Subsequente)
                })
                .map(|s| (s.shift.ordinal(), s.shift.as_str(), s.shift.label()))
                .collect();
            ClassOptions::Shifts(
                distinct
                    .into_iter()
                    .map(|(_, id, display)| ShiftOption {
                        id: id.to_string(),
                        display: display.to_string(),
                    })
                    .collect(),
            )
        }
        OptionTarget::Section => {
            let any_label = sections.iter().any(|s| !s.label.is_empty());
            let mut options: Vec<SectionOption> = sections
                .iter()
                .map(|s| SectionOption {
                    id: s.id,
                    label: if any_label {
                        s.label.clone()
                    } else {
                        s.year_module.label().to_string()
                    },
                })
                .collect();
            if any_label {
                options.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
            }
            ClassOptions::Sections(options)
        }
    }
}

pub async fn get_options(
    service: &ClassSectionService,
    query: ClassOptionsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(target) = OptionTarget::parse(query.target.as_deref()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::ClassOptionTargetInvalid,
            serde_json::json!({}),
            "target must be one of: year_module, shift, section",
        )));
    };

    let storage = service.get_storage(request)?;
    let sections = storage
        .list_class_sections(query.filter())
        .await
        .map_err(storage_error("获取班级失败"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassOptionsResponse {
            options: build_options(target, &sections),
        },
        "Options retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_sections::entities::YearModule;

    fn section(id: i64, year_module: YearModule, shift: Shift, label: &str, modality: Modality) -> ClassSection {
        ClassSection {
            id,
            course_id: 1,
            course_name: None,
            year_module,
            shift,
            label: label.into(),
            modality,
            room: None,
        }
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!(OptionTarget::parse(Some("shift")), Some(OptionTarget::Shift));
        assert_eq!(OptionTarget::parse(Some("turma")), None);
        assert_eq!(OptionTarget::parse(None), None);
    }

    #[test]
    fn test_year_modules_distinct_and_ordered() {
        let sections = vec![
            section(1, YearModule::Year2, Shift::Morning, "M1", Modality::Epi),
            section(2, YearModule::Year1, Shift::Morning, "M1", Modality::Epi),
            section(3, YearModule::Year2, Shift::Afternoon, "V1", Modality::Epi),
        ];
        let ClassOptions::YearModules(options) = build_options(OptionTarget::YearModule, &sections)
        else {
            panic!("expected year modules");
        };
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["year_1", "year_2"]);
        assert_eq!(options[0].year_module, "1º ANO");
    }

    #[test]
    fn test_night_shift_requires_adult_modality() {
        let sections = vec![
            section(1, YearModule::Module1, Shift::Night, "", Modality::Epi),
            section(2, YearModule::Year1, Shift::Afternoon, "V1", Modality::Epi),
            section(3, YearModule::Year1, Shift::Morning, "M1", Modality::Epi),
        ];
        let ClassOptions::Shifts(options) = build_options(OptionTarget::Shift, &sections) else {
            panic!("expected shifts");
        };
        let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["morning", "afternoon"]);

        let with_proeja = vec![section(4, YearModule::Module1, Shift::Night, "", Modality::Proeja)];
        let ClassOptions::Shifts(options) = build_options(OptionTarget::Shift, &with_proeja) else {
            panic!("expected shifts");
        };
        assert_eq!(options[0].display, "Noturno");
    }

    #[test]
    fn test_sections_sorted_by_label() {
        let sections = vec![
            section(7, YearModule::Year1, Shift::Morning, "M2", Modality::Epi),
            section(3, YearModule::Year1, Shift::Morning, "M1", Modality::Epi),
        ];
        let ClassOptions::Sections(options) = build_options(OptionTarget::Section, &sections) else {
            panic!("expected sections");
        };
        assert_eq!(options[0], SectionOption { id: 3, label: "M1".into() });
    }

    #[test]
    fn test_sections_fall_back_to_year_module() {
        let sections = vec![section(5, YearModule::Module3, Shift::Night, "", Modality::Subsequente)];
        let ClassOptions::Sections(options) = build_options(OptionTarget::Section, &sections) else {
            panic!("expected sections");
        };
        assert_eq!(options[0].label, "III MÓDULO");
    }
}
