use serde::{Deserialize, Serialize};
use ts_rs::TS;

define_string_enum! {
    /// 年级（普通班）或模块（夜间班）
    #[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
    pub enum YearModule ("年级/模块") {
        Year1 => ("year_1", "1º ANO"),
        Year2 => ("year_2", "2º ANO"),
        Year3 => ("year_3", "3º ANO"),
        Module1 => ("module_1", "I MÓDULO"),
        Module2 => ("module_2", "II MÓDULO"),
        Module3 => ("module_3", "III MÓDULO"),
        Module4 => ("module_4", "IV MÓDULO"),
        Module5 => ("module_5", "V MÓDULO"),
        Module6 => ("module_6", "VI MÓDULO"),
    }
}

impl YearModule {
    /// 在 ALL 中的位置，用于排序
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(usize::MAX)
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
    pub enum Shift ("班次") {
        Morning => ("morning", "Matutino"),
        Afternoon => ("afternoon", "Vespertino"),
        Night => ("night", "Noturno"),
    }
}

impl Shift {
    pub fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(usize::MAX)
    }
}

define_string_enum! {
    #[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
    pub enum Modality ("教学模式") {
        Epi => ("epi", "EPI"),
        Proeja => ("proeja", "PROEJA"),
        Subsequente => ("subsequente", "Subsequente"),
    }
}

/// 根据班次确定教学模式
///
/// 白天班一律为 EPI；夜间班必须指定 PROEJA 或 Subsequente。
pub fn resolve_modality(
    shift: Shift,
    requested: Option<Modality>,
) -> Result<Modality, &'static str> {
    match shift {
        Shift::Morning | Shift::Afternoon => Ok(Modality::Epi),
        Shift::Night => match requested {
            Some(m @ (Modality::Proeja | Modality::Subsequente)) => Ok(m),
            _ => Err("Night sections must be PROEJA or Subsequente"),
        },
    }
}

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class_section.ts")]
pub struct ClassSection {
    pub id: i64,
    pub course_id: i64,
    pub course_name: Option<String>,
    pub year_module: YearModule,
    pub shift: Shift,
    /// 如 M1、V2；夜间模块为空
    pub label: String,
    pub modality: Modality,
    pub room: Option<String>,
}

impl ClassSection {
    /// 班级简称：有标签用标签，否则用年级/模块名称
    pub fn short_name(&self) -> String {
        if self.label.is_empty() {
            self.year_module.label().to_string()
        } else {
            self.label.clone()
        }
    }

    /// 完整展示名称
    pub fn display_name(&self) -> String {
        let course = self.course_name.as_deref().unwrap_or_default();
        let mut name = format!("{course} - {}", self.year_module.label());
        if !self.label.is_empty() {
            name.push_str(&format!(" - {}", self.label));
        }
        name.push_str(&format!(" ({})", self.modality.label()));
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str) -> ClassSection {
        ClassSection {
            id: 1,
            course_id: 1,
            course_name: Some("Administração".into()),
            year_module: YearModule::Module2,
            shift: Shift::Night,
            label: label.into(),
            modality: Modality::Proeja,
            room: None,
        }
    }

    #[test]
    fn test_day_sections_forced_to_epi() {
        assert_eq!(
            resolve_modality(Shift::Morning, Some(Modality::Proeja)),
            Ok(Modality::Epi)
        );
        assert_eq!(resolve_modality(Shift::Afternoon, None), Ok(Modality::Epi));
    }

    #[test]
    fn test_night_sections_require_adult_modality() {
        assert!(resolve_modality(Shift::Night, None).is_err());
        assert!(resolve_modality(Shift::Night, Some(Modality::Epi)).is_err());
        assert_eq!(
            resolve_modality(Shift::Night, Some(Modality::Subsequente)),
            Ok(Modality::Subsequente)
        );
    }

    #[test]
    fn test_short_name_falls_back_to_year_module() {
        assert_eq!(section("").short_name(), "II MÓDULO");
        assert_eq!(section("M1").short_name(), "M1");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(
            section("").display_name(),
            "Administração - II MÓDULO (PROEJA)"
        );
    }

    #[test]
    fn test_year_module_ordinal() {
        assert!(YearModule::Year3.ordinal() < YearModule::Module1.ordinal());
        assert!(Shift::Afternoon.ordinal() < Shift::Night.ordinal());
    }
}
