//! 初始数据：管理员账号与 CEEP Guanambi 的课程、班级、科目
//!
//! 每次启动都可以安全执行，已存在的记录不会重复创建。

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::models::class_sections::entities::{Modality, Shift, YearModule};
use crate::models::class_sections::requests::NewClassSection;
use crate::models::users::entities::{Eixo, PersonalData, UserRole};
use crate::models::users::requests::NewUser;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;

/// 夜间班的教学模式
#[derive(Clone, Copy)]
enum Night {
    Proeja,
    Subsequente,
}

/// (年级/模块, 班次, 班号, 教室)，夜间班另带教学模式
type SectionRow = (YearModule, Shift, &'static str, Option<&'static str>, Option<Night>);

const fn day(
    year_module: YearModule,
    shift: Shift,
    label: &'static str,
    room: Option<&'static str>,
) -> SectionRow {
    (year_module, shift, label, room, None)
}

const fn night(year_module: YearModule, room: &'static str, modality: Night) -> SectionRow {
    (year_module, Shift::Night, "", Some(room), Some(modality))
}

use Night::{Proeja, Subsequente};
use Shift::{Afternoon, Morning};
use YearModule::*;

const CATALOG: &[(&str, Eixo, &[SectionRow])] = &[
    (
        "Análises Clínicas",
        Eixo::Saude,
        &[
            day(Year1, Morning, "M1", Some("SALA 04")),
            day(Year1, Afternoon, "V1", Some("SALA 03")),
            day(Year2, Morning, "M1", Some("SALA 14")),
            day(Year2, Afternoon, "V1", Some("SALA 13")),
            day(Year2, Afternoon, "V2", Some("SALA 14")),
            day(Year3, Morning, "M1", Some("SALA 04 PAV - A")),
            day(Year3, Morning, "M2", Some("SALA 02 PAV - A")),
            day(Year3, Afternoon, "V1", Some("SALA 04 PAV - A")),
            day(Year3, Afternoon, "V2", Some("SALA 02 PAV - A")),
            night(Module1, "SALA 14", Subsequente),
            night(Module2, "SALA 15", Subsequente),
            night(Module3, "SALA 16", Subsequente),
            night(Module4, "SALA 17", Subsequente),
        ],
    ),
    (
        "Enfermagem",
        Eixo::Saude,
        &[
            night(Module3, "SALA 18", Subsequente),
            night(Module4, "SALA 19", Subsequente),
            night(Module5, "SALA 23", Subsequente),
            night(Module6, "SALA 24", Subsequente),
        ],
    ),
    (
        "Segurança do Trabalho",
        Eixo::Saude,
        &[
            day(Year1, Morning, "M1", Some("SALA 08")),
            day(Year1, Afternoon, "V1", Some("SALA 08")),
            day(Year2, Morning, "M1", Some("SALA 17")),
            day(Year2, Afternoon, "V1", Some("SALA 17")),
            day(Year3, Morning, "M1", Some("SALA 24")),
            day(Year3, Afternoon, "V1", Some("SALA 24")),
            night(Module2, "SALA 21", Subsequente),
            night(Module3, "SALA 22", Subsequente),
        ],
    ),
    (
        "Administração",
        Eixo::Gestao,
        &[
            day(Year1, Morning, "M1", Some("SALA 02")),
            day(Year1, Morning, "M2", Some("SALA 03")),
            day(Year1, Afternoon, "V1", Some("SALA 02")),
            day(Year2, Morning, "M1", Some("SALA 13")),
            day(Year2, Afternoon, "V1", Some("SALA 10")),
            day(Year3, Morning, "M1", Some("SALA 19")),
            day(Year3, Morning, "M2", Some("SALA 20")),
            day(Year3, Morning, "M3", Some("SALA 21")),
            day(Year3, Afternoon, "V1", Some("SALA 21")),
            day(Year3, Afternoon, "V2", Some("SALA 22")),
            night(Module2, "SALA 02", Proeja),
            night(Module3, "SALA 03", Proeja),
            night(Module4, "SALA 04", Proeja),
            night(Module2, "SALA 13", Subsequente),
        ],
    ),
    (
        "Biotecnologia",
        Eixo::Gestao,
        &[
            day(Year1, Morning, "M1", Some("SALA 05")),
            day(Year1, Afternoon, "V1", Some("SALA 04")),
            day(Year1, Afternoon, "V2", Some("SALA 05")),
            day(Year2, Morning, "M1", None),
            day(Year3, Afternoon, "V1", Some("SALA 19")),
        ],
    ),
    (
        "Finanças",
        Eixo::Gestao,
        &[
            day(Year1, Morning, "M1", Some("SALA 06")),
            day(Year1, Afternoon, "V1", Some("SALA 06")),
            day(Year2, Morning, "M1", Some("SALA 15")),
            day(Year2, Afternoon, "V1", Some("SALA 15")),
            day(Year3, Morning, "M1", None),
        ],
    ),
    (
        "Logística",
        Eixo::Gestao,
        &[
            day(Year1, Morning, "M1", Some("SALA 07")),
            day(Year1, Afternoon, "V1", Some("SALA 07")),
            day(Year2, Morning, "M1", Some("SALA 16")),
            day(Year2, Afternoon, "V1", Some("SALA 16")),
            day(Year3, Morning, "M1", None),
            night(Module1, "SALA 06", Proeja),
        ],
    ),
    (
        "Serviços Jurídicos",
        Eixo::Gestao,
        &[
            day(Year1, Morning, "M1", Some("SALA 09")),
            day(Year1, Morning, "M2", Some("SALA 10")),
            day(Year1, Afternoon, "V1", Some("SALA 09")),
            day(Year2, Morning, "M1", Some("SALA 18")),
            day(Year2, Afternoon, "V1", Some("SALA 18")),
            day(Year2, Afternoon, "V2", Some("SALA 20")),
            day(Year3, Morning, "M1", Some("SALA 22")),
            day(Year3, Morning, "M2", Some("SALA 23")),
            day(Year3, Afternoon, "V1", Some("SALA 23")),
            night(Module2, "SALA 07", Proeja),
            night(Module4, "SALA 08", Proeja),
            night(Module5, "SALA 09", Proeja),
        ],
    ),
    (
        "Edificações",
        Eixo::Gestao,
        &[night(Module1, "SALA 20", Subsequente)],
    ),
    (
        "Panificação",
        Eixo::Gestao,
        &[night(Module1, "SALA 05", Proeja)],
    ),
];

/// 基础课与各技术方向的专业课
const SUBJECTS: &[&str] = &[
    "Português",
    "Matemática",
    "Química",
    "Biologia",
    "Física",
    "Geografia",
    "História",
    "ADMINISTRAÇÃO",
    "ANÁLISES CLÍNICAS",
    "BIOTECNOLOGIA",
    "FINANÇAS",
    "LOGÍSTICA",
    "SEGURANÇA DO TRABALHO",
    "SERVIÇOS JURÍDICOS",
    "EDIFICAÇÕES",
    "ENFERMAGEM",
    "PANIFICAÇÃO",
];

fn new_section(course_id: i64, row: &SectionRow) -> NewClassSection {
    let (year_module, shift, label, room, modality) = *row;
    NewClassSection {
        course_id,
        year_module,
        shift,
        label: label.to_string(),
        modality: match modality {
            None => Modality::Epi,
            Some(Night::Proeja) => Modality::Proeja,
            Some(Night::Subsequente) => Modality::Subsequente,
        },
        room: room.map(str::to_string),
    }
}

/// 写入课程、班级和科目
pub async fn seed_catalog(storage: &Arc<dyn Storage>) -> Result<()> {
    let mut sections = 0;
    for (name, eixo, rows) in CATALOG {
        let course = storage.upsert_course(name, *eixo).await?;
        for row in rows.iter() {
            storage.upsert_class_section(new_section(course.id, row)).await?;
            sections += 1;
        }
    }
    for name in SUBJECTS {
        storage.get_or_create_subject(name).await?;
    }
    info!(
        "Catalog seed finished: {} courses, {} class sections, {} subjects",
        CATALOG.len(),
        sections,
        SUBJECTS.len()
    );
    Ok(())
}

/// 没有管理员时创建默认的 admin 账号
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let admins = storage.count_users_by_role(UserRole::Admin).await?;
    if admins > 0 {
        debug!("Found {} admin account(s), skipping admin seed", admins);
        return Ok(());
    }
    info!("No admin account found, creating default admin account...");

    // 优先使用环境变量中的密码，否则生成随机密码
    let (password, generated) = match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.trim().is_empty() => (password, false),
        _ => {
            let password = generate_random_password(16);
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", password);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            (password, true)
        }
    };

    let admin = NewUser {
        username: "admin".to_string(),
        enrollment_number: "admin".to_string(),
        password_hash: hash_password(&password)?,
        role: UserRole::Admin,
        eixo: None,
        personal: PersonalData {
            first_name: "Administrador".to_string(),
            last_name: "CEEP".to_string(),
            ..Default::default()
        },
        must_change_password: generated,
    };

    let user = storage.create_user(admin).await?;
    info!(
        "Default admin account created successfully (ID: {}, username: {})",
        user.id, user.username
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_rows_carry_modality() {
        for (_, _, rows) in CATALOG {
            for row in rows.iter() {
                let section = new_section(1, row);
                match section.shift {
                    Shift::Night => assert_ne!(section.modality, Modality::Epi),
                    _ => assert_eq!(section.modality, Modality::Epi),
                }
            }
        }
    }

    #[test]
    fn test_course_names_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|(name, _, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }
}
