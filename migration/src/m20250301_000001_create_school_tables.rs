use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（管理员、教师、学生、职员、校领导）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::EnrollmentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(ColumnDef::new(Users::Eixo).string().null())
                    .col(ColumnDef::new(Users::BirthDate).date().null())
                    .col(ColumnDef::new(Users::BirthCity).string().null())
                    .col(ColumnDef::new(Users::Cpf).string().null().unique_key())
                    .col(ColumnDef::new(Users::Rg).string().null().unique_key())
                    .col(ColumnDef::new(Users::RgIssuer).string().null())
                    .col(ColumnDef::new(Users::RgIssuedAt).date().null())
                    .col(ColumnDef::new(Users::FatherName).string().null())
                    .col(ColumnDef::new(Users::MotherName).string().null())
                    .col(ColumnDef::new(Users::GuardianName).string().null())
                    .col(ColumnDef::new(Users::AddressStreet).string().null())
                    .col(ColumnDef::new(Users::AddressNumber).string().null())
                    .col(ColumnDef::new(Users::AddressDistrict).string().null())
                    .col(ColumnDef::new(Users::AddressCity).string().null())
                    .col(ColumnDef::new(Users::AddressZipCode).string().null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(
                        ColumnDef::new(Users::MustChangePassword)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Eixo).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表（年级/模块 + 班次 + 班号 + 模式）
        manager
            .create_table(
                Table::create()
                    .table(ClassSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassSections::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSections::YearModule).string().not_null())
                    .col(ColumnDef::new(ClassSections::Shift).string().not_null())
                    .col(
                        ColumnDef::new(ClassSections::Label)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ClassSections::Modality).string().not_null())
                    .col(ColumnDef::new(ClassSections::Room).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassSections::Table, ClassSections::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::WorkloadHours)
                            .integer()
                            .not_null()
                            .default(20),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目-班级关联表
        manager
            .create_table(
                Table::create()
                    .table(SubjectClassSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectClassSections::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectClassSections::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SubjectClassSections::SubjectId)
                            .col(SubjectClassSections::ClassSectionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectClassSections::Table, SubjectClassSections::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                SubjectClassSections::Table,
                                SubjectClassSections::ClassSectionId,
                            )
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建教师任课表
        manager
            .create_table(
                Table::create()
                    .table(TeacherAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::YearModule)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::Modality)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAssignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherAssignments::Table, TeacherAssignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherAssignments::Table, TeacherAssignments::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherAssignments::Table, TeacherAssignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生注册表
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::EnrolledOn).date().not_null())
                    .col(
                        ColumnDef::new(Enrollments::AcademicTerm)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::ClassSectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建成绩表
        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Grades::ClassSectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Grades::Mark1).double().null())
                    .col(ColumnDef::new(Grades::Mark2).double().null())
                    .col(ColumnDef::new(Grades::Mark3).double().null())
                    .col(ColumnDef::new(Grades::RemedialMark).double().null())
                    .col(ColumnDef::new(Grades::FinalAverage).double().null())
                    .col(ColumnDef::new(Grades::FinalStatus).string().not_null())
                    .col(ColumnDef::new(Grades::UpdatedBy).big_integer().null())
                    .col(ColumnDef::new(Grades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Grades::Table, Grades::ClassSectionId)
                            .to(ClassSections::Table, ClassSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建文件表
        manager
            .create_table(
                Table::create()
                    .table(Files::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Files::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Files::OriginalName).string().not_null())
                    .col(ColumnDef::new(Files::StoredName).string().not_null())
                    .col(ColumnDef::new(Files::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Files::FileType).string().not_null())
                    .col(ColumnDef::new(Files::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Files::UploadedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Files::Table, Files::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建实习表（每个学生一条）
        manager
            .create_table(
                Table::create()
                    .table(Internships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Internships::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Internships::StudentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Internships::AdvisorId).big_integer().null())
                    .col(
                        ColumnDef::new(Internships::SupervisorName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::SupervisorCompany)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::SupervisorPosition)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Internships::SupervisorEmail).string().null())
                    .col(ColumnDef::new(Internships::StartDate).date().not_null())
                    .col(ColumnDef::new(Internships::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Internships::OverallStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Internships::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Internships::Table, Internships::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Internships::Table, Internships::AdvisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建实习文件表
        manager
            .create_table(
                Table::create()
                    .table(InternshipDocuments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InternshipDocuments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::InternshipId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::DocumentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::FormData)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::AttachmentToken)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::SupervisorPdfToken)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::StudentSignedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::AdvisorSignedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::LeadershipSignedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::IsShared)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::ReturnReason)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::Version)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InternshipDocuments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                InternshipDocuments::Table,
                                InternshipDocuments::InternshipId,
                            )
                            .to(Internships::Table, Internships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一约束 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_class_sections_identity")
                    .table(ClassSections::Table)
                    .col(ClassSections::CourseId)
                    .col(ClassSections::YearModule)
                    .col(ClassSections::Shift)
                    .col(ClassSections::Label)
                    .col(ClassSections::Modality)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_teacher_assignments_identity")
                    .table(TeacherAssignments::Table)
                    .col(TeacherAssignments::TeacherId)
                    .col(TeacherAssignments::SubjectId)
                    .col(TeacherAssignments::CourseId)
                    .col(TeacherAssignments::YearModule)
                    .col(TeacherAssignments::Modality)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_enrollments_student_section")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::ClassSectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_grades_student_subject_section")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .col(Grades::SubjectId)
                    .col(Grades::ClassSectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_internship_documents_type")
                    .table(InternshipDocuments::Table)
                    .col(InternshipDocuments::InternshipId)
                    .col(InternshipDocuments::DocumentType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ==================== 查询索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_sections_course_id")
                    .table(ClassSections::Table)
                    .col(ClassSections::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_class_section_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::ClassSectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_internships_advisor_id")
                    .table(Internships::Table)
                    .col(Internships::AdvisorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_internship_documents_status")
                    .table(InternshipDocuments::Table)
                    .col(InternshipDocuments::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(InternshipDocuments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Internships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Files::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectClassSections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassSections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    EnrollmentNumber,
    PasswordHash,
    Role,
    Status,
    FirstName,
    LastName,
    Email,
    Eixo,
    BirthDate,
    BirthCity,
    Cpf,
    Rg,
    RgIssuer,
    RgIssuedAt,
    FatherName,
    MotherName,
    GuardianName,
    AddressStreet,
    AddressNumber,
    AddressDistrict,
    AddressCity,
    AddressZipCode,
    Phone,
    MustChangePassword,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Name,
    Eixo,
}

#[derive(DeriveIden)]
enum ClassSections {
    Table,
    Id,
    CourseId,
    YearModule,
    Shift,
    Label,
    Modality,
    Room,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    Name,
    WorkloadHours,
}

#[derive(DeriveIden)]
enum SubjectClassSections {
    Table,
    SubjectId,
    ClassSectionId,
}

#[derive(DeriveIden)]
enum TeacherAssignments {
    Table,
    Id,
    TeacherId,
    SubjectId,
    CourseId,
    YearModule,
    Modality,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ClassSectionId,
    EnrolledOn,
    AcademicTerm,
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    StudentId,
    SubjectId,
    ClassSectionId,
    #[sea_orm(iden = "mark_1")]
    Mark1,
    #[sea_orm(iden = "mark_2")]
    Mark2,
    #[sea_orm(iden = "mark_3")]
    Mark3,
    RemedialMark,
    FinalAverage,
    FinalStatus,
    UpdatedBy,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Files {
    Table,
    Token,
    OriginalName,
    StoredName,
    FileSize,
    FileType,
    UserId,
    UploadedAt,
}

#[derive(DeriveIden)]
enum Internships {
    Table,
    Id,
    StudentId,
    AdvisorId,
    SupervisorName,
    SupervisorCompany,
    SupervisorPosition,
    SupervisorEmail,
    StartDate,
    EndDate,
    OverallStatus,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InternshipDocuments {
    Table,
    Id,
    InternshipId,
    DocumentType,
    FormData,
    AttachmentToken,
    SupervisorPdfToken,
    Status,
    StudentSignedAt,
    AdvisorSignedAt,
    LeadershipSignedAt,
    IsShared,
    ReturnReason,
    Version,
    CreatedAt,
    UpdatedAt,
}
