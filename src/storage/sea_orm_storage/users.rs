//! 用户存储操作

use super::{SeaOrmStorage, db_error, normalize_page};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    users::{
        entities::{PersonalData, User, UserRole, UserStatus},
        requests::{NewUser, UserListQuery, UserUpdate},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 将个人资料写入 ActiveModel
fn apply_personal(model: &mut ActiveModel, personal: PersonalData) {
    model.first_name = Set(personal.first_name.trim().to_string());
    model.last_name = Set(personal.last_name.trim().to_string());
    model.email = Set(personal.email);
    model.birth_date = Set(personal.birth_date);
    model.birth_city = Set(personal.birth_city);
    model.cpf = Set(personal.cpf);
    model.rg = Set(personal.rg);
    model.rg_issuer = Set(personal.rg_issuer);
    model.rg_issued_at = Set(personal.rg_issued_at);
    model.father_name = Set(personal.father_name);
    model.mother_name = Set(personal.mother_name);
    model.guardian_name = Set(personal.guardian_name);
    model.address_street = Set(personal.address.street);
    model.address_number = Set(personal.address.number);
    model.address_district = Set(personal.address.district);
    model.address_city = Set(personal.address.city);
    model.address_zip_code = Set(personal.address.zip_code);
    model.phone = Set(personal.phone);
}

impl SeaOrmStorage {
    /// 创建用户，用户名统一存为小写
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            username: Set(user.username.trim().to_lowercase()),
            enrollment_number: Set(user.enrollment_number),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            eixo: Set(user.eixo.map(|e| e.to_string())),
            must_change_password: Set(user.must_change_password),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_personal(&mut model, user.personal);

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建用户失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 批量获取用户
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Users::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| db_error("批量查询用户失败", e))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 登录查找
    ///
    /// 先按用户名或学号匹配；都未命中时，管理员还可以用名或姓登录。
    /// 比较均不区分大小写。
    pub async fn find_user_for_login_impl(&self, identifier: &str) -> Result<Option<User>> {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let direct = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(needle.as_str()))
                    .add(Column::EnrollmentNumber.eq(needle.as_str()))
                    .add(Column::EnrollmentNumber.eq(identifier.trim())),
            )
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        if let Some(model) = direct {
            return Ok(Some(model.into_user()));
        }

        // 管理员数量很少，直接在内存中比较
        let admins = Users::find()
            .filter(Column::Role.eq(UserRole::Admin.to_string()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询管理员失败", e))?;

        Ok(admins
            .into_iter()
            .find(|m| {
                m.first_name.trim().to_lowercase() == needle
                    || m.last_name.trim().to_lowercase() == needle
            })
            .map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::EnrollmentNumber.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 角色筛选
        if !query.roles.is_empty() {
            select = select.filter(Column::Role.is_in(query.roles.iter().map(|r| r.to_string())));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_asc(Column::FirstName)
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询用户总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询用户页数失败", e))?;
        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| db_error("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, update: UserUpdate) -> Result<Option<User>> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(personal) = update.personal {
            apply_personal(&mut model, personal);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(eixo) = update.eixo {
            model.eixo = Set(eixo.map(|e| e.to_string()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新用户失败", e))?;

        Ok(Some(result.into_user()))
    }

    /// 更新密码
    pub async fn update_user_password_impl(
        &self,
        id: i64,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool> {
        let existing = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut model: ActiveModel = existing.into();
        model.password_hash = Set(password_hash.to_string());
        model.must_change_password = Set(must_change_password);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新密码失败", e))?;

        Ok(true)
    }

    /// 删除用户，关联的注册、任课、成绩与实习一并级联删除
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("更新登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 按角色统计
    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        Users::find()
            .filter(Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计用户数量失败", e))
    }
}
