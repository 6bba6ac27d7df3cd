use crate::entities::{
    customer_entity as customers, customer_profile_entity as profiles,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateCustomerRequest, CustomerDetailResponse, CustomerProfileResponse, CustomerQuery,
    CustomerResponse, PaginatedResponse, PaginationParams, UpdateCustomerProfileRequest,
    UpdateCustomerRequest, UpdatePreferencesRequest,
};
use crate::utils::{format_phone, validate_phone};
use chrono::Utc;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use serde_json::json;
use uuid::Uuid;

/// 偏好设置按键浅合并，值为覆盖语义；既有值不是对象时整体重建
fn merge_preferences(
    existing: serde_json::Value,
    incoming: serde_json::Map<String, serde_json::Value>,
) -> serde_json::Value {
    let mut merged = match existing {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in incoming {
        merged.insert(key, value);
    }
    serde_json::Value::Object(merged)
}

#[derive(Clone)]
pub struct CustomerService {
    pool: DatabaseConnection,
}

impl CustomerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 客户列表（分页，支持姓名/手机号/邮箱子串过滤）
    pub async fn list_customers(
        &self,
        query: &CustomerQuery,
    ) -> AppResult<PaginatedResponse<CustomerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut base_query = customers::Entity::find();
        if let Some(name) = query.name.as_deref().filter(|s| !s.is_empty()) {
            base_query = base_query.filter(customers::Column::Name.contains(name));
        }
        if let Some(phone) = query.phone.as_deref().filter(|s| !s.is_empty()) {
            base_query = base_query.filter(customers::Column::Phone.contains(phone));
        }
        if let Some(email) = query.email.as_deref().filter(|s| !s.is_empty()) {
            base_query = base_query.filter(customers::Column::Email.contains(email));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(customers::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<CustomerResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(items, &params, total))
    }

    /// 模糊搜索: q 同时匹配姓名 / 手机号 / 邮箱
    pub async fn search_customers(&self, q: &str) -> AppResult<Vec<CustomerResponse>> {
        let q = q.trim();
        if q.is_empty() {
            return Ok(vec![]);
        }

        let list = customers::Entity::find()
            .filter(
                Condition::any()
                    .add(customers::Column::Name.contains(q))
                    .add(customers::Column::Phone.contains(q))
                    .add(customers::Column::Email.contains(q)),
            )
            .order_by(customers::Column::Name, Order::Asc)
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 客户详情（附带扩展资料，无资料时 profile 为 null）
    pub async fn get_customer(&self, customer_id: Uuid) -> AppResult<CustomerDetailResponse> {
        let customer = self.find_customer(customer_id).await?;

        let profile = profiles::Entity::find()
            .filter(profiles::Column::CustomerId.eq(customer_id))
            .one(&self.pool)
            .await?;

        Ok(CustomerDetailResponse {
            customer: customer.into(),
            profile: profile.map(Into::into),
        })
    }

    /// 创建客户：手机号统一格式化后入库，同号冲突返回校验错误
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> AppResult<CustomerResponse> {
        let phone = format_phone(&request.phone);
        validate_phone(&phone)?;

        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Customer name cannot be empty".to_string(),
            ));
        }

        let model = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name.trim().to_string()),
            email: Set(request.email),
            phone: Set(phone),
            birth_date: Set(request.birth_date),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::ValidationError(
                "A customer with this phone number already exists".to_string(),
            ),
            _ => e.into(),
        })?;

        log::info!("Customer created: {} ({})", model.name, model.id);
        Ok(model.into())
    }

    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerRequest,
    ) -> AppResult<CustomerResponse> {
        let customer = self.find_customer(customer_id).await?;
        let mut model = customer.into_active_model();

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(AppError::ValidationError(
                    "Customer name cannot be empty".to_string(),
                ));
            }
            model.name = Set(name.trim().to_string());
        }
        if let Some(email) = request.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = request.phone {
            let phone = format_phone(&phone);
            validate_phone(&phone)?;
            model.phone = Set(phone);
        }
        if let Some(birth_date) = request.birth_date {
            model.birth_date = Set(birth_date);
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::ValidationError(
                "A customer with this phone number already exists".to_string(),
            ),
            _ => e.into(),
        })?;

        Ok(updated.into())
    }

    /// 删除客户 (资料 / 纪念日 / 预订 / 会话 / 记录随外键级联删除)
    pub async fn delete_customer(&self, customer_id: Uuid) -> AppResult<()> {
        let customer = self.find_customer(customer_id).await?;
        customers::Entity::delete_by_id(customer.id)
            .exec(&self.pool)
            .await?;
        log::info!("Customer deleted: {}", customer_id);
        Ok(())
    }

    // -----------------------------
    // 扩展资料
    // -----------------------------

    pub async fn get_profile(&self, customer_id: Uuid) -> AppResult<CustomerProfileResponse> {
        self.find_customer(customer_id).await?;
        let profile = self.get_or_create_profile(customer_id).await?;
        Ok(profile.into())
    }

    /// 更新扩展资料（不存在则先创建空资料）
    pub async fn update_profile(
        &self,
        customer_id: Uuid,
        request: UpdateCustomerProfileRequest,
    ) -> AppResult<CustomerProfileResponse> {
        self.find_customer(customer_id).await?;
        let profile = self.get_or_create_profile(customer_id).await?;
        let mut model = profile.into_active_model();

        if let Some(address) = request.address {
            model.address = Set(Some(address));
        }
        if let Some(city) = request.city {
            model.city = Set(Some(city));
        }
        if let Some(country) = request.country {
            model.country = Set(Some(country));
        }
        if let Some(notes) = request.notes {
            model.notes = Set(Some(notes));
        }
        if let Some(is_vip) = request.is_vip {
            model.is_vip = Set(is_vip);
        }

        Ok(model.update(&self.pool).await?.into())
    }

    /// 合并偏好设置：请求体按键浅合并进已有 preferences，值为覆盖语义
    pub async fn update_preferences(
        &self,
        customer_id: Uuid,
        request: UpdatePreferencesRequest,
    ) -> AppResult<CustomerProfileResponse> {
        let incoming = match request.preferences {
            serde_json::Value::Object(map) => map,
            _ => {
                return Err(AppError::ValidationError(
                    "preferences must be a JSON object".to_string(),
                ))
            }
        };

        self.find_customer(customer_id).await?;
        let profile = self.get_or_create_profile(customer_id).await?;
        let merged = merge_preferences(profile.preferences.clone(), incoming);

        let mut model = profile.into_active_model();
        model.preferences = Set(merged);

        Ok(model.update(&self.pool).await?.into())
    }

    async fn find_customer(&self, customer_id: Uuid) -> AppResult<customers::Model> {
        customers::Entity::find_by_id(customer_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))
    }

    /// 扩展资料 get-or-create，并发创建由 customer_id 唯一索引仲裁
    async fn get_or_create_profile(&self, customer_id: Uuid) -> AppResult<profiles::Model> {
        if let Some(profile) = profiles::Entity::find()
            .filter(profiles::Column::CustomerId.eq(customer_id))
            .one(&self.pool)
            .await?
        {
            return Ok(profile);
        }

        let insert = profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            preferences: Set(json!({})),
            is_vip: Set(false),
            ..Default::default()
        };

        match insert.insert(&self.pool).await {
            Ok(model) => Ok(model),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                profiles::Entity::find()
                    .filter(profiles::Column::CustomerId.eq(customer_id))
                    .one(&self.pool)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError(
                            "Customer profile disappeared after insert conflict".to_string(),
                        )
                    })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        match v {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_merge_preferences_adds_and_overwrites() {
        let existing = json!({"room": "sea view", "pillow": "soft"});
        let incoming = obj(json!({"pillow": "firm", "newspaper": "daily"}));
        let merged = merge_preferences(existing, incoming);
        assert_eq!(
            merged,
            json!({"room": "sea view", "pillow": "firm", "newspaper": "daily"})
        );
    }

    #[test]
    fn test_merge_preferences_keeps_untouched_keys() {
        let existing = json!({"diet": "vegetarian"});
        let merged = merge_preferences(existing, obj(json!({})));
        assert_eq!(merged, json!({"diet": "vegetarian"}));
    }

    #[test]
    fn test_merge_preferences_rebuilds_non_object() {
        let merged = merge_preferences(json!(null), obj(json!({"floor": "high"})));
        assert_eq!(merged, json!({"floor": "high"}));
    }
}
