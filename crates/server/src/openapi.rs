use serde::Serialize;
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page index
    pub page: Option<u32>,
    /// items per page, clamped to 1..=100
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(Serialize, ToSchema)]
pub struct LoginResponseDoc { pub token: String, pub user: UserDoc }

#[derive(Serialize, ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
pub struct DeleteSummaryDoc { pub deleted: u64 }

#[derive(Serialize, ToSchema)]
pub struct ImportSummaryDoc { pub imported: usize }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    pub id: i32,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    /// ADMIN, OWNER or CUSTOMER
    pub role: String,
    #[schema(format = DateTime)]
    pub created_at: String,
    #[schema(format = DateTime)]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDoc {
    pub email: String,
    pub phone: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDoc {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDoc { pub current_password: String, pub new_password: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    #[schema(example = "08:00:00")]
    pub open_time: Option<String>,
    #[schema(example = "22:00:00")]
    pub close_time: Option<String>,
    pub status: String,
    pub owner_id: i32,
    #[schema(format = DateTime)]
    pub created_at: String,
    #[schema(format = DateTime)]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreInputDoc {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    /// HH:MM or HH:MM:SS
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub status: String,
    pub owner_id: i32,
}

/// `storeDTO` is a JSON part; `imageFile` is an optional file part.
#[derive(Serialize, ToSchema)]
pub struct StoreFormDoc {
    #[serde(rename = "storeDTO")]
    pub store_dto: StoreInputDoc,
    #[serde(rename = "imageFile")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_file: Option<Vec<u8>>,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryDoc { pub id: i32, pub name: String, pub status: String }

#[derive(Serialize, ToSchema)]
pub struct CategoryInputDoc { pub name: String, pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOfServiceDoc {
    pub id: i32,
    pub name: String,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct CategoryOfServiceFormDoc {
    #[serde(rename = "categoryDTO")]
    pub category_dto: CategoryInputDoc,
    #[serde(rename = "imageFile")]
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_file: Option<Vec<u8>>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDoc { pub id: i32, pub product_name: String, pub quantity: i32, pub unit_price: i64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDoc {
    pub id: i32,
    pub user_id: i32,
    pub store_id: Option<i32>,
    pub status: String,
    /// minor currency units
    pub total_amount: i64,
    #[schema(format = DateTime)]
    pub created_at: String,
    pub items: Vec<OrderItemDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInputDoc { pub product_name: String, pub quantity: i32, pub unit_price: i64 }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDoc {
    pub user_id: i32,
    pub store_id: Option<i32>,
    /// defaults to PENDING
    pub status: Option<String>,
    pub items: Vec<OrderItemInputDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::users::list,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::users::delete,
        crate::routes::users::delete_multiple,
        crate::routes::users::change_password,
        crate::routes::users::orders,
        crate::routes::stores::create,
        crate::routes::stores::list,
        crate::routes::stores::get,
        crate::routes::stores::image,
        crate::routes::stores::update,
        crate::routes::stores::delete,
        crate::routes::stores::delete_multiple,
        crate::routes::stores::import,
        crate::routes::categories::create,
        crate::routes::categories::list,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
        crate::routes::categories::delete_multiple,
        crate::routes::categories::import,
        crate::routes::category_of_services::create,
        crate::routes::category_of_services::list,
        crate::routes::category_of_services::get,
        crate::routes::category_of_services::image,
        crate::routes::category_of_services::update,
        crate::routes::category_of_services::delete,
        crate::routes::category_of_services::delete_multiple,
        crate::routes::category_of_services::import,
        crate::routes::orders::create,
        crate::routes::orders::list,
        crate::routes::orders::get,
        crate::routes::orders::delete,
        crate::routes::orders::delete_multiple,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponseDoc,
            MessageDoc,
            DeleteSummaryDoc,
            ImportSummaryDoc,
            UserDoc,
            CreateUserDoc,
            UpdateUserDoc,
            ChangePasswordDoc,
            StoreDoc,
            StoreInputDoc,
            StoreFormDoc,
            CategoryDoc,
            CategoryInputDoc,
            CategoryOfServiceDoc,
            CategoryOfServiceFormDoc,
            OrderItemDoc,
            OrderDoc,
            OrderItemInputDoc,
            CreateOrderDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "stores"),
        (name = "categories"),
        (name = "categoryOfServices"),
        (name = "orders")
    )
)]
pub struct ApiDoc;
