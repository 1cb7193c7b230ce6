//! 咖啡馆数据模型

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cafe {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// 新建咖啡馆，字段已经过布尔转换，id 由数据库分配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCafe {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// `POST /add` 的表单字段，原样接收
#[derive(Debug, Default, Deserialize)]
pub struct AddCafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub loc: Option<String>,
    pub sockets: Option<String>,
    pub toilet: Option<String>,
    pub wifi: Option<String>,
    pub calls: Option<String>,
    pub seats: Option<String>,
    pub coffee_price: Option<String>,
}

impl From<AddCafeForm> for NewCafe {
    fn from(form: AddCafeForm) -> Self {
        Self {
            has_sockets: truthy(form.sockets.as_deref()),
            has_toilet: truthy(form.toilet.as_deref()),
            has_wifi: truthy(form.wifi.as_deref()),
            can_take_calls: truthy(form.calls.as_deref()),
            name: form.name,
            map_url: form.map_url,
            img_url: form.img_url,
            location: form.loc,
            seats: form.seats,
            coffee_price: form.coffee_price,
        }
    }
}

/// 任何非空值都为 true，包括字符串 "false"。
/// 前端依赖这一行为，不要改成真正的布尔解析。
pub fn truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub loc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceQuery {
    pub new_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CafeEnvelope {
    pub cafe: Cafe,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CafesEnvelope {
    pub cafes: Vec<Cafe>,
}
