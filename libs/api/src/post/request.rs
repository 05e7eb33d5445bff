use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreatePostReq {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[serde_as]
#[derive(Deserialize, ToSchema)]
pub struct ReplacePostReq {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i32>)]
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
}
