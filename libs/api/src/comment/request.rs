use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use utoipa::ToSchema;

#[serde_as]
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentReq {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i32>)]
    pub post_id: Option<i32>,
    pub text: Option<String>,
}

#[serde_as]
#[derive(Deserialize, ToSchema)]
pub struct ReplaceCommentReq {
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[schema(value_type = Option<i32>)]
    pub id: Option<i32>,
    pub text: Option<String>,
}
