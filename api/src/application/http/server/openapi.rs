use crate::application::http::{chat::router::ChatApiDoc, menu::router::MenuApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nutriplan API"
    ),
    nest(
        (path = "/recommended-menus", api = MenuApiDoc),
        (path = "/chat", api = ChatApiDoc),
    )
)]
pub struct ApiDoc;
