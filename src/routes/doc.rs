use utoipa::OpenApi;

use crate::routes::{health, message, ntp, send};

#[derive(OpenApi)]
#[openapi(info(
    title = "synclab-server",
    description = "Peer message exchange and NTP clock-offset demo API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(ntp::NtpApi::openapi());
    root.merge(message::MessageApi::openapi());
    root.merge(send::SendApi::openapi());
    root
}
