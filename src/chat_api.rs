use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::message_store::MessageStore;

#[derive(Deserialize)]
pub struct ListParams {
    start_from: Option<DateTime<Utc>>,
}

// Unknown fields are ignored, so a client-supplied `time` is dropped here
// and the store stamps its own.
#[derive(Deserialize)]
pub struct MessageDraft {
    text: String,
    author: String,
}

#[get("/message")]
async fn get_messages(
    params: web::Query<ListParams>,
    store: web::Data<MessageStore>,
) -> impl Responder {
    let batch = store.list(params.start_from);
    HttpResponse::Ok().json(batch)
}

#[post("/message")]
async fn post_message(
    draft: web::Json<MessageDraft>,
    store: web::Data<MessageStore>,
) -> impl Responder {
    let draft = draft.into_inner();
    let message = store.append(draft.text, draft.author);
    tracing::info!(author = %message.author, "message appended");
    HttpResponse::Ok().json(json!({ "ok": true }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_messages).service(post_message);
}
