use actix_web::web::{delete, get, post, scope, ServiceConfig};
use lexportal_api::{
  consultation::{
    create::create_consultation,
    list::list_consultations,
    read::get_consultation,
  },
  document_review::{
    create::create_document_review,
    list::list_document_reviews,
    read::get_document_review,
  },
  subscription::subscribe_submissions,
};
use lexportal_routes::{
  files::{delete::delete_file, download::get_file, upload::upload_file},
  payments::{create::create_payment, webhook::paymongo_webhook},
};

pub fn config(cfg: &mut ServiceConfig) {
  cfg.service(
    scope("/api/v4")
      .service(
        scope("/consultation")
          .route("", post().to(create_consultation))
          .route("/list", get().to(list_consultations))
          .route("/{id}", get().to(get_consultation)),
      )
      .service(
        scope("/document-review")
          .route("", post().to(create_document_review))
          .route("/list", get().to(list_document_reviews))
          .route("/{id}", get().to(get_document_review)),
      )
      .service(
        scope("/payment")
          .route("", post().to(create_payment))
          // PayMongo calls this; it carries no client auth
          .route("/webhook", post().to(paymongo_webhook)),
      )
      .service(
        scope("/files")
          .route("/upload/{category}", post().to(upload_file))
          .route("/{category}/{owner_id}/{filename}", get().to(get_file))
          .route("/{category}/{filename}", delete().to(delete_file)),
      )
      .route("/submissions/subscribe", get().to(subscribe_submissions)),
  );
}
