use crate::classifier::Classifier;
use crate::models::{PredictForm, PredictionResponse, ARTICLE_FIELD};
use actix_multipart::Multipart;
use actix_web::error::UrlencodedError;
use actix_web::guard::{self, GuardContext};
use actix_web::http::header::{self, ContentType};
use actix_web::{web, Error, HttpResponse, Result};
use futures_util::StreamExt;
use log::{debug, error};

/// Largest urlencoded body accepted on `/predict`.
pub const FORM_LIMIT: usize = 2 * 1024 * 1024;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(
            web::resource("/predict")
                .app_data(web::FormConfig::default().limit(FORM_LIMIT))
                .route(
                    web::post()
                        .guard(guard::fn_guard(is_multipart))
                        .to(predict_multipart),
                )
                .route(web::post().to(predict_form)),
        );
}

fn is_multipart(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.starts_with("multipart/form-data"))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}

/// `application/x-www-form-urlencoded` submissions. A request that is not
/// urlencoded at all counts as no article; any other body error is returned.
pub async fn predict_form(
    classifier: web::Data<dyn Classifier>,
    form: Result<web::Form<Vec<(String, String)>>, Error>,
) -> Result<HttpResponse, Error> {
    let fields = match form {
        Ok(form) => form.into_inner(),
        Err(e)
            if matches!(
                e.as_error::<UrlencodedError>(),
                Some(UrlencodedError::ContentType)
            ) =>
        {
            Vec::new()
        }
        Err(e) => {
            debug!("rejecting unreadable form body: {}", e);
            return Err(e);
        }
    };

    respond(classifier, PredictForm::from_fields(fields).article()).await
}

/// `multipart/form-data` submissions, as sent by the page's `FormData`.
pub async fn predict_multipart(
    classifier: web::Data<dyn Classifier>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut article = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let wanted = field.content_disposition().get_name() == Some(ARTICLE_FIELD);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if wanted {
                data.extend_from_slice(&chunk);
            }
        }

        if wanted && article.is_none() {
            article = Some(String::from_utf8_lossy(&data).into_owned());
        }
    }

    let form = PredictForm {
        article_text: article,
    };
    respond(classifier, form.article()).await
}

async fn respond(
    classifier: web::Data<dyn Classifier>,
    article: Option<String>,
) -> Result<HttpResponse, Error> {
    let text = match article {
        Some(text) => text,
        None => {
            debug!("predict called without article text");
            return Ok(HttpResponse::Ok().json(PredictionResponse::no_article()));
        }
    };

    let prediction = web::block(move || classifier.classify(&text))
        .await?
        .map_err(|e| {
            error!("Classification failed: {}", e);
            actix_web::error::ErrorInternalServerError("Could not prepare classifier input")
        })?;

    Ok(HttpResponse::Ok().json(PredictionResponse::new(prediction)))
}
