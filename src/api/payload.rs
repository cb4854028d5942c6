use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::{Form, FormRejection};
use serde::de::DeserializeOwned;

/// Request body accepted either as JSON or as
/// `application/x-www-form-urlencoded`.
///
/// Form bodies go through `axum_extra`'s `Form`, so repeated keys
/// (`tags=a&tags=b`) collect into a sequence.
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[derive(Debug)]
pub enum PayloadRejection {
    Json(JsonRejection),
    Form(FormRejection),
}

impl std::fmt::Display for PayloadRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadRejection::Json(e) => write!(f, "{e}"),
            PayloadRejection::Form(e) => write!(f, "{e}"),
        }
    }
}

impl IntoResponse for PayloadRejection {
    fn into_response(self) -> Response {
        match self {
            PayloadRejection::Json(e) => e.into_response(),
            PayloadRejection::Form(e) => e.into_response(),
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = PayloadRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(PayloadRejection::Form)?;
            Ok(Payload(value))
        } else {
            let axum::Json(value) = axum::Json::<T>::from_request(req, state)
                .await
                .map_err(PayloadRejection::Json)?;
            Ok(Payload(value))
        }
    }
}
