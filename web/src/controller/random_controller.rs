use axum::response::IntoResponse;

/// GET a random number in `[0, 1)`
///
/// Cheap enough to answer instantly, which makes it a probe for starvation: any delay
/// it shows comes from the control thread being busy elsewhere.
#[utoipa::path(
    get,
    path = "/random",
    responses(
        (status = 200, description = "A random number rendered as text", body = String),
    )
)]
pub async fn random() -> impl IntoResponse {
    rand::random::<f64>().to_string()
}
