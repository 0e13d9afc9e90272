use crate::api_state::ApiContext;
use crate::routes::auth::middleware::ApiUser;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::comment::error::CommentError;
use common_services::api::comment::interfaces::AddCommentRequest;
use common_services::api::comment::service::{add_comment, delete_comment, list_comments};
use common_services::database::Comment;

/// Comments on a media item, oldest first.
#[utoipa::path(
    get,
    path = "/media/{media_id}/comments",
    tag = "Comments",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    responses(
        (status = 200, description = "Comments on the item.", body = Vec<Comment>),
        (status = 403, description = "The item is not shared with the user."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_comments_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
) -> Result<Json<Vec<Comment>>, CommentError> {
    let comments = list_comments(&context.pool, &media_id, user.id).await?;
    Ok(Json(comments))
}

/// Add a comment to a media item the user can see.
#[utoipa::path(
    post,
    path = "/media/{media_id}/comments",
    tag = "Comments",
    params(
        ("media_id" = String, Path, description = "The unique ID of the media item.")
    ),
    request_body = AddCommentRequest,
    responses(
        (status = 201, description = "Comment created.", body = Comment),
        (status = 400, description = "Comment text missing."),
        (status = 403, description = "The item is not shared with the user."),
        (status = 404, description = "No such media item."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_comment_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(media_id): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), CommentError> {
    let comment = add_comment(&context.pool, &media_id, user.id, &payload.body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment. Allowed for the author and for the media owner.
#[utoipa::path(
    delete,
    path = "/comment/{comment_id}",
    tag = "Comments",
    params(
        ("comment_id" = i64, Path, description = "The numeric ID of the comment.")
    ),
    responses(
        (status = 204, description = "Comment deleted."),
        (status = 403, description = "Neither the author nor the media owner."),
        (status = 404, description = "No such comment."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<ApiUser>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, CommentError> {
    delete_comment(&context.pool, comment_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
