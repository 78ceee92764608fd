use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, MessageDto, PageQuery},
        study_buddy::SearchQuery,
        ticket::{
            CreateTicketCommentDto, CreateTicketDto, TicketCommentDto, TicketDetailDto, TicketDto,
            TicketQuery, UpdateTicketDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::{PageRequest, Paginated, DEFAULT_LIMIT},
            ticket::{TicketFilter, TicketWithUsers, COMMENT_PAGE_LIMIT},
        },
        service::ticket::TicketService,
        state::AppState,
    },
};

/// Tag for grouping ticket endpoints in OpenAPI documentation
pub static TICKET_TAG: &str = "tickets";

fn paginated_tickets(page: Paginated<TicketWithUsers>) -> Json<ApiResponse<Vec<TicketDto>>> {
    let meta = page.meta();
    let tickets = page
        .items
        .into_iter()
        .map(TicketWithUsers::into_dto)
        .collect();

    Json(ApiResponse::paginated(tickets, meta))
}

/// Raise a help ticket.
///
/// Buddies who list the ticket's module as a skill are notified.
///
/// # Returns
/// - `201 Created` - Ticket raised as `OPEN`
/// - `400 Bad Request` - Invalid payload
#[utoipa::path(
    post,
    path = "/tickets",
    tag = TICKET_TAG,
    request_body = CreateTicketDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Ticket raised", body = ApiResponse<TicketDto>),
        (status = 400, description = "Invalid ticket data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let ticket = TicketService::new(&state.db, &state.email)
        .create(&user, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ticket.into_dto())),
    ))
}

#[utoipa::path(
    get,
    path = "/tickets",
    tag = TICKET_TAG,
    params(TicketQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of tickets", body = ApiResponse<Vec<TicketDto>>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TicketQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = TicketService::new(&state.db, &state.email)
        .list(TicketFilter::from_query(query))
        .await?;

    Ok((StatusCode::OK, paginated_tickets(page)))
}

/// Search tickets by module, topic or description.
#[utoipa::path(
    get,
    path = "/tickets/search",
    tag = TICKET_TAG,
    params(SearchQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Matching tickets", body = ApiResponse<Vec<TicketDto>>),
        (status = 400, description = "Search query is required", body = ErrorDto)
    ),
)]
pub async fn search_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = TicketService::new(&state.db, &state.email)
        .search(query.q, PageRequest::new(query.page, query.limit, DEFAULT_LIMIT))
        .await?;

    Ok((StatusCode::OK, paginated_tickets(page)))
}

#[utoipa::path(
    get,
    path = "/tickets/my/created",
    tag = TICKET_TAG,
    params(PageQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Tickets raised by the caller", body = ApiResponse<Vec<TicketDto>>)
    ),
)]
pub async fn my_created_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = TicketService::new(&state.db, &state.email)
        .my_created(user.id, PageRequest::new(query.page, query.limit, DEFAULT_LIMIT))
        .await?;

    Ok((StatusCode::OK, paginated_tickets(page)))
}

#[utoipa::path(
    get,
    path = "/tickets/my/claimed",
    tag = TICKET_TAG,
    params(PageQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Tickets claimed by the caller", body = ApiResponse<Vec<TicketDto>>)
    ),
)]
pub async fn my_claimed_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = TicketService::new(&state.db, &state.email)
        .my_claimed(user.id, PageRequest::new(query.page, query.limit, DEFAULT_LIMIT))
        .await?;

    Ok((StatusCode::OK, paginated_tickets(page)))
}

/// Get a ticket with all of its comments, oldest first.
#[utoipa::path(
    get,
    path = "/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = Uuid, Path, description = "Ticket ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<TicketDetailDto>),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let ticket = TicketService::new(&state.db, &state.email).get(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(ticket.into_dto()))))
}

/// Update a ticket.
///
/// # Access Control
/// - The creator, the claimer, or staff
///
/// # Returns
/// - `200 OK` - Updated ticket
/// - `403 Forbidden` - Caller may not update this ticket
/// - `404 Not Found` - Ticket missing
#[utoipa::path(
    patch,
    path = "/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateTicketDto,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Ticket updated", body = ApiResponse<TicketDto>),
        (status = 403, description = "Not allowed to update this ticket", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn update_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let ticket = TicketService::new(&state.db, &state.email)
        .update(&user, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(ticket.into_dto()))))
}

/// Claim an open ticket.
///
/// # Access Control
/// - `Buddy` - Caller must have the `BUDDY` or `BOTH` role
///
/// # Returns
/// - `200 OK` - Ticket claimed by the caller
/// - `400 Bad Request` - Ticket not open, or it is the caller's own
/// - `403 Forbidden` - Caller is not a study buddy
/// - `404 Not Found` - Ticket missing
#[utoipa::path(
    post,
    path = "/tickets/{id}/claim",
    tag = TICKET_TAG,
    params(("id" = Uuid, Path, description = "Ticket ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Ticket claimed", body = ApiResponse<TicketDto>),
        (status = 400, description = "Ticket is not available for claiming", body = ErrorDto),
        (status = 403, description = "Only study buddies can claim tickets", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn claim_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[Permission::Buddy])
        .await?;

    let ticket = TicketService::new(&state.db, &state.email)
        .claim(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(ticket.into_dto()))))
}

/// Comment on a ticket. The creator and claimer are notified, never the commenter.
#[utoipa::path(
    post,
    path = "/tickets/{id}/comments",
    tag = TICKET_TAG,
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = CreateTicketCommentDto,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<TicketCommentDto>),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn add_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTicketCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let comment = TicketService::new(&state.db, &state.email)
        .add_comment(&user, id, payload.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(comment.into_dto(&user))),
    ))
}

/// Get a page of a ticket's comments, oldest first. Defaults to 20 per page.
#[utoipa::path(
    get,
    path = "/tickets/{id}/comments",
    tag = TICKET_TAG,
    params(
        ("id" = Uuid, Path, description = "Ticket ID"),
        PageQuery
    ),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Page of comments", body = ApiResponse<Vec<TicketCommentDto>>),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    let page = TicketService::new(&state.db, &state.email)
        .list_comments(
            id,
            PageRequest::new(query.page, query.limit, COMMENT_PAGE_LIMIT),
        )
        .await?;

    let meta = page.meta();
    let comments = page
        .items
        .into_iter()
        .map(|(comment, author)| comment.into_dto(&author))
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(ApiResponse::paginated(comments, meta))))
}

/// Delete a ticket.
///
/// # Access Control
/// - The creator, or staff
#[utoipa::path(
    delete,
    path = "/tickets/{id}",
    tag = TICKET_TAG,
    params(("id" = Uuid, Path, description = "Ticket ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Ticket deleted", body = ApiResponse<MessageDto>),
        (status = 403, description = "Not allowed to delete this ticket", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto)
    ),
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require(&[])
        .await?;

    TicketService::new(&state.db, &state.email)
        .delete(&user, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(MessageDto {
            message: "Ticket deleted".to_string(),
        })),
    ))
}
