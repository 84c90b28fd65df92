use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde_json::json;

use crate::error::AppError;
use crate::repository::RepositorySet;

pub mod autor;
pub mod emprestimo;
pub mod livro;
pub mod usuario;

/// Entity routes for one backend. The caller mounts the returned router
/// under the backend's URL prefix (`/postgres` or `/mongo`).
pub fn routes(repos: RepositorySet) -> Router {
    Router::new()
        .route(
            "/usuarios",
            get(usuario::list_usuarios).post(usuario::create_usuario),
        )
        .route(
            "/usuarios/{cpf}",
            put(usuario::update_usuario).delete(usuario::delete_usuario),
        )
        .route(
            "/autores",
            get(autor::list_autores).post(autor::create_autor),
        )
        .route(
            "/autores/{id}",
            put(autor::update_autor).delete(autor::delete_autor),
        )
        .route(
            "/livros",
            get(livro::list_livros).post(livro::create_livro),
        )
        .route(
            "/livros/{isbn}",
            put(livro::update_livro).delete(livro::delete_livro),
        )
        .route(
            "/emprestimos",
            get(emprestimo::list_emprestimos).post(emprestimo::create_emprestimo),
        )
        .route(
            "/emprestimos/{id}",
            put(emprestimo::update_emprestimo).delete(emprestimo::delete_emprestimo),
        )
        .with_state(repos)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

// Failure envelopes shared by the entity handlers.

pub(crate) fn repo_failure(context: &str, err: AppError) -> (StatusCode, Json<serde_json::Value>) {
    AppError::Internal(format!("{}: {}", context, err)).to_response()
}

pub(crate) fn invalid_id() -> (StatusCode, Json<serde_json::Value>) {
    AppError::BadRequest("ID inválido".to_string()).to_response()
}
