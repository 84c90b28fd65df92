use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::repo_failure;
use crate::extractors::AppJson;
use crate::models::Livro;
use crate::repository::RepositorySet;

pub async fn list_livros(
    State(repos): State<RepositorySet>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.livros.get_all().await {
        Ok(livros) => Ok(Json(livros).into_response()),
        Err(e) => Err(repo_failure("Erro ao listar livros", e)),
    }
}

pub async fn create_livro(
    State(repos): State<RepositorySet>,
    AppJson(livro): AppJson<Livro>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.livros.create(&livro).await {
        Ok(()) => {
            let mut response = Json(json!({
                "message": "Livro criado com sucesso",
                "livro": livro,
            }))
            .into_response();
            *response.status_mut() = StatusCode::CREATED;
            Ok(response)
        }
        Err(e) => Err(repo_failure("Erro ao criar livro", e)),
    }
}

pub async fn update_livro(
    State(repos): State<RepositorySet>,
    Path(isbn): Path<String>,
    AppJson(mut livro): AppJson<Livro>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    // The key from the URL wins over whatever the body carries.
    livro.isbn = isbn;

    match repos.livros.update(&livro).await {
        Ok(()) => Ok(Json(json!({
            "message": "Livro atualizado com sucesso",
            "livro": livro,
        }))
        .into_response()),
        Err(e) => Err(repo_failure("Erro ao atualizar livro", e)),
    }
}

pub async fn delete_livro(
    State(repos): State<RepositorySet>,
    Path(isbn): Path<String>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.livros.delete(&isbn).await {
        Ok(()) => Ok(Json(json!({"message": "Livro deletado com sucesso"})).into_response()),
        Err(e) => Err(repo_failure("Erro ao deletar livro", e)),
    }
}
