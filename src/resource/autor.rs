use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::{invalid_id, repo_failure};
use crate::extractors::AppJson;
use crate::models::Autor;
use crate::repository::RepositorySet;

pub async fn list_autores(
    State(repos): State<RepositorySet>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.autores.get_all().await {
        Ok(autores) => Ok(Json(autores).into_response()),
        Err(e) => Err(repo_failure("Erro ao listar autores", e)),
    }
}

pub async fn create_autor(
    State(repos): State<RepositorySet>,
    AppJson(autor): AppJson<Autor>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.autores.create(&autor).await {
        Ok(()) => {
            let mut response = Json(json!({
                "message": "Autor criado com sucesso",
                "autor": autor,
            }))
            .into_response();
            *response.status_mut() = StatusCode::CREATED;
            Ok(response)
        }
        Err(e) => Err(repo_failure("Erro ao criar autor", e)),
    }
}

pub async fn update_autor(
    State(repos): State<RepositorySet>,
    Path(id): Path<String>,
    AppJson(mut autor): AppJson<Autor>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let id: i32 = match id.parse() {
        Ok(id) => id,
        Err(_) => return Err(invalid_id()),
    };
    autor.id = id;

    match repos.autores.update(&autor).await {
        Ok(()) => Ok(Json(json!({
            "message": "Autor atualizado com sucesso",
            "autor": autor,
        }))
        .into_response()),
        Err(e) => Err(repo_failure("Erro ao atualizar autor", e)),
    }
}

pub async fn delete_autor(
    State(repos): State<RepositorySet>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let id: i32 = match id.parse() {
        Ok(id) => id,
        Err(_) => return Err(invalid_id()),
    };

    match repos.autores.delete(id).await {
        Ok(()) => Ok(Json(json!({"message": "Autor deletado com sucesso"})).into_response()),
        Err(e) => Err(repo_failure("Erro ao deletar autor", e)),
    }
}
