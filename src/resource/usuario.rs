use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::repo_failure;
use crate::extractors::AppJson;
use crate::models::Usuario;
use crate::repository::RepositorySet;

pub async fn list_usuarios(
    State(repos): State<RepositorySet>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.usuarios.get_all().await {
        Ok(usuarios) => Ok(Json(usuarios).into_response()),
        Err(e) => Err(repo_failure("Erro ao listar usuários", e)),
    }
}

pub async fn create_usuario(
    State(repos): State<RepositorySet>,
    AppJson(usuario): AppJson<Usuario>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.usuarios.create(&usuario).await {
        Ok(()) => {
            let mut response = Json(json!({
                "message": "Usuário criado com sucesso",
                "usuario": usuario,
            }))
            .into_response();
            *response.status_mut() = StatusCode::CREATED;
            Ok(response)
        }
        Err(e) => Err(repo_failure("Erro ao criar usuário", e)),
    }
}

pub async fn update_usuario(
    State(repos): State<RepositorySet>,
    Path(cpf): Path<String>,
    AppJson(mut usuario): AppJson<Usuario>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    // The key from the URL wins over whatever the body carries.
    usuario.cpf = cpf;

    match repos.usuarios.update(&usuario).await {
        Ok(()) => Ok(Json(json!({
            "message": "Usuário atualizado com sucesso",
            "usuario": usuario,
        }))
        .into_response()),
        Err(e) => Err(repo_failure("Erro ao atualizar usuário", e)),
    }
}

pub async fn delete_usuario(
    State(repos): State<RepositorySet>,
    Path(cpf): Path<String>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.usuarios.delete(&cpf).await {
        Ok(()) => Ok(Json(json!({"message": "Usuário deletado com sucesso"})).into_response()),
        Err(e) => Err(repo_failure("Erro ao deletar usuário", e)),
    }
}
