use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::{invalid_id, repo_failure};
use crate::extractors::AppJson;
use crate::models::Emprestimo;
use crate::repository::RepositorySet;

/// Create payload. The loan date is optional on the wire; a missing value
/// is stamped with the current time before the record is stored.
#[derive(Debug, Deserialize)]
pub struct NovoEmprestimo {
    pub id: i32,
    #[serde(default)]
    pub data_emprestimo: Option<DateTime<Utc>>,
    pub status: String,
    pub quant_livros: i32,
    pub cliente_usuario_cpf: String,
}

pub async fn list_emprestimos(
    State(repos): State<RepositorySet>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    match repos.emprestimos.get_all().await {
        Ok(emprestimos) => Ok(Json(emprestimos).into_response()),
        Err(e) => Err(repo_failure("Erro ao listar empréstimos", e)),
    }
}

pub async fn create_emprestimo(
    State(repos): State<RepositorySet>,
    AppJson(payload): AppJson<NovoEmprestimo>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let emprestimo = Emprestimo {
        id: payload.id,
        data_emprestimo: payload.data_emprestimo.unwrap_or_else(Utc::now),
        status: payload.status,
        quant_livros: payload.quant_livros,
        cliente_usuario_cpf: payload.cliente_usuario_cpf,
    };

    match repos.emprestimos.create(&emprestimo).await {
        Ok(()) => {
            let mut response = Json(json!({
                "message": "Empréstimo criado com sucesso",
                "emprestimo": emprestimo,
            }))
            .into_response();
            *response.status_mut() = StatusCode::CREATED;
            Ok(response)
        }
        Err(e) => Err(repo_failure("Erro ao criar empréstimo", e)),
    }
}

pub async fn update_emprestimo(
    State(repos): State<RepositorySet>,
    Path(id): Path<String>,
    AppJson(mut emprestimo): AppJson<Emprestimo>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let id: i32 = match id.parse() {
        Ok(id) => id,
        Err(_) => return Err(invalid_id()),
    };
    emprestimo.id = id;

    match repos.emprestimos.update(&emprestimo).await {
        Ok(()) => Ok(Json(json!({
            "message": "Empréstimo atualizado com sucesso",
            "emprestimo": emprestimo,
        }))
        .into_response()),
        Err(e) => Err(repo_failure("Erro ao atualizar empréstimo", e)),
    }
}

pub async fn delete_emprestimo(
    State(repos): State<RepositorySet>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let id: i32 = match id.parse() {
        Ok(id) => id,
        Err(_) => return Err(invalid_id()),
    };

    match repos.emprestimos.delete(id).await {
        Ok(()) => {
            Ok(Json(json!({"message": "Empréstimo deletado com sucesso"})).into_response())
        }
        Err(e) => Err(repo_failure("Erro ao deletar empréstimo", e)),
    }
}
