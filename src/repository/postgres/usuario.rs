use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use crate::models::Usuario;
use crate::repository::UsuarioRepository;

/// Patron repository backed by the `"Projeto Logico".Usuario` table
pub struct PostgresUsuarioRepository {
    pool: PgPool,
}

impl PostgresUsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsuarioRepository for PostgresUsuarioRepository {
    async fn create(&self, usuario: &Usuario) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO "Projeto Logico".Usuario (cpf, data_nascimento, sobrenome, primeiro_nome)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(&usuario.cpf)
        .bind(usuario.data_nascimento)
        .bind(&usuario.sobrenome)
        .bind(&usuario.primeiro_nome)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create usuario: {}", e)))?;

        Ok(())
    }

    async fn get_by_cpf(&self, cpf: &str) -> AppResult<Option<Usuario>> {
        let row = sqlx::query(
            r#"SELECT cpf, data_nascimento, sobrenome, primeiro_nome
               FROM "Projeto Logico".Usuario WHERE cpf = $1"#,
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch usuario: {}", e)))?;

        match row {
            Some(row) => Ok(Some(Usuario {
                cpf: row.get("cpf"),
                primeiro_nome: row.get("primeiro_nome"),
                sobrenome: row.get("sobrenome"),
                data_nascimento: row.get("data_nascimento"),
            })),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<Usuario>> {
        let rows = sqlx::query(
            r#"SELECT cpf, data_nascimento, sobrenome, primeiro_nome
               FROM "Projeto Logico".Usuario ORDER BY cpf"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list usuarios: {}", e)))?;

        let mut usuarios = Vec::new();
        for row in rows {
            usuarios.push(Usuario {
                cpf: row.get("cpf"),
                primeiro_nome: row.get("primeiro_nome"),
                sobrenome: row.get("sobrenome"),
                data_nascimento: row.get("data_nascimento"),
            });
        }

        Ok(usuarios)
    }

    async fn update(&self, usuario: &Usuario) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE "Projeto Logico".Usuario
               SET data_nascimento = $1, sobrenome = $2, primeiro_nome = $3
               WHERE cpf = $4"#,
        )
        .bind(usuario.data_nascimento)
        .bind(&usuario.sobrenome)
        .bind(&usuario.primeiro_nome)
        .bind(&usuario.cpf)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update usuario: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, cpf: &str) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM "Projeto Logico".Usuario WHERE cpf = $1"#)
            .bind(cpf)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete usuario: {}", e)))?;

        Ok(())
    }
}
