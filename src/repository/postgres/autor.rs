use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use crate::models::Autor;
use crate::repository::AutorRepository;

/// Author repository backed by the `"Projeto Logico".Autor` table
pub struct PostgresAutorRepository {
    pool: PgPool,
}

impl PostgresAutorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutorRepository for PostgresAutorRepository {
    async fn create(&self, autor: &Autor) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO "Projeto Logico".Autor (id, primeiro_nome, sobrenome)
               VALUES ($1, $2, $3) ON CONFLICT (id) DO NOTHING"#,
        )
        .bind(autor.id)
        .bind(&autor.primeiro_nome)
        .bind(&autor.sobrenome)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create autor: {}", e)))?;

        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Autor>> {
        let row = sqlx::query(
            r#"SELECT id, primeiro_nome, sobrenome FROM "Projeto Logico".Autor WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch autor: {}", e)))?;

        match row {
            Some(row) => Ok(Some(Autor {
                id: row.get("id"),
                primeiro_nome: row.get("primeiro_nome"),
                sobrenome: row.get("sobrenome"),
            })),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<Autor>> {
        let rows = sqlx::query(
            r#"SELECT id, primeiro_nome, sobrenome FROM "Projeto Logico".Autor ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list autores: {}", e)))?;

        let mut autores = Vec::new();
        for row in rows {
            autores.push(Autor {
                id: row.get("id"),
                primeiro_nome: row.get("primeiro_nome"),
                sobrenome: row.get("sobrenome"),
            });
        }

        Ok(autores)
    }

    async fn update(&self, autor: &Autor) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE "Projeto Logico".Autor SET primeiro_nome = $1, sobrenome = $2 WHERE id = $3"#,
        )
        .bind(&autor.primeiro_nome)
        .bind(&autor.sobrenome)
        .bind(autor.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update autor: {}", e)))?;

        Ok(())
    }

    // Escreve rows pointing at this author are left in place.
    async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM "Projeto Logico".Autor WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete autor: {}", e)))?;

        Ok(())
    }
}
