use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use crate::models::Emprestimo;
use crate::repository::EmprestimoRepository;

/// Loan repository backed by the `"Projeto Logico".Emprestimo` table
pub struct PostgresEmprestimoRepository {
    pool: PgPool,
}

impl PostgresEmprestimoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmprestimoRepository for PostgresEmprestimoRepository {
    async fn create(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO "Projeto Logico".Emprestimo (id, data_emprestimo, status, quant_livros, cliente_usuario_cpf)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(emprestimo.id)
        .bind(emprestimo.data_emprestimo)
        .bind(&emprestimo.status)
        .bind(emprestimo.quant_livros)
        .bind(&emprestimo.cliente_usuario_cpf)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create emprestimo: {}", e)))?;

        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Emprestimo>> {
        let row = sqlx::query(
            r#"SELECT id, data_emprestimo, status, quant_livros, cliente_usuario_cpf
               FROM "Projeto Logico".Emprestimo WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch emprestimo: {}", e)))?;

        match row {
            Some(row) => Ok(Some(Emprestimo {
                id: row.get("id"),
                data_emprestimo: row.get("data_emprestimo"),
                status: row.get("status"),
                quant_livros: row.get("quant_livros"),
                cliente_usuario_cpf: row.get("cliente_usuario_cpf"),
            })),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<Emprestimo>> {
        let rows = sqlx::query(
            r#"SELECT id, data_emprestimo, status, quant_livros, cliente_usuario_cpf
               FROM "Projeto Logico".Emprestimo ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list emprestimos: {}", e)))?;

        let mut emprestimos = Vec::new();
        for row in rows {
            emprestimos.push(Emprestimo {
                id: row.get("id"),
                data_emprestimo: row.get("data_emprestimo"),
                status: row.get("status"),
                quant_livros: row.get("quant_livros"),
                cliente_usuario_cpf: row.get("cliente_usuario_cpf"),
            });
        }

        Ok(emprestimos)
    }

    async fn update(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE "Projeto Logico".Emprestimo
               SET data_emprestimo = $1, status = $2, quant_livros = $3, cliente_usuario_cpf = $4
               WHERE id = $5"#,
        )
        .bind(emprestimo.data_emprestimo)
        .bind(&emprestimo.status)
        .bind(emprestimo.quant_livros)
        .bind(&emprestimo.cliente_usuario_cpf)
        .bind(emprestimo.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update emprestimo: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM "Projeto Logico".Emprestimo WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete emprestimo: {}", e)))?;

        Ok(())
    }
}
