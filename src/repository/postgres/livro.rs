use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::error::{AppError, AppResult};
use crate::models::{Autor, Livro};
use crate::repository::LivroRepository;

/// Book repository backed by the `"Projeto Logico".Livro` table, with the
/// author relationship stored in the `Escreve` junction table
pub struct PostgresLivroRepository {
    pool: PgPool,
}

impl PostgresLivroRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the authors linked to one book through the junction table
    async fn fetch_autores(&self, isbn: &str) -> AppResult<Vec<Autor>> {
        let rows = sqlx::query(
            r#"SELECT a.id, a.primeiro_nome, a.sobrenome
               FROM "Projeto Logico".Escreve e
               JOIN "Projeto Logico".Autor a ON a.id = e.autor_id
               WHERE e.livro_isbn = $1
               ORDER BY a.id"#,
        )
        .bind(isbn)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch autores of livro: {}", e)))?;

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
}

#[async_trait]
impl LivroRepository for PostgresLivroRepository {
    async fn create(&self, livro: &Livro) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO "Projeto Logico".Livro (isbn, titulo, edicao, num_paginas, editora_cnpj, funcionario_matricula)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(&livro.isbn)
        .bind(&livro.titulo)
        .bind(&livro.edicao)
        .bind(livro.num_paginas)
        .bind(&livro.editora_cnpj)
        .bind(livro.funcionario_matricula)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create livro: {}", e)))?;

        Ok(())
    }

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Livro>> {
        let row = sqlx::query(
            r#"SELECT isbn, titulo, edicao, num_paginas, editora_cnpj, funcionario_matricula
               FROM "Projeto Logico".Livro WHERE isbn = $1"#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch livro: {}", e)))?;

        match row {
            Some(row) => {
                let autores = self.fetch_autores(isbn).await?;
                Ok(Some(Livro {
                    isbn: row.get("isbn"),
                    titulo: row.get("titulo"),
                    edicao: row.get("edicao"),
                    num_paginas: row.get("num_paginas"),
                    editora_cnpj: row.get("editora_cnpj"),
                    funcionario_matricula: row.get("funcionario_matricula"),
                    autores,
                }))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<Livro>> {
        let rows = sqlx::query(
            r#"SELECT isbn, titulo, edicao, num_paginas, editora_cnpj, funcionario_matricula
               FROM "Projeto Logico".Livro ORDER BY isbn"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list livros: {}", e)))?;

        let mut livros = Vec::new();
        for row in rows {
            let isbn: String = row.get("isbn");
            let autores = self.fetch_autores(&isbn).await?;
            livros.push(Livro {
                isbn,
                titulo: row.get("titulo"),
                edicao: row.get("edicao"),
                num_paginas: row.get("num_paginas"),
                editora_cnpj: row.get("editora_cnpj"),
                funcionario_matricula: row.get("funcionario_matricula"),
                autores,
            });
        }

        Ok(livros)
    }

    // Only titulo and edicao are written back.
    async fn update(&self, livro: &Livro) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE "Projeto Logico".Livro SET titulo = $1, edicao = $2 WHERE isbn = $3"#,
        )
        .bind(&livro.titulo)
        .bind(&livro.edicao)
        .bind(&livro.isbn)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update livro: {}", e)))?;

        Ok(())
    }

    // Escreve rows for this ISBN are left in place.
    async fn delete(&self, isbn: &str) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM "Projeto Logico".Livro WHERE isbn = $1"#)
            .bind(isbn)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete livro: {}", e)))?;

        Ok(())
    }

    async fn add_autor(&self, isbn: &str, autor: &Autor) -> AppResult<()> {
        sqlx::query(
            r#"INSERT INTO "Projeto Logico".Escreve (livro_isbn, autor_id) VALUES ($1, $2)"#,
        )
        .bind(isbn)
        .bind(autor.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to link autor to livro: {}", e)))?;

        Ok(())
    }

    async fn remove_autor(&self, isbn: &str, autor_id: i32) -> AppResult<()> {
        sqlx::query(
            r#"DELETE FROM "Projeto Logico".Escreve WHERE livro_isbn = $1 AND autor_id = $2"#,
        )
        .bind(isbn)
        .bind(autor_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to unlink autor from livro: {}", e)))?;

        Ok(())
    }
}
