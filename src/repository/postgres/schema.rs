use crate::error::{AppError, AppResult};
use sqlx::PgPool;

/// Create the `"Projeto Logico"` schema and its five tables if missing.
///
/// `Escreve` carries no foreign keys; junction rows may dangle after an
/// author or book is deleted.
pub async fn init_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(r#"CREATE SCHEMA IF NOT EXISTS "Projeto Logico""#)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create schema: {}", e)))?;

    let tables = vec![
        r#"
        CREATE TABLE IF NOT EXISTS "Projeto Logico".Usuario (
            cpf TEXT PRIMARY KEY,
            primeiro_nome TEXT NOT NULL,
            sobrenome TEXT NOT NULL,
            data_nascimento DATE NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Projeto Logico".Autor (
            id INTEGER PRIMARY KEY,
            primeiro_nome TEXT NOT NULL,
            sobrenome TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Projeto Logico".Livro (
            isbn TEXT PRIMARY KEY,
            titulo TEXT NOT NULL,
            edicao TEXT NOT NULL,
            num_paginas INTEGER NOT NULL,
            editora_cnpj TEXT NOT NULL,
            funcionario_matricula INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Projeto Logico".Escreve (
            livro_isbn TEXT NOT NULL,
            autor_id INTEGER NOT NULL,
            PRIMARY KEY (livro_isbn, autor_id)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS "Projeto Logico".Emprestimo (
            id INTEGER PRIMARY KEY,
            data_emprestimo TIMESTAMPTZ NOT NULL,
            status TEXT NOT NULL,
            quant_livros INTEGER NOT NULL,
            cliente_usuario_cpf TEXT NOT NULL
        )
        "#,
    ];

    for sql in tables {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create table: {}", e)))?;
    }

    Ok(())
}

/// Drop the whole schema (for cleanup/testing)
#[allow(dead_code)]
pub async fn drop_schema(pool: &PgPool) -> AppResult<()> {
    sqlx::query(r#"DROP SCHEMA IF EXISTS "Projeto Logico" CASCADE"#)
        .execute(pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to drop schema: {}", e)))?;

    Ok(())
}
