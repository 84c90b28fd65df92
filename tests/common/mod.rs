use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{middleware, routing::get, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use biblioteca_server::error::AppResult;
use biblioteca_server::logging;
use biblioteca_server::models::{Autor, Emprestimo, Livro, Usuario};
use biblioteca_server::repository::{
    AutorRepository, EmprestimoRepository, LivroRepository, RepositorySet, UsuarioRepository,
};
use biblioteca_server::resource;

// In-memory repositories backing the HTTP facade tests. Maps are keyed the
// way the real backends are, so listings come back ordered by key.

#[derive(Default)]
pub struct MemoryUsuarios(Mutex<BTreeMap<String, Usuario>>);

#[async_trait]
impl UsuarioRepository for MemoryUsuarios {
    async fn create(&self, usuario: &Usuario) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(usuario.cpf.clone(), usuario.clone());
        Ok(())
    }

    async fn get_by_cpf(&self, cpf: &str) -> AppResult<Option<Usuario>> {
        Ok(self.0.lock().unwrap().get(cpf).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Usuario>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, usuario: &Usuario) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(usuario.cpf.clone(), usuario.clone());
        Ok(())
    }

    async fn delete(&self, cpf: &str) -> AppResult<()> {
        self.0.lock().unwrap().remove(cpf);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAutores(Mutex<BTreeMap<i32, Autor>>);

#[async_trait]
impl AutorRepository for MemoryAutores {
    async fn create(&self, autor: &Autor) -> AppResult<()> {
        self.0.lock().unwrap().insert(autor.id, autor.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Autor>> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Autor>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, autor: &Autor) -> AppResult<()> {
        self.0.lock().unwrap().insert(autor.id, autor.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryLivros(Mutex<BTreeMap<String, Livro>>);

#[async_trait]
impl LivroRepository for MemoryLivros {
    async fn create(&self, livro: &Livro) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(livro.isbn.clone(), livro.clone());
        Ok(())
    }

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Livro>> {
        Ok(self.0.lock().unwrap().get(isbn).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Livro>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, livro: &Livro) -> AppResult<()> {
        // Mirrors the real backends: only titulo and edicao are written.
        let mut livros = self.0.lock().unwrap();
        if let Some(stored) = livros.get_mut(&livro.isbn) {
            stored.titulo = livro.titulo.clone();
            stored.edicao = livro.edicao.clone();
        }
        Ok(())
    }

    async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.0.lock().unwrap().remove(isbn);
        Ok(())
    }

    async fn add_autor(&self, isbn: &str, autor: &Autor) -> AppResult<()> {
        let mut livros = self.0.lock().unwrap();
        if let Some(stored) = livros.get_mut(isbn) {
            stored.autores.push(autor.clone());
        }
        Ok(())
    }

    async fn remove_autor(&self, isbn: &str, autor_id: i32) -> AppResult<()> {
        let mut livros = self.0.lock().unwrap();
        if let Some(stored) = livros.get_mut(isbn) {
            stored.autores.retain(|a| a.id != autor_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEmprestimos(Mutex<BTreeMap<i32, Emprestimo>>);

#[async_trait]
impl EmprestimoRepository for MemoryEmprestimos {
    async fn create(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(emprestimo.id, emprestimo.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Emprestimo>> {
        Ok(self.0.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Emprestimo>> {
        Ok(self.0.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(emprestimo.id, emprestimo.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.0.lock().unwrap().remove(&id);
        Ok(())
    }
}

pub fn memory_set() -> RepositorySet {
    RepositorySet {
        usuarios: Arc::new(MemoryUsuarios::default()),
        autores: Arc::new(MemoryAutores::default()),
        livros: Arc::new(MemoryLivros::default()),
        emprestimos: Arc::new(MemoryEmprestimos::default()),
    }
}

/// Builds the same router shape the server runs, with an independent
/// in-memory repository set behind each backend prefix.
pub fn setup_test_app() -> Router {
    Router::new()
        .nest("/postgres", resource::routes(memory_set()))
        .nest("/mongo", resource::routes(memory_set()))
        .route("/health", get(resource::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(logging::logging_middleware))
}

// Payload builders shared across the facade tests.

#[allow(dead_code)]
pub fn usuario_json(cpf: &str, primeiro_nome: &str, sobrenome: &str) -> serde_json::Value {
    json!({
        "cpf": cpf,
        "primeiro_nome": primeiro_nome,
        "sobrenome": sobrenome,
        "data_nascimento": "1990-05-01"
    })
}

#[allow(dead_code)]
pub fn autor_json(id: i32, primeiro_nome: &str, sobrenome: &str) -> serde_json::Value {
    json!({
        "id": id,
        "primeiro_nome": primeiro_nome,
        "sobrenome": sobrenome
    })
}

#[allow(dead_code)]
pub fn livro_json(isbn: &str, titulo: &str) -> serde_json::Value {
    json!({
        "isbn": isbn,
        "titulo": titulo,
        "edicao": "1",
        "num_paginas": 280,
        "editora_cnpj": "11222333000144",
        "funcionario_matricula": 100
    })
}

#[allow(dead_code)]
pub fn emprestimo_json(id: i32, cliente_usuario_cpf: &str) -> serde_json::Value {
    json!({
        "id": id,
        "data_emprestimo": "2024-03-10T14:30:00Z",
        "status": "ativo",
        "quant_livros": 2,
        "cliente_usuario_cpf": cliente_usuario_cpf
    })
}
