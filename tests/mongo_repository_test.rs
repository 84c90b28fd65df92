//! Integration tests against a live MongoDB instance.
//!
//! They are skipped unless MONGO_URL points at a reachable server, e.g.
//! `MONGO_URL=mongodb://localhost:27017`. Documents are written to the
//! `bibliotecaDB_test` database, not the one the server uses.

use chrono::{NaiveDate, TimeZone, Utc};
use mongodb::Client;

use biblioteca_server::models::{Autor, Emprestimo, Livro, Usuario};
use biblioteca_server::repository::RepositorySet;

async fn test_set() -> Option<RepositorySet> {
    let url = std::env::var("MONGO_URL").ok()?;
    let client = Client::with_uri_str(&url)
        .await
        .expect("failed to connect to MongoDB");
    Some(RepositorySet::mongo(client.database("bibliotecaDB_test")))
}

fn livro(isbn: &str) -> Livro {
    Livro {
        isbn: isbn.to_string(),
        titulo: "Capitães da Areia".to_string(),
        edicao: "1".to_string(),
        num_paginas: 280,
        editora_cnpj: "11222333000144".to_string(),
        funcionario_matricula: 100,
        autores: Vec::new(),
    }
}

#[tokio::test]
async fn test_usuario_crud_cycle() {
    let Some(repos) = test_set().await else {
        return;
    };

    let usuario = Usuario {
        cpf: "91000000001".to_string(),
        primeiro_nome: "Ana".to_string(),
        sobrenome: "Silva".to_string(),
        data_nascimento: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
    };
    repos.usuarios.delete(&usuario.cpf).await.unwrap();

    repos.usuarios.create(&usuario).await.unwrap();
    let fetched = repos.usuarios.get_by_cpf(&usuario.cpf).await.unwrap();
    assert_eq!(fetched, Some(usuario.clone()));

    let mut changed = usuario.clone();
    changed.primeiro_nome = "Beatriz".to_string();
    repos.usuarios.update(&changed).await.unwrap();
    let fetched = repos.usuarios.get_by_cpf(&usuario.cpf).await.unwrap();
    assert_eq!(fetched, Some(changed));

    repos.usuarios.delete(&usuario.cpf).await.unwrap();
    assert_eq!(repos.usuarios.get_by_cpf(&usuario.cpf).await.unwrap(), None);
}

#[tokio::test]
async fn test_autor_duplicate_create_is_rejected() {
    let Some(repos) = test_set().await else {
        return;
    };

    let autor = Autor {
        id: 920_001,
        primeiro_nome: "Jorge".to_string(),
        sobrenome: "Amado".to_string(),
    };
    repos.autores.delete(autor.id).await.unwrap();

    repos.autores.create(&autor).await.unwrap();

    // Unlike the relational backend, a second insert with the same id fails.
    let result = repos.autores.create(&autor).await;
    assert!(result.is_err());

    let fetched = repos.autores.get_by_id(autor.id).await.unwrap();
    assert_eq!(fetched, Some(autor.clone()));

    repos.autores.delete(autor.id).await.unwrap();
}

#[tokio::test]
async fn test_emprestimo_crud_cycle() {
    let Some(repos) = test_set().await else {
        return;
    };

    let emprestimo = Emprestimo {
        id: 920_002,
        data_emprestimo: Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap(),
        status: "ativo".to_string(),
        quant_livros: 2,
        cliente_usuario_cpf: "91000000002".to_string(),
    };
    repos.emprestimos.delete(emprestimo.id).await.unwrap();

    repos.emprestimos.create(&emprestimo).await.unwrap();
    let fetched = repos.emprestimos.get_by_id(emprestimo.id).await.unwrap();
    assert_eq!(fetched, Some(emprestimo.clone()));

    let mut changed = emprestimo.clone();
    changed.status = "devolvido".to_string();
    repos.emprestimos.update(&changed).await.unwrap();
    let fetched = repos.emprestimos.get_by_id(emprestimo.id).await.unwrap();
    assert_eq!(fetched, Some(changed));

    repos.emprestimos.delete(emprestimo.id).await.unwrap();
    assert_eq!(repos.emprestimos.get_by_id(emprestimo.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_livro_embedded_authors_add_and_remove() {
    let Some(repos) = test_set().await else {
        return;
    };

    let isbn = "it-mongo-embed-1";
    let autor = Autor {
        id: 920_003,
        primeiro_nome: "Clarice".to_string(),
        sobrenome: "Lispector".to_string(),
    };
    repos.livros.delete(isbn).await.unwrap();

    repos.livros.create(&livro(isbn)).await.unwrap();
    repos.livros.add_autor(isbn, &autor).await.unwrap();

    let fetched = repos.livros.get_by_isbn(isbn).await.unwrap().unwrap();
    assert_eq!(fetched.autores, vec![autor.clone()]);

    repos.livros.remove_autor(isbn, autor.id).await.unwrap();
    let fetched = repos.livros.get_by_isbn(isbn).await.unwrap().unwrap();
    assert!(fetched.autores.is_empty());

    repos.livros.delete(isbn).await.unwrap();
    assert_eq!(repos.livros.get_by_isbn(isbn).await.unwrap(), None);
}

#[tokio::test]
async fn test_livro_update_sets_only_titulo_and_edicao() {
    let Some(repos) = test_set().await else {
        return;
    };

    let isbn = "it-mongo-update-1";
    repos.livros.delete(isbn).await.unwrap();
    repos.livros.create(&livro(isbn)).await.unwrap();

    let mut changed = livro(isbn);
    changed.titulo = "Capitães da Areia (revista)".to_string();
    changed.edicao = "2".to_string();
    changed.num_paginas = 300;
    changed.editora_cnpj = "00000000000000".to_string();
    changed.funcionario_matricula = 555;
    repos.livros.update(&changed).await.unwrap();

    let fetched = repos.livros.get_by_isbn(isbn).await.unwrap().unwrap();
    assert_eq!(fetched.titulo, "Capitães da Areia (revista)");
    assert_eq!(fetched.edicao, "2");
    assert_eq!(fetched.num_paginas, 280);
    assert_eq!(fetched.editora_cnpj, "11222333000144");
    assert_eq!(fetched.funcionario_matricula, 100);

    repos.livros.delete(isbn).await.unwrap();
}

// Removing an author from one book deletes the author record globally.
// The second book keeps its embedded copy, now pointing at a deleted record.
#[tokio::test]
async fn test_remove_autor_flow_leaves_embedded_copy() {
    let Some(repos) = test_set().await else {
        return;
    };

    let isbn_a = "it-mongo-shared-a";
    let isbn_b = "it-mongo-shared-b";
    let autor = Autor {
        id: 920_004,
        primeiro_nome: "Machado".to_string(),
        sobrenome: "de Assis".to_string(),
    };
    repos.livros.delete(isbn_a).await.unwrap();
    repos.livros.delete(isbn_b).await.unwrap();
    repos.autores.delete(autor.id).await.unwrap();

    repos.livros.create(&livro(isbn_a)).await.unwrap();
    repos.livros.create(&livro(isbn_b)).await.unwrap();
    repos.autores.create(&autor).await.unwrap();
    repos.livros.add_autor(isbn_a, &autor).await.unwrap();
    repos.livros.add_autor(isbn_b, &autor).await.unwrap();

    // The menu's remove flow: unlink from one book, then delete the author.
    repos.livros.remove_autor(isbn_a, autor.id).await.unwrap();
    repos.autores.delete(autor.id).await.unwrap();

    assert_eq!(repos.autores.get_by_id(autor.id).await.unwrap(), None);

    let unlinked = repos.livros.get_by_isbn(isbn_a).await.unwrap().unwrap();
    assert!(unlinked.autores.is_empty());

    // $pull touched only the first book; the copy in the second survives.
    let other = repos.livros.get_by_isbn(isbn_b).await.unwrap().unwrap();
    assert_eq!(other.autores, vec![autor.clone()]);

    repos.livros.delete(isbn_a).await.unwrap();
    repos.livros.delete(isbn_b).await.unwrap();
}

#[tokio::test]
async fn test_get_all_returns_documents_sorted_by_id() {
    let Some(repos) = test_set().await else {
        return;
    };

    let first = Usuario {
        cpf: "92000000111".to_string(),
        primeiro_nome: "Bruna".to_string(),
        sobrenome: "Rocha".to_string(),
        data_nascimento: NaiveDate::from_ymd_opt(1985, 2, 14).unwrap(),
    };
    let second = Usuario {
        cpf: "92000000222".to_string(),
        primeiro_nome: "Carlos".to_string(),
        sobrenome: "Lima".to_string(),
        data_nascimento: NaiveDate::from_ymd_opt(1978, 11, 30).unwrap(),
    };
    repos.usuarios.delete(&first.cpf).await.unwrap();
    repos.usuarios.delete(&second.cpf).await.unwrap();

    // Inserted out of order on purpose.
    repos.usuarios.create(&second).await.unwrap();
    repos.usuarios.create(&first).await.unwrap();

    let all = repos.usuarios.get_all().await.unwrap();
    let pos_first = all.iter().position(|u| u.cpf == first.cpf).unwrap();
    let pos_second = all.iter().position(|u| u.cpf == second.cpf).unwrap();
    assert!(pos_first < pos_second);

    repos.usuarios.delete(&first.cpf).await.unwrap();
    repos.usuarios.delete(&second.cpf).await.unwrap();
}
