use axum_test::TestServer;
use http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_livro_crud_roundtrip() {
    let server = TestServer::new(common::setup_test_app()).unwrap();

    // Create; the autores field may be omitted entirely
    let create = server
        .post("/postgres/livros")
        .json(&common::livro_json("85359-0277-5", "Capitães da Areia"))
        .await;
    assert_eq!(create.status_code(), StatusCode::CREATED);
    let body: serde_json::Value = create.json();
    assert_eq!(body["message"], "Livro criado com sucesso");
    assert_eq!(body["livro"]["isbn"], "85359-0277-5");
    assert_eq!(body["livro"]["autores"], json!([]));

    // List
    let list = server.get("/postgres/livros").await;
    assert_eq!(list.status_code(), StatusCode::OK);
    let livros: serde_json::Value = list.json();
    assert_eq!(livros.as_array().unwrap().len(), 1);
    assert_eq!(livros[0]["titulo"], "Capitães da Areia");

    // Delete
    let delete = server.delete("/postgres/livros/85359-0277-5").await;
    assert_eq!(delete.status_code(), StatusCode::OK);
    let body: serde_json::Value = delete.json();
    assert_eq!(body["message"], "Livro deletado com sucesso");

    let list = server.get("/postgres/livros").await;
    assert_eq!(list.json::<serde_json::Value>(), json!([]));
}

#[tokio::test]
async fn test_livro_update_persists_only_titulo_and_edicao() {
    let server = TestServer::new(common::setup_test_app()).unwrap();

    server
        .post("/postgres/livros")
        .json(&common::livro_json("85359-0277-5", "Capitães da Areia"))
        .await;

    // The update echoes the submitted record in full...
    let update = server
        .put("/postgres/livros/85359-0277-5")
        .json(&json!({
            "isbn": "85359-0277-5",
            "titulo": "Capitães da Areia (revista)",
            "edicao": "2",
            "num_paginas": 300,
            "editora_cnpj": "00000000000000",
            "funcionario_matricula": 555
        }))
        .await;
    assert_eq!(update.status_code(), StatusCode::OK);
    let body: serde_json::Value = update.json();
    assert_eq!(body["message"], "Livro atualizado com sucesso");
    assert_eq!(body["livro"]["num_paginas"], 300);

    // ...but only titulo and edicao reach the store.
    let list = server.get("/postgres/livros").await;
    let livros: serde_json::Value = list.json();
    assert_eq!(livros[0]["titulo"], "Capitães da Areia (revista)");
    assert_eq!(livros[0]["edicao"], "2");
    assert_eq!(livros[0]["num_paginas"], 280);
    assert_eq!(livros[0]["editora_cnpj"], "11222333000144");
    assert_eq!(livros[0]["funcionario_matricula"], 100);
}

#[tokio::test]
async fn test_livro_create_keeps_embedded_autores() {
    let server = TestServer::new(common::setup_test_app()).unwrap();

    let mut payload = common::livro_json("85359-0277-5", "Capitães da Areia");
    payload["autores"] = json!([{"id": 7, "primeiro_nome": "Jorge", "sobrenome": "Amado"}]);

    let create = server.post("/mongo/livros").json(&payload).await;
    assert_eq!(create.status_code(), StatusCode::CREATED);

    let list = server.get("/mongo/livros").await;
    let livros: serde_json::Value = list.json();
    assert_eq!(livros[0]["autores"][0]["id"], 7);
    assert_eq!(livros[0]["autores"][0]["sobrenome"], "Amado");
}

#[tokio::test]
async fn test_livro_invalid_body_is_rejected() {
    let server = TestServer::new(common::setup_test_app()).unwrap();

    let response = server
        .post("/postgres/livros")
        .json(&json!({"isbn": "85359-0277-5"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Dados inválidos: "));
}
