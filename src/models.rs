use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Library patron, keyed by CPF (Brazilian national ID).
///
/// The CPF doubles as the row primary key in PostgreSQL and as the
/// document `_id` in MongoDB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub cpf: String,
    pub primeiro_nome: String,
    pub sobrenome: String,
    pub data_nascimento: NaiveDate,
}

/// Book author. In the document backend a copy of this record is embedded
/// inside every book the author is linked to; those copies are not kept in
/// sync with the canonical `autores` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autor {
    pub id: i32,
    pub primeiro_nome: String,
    pub sobrenome: String,
}

/// Book record, keyed by ISBN.
///
/// `autores` is populated from the `Escreve` junction table in the
/// relational backend and from the embedded array in the document backend.
/// `editora_cnpj` and `funcionario_matricula` are plain references; nothing
/// validates them against publisher or employee records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livro {
    pub isbn: String,
    pub titulo: String,
    pub edicao: String,
    pub num_paginas: i32,
    pub editora_cnpj: String,
    pub funcionario_matricula: i32,
    #[serde(default)]
    pub autores: Vec<Autor>,
}

/// Book loan. `cliente_usuario_cpf` is not checked against an existing
/// Usuario and `quant_livros` is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emprestimo {
    pub id: i32,
    pub data_emprestimo: DateTime<Utc>,
    pub status: String,
    pub quant_livros: i32,
    pub cliente_usuario_cpf: String,
}
