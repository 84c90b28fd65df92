use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Autor, Emprestimo, Livro, Usuario};

/// Stored form of `Usuario` in the `usuarios` collection. The CPF is the
/// document id.
#[derive(Debug, Serialize, Deserialize)]
pub struct UsuarioDoc {
    #[serde(rename = "_id")]
    pub cpf: String,
    pub primeiro_nome: String,
    pub sobrenome: String,
    pub data_nascimento: NaiveDate,
}

impl From<&Usuario> for UsuarioDoc {
    fn from(usuario: &Usuario) -> Self {
        Self {
            cpf: usuario.cpf.clone(),
            primeiro_nome: usuario.primeiro_nome.clone(),
            sobrenome: usuario.sobrenome.clone(),
            data_nascimento: usuario.data_nascimento,
        }
    }
}

impl From<UsuarioDoc> for Usuario {
    fn from(doc: UsuarioDoc) -> Self {
        Self {
            cpf: doc.cpf,
            primeiro_nome: doc.primeiro_nome,
            sobrenome: doc.sobrenome,
            data_nascimento: doc.data_nascimento,
        }
    }
}

/// Stored form of `Autor`, both in the `autores` collection and embedded
/// inside book documents. The author id is the document id in either place.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutorDoc {
    #[serde(rename = "_id")]
    pub id: i32,
    pub primeiro_nome: String,
    pub sobrenome: String,
}

impl From<&Autor> for AutorDoc {
    fn from(autor: &Autor) -> Self {
        Self {
            id: autor.id,
            primeiro_nome: autor.primeiro_nome.clone(),
            sobrenome: autor.sobrenome.clone(),
        }
    }
}

impl From<AutorDoc> for Autor {
    fn from(doc: AutorDoc) -> Self {
        Self {
            id: doc.id,
            primeiro_nome: doc.primeiro_nome,
            sobrenome: doc.sobrenome,
        }
    }
}

/// Stored form of `Livro` in the `livros` collection. The ISBN is the
/// document id and authors live in an embedded array.
#[derive(Debug, Serialize, Deserialize)]
pub struct LivroDoc {
    #[serde(rename = "_id")]
    pub isbn: String,
    pub titulo: String,
    pub edicao: String,
    pub num_paginas: i32,
    pub editora_cnpj: String,
    pub funcionario_matricula: i32,
    #[serde(default)]
    pub autores: Vec<AutorDoc>,
}

impl From<&Livro> for LivroDoc {
    fn from(livro: &Livro) -> Self {
        Self {
            isbn: livro.isbn.clone(),
            titulo: livro.titulo.clone(),
            edicao: livro.edicao.clone(),
            num_paginas: livro.num_paginas,
            editora_cnpj: livro.editora_cnpj.clone(),
            funcionario_matricula: livro.funcionario_matricula,
            autores: livro.autores.iter().map(AutorDoc::from).collect(),
        }
    }
}

impl From<LivroDoc> for Livro {
    fn from(doc: LivroDoc) -> Self {
        Self {
            isbn: doc.isbn,
            titulo: doc.titulo,
            edicao: doc.edicao,
            num_paginas: doc.num_paginas,
            editora_cnpj: doc.editora_cnpj,
            funcionario_matricula: doc.funcionario_matricula,
            autores: doc.autores.into_iter().map(Autor::from).collect(),
        }
    }
}

/// Stored form of `Emprestimo` in the `emprestimos` collection. The loan
/// timestamp is kept as a native BSON datetime.
#[derive(Debug, Serialize, Deserialize)]
pub struct EmprestimoDoc {
    #[serde(rename = "_id")]
    pub id: i32,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub data_emprestimo: DateTime<Utc>,
    pub status: String,
    pub quant_livros: i32,
    pub cliente_usuario_cpf: String,
}

impl From<&Emprestimo> for EmprestimoDoc {
    fn from(emprestimo: &Emprestimo) -> Self {
        Self {
            id: emprestimo.id,
            data_emprestimo: emprestimo.data_emprestimo,
            status: emprestimo.status.clone(),
            quant_livros: emprestimo.quant_livros,
            cliente_usuario_cpf: emprestimo.cliente_usuario_cpf.clone(),
        }
    }
}

impl From<EmprestimoDoc> for Emprestimo {
    fn from(doc: EmprestimoDoc) -> Self {
        Self {
            id: doc.id,
            data_emprestimo: doc.data_emprestimo,
            status: doc.status,
            quant_livros: doc.quant_livros,
            cliente_usuario_cpf: doc.cliente_usuario_cpf,
        }
    }
}
