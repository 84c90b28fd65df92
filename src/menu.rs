use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, Utc};

use crate::models::{Autor, Emprestimo, Livro, Usuario};
use crate::repository::{BackendKind, RepositorySet};

// Fixed references used by the create-book operation until publishers and
// employees get their own flows.
const EDITORA_CNPJ_FIXO: &str = "11222333000144";
const FUNCIONARIO_MATRICULA_FIXO: i32 = 100;

/// Startup prompt for the storage backend. Returns `None` when the answer
/// is neither 1 nor 2.
pub fn choose_backend(input: &mut impl BufRead) -> Option<BackendKind> {
    println!("Bem-vindo ao sistema de gerenciamento da biblioteca!");
    println!("Qual banco de dados você deseja usar?");
    println!("1: PostgreSQL");
    println!("2: MongoDB");
    print!("Escolha uma opção: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = input.read_line(&mut line);
    match line.trim() {
        "1" => Some(BackendKind::Postgres),
        "2" => Some(BackendKind::Mongo),
        _ => None,
    }
}

/// Interactive terminal front end over one connected backend.
///
/// Input comes from any `BufRead`, so the flows run against scripted
/// buffers in tests exactly as they run against stdin.
pub struct Menu<R> {
    repos: RepositorySet,
    input: R,
}

impl<R: BufRead> Menu<R> {
    pub fn new(repos: RepositorySet, input: R) -> Self {
        Self { repos, input }
    }

    /// Main loop. Returns when the user picks 0 or the input is exhausted.
    pub async fn run(&mut self) {
        loop {
            print_operations();
            let Some(op) = self.prompt("Escolha uma opção: ") else {
                break;
            };

            match op.as_str() {
                "1" => self.create_usuario().await,
                "2" => self.read_usuario().await,
                "3" => self.update_usuario().await,
                "4" => self.delete_usuario().await,
                "5" => self.create_livro().await,
                "6" => self.read_livro().await,
                "7" => self.delete_livro().await,
                "8" => self.add_autor().await,
                "9" => self.remove_autor().await,
                "10" => self.create_emprestimo().await,
                "11" => self.read_emprestimo().await,
                "12" => self.update_emprestimo().await,
                "13" => self.delete_emprestimo().await,
                "0" => {
                    println!("Saindo do sistema. Até logo!");
                    break;
                }
                _ => println!("Opção inválida. Tente novamente."),
            }
        }
    }

    /// Prints the label and reads one trimmed line. `None` means the input
    /// is exhausted.
    fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{}", label);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    async fn create_usuario(&mut self) {
        let Some(cpf) = self.prompt("Digite o CPF: ") else {
            return;
        };
        let Some(primeiro_nome) = self.prompt("Digite o Primeiro Nome: ") else {
            return;
        };
        let Some(sobrenome) = self.prompt("Digite o Sobrenome: ") else {
            return;
        };
        let Some(data_str) = self.prompt("Digite a Data de Nascimento (AAAA-MM-DD): ") else {
            return;
        };
        let data_nascimento = match NaiveDate::parse_from_str(&data_str, "%Y-%m-%d") {
            Ok(data) => data,
            Err(e) => {
                println!("Formato de data inválido: {}", e);
                return;
            }
        };

        let novo = Usuario {
            cpf,
            primeiro_nome,
            sobrenome,
            data_nascimento,
        };

        match self.repos.usuarios.create(&novo).await {
            Ok(()) => println!("SUCESSO: Usuário criado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível criar o usuário. {}", e),
        }
    }

    async fn read_usuario(&mut self) {
        let Some(cpf) = self.prompt("Digite o CPF do usuário a ser lido: ") else {
            return;
        };

        match self.repos.usuarios.get_by_cpf(&cpf).await {
            Ok(Some(usuario)) => println!("SUCESSO: Usuário encontrado: {:?}", usuario),
            Ok(None) => println!("ERRO: Usuário com CPF '{}' não encontrado.", cpf),
            Err(e) => println!("ERRO: Usuário com CPF '{}' não encontrado. {}", cpf, e),
        }
    }

    async fn update_usuario(&mut self) {
        let Some(cpf) = self.prompt("Digite o CPF do usuário a ser atualizado: ") else {
            return;
        };

        let mut usuario = match self.repos.usuarios.get_by_cpf(&cpf).await {
            Ok(Some(usuario)) => usuario,
            Ok(None) | Err(_) => {
                println!("ERRO: Usuário com CPF '{}' não encontrado para atualizar.", cpf);
                return;
            }
        };
        println!("Atualizando usuário: {:?}", usuario);
        println!("Deixe o campo em branco e pressione Enter para manter o valor atual.");

        let Some(primeiro_nome) = self.prompt(&format!(
            "Digite o novo Primeiro Nome (atual: {}): ",
            usuario.primeiro_nome
        )) else {
            return;
        };
        if !primeiro_nome.is_empty() {
            usuario.primeiro_nome = primeiro_nome;
        }

        let Some(sobrenome) = self.prompt(&format!(
            "Digite o novo Sobrenome (atual: {}): ",
            usuario.sobrenome
        )) else {
            return;
        };
        if !sobrenome.is_empty() {
            usuario.sobrenome = sobrenome;
        }

        let Some(data_str) = self.prompt(&format!(
            "Digite a nova Data de Nascimento (AAAA-MM-DD) (atual: {}): ",
            usuario.data_nascimento
        )) else {
            return;
        };
        if !data_str.is_empty() {
            match NaiveDate::parse_from_str(&data_str, "%Y-%m-%d") {
                Ok(data) => usuario.data_nascimento = data,
                Err(e) => println!(
                    "ERRO: Formato de data inválido. A data de nascimento não foi alterada: {}",
                    e
                ),
            }
        }

        match self.repos.usuarios.update(&usuario).await {
            Ok(()) => println!("SUCESSO: Usuário atualizado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível atualizar o usuário. {}", e),
        }
    }

    async fn delete_usuario(&mut self) {
        let Some(cpf) = self.prompt("Digite o CPF do usuário a ser deletado: ") else {
            return;
        };

        match self.repos.usuarios.delete(&cpf).await {
            Ok(()) => println!("SUCESSO: Usuário deletado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível deletar o usuário. {}", e),
        }
    }

    async fn create_livro(&mut self) {
        let Some(isbn) = self.prompt("Digite o ISBN do livro: ") else {
            return;
        };
        let Some(titulo) = self.prompt("Digite o Título: ") else {
            return;
        };
        let Some(edicao) = self.prompt("Digite a Edição: ") else {
            return;
        };
        let Some(num_paginas_str) = self.prompt("Digite o Número de Páginas: ") else {
            return;
        };
        let num_paginas: i32 = match num_paginas_str.parse() {
            Ok(n) => n,
            Err(e) => {
                println!("ERRO: Número de páginas inválido: {}", e);
                return;
            }
        };

        println!(
            "Usando valores fixos para teste: CNPJ da Editora={}, Matrícula do Funcionário={}",
            EDITORA_CNPJ_FIXO, FUNCIONARIO_MATRICULA_FIXO
        );

        let novo = Livro {
            isbn,
            titulo,
            edicao,
            num_paginas,
            editora_cnpj: EDITORA_CNPJ_FIXO.to_string(),
            funcionario_matricula: FUNCIONARIO_MATRICULA_FIXO,
            autores: Vec::new(),
        };

        match self.repos.livros.create(&novo).await {
            Ok(()) => println!("SUCESSO: Livro criado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível criar o livro. {}", e),
        }
    }

    async fn read_livro(&mut self) {
        let Some(isbn) = self.prompt("Digite o ISBN do livro a ser lido: ") else {
            return;
        };

        match self.repos.livros.get_by_isbn(&isbn).await {
            Ok(Some(livro)) => println!("SUCESSO: Livro encontrado: {:?}", livro),
            Ok(None) => println!("ERRO: Livro com ISBN '{}' não encontrado.", isbn),
            Err(e) => println!("ERRO: Livro com ISBN '{}' não encontrado. {}", isbn, e),
        }
    }

    async fn delete_livro(&mut self) {
        let Some(isbn) = self.prompt("Digite o ISBN do livro a ser deletado: ") else {
            return;
        };

        match self.repos.livros.delete(&isbn).await {
            Ok(()) => println!("SUCESSO: Livro deletado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível deletar o livro. {}", e),
        }
    }

    async fn add_autor(&mut self) {
        let Some(isbn) = self.prompt("Digite o ISBN do livro para adicionar um autor: ") else {
            return;
        };
        let Some(id_str) = self.prompt("Digite o ID do autor: ") else {
            return;
        };
        let autor_id: i32 = id_str.parse().unwrap_or(0);
        let Some(primeiro_nome) = self.prompt("Digite o primeiro nome do autor: ") else {
            return;
        };
        let Some(sobrenome) = self.prompt("Digite o sobrenome do autor: ") else {
            return;
        };

        let autor = Autor {
            id: autor_id,
            primeiro_nome,
            sobrenome,
        };

        // A failed create usually means the author is already registered;
        // the link is attempted either way.
        if let Err(e) = self.repos.autores.create(&autor).await {
            println!("AVISO: Autor pode já existir. Continuando... ({})", e);
        }

        match self.repos.livros.add_autor(&isbn, &autor).await {
            Ok(()) => println!("SUCESSO: Relacionamento criado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível adicionar o relacionamento. {}", e),
        }
    }

    async fn remove_autor(&mut self) {
        let Some(isbn) = self.prompt("Digite o ISBN do livro para remover um autor: ") else {
            return;
        };
        let Some(id_str) = self.prompt("Digite o ID do autor a ser removido: ") else {
            return;
        };
        let autor_id: i32 = id_str.parse().unwrap_or(0);

        // The author record is only touched after the link is gone.
        if let Err(e) = self.repos.livros.remove_autor(&isbn, autor_id).await {
            println!("ERRO: Não foi possível remover o relacionamento. {}", e);
            return;
        }
        println!("SUCESSO: Relacionamento removido. Verifique a tabela/coleção de relacionamento.");

        // The primary record goes too, even when other books still
        // reference this author.
        println!("Deletando autor com ID {} da tabela principal 'Autor'...", autor_id);
        match self.repos.autores.delete(autor_id).await {
            Ok(()) => {
                println!("SUCESSO: Autor deletado da tabela principal. Verifique o banco de dados.")
            }
            Err(e) => println!("ERRO: Não foi possível deletar o autor da tabela principal. {}", e),
        }
    }

    async fn create_emprestimo(&mut self) {
        let Some(id_str) = self.prompt("Digite o ID do empréstimo (número inteiro): ") else {
            return;
        };
        let id: i32 = match id_str.parse() {
            Ok(id) => id,
            Err(e) => {
                println!("ERRO: ID inválido. {}", e);
                return;
            }
        };

        let Some(status) = self.prompt("Digite o status do empréstimo: ") else {
            return;
        };
        let Some(quant_str) = self.prompt("Digite a quantidade de livros: ") else {
            return;
        };
        let quant_livros: i32 = match quant_str.parse() {
            Ok(n) => n,
            Err(e) => {
                println!("ERRO: Quantidade de livros inválida. {}", e);
                return;
            }
        };
        let Some(cliente_usuario_cpf) = self.prompt("Digite o CPF do cliente/usuário: ") else {
            return;
        };

        let novo = Emprestimo {
            id,
            data_emprestimo: Utc::now(),
            status,
            quant_livros,
            cliente_usuario_cpf,
        };

        match self.repos.emprestimos.create(&novo).await {
            Ok(()) => println!("SUCESSO: Empréstimo criado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível criar o empréstimo. {}", e),
        }
    }

    async fn read_emprestimo(&mut self) {
        let Some(id_str) = self.prompt("Digite o ID do empréstimo a ser lido (número inteiro): ")
        else {
            return;
        };
        let id: i32 = match id_str.parse() {
            Ok(id) => id,
            Err(e) => {
                println!("ERRO: ID inválido. {}", e);
                return;
            }
        };

        match self.repos.emprestimos.get_by_id(id).await {
            Ok(Some(emprestimo)) => println!("SUCESSO: Empréstimo encontrado: {:?}", emprestimo),
            Ok(None) => println!("ERRO: Empréstimo com ID '{}' não encontrado.", id),
            Err(e) => println!("ERRO: Empréstimo com ID '{}' não encontrado. {}", id, e),
        }
    }

    async fn update_emprestimo(&mut self) {
        let Some(id_str) =
            self.prompt("Digite o ID do empréstimo a ser atualizado (número inteiro): ")
        else {
            return;
        };
        let id: i32 = match id_str.parse() {
            Ok(id) => id,
            Err(e) => {
                println!("ERRO: ID inválido. {}", e);
                return;
            }
        };

        let mut emprestimo = match self.repos.emprestimos.get_by_id(id).await {
            Ok(Some(emprestimo)) => emprestimo,
            Ok(None) => {
                println!("ERRO: Empréstimo com ID '{}' não encontrado para atualizar.", id);
                return;
            }
            Err(e) => {
                println!(
                    "ERRO: Empréstimo com ID '{}' não encontrado para atualizar. {}",
                    id, e
                );
                return;
            }
        };
        println!("Atualizando empréstimo: {:?}", emprestimo);

        let Some(status) = self.prompt(&format!(
            "Digite o novo status (atual: {}): ",
            emprestimo.status
        )) else {
            return;
        };
        if !status.is_empty() {
            emprestimo.status = status;
        }

        let Some(quant_str) = self.prompt(&format!(
            "Digite a nova quantidade de livros (atual: {}): ",
            emprestimo.quant_livros
        )) else {
            return;
        };
        if !quant_str.is_empty() {
            if let Ok(quant) = quant_str.parse() {
                emprestimo.quant_livros = quant;
            }
        }

        let Some(cpf) = self.prompt(&format!(
            "Digite o novo CPF do cliente/usuário (atual: {}): ",
            emprestimo.cliente_usuario_cpf
        )) else {
            return;
        };
        if !cpf.is_empty() {
            emprestimo.cliente_usuario_cpf = cpf;
        }

        // Every update stamps the loan date with the current time.
        emprestimo.data_emprestimo = Utc::now();

        match self.repos.emprestimos.update(&emprestimo).await {
            Ok(()) => println!("SUCESSO: Empréstimo atualizado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível atualizar o empréstimo. {}", e),
        }
    }

    async fn delete_emprestimo(&mut self) {
        let Some(id_str) = self.prompt("Digite o ID do empréstimo a ser deletado (número inteiro): ")
        else {
            return;
        };
        let id: i32 = match id_str.parse() {
            Ok(id) => id,
            Err(e) => {
                println!("ERRO: ID inválido. {}", e);
                return;
            }
        };

        match self.repos.emprestimos.delete(id).await {
            Ok(()) => println!("SUCESSO: Empréstimo deletado. Verifique o banco de dados."),
            Err(e) => println!("ERRO: Não foi possível deletar o empréstimo. {}", e),
        }
    }
}

fn print_operations() {
    println!("\n===== MENU DE OPERAÇÕES =====");
    println!("--- Entidade: Usuário ---");
    println!("1: Criar Usuário");
    println!("2: Ler Usuário por CPF");
    println!("3: Atualizar Usuário (completo)");
    println!("4: Deletar Usuário");
    println!("--- Entidade: Livro e Relacionamento ---");
    println!("5: Criar Livro (com dados de teste fixos)");
    println!("6: Ler Livro por ISBN");
    println!("7: Deletar Livro");
    println!("8: Adicionar Autor a um Livro (Criar Relacionamento)");
    println!("9: Remover Autor de um Livro (Deletar Relacionamento E Autor)");
    println!("--- Entidade: Empréstimo ---");
    println!("10: Criar Empréstimo");
    println!("11: Ler Empréstimo por ID");
    println!("12: Atualizar Empréstimo");
    println!("13: Deletar Empréstimo");
    println!("-------------------------------");
    println!("0: Sair");
}
