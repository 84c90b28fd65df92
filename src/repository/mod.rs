use crate::error::AppResult;
use crate::models::{Autor, Emprestimo, Livro, Usuario};
use async_trait::async_trait;
use std::sync::Arc;

pub mod mongo;
pub mod postgres;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Postgres,
    Mongo,
}

/// Patron persistence operations
///
/// Keys are CPF strings. Reads return `None` for unknown keys; updates and
/// deletes of unknown keys succeed without effect.
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// Insert a new patron
    async fn create(&self, usuario: &Usuario) -> AppResult<()>;

    /// Fetch a patron by CPF
    async fn get_by_cpf(&self, cpf: &str) -> AppResult<Option<Usuario>>;

    /// Fetch all patrons ordered by CPF
    async fn get_all(&self) -> AppResult<Vec<Usuario>>;

    /// Overwrite the patron record identified by `usuario.cpf`
    async fn update(&self, usuario: &Usuario) -> AppResult<()>;

    /// Remove the patron identified by CPF
    async fn delete(&self, cpf: &str) -> AppResult<()>;
}

/// Author persistence operations
///
/// Author ids are caller-assigned, not generated by the store.
#[async_trait]
pub trait AutorRepository: Send + Sync {
    /// Insert a new author. The relational backend ignores an id that
    /// already exists; the document backend surfaces the duplicate-key
    /// error.
    async fn create(&self, autor: &Autor) -> AppResult<()>;

    /// Fetch an author by id
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Autor>>;

    /// Fetch all authors ordered by id
    async fn get_all(&self) -> AppResult<Vec<Autor>>;

    /// Overwrite the author record identified by `autor.id`
    async fn update(&self, autor: &Autor) -> AppResult<()>;

    /// Remove the author identified by id. Links from books to this author
    /// are not cleaned up.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Book persistence operations, including the book-author relationship
#[async_trait]
pub trait LivroRepository: Send + Sync {
    /// Insert a new book. The relational backend persists only the scalar
    /// columns and expects authors to be linked through `add_autor`; the
    /// document backend stores the record as given, embedded authors
    /// included.
    async fn create(&self, livro: &Livro) -> AppResult<()>;

    /// Fetch a book by ISBN with its linked authors
    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Livro>>;

    /// Fetch all books ordered by ISBN, each with its linked authors
    async fn get_all(&self) -> AppResult<Vec<Livro>>;

    /// Update the book identified by `livro.isbn`. Only `titulo` and
    /// `edicao` are persisted; the remaining fields keep their stored
    /// values.
    async fn update(&self, livro: &Livro) -> AppResult<()>;

    /// Remove the book identified by ISBN. Junction rows referencing the
    /// ISBN are not cleaned up in the relational backend.
    async fn delete(&self, isbn: &str) -> AppResult<()>;

    /// Link an author to a book. The relational backend records only the
    /// author id; the document backend embeds a copy of the whole record.
    async fn add_autor(&self, isbn: &str, autor: &Autor) -> AppResult<()>;

    /// Unlink an author from a book. Only the link is removed; the author
    /// record itself is untouched.
    async fn remove_autor(&self, isbn: &str, autor_id: i32) -> AppResult<()>;
}

/// Loan persistence operations
#[async_trait]
pub trait EmprestimoRepository: Send + Sync {
    /// Insert a new loan
    async fn create(&self, emprestimo: &Emprestimo) -> AppResult<()>;

    /// Fetch a loan by id
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Emprestimo>>;

    /// Fetch all loans ordered by id
    async fn get_all(&self) -> AppResult<Vec<Emprestimo>>;

    /// Overwrite the loan record identified by `emprestimo.id`
    async fn update(&self, emprestimo: &Emprestimo) -> AppResult<()>;

    /// Remove the loan identified by id
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// The four repositories of one connected backend
///
/// Every handler and menu flow works against this set, so PostgreSQL and
/// MongoDB stay interchangeable behind the trait objects.
#[derive(Clone)]
pub struct RepositorySet {
    pub usuarios: Arc<dyn UsuarioRepository>,
    pub autores: Arc<dyn AutorRepository>,
    pub livros: Arc<dyn LivroRepository>,
    pub emprestimos: Arc<dyn EmprestimoRepository>,
}

impl RepositorySet {
    /// Build the repository set on an existing PostgreSQL pool
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            usuarios: Arc::new(postgres::PostgresUsuarioRepository::new(pool.clone())),
            autores: Arc::new(postgres::PostgresAutorRepository::new(pool.clone())),
            livros: Arc::new(postgres::PostgresLivroRepository::new(pool.clone())),
            emprestimos: Arc::new(postgres::PostgresEmprestimoRepository::new(pool)),
        }
    }

    /// Build the repository set on an existing MongoDB database handle
    pub fn mongo(db: mongodb::Database) -> Self {
        Self {
            usuarios: Arc::new(mongo::MongoUsuarioRepository::new(db.clone())),
            autores: Arc::new(mongo::MongoAutorRepository::new(db.clone())),
            livros: Arc::new(mongo::MongoLivroRepository::new(db.clone())),
            emprestimos: Arc::new(mongo::MongoEmprestimoRepository::new(db)),
        }
    }
}
