mod autor;
mod emprestimo;
mod livro;
pub mod schema;
mod usuario;

pub use autor::PostgresAutorRepository;
pub use emprestimo::PostgresEmprestimoRepository;
pub use livro::PostgresLivroRepository;
pub use usuario::PostgresUsuarioRepository;
