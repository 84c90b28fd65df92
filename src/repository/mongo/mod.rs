mod autor;
mod documents;
mod emprestimo;
mod livro;
mod usuario;

pub use autor::MongoAutorRepository;
pub use emprestimo::MongoEmprestimoRepository;
pub use livro::MongoLivroRepository;
pub use usuario::MongoUsuarioRepository;
