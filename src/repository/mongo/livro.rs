use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use super::documents::LivroDoc;
use crate::error::AppResult;
use crate::models::{Autor, Livro};
use crate::repository::LivroRepository;

/// Book repository backed by the `livros` collection, with authors embedded
/// as sub-documents inside each book
pub struct MongoLivroRepository {
    collection: Collection<LivroDoc>,
}

impl MongoLivroRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("livros"),
        }
    }
}

#[async_trait]
impl LivroRepository for MongoLivroRepository {
    async fn create(&self, livro: &Livro) -> AppResult<()> {
        self.collection.insert_one(LivroDoc::from(livro)).await?;
        Ok(())
    }

    async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Livro>> {
        let doc = self.collection.find_one(doc! { "_id": isbn }).await?;
        Ok(doc.map(Livro::from))
    }

    async fn get_all(&self) -> AppResult<Vec<Livro>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        let docs: Vec<LivroDoc> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Livro::from).collect())
    }

    // Only titulo and edicao are written back.
    async fn update(&self, livro: &Livro) -> AppResult<()> {
        let update = doc! { "$set": {
            "titulo": &livro.titulo,
            "edicao": &livro.edicao,
        }};
        self.collection
            .update_one(doc! { "_id": &livro.isbn }, update)
            .await?;

        Ok(())
    }

    async fn delete(&self, isbn: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "_id": isbn }).await?;
        Ok(())
    }

    async fn add_autor(&self, isbn: &str, autor: &Autor) -> AppResult<()> {
        let embedded = doc! {
            "_id": autor.id,
            "primeiro_nome": &autor.primeiro_nome,
            "sobrenome": &autor.sobrenome,
        };
        self.collection
            .update_one(doc! { "_id": isbn }, doc! { "$push": { "autores": embedded } })
            .await?;

        Ok(())
    }

    async fn remove_autor(&self, isbn: &str, autor_id: i32) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "_id": isbn },
                doc! { "$pull": { "autores": { "_id": autor_id } } },
            )
            .await?;

        Ok(())
    }
}
