use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use super::documents::AutorDoc;
use crate::error::AppResult;
use crate::models::Autor;
use crate::repository::AutorRepository;

/// Author repository backed by the `autores` collection.
///
/// The embedded copies inside book documents are written by the book
/// repository and are not touched here.
pub struct MongoAutorRepository {
    collection: Collection<AutorDoc>,
}

impl MongoAutorRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("autores"),
        }
    }
}

#[async_trait]
impl AutorRepository for MongoAutorRepository {
    async fn create(&self, autor: &Autor) -> AppResult<()> {
        self.collection.insert_one(AutorDoc::from(autor)).await?;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Autor>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(Autor::from))
    }

    async fn get_all(&self) -> AppResult<Vec<Autor>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        let docs: Vec<AutorDoc> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Autor::from).collect())
    }

    async fn update(&self, autor: &Autor) -> AppResult<()> {
        let update = doc! { "$set": {
            "primeiro_nome": &autor.primeiro_nome,
            "sobrenome": &autor.sobrenome,
        }};
        self.collection
            .update_one(doc! { "_id": autor.id }, update)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
