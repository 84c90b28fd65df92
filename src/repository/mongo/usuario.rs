use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use super::documents::UsuarioDoc;
use crate::error::AppResult;
use crate::models::Usuario;
use crate::repository::UsuarioRepository;

/// Patron repository backed by the `usuarios` collection
pub struct MongoUsuarioRepository {
    collection: Collection<UsuarioDoc>,
}

impl MongoUsuarioRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("usuarios"),
        }
    }
}

#[async_trait]
impl UsuarioRepository for MongoUsuarioRepository {
    async fn create(&self, usuario: &Usuario) -> AppResult<()> {
        self.collection.insert_one(UsuarioDoc::from(usuario)).await?;
        Ok(())
    }

    async fn get_by_cpf(&self, cpf: &str) -> AppResult<Option<Usuario>> {
        let doc = self.collection.find_one(doc! { "_id": cpf }).await?;
        Ok(doc.map(Usuario::from))
    }

    async fn get_all(&self) -> AppResult<Vec<Usuario>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        let docs: Vec<UsuarioDoc> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Usuario::from).collect())
    }

    async fn update(&self, usuario: &Usuario) -> AppResult<()> {
        let update = doc! { "$set": {
            "data_nascimento": usuario.data_nascimento.to_string(),
            "sobrenome": usuario.sobrenome.clone(),
            "primeiro_nome": usuario.primeiro_nome.clone(),
        }};
        self.collection
            .update_one(doc! { "_id": &usuario.cpf }, update)
            .await?;

        Ok(())
    }

    async fn delete(&self, cpf: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "_id": cpf }).await?;
        Ok(())
    }
}
