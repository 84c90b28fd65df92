use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database};

use super::documents::EmprestimoDoc;
use crate::error::AppResult;
use crate::models::Emprestimo;
use crate::repository::EmprestimoRepository;

/// Loan repository backed by the `emprestimos` collection
pub struct MongoEmprestimoRepository {
    collection: Collection<EmprestimoDoc>,
}

impl MongoEmprestimoRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection("emprestimos"),
        }
    }
}

#[async_trait]
impl EmprestimoRepository for MongoEmprestimoRepository {
    async fn create(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        self.collection
            .insert_one(EmprestimoDoc::from(emprestimo))
            .await?;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Emprestimo>> {
        let doc = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(doc.map(Emprestimo::from))
    }

    async fn get_all(&self) -> AppResult<Vec<Emprestimo>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?;
        let docs: Vec<EmprestimoDoc> = cursor.try_collect().await?;

        Ok(docs.into_iter().map(Emprestimo::from).collect())
    }

    async fn update(&self, emprestimo: &Emprestimo) -> AppResult<()> {
        let update = doc! { "$set": {
            "data_emprestimo": bson::DateTime::from_chrono(emprestimo.data_emprestimo),
            "status": &emprestimo.status,
            "quant_livros": emprestimo.quant_livros,
            "cliente_usuario_cpf": &emprestimo.cliente_usuario_cpf,
        }};
        self.collection
            .update_one(doc! { "_id": emprestimo.id }, update)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
